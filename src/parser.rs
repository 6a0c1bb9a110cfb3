use crate::ast::{NodeId, NodeKind, Tree};
use crate::class::parse_bounds;
use crate::error::{CompileError, Result};

/// Parser for regular expressions.
///
/// Produces the flat form of the pattern: every level (top, group body) is a
/// plain chain in source order, with postfix operators sitting *after* the
/// node they apply to and no operand attached yet. The rewrite passes turn
/// that into the final tree.
pub struct Parser<'a> {
    pub pattern: &'a str,
    pub pos: usize,
    next_group_id: usize,
    tree: Tree,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            pos: 0,
            next_group_id: 1,
            tree: Tree::new(),
        }
    }

    /// Allocate a new group ID for capturing groups.
    fn alloc_group_id(&mut self) -> usize {
        let id = self.next_group_id;
        self.next_group_id += 1;
        id
    }

    /// Peek at the next character in the pattern without advancing.
    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    /// Peek at the character after the next one.
    fn peek_second(&self) -> Option<char> {
        self.pattern[self.pos..].chars().nth(1)
    }

    /// Advance the parser by one character and return it.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume `expected` if it is next.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn push(&mut self, kind: NodeKind, offset: usize) -> NodeId {
        self.tree.push(kind, offset)
    }

    /// Entry point: parse the whole pattern into its flat top-level chain.
    ///
    /// Example:
    /// - Pattern: `a*b` → Literal(a) → MatchZeroOrMore → Literal(b)
    pub fn parse(mut self) -> Result<(Tree, Option<NodeId>)> {
        let mut items = Vec::new();
        while let Some(ch) = self.peek() {
            if ch == ')' {
                return Err(CompileError::parse(self.pos, "`(` before `)`"));
            }
            items.push(self.parse_group()?);
        }
        let head = self.tree.link(&items);
        Ok((self.tree, head))
    }

    /// `(` ... `)` or fall through.
    ///
    /// Example:
    /// - Pattern: `(ab)` → Group { id: 1, body: Literal(a) → Literal(b) }
    fn parse_group(&mut self) -> Result<NodeId> {
        let start = self.pos;
        if !self.eat('(') {
            return self.parse_start_of_line();
        }
        let id = self.alloc_group_id();
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(CompileError::parse(
                        self.pos,
                        format!("`)` to close the group opened at {start}"),
                    ));
                }
                Some(')') => {
                    self.advance();
                    break;
                }
                Some(_) => items.push(self.parse_group()?),
            }
        }
        let body = self.tree.link(&items);
        Ok(self.push(NodeKind::Group { body, id }, start))
    }

    fn parse_start_of_line(&mut self) -> Result<NodeId> {
        let start = self.pos;
        if self.eat('^') {
            return Ok(self.push(NodeKind::StartOfLine, start));
        }
        self.parse_end_of_line()
    }

    /// `$` is only accepted as the last thing in the pattern or in a group.
    fn parse_end_of_line(&mut self) -> Result<NodeId> {
        let start = self.pos;
        if !self.eat('$') {
            return self.parse_any_char();
        }
        match self.peek() {
            None | Some(')') => Ok(self.push(NodeKind::EndOfLine, start)),
            Some(_) => Err(CompileError::parse(self.pos, "end of pattern after `$`")),
        }
    }

    fn parse_any_char(&mut self) -> Result<NodeId> {
        let start = self.pos;
        if self.eat('.') {
            return Ok(self.push(NodeKind::AnyChar, start));
        }
        self.parse_bracket_expr()
    }

    /// Parse a character class, e.g. `[abc]` or `[^abc]`.
    ///
    /// Examples:
    /// - Pattern: `[a-z]`  → BracketExpr { body: Literal(a-z) }
    /// - Pattern: `[^\]]`  → BracketExprExcl { body: Literal(]) }
    fn parse_bracket_expr(&mut self) -> Result<NodeId> {
        let start = self.pos;
        if !self.eat('[') {
            return self.parse_match_group_ref();
        }
        let excluded = self.eat('^');
        let body_start = self.pos;
        let mut set = String::new();
        loop {
            match self.advance() {
                None => {
                    return Err(CompileError::parse(
                        self.pos,
                        format!("`]` to close the class opened at {start}"),
                    ));
                }
                Some(']') => break,
                Some('\\') => match self.advance() {
                    Some(ch) => set.push(ch),
                    None => return Err(CompileError::parse(self.pos, "character after `\\`")),
                },
                Some(ch) => set.push(ch),
            }
        }
        if set.is_empty() {
            return Err(CompileError::parse(body_start, "class member before `]`"));
        }
        let body = self.push(NodeKind::Literal(set), body_start);
        let kind = if excluded {
            NodeKind::BracketExprExcl { body }
        } else {
            NodeKind::BracketExpr { body }
        };
        Ok(self.push(kind, start))
    }

    /// `\1`..`\9` are back-references; any other escaped character is a
    /// literal.
    fn parse_match_group_ref(&mut self) -> Result<NodeId> {
        let start = self.pos;
        if self.peek() != Some('\\') {
            return self.parse_quantifier();
        }
        match self.peek_second() {
            Some(d @ '1'..='9') => Err(CompileError::Unsupported {
                position: start,
                feature: format!("back-reference `\\{d}`"),
            }),
            Some(ch) => {
                self.advance();
                self.advance();
                Ok(self.push(NodeKind::Literal(ch.to_string()), start))
            }
            None => Err(CompileError::parse(start + 1, "character after `\\`")),
        }
    }

    /// `*`, `?`, `+` and `|`. The operand is attached later by the rewriter.
    fn parse_quantifier(&mut self) -> Result<NodeId> {
        let start = self.pos;
        let kind = match self.peek() {
            Some('*') => NodeKind::MatchZeroOrMore { operand: None },
            Some('?') => NodeKind::MatchZeroOrOne { operand: None },
            Some('+') => NodeKind::MatchOneOrMore { operand: None },
            Some('|') => return self.parse_or(),
            _ => return self.parse_range(),
        };
        self.advance();
        Ok(self.push(kind, start))
    }

    /// `|` takes exactly one element on its right.
    ///
    /// Example:
    /// - Pattern: `a|bc` → Literal(a) → MatchOr { right: Literal(b) } → Literal(c)
    fn parse_or(&mut self) -> Result<NodeId> {
        let start = self.pos;
        self.advance();
        match self.peek() {
            None | Some(')') => Err(CompileError::parse(self.pos, "alternative after `|`")),
            Some(_) => {
                let right = self.parse_group()?;
                Ok(self.push(NodeKind::MatchOr { left: None, right }, start))
            }
        }
    }

    /// `{min,max}` with either bound optional.
    fn parse_range(&mut self) -> Result<NodeId> {
        let start = self.pos;
        if !self.eat('{') {
            return self.parse_literal();
        }
        let pattern = self.pattern;
        let text_start = self.pos;
        let Some(len) = pattern[text_start..].find('}') else {
            return Err(CompileError::parse(
                pattern.len(),
                format!("`}}` to close the bounds opened at {start}"),
            ));
        };
        let text = &pattern[text_start..text_start + len];
        let (min, max) = parse_bounds(text, text_start)?;
        let range = self.push(NodeKind::Literal(text.to_string()), text_start);
        self.pos = text_start + len + 1;
        Ok(self.push(
            NodeKind::MatchRange {
                operand: None,
                range,
                min,
                max,
            },
            start,
        ))
    }

    fn parse_literal(&mut self) -> Result<NodeId> {
        let start = self.pos;
        match self.advance() {
            Some(ch) => Ok(self.push(NodeKind::Literal(ch.to_string()), start)),
            None => Err(CompileError::parse(start, "pattern element")),
        }
    }
}
