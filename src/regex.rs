use std::fmt;
use std::ops::Range;

use crate::ast::{NodeId, Tree};
use crate::config::MatchConfig;
use crate::debug;
use crate::error::Result;
use crate::matcher::Matcher;
use crate::parser::Parser;
use crate::rewrite::{fold_operators, merge_literals};

/// A pattern compiled into its node tree. Read-only once built, so it can
/// be shared across threads and matched any number of times.
#[derive(Debug, Clone)]
pub struct CompiledRegex {
    source: String,
    tree: Tree,
    root: Option<NodeId>,
}

/// Compile `pattern`.
///
/// Example:
/// - Pattern: `a(b|c)*d` → Literal(a) → MatchZeroOrMore { Group { MatchOr } } → Literal(d)
#[tracing::instrument(level = "trace", skip(pattern), fields(pattern_len = pattern.len() as u64))]
pub fn compile(pattern: &str) -> Result<CompiledRegex> {
    let (mut tree, head) = Parser::new(pattern).parse()?;
    let root = fold_operators(&mut tree, head)?;
    merge_literals(&mut tree, root);
    tracing::event!(
        tracing::Level::TRACE,
        operation = "compile",
        pattern = %pattern,
        nodes = tree.reachable(root) as u64
    );
    Ok(CompiledRegex {
        source: pattern.to_string(),
        tree,
        root,
    })
}

impl CompiledRegex {
    /// The pattern text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Whether the pattern matches anywhere in `subject`. An empty pattern
    /// never matches.
    pub fn is_match(&self, subject: &str) -> bool {
        self.is_match_with(subject, &MatchConfig::default())
    }

    pub fn is_match_with(&self, subject: &str, config: &MatchConfig) -> bool {
        self.find_with(subject, config).is_some()
    }

    /// Leftmost match as a range of character offsets.
    pub fn find(&self, subject: &str) -> Option<Range<usize>> {
        self.find_with(subject, &MatchConfig::default())
    }

    pub fn find_with(&self, subject: &str, config: &MatchConfig) -> Option<Range<usize>> {
        let chars: Vec<char> = subject.chars().collect();
        Matcher::new(&self.tree, &chars, *config)
            .search(self.root)
            .map(|(start, end)| start..end)
    }

    /// Indented rendering of the node tree, one line per node.
    pub fn debug_tree(&self) -> String {
        debug::render(&self.source, &self.tree, self.root)
    }
}

impl fmt::Display for CompiledRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
