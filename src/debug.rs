use std::fmt::Write;

use crate::ast::{NodeId, NodeKind, Tree};

const INDENT: usize = 4;

/// Render the chain at `head` one node per line, children indented below
/// their parent.
pub fn render(source: &str, tree: &Tree, head: Option<NodeId>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Expr: `{source}`");
    render_chain(&mut out, tree, head, 0);
    out
}

fn render_chain(out: &mut String, tree: &Tree, head: Option<NodeId>, depth: usize) {
    for id in tree.chain(head) {
        let _ = writeln!(out, "{:width$}- {}", "", label(tree.kind(id)), width = depth * INDENT);
        for child in tree.children(id) {
            render_chain(out, tree, Some(child), depth + 1);
        }
    }
}

fn label(kind: &NodeKind) -> String {
    match kind {
        NodeKind::StartOfLine => "Start of line `^`".to_string(),
        NodeKind::EndOfLine => "End of line `$`".to_string(),
        NodeKind::AnyChar => "Any Char `.`".to_string(),
        NodeKind::BracketExpr { .. } => "Bracket expression `[` ... `]`".to_string(),
        NodeKind::BracketExprExcl { .. } => "Bracket expression exclude `[^` ... `]`".to_string(),
        NodeKind::Group { id, .. } => format!("Group {id} `(` ... `)`"),
        NodeKind::MatchZeroOrMore { .. } => "Match Zero or More `*`".to_string(),
        NodeKind::MatchZeroOrOne { .. } => "Match Zero or One `?`".to_string(),
        NodeKind::MatchOneOrMore { .. } => "Match One or More `+`".to_string(),
        NodeKind::MatchRange { min, max, .. } => format!("Match Range `{{{min},{max}}}`"),
        NodeKind::MatchOr { .. } => "Match Or `|`".to_string(),
        NodeKind::Literal(text) => format!("Literal `{text}`"),
    }
}
