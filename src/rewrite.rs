//! Passes run over the parser's flat chains.
//!
//! [`fold_operators`] gives every postfix operator the node before it as its
//! operand. [`merge_literals`] then joins neighbouring literals.

use crate::ast::{NodeId, NodeKind, Tree};
use crate::error::{CompileError, Result};

/// Re-parent operands onto their operators at every level of the chain
/// starting at `head`, returning the new head.
///
/// The chain is unlinked into a sequence, folded left to right (an operator
/// pops the last folded node and owns it), then linked again. Repeated
/// operators nest: `a**` becomes `*(*(a))`.
pub fn fold_operators(tree: &mut Tree, head: Option<NodeId>) -> Result<Option<NodeId>> {
    let items: Vec<NodeId> = tree.chain(head).collect();
    let mut folded: Vec<NodeId> = Vec::with_capacity(items.len());
    for id in items {
        tree.get_mut(id).next = None;
        fold_children(tree, id)?;
        if tree.kind(id).is_postfix() {
            let Some(operand) = folded.pop() else {
                return Err(CompileError::parse(
                    tree.offset(id),
                    format!("operand before {}", operator_name(tree.kind(id))),
                ));
            };
            attach(tree, id, operand);
        }
        folded.push(id);
    }
    Ok(tree.link(&folded))
}

fn fold_children(tree: &mut Tree, id: NodeId) -> Result<()> {
    match tree.kind(id).clone() {
        NodeKind::Group { body, id: group } => {
            let body = fold_operators(tree, body)?;
            tree.get_mut(id).kind = NodeKind::Group { body, id: group };
        }
        NodeKind::MatchOr { left, right } => {
            // The right side is a single parsed element, so folding it can
            // only fail (a bare operator) or hand the same node back.
            let right = fold_operators(tree, Some(right))?
                .ok_or_else(|| CompileError::parse(tree.offset(id), "alternative after `|`"))?;
            tree.get_mut(id).kind = NodeKind::MatchOr { left, right };
        }
        _ => {}
    }
    Ok(())
}

fn attach(tree: &mut Tree, id: NodeId, operand: NodeId) {
    match &mut tree.get_mut(id).kind {
        NodeKind::MatchZeroOrMore { operand: slot }
        | NodeKind::MatchZeroOrOne { operand: slot }
        | NodeKind::MatchOneOrMore { operand: slot }
        | NodeKind::MatchRange { operand: slot, .. }
        | NodeKind::MatchOr { left: slot, .. } => {
            debug_assert!(slot.is_none(), "operator folded twice");
            *slot = Some(operand);
        }
        other => unreachable!("not a postfix operator: {other:?}"),
    }
}

fn operator_name(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::MatchZeroOrMore { .. } => "`*`",
        NodeKind::MatchZeroOrOne { .. } => "`?`",
        NodeKind::MatchOneOrMore { .. } => "`+`",
        NodeKind::MatchRange { .. } => "`{`",
        NodeKind::MatchOr { .. } => "`|`",
        _ => "operator",
    }
}

/// Join adjacent literals in the chain at `head` and, recursively, in every
/// child chain. The head never changes: the first literal of a run absorbs
/// the others.
pub fn merge_literals(tree: &mut Tree, head: Option<NodeId>) {
    let mut cursor = head;
    while let Some(id) = cursor {
        for child in tree.children(id) {
            merge_literals(tree, Some(child));
        }
        while let Some(next) = tree.next(id) {
            let NodeKind::Literal(tail) = tree.kind(next) else {
                break;
            };
            if !matches!(tree.kind(id), NodeKind::Literal(_)) {
                break;
            }
            let tail = tail.clone();
            let after = tree.next(next);
            let node = tree.get_mut(id);
            if let NodeKind::Literal(text) = &mut node.kind {
                text.push_str(&tail);
            }
            node.next = after;
            tree.get_mut(next).next = None;
        }
        cursor = tree.next(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn rewritten(pattern: &str) -> (Tree, Option<NodeId>) {
        let (mut tree, head) = Parser::new(pattern).parse().expect("parse should succeed");
        let head = fold_operators(&mut tree, head).expect("fold should succeed");
        merge_literals(&mut tree, head);
        (tree, head)
    }

    fn top(tree: &Tree, head: Option<NodeId>) -> Vec<NodeKind> {
        tree.chain(head).map(|id| tree.kind(id).clone()).collect()
    }

    fn literal(tree: &Tree, id: Option<NodeId>) -> &str {
        match id.map(|id| tree.kind(id)) {
            Some(NodeKind::Literal(text)) => text,
            other => panic!("expected literal, got {other:?}"),
        }
    }

    #[test]
    fn star_owns_previous_node() {
        let (tree, head) = rewritten("a*");
        let kinds = top(&tree, head);
        assert_eq!(kinds.len(), 1);
        match &kinds[0] {
            NodeKind::MatchZeroOrMore { operand } => assert_eq!(literal(&tree, *operand), "a"),
            other => panic!("expected MatchZeroOrMore, got {other:?}"),
        }
    }

    #[test]
    fn operator_binds_only_the_last_character() {
        let (tree, head) = rewritten("abc*d");
        let kinds = top(&tree, head);
        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[0], NodeKind::Literal("ab".into()));
        assert!(matches!(kinds[1], NodeKind::MatchZeroOrMore { .. }));
        assert_eq!(kinds[2], NodeKind::Literal("d".into()));
    }

    #[test]
    fn repeated_operators_nest() {
        let (tree, head) = rewritten("a**");
        let outer = head.expect("one node");
        let NodeKind::MatchZeroOrMore { operand: Some(inner) } = tree.kind(outer) else {
            panic!("expected outer star");
        };
        let NodeKind::MatchZeroOrMore { operand } = tree.kind(*inner) else {
            panic!("expected inner star");
        };
        assert_eq!(literal(&tree, *operand), "a");
    }

    #[test]
    fn or_takes_left_neighbour() {
        let (tree, head) = rewritten("xa|b");
        let kinds = top(&tree, head);
        assert_eq!(kinds.len(), 2);
        match &kinds[1] {
            NodeKind::MatchOr { left, right } => {
                assert_eq!(literal(&tree, *left), "a");
                assert_eq!(literal(&tree, Some(*right)), "b");
            }
            other => panic!("expected MatchOr, got {other:?}"),
        }
    }

    #[test]
    fn chained_or_is_left_nested() {
        let (tree, head) = rewritten("a|b|c");
        let outer = head.expect("one node");
        let NodeKind::MatchOr { left: Some(inner), right } = tree.kind(outer) else {
            panic!("expected MatchOr");
        };
        assert_eq!(literal(&tree, Some(*right)), "c");
        assert!(matches!(tree.kind(*inner), NodeKind::MatchOr { .. }));
    }

    #[test]
    fn folding_and_merging_reach_into_groups() {
        let (tree, head) = rewritten("(ab[cd]+ef)");
        let NodeKind::Group { body, .. } = tree.kind(head.expect("group")) else {
            panic!("expected group");
        };
        let kinds = top(&tree, *body);
        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[0], NodeKind::Literal("ab".into()));
        assert!(matches!(kinds[1], NodeKind::MatchOneOrMore { operand: Some(_) }));
        assert_eq!(kinds[2], NodeKind::Literal("ef".into()));
    }

    #[test]
    fn merging_leaves_fewer_reachable_nodes() {
        let (tree, head) = rewritten("abc");
        assert_eq!(tree.reachable(head), 1);
        assert_eq!(literal(&tree, head), "abc");
    }

    #[test]
    fn escaped_literals_merge() {
        let (tree, head) = rewritten(r"a\.b");
        assert_eq!(literal(&tree, head), "a.b");
    }

    #[test]
    fn operator_without_operand() {
        let (mut tree, head) = Parser::new("*a").parse().expect("parse should succeed");
        let err = fold_operators(&mut tree, head).expect_err("fold should fail");
        assert!(matches!(err, CompileError::Parse { position: 0, .. }));
    }

    #[test]
    fn operator_as_alternative() {
        let (mut tree, head) = Parser::new("a|*").parse().expect("parse should succeed");
        assert!(fold_operators(&mut tree, head).is_err());
    }

    #[test]
    fn operator_at_start_of_group() {
        let (mut tree, head) = Parser::new("(+a)").parse().expect("parse should succeed");
        let err = fold_operators(&mut tree, head).expect_err("fold should fail");
        assert!(matches!(err, CompileError::Parse { position: 1, .. }));
    }
}
