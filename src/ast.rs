/// Index of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One node of a compiled pattern.
///
/// `next` is the continuation: the sibling that must match right after
/// this node. Operands of operators never carry a `next` of their own.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub next: Option<NodeId>,
    /// Byte offset in the pattern where the node was written.
    pub offset: usize,
}

/// Back-references are rejected while parsing and never reach the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    StartOfLine,
    EndOfLine,
    AnyChar,
    /// `body` is a single literal holding the class text, e.g. `a-z_`.
    BracketExpr {
        body: NodeId,
    },
    BracketExprExcl {
        body: NodeId,
    },
    Group {
        body: Option<NodeId>,
        id: usize,
    },
    MatchZeroOrMore {
        operand: Option<NodeId>,
    },
    MatchZeroOrOne {
        operand: Option<NodeId>,
    },
    MatchOneOrMore {
        operand: Option<NodeId>,
    },
    /// `range` is the literal written between the braces; `min`/`max` are
    /// the bounds read from it.
    MatchRange {
        operand: Option<NodeId>,
        range: NodeId,
        min: usize,
        max: usize,
    },
    MatchOr {
        left: Option<NodeId>,
        right: NodeId,
    },
    Literal(String),
}

impl NodeKind {
    /// True for the operators that take the preceding node as operand.
    pub fn is_postfix(&self) -> bool {
        matches!(
            self,
            NodeKind::MatchZeroOrMore { .. }
                | NodeKind::MatchZeroOrOne { .. }
                | NodeKind::MatchOneOrMore { .. }
                | NodeKind::MatchRange { .. }
                | NodeKind::MatchOr { .. }
        )
    }
}

/// Arena owning every node of one pattern.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NodeKind, offset: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            next: None,
            offset,
        });
        id
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next
    }

    pub fn offset(&self, id: NodeId) -> usize {
        self.nodes[id.0].offset
    }

    /// Iterate a sibling chain starting at `head`.
    pub fn chain(&self, head: Option<NodeId>) -> Chain<'_> {
        Chain { tree: self, cursor: head }
    }

    /// Link `ids` into a chain and return its head.
    pub(crate) fn link(&mut self, ids: &[NodeId]) -> Option<NodeId> {
        for pair in ids.windows(2) {
            self.get_mut(pair[0]).next = Some(pair[1]);
        }
        if let Some(&last) = ids.last() {
            self.get_mut(last).next = None;
        }
        ids.first().copied()
    }

    /// Count the nodes reachable from `head`, children included.
    pub fn reachable(&self, head: Option<NodeId>) -> usize {
        self.chain(head)
            .map(|id| {
                let below: usize = self
                    .children(id)
                    .into_iter()
                    .map(|child| self.reachable(Some(child)))
                    .sum();
                1 + below
            })
            .sum()
    }

    /// Structural children of a node, in rendering order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.kind(id) {
            NodeKind::StartOfLine | NodeKind::EndOfLine | NodeKind::AnyChar | NodeKind::Literal(_) => {
                vec![]
            }
            NodeKind::BracketExpr { body } | NodeKind::BracketExprExcl { body } => vec![*body],
            NodeKind::Group { body, .. } => body.iter().copied().collect(),
            NodeKind::MatchZeroOrMore { operand }
            | NodeKind::MatchZeroOrOne { operand }
            | NodeKind::MatchOneOrMore { operand } => operand.iter().copied().collect(),
            NodeKind::MatchRange { operand, range, .. } => {
                operand.iter().copied().chain(std::iter::once(*range)).collect()
            }
            NodeKind::MatchOr { left, right } => {
                left.iter().copied().chain(std::iter::once(*right)).collect()
            }
        }
    }
}

pub struct Chain<'a> {
    tree: &'a Tree,
    cursor: Option<NodeId>,
}

impl Iterator for Chain<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cursor?;
        self.cursor = self.tree.next(id);
        Some(id)
    }
}
