//! Backtracking evaluator over a compiled [`Tree`].
//!
//! A node matches only if everything after it matches too. "Everything
//! after it" is its `next` chain followed by the pending continuations of
//! enclosing constructs, kept as a stack of [`Cont`] frames on the Rust call
//! stack. All positions are character indices into the subject.

use crate::ast::{NodeId, NodeKind, Tree};
use crate::class::{class_contains, REPEAT_CAP};
use crate::config::{Alternation, MatchConfig};

/// What still has to match once the current chain runs out.
#[derive(Clone, Copy)]
enum Cont<'a> {
    Done,
    Then(Option<NodeId>, &'a Cont<'a>),
    /// One iteration of the repetition `node` finished. `count` iterations
    /// are done and the last one started at `from`.
    Again {
        node: NodeId,
        count: usize,
        from: usize,
        outer: &'a Cont<'a>,
    },
}

pub(crate) struct Matcher<'a> {
    tree: &'a Tree,
    subject: &'a [char],
    config: MatchConfig,
    steps: usize,
    exhausted: bool,
}

impl<'a> Matcher<'a> {
    pub(crate) fn new(tree: &'a Tree, subject: &'a [char], config: MatchConfig) -> Self {
        Self {
            tree,
            subject,
            config,
            steps: 0,
            exhausted: false,
        }
    }

    /// Leftmost match of the chain at `head`, as `(start, end)`.
    ///
    /// A pattern starting with `^` is only tried at offset 0.
    pub(crate) fn search(&mut self, head: Option<NodeId>) -> Option<(usize, usize)> {
        let head_id = head?;
        let last_start = if matches!(self.tree.kind(head_id), NodeKind::StartOfLine) {
            0
        } else {
            self.subject.len()
        };
        for start in 0..=last_start {
            if let Some(end) = self.eval(head, start, &Cont::Done) {
                return Some((start, end));
            }
            if self.exhausted {
                tracing::event!(
                    tracing::Level::DEBUG,
                    operation = "search",
                    steps = self.steps as u64,
                    start = start as u64,
                    "step limit reached"
                );
                return None;
            }
        }
        None
    }

    /// Match the chain at `node` from `pos`, then `k`. Returns the position
    /// where the whole continuation finished.
    fn eval(&mut self, node: Option<NodeId>, pos: usize, k: &Cont<'_>) -> Option<usize> {
        self.steps += 1;
        if self.config.step_limit.is_some_and(|limit| self.steps > limit) {
            self.exhausted = true;
        }
        if self.exhausted {
            return None;
        }

        let Some(id) = node else {
            return match k {
                Cont::Done => Some(pos),
                Cont::Then(rest, outer) => self.eval(*rest, pos, outer),
                // An empty iteration would repeat forever at the same spot,
                // and any count still owed ends here too.
                Cont::Again {
                    node, from, outer, ..
                } if pos == *from => self.eval(self.tree.next(*node), pos, outer),
                Cont::Again {
                    node, count, outer, ..
                } => self.repeat_each(*node, *count, pos, outer),
            };
        };
        let next = self.tree.next(id);
        let tree = self.tree;

        match tree.kind(id) {
            NodeKind::StartOfLine => {
                if pos == 0 {
                    self.eval(next, pos, k)
                } else {
                    None
                }
            }
            NodeKind::EndOfLine => {
                if pos == self.subject.len() {
                    self.eval(next, pos, k)
                } else {
                    None
                }
            }
            NodeKind::AnyChar => {
                if pos < self.subject.len() {
                    self.eval(next, pos + 1, k)
                } else {
                    None
                }
            }
            NodeKind::Literal(text) => {
                let end = self.literal_end(text, pos)?;
                self.eval(next, end, k)
            }
            NodeKind::BracketExpr { body } => {
                let &ch = self.subject.get(pos)?;
                if class_contains(self.class_text(*body), ch) {
                    self.eval(next, pos + 1, k)
                } else {
                    None
                }
            }
            NodeKind::BracketExprExcl { body } => {
                let &ch = self.subject.get(pos)?;
                if class_contains(self.class_text(*body), ch) {
                    None
                } else {
                    self.eval(next, pos + 1, k)
                }
            }
            NodeKind::Group { body, .. } => match self.config.alternation {
                Alternation::Committed => {
                    let end = self.eval(*body, pos, &Cont::Done)?;
                    self.eval(next, end, k)
                }
                Alternation::Backtracking => self.eval(*body, pos, &Cont::Then(next, k)),
            },
            NodeKind::MatchOr { left, right } => match self.config.alternation {
                Alternation::Committed => {
                    let end = match self.eval(*left, pos, &Cont::Done) {
                        Some(end) => end,
                        None => self.eval(Some(*right), pos, &Cont::Done)?,
                    };
                    self.eval(next, end, k)
                }
                Alternation::Backtracking => {
                    let then = Cont::Then(next, k);
                    match self.eval(*left, pos, &then) {
                        Some(end) => Some(end),
                        None => self.eval(Some(*right), pos, &then),
                    }
                }
            },
            NodeKind::MatchZeroOrMore { .. }
            | NodeKind::MatchZeroOrOne { .. }
            | NodeKind::MatchOneOrMore { .. }
            | NodeKind::MatchRange { .. } => match self.config.alternation {
                Alternation::Committed => {
                    let (operand, min, max) = self.bounds(id);
                    self.repeat(operand, next, pos, min, max, k)
                }
                Alternation::Backtracking => self.repeat_each(id, 0, pos, k),
            },
        }
    }

    fn bounds(&self, id: NodeId) -> (Option<NodeId>, usize, usize) {
        match self.tree.kind(id) {
            NodeKind::MatchZeroOrMore { operand } => (*operand, 0, REPEAT_CAP),
            NodeKind::MatchZeroOrOne { operand } => (*operand, 0, 1),
            NodeKind::MatchOneOrMore { operand } => (*operand, 1, REPEAT_CAP),
            NodeKind::MatchRange {
                operand, min, max, ..
            } => (*operand, *min, *max),
            other => unreachable!("not a repetition: {other:?}"),
        }
    }

    /// Repetition where every iteration sees the rest of the pattern.
    ///
    /// With `count` iterations done at `pos`, first try one more (its body
    /// continues into another call here), then stop and run what follows
    /// `node`. Greedy order is kept: more iterations are always tried first.
    fn repeat_each(
        &mut self,
        node: NodeId,
        count: usize,
        pos: usize,
        k: &Cont<'_>,
    ) -> Option<usize> {
        let (operand, min, max) = self.bounds(node);
        if count < max {
            let again = Cont::Again {
                node,
                count: count + 1,
                from: pos,
                outer: k,
            };
            if let Some(end) = self.eval(operand, pos, &again) {
                return Some(end);
            }
            if self.exhausted {
                return None;
            }
        }
        if count < min {
            return None;
        }
        self.eval(self.tree.next(node), pos, k)
    }

    /// Greedy repetition with linear backoff, used in committed mode.
    ///
    /// Runs `inner` as many times as it will go (at most `max`), tries the
    /// rest of the pattern there, and on failure allows one repetition fewer
    /// and runs again, until fewer than `min` would remain.
    fn repeat(
        &mut self,
        inner: Option<NodeId>,
        next: Option<NodeId>,
        pos: usize,
        min: usize,
        max: usize,
        k: &Cont<'_>,
    ) -> Option<usize> {
        let mut limit = max;
        loop {
            let run = self.run(inner, pos, limit);
            if run.reps < min {
                return None;
            }
            if let Some(end) = self.eval(next, run.end, k) {
                return Some(end);
            }
            if run.fewest <= min || self.exhausted {
                return None;
            }
            limit = run.fewest - 1;
        }
    }

    fn run(&mut self, inner: Option<NodeId>, pos: usize, limit: usize) -> Run {
        let mut end = pos;
        let mut reps = 0;
        while reps < limit {
            match self.eval(inner, end, &Cont::Done) {
                // An empty repetition leaves the position alone, so every
                // count from here up to `limit` ends at the same place.
                Some(after) if after == end => {
                    return Run {
                        reps: limit,
                        fewest: reps,
                        end,
                    };
                }
                Some(after) => {
                    end = after;
                    reps += 1;
                }
                None => break,
            }
        }
        Run {
            reps,
            fewest: reps,
            end,
        }
    }

    fn literal_end(&self, text: &str, pos: usize) -> Option<usize> {
        let mut end = pos;
        for ch in text.chars() {
            if self.subject.get(end) != Some(&ch) {
                return None;
            }
            end += 1;
        }
        Some(end)
    }

    fn class_text(&self, body: NodeId) -> &'a str {
        match self.tree.kind(body) {
            NodeKind::Literal(text) => text,
            other => unreachable!("bracket body is not a literal: {other:?}"),
        }
    }
}

/// Outcome of one greedy pass of a repetition.
struct Run {
    /// Repetitions counted, up to the limit.
    reps: usize,
    /// Smallest count that reaches `end`.
    fewest: usize,
    end: usize,
}
