/// How `|` and groups treat the part of the pattern that follows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alternation {
    /// An alternation commits to the first branch that matches on its own,
    /// and a group settles its body before looking at what follows.
    #[default]
    Committed,
    /// Both see the rest of the pattern, so a failure further on retries
    /// the other branch or another way through the group body.
    Backtracking,
}

/// Knobs for a single match call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchConfig {
    pub alternation: Alternation,
    /// Give up (no match) after this many evaluation steps.
    pub step_limit: Option<usize>,
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alternation(mut self, alternation: Alternation) -> Self {
        self.alternation = alternation;
        self
    }

    pub fn step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }
}
