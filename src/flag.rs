//! The per-node `{on_queue, is_goal}` state, exposed as a small sum type.

/// A node's discrete state: whether it currently sits on the priority
/// queue, and whether it is a goal. The two dimensions are orthogonal,
/// so this is kept as two booleans internally and exposed as the four
/// named combinations the rest of the crate pattern-matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flag {
    on_queue: bool,
    is_goal: bool,
}

/// The four combinations of [`Flag`], matching the original `NONE | OPEN
/// | GOAL | OPEN-GOAL` sum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Locally consistent, not a goal.
    None,
    /// On the queue, not a goal.
    Open,
    /// A goal, not on the queue.
    Goal,
    /// A goal that is also on the queue.
    OpenGoal,
}

impl Flag {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            on_queue: false,
            is_goal: false,
        }
    }

    #[must_use]
    pub const fn on_queue(self) -> bool {
        self.on_queue
    }

    #[must_use]
    pub const fn is_goal(self) -> bool {
        self.is_goal
    }

    #[must_use]
    pub fn with_on_queue(self, on_queue: bool) -> Self {
        Self { on_queue, ..self }
    }

    #[must_use]
    pub fn with_is_goal(self, is_goal: bool) -> Self {
        Self { is_goal, ..self }
    }

    #[must_use]
    pub const fn kind(self) -> FlagKind {
        match (self.on_queue, self.is_goal) {
            (false, false) => FlagKind::None,
            (true, false) => FlagKind::Open,
            (false, true) => FlagKind::Goal,
            (true, true) => FlagKind::OpenGoal,
        }
    }
}
