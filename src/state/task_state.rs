/// Task state definitions for tracking crawl progress
///
/// This module defines every state a crawl task passes through, and which
/// transitions between them are legal.
use std::fmt;

/// Represents the current state of a crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    // ===== Active States =====
    /// Task is queued; the visited registry has not been consulted yet
    Pending,

    /// Document is being fetched
    Fetching,

    /// Records and links are being extracted from the fetched document
    Extracting,

    /// Child tasks have been handed to the scheduler
    Dispatched,

    // ===== Terminal States =====
    /// Task completed (including duplicate suppression)
    Done,

    /// Fetch or extraction failed; the task contributed nothing
    Failed,
}

impl TaskState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if this is an active state
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if a task may move from this state to `next`
    ///
    /// ```text
    /// Pending -> Fetching -> Extracting -> Dispatched -> Done
    ///    |          |            |
    ///    +-> Done   +-> Failed   +-> Failed
    /// ```
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Pending, Self::Done)
                | (Self::Fetching, Self::Extracting)
                | (Self::Fetching, Self::Failed)
                | (Self::Extracting, Self::Dispatched)
                | (Self::Extracting, Self::Failed)
                | (Self::Dispatched, Self::Done)
        )
    }

    /// Converts the state to its log representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Dispatched => "dispatched",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible task states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::Fetching,
            Self::Extracting,
            Self::Dispatched,
            Self::Done,
            Self::Failed,
        ]
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!TaskState::Pending.is_terminal());
        assert!(!TaskState::Fetching.is_terminal());
        assert!(!TaskState::Extracting.is_terminal());
        assert!(!TaskState::Dispatched.is_terminal());

        assert!(TaskState::Done.is_terminal());
        assert!(TaskState::Failed.is_terminal());
    }

    #[test]
    fn test_happy_path() {
        let path = [
            TaskState::Pending,
            TaskState::Fetching,
            TaskState::Extracting,
            TaskState::Dispatched,
            TaskState::Done,
        ];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {} should be legal",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_duplicate_shortcut() {
        assert!(TaskState::Pending.can_transition_to(TaskState::Done));
    }

    #[test]
    fn test_failure_edges() {
        assert!(TaskState::Fetching.can_transition_to(TaskState::Failed));
        assert!(TaskState::Extracting.can_transition_to(TaskState::Failed));

        assert!(!TaskState::Pending.can_transition_to(TaskState::Failed));
        assert!(!TaskState::Dispatched.can_transition_to(TaskState::Failed));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for next in TaskState::all_states() {
            assert!(!TaskState::Done.can_transition_to(next));
            assert!(!TaskState::Failed.can_transition_to(next));
        }
    }

    #[test]
    fn test_no_skipping_fetch() {
        assert!(!TaskState::Pending.can_transition_to(TaskState::Extracting));
        assert!(!TaskState::Fetching.can_transition_to(TaskState::Done));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", TaskState::Pending), "pending");
        assert_eq!(format!("{}", TaskState::Dispatched), "dispatched");
        assert_eq!(TaskState::Failed.to_string(), "failed");
    }

    #[test]
    fn test_all_states_complete() {
        let all = TaskState::all_states();
        assert_eq!(all.len(), 6);

        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(all[i], all[j], "Duplicate state found");
            }
        }
    }
}
