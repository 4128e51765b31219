//! Crawl tasks and their per-execution bookkeeping

use crate::state::TaskState;
use crate::strategy::PageKind;
use crate::RippleError;
use url::Url;

/// A unit of crawl work: one canonical URL at one depth
///
/// Tasks are immutable once created. Seeds start at depth 0; every other task
/// is created through [`CrawlTask::child`], which enforces the depth bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    url: Url,
    depth: u32,
    kind: Option<PageKind>,
}

impl CrawlTask {
    /// Creates a depth-0 task for a (canonical) seed URL
    pub fn seed(url: Url) -> Self {
        Self {
            url,
            depth: 0,
            kind: None,
        }
    }

    /// Creates a child task one hop deeper
    ///
    /// Returns `None` when the child would exceed `max_depth`.
    pub fn child(&self, url: Url, kind: Option<PageKind>, max_depth: u32) -> Option<Self> {
        let depth = self.depth.checked_add(1)?;
        if depth > max_depth {
            return None;
        }

        Some(Self { url, depth, kind })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Page kind assigned by the parent rule, if any
    pub fn kind(&self) -> Option<PageKind> {
        self.kind
    }
}

/// What a task execution produced
#[derive(Debug)]
pub enum TaskOutcome {
    /// The URL was already visited; nothing was fetched
    Duplicate,

    /// Fetching failed; no records, no children
    Failed { reason: String },

    /// The page was fetched and extracted
    Completed {
        records: usize,
        links_dropped: usize,
        children: Vec<CrawlTask>,
    },
}

/// Result of one task execution, returned to the coordinator on join
#[derive(Debug)]
pub struct TaskReport {
    pub url: String,
    pub depth: u32,
    pub outcome: TaskOutcome,
}

impl TaskReport {
    pub fn new(task: &CrawlTask, outcome: TaskOutcome) -> Self {
        Self {
            url: task.url().to_string(),
            depth: task.depth(),
            outcome,
        }
    }

    pub fn children(&self) -> &[CrawlTask] {
        match &self.outcome {
            TaskOutcome::Completed { children, .. } => children,
            _ => &[],
        }
    }

    pub fn into_children(self) -> Vec<CrawlTask> {
        match self.outcome {
            TaskOutcome::Completed { children, .. } => children,
            _ => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, TaskOutcome::Failed { .. })
    }
}

/// Walks one task through its state machine
#[derive(Debug)]
pub struct TaskTracker {
    url: String,
    state: TaskState,
}

impl TaskTracker {
    pub fn new(url: &Url) -> Self {
        Self {
            url: url.to_string(),
            state: TaskState::Pending,
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Moves to `next`
    ///
    /// # Errors
    ///
    /// Returns `RippleError::InvalidTransition` for a transition the state
    /// machine does not allow; the state is left unchanged.
    pub fn advance(&mut self, next: TaskState) -> Result<(), RippleError> {
        if !self.state.can_transition_to(next) {
            return Err(RippleError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::trace!("{}: {} -> {}", self.url, self.state, next);
        self.state = next;
        Ok(())
    }

    /// Marks the task failed from whatever state it reached
    pub fn fail(&mut self) {
        tracing::trace!("{}: {} -> {}", self.url, self.state, TaskState::Failed);
        self.state = TaskState::Failed;
    }
}
