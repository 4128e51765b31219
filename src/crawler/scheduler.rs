//! Scheduler for managing the crawl frontier and fetch concurrency
//!
//! This module handles:
//! - FIFO queue of crawl tasks waiting to run
//! - Global concurrency limiting via a semaphore
//! - A last-line depth guard on everything entering the frontier

use super::task::CrawlTask;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A task cleared to run, holding one concurrency slot
///
/// The slot is released when the value (or the `_permit` moved out of it)
/// is dropped.
pub struct ScheduledTask {
    /// The task to execute
    pub task: CrawlTask,

    /// The semaphore permit for this execution
    pub _permit: OwnedSemaphorePermit,
}

/// Scheduler manages the frontier queue and the concurrency bound
pub struct Scheduler {
    /// Global semaphore for limiting concurrent task executions
    semaphore: Arc<Semaphore>,

    /// Tasks waiting for a slot, breadth-first
    frontier: VecDeque<CrawlTask>,

    /// Deepest depth a queued task may have
    max_depth: u32,

    /// Total tasks accepted into the frontier
    scheduled: u64,
}

impl Scheduler {
    /// Creates a scheduler allowing `max_concurrent` executions at once
    ///
    /// A bound of 0 is treated as 1.
    pub fn new(max_concurrent: u32, max_depth: u32) -> Self {
        let permits = max_concurrent.max(1) as usize;

        Self {
            semaphore: Arc::new(Semaphore::new(permits)),
            frontier: VecDeque::new(),
            max_depth,
            scheduled: 0,
        }
    }

    /// Queues a task
    ///
    /// Returns false (and drops the task) when it is deeper than the bound.
    pub fn schedule(&mut self, task: CrawlTask) -> bool {
        if task.depth() > self.max_depth {
            tracing::debug!(
                "Not scheduling {} at depth {} (max {})",
                task.url(),
                task.depth(),
                self.max_depth
            );
            return false;
        }

        self.frontier.push_back(task);
        self.scheduled += 1;
        true
    }

    /// Takes the next task if one is queued and a slot is free
    ///
    /// Never waits: `None` means either the frontier is empty or every slot
    /// is busy (check [`Scheduler::is_empty`] to tell them apart).
    pub fn try_next(&mut self) -> Option<ScheduledTask> {
        if self.frontier.is_empty() {
            return None;
        }

        let permit = Arc::clone(&self.semaphore).try_acquire_owned().ok()?;
        let task = self.frontier.pop_front()?;

        tracing::trace!("Dispatching {} (depth {})", task.url(), task.depth());
        Some(ScheduledTask {
            task,
            _permit: permit,
        })
    }

    /// Returns the number of tasks in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Slots not currently held by a running task
    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Total tasks accepted since creation
    pub fn scheduled_count(&self) -> u64 {
        self.scheduled
    }
}
