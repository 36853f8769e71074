//! Fixed-interval periodic tasks.
//!
//! The scheduler is evaluated once per control-loop iteration with the current
//! monotonic time. A task is due when at least its interval has passed since it last
//! fired. Due tasks fire once (no catch-up after long stalls) and their fire time
//! resets to `now`, so drift is additive and never compensated.
//!
//! | Task | Interval | Action |
//! |------|----------|--------|
//! | [`TaskId::Sampling`] | [`SAMPLING_INTERVAL_MS`] | read both temperature sensors |
//! | [`TaskId::RelayCycle`] | [`RELAY_CYCLE_INTERVAL_MS`] | alternate the relay outputs |

use heapless::Vec;

use crate::config::{RELAY_CYCLE_INTERVAL_MS, SAMPLING_INTERVAL_MS};

/// Periodic task identity. Declaration order is firing order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum TaskId {
    Sampling,
    RelayCycle,
}

/// Number of periodic tasks.
pub const TASK_COUNT: usize = 2;

/// One fixed-interval task.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PeriodicTask {
    pub id: TaskId,
    pub interval_ms: u64,
    last_fire_ms: u64,
}

impl PeriodicTask {
    /// Create a task whose interval is measured from `start_ms`.
    pub const fn new(
        id: TaskId,
        interval_ms: u64,
        start_ms: u64,
    ) -> Self {
        Self {
            id,
            interval_ms,
            last_fire_ms: start_ms,
        }
    }

    /// Time of the last fire (or the start time if it never fired).
    #[inline]
    pub const fn last_fire_ms(&self) -> u64 { self.last_fire_ms }

    /// Check if the task is due at `now_ms`. A clock that went backwards is never due.
    #[inline]
    pub const fn is_due(
        &self,
        now_ms: u64,
    ) -> bool {
        now_ms.saturating_sub(self.last_fire_ms) >= self.interval_ms
    }

    /// Fire if due, resetting the last fire time to `now_ms`.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> bool {
        if self.is_due(now_ms) {
            self.last_fire_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// The panel's periodic tasks, in firing order.
pub struct Scheduler {
    tasks: [PeriodicTask; TASK_COUNT],
}

impl Scheduler {
    /// Create the scheduler with intervals counted from `start_ms`.
    pub const fn new(start_ms: u64) -> Self {
        Self {
            tasks: [
                PeriodicTask::new(TaskId::Sampling, SAMPLING_INTERVAL_MS, start_ms),
                PeriodicTask::new(TaskId::RelayCycle, RELAY_CYCLE_INTERVAL_MS, start_ms),
            ],
        }
    }

    /// Tasks that fire at `now_ms`, in declaration order.
    pub fn due(
        &mut self,
        now_ms: u64,
    ) -> Vec<TaskId, TASK_COUNT> {
        let mut fired = Vec::new();
        for task in &mut self.tasks {
            if task.poll(now_ms) {
                // Capacity equals the task count
                let _ = fired.push(task.id);
            }
        }
        fired
    }

    /// Look up a task by identity.
    pub fn task(
        &self,
        id: TaskId,
    ) -> Option<&PeriodicTask> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

impl Default for Scheduler {
    fn default() -> Self { Self::new(0) }
}
