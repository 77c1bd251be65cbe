//! Ranked priority — strict descending-priority, greedy per-job draining.
//!
//! Jobs are sorted by priority (highest first, ties in no particular order).
//! Each job then gets every one of its nodes offered, back to front, before
//! the next job is visited. Priority is the only signal: lower-priority jobs
//! can starve while higher-priority jobs keep consuming nodes.

use tracing::debug;

use crate::policy::{LaunchTask, SchedulerPolicy, attempt_next};
use crate::types::{JobWithNodes, TaskOutcome};

#[derive(Debug, Clone, Copy, Default)]
pub struct RankedPriorityPolicy;

impl RankedPriorityPolicy {
    pub const NAME: &'static str = "ranked_priority";
}

impl SchedulerPolicy for RankedPriorityPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schedule(&self, work: &mut Vec<JobWithNodes>, launch: &mut dyn LaunchTask) -> usize {
        work.sort_unstable_by(|a, b| b.job.priority.total_cmp(&a.job.priority));
        drain_in_order(Self::NAME, work, launch)
    }
}

/// Visit entries in their current order, draining each one completely.
///
/// Entries that are already empty when reached are removed. Drained entries
/// stay in place (empty) and are dropped on the next pass.
pub(crate) fn drain_in_order(
    policy: &'static str,
    work: &mut Vec<JobWithNodes>,
    launch: &mut dyn LaunchTask,
) -> usize {
    let mut scheduled = 0;
    let mut idx = 0;
    while idx < work.len() {
        if work[idx].is_exhausted() {
            work.remove(idx);
            continue;
        }
        let entry = &mut work[idx];
        while let Some(outcome) = attempt_next(entry, launch) {
            match outcome {
                TaskOutcome::Assigned => scheduled += 1,
                TaskOutcome::NotAssigned => {}
                TaskOutcome::Halt => {
                    debug!(policy, scheduled, job = %entry.job.id, "scheduling pass halted");
                    return scheduled;
                }
            }
        }
        idx += 1;
    }
    debug!(policy, scheduled, "scheduling pass done");
    scheduled
}
