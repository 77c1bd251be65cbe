//! Randomized priority — weighted lottery over jobs.
//!
//! Each attempt picks a job with probability proportional to its priority and
//! offers it the node at the back of its collection. Jobs whose priority is
//! not a positive finite number get no tickets; if no remaining job has any
//! tickets, the pick is uniform.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use tracing::debug;

use crate::policy::{LaunchTask, SchedulerPolicy, attempt_next};
use crate::types::{JobWithNodes, TaskOutcome};

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomizedPriorityPolicy;

impl RandomizedPriorityPolicy {
    pub const NAME: &'static str = "randomized_priority";

    /// Same as [`SchedulerPolicy::schedule`] but drawing from `rng`.
    pub fn schedule_with_rng<R: Rng + ?Sized>(
        &self,
        work: &mut Vec<JobWithNodes>,
        launch: &mut dyn LaunchTask,
        rng: &mut R,
    ) -> usize {
        work.retain(|entry| !entry.is_exhausted());

        let mut scheduled = 0;
        while !work.is_empty() {
            let idx = pick(work, rng);
            let outcome = attempt_next(&mut work[idx], launch);
            if work[idx].is_exhausted() {
                work.swap_remove(idx);
            }
            match outcome {
                Some(TaskOutcome::Assigned) => scheduled += 1,
                Some(TaskOutcome::NotAssigned) | None => {}
                Some(TaskOutcome::Halt) => {
                    debug!(policy = Self::NAME, scheduled, "scheduling pass halted");
                    return scheduled;
                }
            }
        }
        debug!(policy = Self::NAME, scheduled, "scheduling pass done");
        scheduled
    }
}

impl SchedulerPolicy for RandomizedPriorityPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schedule(&self, work: &mut Vec<JobWithNodes>, launch: &mut dyn LaunchTask) -> usize {
        self.schedule_with_rng(work, launch, &mut rand::thread_rng())
    }
}

fn tickets(priority: f64) -> f64 {
    if priority.is_finite() && priority > 0.0 { priority } else { 0.0 }
}

/// Index of the next entry to try. `work` must not be empty.
fn pick<R: Rng + ?Sized>(work: &[JobWithNodes], rng: &mut R) -> usize {
    // Normalised so the total weight stays finite.
    let max = work
        .iter()
        .map(|entry| tickets(entry.job.priority))
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        let weights = work.iter().map(|entry| tickets(entry.job.priority) / max);
        if let Ok(dist) = WeightedIndex::new(weights) {
            return dist.sample(rng);
        }
    }
    rng.gen_range(0..work.len())
}
