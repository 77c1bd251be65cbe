//! Round-robin — one node per job per round.
//!
//! Cycles over the entries in their given order, offering a single node of
//! each job before any job gets a second attempt. Priority is ignored.

use tracing::debug;

use crate::policy::{LaunchTask, SchedulerPolicy, attempt_next};
use crate::types::{JobWithNodes, TaskOutcome};

#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobinPolicy;

impl RoundRobinPolicy {
    pub const NAME: &'static str = "round_robin";
}

impl SchedulerPolicy for RoundRobinPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schedule(&self, work: &mut Vec<JobWithNodes>, launch: &mut dyn LaunchTask) -> usize {
        let mut scheduled = 0;
        let mut rounds = 0usize;
        while !work.is_empty() {
            let mut idx = 0;
            while idx < work.len() {
                let Some(outcome) = attempt_next(&mut work[idx], launch) else {
                    work.remove(idx);
                    continue;
                };
                match outcome {
                    TaskOutcome::Assigned => scheduled += 1,
                    TaskOutcome::NotAssigned => {}
                    TaskOutcome::Halt => {
                        debug!(policy = Self::NAME, scheduled, rounds, "scheduling pass halted");
                        return scheduled;
                    }
                }
                idx += 1;
            }
            rounds += 1;
        }
        debug!(policy = Self::NAME, scheduled, rounds, "scheduling pass done");
        scheduled
    }
}
