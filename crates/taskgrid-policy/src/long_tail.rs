//! Long tail — jobs with the fewest remaining nodes go first.
//!
//! Useful to finish off jobs that are nearly done instead of letting a few
//! stragglers linger behind large jobs.

use crate::policy::{LaunchTask, SchedulerPolicy};
use crate::ranked_priority::drain_in_order;
use crate::types::JobWithNodes;

#[derive(Debug, Clone, Copy, Default)]
pub struct LongTailPolicy;

impl LongTailPolicy {
    pub const NAME: &'static str = "long_tail";
}

impl SchedulerPolicy for LongTailPolicy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn schedule(&self, work: &mut Vec<JobWithNodes>, launch: &mut dyn LaunchTask) -> usize {
        work.sort_unstable_by_key(|entry| entry.nodes.len());
        drain_in_order(Self::NAME, work, launch)
    }
}
