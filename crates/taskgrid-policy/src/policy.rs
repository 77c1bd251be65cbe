//! The scheduler policy interface and the registry of built-in policies.
//!
//! A policy receives the pending work for one scheduling tick and a launch
//! callback. It decides the order in which (node, job) pairs are offered to
//! the callback and returns how many tasks were started. The pending work is
//! borrowed exclusively for the call: a policy may reorder entries, remove
//! them, and drain their nodes. Whatever is left afterwards is unassigned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::PolicyError;
use crate::long_tail::LongTailPolicy;
use crate::randomized_priority::RandomizedPriorityPolicy;
use crate::ranked_priority::RankedPriorityPolicy;
use crate::round_robin::RoundRobinPolicy;
use crate::types::{Job, JobWithNodes, Node, TaskOutcome};

/// Attempts to start one task of `job` on `node`.
///
/// Implemented for any `FnMut(&Node, &Job) -> TaskOutcome`.
pub trait LaunchTask {
    fn launch(&mut self, node: &Node, job: &Job) -> TaskOutcome;
}

impl<F> LaunchTask for F
where
    F: FnMut(&Node, &Job) -> TaskOutcome,
{
    fn launch(&mut self, node: &Node, job: &Job) -> TaskOutcome {
        self(node, job)
    }
}

/// A strategy for pairing pending jobs with eligible nodes.
pub trait SchedulerPolicy {
    /// Registry name of the policy.
    fn name(&self) -> &'static str;

    /// Run one pass over `work`, returning the number of tasks started.
    ///
    /// `launch` is invoked sequentially, at most once per node of each entry.
    /// A [`TaskOutcome::Halt`] ends the pass immediately.
    fn schedule(&self, work: &mut Vec<JobWithNodes>, launch: &mut dyn LaunchTask) -> usize;
}

/// Take the node at the back of `entry` and offer it to `launch`.
///
/// The node is removed before the outcome is known, so it is never offered
/// twice in one pass. Returns `None` when the entry has no nodes left.
pub(crate) fn attempt_next(
    entry: &mut JobWithNodes,
    launch: &mut dyn LaunchTask,
) -> Option<TaskOutcome> {
    let node = entry.nodes.pop()?;
    let outcome = launch.launch(&node, &entry.job);
    trace!(job = %entry.job.id, node = %node.id, ?outcome, "launch attempted");
    Some(outcome)
}

/// The built-in policies, selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    RankedPriority,
    RoundRobin,
    LongTail,
    RandomizedPriority,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::RankedPriority,
        PolicyKind::RoundRobin,
        PolicyKind::LongTail,
        PolicyKind::RandomizedPriority,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::RankedPriority => RankedPriorityPolicy::NAME,
            PolicyKind::RoundRobin => RoundRobinPolicy::NAME,
            PolicyKind::LongTail => LongTailPolicy::NAME,
            PolicyKind::RandomizedPriority => RandomizedPriorityPolicy::NAME,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PolicyError::UnknownPolicy(s.to_string()))
    }
}

impl SchedulerPolicy for PolicyKind {
    fn name(&self) -> &'static str {
        self.as_str()
    }

    fn schedule(&self, work: &mut Vec<JobWithNodes>, launch: &mut dyn LaunchTask) -> usize {
        match self {
            PolicyKind::RankedPriority => RankedPriorityPolicy.schedule(work, launch),
            PolicyKind::RoundRobin => RoundRobinPolicy.schedule(work, launch),
            PolicyKind::LongTail => LongTailPolicy.schedule(work, launch),
            PolicyKind::RandomizedPriority => RandomizedPriorityPolicy.schedule(work, launch),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.as_str().parse::<PolicyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "fair_share".parse::<PolicyKind>().unwrap_err();
        assert!(matches!(err, PolicyError::UnknownPolicy(name) if name == "fair_share"));
    }

    #[test]
    fn default_is_ranked_priority() {
        assert_eq!(PolicyKind::default(), PolicyKind::RankedPriority);
        assert_eq!(PolicyKind::default().to_string(), "ranked_priority");
    }

    #[test]
    fn attempt_next_pops_from_back() {
        let mut entry = JobWithNodes::new(
            Arc::new(Job::new("a", 1.0)),
            vec![Arc::new(Node::new("n1")), Arc::new(Node::new("n2"))],
        );
        let mut seen = Vec::new();
        let mut launch = |node: &Node, _job: &Job| {
            seen.push(node.id.clone());
            TaskOutcome::NotAssigned
        };

        assert_eq!(attempt_next(&mut entry, &mut launch), Some(TaskOutcome::NotAssigned));
        assert_eq!(attempt_next(&mut entry, &mut launch), Some(TaskOutcome::NotAssigned));
        assert_eq!(attempt_next(&mut entry, &mut launch), None);
        assert_eq!(seen, vec!["n2", "n1"]);
    }

    #[test]
    fn kind_dispatches_to_policy() {
        let work = vec![JobWithNodes::new(
            Arc::new(Job::new("a", 1.0)),
            vec![Arc::new(Node::new("n1"))],
        )];
        for kind in PolicyKind::ALL {
            let mut pass = work.clone();
            let mut always = |_: &Node, _: &Job| TaskOutcome::Assigned;
            let scheduled = kind.schedule(&mut pass, &mut always);
            assert_eq!(scheduled, 1, "{kind} should schedule the only node");
            assert!(pass.iter().all(JobWithNodes::is_exhausted));
        }
    }
}
