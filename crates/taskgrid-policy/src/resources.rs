//! Resource accounting for launch attempts.
//!
//! [`ResourceGate`] wraps a launcher and only lets an attempt through when the
//! node still has room for one more task of the job. Capacity is deducted
//! when the inner launcher reports [`TaskOutcome::Assigned`]. Policies are
//! unaware of the gate: a node without room simply reads as not assigned.

use std::collections::HashMap;

use tracing::trace;

use crate::policy::LaunchTask;
use crate::types::{Job, Node, TaskOutcome};

/// Free resources per node id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    free: HashMap<String, HashMap<String, u64>>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start every node at full capacity.
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Self {
        let mut ledger = Self::new();
        for node in nodes {
            ledger.add_node(node);
        }
        ledger
    }

    /// Track `node` at full capacity, replacing any previous entry.
    pub fn add_node(&mut self, node: &Node) {
        self.free.insert(node.id.clone(), node.resources.clone());
    }

    /// Free amount of `resource` on `node_id`, if both are known.
    pub fn free(&self, node_id: &str, resource: &str) -> Option<u64> {
        self.free.get(node_id)?.get(resource).copied()
    }

    /// Whether one more task of `job` fits on `node_id`.
    ///
    /// Unknown nodes never fit. Zero requirements always fit.
    pub fn fits(&self, node_id: &str, job: &Job) -> bool {
        let Some(free) = self.free.get(node_id) else {
            return false;
        };
        job.resources
            .iter()
            .all(|(name, &need)| need == 0 || free.get(name).is_some_and(|&have| have >= need))
    }

    /// Deduct one task of `job` from `node_id`. Returns `false`, leaving the
    /// ledger untouched, if it does not fit.
    pub fn reserve(&mut self, node_id: &str, job: &Job) -> bool {
        if !self.fits(node_id, job) {
            return false;
        }
        if let Some(free) = self.free.get_mut(node_id) {
            for (name, &need) in &job.resources {
                if let Some(have) = free.get_mut(name) {
                    *have -= need;
                }
            }
        }
        true
    }
}

/// A launcher that checks and deducts node resources around `inner`.
pub struct ResourceGate<L> {
    ledger: ResourceLedger,
    inner: L,
}

impl<L: LaunchTask> ResourceGate<L> {
    pub fn new(ledger: ResourceLedger, inner: L) -> Self {
        Self { ledger, inner }
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn into_parts(self) -> (ResourceLedger, L) {
        (self.ledger, self.inner)
    }
}

impl<L: LaunchTask> LaunchTask for ResourceGate<L> {
    fn launch(&mut self, node: &Node, job: &Job) -> TaskOutcome {
        if !self.ledger.fits(&node.id, job) {
            trace!(job = %job.id, node = %node.id, "insufficient resources");
            return TaskOutcome::NotAssigned;
        }
        let outcome = self.inner.launch(node, job);
        if outcome == TaskOutcome::Assigned {
            self.ledger.reserve(&node.id, job);
        }
        outcome
    }
}
