//! Core data model shared by every scheduler policy.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A unit of scheduled work.
///
/// Jobs are owned by configuration; policies only read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    /// Higher runs first. Any value is accepted, including negatives and NaN;
    /// ordering uses `f64::total_cmp`.
    pub priority: f64,
    /// Resources consumed on a node by each task of this job.
    #[serde(default)]
    pub resources: HashMap<String, u64>,
}

impl Job {
    pub fn new(id: impl Into<String>, priority: f64) -> Self {
        Self {
            id: id.into(),
            priority,
            resources: HashMap::new(),
        }
    }

    /// Add a per-task resource requirement.
    pub fn with_resource(mut self, name: impl Into<String>, amount: u64) -> Self {
        self.resources.insert(name.into(), amount);
        self
    }
}

/// A worker unit that can run tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Total capacity per resource name.
    #[serde(default)]
    pub resources: HashMap<String, u64>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resources: HashMap::new(),
        }
    }

    pub fn with_resource(mut self, name: impl Into<String>, amount: u64) -> Self {
        self.resources.insert(name.into(), amount);
        self
    }
}

/// A job paired with the nodes currently eligible to run one of its tasks.
///
/// Nodes are consumed from the back: callers that want a node tried first
/// should push it last.
#[derive(Debug, Clone)]
pub struct JobWithNodes {
    pub job: Arc<Job>,
    pub nodes: Vec<Arc<Node>>,
}

impl JobWithNodes {
    pub fn new(job: Arc<Job>, nodes: Vec<Arc<Node>>) -> Self {
        Self { job, nodes }
    }

    pub fn is_exhausted(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The response of a launch attempt for one (node, job) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOutcome {
    /// A task was started and counts toward the pass total.
    Assigned,
    /// No task was started on this node; keep going.
    NotAssigned,
    /// The environment cannot take more work. Stop the whole pass now.
    Halt,
}
