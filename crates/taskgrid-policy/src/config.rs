//! TOML configuration and cluster snapshots.
//!
//! ```toml
//! # taskgrid.toml
//! [scheduler]
//! policy = "ranked_priority"
//! max_running_tasks = 8
//! ```
//!
//! ```toml
//! # snapshot.toml
//! [[nodes]]
//! id = "n1"
//! resources = { slots = 2 }
//!
//! [[jobs]]
//! id = "etl"
//! priority = 10.0
//! resources = { slots = 1 }
//! nodes = ["n1"]   # last listed is tried first
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};
use crate::policy::PolicyKind;
use crate::types::{Job, JobWithNodes, Node};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskgridConfig {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub policy: PolicyKind,
    /// Admission limit for the simulated runner. `None` means unlimited.
    #[serde(default)]
    pub max_running_tasks: Option<usize>,
}

impl TaskgridConfig {
    pub fn from_file(path: &Path) -> PolicyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PolicyResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// A job as written in a snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub id: String,
    pub priority: f64,
    #[serde(default)]
    pub resources: HashMap<String, u64>,
    /// Eligible node ids in consumption order (the last one is tried first).
    #[serde(default)]
    pub nodes: Vec<String>,
}

/// Nodes and pending jobs at one scheduling tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub jobs: Vec<JobSpec>,
}

impl Snapshot {
    pub fn from_file(path: &Path) -> PolicyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PolicyResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build the pending work for one pass, sharing each node between the
    /// jobs that list it.
    pub fn pending_work(&self) -> PolicyResult<Vec<JobWithNodes>> {
        let mut by_id: HashMap<&str, Arc<Node>> = HashMap::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if by_id.insert(node.id.as_str(), Arc::new(node.clone())).is_some() {
                return Err(PolicyError::DuplicateNode(node.id.clone()));
            }
        }

        self.jobs
            .iter()
            .map(|spec| {
                let nodes = spec
                    .nodes
                    .iter()
                    .map(|id| {
                        by_id.get(id.as_str()).cloned().ok_or_else(|| PolicyError::UnknownNode {
                            job: spec.id.clone(),
                            node: id.clone(),
                        })
                    })
                    .collect::<PolicyResult<Vec<_>>>()?;
                let job = Job {
                    id: spec.id.clone(),
                    priority: spec.priority,
                    resources: spec.resources.clone(),
                };
                Ok(JobWithNodes::new(Arc::new(job), nodes))
            })
            .collect()
    }
}
