//! TaskGrid scheduler policies — ordering jobs and nodes for task launch.
//!
//! A policy takes the pending work of one scheduling tick (jobs, each with
//! the nodes eligible to run one of its tasks) and a launch callback. It
//! decides which (node, job) pair is offered next and stops at once when the
//! callback reports that the environment is saturated.
//!
//! # Components
//!
//! - **`policy`** — `SchedulerPolicy` trait, `LaunchTask` callback, `PolicyKind` registry
//! - **`ranked_priority`** — Strict descending priority, greedy per-job draining
//! - **`round_robin`** — One node per job per round
//! - **`long_tail`** — Jobs with the fewest remaining nodes first
//! - **`randomized_priority`** — Priority-weighted lottery
//! - **`resources`** — Resource ledger and gating launcher
//! - **`config`** — TOML config and cluster snapshots
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use taskgrid_policy::{Job, JobWithNodes, Node, RankedPriorityPolicy, SchedulerPolicy, TaskOutcome};
//!
//! let mut work = vec![JobWithNodes::new(
//!     Arc::new(Job::new("etl", 10.0)),
//!     vec![Arc::new(Node::new("n1")), Arc::new(Node::new("n2"))],
//! )];
//! let scheduled = RankedPriorityPolicy.schedule(&mut work, &mut |_: &Node, _: &Job| TaskOutcome::Assigned);
//! assert_eq!(scheduled, 2);
//! ```

pub mod config;
pub mod error;
pub mod long_tail;
pub mod policy;
pub mod randomized_priority;
pub mod ranked_priority;
pub mod resources;
pub mod round_robin;
pub mod types;

pub use config::{JobSpec, SchedulerConfig, Snapshot, TaskgridConfig};
pub use error::{PolicyError, PolicyResult};
pub use long_tail::LongTailPolicy;
pub use policy::{LaunchTask, PolicyKind, SchedulerPolicy};
pub use randomized_priority::RandomizedPriorityPolicy;
pub use ranked_priority::RankedPriorityPolicy;
pub use resources::{ResourceGate, ResourceLedger};
pub use round_robin::RoundRobinPolicy;
pub use types::{Job, JobWithNodes, Node, TaskOutcome};
