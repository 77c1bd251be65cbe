use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use taskgrid_policy::{
    Job, LaunchTask, Node, PolicyKind, PolicyResult, ResourceGate, ResourceLedger,
    SchedulerPolicy, Snapshot, TaskOutcome, TaskgridConfig,
};

pub struct RunArgs {
    pub snapshot: PathBuf,
    pub config: Option<PathBuf>,
    pub policy: Option<PolicyKind>,
    pub max_running: Option<usize>,
    pub format: String,
}

/// One started task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Launch {
    pub job: String,
    pub node: String,
}

/// Nodes a job was not offered before the pass ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unassigned {
    pub job: String,
    pub nodes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub policy: PolicyKind,
    pub scheduled: usize,
    pub halted: bool,
    pub launches: Vec<Launch>,
    pub unassigned: Vec<Unassigned>,
}

/// Starts every task offered until `limit` are running, then halts.
struct SimulatedRunner {
    limit: Option<usize>,
    launches: Vec<Launch>,
    halted: bool,
}

impl LaunchTask for SimulatedRunner {
    fn launch(&mut self, node: &Node, job: &Job) -> TaskOutcome {
        if self.limit.is_some_and(|limit| self.launches.len() >= limit) {
            self.halted = true;
            return TaskOutcome::Halt;
        }
        self.launches.push(Launch {
            job: job.id.clone(),
            node: node.id.clone(),
        });
        TaskOutcome::Assigned
    }
}

/// Run one pass of `policy` over `snapshot`.
pub fn simulate(
    snapshot: &Snapshot,
    policy: PolicyKind,
    limit: Option<usize>,
) -> PolicyResult<RunReport> {
    let mut work = snapshot.pending_work()?;
    let runner = SimulatedRunner {
        limit,
        launches: Vec::new(),
        halted: false,
    };
    let mut gate = ResourceGate::new(ResourceLedger::from_nodes(&snapshot.nodes), runner);

    let scheduled = policy.schedule(&mut work, &mut gate);

    let (_, runner) = gate.into_parts();
    let unassigned = work
        .iter()
        .filter(|entry| !entry.is_exhausted())
        .map(|entry| Unassigned {
            job: entry.job.id.clone(),
            nodes: entry.nodes.iter().map(|node| node.id.clone()).collect(),
        })
        .collect();

    Ok(RunReport {
        policy,
        scheduled,
        halted: runner.halted,
        launches: runner.launches,
        unassigned,
    })
}

pub fn run(args: &RunArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => TaskgridConfig::from_file(path)?,
        None => TaskgridConfig::default(),
    };
    let policy = args.policy.unwrap_or(config.scheduler.policy);
    let limit = args.max_running.or(config.scheduler.max_running_tasks);

    let snapshot = Snapshot::from_file(&args.snapshot)?;
    let report = simulate(&snapshot, policy, limit)?;
    info!(
        %policy,
        scheduled = report.scheduled,
        halted = report.halted,
        "scheduling pass finished"
    );

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", format_report(&report)),
    }
    Ok(())
}

fn format_report(report: &RunReport) -> String {
    let mut out = format!("policy: {}\n", report.policy);
    out.push_str(&format!("scheduled: {}", report.scheduled));
    if report.halted {
        out.push_str(" (halted)");
    }
    out.push('\n');

    out.push_str("launches:\n");
    for (i, launch) in report.launches.iter().enumerate() {
        out.push_str(&format!("  {}. {} -> {}\n", i + 1, launch.job, launch.node));
    }
    if !report.unassigned.is_empty() {
        out.push_str("unassigned:\n");
        for left in &report.unassigned {
            out.push_str(&format!("  {}: {}\n", left.job, left.nodes.join(", ")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SNAPSHOT: &str = r#"
[[nodes]]
id = "n1"
resources = { slots = 1 }

[[nodes]]
id = "n2"
resources = { slots = 4 }

[[nodes]]
id = "n3"
resources = { slots = 4 }

[[jobs]]
id = "A"
priority = 10.0
resources = { slots = 1 }
nodes = ["n1", "n2"]

[[jobs]]
id = "B"
priority = 5.0
resources = { slots = 1 }
nodes = ["n3"]
"#;

    fn launch(job: &str, node: &str) -> Launch {
        Launch {
            job: job.to_string(),
            node: node.to_string(),
        }
    }

    #[test]
    fn unlimited_run_schedules_everything() {
        let snapshot = Snapshot::from_toml_str(SNAPSHOT).unwrap();
        let report = simulate(&snapshot, PolicyKind::RankedPriority, None).unwrap();

        assert_eq!(report.scheduled, 3);
        assert!(!report.halted);
        assert_eq!(report.launches, vec![launch("A", "n2"), launch("A", "n1"), launch("B", "n3")]);
        assert!(report.unassigned.is_empty());
    }

    #[test]
    fn admission_limit_halts_and_reports_leftovers() {
        let snapshot = Snapshot::from_toml_str(SNAPSHOT).unwrap();
        let report = simulate(&snapshot, PolicyKind::RankedPriority, Some(1)).unwrap();

        assert_eq!(report.scheduled, 1);
        assert!(report.halted);
        assert_eq!(report.launches, vec![launch("A", "n2")]);
        assert_eq!(
            report.unassigned,
            vec![Unassigned {
                job: "B".to_string(),
                nodes: vec!["n3".to_string()],
            }]
        );
    }

    #[test]
    fn exhausted_node_resources_are_skipped() {
        let snapshot = Snapshot::from_toml_str(
            r#"
[[nodes]]
id = "n1"
resources = { slots = 1 }

[[jobs]]
id = "A"
priority = 2.0
resources = { slots = 1 }
nodes = ["n1"]

[[jobs]]
id = "B"
priority = 1.0
resources = { slots = 1 }
nodes = ["n1"]
"#,
        )
        .unwrap();
        let report = simulate(&snapshot, PolicyKind::RankedPriority, None).unwrap();

        assert_eq!(report.scheduled, 1);
        assert_eq!(report.launches, vec![launch("A", "n1")]);
    }

    #[test]
    fn round_robin_interleaves_in_report() {
        let snapshot = Snapshot::from_toml_str(SNAPSHOT).unwrap();
        let report = simulate(&snapshot, PolicyKind::RoundRobin, None).unwrap();

        assert_eq!(report.launches, vec![launch("A", "n2"), launch("B", "n3"), launch("A", "n1")]);
    }

    #[test]
    fn text_report_lists_launches_and_leftovers() {
        let snapshot = Snapshot::from_toml_str(SNAPSHOT).unwrap();
        let report = simulate(&snapshot, PolicyKind::RankedPriority, Some(1)).unwrap();
        let text = format_report(&report);

        assert!(text.contains("policy: ranked_priority"));
        assert!(text.contains("scheduled: 1 (halted)"));
        assert!(text.contains("  1. A -> n2"));
        assert!(text.contains("  B: n3"));
    }

    #[test]
    fn run_reads_files_and_applies_overrides() {
        let mut snapshot = tempfile::NamedTempFile::new().unwrap();
        snapshot.write_all(SNAPSHOT.as_bytes()).unwrap();
        let mut config = tempfile::NamedTempFile::new().unwrap();
        writeln!(config, "[scheduler]\npolicy = \"long_tail\"\nmax_running_tasks = 1").unwrap();

        let args = RunArgs {
            snapshot: snapshot.path().to_path_buf(),
            config: Some(config.path().to_path_buf()),
            policy: Some(PolicyKind::RankedPriority),
            max_running: None,
            format: "json".to_string(),
        };
        run(&args).unwrap();
    }

    #[test]
    fn run_fails_on_missing_snapshot() {
        let args = RunArgs {
            snapshot: PathBuf::from("/nonexistent/snapshot.toml"),
            config: None,
            policy: None,
            max_running: None,
            format: "text".to_string(),
        };
        assert!(run(&args).is_err());
    }
}
