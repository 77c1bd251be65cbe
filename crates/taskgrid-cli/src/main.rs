use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taskgrid_policy::PolicyKind;

mod commands;

#[derive(Parser)]
#[command(
    name = "taskgrid",
    about = "TaskGrid — run scheduler policies over cluster snapshots",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scheduling pass over a snapshot with a simulated task runner.
    ///
    /// The runner starts every task it is offered until --max-running tasks
    /// are running, then asks the policy to halt. Node resources declared in
    /// the snapshot are enforced.
    Run {
        /// Snapshot file with [[nodes]] and [[jobs]]
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Config file with a [scheduler] table
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Policy to run (overrides the config file)
        #[arg(short, long)]
        policy: Option<PolicyKind>,
        /// Admission limit (overrides the config file)
        #[arg(short, long)]
        max_running: Option<usize>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// List the available scheduler policies
    Policies,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taskgrid=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            snapshot,
            config,
            policy,
            max_running,
            format,
        } => commands::run::run(&commands::run::RunArgs {
            snapshot,
            config,
            policy,
            max_running,
            format,
        }),
        Commands::Policies => commands::policies::list(),
    }
}
