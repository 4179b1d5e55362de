use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::bench::Workload;

#[derive(Parser)]
#[command(name = "bidivec-cmd")]
#[command(about = "Command-line utility for exercising the bidivec container")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time a workload against BidiVec, Vec and VecDeque
    Bench {
        /// Workload to run
        #[arg(short, long, value_enum)]
        workload: Workload,

        /// Number of elements per round
        #[arg(short, long, default_value_t = 100_000)]
        count: usize,

        /// Number of timed rounds
        #[arg(short, long, default_value_t = 5)]
        rounds: usize,

        /// Seed for workloads that use random values
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Print the results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Replay random operations against BidiVec and a reference deque
    Trace {
        /// Number of operations to run
        #[arg(short, long, default_value_t = 10_000)]
        ops: usize,

        /// Seed for the operation stream
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            workload,
            count,
            rounds,
            seed,
            json,
        } => commands::bench::run(workload, count, rounds, seed, json),
        Commands::Trace { ops, seed } => commands::trace::run(ops, seed),
    }
}
