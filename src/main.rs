//! Lugal CLI - Command-line interface for the territory-scoring engine.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use lugal::testgen::GenConfig;
use std::process::ExitCode;

/// Lugal - a deterministic territory-scoring engine
#[derive(Parser, Debug)]
#[command(name = "lugal")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a contest input
    Solve {
        /// Input file (default: stdin)
        input: Option<std::path::PathBuf>,

        /// Write answers to a file (default: stdout)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Generate a random contest input
    Gen {
        /// Base seed (default: derived from the clock; case i uses seed+i)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of test cases to generate
        #[arg(long, default_value = "1")]
        cases: u64,

        /// Grid side length
        #[arg(short = 'n', long, default_value = "16")]
        size: u16,

        /// Queries per case
        #[arg(short, long, default_value = "64")]
        queries: u32,

        /// Civilisation slots owners are drawn from
        #[arg(short, long, default_value = "8")]
        civs: u32,

        /// Cell value magnitude bound
        #[arg(long, default_value = "100")]
        value_range: i32,

        /// Coefficient `a` magnitude bound
        #[arg(long, default_value = "10000000000")]
        a_range: i64,

        /// Coefficient `b` magnitude bound
        #[arg(long, default_value = "1000000000000")]
        b_range: i64,

        /// Coefficient `c` magnitude bound
        #[arg(long, default_value = "10000")]
        c_range: i64,

        /// Skew owner draws towards high slots
        #[arg(long)]
        skewed: bool,

        /// Keep slot indices as owner ids instead of scrambling
        #[arg(long)]
        keep_small_ids: bool,

        /// Write the input to a file (default: stdout)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },

    /// Check a contest input against the format and limits
    Check {
        /// Input file to check
        #[arg(required = true)]
        input: std::path::PathBuf,
    },

    /// Run differential stress tests against the brute-force reference
    Stress {
        /// Number of cases to run
        #[arg(long, default_value = "1000")]
        cases: u64,

        /// Base seed (default: derived from the clock)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Grid side length per case
        #[arg(short = 'n', long, default_value = "12")]
        size: u16,

        /// Queries per case
        #[arg(short, long, default_value = "200")]
        queries: u32,

        /// Civilisation slots per case
        #[arg(short, long, default_value = "6")]
        civs: u32,

        /// Skew owner draws towards high slots
        #[arg(long)]
        skewed: bool,

        /// Also run full invariant checks after every query
        #[arg(long)]
        deep: bool,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Solve { input, output, format } => cli::solve::execute(input, output, format),

        Commands::Gen {
            seed,
            cases,
            size,
            queries,
            civs,
            value_range,
            a_range,
            b_range,
            c_range,
            skewed,
            keep_small_ids,
            output,
        } => {
            let config = GenConfig {
                size,
                queries,
                civs,
                value_range,
                a_range,
                b_range,
                c_range,
                skewed,
                scramble_ids: !keep_small_ids,
            };
            cli::generate::execute(seed, cases, config, output)
        }

        Commands::Check { input } => cli::check::execute(input),

        Commands::Stress {
            cases,
            seed,
            size,
            queries,
            civs,
            skewed,
            deep,
            threads,
            progress,
            format,
        } => {
            let gen_config = GenConfig {
                size,
                queries,
                civs,
                skewed,
                ..GenConfig::default()
            };
            cli::stress::execute(cases, seed, gen_config, deep, threads, progress, format)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
