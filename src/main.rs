//! Labbench - Virtual Lab Bench
//!
//! Replays an event script against a bench description and prints the
//! meter readings after every tick.
//!
//! # Usage
//!
//! ```bash
//! labbench diode.bench --script session.txt
//! echo -e "power\nknob coarse 40\ntick" | labbench diode.bench
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use labbench_core::{
    dsl,
    error::{BenchError, Result},
    script::{replay, DEFAULT_DT},
    LabBench,
};

/// Virtual lab bench driven by event scripts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the bench description file
    #[arg(value_name = "BENCH_FILE")]
    bench_file: PathBuf,

    /// Event script to replay (reads stdin when omitted)
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Seconds advanced by each `tick`
    #[arg(long, default_value_t = DEFAULT_DT)]
    dt: f32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Parse and build the bench
    let ast = dsl::parse_file(&args.bench_file)?;
    let mut bench = LabBench::from_ast(&ast)?;

    let stdout = io::stdout().lock();
    match &args.script {
        Some(path) => {
            let file = File::open(path).map_err(|e| BenchError::FileReadError {
                path: path.display().to_string(),
                source: e,
            })?;
            replay(&mut bench, BufReader::new(file), stdout, args.dt)
        }
        None => replay(&mut bench, io::stdin().lock(), stdout, args.dt),
    }
}
