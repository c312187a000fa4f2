use std::{fs::File, io::BufReader, path::PathBuf, process};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use csim::{CacheConfig, RecordOutcome, SimError, TraceEntry, TraceReader, replay_with, report};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a memory trace against a set-associative LRU cache")]
struct Args {
    /// Number of set index bits (2^s sets)
    #[arg(short = 's', allow_negative_numbers = true)]
    set_bits: i64,

    /// Associativity (lines per set)
    #[arg(short = 'E', allow_negative_numbers = true)]
    lines_per_set: i64,

    /// Number of block offset bits (2^b byte blocks)
    #[arg(short = 'b', allow_negative_numbers = true)]
    block_bits: i64,

    /// Trace file to replay
    #[arg(short = 't')]
    trace: PathBuf,

    /// Print the outcome of every trace line and the hit rate
    #[arg(short = 'v')]
    verbose: bool,

    /// Also write "hits misses evictions" to this file
    #[arg(long)]
    results_file: Option<PathBuf>,
}

fn run(args: &Args) -> Result<()> {
    let config = CacheConfig::from_signed(args.set_bits, args.lines_per_set, args.block_bits)
        .context("invalid cache geometry")?;

    let file = File::open(&args.trace)
        .with_context(|| format!("could not open trace '{}'", args.trace.display()))?;
    info!("replaying {}", args.trace.display());

    let reader = TraceReader::new(BufReader::new(file));
    let result = replay_with(config, reader, |entry: &TraceEntry, outcome: &RecordOutcome| {
        if args.verbose {
            println!("{}", report::verbose_line(entry, outcome));
        }
    });
    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            if let SimError::Trace { partial, .. } = &e {
                warn!("totals before the failing record: {}", report::summary(partial));
            }
            return Err(e)
                .with_context(|| format!("simulation of '{}' failed", args.trace.display()));
        }
    };

    if args.verbose {
        println!("{}", report::hit_rate(&stats));
    }
    println!("{}", report::summary(&stats));
    if let Some(path) = &args.results_file {
        report::write_results(path, &stats)
            .with_context(|| format!("could not write results to '{}'", path.display()))?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
