//! memsim - command-line driver for the page replacement simulator.
//!
//! ```text
//! memsim run traces/gcc.trace 16 lru quiet
//! memsim sweep traces/*.trace --frames 2,4,8 --output vm_results.csv
//! ```

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};

use vmsim::common::config::{DEFAULT_CSV_PATH, DEFAULT_SWEEP_FRAMES};
use vmsim::mmu::LogObserver;
use vmsim::sim::{simulate, write_csv, write_table, Sweep, TraceInput};
use vmsim::{Algorithm, Mmu, Policy, TraceReader};

#[derive(Parser, Debug)]
#[command(name = "memsim", version, about = "Trace-driven page replacement simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay one trace through one policy and print a summary
    Run {
        /// Trace file, one "<hex address> <R|W>" per line
        trace: PathBuf,
        /// Number of physical frames
        #[arg(value_parser = parse_frames)]
        frames: usize,
        /// Replacement algorithm: rand, lru or clock
        #[arg(value_parser = parse_algorithm)]
        algorithm: Algorithm,
        /// Output mode
        #[arg(value_enum, default_value_t = Mode::Quiet)]
        mode: Mode,
        /// Seed for the random policy
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run every trace × algorithm × frame-count combination
    Sweep {
        /// Trace files
        #[arg(required = true)]
        traces: Vec<PathBuf>,
        /// Frame counts to try
        #[arg(long, value_delimiter = ',', value_parser = parse_frames, default_values_t = DEFAULT_SWEEP_FRAMES.to_vec())]
        frames: Vec<usize>,
        /// Algorithms to try
        #[arg(long, value_delimiter = ',', value_parser = parse_algorithm, default_values_t = Algorithm::ALL.to_vec())]
        algorithms: Vec<Algorithm>,
        /// Where to write CSV results
        #[arg(long, short, default_value = DEFAULT_CSV_PATH)]
        output: PathBuf,
        /// Seed for the random policy
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Quiet,
    Debug,
}

fn parse_algorithm(s: &str) -> Result<Algorithm, vmsim::Error> {
    s.parse()
}

/// Frame counts are native-width and at least 1.
fn parse_frames(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("frame count must be at least 1".to_string()),
        Ok(frames) => Ok(frames),
        Err(e) => Err(format!("invalid frame count {:?}: {}", s, e)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let debug = matches!(cli.command, Command::Run { mode: Mode::Debug, .. });
    let mut logger = env_logger::Builder::from_default_env();
    if debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Command::Run {
            trace,
            frames,
            algorithm,
            mode,
            seed,
        } => run(trace, frames, algorithm, mode, seed),
        Command::Sweep {
            traces,
            frames,
            algorithms,
            output,
            seed,
        } => sweep(traces, frames, algorithms, output, seed),
    }
}

fn run(
    trace: PathBuf,
    frames: usize,
    algorithm: Algorithm,
    mode: Mode,
    seed: Option<u64>,
) -> Result<()> {
    let reader =
        TraceReader::open(&trace).with_context(|| format!("opening trace {}", trace.display()))?;

    let mut mmu = Mmu::new(frames, Policy::new(algorithm, frames, seed))?;
    if mode == Mode::Debug {
        mmu = mmu.with_observer(Box::new(LogObserver));
        mmu.set_debug();
    }

    let report = simulate(&mut mmu, reader)
        .with_context(|| format!("replaying trace {}", trace.display()))?;

    println!("{}", report);
    Ok(())
}

fn sweep(
    traces: Vec<PathBuf>,
    frames: Vec<usize>,
    algorithms: Vec<Algorithm>,
    output: PathBuf,
    seed: Option<u64>,
) -> Result<()> {
    let inputs = traces
        .iter()
        .map(|path| {
            TraceInput::load(path).with_context(|| format!("loading trace {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let rows = Sweep::new()
        .frames(frames)
        .algorithms(algorithms)
        .seed(seed)
        .run(&inputs)?;

    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    write_csv(BufWriter::new(file), &rows)?;
    info!("wrote {} results to {}", rows.len(), output.display());

    write_table(io::stdout().lock(), &rows)?;
    println!("[saved] {}", output.display());
    Ok(())
}
