use nbody_bench::{bench_steps_curve, print_steps_curve, run, RunConfig, SystemSource, Parameters};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "N-body micro-benchmark harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the N-body simulation
    NBody(NBodyArgs),
    /// Time the native integrator over several step counts (CSV output)
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct NBodyArgs {
    /// Language to run the benchmark in: python, rust or mojo
    #[arg(short, long)]
    language: Option<String>,

    /// Number of steps to run the simulation [default: 100]
    #[arg(short, long)]
    steps: Option<u64>,

    /// Run the benchmark
    #[arg(short, long)]
    bench: bool,

    /// Number of bodies in the system
    #[arg(long)]
    bodies: Option<u32>,

    /// Seed for randomly generated bodies
    #[arg(long)]
    seed: Option<u64>,

    /// Exit with a non-zero code when energy is not conserved
    #[arg(long)]
    strict: bool,

    /// YAML run file; command-line options override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl NBodyArgs {
    // Flags only override the file when actually given
    fn overrides(&self) -> RunConfig {
        RunConfig {
            language: self.language.clone(),
            steps: self.steps,
            bench: self.bench.then_some(true),
            bodies: self.bodies,
            seed: self.seed,
            strict: self.strict.then_some(true),
            system: None,
        }
    }
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Step counts to time
    #[arg(short, long, value_delimiter = ',', default_value = "1000,10000,100000")]
    steps: Vec<u64>,

    /// Number of bodies in the system
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    bodies: Option<u32>,

    /// Seed for randomly generated bodies
    #[arg(long)]
    seed: Option<u64>,
}

// load here to keep main clean
fn load_run_config(args: &NBodyArgs) -> Result<RunConfig> {
    let base = match &args.config {
        Some(path) => RunConfig::from_path(path)
            .with_context(|| format!("failed to load run file {}", path.display()))?,
        None => RunConfig::default(),
    };
    Ok(base.merge(args.overrides()))
}

fn n_body(args: NBodyArgs) -> Result<ExitCode> {
    let params = load_run_config(&args)?.resolve()?;
    let outcome = run(&params)?;

    println!("{outcome}");

    if !outcome.passes(params.strict) {
        warn!("energy check failed in strict mode");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn sweep(args: SweepArgs) -> Result<ExitCode> {
    let source = SystemSource::from_count(args.bodies);
    let params = Parameters::default().with_seed(args.seed);
    info!("Sweeping {} step counts", args.steps.len());

    let rows = bench_steps_curve(&source, &args.steps, &params);
    print_steps_curve(&rows);
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::NBody(args) => n_body(args),
        Command::Sweep(args) => sweep(args),
    }
}
