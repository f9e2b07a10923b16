use std::fmt;
use std::time::{Duration, Instant};

use log::info;

use crate::simulation::driver::{SimulationReport, SimulationRun};
use crate::simulation::params::Parameters;
use crate::simulation::scenario::SystemSource;
use crate::simulation::states::Body;

#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub simulation: SimulationReport,
    pub elapsed: Duration, // integration loop only
}

impl BenchmarkReport {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.simulation)?;
        write!(f, "Time taken: {:.2} ms", self.elapsed_ms())
    }
}

/// Same phases as the simulation driver, with the wall clock started right
/// before the first `advance` and stopped right after the last one. Momentum
/// offset and both energy reads stay outside the timed window. `bodies` must
/// not be empty.
pub fn benchmark(bodies: Vec<Body>, steps: u64, params: &Parameters) -> BenchmarkReport {
    info!("Starting N-BODY benchmark...");
    info!("Number of steps: {}", steps);

    let mut run = SimulationRun::new(bodies, steps, params.clone());
    run.offset_momentum();
    run.measure_start();

    let t0 = Instant::now();
    run.integrate();
    let elapsed = t0.elapsed();

    run.measure_end();
    let simulation = run.report();

    BenchmarkReport { simulation, elapsed }
}

/// Benchmark the integrator for each step count in `steps`, rebuilding the
/// initial system every time. Returns `(steps, elapsed_ms)` rows.
pub fn bench_steps_curve(source: &SystemSource, steps: &[u64], params: &Parameters) -> Vec<(u64, f64)> {
    steps
        .iter()
        .map(|&n| {
            let report = benchmark(source.build(params.seed), n, params);
            (n, report.elapsed_ms())
        })
        .collect()
}

/// Print a step sweep as CSV rows, ready to paste into a spreadsheet
pub fn print_steps_curve(rows: &[(u64, f64)]) {
    println!("steps,elapsed_ms");
    for (steps, ms) in rows {
        println!("{},{:.6}", steps, ms);
    }
}
