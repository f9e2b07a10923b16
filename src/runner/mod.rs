//! Problem/backend dispatch
//!
//! Every backend implements [`Problem`]: `solve` runs the simulation driver,
//! `benchmark` runs the timed driver. [`run`] picks the backend from the
//! language tag. Only the native backend runs in-process; the other tags are
//! recognised but report [`Error::BackendUnavailable`].

pub mod language;

use std::fmt;

use log::debug;

use crate::benchmark::benchmark::{benchmark, BenchmarkReport};
use crate::error::{Error, Result};
use crate::simulation::driver::{simulate, Conservation, SimulationReport};
use crate::simulation::params::Parameters;
use crate::simulation::scenario::SystemSource;

pub use language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType {
    NBody,
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemType::NBody => f.write_str("n_body"),
        }
    }
}

/// Uniform contract of a benchmark backend
pub trait Problem {
    fn kind(&self) -> ProblemType;
    fn solve(&self) -> SimulationReport;
    fn benchmark(&self) -> BenchmarkReport;
}

/// Resolved, validated parameters of one n-body invocation
#[derive(Debug, Clone, PartialEq)]
pub struct NBodyParams {
    pub language: Language,
    pub steps: u64,
    pub bench: bool,
    pub system: SystemSource,
    pub parameters: Parameters,
    pub strict: bool,
}

/// The in-process Rust backend
#[derive(Debug, Clone)]
pub struct NBodyNative {
    pub steps: u64,
    pub system: SystemSource,
    pub parameters: Parameters,
}

impl NBodyNative {
    pub fn new(steps: u64, system: SystemSource, parameters: Parameters) -> Self {
        Self {
            steps,
            system,
            parameters,
        }
    }
}

impl Problem for NBodyNative {
    fn kind(&self) -> ProblemType {
        ProblemType::NBody
    }

    fn solve(&self) -> SimulationReport {
        let bodies = self.system.build(self.parameters.seed);
        simulate(bodies, self.steps, &self.parameters)
    }

    fn benchmark(&self) -> BenchmarkReport {
        let bodies = self.system.build(self.parameters.seed);
        benchmark(bodies, self.steps, &self.parameters)
    }
}

/// What a dispatched run produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Simulation(SimulationReport),
    Benchmark(BenchmarkReport),
}

impl Outcome {
    pub fn verdict(&self) -> Conservation {
        match self {
            Outcome::Simulation(r) => r.verdict,
            Outcome::Benchmark(r) => r.simulation.verdict,
        }
    }

    /// Whether the run should exit successfully. Non-conservation only
    /// fails a `strict` run.
    pub fn passes(&self, strict: bool) -> bool {
        !strict || self.verdict().is_conserved()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Simulation(r) => write!(f, "{r}"),
            Outcome::Benchmark(r) => write!(f, "{r}"),
        }
    }
}

/// Backend for the requested language, if this build has one
pub fn backend_for(params: &NBodyParams) -> Result<Box<dyn Problem>> {
    match params.language {
        Language::Rust => Ok(Box::new(NBodyNative::new(
            params.steps,
            params.system.clone(),
            params.parameters.clone(),
        ))),
        lang @ (Language::Python | Language::Mojo) => Err(Error::BackendUnavailable(lang)),
    }
}

/// Route a request to its backend and run either driver
pub fn run(params: &NBodyParams) -> Result<Outcome> {
    let problem = backend_for(params)?;
    debug!("dispatching {} to the {} backend", problem.kind(), params.language);

    let outcome = if params.bench {
        Outcome::Benchmark(problem.benchmark())
    } else {
        Outcome::Simulation(problem.solve())
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(language: Language, bench: bool) -> NBodyParams {
        NBodyParams {
            language,
            steps: 10,
            bench,
            system: SystemSource::Canonical,
            parameters: Parameters::default(),
            strict: false,
        }
    }

    #[test]
    fn rust_dispatches_to_simulation() {
        let outcome = run(&params(Language::Rust, false)).unwrap();
        assert!(matches!(outcome, Outcome::Simulation(_)));
        assert!(outcome.verdict().is_conserved());
    }

    #[test]
    fn bench_flag_selects_benchmark() {
        let outcome = run(&params(Language::Rust, true)).unwrap();
        match outcome {
            Outcome::Benchmark(r) => assert_eq!(r.simulation.steps, 10),
            other => panic!("expected benchmark outcome, got {other:?}"),
        }
    }

    #[test]
    fn strict_mode_fails_on_non_conservation() {
        let mut p = params(Language::Rust, false);
        p.parameters.energy_threshold = 1e-12;
        let outcome = run(&p).unwrap();

        assert!(!outcome.verdict().is_conserved());
        assert!(outcome.passes(false));
        assert!(!outcome.passes(true));
    }

    #[test]
    fn strict_mode_passes_when_conserved() {
        let outcome = run(&params(Language::Rust, true)).unwrap();
        assert!(outcome.passes(true));
    }

    #[test]
    fn other_languages_are_unavailable() {
        for lang in [Language::Python, Language::Mojo] {
            let err = run(&params(lang, false)).unwrap_err();
            assert!(matches!(err, Error::BackendUnavailable(l) if l == lang));
        }
    }
}
