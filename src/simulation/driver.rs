//! Simulation driver
//!
//! A run moves through fixed phases:
//!
//! `Initialized -> MomentumOffset -> MeasuredStart -> Integrating -> MeasuredEnd -> Reported`
//!
//! Momentum is offset once, energy is measured exactly twice (before the
//! first and after the last `advance`), and the run always ends with a
//! conservation verdict. A failed check is reported, never raised.

use std::fmt;

use log::{debug, info, trace};

use super::energy::energy;
use super::integrator::offset_momentum;
use super::params::Parameters;
use super::states::{Body, System};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Initialized,
    MomentumOffset,
    MeasuredStart,
    Integrating,
    MeasuredEnd,
    Reported,
}

/// Outcome of comparing start and end energy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conservation {
    Conserved,
    NotConserved { start: f64, end: f64 },
}

impl Conservation {
    /// `|start - end| < threshold`. A NaN difference never passes.
    pub fn check(start: f64, end: f64, threshold: f64) -> Self {
        if (start - end).abs() < threshold {
            Conservation::Conserved
        } else {
            Conservation::NotConserved { start, end }
        }
    }

    pub fn is_conserved(&self) -> bool {
        matches!(self, Conservation::Conserved)
    }
}

impl fmt::Display for Conservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conservation::Conserved => write!(f, "Energy conserved"),
            Conservation::NotConserved { start, end } => {
                write!(f, "Energy not conserved: Got {end}, expected {start}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub steps: u64,
    pub bodies: usize,
    pub start_energy: f64,
    pub end_energy: f64,
    pub verdict: Conservation,
}

impl SimulationReport {
    pub fn energy_delta(&self) -> f64 {
        (self.start_energy - self.end_energy).abs()
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verdict)
    }
}

/// One simulation run over a body collection it owns exclusively.
///
/// The collection must hold at least one body; index 0 is the dominant mass.
#[derive(Debug)]
pub struct SimulationRun {
    system: System,
    steps: u64,
    params: Parameters,
    phase: RunPhase,
    start_energy: f64,
    end_energy: f64,
}

impl SimulationRun {
    pub fn new(bodies: Vec<Body>, steps: u64, params: Parameters) -> Self {
        debug_assert!(!bodies.is_empty(), "a run needs at least one body");
        Self {
            system: System::new(bodies),
            steps,
            params,
            phase: RunPhase::Initialized,
            start_energy: f64::NAN,
            end_energy: f64::NAN,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    /// Drive every phase in order and produce the report. A run that has
    /// already reported returns the same report without touching the bodies.
    pub fn run(&mut self) -> SimulationReport {
        if self.phase == RunPhase::Reported {
            return self.summary();
        }
        self.offset_momentum();
        self.measure_start();
        self.integrate();
        self.measure_end();
        self.report()
    }

    pub(crate) fn offset_momentum(&mut self) {
        self.enter(RunPhase::Initialized, RunPhase::MomentumOffset);
        offset_momentum(&mut self.system.bodies);
        trace!("dominant velocity after offset: {:?}", self.system.bodies.first().map(|b| b.v));
    }

    pub(crate) fn measure_start(&mut self) {
        self.enter(RunPhase::MomentumOffset, RunPhase::MeasuredStart);
        self.start_energy = energy(&self.system.bodies);
        debug!("start energy {:.9}", self.start_energy);
    }

    /// Apply `advance` exactly `steps` times. Logs only outside the loop so
    /// a timer around this call measures integration alone.
    pub(crate) fn integrate(&mut self) {
        self.enter(RunPhase::MeasuredStart, RunPhase::Integrating);
        let dt = self.params.dt;
        for _ in 0..self.steps {
            self.system.step(dt);
        }
    }

    pub(crate) fn measure_end(&mut self) {
        self.enter(RunPhase::Integrating, RunPhase::MeasuredEnd);
        self.end_energy = energy(&self.system.bodies);
        debug!("end energy {:.9} at t = {}", self.end_energy, self.system.t);
    }

    pub(crate) fn report(&mut self) -> SimulationReport {
        self.enter(RunPhase::MeasuredEnd, RunPhase::Reported);
        self.summary()
    }

    fn summary(&self) -> SimulationReport {
        SimulationReport {
            steps: self.steps,
            bodies: self.system.len(),
            start_energy: self.start_energy,
            end_energy: self.end_energy,
            verdict: Conservation::check(
                self.start_energy,
                self.end_energy,
                self.params.energy_threshold,
            ),
        }
    }

    // Only `run` and `benchmark` drive phases, always in this order
    fn enter(&mut self, from: RunPhase, to: RunPhase) {
        assert_eq!(self.phase, from, "run phase out of order");
        trace!("{:?} -> {:?}", from, to);
        self.phase = to;
    }
}

/// Run the simulation driver on `bodies` for `steps` steps.
///
/// `bodies` must not be empty. Run files and `create_system` never produce
/// an empty system.
pub fn simulate(bodies: Vec<Body>, steps: u64, params: &Parameters) -> SimulationReport {
    info!("Starting N-BODY simulation...");
    info!("Simulating {} steps with {} bodies", steps, bodies.len());

    let mut run = SimulationRun::new(bodies, steps, params.clone());
    run.run()
}
