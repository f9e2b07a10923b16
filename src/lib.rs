pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod runner;
pub mod error;

pub use simulation::states::{Body, System, NVec3};
pub use simulation::params::{Parameters, SOLAR_MASS, DAYS_PER_YEAR, DELTA_T, ENERGY_DIFF_THRESHOLD, BASE_MASS_UNIT};
pub use simulation::integrator::{advance, offset_momentum};
pub use simulation::energy::energy;
pub use simulation::scenario::{create_system, create_system_seeded, canonical_system, SystemSource};
pub use simulation::driver::{simulate, Conservation, RunPhase, SimulationReport, SimulationRun};

pub use configuration::config::{RunConfig, BodyConfig};

pub use benchmark::benchmark::{benchmark, bench_steps_curve, print_steps_curve, BenchmarkReport};

pub use runner::{run, Language, NBodyNative, NBodyParams, Outcome, Problem, ProblemType};

pub use error::{Error, Result};
