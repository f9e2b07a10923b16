pub mod states;
pub mod params;
pub mod integrator;
pub mod energy;
pub mod scenario;
pub mod driver;
