//! Core state types for the N-body benchmark.
//!
//! - `Body`   a point mass with 3D position/velocity (`NVec3`)
//! - `System` the ordered collection of bodies plus elapsed simulated time
//!
//! Index 0 of a system is reserved for the dominant mass (the "Sun"); it is
//! the body whose velocity absorbs the momentum offset.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64,   // mass, strictly positive
}

impl Body {
    pub fn new(x: [f64; 3], v: [f64; 3], m: f64) -> Self {
        Self {
            x: NVec3::from(x),
            v: NVec3::from(v),
            m,
        }
    }

    /// Body at rest at the origin
    pub fn at_rest(m: f64) -> Self {
        Self {
            x: NVec3::zeros(),
            v: NVec3::zeros(),
            m,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // bodies[0] is the dominant mass
    pub t: f64,            // simulated time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Advance the system by one step of `dt` and bump the simulated time
    pub fn step(&mut self, dt: f64) {
        super::integrator::advance(&mut self.bodies, dt);
        self.t += dt;
    }
}
