//! Configuration types for an n-body run.
//!
//! A run is configured from command-line options, optionally layered on top
//! of a YAML run file. Both land in a [`RunConfig`]; command-line values win.
//! [`RunConfig::resolve`] validates everything and produces the
//! [`NBodyParams`] handed to the dispatcher. No body is created before
//! validation succeeds.
//!
//! # YAML format
//!
//! ```yaml
//! language: rust       # python | rust | mojo (required here or on the CLI)
//! steps: 1000          # default 100
//! bench: true          # run the timed driver
//! bodies: 50           # random system of 50 bodies (omit for the 5-body default)
//! seed: 42             # reproducible random systems
//! strict: false        # non-conservation -> non-zero exit code
//! ```
//!
//! Instead of `bodies`, an explicit initial state may be given. Index 0 is the
//! dominant body:
//!
//! ```yaml
//! language: rust
//! system:
//!   - x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]
//!     m: 39.47841760435743
//!   - x: [1.0, 0.0, 0.0]
//!     v: [0.0, 6.28, 0.0]
//!     m: 1.0e-3
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::runner::{Language, NBodyParams};
use crate::simulation::params::{Parameters, DEFAULT_STEPS};
use crate::simulation::scenario::{system_from_config, SystemSource};

/// Initial state of one body in a run file
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub x: Vec<f64>, // position, 3 components
    pub v: Vec<f64>, // velocity, 3 components
    pub m: f64,      // mass, strictly positive
}

/// Unvalidated options from a run file and/or the command line
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub language: Option<String>,
    pub steps: Option<u64>,
    pub bench: Option<bool>,
    pub bodies: Option<u32>,
    pub seed: Option<u64>,
    pub strict: Option<bool>,
    pub system: Option<Vec<BodyConfig>>,
}

impl RunConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Layer `overrides` on top of `self`; any value set in `overrides` wins
    pub fn merge(self, overrides: RunConfig) -> RunConfig {
        RunConfig {
            language: overrides.language.or(self.language),
            steps: overrides.steps.or(self.steps),
            bench: overrides.bench.or(self.bench),
            bodies: overrides.bodies.or(self.bodies),
            seed: overrides.seed.or(self.seed),
            strict: overrides.strict.or(self.strict),
            system: overrides.system.or(self.system),
        }
    }

    /// Validate and fill defaults. The language is checked first so an
    /// unsupported tag is reported before anything else.
    pub fn resolve(self) -> Result<NBodyParams> {
        let language: Language = match self.language {
            Some(tag) => tag.parse()?,
            None => {
                return Err(Error::invalid_option(
                    "language",
                    "<missing>",
                    format!("required, one of {}", Language::valid_set()),
                ))
            }
        };

        let system = match (self.bodies, self.system) {
            (Some(count), Some(_)) => {
                return Err(Error::invalid_option(
                    "bodies",
                    count,
                    "cannot be combined with an explicit system",
                ))
            }
            (Some(0), None) => {
                return Err(Error::invalid_option("bodies", 0, "must be a positive integer"))
            }
            (Some(count), None) => SystemSource::Random { count },
            (None, Some(bodies)) => {
                validate_bodies(&bodies)?;
                SystemSource::Explicit(system_from_config(&bodies))
            }
            (None, None) => SystemSource::Canonical,
        };

        Ok(NBodyParams {
            language,
            steps: self.steps.unwrap_or(DEFAULT_STEPS),
            bench: self.bench.unwrap_or(false),
            system,
            parameters: Parameters::default().with_seed(self.seed),
            strict: self.strict.unwrap_or(false),
        })
    }
}

fn validate_bodies(bodies: &[BodyConfig]) -> Result<()> {
    if bodies.is_empty() {
        return Err(Error::invalid_option("system", "[]", "needs at least one body"));
    }

    for (i, b) in bodies.iter().enumerate() {
        if b.x.len() != 3 || b.v.len() != 3 {
            return Err(Error::invalid_option(
                "system",
                format!("body {i}"),
                "position and velocity need exactly 3 components",
            ));
        }
        if !(b.m > 0.0 && b.m.is_finite()) {
            return Err(Error::invalid_option(
                "system",
                format!("body {i} mass {}", b.m),
                "mass must be strictly positive",
            ));
        }
    }
    Ok(())
}
