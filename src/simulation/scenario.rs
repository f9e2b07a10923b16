//! Build initial systems for a run
//!
//! Three sources of bodies:
//! - the canonical 5-body Sun/Jupiter/Saturn/Uranus/Neptune configuration,
//! - `n` bodies generated at random around a solar-mass body,
//! - an explicit body list from a YAML run file (`BodyConfig`)
//!
//! The canonical literals are shared with the other backends and must stay
//! bit-for-bit identical.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::BodyConfig;
use crate::simulation::params::{BASE_MASS_UNIT, DAYS_PER_YEAR, SOLAR_MASS};
use crate::simulation::states::{Body, NVec3};

/// Immutable initial state of a body. Runs always receive copies made with
/// [`BodyTemplate::to_body`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTemplate {
    pub x: [f64; 3],
    pub v: [f64; 3],
    pub m: f64,
}

impl BodyTemplate {
    pub fn to_body(&self) -> Body {
        Body::new(self.x, self.v, self.m)
    }
}

/// Template for the dominant body: at rest at the origin with one solar mass
pub const SUN: BodyTemplate = BodyTemplate {
    x: [0.0, 0.0, 0.0],
    v: [0.0, 0.0, 0.0],
    m: SOLAR_MASS,
};

pub const JUPITER: BodyTemplate = BodyTemplate {
    x: [
        4.84143144246472090e00,
        -1.16032004402742839e00,
        -1.03622044471123109e-01,
    ],
    v: [
        1.66007664274403694e-03 * DAYS_PER_YEAR,
        7.69901118419740425e-03 * DAYS_PER_YEAR,
        -6.90460016972063023e-05 * DAYS_PER_YEAR,
    ],
    m: 9.54791938424326609e-04 * SOLAR_MASS,
};

pub const SATURN: BodyTemplate = BodyTemplate {
    x: [
        8.34336671824457987e00,
        4.12479856412430479e00,
        -4.03523417114321381e-01,
    ],
    v: [
        -2.76742510726862411e-03 * DAYS_PER_YEAR,
        4.99852801234917238e-03 * DAYS_PER_YEAR,
        2.30417297573763929e-05 * DAYS_PER_YEAR,
    ],
    m: 2.85885980666130812e-04 * SOLAR_MASS,
};

pub const URANUS: BodyTemplate = BodyTemplate {
    x: [
        1.28943695621391310e01,
        -1.51111514016986312e01,
        -2.23307578892655734e-01,
    ],
    v: [
        2.96460137564761618e-03 * DAYS_PER_YEAR,
        2.37847173959480950e-03 * DAYS_PER_YEAR,
        -2.96589568540237556e-05 * DAYS_PER_YEAR,
    ],
    m: 4.36624404335156298e-05 * SOLAR_MASS,
};

pub const NEPTUNE: BodyTemplate = BodyTemplate {
    x: [
        1.53796971148509165e01,
        -2.59193146099879641e01,
        1.79258772950371181e-01,
    ],
    v: [
        2.68067772490389322e-03 * DAYS_PER_YEAR,
        1.62824170038242295e-03 * DAYS_PER_YEAR,
        -9.51592254519715870e-05 * DAYS_PER_YEAR,
    ],
    m: 5.15138902046611451e-05 * SOLAR_MASS,
};

/// Fresh copy of the canonical 5-body configuration
pub fn canonical_system() -> Vec<Body> {
    [SUN, JUPITER, SATURN, URANUS, NEPTUNE]
        .iter()
        .map(BodyTemplate::to_body)
        .collect()
}

/// Generate `n` bodies: the Sun at index 0 followed by `n - 1` bodies with
/// position and velocity components uniform in [-1, 1] and mass
/// `BASE_MASS_UNIT * uniform(0.1, 1.0)`.
///
/// `n == 0` is treated as 1 (the Sun alone); callers validate `n >= 1`.
pub fn random_system<R: Rng + ?Sized>(n: u32, rng: &mut R) -> Vec<Body> {
    let satellites = n.saturating_sub(1) as usize;
    let mut bodies = Vec::with_capacity(satellites + 1);

    bodies.push(SUN.to_body());
    for _ in 0..satellites {
        let x = NVec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        let v = NVec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        let m = BASE_MASS_UNIT * rng.random_range(0.1..=1.0);

        bodies.push(Body { x, v, m });
    }

    bodies
}

/// Initial bodies for a run: canonical when `n` is `None`, random otherwise
/// (seeded from OS entropy)
pub fn create_system(n: Option<u32>) -> Vec<Body> {
    create_system_seeded(n, None)
}

/// Like [`create_system`], with an optional seed for reproducible random systems
pub fn create_system_seeded(n: Option<u32>, seed: Option<u64>) -> Vec<Body> {
    match n {
        None => canonical_system(),
        Some(n) => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            random_system(n, &mut rng)
        }
    }
}

/// Where the initial bodies of a run come from
#[derive(Debug, Clone, PartialEq)]
pub enum SystemSource {
    Canonical,
    Random { count: u32 },
    Explicit(Vec<Body>),
}

impl SystemSource {
    /// `None` selects the canonical configuration
    pub fn from_count(n: Option<u32>) -> Self {
        match n {
            None => SystemSource::Canonical,
            Some(count) => SystemSource::Random { count },
        }
    }

    /// Fresh bodies for one run. Explicit lists are copied, never shared.
    pub fn build(&self, seed: Option<u64>) -> Vec<Body> {
        match self {
            SystemSource::Canonical => canonical_system(),
            SystemSource::Random { count } => create_system_seeded(Some(*count), seed),
            SystemSource::Explicit(bodies) => bodies.clone(),
        }
    }
}

/// Map YAML body configs to runtime bodies. Shape and mass are validated when
/// the run config is resolved.
pub fn system_from_config(bodies: &[BodyConfig]) -> Vec<Body> {
    bodies
        .iter()
        .map(|bc: &BodyConfig| Body {
            x: NVec3::new(bc.x[0], bc.x[1], bc.x[2]),
            v: NVec3::new(bc.v[0], bc.v[1], bc.v[2]),
            m: bc.m,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_has_sun_first() {
        let bodies = canonical_system();
        assert_eq!(bodies.len(), 5);
        assert_eq!(bodies[0], SUN.to_body());
        assert!(bodies.iter().skip(1).all(|b| b.m < bodies[0].m));
    }

    #[test]
    fn random_system_shape_and_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let bodies = random_system(64, &mut rng);

        assert_eq!(bodies.len(), 64);
        assert_eq!(bodies[0], SUN.to_body());
        for b in &bodies[1..] {
            assert!(b.x.iter().all(|c| (-1.0..=1.0).contains(c)));
            assert!(b.v.iter().all(|c| (-1.0..=1.0).contains(c)));
            let r = b.m / BASE_MASS_UNIT;
            assert!(b.m > 0.0);
            assert!((0.1 - 1e-12..=1.0 + 1e-12).contains(&r), "mass factor {r}");
        }
    }

    #[test]
    fn random_system_does_not_alias_the_sun_template() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bodies = random_system(3, &mut rng);
        bodies[0].v.x = 42.0;

        assert_eq!(SUN.v[0], 0.0);
        assert_eq!(random_system(3, &mut rng)[0], SUN.to_body());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = create_system_seeded(Some(10), Some(99));
        let b = create_system_seeded(Some(10), Some(99));
        let c = create_system_seeded(Some(10), Some(100));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn zero_or_one_body_is_just_the_sun() {
        assert_eq!(create_system_seeded(Some(1), Some(3)), vec![SUN.to_body()]);
        assert_eq!(create_system_seeded(Some(0), Some(3)), vec![SUN.to_body()]);
    }

    #[test]
    fn source_builds_fresh_copies() {
        let src = SystemSource::Explicit(vec![Body::at_rest(2.0)]);
        let mut a = src.build(None);
        a[0].m = 5.0;

        assert_eq!(src.build(None)[0].m, 2.0);
        assert_eq!(SystemSource::from_count(None).build(Some(1)), canonical_system());
        assert_eq!(SystemSource::from_count(Some(4)).build(Some(1)).len(), 4);
    }

    #[test]
    fn no_count_gives_canonical() {
        assert_eq!(create_system(None), canonical_system());
    }
}
