//! Fixed-step integrator for the N-body benchmark
//!
//! Provides the momentum offset applied once before a run and the
//! first-order pairwise `advance` step (velocities first, then positions).
//!
//! The iteration order (ascending i, then ascending j > i) and the order of
//! the arithmetic inside each pair update are a compatibility contract with
//! the other backends: floating-point addition is not associative, so any
//! reordering changes the energy figures the runs are compared on.

use super::states::Body;

/// Zero the total momentum of the system by adjusting the velocity of the
/// dominant body (index 0).
///
/// Every body, including body 0 itself, contributes `v * m / m0` to the
/// correction, applied in index order. A run calls this exactly once,
/// before the first energy measurement.
pub fn offset_momentum(bodies: &mut [Body]) {
    if bodies.is_empty() {
        return;
    }
    let dominant_mass = bodies[0].m;

    for i in 0..bodies.len() {
        let p = bodies[i].v * bodies[i].m / dominant_mass;
        bodies[0].v -= p;
    }
}

/// Advance every body by one step of size `dt`.
///
/// 1. For each unordered pair (i, j), i < j, update both velocities from the
///    displacement `d = x_i - x_j` scaled by `dt / |d|^3`.
/// 2. After the full pairwise pass, drift every position by `dt * v`.
///
/// Coincident bodies produce a zero distance and non-finite velocities. That
/// is left unguarded so the energy check downstream reports it.
pub fn advance(bodies: &mut [Body], dt: f64) {
    let n = bodies.len();

    for i in 0..n {
        for j in (i + 1)..n {
            // Displacement from j to i
            let d = bodies[i].x - bodies[j].x;

            // Summed x, y, z in that order
            let d_sq = d.x * d.x + d.y * d.y + d.z * d.z;
            let dist = d_sq.sqrt();
            let mag = dt / (d_sq * dist);

            let mi = bodies[i].m;
            let mj = bodies[j].m;

            // Equal and opposite: i is pulled along -d, j along +d
            bodies[i].v -= d * mj * mag;
            bodies[j].v += d * mi * mag;
        }
    }

    // Drift: x_n+1 = x_n + dt * v_n+1
    for b in bodies.iter_mut() {
        b.x += dt * b.v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::DELTA_T;

    fn unit_pair() -> Vec<Body> {
        vec![
            Body::new([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 1.0),
            Body::new([1.0, 0.0, 0.0], [0.0, 0.0, 0.0], 1.0),
        ]
    }

    #[test]
    fn unit_pair_accelerates_toward_each_other() {
        let mut bodies = unit_pair();
        advance(&mut bodies, DELTA_T);

        // |d| = 1, so the velocity change is dt / 1.0 for unit masses
        assert_eq!(bodies[0].v.x, DELTA_T);
        assert_eq!(bodies[1].v.x, -DELTA_T);
        assert_eq!(bodies[0].v.y, 0.0);
        assert_eq!(bodies[1].v.z, 0.0);

        assert!((bodies[0].x.x - DELTA_T * DELTA_T).abs() < f64::EPSILON);
        assert!((bodies[1].x.x - (1.0 - DELTA_T * DELTA_T)).abs() < f64::EPSILON);
    }

    #[test]
    fn positions_use_updated_velocities() {
        let mut bodies = vec![
            Body::new([0.0, 0.0, 0.0], [0.0, 2.0, 0.0], 1.0),
            Body::new([0.0, 4.0, 0.0], [0.0, 0.0, 0.0], 3.0),
        ];
        advance(&mut bodies, 0.5);

        // d = (0, -4, 0), |d|^3 = 64, mag = 0.5 / 64
        let mag = 0.5 / 64.0;
        let v0 = 2.0 - (-4.0 * 3.0 * mag);
        let v1 = -4.0 * 1.0 * mag;
        assert_eq!(bodies[0].v.y, v0);
        assert_eq!(bodies[1].v.y, v1);
        assert_eq!(bodies[0].x.y, 0.5 * v0);
        assert_eq!(bodies[1].x.y, 4.0 + 0.5 * v1);
    }

    #[test]
    fn coincident_bodies_go_non_finite() {
        let mut bodies = vec![
            Body::new([0.5, 0.5, 0.5], [0.0, 0.0, 0.0], 1.0),
            Body::new([0.5, 0.5, 0.5], [0.0, 0.0, 0.0], 1.0),
        ];
        advance(&mut bodies, DELTA_T);

        assert!(!bodies[0].v.x.is_finite());
        assert!(!bodies[1].x.x.is_finite());
    }

    #[test]
    fn single_body_drifts_freely() {
        let mut bodies = vec![Body::new([1.0, 2.0, 3.0], [1.0, -1.0, 0.5], 2.0)];
        advance(&mut bodies, 0.25);

        assert_eq!(bodies[0].v, crate::NVec3::new(1.0, -1.0, 0.5));
        assert_eq!(bodies[0].x, crate::NVec3::new(1.25, 1.75, 3.125));
    }

    #[test]
    fn offset_momentum_zeroes_total_momentum() {
        let mut bodies = vec![
            Body::at_rest(10.0),
            Body::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 1.0),
            Body::new([-2.0, 0.0, 0.0], [0.5, 0.0, -1.0], 2.0),
        ];
        offset_momentum(&mut bodies);

        let p = bodies.iter().fold(crate::NVec3::zeros(), |acc, b| acc + b.v * b.m);
        assert!(p.norm() < 1e-12, "net momentum not zero: {:?}", p);
    }
}
