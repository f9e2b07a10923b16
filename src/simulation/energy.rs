//! Total-energy diagnostic used as the correctness oracle of a run

use super::states::Body;

/// Total energy of the system: kinetic minus pairwise potential (G = 1).
///
/// Terms are accumulated per body: its kinetic energy `0.5 * m * |v|^2`,
/// then `m_i * m_j / r_ij` subtracted for every j > i. Non-finite positions
/// or velocities come straight through in the result.
pub fn energy(bodies: &[Body]) -> f64 {
    let n = bodies.len();
    let mut e = 0.0;

    for i in 0..n {
        let bi = &bodies[i];
        let v = bi.v;
        e += 0.5 * bi.m * (v.x * v.x + v.y * v.y + v.z * v.z);

        for bj in &bodies[(i + 1)..] {
            let d = bi.x - bj.x;
            let dist = (d.x * d.x + d.y * d.y + d.z * d.z).sqrt();
            e -= (bi.m * bj.m) / dist;
        }
    }

    e
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_body_is_pure_kinetic() {
        let bodies = vec![Body::new([3.0, 0.0, 0.0], [1.0, 2.0, 2.0], 4.0)];
        assert_eq!(energy(&bodies), 0.5 * 4.0 * 9.0);
    }

    #[test]
    fn resting_pair_is_pure_potential() {
        let bodies = vec![
            Body::new([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 2.0),
            Body::new([0.0, 0.0, 4.0], [0.0, 0.0, 0.0], 3.0),
        ];
        assert_eq!(energy(&bodies), -6.0 / 4.0);
    }

    #[test]
    fn empty_system_has_zero_energy() {
        assert_eq!(energy(&[]), 0.0);
    }

    #[test]
    fn pair_order_does_not_matter() {
        let bodies = vec![
            Body::new([0.0, 0.0, 0.0], [0.1, 0.0, 0.0], 5.0),
            Body::new([1.0, 2.0, 0.0], [0.0, -0.3, 0.2], 0.5),
            Body::new([-1.5, 0.5, 3.0], [0.4, 0.4, 0.0], 1.25),
            Body::new([2.0, -1.0, -1.0], [0.0, 0.0, -0.7], 0.75),
        ];
        let mut reversed = bodies.clone();
        reversed.reverse();

        let a = energy(&bodies);
        let b = energy(&reversed);
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn coincident_pair_is_not_finite() {
        let bodies = vec![
            Body::new([1.0, 1.0, 1.0], [0.0, 0.0, 0.0], 1.0),
            Body::new([1.0, 1.0, 1.0], [0.0, 0.0, 0.0], 1.0),
        ];
        assert!(!energy(&bodies).is_finite());
    }
}
