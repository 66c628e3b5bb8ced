//! Single-qubit state vector.
//!
//! Just enough linear algebra to prepare a basis state, push it through a
//! handful of one-qubit gates and measure it in the computational basis.
//! The only source of randomness is the [`BitSource`] passed to
//! [`Qubit::measure`].

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::bit_source::BitSource;

/// A single-qubit 2x2 matrix stored as [row0col0, row0col1, row1col0, row1col1].
pub type Matrix2x2 = [Complex64; 4];

/// Probabilities closer than this to 0, 1 or 1/2 are snapped to them.
const PROBABILITY_EPSILON: f64 = 1e-9;

/// Rotation axis of a single-qubit rotation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// A rotation by `angle` radians about `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationGate {
    pub axis: Axis,
    pub angle: f64,
}

impl RotationGate {
    pub const fn new(axis: Axis, angle: f64) -> Self {
        Self { axis, angle }
    }

    pub fn matrix(&self) -> Matrix2x2 {
        let (s, c) = (self.angle / 2.0).sin_cos();
        let zero = Complex64::new(0.0, 0.0);
        match self.axis {
            // [[cos, -i sin], [-i sin, cos]]
            Axis::X => [
                Complex64::new(c, 0.0),
                Complex64::new(0.0, -s),
                Complex64::new(0.0, -s),
                Complex64::new(c, 0.0),
            ],
            // [[cos, -sin], [sin, cos]]
            Axis::Y => [
                Complex64::new(c, 0.0),
                Complex64::new(-s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(c, 0.0),
            ],
            // diag(e^{-iθ/2}, e^{iθ/2})
            Axis::Z => [
                Complex64::new(c, -s),
                zero,
                zero,
                Complex64::new(c, s),
            ],
        }
    }
}

/// Amplitudes (α, β) of α|0⟩ + β|1⟩.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Qubit {
    amplitudes: [Complex64; 2],
}

impl Default for Qubit {
    fn default() -> Self {
        Self::zero()
    }
}

impl Qubit {
    /// |0⟩
    pub fn zero() -> Self {
        Self {
            amplitudes: [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
        }
    }

    /// |0⟩ for `false`, |1⟩ for `true`.
    pub fn prepare(bit: bool) -> Self {
        let qubit = Self::zero();
        if bit {
            qubit.x()
        } else {
            qubit
        }
    }

    pub fn amplitudes(&self) -> [Complex64; 2] {
        self.amplitudes
    }

    pub fn apply_matrix(self, m: &Matrix2x2) -> Self {
        let [a, b] = self.amplitudes;
        Self {
            amplitudes: [m[0] * a + m[1] * b, m[2] * a + m[3] * b],
        }
    }

    /// Pauli-X (bit flip).
    pub fn x(self) -> Self {
        let [a, b] = self.amplitudes;
        Self { amplitudes: [b, a] }
    }

    /// Hadamard.
    pub fn h(self) -> Self {
        let [a, b] = self.amplitudes;
        Self {
            amplitudes: [(a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2],
        }
    }

    pub fn rotate(self, gate: RotationGate) -> Self {
        self.apply_matrix(&gate.matrix())
    }

    pub fn rx(self, angle: f64) -> Self {
        self.rotate(RotationGate::new(Axis::X, angle))
    }

    pub fn ry(self, angle: f64) -> Self {
        self.rotate(RotationGate::new(Axis::Y, angle))
    }

    pub fn rz(self, angle: f64) -> Self {
        self.rotate(RotationGate::new(Axis::Z, angle))
    }

    /// Probability of reading `1` in the computational basis.
    pub fn probability_one(&self) -> f64 {
        let [a, b] = self.amplitudes;
        let total = a.norm_sqr() + b.norm_sqr();
        if total <= 0.0 {
            return 0.0;
        }
        b.norm_sqr() / total
    }

    /// Measure in the computational basis.
    ///
    /// Basis states are read without consuming randomness, an equal
    /// superposition costs exactly one fair coin, and anything else costs
    /// one unit draw.
    pub fn measure<S: BitSource + ?Sized>(&self, source: &mut S) -> bool {
        let p = self.probability_one();
        if p < PROBABILITY_EPSILON {
            false
        } else if p > 1.0 - PROBABILITY_EPSILON {
            true
        } else if (p - 0.5).abs() < PROBABILITY_EPSILON {
            source.next_bit()
        } else {
            source.next_unit() < p
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_source::{ScriptedBitSource, SeededBitSource};
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn prepared_basis_states_measure_deterministically() {
        let mut source = ScriptedBitSource::constant(true);
        assert!(!Qubit::prepare(false).measure(&mut source));
        assert!(Qubit::prepare(true).measure(&mut source));
        assert_eq!(source.bits_drawn(), 0);
        assert_eq!(source.units_drawn(), 0);
    }

    #[test]
    fn hadamard_is_self_inverse() {
        for bit in [false, true] {
            let q = Qubit::prepare(bit).h().h();
            assert_eq!(q.measure(&mut ScriptedBitSource::default()), bit);
        }
    }

    #[test]
    fn superposition_uses_one_fair_coin() {
        let mut source = ScriptedBitSource::from_bit_str("1");
        assert!(Qubit::zero().h().measure(&mut source));
        assert_eq!(source.bits_drawn(), 1);
        assert_eq!(source.units_drawn(), 0);
    }

    #[test]
    fn hadamard_splits_amplitudes_evenly() {
        let [a, b] = Qubit::zero().h().amplitudes();
        assert!(close(a.re, FRAC_1_SQRT_2) && close(a.im, 0.0));
        assert!(close(b.re, FRAC_1_SQRT_2) && close(b.im, 0.0));

        let [a, b] = Qubit::prepare(true).h().amplitudes();
        assert!(close(a.re, FRAC_1_SQRT_2));
        assert!(close(b.re, -FRAC_1_SQRT_2));
    }

    #[test]
    fn ry_quarter_turn_probability() {
        let p = Qubit::zero().ry(PI / 4.0).probability_one();
        assert!(close(p, (PI / 8.0).sin().powi(2)));
    }

    #[test]
    fn rx_matches_ry_in_probability() {
        let px = Qubit::zero().rx(PI / 3.0).probability_one();
        let py = Qubit::zero().ry(PI / 3.0).probability_one();
        assert!(close(px, py));
        assert!(close(px, 0.25));
    }

    #[test]
    fn rz_only_changes_phase() {
        let q = Qubit::prepare(true).rz(PI / 4.0);
        assert!(close(q.probability_one(), 1.0));
    }

    #[test]
    fn rotation_matrices_are_unitary() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let m = RotationGate::new(axis, 0.7).matrix();
            // columns have unit norm and are orthogonal
            let c0 = m[0].norm_sqr() + m[2].norm_sqr();
            let c1 = m[1].norm_sqr() + m[3].norm_sqr();
            let dot = m[0].conj() * m[1] + m[2].conj() * m[3];
            assert!(close(c0, 1.0));
            assert!(close(c1, 1.0));
            assert!(dot.norm() < 1e-10);
        }
    }

    #[test]
    fn biased_measurement_frequency() {
        let mut source = SeededBitSource::seeded(11);
        let q = Qubit::zero().ry(PI / 4.0);
        let trials = 20_000;
        let ones = (0..trials).filter(|_| q.measure(&mut source)).count();
        let ratio = ones as f64 / trials as f64;
        assert!((ratio - q.probability_one()).abs() < 0.02, "ratio was {}", ratio);
    }
}
