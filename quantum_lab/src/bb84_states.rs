use serde::{Deserialize, Serialize};

use crate::bit_source::BitSource;
use crate::qubit::Qubit;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basis {
    /// Computational basis, |0⟩ and |1⟩.
    Rectilinear,
    /// Hadamard basis, |+⟩ and |−⟩.
    Diagonal,
}

impl Basis {
    pub fn random<S: BitSource + ?Sized>(source: &mut S) -> Self {
        if source.next_bit() {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }

    /// Rotate into (or out of) this basis.
    fn apply(self, qubit: Qubit) -> Qubit {
        match self {
            Basis::Rectilinear => qubit,
            Basis::Diagonal => qubit.h(),
        }
    }
}

/// One simulated BB84 round: what was sent, how it was sent, how it was
/// read and what came out.
///
/// When both parties pick the same basis the measured bit always equals the
/// sent bit unless channel noise flipped it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitEvent {
    pub sender_bit: bool,
    pub sender_basis: Basis,
    pub receiver_basis: Basis,
    pub measured_bit: bool,
}

impl QubitEvent {
    /// Run one round.
    ///
    /// Draw order is fixed: sender bit, sender basis, receiver basis, then a
    /// measurement coin only when the bases differ, then a noise draw only
    /// when `0 < noise_probability < 1`.
    pub fn run<S: BitSource + ?Sized>(source: &mut S, noise_probability: f64) -> Self {
        let sender_bit = source.next_bit();
        let sender_basis = Basis::random(source);
        let receiver_basis = Basis::random(source);

        let in_flight = sender_basis.apply(Qubit::prepare(sender_bit));
        let measured = receiver_basis.apply(in_flight).measure(source);
        let measured_bit = if source.bernoulli(noise_probability) {
            !measured
        } else {
            measured
        };

        QubitEvent {
            sender_bit,
            sender_basis,
            receiver_basis,
            measured_bit,
        }
    }

    pub fn bases_match(&self) -> bool {
        self.sender_basis == self.receiver_basis
    }

    pub fn is_error(&self) -> bool {
        self.measured_bit != self.sender_bit
    }
}
