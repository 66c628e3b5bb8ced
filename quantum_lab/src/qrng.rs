//! Random bits from measured superpositions.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bb84::bits_to_binary;
use crate::bit_source::BitSource;
use crate::error::{LabError, Result};
use crate::qubit::Qubit;

/// Only this many leading bits feed the decimal and hex renderings.
pub const DECIMAL_PREFIX_BITS: usize = 32;

pub const QRNG_SOURCE_LABEL: &str = "Quantum Superposition";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomBitsResult {
    pub bits: Vec<bool>,
    /// The first `min(32, len)` bits read as an unsigned big-endian integer.
    pub decimal_value: u32,
    /// Upper-case hex of `decimal_value`.
    pub hex_value: String,
}

impl RandomBitsResult {
    /// Derive the decimal and hex views from raw bits.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        let decimal_value = bits
            .iter()
            .take(DECIMAL_PREFIX_BITS)
            .fold(0u32, |acc, &bit| (acc << 1) | bit as u32);
        let hex_value = format!("{:X}", decimal_value);
        Self {
            bits,
            decimal_value,
            hex_value,
        }
    }

    pub fn binary(&self) -> String {
        bits_to_binary(&self.bits)
    }

    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// A measured fair superposition carries one bit of entropy per qubit.
    pub fn entropy_bits(&self) -> usize {
        self.bits.len()
    }

    pub fn source(&self) -> &'static str {
        QRNG_SOURCE_LABEL
    }
}

/// Prepare |0⟩, apply H, measure; repeat `bit_count` times.
pub fn generate_random_bits<S: BitSource + ?Sized>(
    bit_count: usize,
    source: &mut S,
) -> Result<RandomBitsResult> {
    if bit_count == 0 {
        return Err(LabError::InvalidArgument(
            "bit count must be positive".into(),
        ));
    }

    let bits: Vec<bool> = (0..bit_count)
        .map(|_| Qubit::zero().h().measure(source))
        .collect();
    let result = RandomBitsResult::from_bits(bits);
    debug!(
        "QRNG: {} bits, prefix value {:#X}",
        bit_count, result.decimal_value
    );
    Ok(result)
}
