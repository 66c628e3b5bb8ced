//! BB84 key agreement over a simulated noiseless channel.
//!
//! The engine runs exactly `target_key_length` rounds and keeps the sender's
//! bit from every round where both bases agree. Roughly half the rounds are
//! discarded, so the shared key comes out at about half the requested
//! length.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bb84_states::QubitEvent;
use crate::bit_source::BitSource;
use crate::error::{LabError, Result};

/// QBER (in percent) at or above which a key is reported as compromised.
pub const QBER_SECURITY_THRESHOLD_PERCENT: f64 = 11.0;

/// Upper bound on the key buffer reserved up front; longer keys grow it
/// on demand.
const KEY_CAPACITY_HINT: usize = 1 << 20;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityLevel {
    High,
    Compromised,
}

/// Outcome of one key agreement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedKeyResult {
    pub retained_bits: Vec<bool>,
    /// Percentage of retained rounds whose measurement disagreed with the
    /// sent bit, in `[0, 100]`.
    pub error_rate_percent: f64,
    pub rounds: usize,
    pub mismatches: usize,
}

impl SharedKeyResult {
    pub fn len(&self) -> usize {
        self.retained_bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.retained_bits.is_empty()
    }

    pub fn key_binary(&self) -> String {
        bits_to_binary(&self.retained_bits)
    }

    /// Lower-case hex of the key read as one big-endian integer, without
    /// leading zeros. An empty or all-zero key renders as `"0"`.
    pub fn key_hex(&self) -> String {
        bits_to_hex(&self.retained_bits)
    }

    /// Fraction of exchanged qubits that ended up in the key.
    pub fn efficiency(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.retained_bits.len() as f64 / self.rounds as f64
        }
    }

    pub fn security_level(&self) -> SecurityLevel {
        if self.error_rate_percent < QBER_SECURITY_THRESHOLD_PERCENT {
            SecurityLevel::High
        } else {
            SecurityLevel::Compromised
        }
    }
}

/// Runs BB84 rounds and reconciles bases.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeyAgreementEngine {
    noise_probability: f64,
}

impl KeyAgreementEngine {
    /// Noiseless channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip each measured bit with probability `p` in transit.
    pub fn with_noise(p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(LabError::InvalidArgument(format!(
                "noise probability must lie in [0, 1], got {}",
                p
            )));
        }
        Ok(Self {
            noise_probability: p,
        })
    }

    pub fn noise_probability(&self) -> f64 {
        self.noise_probability
    }

    pub fn run_key_agreement<S: BitSource + ?Sized>(
        &self,
        target_key_length: usize,
        source: &mut S,
    ) -> Result<SharedKeyResult> {
        if target_key_length == 0 {
            return Err(LabError::InvalidArgument(
                "target key length must be positive".into(),
            ));
        }

        let mut retained_bits = Vec::with_capacity(retained_capacity(target_key_length));
        let mut mismatches = 0usize;

        for _ in 0..target_key_length {
            let event = QubitEvent::run(source, self.noise_probability);
            if !event.bases_match() {
                continue;
            }
            retained_bits.push(event.sender_bit);
            if event.is_error() {
                mismatches += 1;
            }
        }

        let error_rate_percent = 100.0 * mismatches as f64 / retained_bits.len().max(1) as f64;
        debug!(
            "BB84: {} rounds, {} bits retained, {} mismatches",
            target_key_length,
            retained_bits.len(),
            mismatches
        );

        Ok(SharedKeyResult {
            retained_bits,
            error_rate_percent,
            rounds: target_key_length,
            mismatches,
        })
    }
}

/// About half the rounds survive sifting.
fn retained_capacity(target_key_length: usize) -> usize {
    (target_key_length / 2 + 1).min(KEY_CAPACITY_HINT)
}

/// Run a noiseless key agreement.
pub fn run_key_agreement<S: BitSource + ?Sized>(
    target_key_length: usize,
    source: &mut S,
) -> Result<SharedKeyResult> {
    KeyAgreementEngine::new().run_key_agreement(target_key_length, source)
}

pub fn bits_to_binary(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Hex of `bits` read as one big-endian integer, leading zeros dropped.
pub(crate) fn bits_to_hex(bits: &[bool]) -> String {
    let first_one = match bits.iter().position(|&b| b) {
        Some(i) => i,
        None => return "0".to_string(),
    };
    let significant = &bits[first_one..];
    let pad = (4 - significant.len() % 4) % 4;
    let padded: Vec<bool> = std::iter::repeat(false)
        .take(pad)
        .chain(significant.iter().copied())
        .collect();
    padded
        .chunks(4)
        .map(|nibble| {
            let value = nibble
                .iter()
                .fold(0u32, |acc, &bit| (acc << 1) | bit as u32);
            // a nibble is always < 16
            std::char::from_digit(value, 16).unwrap_or('0')
        })
        .collect()
}
