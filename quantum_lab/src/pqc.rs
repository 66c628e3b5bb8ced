//! Toy post-quantum profiles and the reversible text envelope.
//!
//! [`transform`] is the circuit-demo path: each profile rotates every message
//! qubit by a fixed gate before measuring, producing plaintext-dependent
//! noise. It is not a cipher and cannot be inverted.
//!
//! [`encrypt`]/[`decrypt`] are what the cryptography endpoints expose:
//! base64 of `message + "_" + algorithm`, split back on the first `_`.
//! A message that itself contains `_` comes back truncated at its own
//! first underscore.

use std::f64::consts::PI;
use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::bit_source::BitSource;
use crate::error::{LabError, Result};
use crate::qubit::{Axis, Qubit, RotationGate};

pub const KYBER_ROTATION: RotationGate = RotationGate::new(Axis::Y, PI / 4.0);
pub const DILITHIUM_ROTATION: RotationGate = RotationGate::new(Axis::X, PI / 3.0);
pub const SPHINCS_ROTATION: RotationGate = RotationGate::new(Axis::Y, PI / 2.0);
/// Applied between two Hadamards so the phase shows up in the measurement.
pub const FALCON_ROTATION: RotationGate = RotationGate::new(Axis::Z, PI / 4.0);

const ENVELOPE_SEPARATOR: char = '_';

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmProfile {
    Kyber,
    Dilithium,
    Sphincs,
    Falcon,
}

impl AlgorithmProfile {
    pub const ALL: [AlgorithmProfile; 4] = [
        AlgorithmProfile::Kyber,
        AlgorithmProfile::Dilithium,
        AlgorithmProfile::Sphincs,
        AlgorithmProfile::Falcon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmProfile::Kyber => "CRYSTALS-Kyber",
            AlgorithmProfile::Dilithium => "CRYSTALS-Dilithium",
            AlgorithmProfile::Sphincs => "SPHINCS+",
            AlgorithmProfile::Falcon => "FALCON",
        }
    }

    /// Case-insensitive; accepts the display name or the short name.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "crystals-kyber" | "kyber" => Some(AlgorithmProfile::Kyber),
            "crystals-dilithium" | "dilithium" => Some(AlgorithmProfile::Dilithium),
            "sphincs+" | "sphincs" => Some(AlgorithmProfile::Sphincs),
            "falcon" => Some(AlgorithmProfile::Falcon),
            _ => None,
        }
    }

    pub fn rotation(&self) -> RotationGate {
        match self {
            AlgorithmProfile::Kyber => KYBER_ROTATION,
            AlgorithmProfile::Dilithium => DILITHIUM_ROTATION,
            AlgorithmProfile::Sphincs => SPHINCS_ROTATION,
            AlgorithmProfile::Falcon => FALCON_ROTATION,
        }
    }

    fn apply(&self, qubit: Qubit) -> Qubit {
        match self.rotation() {
            gate @ RotationGate { axis: Axis::Z, .. } => qubit.h().rotate(gate).h(),
            gate => qubit.rotate(gate),
        }
    }
}

impl fmt::Display for AlgorithmProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per message bit: prepare, rotate by the profile's gate, measure.
pub fn transform<S: BitSource + ?Sized>(
    message_bits: &[bool],
    profile: AlgorithmProfile,
    source: &mut S,
) -> Vec<bool> {
    let out: Vec<bool> = message_bits
        .iter()
        .map(|&bit| profile.apply(Qubit::prepare(bit)).measure(source))
        .collect();
    debug!("{} transform over {} bits", profile, out.len());
    out
}

pub fn encrypt(message: &str, algorithm: &str) -> String {
    BASE64.encode(format!("{}{}{}", message, ENVELOPE_SEPARATOR, algorithm))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptedMessage {
    pub message: String,
    pub algorithm: String,
}

pub fn decrypt(ciphertext: &str) -> Result<DecryptedMessage> {
    let raw = BASE64
        .decode(ciphertext.trim())
        .map_err(|e| LabError::MalformedInput(format!("invalid base64: {}", e)))?;
    let text = String::from_utf8(raw)
        .map_err(|e| LabError::MalformedInput(format!("payload is not UTF-8: {}", e)))?;
    let (message, algorithm) = text
        .split_once(ENVELOPE_SEPARATOR)
        .ok_or_else(|| LabError::MalformedInput("missing algorithm separator".into()))?;
    Ok(DecryptedMessage {
        message: message.to_string(),
        algorithm: algorithm.to_string(),
    })
}
