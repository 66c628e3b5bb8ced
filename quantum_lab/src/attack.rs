//! Attack simulation.
//!
//! `success = U(0, 100)` and `detection = 100 - success + U(0, 20)`.
//! Detection is only floored at zero; without clamping it can exceed 100.

use std::f64::consts::PI;
use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::bit_source::BitSource;
use crate::error::{LabError, Result};

/// Upper bound of the extra detection noise, in percentage points.
const DETECTION_JITTER_PERCENT: f64 = 20.0;

pub const UNKNOWN_PROTOCOL_DESCRIPTION: &str = "Unknown attack protocol: no model available";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackProtocol {
    InterceptResend,
    PhotonNumberSplitting,
    ManInTheMiddle,
    Shor,
    Grover,
    Unknown,
}

impl AttackProtocol {
    /// Exact match on the canonical name; anything else is `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "intercept-resend" => AttackProtocol::InterceptResend,
            "photon-number-splitting" => AttackProtocol::PhotonNumberSplitting,
            "man-in-the-middle" => AttackProtocol::ManInTheMiddle,
            "shor" => AttackProtocol::Shor,
            "grover" => AttackProtocol::Grover,
            _ => AttackProtocol::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttackProtocol::InterceptResend => "intercept-resend",
            AttackProtocol::PhotonNumberSplitting => "photon-number-splitting",
            AttackProtocol::ManInTheMiddle => "man-in-the-middle",
            AttackProtocol::Shor => "shor",
            AttackProtocol::Grover => "grover",
            AttackProtocol::Unknown => "unknown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AttackProtocol::InterceptResend => {
                "Eavesdropper measures each qubit in a random basis and resends it, \
                 disturbing about a quarter of the sifted bits"
            }
            AttackProtocol::PhotonNumberSplitting => {
                "Eavesdropper splits off extra photons from multi-photon pulses \
                 and measures them after basis reconciliation"
            }
            AttackProtocol::ManInTheMiddle => {
                "Attacker impersonates each party to the other over an \
                 unauthenticated classical channel"
            }
            AttackProtocol::Shor => {
                "Shor's algorithm factors RSA moduli in polynomial time \
                 on a fault-tolerant quantum computer"
            }
            AttackProtocol::Grover => {
                "Grover's algorithm searches an unstructured key space \
                 with a quadratic speed-up"
            }
            AttackProtocol::Unknown => UNKNOWN_PROTOCOL_DESCRIPTION,
        }
    }
}

impl fmt::Display for AttackProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// The name exactly as requested.
    pub protocol_name: String,
    pub success_rate_percent: f64,
    pub detection_rate_percent: f64,
    pub description: String,
}

/// Simulate an attack. Unknown names fall back to a default description.
///
/// With `clamp_detection` the detection rate is capped at 100.
pub fn simulate_attack<S: BitSource + ?Sized>(
    protocol_name: &str,
    source: &mut S,
    clamp_detection: bool,
) -> AttackOutcome {
    let protocol = AttackProtocol::from_name(protocol_name);
    let success_rate_percent = source.uniform(0.0, 100.0);
    let raw_detection =
        (100.0 - success_rate_percent + source.uniform(0.0, DETECTION_JITTER_PERCENT)).max(0.0);

    let detection_rate_percent = if clamp_detection {
        raw_detection.min(100.0)
    } else {
        if raw_detection > 100.0 {
            warn!(
                "{} attack: detection rate {:.2}% exceeds 100%",
                protocol, raw_detection
            );
        }
        raw_detection
    };

    debug!(
        "{} attack: success {:.2}%, detection {:.2}%",
        protocol, success_rate_percent, detection_rate_percent
    );

    AttackOutcome {
        protocol_name: protocol_name.to_string(),
        success_rate_percent,
        detection_rate_percent,
        description: protocol.description().to_string(),
    }
}

/// Resource estimate for factoring an RSA modulus with Shor's algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShorEstimate {
    pub target: String,
    pub qubits_required: u64,
    pub estimated_seconds: f64,
    pub success_probability: f64,
}

pub fn estimate_shor(rsa_bits: u32) -> Result<ShorEstimate> {
    if rsa_bits == 0 {
        return Err(LabError::InvalidArgument(
            "RSA modulus size must be positive".into(),
        ));
    }
    Ok(ShorEstimate {
        target: format!("RSA-{}", rsa_bits),
        qubits_required: 2 * u64::from(rsa_bits),
        estimated_seconds: f64::from(rsa_bits) / 1024.0 * 100.0,
        success_probability: if rsa_bits <= 2048 { 0.95 } else { 0.80 },
    })
}

/// Resource estimate for an unstructured search with Grover's algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroverEstimate {
    pub search_space: u64,
    /// Index register plus one ancilla.
    pub qubits_required: u32,
    pub iterations: u64,
    pub success_probability: f64,
    pub classical_queries: u64,
}

pub fn estimate_grover(search_space: u64) -> Result<GroverEstimate> {
    if search_space == 0 {
        return Err(LabError::InvalidArgument(
            "search space must be non-empty".into(),
        ));
    }
    let n = search_space as f64;
    Ok(GroverEstimate {
        search_space,
        qubits_required: n.log2().ceil() as u32 + 1,
        iterations: (PI * n.sqrt() / 4.0).floor() as u64,
        success_probability: 0.99,
        classical_queries: search_space / 2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_source::{ScriptedBitSource, SeededBitSource};

    #[test]
    fn unknown_protocol_gets_default_description() {
        let mut source = SeededBitSource::seeded(1);
        let outcome = simulate_attack("unknown-protocol", &mut source, false);
        assert_eq!(outcome.description, UNKNOWN_PROTOCOL_DESCRIPTION);
        assert_eq!(outcome.protocol_name, "unknown-protocol");
        assert!((0.0..=100.0).contains(&outcome.success_rate_percent));
        assert!(outcome.detection_rate_percent >= 0.0);
    }

    #[test]
    fn names_are_matched_exactly() {
        assert_eq!(AttackProtocol::from_name("shor"), AttackProtocol::Shor);
        assert_eq!(AttackProtocol::from_name("Shor"), AttackProtocol::Unknown);
        assert_eq!(AttackProtocol::from_name(""), AttackProtocol::Unknown);
        for protocol in [
            AttackProtocol::InterceptResend,
            AttackProtocol::PhotonNumberSplitting,
            AttackProtocol::ManInTheMiddle,
            AttackProtocol::Shor,
            AttackProtocol::Grover,
        ] {
            assert_eq!(AttackProtocol::from_name(protocol.name()), protocol);
            assert_ne!(protocol.description(), UNKNOWN_PROTOCOL_DESCRIPTION);
        }
    }

    #[test]
    fn detection_can_exceed_one_hundred() {
        // success draw 0.0, jitter draw 0.5 → 100 - 0 + 10
        let mut source = ScriptedBitSource::default().with_units(vec![0.0, 0.5]);
        let outcome = simulate_attack("grover", &mut source, false);
        assert_eq!(outcome.success_rate_percent, 0.0);
        assert!((outcome.detection_rate_percent - 110.0).abs() < 1e-9);
    }

    #[test]
    fn clamping_caps_detection() {
        let mut source = ScriptedBitSource::default().with_units(vec![0.0, 0.5]);
        let outcome = simulate_attack("grover", &mut source, true);
        assert_eq!(outcome.detection_rate_percent, 100.0);
    }

    #[test]
    fn detection_tracks_inverse_success() {
        let mut source = SeededBitSource::seeded(17);
        for _ in 0..1_000 {
            let outcome = simulate_attack("intercept-resend", &mut source, false);
            let floor = 100.0 - outcome.success_rate_percent;
            assert!(outcome.detection_rate_percent >= floor);
            assert!(outcome.detection_rate_percent < floor + DETECTION_JITTER_PERCENT);
        }
    }

    #[test]
    fn shor_estimate() {
        let estimate = estimate_shor(1024).unwrap();
        assert_eq!(estimate.target, "RSA-1024");
        assert_eq!(estimate.qubits_required, 2048);
        assert!((estimate.estimated_seconds - 100.0).abs() < 1e-9);
        assert_eq!(estimate.success_probability, 0.95);
        assert_eq!(estimate_shor(4096).unwrap().success_probability, 0.80);
        assert!(estimate_shor(0).is_err());
    }

    #[test]
    fn grover_estimate() {
        let estimate = estimate_grover(1_000_000).unwrap();
        assert_eq!(estimate.qubits_required, 21);
        assert_eq!(estimate.iterations, 785);
        assert_eq!(estimate.classical_queries, 500_000);
        assert!(estimate_grover(0).is_err());
    }
}
