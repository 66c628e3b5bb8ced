//! Request-level facade.
//!
//! [`QuantumLab`] applies the configured limits, hands each call its own
//! [`BitSource`](crate::BitSource) and shapes results the way the outer
//! service layer serialises them.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::attack::simulate_attack;
use crate::bb84::{KeyAgreementEngine, SecurityLevel};
use crate::bit_source::SeededBitSource;
use crate::config::LabConfig;
use crate::error::{LabError, Result};
use crate::pqc::{self, AlgorithmProfile};
use crate::qrng::generate_random_bits;
use crate::signature;
use crate::store::KeyStore;

pub const KEY_AGREEMENT_PROTOCOL: &str = "BB84";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyAgreementResponse {
    pub key_id: String,
    pub shared_key: String,
    pub key_length: usize,
    pub error_rate: f64,
    pub protocol: String,
    pub key_hex: String,
    pub efficiency: f64,
    pub security_level: SecurityLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomBitsResponse {
    pub binary: String,
    pub decimal: u32,
    pub hex: String,
    pub bits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionResponse {
    pub encrypted: String,
    pub algorithm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptionResponse {
    pub decrypted: String,
    pub algorithm: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureResponse {
    pub digest: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackResponse {
    pub protocol: String,
    pub success_rate: f64,
    pub detection_rate: f64,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct QuantumLab {
    config: LabConfig,
}

impl QuantumLab {
    pub fn new(config: LabConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "quantum lab ready (max {} bits, seed {:?}, noise {})",
            config.max_request_bits, config.seed, config.noise_probability
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    /// A fresh source for one call: the configured seed if any, otherwise
    /// operating-system entropy.
    pub fn bit_source(&self) -> SeededBitSource {
        match self.config.seed {
            Some(seed) => SeededBitSource::seeded(seed),
            None => SeededBitSource::from_entropy(),
        }
    }

    fn check_limit(&self, requested: usize) -> Result<()> {
        let limit = self.config.max_request_bits;
        if requested > limit {
            warn!("rejecting request for {} bits (limit {})", requested, limit);
            return Err(LabError::ResourceLimitExceeded { requested, limit });
        }
        Ok(())
    }

    fn check_length(&self, requested: usize, what: &str) -> Result<()> {
        if requested == 0 {
            return Err(LabError::InvalidArgument(format!("{} must be positive", what)));
        }
        self.check_limit(requested)
    }

    /// Caller text counts against the limit at eight bits per byte.
    fn check_text(&self, text: &str) -> Result<()> {
        self.check_limit(text.len().saturating_mul(8))
    }

    pub fn run_key_agreement(
        &self,
        key_id: impl Into<String>,
        target_key_length: usize,
    ) -> Result<KeyAgreementResponse> {
        self.check_length(target_key_length, "key length")?;
        let engine = KeyAgreementEngine::with_noise(self.config.noise_probability)?;
        let result = engine.run_key_agreement(target_key_length, &mut self.bit_source())?;
        let key_id = key_id.into();
        debug!("key {} agreed: {} bits", key_id, result.len());

        Ok(KeyAgreementResponse {
            key_id,
            shared_key: result.key_binary(),
            key_length: result.len(),
            error_rate: result.error_rate_percent,
            protocol: KEY_AGREEMENT_PROTOCOL.to_string(),
            key_hex: result.key_hex(),
            efficiency: result.efficiency(),
            security_level: result.security_level(),
        })
    }

    /// Run a key agreement and persist the response in `store`.
    pub fn store_key<K: KeyStore + ?Sized>(
        &self,
        store: &mut K,
        key_id: impl Into<String>,
        target_key_length: usize,
    ) -> Result<KeyAgreementResponse> {
        let response = self.run_key_agreement(key_id, target_key_length)?;
        store.add(response.clone());
        Ok(response)
    }

    pub fn generate_random_bits(&self, bit_count: usize) -> Result<RandomBitsResponse> {
        self.check_length(bit_count, "bit count")?;
        let result = generate_random_bits(bit_count, &mut self.bit_source())?;
        Ok(RandomBitsResponse {
            binary: result.binary(),
            decimal: result.decimal_value,
            hex: result.hex_value,
            bits: bit_count,
        })
    }

    pub fn derive_signature(&self, message_bits: &[bool]) -> Result<Vec<bool>> {
        self.check_limit(message_bits.len())?;
        Ok(signature::derive_signature(
            message_bits,
            &mut self.bit_source(),
        ))
    }

    pub fn sign_document(&self, document: &str) -> Result<SignatureResponse> {
        self.check_text(document)?;
        let signed = signature::sign_document(document, &mut self.bit_source());
        Ok(SignatureResponse {
            digest: signed.digest,
            signature: crate::bb84::bits_to_binary(&signed.signature),
        })
    }

    pub fn transform(&self, message_bits: &[bool], profile: AlgorithmProfile) -> Result<Vec<bool>> {
        self.check_limit(message_bits.len())?;
        Ok(pqc::transform(message_bits, profile, &mut self.bit_source()))
    }

    pub fn encrypt(&self, message: &str, algorithm: &str) -> Result<EncryptionResponse> {
        self.check_text(message)?;
        self.check_text(algorithm)?;
        Ok(EncryptionResponse {
            encrypted: pqc::encrypt(message, algorithm),
            algorithm: algorithm.to_string(),
        })
    }

    pub fn decrypt(&self, ciphertext: &str) -> Result<DecryptionResponse> {
        self.check_text(ciphertext)?;
        let plain = pqc::decrypt(ciphertext).map_err(|e| {
            warn!("{}", e);
            e
        })?;
        Ok(DecryptionResponse {
            decrypted: plain.message,
            algorithm: plain.algorithm,
        })
    }

    pub fn simulate_attack(&self, protocol_name: &str) -> AttackResponse {
        let outcome = simulate_attack(
            protocol_name,
            &mut self.bit_source(),
            self.config.clamp_detection,
        );
        AttackResponse {
            protocol: outcome.protocol_name,
            success_rate: outcome.success_rate_percent,
            detection_rate: outcome.detection_rate_percent,
            description: outcome.description,
        }
    }
}
