use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

pub const DEFAULT_MAX_REQUEST_BITS: usize = 1_000_000;

pub const ENV_MAX_BITS: &str = "QUANTUM_LAB_MAX_BITS";
pub const ENV_SEED: &str = "QUANTUM_LAB_SEED";
pub const ENV_NOISE: &str = "QUANTUM_LAB_NOISE";
pub const ENV_CLAMP_DETECTION: &str = "QUANTUM_LAB_CLAMP_DETECTION";

/// Tunables for [`QuantumLab`](crate::QuantumLab).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Largest bit/qubit count a single request may ask for.
    pub max_request_bits: usize,
    /// Fixed seed for reproducible runs. `None` draws fresh entropy per call.
    pub seed: Option<u64>,
    /// Probability of a bit flip on the key agreement channel.
    pub noise_probability: f64,
    /// Cap attack detection rates at 100%.
    pub clamp_detection: bool,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            max_request_bits: DEFAULT_MAX_REQUEST_BITS,
            seed: None,
            noise_probability: 0.0,
            clamp_detection: false,
        }
    }
}

impl LabConfig {
    pub fn with_max_request_bits(mut self, max: usize) -> Self {
        self.max_request_bits = max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_noise_probability(mut self, p: f64) -> Self {
        self.noise_probability = p;
        self
    }

    pub fn with_clamp_detection(mut self, clamp: bool) -> Self {
        self.clamp_detection = clamp;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_request_bits == 0 {
            return Err(LabError::Config(
                "max_request_bits must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.noise_probability) {
            return Err(LabError::Config(format!(
                "noise_probability must lie in [0, 1], got {}",
                self.noise_probability
            )));
        }
        Ok(())
    }

    /// Defaults overridden by any `QUANTUM_LAB_*` variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(max) = parse_var(&lookup, ENV_MAX_BITS)? {
            config.max_request_bits = max;
        }
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            config.seed = Some(seed);
        }
        if let Some(noise) = parse_var(&lookup, ENV_NOISE)? {
            config.noise_probability = noise;
        }
        if let Some(clamp) = parse_var(&lookup, ENV_CLAMP_DETECTION)? {
            config.clamp_detection = clamp;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| LabError::Config(format!("{}={:?}: {}", key, raw, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = LabConfig::default();
        assert_eq!(config.max_request_bits, 1_000_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.noise_probability, 0.0);
        assert!(!config.clamp_detection);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides() {
        let config = LabConfig::from_lookup(lookup_from(&[
            (ENV_MAX_BITS, "4096"),
            (ENV_SEED, "42"),
            (ENV_NOISE, "0.05"),
            (ENV_CLAMP_DETECTION, "true"),
        ]))
        .unwrap();
        assert_eq!(config.max_request_bits, 4096);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.noise_probability, 0.05);
        assert!(config.clamp_detection);
    }

    #[test]
    fn unparsable_values_are_config_errors() {
        let err = LabConfig::from_lookup(lookup_from(&[(ENV_SEED, "forty-two")])).unwrap_err();
        assert!(matches!(err, LabError::Config(_)));
    }

    #[test]
    fn out_of_range_noise_fails_validation() {
        let err = LabConfig::from_lookup(lookup_from(&[(ENV_NOISE, "1.5")])).unwrap_err();
        assert!(matches!(err, LabError::Config(_)));
        assert!(LabConfig::default().with_max_request_bits(0).validate().is_err());
    }

    #[test]
    fn deserializes_partial_json() {
        let config: LabConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_request_bits, DEFAULT_MAX_REQUEST_BITS);
    }
}
