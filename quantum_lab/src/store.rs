use std::collections::HashMap;

use crate::lab::KeyAgreementResponse;

/// Where generated keys are kept. The core never owns one; callers inject
/// whichever implementation fits.
pub trait KeyStore {
    /// Insert or replace the key stored under `response.key_id`.
    fn add(&mut self, response: KeyAgreementResponse);

    fn get(&self, key_id: &str) -> Option<&KeyAgreementResponse>;

    fn remove(&mut self, key_id: &str) -> Option<KeyAgreementResponse>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// HashMap-backed store keyed by caller-supplied id.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyStore {
    keys: HashMap<String, KeyAgreementResponse>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }
}

impl KeyStore for MemoryKeyStore {
    fn add(&mut self, response: KeyAgreementResponse) {
        self.keys.insert(response.key_id.clone(), response);
    }

    fn get(&self, key_id: &str) -> Option<&KeyAgreementResponse> {
        self.keys.get(key_id)
    }

    fn remove(&mut self, key_id: &str) -> Option<KeyAgreementResponse> {
        self.keys.remove(key_id)
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}
