//! Measurement-derived "signatures".
//!
//! Every call measures fresh superpositions, so signing the same input twice
//! gives unrelated outputs and a signature can never be checked by
//! recomputing it. Nothing here is a signature scheme.

use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::bit_source::BitSource;
use crate::qubit::Qubit;

/// Per input bit: prepare it, flip it, superpose it, measure it.
pub fn derive_signature<S: BitSource + ?Sized>(
    message_bits: &[bool],
    source: &mut S,
) -> Vec<bool> {
    message_bits
        .iter()
        .map(|&bit| Qubit::prepare(bit).x().h().measure(source))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSignature {
    /// Hex SHA-256 of the document.
    pub digest: String,
    pub signature: Vec<bool>,
}

/// Hash `document` with SHA-256 and run the 256 digest bits through
/// [`derive_signature`].
pub fn sign_document<S: BitSource + ?Sized>(
    document: &str,
    source: &mut S,
) -> DocumentSignature {
    let digest = Sha256::digest(document.as_bytes());
    let signature = derive_signature(&bytes_to_bits(&digest), source);
    debug!(
        "signed {} byte document into {} bits",
        document.len(),
        signature.len()
    );
    DocumentSignature {
        digest: hex::encode(digest),
        signature,
    }
}

/// Expand bytes into bits, most significant bit first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| byte & (1 << i) != 0))
        .collect()
}
