//! # quantum_lab
//!
//! Classical, seed-controlled stand-ins for the quantum protocols a teaching
//! lab shows off: BB84 key agreement with basis sifting and QBER, random
//! bits from measured superpositions, measurement-derived signatures, toy
//! post-quantum rotation profiles and attack simulations.
//!
//! Nothing here touches quantum hardware. Every routine takes a
//! [`BitSource`] so runs are reproducible under a fixed seed.
//!
//! ```
//! use quantum_lab::prelude::*;
//!
//! let mut source = SeededBitSource::seeded(7);
//! let key = run_key_agreement(256, &mut source).unwrap();
//! assert!(key.len() <= 256);
//! assert_eq!(key.error_rate_percent, 0.0);
//! ```

pub mod attack;
pub mod bb84;
pub mod bb84_states;
pub mod bit_source;
pub mod config;
pub mod error;
pub mod lab;
pub mod pqc;
pub mod qrng;
pub mod qubit;
pub mod signature;
pub mod store;

pub use attack::{simulate_attack, AttackOutcome, AttackProtocol};
pub use bb84::{run_key_agreement, KeyAgreementEngine, SecurityLevel, SharedKeyResult};
pub use bb84_states::{Basis, QubitEvent};
pub use bit_source::{BitSource, RngBitSource, ScriptedBitSource, SeededBitSource};
pub use config::LabConfig;
pub use error::{LabError, Result};
pub use lab::QuantumLab;
pub use pqc::{decrypt, encrypt, transform, AlgorithmProfile};
pub use qrng::{generate_random_bits, RandomBitsResult};
pub use signature::{derive_signature, sign_document};
pub use store::{KeyStore, MemoryKeyStore};

pub mod prelude {
    pub use crate::attack::*;
    pub use crate::bb84::*;
    pub use crate::bb84_states::*;
    pub use crate::bit_source::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::lab::*;
    pub use crate::pqc::*;
    pub use crate::qrng::*;
    pub use crate::signature::*;
    pub use crate::store::*;
}
