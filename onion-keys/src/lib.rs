//! Onion Keys – node identity and onion address derivation
//!
//! Two independent derivations run on first start:
//! - [`derive_identity`] generates the durable identity keypair and its peer id
//! - [`derive_onion_address`] generates the onion service keypair and its address
//!
//! Key generation itself sits behind the [`KeypairGenerator`] capability.

pub mod error;
pub mod identity;
pub mod onion;
pub mod proto;
pub mod types;

pub use error::{KeyError, Result};

pub use types::{KeyType, Keypair, KeypairGenerator, OsRngGenerator, RngGenerator};

pub use identity::{derive_identity, NodeIdentity, PeerId, MIN_IDENTITY_KEY_BITS};

pub use onion::{
    derive_onion_address, fingerprint_from_public_der, OnionAddress, ONION_FINGERPRINT_BYTES,
    ONION_FINGERPRINT_LEN, ONION_KEY_BITS,
};
