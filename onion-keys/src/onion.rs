//! Onion rendezvous address derivation.
//!
//! The onion address is the lowercase base32 form of the first half of the
//! SHA-1 digest of a PKCS#1 encoded RSA public key. Only ten of the twenty
//! digest bytes are kept, trading collision resistance for a short address.

use crate::error::{KeyError, Result};
use crate::types::{KeyType, KeypairGenerator};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use data_encoding::BASE32;
use onion_common::{Component, Logger};
use sha1::{Digest, Sha1};
use std::fmt;

/// Onion service keys are always 1024-bit RSA.
pub const ONION_KEY_BITS: usize = 1024;

/// Number of SHA-1 digest bytes kept in the address.
pub const ONION_FINGERPRINT_BYTES: usize = 10;

/// Length of the encoded address: 10 bytes are exactly 16 base32 characters.
pub const ONION_FINGERPRINT_LEN: usize = 16;

/// The onion address together with the private key of the service keypair.
#[derive(Clone, PartialEq, Eq)]
pub struct OnionAddress {
    pub fingerprint: String,
    /// base64 of the PKCS#1 private key
    pub private_key: String,
}

impl fmt::Debug for OnionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnionAddress")
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

/// Fingerprint of a PKCS#1 `RSAPublicKey` DER encoding.
pub fn fingerprint_from_public_der(public_der: &[u8]) -> String {
    let digest = Sha1::digest(public_der);
    BASE32
        .encode(&digest[..ONION_FINGERPRINT_BYTES])
        .to_lowercase()
}

/// Generate a fresh onion service keypair and derive its address.
///
/// Every failure is reported as [`KeyError::KeyDerivationFailed`].
pub fn derive_onion_address<G>(generator: &G) -> Result<OnionAddress>
where
    G: KeypairGenerator + ?Sized,
{
    let derivation_failed = |e: KeyError| KeyError::KeyDerivationFailed(e.to_string());

    let keypair = generator
        .generate(KeyType::Rsa, ONION_KEY_BITS)
        .map_err(derivation_failed)?;
    let public_der = keypair.pkcs1_public_der().map_err(derivation_failed)?;
    let private_der = keypair.pkcs1_private_der().map_err(derivation_failed)?;

    let fingerprint = fingerprint_from_public_der(&public_der);
    Logger::pending(Component::Onion)
        .debug_args(format_args!("derived onion address {fingerprint}"));

    Ok(OnionAddress {
        fingerprint,
        private_key: STANDARD.encode(private_der),
    })
}
