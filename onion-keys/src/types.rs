//! Keypair material and the key generation capability.
//!
//! Intention: keep private key material behind a type whose only outputs are
//! the serialized encodings the node config stores.

use crate::error::{KeyError, Result};
use crate::proto;
pub use crate::proto::KeyType;
use pkcs8::EncodePublicKey;
use prost::Message;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use std::sync::Mutex;

/* ------------------------------ Keypair ---------------------------------- */

/// A generated public/private keypair tagged with its algorithm and strength.
#[derive(Clone)]
pub struct Keypair {
    kind: KeyType,
    bits: usize,
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl Keypair {
    fn from_rsa(private: RsaPrivateKey) -> Self {
        let public = private.to_public_key();
        Self {
            kind: KeyType::Rsa,
            bits: public.n().bits(),
            private,
            public,
        }
    }

    pub fn kind(&self) -> KeyType {
        self.kind
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Raw PKCS#1 `RSAPrivateKey` DER.
    pub fn pkcs1_private_der(&self) -> Result<Vec<u8>> {
        let der = self.private.to_pkcs1_der()?;
        Ok(der.as_bytes().to_vec())
    }

    /// Raw PKCS#1 `RSAPublicKey` DER, i.e. `SEQUENCE { n, e }`.
    pub fn pkcs1_public_der(&self) -> Result<Vec<u8>> {
        let der = self.public.to_pkcs1_der()?;
        Ok(der.into_vec())
    }

    /// libp2p protobuf envelope around the PKCS#1 private key.
    pub fn private_key_bytes(&self) -> Result<Vec<u8>> {
        let envelope = proto::PrivateKey {
            r#type: self.kind as i32,
            data: self.pkcs1_private_der()?,
        };
        Ok(envelope.encode_to_vec())
    }

    /// libp2p protobuf envelope around the PKIX public key. This is the
    /// encoding peer ids are hashed from.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>> {
        let der = self.public.to_public_key_der()?;
        let envelope = proto::PublicKey {
            r#type: self.kind as i32,
            data: der.into_vec(),
        };
        Ok(envelope.encode_to_vec())
    }

    /// Rebuild a keypair from the output of [`Keypair::private_key_bytes`].
    pub fn from_private_key_bytes(bytes: &[u8]) -> Result<Self> {
        let envelope = proto::PrivateKey::decode(bytes)?;
        match KeyType::try_from(envelope.r#type) {
            Ok(KeyType::Rsa) => {
                let private = RsaPrivateKey::from_pkcs1_der(&envelope.data)
                    .map_err(|e| KeyError::DecodingFailed(format!("PKCS#1: {e}")))?;
                Ok(Self::from_rsa(private))
            }
            Ok(other) => Err(KeyError::DecodingFailed(format!(
                "unsupported key type {}",
                other.as_str()
            ))),
            Err(_) => Err(KeyError::DecodingFailed(format!(
                "unknown key type {}",
                envelope.r#type
            ))),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("kind", &self.kind.as_str())
            .field("bits", &self.bits)
            .finish_non_exhaustive()
    }
}

/* ------------------------------ Generation ------------------------------- */

/// Capability: generate a keypair of kind `kind` with a `bits`-bit modulus.
pub trait KeypairGenerator {
    fn generate(&self, kind: KeyType, bits: usize) -> Result<Keypair>;
}

impl<G: KeypairGenerator + ?Sized> KeypairGenerator for &G {
    fn generate(&self, kind: KeyType, bits: usize) -> Result<Keypair> {
        (**self).generate(kind, bits)
    }
}

fn generate_with<R: CryptoRng + RngCore>(
    rng: &mut R,
    kind: KeyType,
    bits: usize,
) -> Result<Keypair> {
    match kind {
        KeyType::Rsa => {
            let private = RsaPrivateKey::new(rng, bits)?;
            Ok(Keypair::from_rsa(private))
        }
        other => Err(KeyError::KeyGenerationFailed(format!(
            "{} keys are not supported",
            other.as_str()
        ))),
    }
}

/// Generator backed by the operating system RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngGenerator;

impl KeypairGenerator for OsRngGenerator {
    fn generate(&self, kind: KeyType, bits: usize) -> Result<Keypair> {
        generate_with(&mut OsRng, kind, bits)
    }
}

/// Generator backed by a caller supplied RNG. With a seeded RNG the sequence
/// of generated keypairs is reproducible.
pub struct RngGenerator<R> {
    rng: Mutex<R>,
}

impl<R: CryptoRng + RngCore> RngGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<R: CryptoRng + RngCore> KeypairGenerator for RngGenerator<R> {
    fn generate(&self, kind: KeyType, bits: usize) -> Result<Keypair> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| KeyError::KeyGenerationFailed("rng lock poisoned".into()))?;
        generate_with(&mut *rng, kind, bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_private_key_bytes_round_trip() {
        let generator = RngGenerator::new(StdRng::seed_from_u64(7));
        let keypair = generator.generate(KeyType::Rsa, 1024).unwrap();
        assert_eq!(keypair.kind(), KeyType::Rsa);
        assert_eq!(keypair.bits(), 1024);

        let bytes = keypair.private_key_bytes().unwrap();
        let restored = Keypair::from_private_key_bytes(&bytes).unwrap();
        assert_eq!(restored.public_key(), keypair.public_key());
        assert_eq!(
            restored.public_key_bytes().unwrap(),
            keypair.public_key_bytes().unwrap()
        );
    }

    #[test]
    fn test_bits_reports_exact_modulus_length() {
        let generator = RngGenerator::new(StdRng::seed_from_u64(9));
        let keypair = generator.generate(KeyType::Rsa, 1028).unwrap();
        assert_eq!(keypair.bits(), 1028);

        // survives a round trip through the stored encoding
        let bytes = keypair.private_key_bytes().unwrap();
        assert_eq!(Keypair::from_private_key_bytes(&bytes).unwrap().bits(), 1028);
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let a = RngGenerator::new(StdRng::seed_from_u64(42))
            .generate(KeyType::Rsa, 1024)
            .unwrap();
        let b = RngGenerator::new(StdRng::seed_from_u64(42))
            .generate(KeyType::Rsa, 1024)
            .unwrap();
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn test_unsupported_kind_is_rejected() {
        let err = OsRngGenerator.generate(KeyType::Ed25519, 256).unwrap_err();
        assert!(matches!(err, KeyError::KeyGenerationFailed(_)));
    }

    #[test]
    fn test_debug_hides_private_material() {
        let keypair = RngGenerator::new(StdRng::seed_from_u64(1))
            .generate(KeyType::Rsa, 1024)
            .unwrap();
        let rendered = format!("{keypair:?}");
        assert!(rendered.contains("RSA"));
        assert!(rendered.contains("1024"));
        assert!(!rendered.contains("private"));
    }

    #[test]
    fn test_pkcs1_public_der_is_a_sequence() {
        let keypair = RngGenerator::new(StdRng::seed_from_u64(3))
            .generate(KeyType::Rsa, 1024)
            .unwrap();
        let der = keypair.pkcs1_public_der().unwrap();
        assert_eq!(der[0], 0x30);
    }
}
