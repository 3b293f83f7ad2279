//! Node identity derivation.
//!
//! The identity keypair is the durable identity of the node. Its peer id is
//! the base58btc encoding of a sha2-256 multihash over the protobuf encoded
//! public key, so it can be recomputed from the stored private key at any time.

use crate::error::{KeyError, Result};
use crate::types::{KeyType, Keypair, KeypairGenerator};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use onion_common::{Component, Logger};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Write;

/// Identity keys below this strength are considered unsafe.
pub const MIN_IDENTITY_KEY_BITS: usize = 1024;

/// Multihash code for sha2-256.
const MULTIHASH_SHA2_256: u8 = 0x12;
const SHA2_256_LEN: u8 = 32;

/* ------------------------------ Peer Id ---------------------------------- */

/// Multihash of a node's public key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PeerId(Vec<u8>);

impl PeerId {
    /// Derive the peer id from a protobuf encoded public key.
    pub fn from_public_key_bytes(public_key: &[u8]) -> Self {
        let digest = Sha256::digest(public_key);
        let mut multihash = Vec::with_capacity(2 + digest.len());
        multihash.push(MULTIHASH_SHA2_256);
        multihash.push(SHA2_256_LEN);
        multihash.extend_from_slice(&digest);
        Self(multihash)
    }

    pub fn from_keypair(keypair: &Keypair) -> Result<Self> {
        let public_key = keypair
            .public_key_bytes()
            .map_err(|e| KeyError::IdentityDerivationFailed(e.to_string()))?;
        Ok(Self::from_public_key_bytes(&public_key))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(&self.0).into_string()
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/* ------------------------------ Node Identity ---------------------------- */

/// The persisted identity of a node.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdentity {
    #[serde(rename = "PeerID")]
    pub peer_id: String,
    /// base64 of the protobuf encoded private key
    #[serde(rename = "PrivKey")]
    pub private_key: String,
}

impl NodeIdentity {
    /// Decode the stored private key back into a keypair.
    pub fn decode_keypair(&self) -> Result<Keypair> {
        let bytes = STANDARD.decode(&self.private_key)?;
        Keypair::from_private_key_bytes(&bytes)
    }

    /// Check that the stored private key still yields the stored peer id.
    pub fn verify(&self) -> Result<()> {
        let keypair = self.decode_keypair()?;
        let derived = PeerId::from_keypair(&keypair)?.to_base58();
        if derived != self.peer_id {
            return Err(KeyError::IdentityDerivationFailed(format!(
                "private key yields peer id {derived}, expected {}",
                self.peer_id
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeIdentity")
            .field("peer_id", &self.peer_id)
            .finish_non_exhaustive()
    }
}

// Progress output is informational only; a broken sink never fails initialization.
fn report(out: &mut dyn Write, logger: &Logger, args: fmt::Arguments) {
    if let Err(e) = out.write_fmt(args).and_then(|_| out.flush()) {
        logger.warn_args(format_args!("failed to write progress output: {e}"));
    }
}

/// Generate the identity keypair and derive the node identity from it.
///
/// Fails with [`KeyError::InsufficientKeyStrength`] before touching the
/// generator or `out` when `bits` is below [`MIN_IDENTITY_KEY_BITS`].
pub fn derive_identity<G>(generator: &G, out: &mut dyn Write, bits: usize) -> Result<NodeIdentity>
where
    G: KeypairGenerator + ?Sized,
{
    if bits < MIN_IDENTITY_KEY_BITS {
        return Err(KeyError::InsufficientKeyStrength {
            requested: bits,
            minimum: MIN_IDENTITY_KEY_BITS,
        });
    }

    let logger = Logger::pending(Component::Keys);
    report(
        out,
        &logger,
        format_args!("generating {bits}-bit RSA keypair..."),
    );
    let keypair = generator.generate(KeyType::Rsa, bits)?;
    report(out, &logger, format_args!("done\n"));

    // TODO(security): the private key is stored unencrypted; encrypt it once
    // the repo has a passphrase source.
    let private_key = STANDARD.encode(keypair.private_key_bytes()?);
    let peer_id = PeerId::from_keypair(&keypair)?.to_base58();

    let logger = logger.with_node_id(peer_id.as_str());
    logger.info_args(format_args!("generated {bits}-bit identity keypair"));
    report(out, &logger, format_args!("peer identity: {peer_id}\n"));

    Ok(NodeIdentity {
        peer_id,
        private_key,
    })
}
