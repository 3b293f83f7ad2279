//! libp2p key envelopes.
//!
//! Keys travel between peers and into the node config as a two-field protobuf:
//! the key type and the type-specific encoding of the key.

/// Key algorithms known to the libp2p key envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum KeyType {
    Rsa = 0,
    Ed25519 = 1,
    Secp256k1 = 2,
    Ecdsa = 3,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Rsa => "RSA",
            KeyType::Ed25519 => "Ed25519",
            KeyType::Secp256k1 => "Secp256k1",
            KeyType::Ecdsa => "ECDSA",
        }
    }
}

/// `Data` holds PKIX DER for RSA keys.
#[derive(Clone, PartialEq, prost::Message)]
pub struct PublicKey {
    #[prost(enumeration = "KeyType", required, tag = "1")]
    pub r#type: i32,
    #[prost(bytes = "vec", required, tag = "2")]
    pub data: Vec<u8>,
}

/// `Data` holds PKCS#1 DER for RSA keys.
#[derive(Clone, PartialEq, prost::Message)]
pub struct PrivateKey {
    #[prost(enumeration = "KeyType", required, tag = "1")]
    pub r#type: i32,
    #[prost(bytes = "vec", required, tag = "2")]
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_rsa_type_is_always_encoded() {
        // proto2 required field: the zero-valued RSA tag must still be written
        let key = PublicKey {
            r#type: KeyType::Rsa as i32,
            data: vec![0xAA, 0xBB],
        };
        assert_eq!(key.encode_to_vec(), vec![0x08, 0x00, 0x12, 0x02, 0xAA, 0xBB]);
    }

    #[test]
    fn test_private_key_envelope_decodes() {
        let bytes = [0x08, 0x00, 0x12, 0x03, 0x01, 0x02, 0x03];
        let key = PrivateKey::decode(&bytes[..]).expect("decode envelope");
        assert_eq!(key.r#type, KeyType::Rsa as i32);
        assert_eq!(key.data, vec![1, 2, 3]);
    }
}
