use thiserror::Error;

/// Error types for the onion-keys crate
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Insufficient key strength: {requested} bits requested, at least {minimum} required")]
    InsufficientKeyStrength { requested: usize, minimum: usize },

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    #[error("Identity derivation failed: {0}")]
    IdentityDerivationFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Decoding failed: {0}")]
    DecodingFailed(String),
}

impl From<rsa::Error> for KeyError {
    fn from(err: rsa::Error) -> Self {
        KeyError::KeyGenerationFailed(err.to_string())
    }
}

impl From<rsa::pkcs1::Error> for KeyError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        KeyError::SerializationFailed(format!("PKCS#1: {err}"))
    }
}

impl From<pkcs8::spki::Error> for KeyError {
    fn from(err: pkcs8::spki::Error) -> Self {
        KeyError::SerializationFailed(format!("PKIX: {err}"))
    }
}

impl From<base64::DecodeError> for KeyError {
    fn from(err: base64::DecodeError) -> Self {
        KeyError::DecodingFailed(format!("base64: {err}"))
    }
}

impl From<prost::DecodeError> for KeyError {
    fn from(err: prost::DecodeError) -> Self {
        KeyError::DecodingFailed(format!("protobuf: {err}"))
    }
}

/// Result type for onion-keys operations
pub type Result<T> = std::result::Result<T, KeyError>;
