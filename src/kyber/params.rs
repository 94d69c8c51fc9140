use std::fmt;

use log::trace;

use crate::error::CryptoResult;
use crate::kyber::engine::KemEngine;

/// Published Kyber768 public key size in bytes
pub const KYBER768_PUBLIC_KEY_LENGTH: usize = 1184;

/// Published Kyber768 secret key size in bytes
pub const KYBER768_SECRET_KEY_LENGTH: usize = 2400;

/// Published Kyber768 ciphertext size in bytes
pub const KYBER768_CIPHERTEXT_LENGTH: usize = 1088;

/// Published Kyber768 shared secret size in bytes
pub const KYBER768_SHARED_SECRET_LENGTH: usize = 32;

/// The four fixed lengths of the Kyber768 parameter set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LengthKind {
    /// Public (encapsulation) key
    PublicKey,
    /// Secret (decapsulation) key
    SecretKey,
    /// Shared secret produced by both sides
    SharedSecret,
    /// Ciphertext sent from encapsulator to decapsulator
    Ciphertext,
}

impl LengthKind {
    /// All four kinds, in query order
    pub const ALL: [LengthKind; 4] = [
        LengthKind::PublicKey,
        LengthKind::SecretKey,
        LengthKind::SharedSecret,
        LengthKind::Ciphertext,
    ];

    /// The published Kyber768 size for this kind
    pub fn published(&self) -> usize {
        match self {
            LengthKind::PublicKey => KYBER768_PUBLIC_KEY_LENGTH,
            LengthKind::SecretKey => KYBER768_SECRET_KEY_LENGTH,
            LengthKind::SharedSecret => KYBER768_SHARED_SECRET_LENGTH,
            LengthKind::Ciphertext => KYBER768_CIPHERTEXT_LENGTH,
        }
    }
}

impl fmt::Display for LengthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthKind::PublicKey => write!(f, "public key"),
            LengthKind::SecretKey => write!(f, "secret key"),
            LengthKind::SharedSecret => write!(f, "shared secret"),
            LengthKind::Ciphertext => write!(f, "ciphertext"),
        }
    }
}

/// Query one of the fixed Kyber768 lengths.
///
/// A fresh engine is instantiated just to read the value and released
/// before returning. Callers should query once and reuse the result.
///
/// # Examples
///
/// ```
/// use kyber_wrapper::kyber::{query_length, LengthKind};
///
/// let pk_len = query_length(LengthKind::PublicKey).unwrap();
/// assert_eq!(pk_len, 1184);
/// ```
pub fn query_length(kind: LengthKind) -> CryptoResult<usize> {
    let engine = KemEngine::new("query_length")?;
    let length = engine.length(kind);
    trace!("Kyber768 {} length is {}", kind, length);
    Ok(length)
}

/// Length of a Kyber768 public key, as reported by the engine
pub fn public_key_length() -> CryptoResult<usize> {
    query_length(LengthKind::PublicKey)
}

/// Length of a Kyber768 secret key, as reported by the engine
pub fn secret_key_length() -> CryptoResult<usize> {
    query_length(LengthKind::SecretKey)
}

/// Length of a Kyber768 shared secret, as reported by the engine
pub fn shared_secret_length() -> CryptoResult<usize> {
    query_length(LengthKind::SharedSecret)
}

/// Length of a Kyber768 ciphertext, as reported by the engine
pub fn ciphertext_length() -> CryptoResult<usize> {
    query_length(LengthKind::Ciphertext)
}
