use std::fmt;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};
use crate::kyber::facade;
use crate::kyber::params::{
    LengthKind, KYBER768_CIPHERTEXT_LENGTH, KYBER768_PUBLIC_KEY_LENGTH, KYBER768_SECRET_KEY_LENGTH,
    KYBER768_SHARED_SECRET_LENGTH,
};

/// NIST security level of Kyber768, mixed into public key fingerprints
const KYBER768_SECURITY_LEVEL: u8 = 3;

fn exact_length(kind: LengthKind, bytes: &[u8]) -> CryptoResult<()> {
    let expected = kind.published();
    if bytes.len() != expected {
        return Err(CryptoError::invalid_length(kind, expected, bytes.len()));
    }
    Ok(())
}

/// Kyber768 public key, safe to share
#[derive(Clone, PartialEq, Eq)]
pub struct KyberPublicKey {
    bytes: Vec<u8>,
}

/// Kyber768 secret key, zeroed when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KyberSecretKey {
    bytes: Vec<u8>,
}

/// Kyber768 ciphertext produced by encapsulation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KyberCiphertext {
    bytes: Vec<u8>,
}

/// 32-byte shared secret, zeroed when dropped and compared in constant time
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; KYBER768_SHARED_SECRET_LENGTH],
}

/// CRYSTALS-Kyber768 key pair
///
/// # Examples
///
/// ```
/// use kyber_wrapper::kyber::KyberKeyPair;
///
/// let key_pair = KyberKeyPair::generate().unwrap();
///
/// // Someone holding only the public key encapsulates a secret
/// let (ciphertext, sent) = key_pair.public_key().encapsulate().unwrap();
///
/// // The key pair owner recovers it
/// let received = key_pair.decapsulate(&ciphertext).unwrap();
/// assert_eq!(sent, received);
/// ```
pub struct KyberKeyPair {
    public_key: KyberPublicKey,
    secret_key: KyberSecretKey,
}

impl KyberKeyPair {
    /// Generate a new random key pair
    pub fn generate() -> CryptoResult<Self> {
        let mut public_key = vec![0u8; KYBER768_PUBLIC_KEY_LENGTH];
        let mut secret_key = KyberSecretKey {
            bytes: vec![0u8; KYBER768_SECRET_KEY_LENGTH],
        };

        facade::generate_keypair(&mut public_key, &mut secret_key.bytes)?;

        Ok(Self {
            public_key: KyberPublicKey { bytes: public_key },
            secret_key,
        })
    }

    /// Rebuild a key pair from its raw parts
    pub fn from_parts(public_key: KyberPublicKey, secret_key: KyberSecretKey) -> Self {
        Self {
            public_key,
            secret_key,
        }
    }

    /// Extract the public key for sharing
    pub fn public_key(&self) -> KyberPublicKey {
        self.public_key.clone()
    }

    /// Borrow the secret key
    pub fn secret_key(&self) -> &KyberSecretKey {
        &self.secret_key
    }

    /// Recover the shared secret carried by `ciphertext`
    pub fn decapsulate(&self, ciphertext: &KyberCiphertext) -> CryptoResult<SharedSecret> {
        self.secret_key.decapsulate(ciphertext)
    }

    /// Check that the public and secret halves belong together.
    ///
    /// Runs a full encapsulation against the public key and decapsulates
    /// the result with the secret key.
    pub fn verify_key_pair(&self) -> CryptoResult<()> {
        let (ciphertext, sent) = self.public_key.encapsulate()?;
        let received = self.decapsulate(&ciphertext)?;

        if sent == received {
            Ok(())
        } else {
            Err(CryptoError::key_mismatch())
        }
    }
}

impl fmt::Debug for KyberKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KyberKeyPair")
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key)
            .finish()
    }
}

impl KyberPublicKey {
    /// Wrap raw public key bytes, which must be exactly 1184 bytes
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        exact_length(LengthKind::PublicKey, bytes)?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encapsulate a fresh shared secret for the holder of the secret key
    pub fn encapsulate(&self) -> CryptoResult<(KyberCiphertext, SharedSecret)> {
        let mut ciphertext = vec![0u8; KYBER768_CIPHERTEXT_LENGTH];
        let mut shared_secret = SharedSecret {
            bytes: [0u8; KYBER768_SHARED_SECRET_LENGTH],
        };

        facade::encapsulate(&mut ciphertext, &mut shared_secret.bytes, &self.bytes)?;

        Ok((KyberCiphertext { bytes: ciphertext }, shared_secret))
    }

    /// Short identifier: first 8 bytes of SHA-256 over the security level
    /// byte followed by the key, hex encoded
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update([KYBER768_SECURITY_LEVEL]);
        hasher.update(&self.bytes);
        let hash = hasher.finalize();
        hex::encode(&hash[..8])
    }
}

impl fmt::Debug for KyberPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KyberPublicKey({})", self.fingerprint())
    }
}

impl KyberSecretKey {
    /// Wrap raw secret key bytes, which must be exactly 2400 bytes
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        exact_length(LengthKind::SecretKey, bytes)?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Recover the shared secret carried by `ciphertext`
    pub fn decapsulate(&self, ciphertext: &KyberCiphertext) -> CryptoResult<SharedSecret> {
        let mut shared_secret = SharedSecret {
            bytes: [0u8; KYBER768_SHARED_SECRET_LENGTH],
        };

        facade::decapsulate(&mut shared_secret.bytes, &ciphertext.bytes, &self.bytes)?;

        Ok(shared_secret)
    }
}

impl fmt::Debug for KyberSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KyberSecretKey([REDACTED; {}])", self.bytes.len())
    }
}

impl KyberCiphertext {
    /// Wrap raw ciphertext bytes, which must be exactly 1088 bytes
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        exact_length(LengthKind::Ciphertext, bytes)?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CryptoError, STATUS_INVALID_LENGTH};

    #[test]
    fn test_owned_round_trip() {
        let key_pair = KyberKeyPair::generate().unwrap();
        let (ciphertext, sent) = key_pair.public_key().encapsulate().unwrap();
        let received = key_pair.decapsulate(&ciphertext).unwrap();

        assert_eq!(sent, received);
        assert_eq!(sent.as_bytes().len(), KYBER768_SHARED_SECRET_LENGTH);
        assert_eq!(ciphertext.as_bytes().len(), KYBER768_CIPHERTEXT_LENGTH);
    }

    #[test]
    fn test_key_verification() {
        let key_pair = KyberKeyPair::generate().unwrap();
        assert!(key_pair.verify_key_pair().is_ok());
    }

    #[test]
    fn test_mismatched_halves_fail_verification() {
        let a = KyberKeyPair::generate().unwrap();
        let b = KyberKeyPair::generate().unwrap();
        let mixed = KyberKeyPair::from_parts(a.public_key(), b.secret_key().clone());

        match mixed.verify_key_pair() {
            Err(CryptoError::KeyMismatch { .. }) => {}
            other => panic!("expected KeyMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_bytes_rejects_wrong_lengths() {
        let err = KyberPublicKey::from_bytes(&[0u8; 10]).unwrap_err();
        assert_eq!(err.status(), STATUS_INVALID_LENGTH);
        assert!(matches!(
            err,
            CryptoError::InvalidLength { kind: LengthKind::PublicKey, expected: 1184, actual: 10, .. }
        ));
        assert!(KyberSecretKey::from_bytes(&[0u8; KYBER768_SECRET_KEY_LENGTH + 1]).is_err());
        assert!(KyberCiphertext::from_bytes(&[]).is_err());
    }

    #[test]
    fn test_raw_bytes_survive_rewrapping() {
        let key_pair = KyberKeyPair::generate().unwrap();
        let public_key = KyberPublicKey::from_bytes(key_pair.public_key().as_bytes()).unwrap();
        let secret_key = KyberSecretKey::from_bytes(key_pair.secret_key().as_bytes()).unwrap();

        let (ciphertext, sent) = public_key.encapsulate().unwrap();
        let ciphertext = KyberCiphertext::from_bytes(ciphertext.as_bytes()).unwrap();
        assert_eq!(secret_key.decapsulate(&ciphertext).unwrap(), sent);
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let public_key = KyberKeyPair::generate().unwrap().public_key();
        let fingerprint = public_key.fingerprint();

        assert_eq!(fingerprint.len(), 16);
        assert_eq!(fingerprint, public_key.clone().fingerprint());

        let mut data = vec![3u8];
        data.extend_from_slice(public_key.as_bytes());
        assert_eq!(fingerprint, hex::encode(&Sha256::digest(&data)[..8]));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let key_pair = KyberKeyPair::generate().unwrap();
        let (_, secret) = key_pair.public_key().encapsulate().unwrap();

        let rendered = format!("{:?} {:?}", key_pair, secret);
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains(&hex::encode(secret.as_bytes())));
    }
}
