/*!
 * Scoped Kyber768 engine instance
 *
 * A `KemEngine` owns exactly one liboqs `OQS_KEM` configured for Kyber768.
 * It is created at the start of an operation and freed when it goes out of
 * scope, on every exit path.
 */

use std::ffi::CStr;
use std::ptr::NonNull;

use libc::c_int;
use log::{debug, warn};
use oqs_sys::kem::{OQS_KEM_alg_kyber_768, OQS_KEM_free, OQS_KEM_new, OQS_KEM};

use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::kyber::params::LengthKind;

/// One configured instantiation of the Kyber768 primitive.
///
/// Not `Clone`, not `Send`: an engine belongs to the single call that
/// created it.
pub(crate) struct KemEngine {
    raw: NonNull<OQS_KEM>,
    operation: &'static str,
}

impl KemEngine {
    /// Instantiate a fresh Kyber768 engine for `operation`.
    ///
    /// Performs liboqs initialization on first use.
    pub(crate) fn new(operation: &'static str) -> CryptoResult<Self> {
        let algorithm = CStr::from_bytes_with_nul(OQS_KEM_alg_kyber_768)
            .map_err(|_| CryptoError::engine_unavailable(operation, "malformed algorithm name"))?;
        Self::with_algorithm(algorithm, operation)
    }

    /// Instantiate an engine for the liboqs algorithm named `algorithm`.
    ///
    /// An unknown or disabled name yields `EngineUnavailable`.
    pub(crate) fn with_algorithm(algorithm: &CStr, operation: &'static str) -> CryptoResult<Self> {
        oqs::init();

        // SAFETY: `algorithm` is NUL-terminated and outlives the call.
        let raw = unsafe { OQS_KEM_new(algorithm.as_ptr()) };

        match NonNull::new(raw) {
            Some(raw) => {
                debug!("Created {:?} engine for {}", algorithm, operation);
                Ok(Self { raw, operation })
            }
            None => {
                warn!("{:?} engine unavailable for {}", algorithm, operation);
                Err(CryptoError::engine_unavailable(
                    operation,
                    "OQS_KEM_new returned null",
                ))
            }
        }
    }

    fn inner(&self) -> &OQS_KEM {
        // SAFETY: `raw` came from OQS_KEM_new and stays valid until Drop.
        unsafe { self.raw.as_ref() }
    }

    /// Read one of the fixed parameter lengths from the instance
    pub(crate) fn length(&self, kind: LengthKind) -> usize {
        let kem = self.inner();
        match kind {
            LengthKind::PublicKey => kem.length_public_key,
            LengthKind::SecretKey => kem.length_secret_key,
            LengthKind::SharedSecret => kem.length_shared_secret,
            LengthKind::Ciphertext => kem.length_ciphertext,
        }
    }

    /// Generate a key pair straight into the given buffers.
    ///
    /// # Safety
    ///
    /// `public_key` and `secret_key` must be valid for writes of
    /// `length(PublicKey)` and `length(SecretKey)` bytes respectively.
    pub(crate) unsafe fn keypair_raw(&self, public_key: *mut u8, secret_key: *mut u8) -> CryptoResult<()> {
        let keypair = self.inner().keypair.ok_or_else(|| {
            CryptoError::engine_unavailable(self.operation, "keypair not provided by liboqs")
        })?;

        let status = keypair(public_key, secret_key) as c_int;
        self.check(status, error_codes::KYBER_KEY_GENERATION_FAILED)
    }

    /// Encapsulate against `public_key`, writing ciphertext and shared secret.
    ///
    /// # Safety
    ///
    /// `ciphertext` and `shared_secret` must be valid for writes of their
    /// parameter lengths; `public_key` must be valid for reads of
    /// `length(PublicKey)` bytes.
    pub(crate) unsafe fn encapsulate_raw(
        &self,
        ciphertext: *mut u8,
        shared_secret: *mut u8,
        public_key: *const u8,
    ) -> CryptoResult<()> {
        let encaps = self.inner().encaps.ok_or_else(|| {
            CryptoError::engine_unavailable(self.operation, "encaps not provided by liboqs")
        })?;

        let status = encaps(ciphertext, shared_secret, public_key) as c_int;
        self.check(status, error_codes::KYBER_ENCAPSULATION_FAILED)
    }

    /// Decapsulate `ciphertext` with `secret_key`, writing the shared secret.
    ///
    /// # Safety
    ///
    /// `shared_secret` must be valid for writes of `length(SharedSecret)`
    /// bytes; `ciphertext` and `secret_key` must be valid for reads of their
    /// parameter lengths.
    pub(crate) unsafe fn decapsulate_raw(
        &self,
        shared_secret: *mut u8,
        ciphertext: *const u8,
        secret_key: *const u8,
    ) -> CryptoResult<()> {
        let decaps = self.inner().decaps.ok_or_else(|| {
            CryptoError::engine_unavailable(self.operation, "decaps not provided by liboqs")
        })?;

        let status = decaps(shared_secret, ciphertext, secret_key) as c_int;
        self.check(status, error_codes::KYBER_DECAPSULATION_FAILED)
    }

    fn check(&self, status: c_int, error_code: u32) -> CryptoResult<()> {
        if status == 0 {
            return Ok(());
        }

        warn!("Kyber768 {} returned status {}", self.operation, status);
        Err(CryptoError::primitive_failure(self.operation, status, error_code))
    }
}

impl Drop for KemEngine {
    fn drop(&mut self) {
        // SAFETY: `raw` is owned by this guard and freed exactly once.
        unsafe { OQS_KEM_free(self.raw.as_ptr()) };
        debug!("Released Kyber768 engine for {}", self.operation);
    }
}
