/*!
 * Kyber768 Key Encapsulation Facade
 *
 * Exposes the CRYSTALS-Kyber768 key encapsulation mechanism from liboqs to
 * hosts that can only call flat functions over caller-supplied byte buffers.
 *
 * Three surfaces are provided, all built on the same per-call engine:
 *
 * - [`kyber`]: the four operations (key generation, encapsulation,
 *   decapsulation, length queries) over Rust slices, plus owned key types
 * - [`ffi`]: `extern "C"` entry points returning integer status codes
 * - [`error`]: the shared error type and status mapping
 *
 * No state is kept between calls. Each operation creates its own engine
 * instance and releases it before returning.
 */

/// CRYSTALS-Kyber768 key encapsulation
pub mod kyber;

/// Common error types and host status codes
pub mod error;

/// Foreign Function Interface (FFI) for embedding hosts
pub mod ffi;

pub use error::{CryptoError, CryptoResult};
pub use kyber::{KyberCiphertext, KyberKeyPair, KyberPublicKey, KyberSecretKey, LengthKind, SharedSecret};

/// Initialize the underlying cryptographic library.
///
/// Optional: every operation initializes liboqs on first use. Hosts that
/// want to pay the setup cost up front can call this once at load time.
///
/// # Example
///
/// ```
/// use kyber_wrapper::prelude::*;
///
/// fn main() -> Result<(), CryptoError> {
///     init()?;
///
///     let pk_len = query_length(LengthKind::PublicKey)?;
///     assert!(pk_len > 0);
///     Ok(())
/// }
/// ```
pub fn init() -> Result<(), CryptoError> {
    oqs::init();
    log::debug!("liboqs initialized");
    Ok(())
}

/// Provides the commonly used operations and types in one import.
pub mod prelude {
    pub use crate::init;
    pub use crate::kyber::{
        decapsulate, encapsulate, generate_keypair, query_length, KyberCiphertext, KyberKeyPair,
        KyberPublicKey, KyberSecretKey, LengthKind, SharedSecret,
    };
    pub use crate::CryptoError;
    pub use crate::CryptoResult;
}
