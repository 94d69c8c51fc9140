/*!
 * Error Handling for the Kyber768 KEM facade
 *
 * Provides the error type shared by the Rust API and the C boundary, numeric
 * error codes for diagnostics, and the mapping onto the integer statuses that
 * hosts receive.
 */

use libc::c_int;
use thiserror::Error;

use crate::kyber::LengthKind;

/// Status returned to hosts on success
pub const STATUS_SUCCESS: c_int = 0;

/// Status returned when the KEM engine could not be instantiated
pub const STATUS_ENGINE_UNAVAILABLE: c_int = -1;

/// Status returned when an output buffer is too short or an input is not
/// exactly the parameter length
pub const STATUS_INVALID_LENGTH: c_int = -2;

/// Status returned when a caller-supplied pointer is null
pub const STATUS_NULL_POINTER: c_int = -3;

/// Status returned when a key pair's halves do not belong together
pub const STATUS_KEY_MISMATCH: c_int = -4;

/// Error type for all KEM facade operations
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Kyber engine unavailable during {operation}: {cause}")]
    EngineUnavailable {
        operation: &'static str,
        cause: String,
        error_code: u32,
    },

    /// The primitive ran and reported a non-zero status, kept verbatim.
    #[error("Kyber {operation} failed with primitive status {status}")]
    PrimitiveFailure {
        operation: &'static str,
        status: c_int,
        error_code: u32,
    },

    #[error("Buffer '{buffer}' too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall {
        buffer: &'static str,
        expected: usize,
        actual: usize,
        error_code: u32,
    },

    #[error("Invalid length for {kind}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: LengthKind,
        expected: usize,
        actual: usize,
        error_code: u32,
    },

    #[error("Null pointer passed for '{parameter}'")]
    NullPointer {
        parameter: &'static str,
        error_code: u32,
    },

    #[error("Kyber key pair mismatch: decapsulated secret differs from encapsulated secret")]
    KeyMismatch { error_code: u32 },
}

/// Error code constants, Kyber range 1000-1999
pub mod error_codes {
    pub const KYBER_INITIALIZATION_FAILED: u32 = 1000;
    pub const KYBER_KEY_GENERATION_FAILED: u32 = 1001;
    pub const KYBER_ENCAPSULATION_FAILED: u32 = 1002;
    pub const KYBER_DECAPSULATION_FAILED: u32 = 1003;
    pub const KYBER_INVALID_KEY_SIZE: u32 = 1004;
    pub const KYBER_INVALID_CIPHERTEXT: u32 = 1005;
    pub const KYBER_BUFFER_TOO_SMALL: u32 = 1006;
    pub const KYBER_NULL_POINTER: u32 = 1007;
    pub const KYBER_KEY_MISMATCH: u32 = 1008;
}

impl CryptoError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            CryptoError::EngineUnavailable { error_code, .. } => *error_code,
            CryptoError::PrimitiveFailure { error_code, .. } => *error_code,
            CryptoError::BufferTooSmall { error_code, .. } => *error_code,
            CryptoError::InvalidLength { error_code, .. } => *error_code,
            CryptoError::NullPointer { error_code, .. } => *error_code,
            CryptoError::KeyMismatch { error_code } => *error_code,
        }
    }

    /// Get the integer status a host receives for this error.
    ///
    /// Primitive statuses are passed through unchanged, so a liboqs
    /// `OQS_ERROR` surfaces as `-1` just like an engine failure.
    pub fn status(&self) -> c_int {
        match self {
            CryptoError::EngineUnavailable { .. } => STATUS_ENGINE_UNAVAILABLE,
            CryptoError::PrimitiveFailure { status, .. } => *status,
            CryptoError::BufferTooSmall { .. } | CryptoError::InvalidLength { .. } => {
                STATUS_INVALID_LENGTH
            }
            CryptoError::NullPointer { .. } => STATUS_NULL_POINTER,
            CryptoError::KeyMismatch { .. } => STATUS_KEY_MISMATCH,
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        match self {
            CryptoError::EngineUnavailable { operation, .. } => format!(
                "The Kyber768 engine could not be created for '{}'. Key exchange is unavailable.",
                operation
            ),
            CryptoError::PrimitiveFailure { operation, .. } => format!(
                "Key exchange operation '{}' failed. The key or ciphertext may be malformed.",
                operation
            ),
            CryptoError::BufferTooSmall { buffer, expected, .. } => format!(
                "Buffer '{}' must hold at least {} bytes.",
                buffer, expected
            ),
            CryptoError::InvalidLength { kind, expected, .. } => {
                format!("A Kyber768 {} must be exactly {} bytes.", kind, expected)
            }
            CryptoError::NullPointer { parameter, .. } => {
                format!("Parameter '{}' must not be null.", parameter)
            }
            CryptoError::KeyMismatch { .. } => {
                "The public and secret keys do not form a pair.".to_string()
            }
        }
    }

    /// Get suggested remediation steps
    pub fn suggested_remediation(&self) -> Option<String> {
        match self {
            CryptoError::EngineUnavailable { .. } => Some(
                "Check that liboqs was built with Kyber enabled and that memory is available."
                    .to_string(),
            ),
            CryptoError::BufferTooSmall { .. } | CryptoError::InvalidLength { .. } => Some(
                "Query the parameter lengths once and size every buffer from them.".to_string(),
            ),
            CryptoError::NullPointer { .. } => {
                Some("Allocate every buffer before calling into the module.".to_string())
            }
            CryptoError::KeyMismatch { .. } => Some(
                "Regenerate the key pair or reload both halves from the same source.".to_string(),
            ),
            CryptoError::PrimitiveFailure { .. } => None,
        }
    }

    /// Get the error category/type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            CryptoError::EngineUnavailable { .. } => "EngineUnavailable",
            CryptoError::PrimitiveFailure { .. } => "PrimitiveFailure",
            CryptoError::BufferTooSmall { .. } => "BufferTooSmall",
            CryptoError::InvalidLength { .. } => "InvalidLength",
            CryptoError::NullPointer { .. } => "NullPointer",
            CryptoError::KeyMismatch { .. } => "KeyMismatch",
        }
    }
}

/// Convenience constructors for common error types
impl CryptoError {
    pub fn engine_unavailable(operation: &'static str, cause: &str) -> Self {
        CryptoError::EngineUnavailable {
            operation,
            cause: cause.to_string(),
            error_code: error_codes::KYBER_INITIALIZATION_FAILED,
        }
    }

    pub fn primitive_failure(operation: &'static str, status: c_int, error_code: u32) -> Self {
        CryptoError::PrimitiveFailure {
            operation,
            status,
            error_code,
        }
    }

    pub fn buffer_too_small(buffer: &'static str, expected: usize, actual: usize) -> Self {
        CryptoError::BufferTooSmall {
            buffer,
            expected,
            actual,
            error_code: error_codes::KYBER_BUFFER_TOO_SMALL,
        }
    }

    pub fn invalid_length(kind: LengthKind, expected: usize, actual: usize) -> Self {
        let error_code = match kind {
            LengthKind::Ciphertext => error_codes::KYBER_INVALID_CIPHERTEXT,
            LengthKind::PublicKey | LengthKind::SecretKey | LengthKind::SharedSecret => {
                error_codes::KYBER_INVALID_KEY_SIZE
            }
        };

        CryptoError::InvalidLength {
            kind,
            expected,
            actual,
            error_code,
        }
    }

    pub fn null_pointer(parameter: &'static str) -> Self {
        CryptoError::NullPointer {
            parameter,
            error_code: error_codes::KYBER_NULL_POINTER,
        }
    }

    pub fn key_mismatch() -> Self {
        CryptoError::KeyMismatch {
            error_code: error_codes::KYBER_KEY_MISMATCH,
        }
    }
}

/// Result type alias for KEM operations
pub type CryptoResult<T> = Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_failure_maps_to_minus_one() {
        let error = CryptoError::engine_unavailable("encapsulate", "OQS_KEM_new returned null");
        assert_eq!(error.status(), STATUS_ENGINE_UNAVAILABLE);
        assert_eq!(error.error_code(), error_codes::KYBER_INITIALIZATION_FAILED);
    }

    #[test]
    fn test_primitive_status_is_passed_through() {
        let error = CryptoError::primitive_failure(
            "decapsulate",
            50,
            error_codes::KYBER_DECAPSULATION_FAILED,
        );
        assert_eq!(error.status(), 50);
        assert_eq!(error.error_type(), "PrimitiveFailure");
        assert!(error.to_string().contains("status 50"));
    }

    #[test]
    fn test_caller_errors_have_distinct_statuses() {
        let short = CryptoError::buffer_too_small("ciphertext", 1088, 10);
        let null = CryptoError::null_pointer("public_key");
        assert_eq!(short.status(), STATUS_INVALID_LENGTH);
        assert_eq!(null.status(), STATUS_NULL_POINTER);
        assert_ne!(short.status(), STATUS_ENGINE_UNAVAILABLE);
    }

    #[test]
    fn test_invalid_length_codes() {
        let ct = CryptoError::invalid_length(LengthKind::Ciphertext, 1088, 1087);
        let pk = CryptoError::invalid_length(LengthKind::PublicKey, 1184, 0);
        let sk = CryptoError::invalid_length(LengthKind::SecretKey, 2400, 2401);
        assert_eq!(ct.error_code(), error_codes::KYBER_INVALID_CIPHERTEXT);
        assert_eq!(pk.error_code(), error_codes::KYBER_INVALID_KEY_SIZE);
        assert_eq!(sk.error_code(), error_codes::KYBER_INVALID_KEY_SIZE);
        assert_eq!(ct.status(), STATUS_INVALID_LENGTH);
        assert_eq!(sk.status(), STATUS_INVALID_LENGTH);
        assert!(pk.to_string().contains("public key"));
        assert!(ct.user_friendly_message().contains("ciphertext"));
    }

    #[test]
    fn test_remediation_suggestions() {
        let error = CryptoError::buffer_too_small("shared_secret", 32, 16);
        let suggestion = error.suggested_remediation();
        assert!(suggestion.is_some());
        assert!(suggestion.unwrap().contains("Query"));
        assert!(error.user_friendly_message().contains("32"));
    }
}
