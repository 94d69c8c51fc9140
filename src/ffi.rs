/*!
 * FFI interface for the Kyber768 KEM facade
 *
 * Flat C-compatible functions over caller-allocated buffers, for hosts that
 * load this crate as a linked or embedded module. Every function returns an
 * integer status: `0` on success, `-1` when the engine could not be created,
 * and the primitive's own status code verbatim when liboqs reports a failure.
 *
 * The `kyber_*` functions trust the host to pass buffers of the queried
 * lengths and perform no bounds checking. The `*_checked` variants take an
 * explicit length per buffer and additionally return `-2` for a buffer of the
 * wrong length and `-3` for a null pointer.
 */

use std::slice;

use libc::{c_int, size_t};

use crate::error::{CryptoError, CryptoResult, STATUS_ENGINE_UNAVAILABLE, STATUS_SUCCESS};
use crate::kyber::engine::KemEngine;
use crate::kyber::{self, LengthKind};

// Helper function to convert a result to a C return code
fn status_of(result: CryptoResult<()>) -> c_int {
    match result {
        Ok(()) => STATUS_SUCCESS,
        Err(err) => err.status(),
    }
}

// Run one raw operation against a fresh engine
fn with_engine<F>(operation: &'static str, f: F) -> c_int
where
    F: FnOnce(&KemEngine) -> CryptoResult<()>,
{
    let engine = match KemEngine::new(operation) {
        Ok(engine) => engine,
        Err(err) => return err.status(),
    };
    status_of(f(&engine))
}

fn length_status(kind: LengthKind) -> c_int {
    match kyber::query_length(kind) {
        Ok(length) => c_int::try_from(length).unwrap_or(STATUS_ENGINE_UNAVAILABLE),
        Err(err) => err.status(),
    }
}

unsafe fn output_slice<'a>(ptr: *mut u8, len: size_t, parameter: &'static str) -> CryptoResult<&'a mut [u8]> {
    if ptr.is_null() {
        return Err(CryptoError::null_pointer(parameter));
    }
    Ok(slice::from_raw_parts_mut(ptr, len))
}

unsafe fn input_slice<'a>(ptr: *const u8, len: size_t, parameter: &'static str) -> CryptoResult<&'a [u8]> {
    if ptr.is_null() {
        return Err(CryptoError::null_pointer(parameter));
    }
    Ok(slice::from_raw_parts(ptr, len))
}

unsafe fn generate_checked(
    public_key: *mut u8,
    public_key_len: size_t,
    secret_key: *mut u8,
    secret_key_len: size_t,
) -> CryptoResult<()> {
    let public_key = output_slice(public_key, public_key_len, "public_key")?;
    let secret_key = output_slice(secret_key, secret_key_len, "secret_key")?;
    kyber::generate_keypair(public_key, secret_key)
}

unsafe fn encapsulate_checked(
    ciphertext: *mut u8,
    ciphertext_len: size_t,
    shared_secret: *mut u8,
    shared_secret_len: size_t,
    public_key: *const u8,
    public_key_len: size_t,
) -> CryptoResult<()> {
    let ciphertext = output_slice(ciphertext, ciphertext_len, "ciphertext")?;
    let shared_secret = output_slice(shared_secret, shared_secret_len, "shared_secret")?;
    let public_key = input_slice(public_key, public_key_len, "public_key")?;
    kyber::encapsulate(ciphertext, shared_secret, public_key)
}

unsafe fn decapsulate_checked(
    shared_secret: *mut u8,
    shared_secret_len: size_t,
    ciphertext: *const u8,
    ciphertext_len: size_t,
    secret_key: *const u8,
    secret_key_len: size_t,
) -> CryptoResult<()> {
    let shared_secret = output_slice(shared_secret, shared_secret_len, "shared_secret")?;
    let ciphertext = input_slice(ciphertext, ciphertext_len, "ciphertext")?;
    let secret_key = input_slice(secret_key, secret_key_len, "secret_key")?;
    kyber::decapsulate(shared_secret, ciphertext, secret_key)
}

// Kyber Functions

/// Generate a Kyber768 key pair into `public_key` and `secret_key`.
///
/// Nothing is written when the engine cannot be created (`-1`).
///
/// # Safety
///
/// `public_key` must be writable for `get_kyber_768_public_key_length()`
/// bytes and `secret_key` for `get_kyber_768_secret_key_length()` bytes.
/// The buffers must not overlap.
#[no_mangle]
pub unsafe extern "C" fn kyber_generate_keypair(public_key: *mut u8, secret_key: *mut u8) -> c_int {
    with_engine("generate_keypair", |engine| {
        engine.keypair_raw(public_key, secret_key)
    })
}

/// Encapsulate a shared secret against `public_key`.
///
/// # Safety
///
/// `ciphertext` and `shared_secret` must be writable for the ciphertext and
/// shared secret lengths; `public_key` must be readable for the public key
/// length. No buffer may overlap another.
#[no_mangle]
pub unsafe extern "C" fn kyber_encapsulate(
    ciphertext: *mut u8,
    shared_secret: *mut u8,
    public_key: *const u8,
) -> c_int {
    with_engine("encapsulate", |engine| {
        engine.encapsulate_raw(ciphertext, shared_secret, public_key)
    })
}

/// Decapsulate `ciphertext` with `secret_key` into `shared_secret`.
///
/// # Safety
///
/// `shared_secret` must be writable for the shared secret length;
/// `ciphertext` and `secret_key` must be readable for their lengths. No
/// buffer may overlap another.
#[no_mangle]
pub unsafe extern "C" fn kyber_decapsulate(
    shared_secret: *mut u8,
    ciphertext: *const u8,
    secret_key: *const u8,
) -> c_int {
    with_engine("decapsulate", |engine| {
        engine.decapsulate_raw(shared_secret, ciphertext, secret_key)
    })
}

// Length queries

#[no_mangle]
pub extern "C" fn get_kyber_768_public_key_length() -> c_int {
    length_status(LengthKind::PublicKey)
}

#[no_mangle]
pub extern "C" fn get_kyber_768_secret_key_length() -> c_int {
    length_status(LengthKind::SecretKey)
}

#[no_mangle]
pub extern "C" fn get_kyber_768_shared_secret_length() -> c_int {
    length_status(LengthKind::SharedSecret)
}

#[no_mangle]
pub extern "C" fn get_kyber_768_ciphertext_length() -> c_int {
    length_status(LengthKind::Ciphertext)
}

// Length-checked variants

/// Length-checked [`kyber_generate_keypair`].
///
/// # Safety
///
/// Each non-null pointer must be writable for the length passed with it.
#[no_mangle]
pub unsafe extern "C" fn kyber_generate_keypair_checked(
    public_key: *mut u8,
    public_key_len: size_t,
    secret_key: *mut u8,
    secret_key_len: size_t,
) -> c_int {
    status_of(generate_checked(public_key, public_key_len, secret_key, secret_key_len))
}

/// Length-checked [`kyber_encapsulate`].
///
/// # Safety
///
/// Each non-null pointer must be valid for the length passed with it, and
/// no buffer may overlap another.
#[no_mangle]
pub unsafe extern "C" fn kyber_encapsulate_checked(
    ciphertext: *mut u8,
    ciphertext_len: size_t,
    shared_secret: *mut u8,
    shared_secret_len: size_t,
    public_key: *const u8,
    public_key_len: size_t,
) -> c_int {
    status_of(encapsulate_checked(
        ciphertext,
        ciphertext_len,
        shared_secret,
        shared_secret_len,
        public_key,
        public_key_len,
    ))
}

/// Length-checked [`kyber_decapsulate`].
///
/// # Safety
///
/// Each non-null pointer must be valid for the length passed with it, and
/// no buffer may overlap another.
#[no_mangle]
pub unsafe extern "C" fn kyber_decapsulate_checked(
    shared_secret: *mut u8,
    shared_secret_len: size_t,
    ciphertext: *const u8,
    ciphertext_len: size_t,
    secret_key: *const u8,
    secret_key_len: size_t,
) -> c_int {
    status_of(decapsulate_checked(
        shared_secret,
        shared_secret_len,
        ciphertext,
        ciphertext_len,
        secret_key,
        secret_key_len,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{STATUS_INVALID_LENGTH, STATUS_NULL_POINTER};
    use std::ptr;

    fn lengths() -> (usize, usize, usize, usize) {
        (
            get_kyber_768_public_key_length() as usize,
            get_kyber_768_secret_key_length() as usize,
            get_kyber_768_ciphertext_length() as usize,
            get_kyber_768_shared_secret_length() as usize,
        )
    }

    #[test]
    fn test_unchecked_round_trip() {
        let (pk_len, sk_len, ct_len, ss_len) = lengths();
        let mut pk = vec![0u8; pk_len];
        let mut sk = vec![0u8; sk_len];
        let mut ct = vec![0u8; ct_len];
        let mut ss1 = vec![0u8; ss_len];
        let mut ss2 = vec![0u8; ss_len];

        unsafe {
            assert_eq!(kyber_generate_keypair(pk.as_mut_ptr(), sk.as_mut_ptr()), 0);
            assert_eq!(kyber_encapsulate(ct.as_mut_ptr(), ss1.as_mut_ptr(), pk.as_ptr()), 0);
            assert_eq!(kyber_decapsulate(ss2.as_mut_ptr(), ct.as_ptr(), sk.as_ptr()), 0);
        }

        assert_eq!(ss1, ss2);
    }

    #[test]
    fn test_checked_round_trip() {
        let (pk_len, sk_len, ct_len, ss_len) = lengths();
        let mut pk = vec![0u8; pk_len];
        let mut sk = vec![0u8; sk_len];
        let mut ct = vec![0u8; ct_len];
        let mut ss1 = vec![0u8; ss_len];
        let mut ss2 = vec![0u8; ss_len];

        unsafe {
            assert_eq!(
                kyber_generate_keypair_checked(pk.as_mut_ptr(), pk.len(), sk.as_mut_ptr(), sk.len()),
                0
            );
            assert_eq!(
                kyber_encapsulate_checked(
                    ct.as_mut_ptr(),
                    ct.len(),
                    ss1.as_mut_ptr(),
                    ss1.len(),
                    pk.as_ptr(),
                    pk.len()
                ),
                0
            );
            assert_eq!(
                kyber_decapsulate_checked(
                    ss2.as_mut_ptr(),
                    ss2.len(),
                    ct.as_ptr(),
                    ct.len(),
                    sk.as_ptr(),
                    sk.len()
                ),
                0
            );
        }

        assert_eq!(ss1, ss2);
    }

    #[test]
    fn test_checked_rejects_null_and_short_buffers() {
        let (pk_len, sk_len, _, _) = lengths();
        let mut pk = vec![0u8; pk_len];
        let mut sk = vec![0u8; sk_len];

        unsafe {
            assert_eq!(
                kyber_generate_keypair_checked(ptr::null_mut(), pk_len, sk.as_mut_ptr(), sk.len()),
                STATUS_NULL_POINTER
            );
            assert_eq!(
                kyber_generate_keypair_checked(pk.as_mut_ptr(), pk.len(), sk.as_mut_ptr(), 16),
                STATUS_INVALID_LENGTH
            );
        }
    }

    #[test]
    fn test_length_queries_are_positive() {
        let (pk_len, sk_len, ct_len, ss_len) = lengths();
        assert_eq!(pk_len, 1184);
        assert_eq!(sk_len, 2400);
        assert_eq!(ct_len, 1088);
        assert_eq!(ss_len, 32);
    }
}
