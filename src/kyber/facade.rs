/*!
 * Buffer-oriented Kyber768 operations
 *
 * Each operation creates its own engine, writes only into the buffers it is
 * given, and releases the engine before returning. Output buffers must be at
 * least the parameter length (only that prefix is written); input buffers
 * must be exactly the parameter length.
 */

use crate::error::{CryptoError, CryptoResult};
use crate::kyber::engine::KemEngine;
use crate::kyber::params::LengthKind;

fn check_output(engine: &KemEngine, kind: LengthKind, buffer: &'static str, len: usize) -> CryptoResult<()> {
    let expected = engine.length(kind);
    if len < expected {
        return Err(CryptoError::buffer_too_small(buffer, expected, len));
    }
    Ok(())
}

fn check_input(engine: &KemEngine, kind: LengthKind, len: usize) -> CryptoResult<()> {
    let expected = engine.length(kind);
    if len != expected {
        return Err(CryptoError::invalid_length(kind, expected, len));
    }
    Ok(())
}

/// Generate a fresh Kyber768 key pair into caller-owned buffers.
///
/// Nothing is written if the engine cannot be created or a buffer is too
/// small.
///
/// # Examples
///
/// ```
/// use kyber_wrapper::kyber::{generate_keypair, KYBER768_PUBLIC_KEY_LENGTH, KYBER768_SECRET_KEY_LENGTH};
///
/// let mut pk = vec![0u8; KYBER768_PUBLIC_KEY_LENGTH];
/// let mut sk = vec![0u8; KYBER768_SECRET_KEY_LENGTH];
/// generate_keypair(&mut pk, &mut sk).unwrap();
/// ```
pub fn generate_keypair(public_key: &mut [u8], secret_key: &mut [u8]) -> CryptoResult<()> {
    generate_keypair_with(KemEngine::new, public_key, secret_key)
}

pub(crate) fn generate_keypair_with<F>(
    open: F,
    public_key: &mut [u8],
    secret_key: &mut [u8],
) -> CryptoResult<()>
where
    F: FnOnce(&'static str) -> CryptoResult<KemEngine>,
{
    let engine = open("generate_keypair")?;
    check_output(&engine, LengthKind::PublicKey, "public_key", public_key.len())?;
    check_output(&engine, LengthKind::SecretKey, "secret_key", secret_key.len())?;

    // SAFETY: both buffers were checked against the engine's lengths.
    unsafe { engine.keypair_raw(public_key.as_mut_ptr(), secret_key.as_mut_ptr()) }
}

/// Encapsulate a fresh shared secret against `public_key`.
///
/// On `Ok` both outputs are fully populated. On a primitive failure their
/// contents are unspecified and must not be used.
pub fn encapsulate(ciphertext: &mut [u8], shared_secret: &mut [u8], public_key: &[u8]) -> CryptoResult<()> {
    encapsulate_with(KemEngine::new, ciphertext, shared_secret, public_key)
}

pub(crate) fn encapsulate_with<F>(
    open: F,
    ciphertext: &mut [u8],
    shared_secret: &mut [u8],
    public_key: &[u8],
) -> CryptoResult<()>
where
    F: FnOnce(&'static str) -> CryptoResult<KemEngine>,
{
    let engine = open("encapsulate")?;
    check_input(&engine, LengthKind::PublicKey, public_key.len())?;
    check_output(&engine, LengthKind::Ciphertext, "ciphertext", ciphertext.len())?;
    check_output(&engine, LengthKind::SharedSecret, "shared_secret", shared_secret.len())?;

    // SAFETY: every buffer was checked against the engine's lengths.
    unsafe {
        engine.encapsulate_raw(
            ciphertext.as_mut_ptr(),
            shared_secret.as_mut_ptr(),
            public_key.as_ptr(),
        )
    }
}

/// Recover the shared secret carried by `ciphertext` using `secret_key`.
///
/// With the matching secret key and an unaltered ciphertext, the result is
/// byte-identical to the secret produced by [`encapsulate`]. Kyber rejects
/// tampered ciphertexts implicitly: the call succeeds but yields an
/// unrelated secret.
pub fn decapsulate(shared_secret: &mut [u8], ciphertext: &[u8], secret_key: &[u8]) -> CryptoResult<()> {
    decapsulate_with(KemEngine::new, shared_secret, ciphertext, secret_key)
}

pub(crate) fn decapsulate_with<F>(
    open: F,
    shared_secret: &mut [u8],
    ciphertext: &[u8],
    secret_key: &[u8],
) -> CryptoResult<()>
where
    F: FnOnce(&'static str) -> CryptoResult<KemEngine>,
{
    let engine = open("decapsulate")?;
    check_input(&engine, LengthKind::Ciphertext, ciphertext.len())?;
    check_input(&engine, LengthKind::SecretKey, secret_key.len())?;
    check_output(&engine, LengthKind::SharedSecret, "shared_secret", shared_secret.len())?;

    // SAFETY: every buffer was checked against the engine's lengths.
    unsafe {
        engine.decapsulate_raw(
            shared_secret.as_mut_ptr(),
            ciphertext.as_ptr(),
            secret_key.as_ptr(),
        )
    }
}
