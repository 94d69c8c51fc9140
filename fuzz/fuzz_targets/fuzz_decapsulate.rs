#![no_main]

use arbitrary::Arbitrary;
use kyber_wrapper::ffi::{kyber_decapsulate_checked, kyber_encapsulate_checked};
use kyber_wrapper::kyber::{KyberKeyPair, KYBER768_SHARED_SECRET_LENGTH};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct KyberFuzzInput {
    ciphertext: Vec<u8>,
    public_key: Vec<u8>,
    shared_secret_len: u8,
}

fuzz_target!(|input: KyberFuzzInput| {
    let key_pair = match KyberKeyPair::generate() {
        Ok(key_pair) => key_pair,
        Err(_) => return,
    };
    let secret_key = key_pair.secret_key().as_bytes();
    let mut shared_secret = vec![0u8; input.shared_secret_len as usize];

    // Arbitrary ciphertext bytes and buffer sizes must never crash the boundary
    let status = unsafe {
        kyber_decapsulate_checked(
            shared_secret.as_mut_ptr(),
            shared_secret.len(),
            input.ciphertext.as_ptr(),
            input.ciphertext.len(),
            secret_key.as_ptr(),
            secret_key.len(),
        )
    };
    if status == 0 {
        assert!(shared_secret.len() >= KYBER768_SHARED_SECRET_LENGTH);
    }

    let mut ciphertext = vec![0u8; input.ciphertext.len()];
    let _ = unsafe {
        kyber_encapsulate_checked(
            ciphertext.as_mut_ptr(),
            ciphertext.len(),
            shared_secret.as_mut_ptr(),
            shared_secret.len(),
            input.public_key.as_ptr(),
            input.public_key.len(),
        )
    };
});
