/*!
 * CRYSTALS-Kyber768 key encapsulation over caller-owned buffers
 *
 * Every operation instantiates its own liboqs engine and releases it before
 * returning, so nothing is shared between calls.
 */

pub(crate) mod engine;
mod facade;
mod keys;
mod params;

pub use facade::{decapsulate, encapsulate, generate_keypair};
pub use keys::{KyberCiphertext, KyberKeyPair, KyberPublicKey, KyberSecretKey, SharedSecret};
pub use params::*;
