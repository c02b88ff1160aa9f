//! Payload encryption.
//!
//! Only a repeating-key XOR is provided. It hides the payload from casual
//! inspection and nothing more.

mod xor;

pub use xor::xor_cipher;

use crate::config::Encryption;

/// Encrypt `data` with the configured scheme. `Encryption::None` returns a copy.
pub fn encrypt(data: &[u8], encryption: Encryption, password: &str) -> Vec<u8> {
    match encryption {
        Encryption::None => data.to_vec(),
        Encryption::Xor => xor_cipher(data, password.as_bytes()),
    }
}

/// Decrypt `data`. XOR is its own inverse.
pub fn decrypt(data: &[u8], encryption: Encryption, password: &str) -> Vec<u8> {
    encrypt(data, encryption, password)
}
