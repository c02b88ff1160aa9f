//! Repeating-key XOR cipher.

/// XOR `data` with `key` repeated from offset 0.
///
/// Byte `i` of the output only depends on byte `i` of the input and
/// `key[i % key.len()]`, so any prefix can be decrypted on its own.
/// An empty key leaves the data unchanged.
pub fn xor_cipher(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_roundtrip() {
        let plaintext = b"Hello, World! This is a secret message.";
        let key = b"secure_password_123";

        let encrypted = xor_cipher(plaintext, key);
        assert_ne!(encrypted, plaintext.to_vec());

        let decrypted = xor_cipher(&encrypted, key);
        assert_eq!(decrypted, plaintext.to_vec());
    }

    #[test]
    fn test_prefix_decrypts_independently() {
        let plaintext: Vec<u8> = (0..100).map(|i| (i * 7) as u8).collect();
        let encrypted = xor_cipher(&plaintext, b"key");

        let prefix = xor_cipher(&encrypted[..12], b"key");
        assert_eq!(prefix, plaintext[..12].to_vec());
    }

    #[test]
    fn test_empty_key_is_identity() {
        assert_eq!(xor_cipher(b"abc", b""), b"abc".to_vec());
    }

    #[test]
    fn test_empty_plaintext() {
        assert!(xor_cipher(b"", b"key").is_empty());
    }
}
