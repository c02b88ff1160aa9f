//! Bit-level helpers. Bytes are serialized MSB first.

/// Read bit `position` (0 = least significant) of `byte`.
#[inline]
pub fn get_bit(byte: u8, position: u8) -> u8 {
    (byte >> position) & 1
}

/// Return `byte` with bit `position` set to `value` (0 or 1).
#[inline]
pub fn set_bit(byte: u8, position: u8, value: u8) -> u8 {
    if value & 1 == 1 {
        byte | (1 << position)
    } else {
        byte & !(1 << position)
    }
}

/// Expand bytes into bits, most significant bit of each byte first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1);
        }
    }
    bits
}

/// Pack bits back into bytes. A trailing partial byte is zero-padded.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &bit)| acc | ((bit & 1) << (7 - i)))
        })
        .collect()
}
