//! Payload decoder.

use crate::config::{EngineOptions, HEADER_SIZE};
use crate::crypto;
use crate::error::{Error, Result};
use crate::pixels::PixelBuffer;
use crate::stego::{capacity, carrier, payload};

/// Message recovered from an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    pub data: Vec<u8>,
    /// `data` as UTF-8, invalid sequences replaced.
    pub text: String,
    pub bytes_decoded: usize,
}

/// File recovered from an image written with `encode_file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Recover the message hidden in `image` with `options`.
///
/// The header is read first to learn the message length, then header and
/// body are read again in one pass: spread-mode positions depend on the
/// total bit count, so the second read starts from scratch.
pub fn decode(image: &PixelBuffer, options: &EngineOptions) -> Result<DecodeResult> {
    options.validate()?;

    let raw_header = carrier::extract(image, HEADER_SIZE, options).ok_or(Error::NoHiddenData)?;
    let header_bytes = crypto::decrypt(&raw_header, options.encryption, &options.password);
    let header = payload::Header::parse(&header_bytes)?;

    let usable = capacity::calculate(image, options).usable_bytes;
    if header.length == 0 || header.length as usize > usable {
        return Err(Error::InvalidLength {
            length: header.length,
            max: usable,
        });
    }

    let total = HEADER_SIZE + header.length as usize;
    let raw = carrier::extract(image, total, options).ok_or(Error::InvalidLength {
        length: header.length,
        max: usable,
    })?;
    let decrypted = crypto::decrypt(&raw, options.encryption, &options.password);
    let (data, length) = payload::parse(&decrypted)?;

    tracing::debug!(bytes = length, spread = options.spread, "payload extracted");

    Ok(DecodeResult {
        text: String::from_utf8_lossy(&data).into_owned(),
        data,
        bytes_decoded: length as usize,
    })
}

/// Recover a file packed with a filename prefix.
pub fn decode_file(image: &PixelBuffer, options: &EngineOptions) -> Result<DecodedFile> {
    let result = decode(image, options)?;
    let (filename, data) = payload::unpack_file(&result.data)?;
    Ok(DecodedFile { filename, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::encoder::encode;

    #[test]
    fn test_roundtrip() {
        let cover = PixelBuffer::filled(40, 40, 0x5A).unwrap();
        let options = EngineOptions::default();
        let encoded = encode(&cover, b"Hello, World!", &options).unwrap();

        let decoded = decode(&encoded.image, &options).unwrap();
        assert_eq!(decoded.data, b"Hello, World!".to_vec());
        assert_eq!(decoded.text, "Hello, World!");
        assert_eq!(decoded.bytes_decoded, 13);
    }

    #[test]
    fn test_clean_image_has_no_data() {
        let cover = PixelBuffer::filled(40, 40, 0).unwrap();
        assert!(matches!(
            decode(&cover, &EngineOptions::default()),
            Err(Error::NoHiddenData)
        ));
    }

    #[test]
    fn test_tiny_image_has_no_data() {
        let cover = PixelBuffer::filled(2, 2, 0).unwrap();
        assert!(matches!(
            decode(&cover, &EngineOptions::default()),
            Err(Error::NoHiddenData)
        ));
    }

    #[test]
    fn test_zero_length_rejected() {
        let cover = PixelBuffer::filled(40, 40, 0).unwrap();
        let options = EngineOptions::default();
        let encoded = encode(&cover, b"", &options).unwrap();

        assert!(matches!(
            decode(&encoded.image, &options),
            Err(Error::InvalidLength { length: 0, .. })
        ));
    }

    #[test]
    fn test_oversized_length_rejected() {
        let cover = PixelBuffer::filled(40, 40, 0).unwrap();
        let options = EngineOptions::default();
        let encoded = encode(&cover, &[7u8; 500], &options).unwrap();

        // Keep the first 4 rows: 160 px, 48 usable bytes. The header
        // survives but its length no longer fits.
        let rows = encoded.image.data()[..40 * 4 * 4].to_vec();
        let cropped = PixelBuffer::new(40, 4, rows).unwrap();
        assert!(matches!(
            decode(&cropped, &options),
            Err(Error::InvalidLength {
                length: 500,
                max: 48
            })
        ));
    }

    #[test]
    fn test_wrong_password() {
        let cover = PixelBuffer::filled(40, 40, 0).unwrap();
        let encoded = encode(&cover, b"secret", &EngineOptions::default().with_xor("right")).unwrap();

        let result = decode(&encoded.image, &EngineOptions::default().with_xor("wrong"));
        assert!(matches!(result, Err(Error::NoHiddenData)));
    }

    #[test]
    fn test_decode_file() {
        let cover = PixelBuffer::filled(40, 40, 0).unwrap();
        let options = EngineOptions::default();
        let packed = payload::pack_file(b"contents", "a.bin").unwrap();
        let encoded = encode(&cover, &packed, &options).unwrap();

        let file = decode_file(&encoded.image, &options).unwrap();
        assert_eq!(file.filename, "a.bin");
        assert_eq!(file.data, b"contents".to_vec());
    }
}
