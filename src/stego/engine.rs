//! The steganography engine: validated options plus the operations that
//! use them.

use crate::config::{DecodeOptions, EngineOptions};
use crate::error::Result;
use crate::pixels::PixelBuffer;
use crate::stego::analysis::{self, DetectionResult};
use crate::stego::capacity::{self, CapacityInfo};
use crate::stego::decoder::{self, DecodeResult, DecodedFile};
use crate::stego::encoder::{self, EncodeResult};
use crate::stego::payload;

/// Encoder, decoder and detector bound to one immutable configuration.
///
/// The engine holds no other state, so one instance can serve any number
/// of images, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct SteganographyEngine {
    options: EngineOptions,
}

impl SteganographyEngine {
    /// Create an engine after validating `options`.
    pub fn new(options: EngineOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Hide a UTF-8 string or raw bytes.
    pub fn encode(&self, image: &PixelBuffer, message: impl AsRef<[u8]>) -> Result<EncodeResult> {
        encoder::encode(image, message.as_ref(), &self.options)
    }

    pub fn encode_text(&self, image: &PixelBuffer, text: &str) -> Result<EncodeResult> {
        self.encode(image, text)
    }

    /// Hide a file together with its name.
    pub fn encode_file(
        &self,
        image: &PixelBuffer,
        file_data: &[u8],
        filename: &str,
    ) -> Result<EncodeResult> {
        let packed = payload::pack_file(file_data, filename)?;
        self.encode(image, packed)
    }

    /// Recover a message. `overrides` apply to this call only.
    pub fn decode(
        &self,
        image: &PixelBuffer,
        overrides: Option<&DecodeOptions>,
    ) -> Result<DecodeResult> {
        decoder::decode(image, &self.effective(overrides))
    }

    pub fn decode_text(
        &self,
        image: &PixelBuffer,
        overrides: Option<&DecodeOptions>,
    ) -> Result<String> {
        self.decode(image, overrides).map(|r| r.text)
    }

    pub fn decode_file(
        &self,
        image: &PixelBuffer,
        overrides: Option<&DecodeOptions>,
    ) -> Result<DecodedFile> {
        decoder::decode_file(image, &self.effective(overrides))
    }

    pub fn calculate_capacity(&self, image: &PixelBuffer) -> CapacityInfo {
        capacity::calculate(image, &self.options)
    }

    /// Heuristic check for hidden data. Never fails.
    pub fn detect(&self, image: &PixelBuffer) -> DetectionResult {
        analysis::detect(image, &self.options)
    }

    fn effective(&self, overrides: Option<&DecodeOptions>) -> EngineOptions {
        match overrides {
            Some(o) => o.apply_to(&self.options),
            None => self.options.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Channel;
    use crate::error::Error;

    #[test]
    fn test_new_validates() {
        let bad = EngineOptions::default().with_channels(vec![]);
        assert!(matches!(
            SteganographyEngine::new(bad),
            Err(Error::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_text_and_bytes_accepted() {
        let engine = SteganographyEngine::default();
        let cover = PixelBuffer::filled(30, 30, 9).unwrap();

        let from_str = engine.encode(&cover, "héllo").unwrap();
        let from_bytes = engine.encode(&cover, "héllo".as_bytes().to_vec()).unwrap();
        assert_eq!(from_str.image, from_bytes.image);
        assert_eq!(from_str.bytes_encoded, 6);
    }

    #[test]
    fn test_decode_override_does_not_stick() {
        let writer = SteganographyEngine::new(
            EngineOptions::default().with_channels(vec![Channel::B]),
        )
        .unwrap();
        let reader = SteganographyEngine::default();
        let cover = PixelBuffer::filled(30, 30, 0).unwrap();
        let encoded = writer.encode_text(&cover, "blue only").unwrap();

        let overrides = DecodeOptions {
            channels: Some(vec![Channel::B]),
            ..Default::default()
        };
        assert_eq!(
            reader.decode_text(&encoded.image, Some(&overrides)).unwrap(),
            "blue only"
        );
        assert!(reader.decode(&encoded.image, None).is_err());
        assert_eq!(reader.options().channels.len(), 3);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let engine = SteganographyEngine::default();
        let cover = PixelBuffer::filled(30, 30, 0).unwrap();
        let overrides = DecodeOptions {
            bits_per_channel: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            engine.decode(&cover, Some(&overrides)),
            Err(Error::InvalidOptions(_))
        ));
    }
}
