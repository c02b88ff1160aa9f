//! Payload encoder.

use crate::config::EngineOptions;
use crate::crypto;
use crate::error::{Error, Result};
use crate::pixels::PixelBuffer;
use crate::stego::{capacity, carrier, payload};

/// Result of hiding a message in an image.
#[derive(Debug, Clone)]
pub struct EncodeResult {
    /// Fresh copy of the cover with the payload embedded.
    pub image: PixelBuffer,
    /// Message bytes written (header excluded).
    pub bytes_encoded: usize,
    /// Usable capacity of the cover.
    pub capacity: usize,
    /// Payload length (header included) as a percentage of `capacity`.
    pub used_capacity: f64,
}

/// Hide `data` in a copy of `image`.
///
/// The whole payload, header included, goes through the configured
/// encryption before embedding. The input image is never modified.
///
/// # Example
///
/// ```
/// use pixel_steg::config::EngineOptions;
/// use pixel_steg::pixels::PixelBuffer;
/// use pixel_steg::stego::encoder::encode;
///
/// let cover = PixelBuffer::filled(32, 32, 128).unwrap();
/// let result = encode(&cover, b"Hidden data", &EngineOptions::default()).unwrap();
///
/// assert_eq!(result.bytes_encoded, 11);
/// assert_ne!(result.image, cover);
/// ```
pub fn encode(image: &PixelBuffer, data: &[u8], options: &EngineOptions) -> Result<EncodeResult> {
    options.validate()?;

    let capacity = capacity::calculate(image, options);
    if data.len() > capacity.usable_bytes {
        return Err(Error::CapacityExceeded {
            max: capacity.usable_bytes,
            requested: data.len(),
        });
    }

    let framed = payload::build(data, options)?;
    let final_payload = crypto::encrypt(&framed, options.encryption, &options.password);

    // Only reachable when the image cannot hold the header itself.
    let output = carrier::embed(image, &final_payload, options).ok_or(Error::CapacityExceeded {
        max: capacity.usable_bytes,
        requested: data.len(),
    })?;

    let used_capacity = if capacity.usable_bytes == 0 {
        100.0
    } else {
        final_payload.len() as f64 / capacity.usable_bytes as f64 * 100.0
    };

    tracing::debug!(
        bytes = data.len(),
        capacity = capacity.usable_bytes,
        spread = options.spread,
        encryption = ?options.encryption,
        "payload embedded"
    );

    Ok(EncodeResult {
        image: output,
        bytes_encoded: data.len(),
        capacity: capacity.usable_bytes,
        used_capacity,
    })
}
