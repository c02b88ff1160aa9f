//! Embedding capacity.

use crate::config::{EngineOptions, HEADER_SIZE};
use crate::pixels::PixelBuffer;
use serde::Serialize;

/// Capacity of one image under one set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityInfo {
    /// Carrier bits divided by 8, rounded down.
    pub total_bytes: usize,
    /// `total_bytes` minus the header, floored at 0.
    pub usable_bytes: usize,
    /// Same as `usable_bytes`.
    pub max_message_length: usize,
    pub bits_per_pixel: u32,
    pub pixel_count: usize,
}

/// Capacity of `image` for `options`.
///
/// Spread mode carries one bit per channel per pixel whatever
/// `bits_per_channel` says, and the figure here follows suit.
pub fn calculate(image: &PixelBuffer, options: &EngineOptions) -> CapacityInfo {
    let pixel_count = image.pixel_count();
    let bits_per_pixel = options.channels.len() as u32 * options.effective_bits_per_channel() as u32;
    let total_bytes = pixel_count.saturating_mul(bits_per_pixel as usize) / 8;
    let usable_bytes = total_bytes.saturating_sub(HEADER_SIZE);

    CapacityInfo {
        total_bytes,
        usable_bytes,
        max_message_length: usable_bytes,
        bits_per_pixel,
        pixel_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Channel;

    #[test]
    fn test_rgb_one_bit() {
        let image = PixelBuffer::filled(100, 100, 0).unwrap();
        let info = calculate(&image, &EngineOptions::default());

        assert_eq!(info.pixel_count, 10_000);
        assert_eq!(info.bits_per_pixel, 3);
        assert_eq!(info.total_bytes, 3750);
        assert_eq!(info.usable_bytes, 3738);
        assert_eq!(info.max_message_length, 3738);
    }

    #[test]
    fn test_rgba_two_bits() {
        let image = PixelBuffer::filled(10, 10, 0).unwrap();
        let options = EngineOptions::default()
            .with_channels(vec![Channel::R, Channel::G, Channel::B, Channel::A])
            .with_bits_per_channel(2);
        let info = calculate(&image, &options);

        assert_eq!(info.bits_per_pixel, 8);
        assert_eq!(info.total_bytes, 100);
        assert_eq!(info.usable_bytes, 88);
    }

    #[test]
    fn test_tiny_image_has_no_usable_bytes() {
        let image = PixelBuffer::filled(3, 3, 0).unwrap();
        let info = calculate(&image, &EngineOptions::default());

        assert_eq!(info.total_bytes, 3);
        assert_eq!(info.usable_bytes, 0);
    }

    #[test]
    fn test_spread_ignores_bits_per_channel() {
        let image = PixelBuffer::filled(100, 100, 0).unwrap();
        let options = EngineOptions::default()
            .with_bits_per_channel(4)
            .with_spread(1);
        let info = calculate(&image, &options);

        assert_eq!(info.bits_per_pixel, 3);
        assert_eq!(info.usable_bytes, 3738);
    }
}
