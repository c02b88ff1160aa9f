//! Raw RGBA pixel buffers.

use crate::config::BYTES_PER_PIXEL;
use crate::error::{Error, Result};
use image::RgbaImage;

/// RGBA pixels in row-major order, 4 bytes per pixel.
///
/// The length invariant `data.len() == width * height * 4` is checked on
/// construction and cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap existing pixel data.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = expected_len(width, height).ok_or(Error::InvalidBuffer {
            width,
            height,
            expected: usize::MAX,
            actual: data.len(),
        })?;
        if data.len() != expected {
            return Err(Error::InvalidBuffer {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer with every byte set to `fill`.
    pub fn filled(width: u32, height: u32, fill: u8) -> Result<Self> {
        let len = expected_len(width, height).ok_or(Error::InvalidBuffer {
            width,
            height,
            expected: usize::MAX,
            actual: 0,
        })?;
        Self::new(width, height, vec![fill; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Convert into an `image` crate buffer for saving.
    pub fn into_rgba_image(self) -> Result<RgbaImage> {
        let (width, height, actual) = (self.width, self.height, self.data.len());
        RgbaImage::from_raw(width, height, self.data).ok_or(Error::InvalidBuffer {
            width,
            height,
            expected: actual,
            actual,
        })
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

fn expected_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());

        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidBuffer {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_filled() {
        let buf = PixelBuffer::filled(3, 5, 7).unwrap();
        assert_eq!(buf.pixel_count(), 15);
        assert_eq!(buf.data().len(), 60);
        assert!(buf.data().iter().all(|&b| b == 7));
    }

    #[test]
    fn test_rgba_image_conversion() {
        let data: Vec<u8> = (0..4 * 6).map(|i| i as u8).collect();
        let buf = PixelBuffer::new(3, 2, data.clone()).unwrap();

        let image = buf.clone().into_rgba_image().unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(1, 0).0, [4, 5, 6, 7]);

        assert_eq!(PixelBuffer::from(image), buf);
    }
}
