//! Bit-plane steganography over RGBA pixel buffers.
//!
//! This module provides:
//! - Header framing and capacity math
//! - Sequential and seeded spread bit placement
//! - LSB steganalysis
//! - One-off free functions for callers that don't keep an engine around

pub mod analysis;
pub mod bits;
pub mod capacity;
pub mod carrier;
pub mod decoder;
pub mod encoder;
pub mod engine;
pub mod payload;

pub use analysis::DetectionResult;
pub use capacity::CapacityInfo;
pub use decoder::{DecodeResult, DecodedFile};
pub use encoder::EncodeResult;
pub use engine::SteganographyEngine;
pub use payload::Header;

use crate::config::EngineOptions;
use crate::error::Result;
use crate::pixels::PixelBuffer;

fn engine(options: Option<&EngineOptions>) -> Result<SteganographyEngine> {
    SteganographyEngine::new(options.cloned().unwrap_or_default())
}

/// Hide a string or bytes using `options` (defaults when `None`).
pub fn encode(
    image: &PixelBuffer,
    message: impl AsRef<[u8]>,
    options: Option<&EngineOptions>,
) -> Result<EncodeResult> {
    engine(options)?.encode(image, message)
}

pub fn encode_text(
    image: &PixelBuffer,
    text: &str,
    options: Option<&EngineOptions>,
) -> Result<EncodeResult> {
    engine(options)?.encode_text(image, text)
}

pub fn encode_file(
    image: &PixelBuffer,
    file_data: &[u8],
    filename: &str,
    options: Option<&EngineOptions>,
) -> Result<EncodeResult> {
    engine(options)?.encode_file(image, file_data, filename)
}

pub fn decode(image: &PixelBuffer, options: Option<&EngineOptions>) -> Result<DecodeResult> {
    engine(options)?.decode(image, None)
}

pub fn decode_text(image: &PixelBuffer, options: Option<&EngineOptions>) -> Result<String> {
    engine(options)?.decode_text(image, None)
}

pub fn decode_file(image: &PixelBuffer, options: Option<&EngineOptions>) -> Result<DecodedFile> {
    engine(options)?.decode_file(image, None)
}

pub fn get_capacity(image: &PixelBuffer, options: Option<&EngineOptions>) -> Result<CapacityInfo> {
    Ok(engine(options)?.calculate_capacity(image))
}

/// Heuristic hidden-data check. Invalid options only disable the header
/// probe; the statistical checks still run.
pub fn detect_hidden_data(image: &PixelBuffer, options: Option<&EngineOptions>) -> DetectionResult {
    analysis::detect(image, &options.cloned().unwrap_or_default())
}
