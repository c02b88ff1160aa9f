//! Pixel Steganography
//!
//! Hides data in the low-order bits of raw RGBA pixel buffers and inspects
//! buffers for signs of hidden data.
//!
//! # Features
//!
//! - **Bit-plane codec**: 1 to 7 low-order bits per channel, any ordered
//!   subset of R, G, B, A
//! - **Framed payloads**: 12-byte "STEG" header with length and option flags
//! - **Spread mode**: seeded pseudo-random pixel placement
//! - **Steganalysis**: magic probe plus LSB distribution heuristics
//! - **XOR obfuscation**: repeating-key XOR, not a security feature
//!
//! # Architecture
//!
//! ```text
//! Message → Frame (header) → XOR (optional) → Bits (MSB first) → Pixel LSBs
//! ```
//!
//! # Example
//!
//! ```rust
//! use pixel_steg::{EngineOptions, PixelBuffer, SteganographyEngine};
//!
//! let cover = PixelBuffer::filled(100, 100, 200).unwrap();
//! let engine = SteganographyEngine::new(EngineOptions::default()).unwrap();
//!
//! let encoded = engine.encode(&cover, "hello world").unwrap();
//! assert_eq!(engine.calculate_capacity(&cover).usable_bytes, 3738);
//!
//! let decoded = engine.decode(&encoded.image, None).unwrap();
//! assert_eq!(decoded.text, "hello world");
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod pixels;
pub mod stego;

pub use config::{Channel, DecodeOptions, Encryption, EngineOptions, Method};
pub use error::{Error, Result};
pub use pixels::PixelBuffer;
pub use stego::SteganographyEngine;
