//! Configuration constants and option types for the steganography engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Payload magic: "STEG" in bytes.
pub const MAGIC_HEADER: [u8; 4] = [0x53, 0x54, 0x45, 0x47];

/// Header size: magic (4) + length (4) + option flags (4).
pub const HEADER_SIZE: usize = 12;

/// Bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Default number of low-order bits used per channel.
pub const DEFAULT_BITS_PER_CHANNEL: u8 = 1;

/// Largest accepted bits-per-channel value.
pub const MAX_BITS_PER_CHANNEL: u8 = 7;

/// Spread-mode position generator parameters.
pub mod lcg_params {
    /// Multiplier.
    pub const MULTIPLIER: u64 = 1_103_515_245;

    /// Increment.
    pub const INCREMENT: u64 = 12_345;

    /// State mask (31 bits).
    pub const MASK: u64 = 0x7FFF_FFFF;

    /// Seed used when the configured seed is 0.
    pub const DEFAULT_SEED: u32 = 12_345;
}

/// Embedding method.
///
/// Every method currently places bits the same way; the value only
/// changes the method tag written into the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Method {
    #[default]
    #[serde(rename = "lsb")]
    Lsb,
    #[serde(rename = "lsb-rgb")]
    LsbRgb,
    #[serde(rename = "lsb-rgba")]
    LsbRgba,
    #[serde(rename = "dct")]
    Dct,
}

impl Method {
    /// Header tag: 0 for plain LSB, 1 for anything else.
    pub fn tag(self) -> u8 {
        match self {
            Method::Lsb => 0,
            _ => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Lsb => "lsb",
            Method::LsbRgb => "lsb-rgb",
            Method::LsbRgba => "lsb-rgba",
            Method::Dct => "dct",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lsb" => Ok(Method::Lsb),
            "lsb-rgb" => Ok(Method::LsbRgb),
            "lsb-rgba" => Ok(Method::LsbRgba),
            "dct" => Ok(Method::Dct),
            other => Err(Error::InvalidOptions(format!("Unknown method: {}", other))),
        }
    }
}

/// A color channel of an RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "r")]
    R,
    #[serde(rename = "g")]
    G,
    #[serde(rename = "b")]
    B,
    #[serde(rename = "a")]
    A,
}

impl Channel {
    /// Byte offset of this channel within a pixel.
    pub fn offset(self) -> usize {
        match self {
            Channel::R => 0,
            Channel::G => 1,
            Channel::B => 2,
            Channel::A => 3,
        }
    }

    /// Bit of this channel in the header channel mask.
    pub fn mask_bit(self) -> u8 {
        1 << self.offset()
    }

    /// Parse a single channel letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(Channel::R),
            'g' => Some(Channel::G),
            'b' => Some(Channel::B),
            'a' => Some(Channel::A),
            _ => None,
        }
    }

    /// Parse an ordered channel list such as `"rgb"` or `"bgra"`.
    pub fn parse_list(s: &str) -> Result<Vec<Self>> {
        s.chars()
            .map(|c| {
                Channel::from_char(c)
                    .ok_or_else(|| Error::InvalidOptions(format!("Unknown channel: {}", c)))
            })
            .collect()
    }
}

/// Channel bitmask (bit0=r, bit1=g, bit2=b, bit3=a).
pub fn channel_mask(channels: &[Channel]) -> u8 {
    channels.iter().fold(0, |mask, c| mask | c.mask_bit())
}

/// Payload encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encryption {
    #[default]
    None,
    /// Repeating-key XOR. Obfuscation only, not security.
    Xor,
}

/// Immutable engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    /// Embedding method (header tag only).
    pub method: Method,

    /// Channels used, in iteration order.
    pub channels: Vec<Channel>,

    /// Low-order bits per channel in sequential mode.
    pub bits_per_channel: u8,

    /// Payload encryption.
    pub encryption: Encryption,

    /// Encryption password; ignored when encryption is `None`.
    pub password: String,

    /// Scatter bits over pseudo-randomly chosen pixels.
    pub spread: bool,

    /// Spread-mode seed. 0 selects [`lcg_params::DEFAULT_SEED`].
    pub seed: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            method: Method::Lsb,
            channels: vec![Channel::R, Channel::G, Channel::B],
            bits_per_channel: DEFAULT_BITS_PER_CHANNEL,
            encryption: Encryption::None,
            password: String::new(),
            spread: false,
            seed: 0,
        }
    }
}

impl EngineOptions {
    /// Load options from a JSON file. Missing keys take their defaults.
    ///
    /// Not validated here: a file may leave the password to be supplied
    /// later. [`SteganographyEngine::new`](crate::SteganographyEngine::new)
    /// validates.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_channels(mut self, channels: Vec<Channel>) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_bits_per_channel(mut self, bits: u8) -> Self {
        self.bits_per_channel = bits;
        self
    }

    pub fn with_xor(mut self, password: impl Into<String>) -> Self {
        self.encryption = Encryption::Xor;
        self.password = password.into();
        self
    }

    pub fn with_spread(mut self, seed: u32) -> Self {
        self.spread = true;
        self.seed = seed;
        self
    }

    /// Bits written per channel of a visited pixel. Spread mode always
    /// writes bit 0 only.
    pub fn effective_bits_per_channel(&self) -> u8 {
        if self.spread {
            1
        } else {
            self.bits_per_channel
        }
    }

    /// Seed actually fed to the position generator.
    pub fn effective_seed(&self) -> u32 {
        if self.seed == 0 {
            lcg_params::DEFAULT_SEED
        } else {
            self.seed
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.channels.is_empty() {
            return Err(Error::InvalidOptions(
                "At least one channel is required".to_string(),
            ));
        }
        for (i, channel) in self.channels.iter().enumerate() {
            if self.channels[..i].contains(channel) {
                return Err(Error::InvalidOptions(format!(
                    "Duplicate channel: {:?}",
                    channel
                )));
            }
        }
        if self.bits_per_channel == 0 || self.bits_per_channel > MAX_BITS_PER_CHANNEL {
            return Err(Error::InvalidOptions(format!(
                "Bits per channel must be between 1 and {}",
                MAX_BITS_PER_CHANNEL
            )));
        }
        if self.encryption == Encryption::Xor && self.password.is_empty() {
            return Err(Error::InvalidOptions(
                "XOR encryption requires a password".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-call decode overrides. Unset fields keep the engine's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecodeOptions {
    pub method: Option<Method>,
    pub channels: Option<Vec<Channel>>,
    pub bits_per_channel: Option<u8>,
    pub encryption: Option<Encryption>,
    pub password: Option<String>,
    pub spread: Option<bool>,
    pub seed: Option<u32>,
}

impl DecodeOptions {
    /// Merge these overrides over `base`.
    pub fn apply_to(&self, base: &EngineOptions) -> EngineOptions {
        EngineOptions {
            method: self.method.unwrap_or(base.method),
            channels: self
                .channels
                .clone()
                .unwrap_or_else(|| base.channels.clone()),
            bits_per_channel: self.bits_per_channel.unwrap_or(base.bits_per_channel),
            encryption: self.encryption.unwrap_or(base.encryption),
            password: self
                .password
                .clone()
                .unwrap_or_else(|| base.password.clone()),
            spread: self.spread.unwrap_or(base.spread),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}

impl From<&EngineOptions> for DecodeOptions {
    fn from(options: &EngineOptions) -> Self {
        Self {
            method: Some(options.method),
            channels: Some(options.channels.clone()),
            bits_per_channel: Some(options.bits_per_channel),
            encryption: Some(options.encryption),
            password: Some(options.password.clone()),
            spread: Some(options.spread),
            seed: Some(options.seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = EngineOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.channels, vec![Channel::R, Channel::G, Channel::B]);
        assert_eq!(options.effective_seed(), lcg_params::DEFAULT_SEED);
    }

    #[test]
    fn test_validate_rejects_bad_options() {
        let empty = EngineOptions::default().with_channels(vec![]);
        assert!(matches!(empty.validate(), Err(Error::InvalidOptions(_))));

        let dup = EngineOptions::default().with_channels(vec![Channel::R, Channel::R]);
        assert!(dup.validate().is_err());

        let bits = EngineOptions::default().with_bits_per_channel(8);
        assert!(bits.validate().is_err());

        let no_password = EngineOptions::default().with_xor("");
        assert!(no_password.validate().is_err());
    }

    #[test]
    fn test_channel_mask() {
        assert_eq!(channel_mask(&[Channel::R, Channel::G, Channel::B]), 0b0111);
        assert_eq!(channel_mask(&[Channel::A, Channel::R]), 0b1001);
    }

    #[test]
    fn test_parse_channel_list() {
        assert_eq!(
            Channel::parse_list("bgA").unwrap(),
            vec![Channel::B, Channel::G, Channel::A]
        );
        assert!(Channel::parse_list("rx").is_err());
    }

    #[test]
    fn test_spread_uses_one_bit() {
        let options = EngineOptions::default()
            .with_bits_per_channel(4)
            .with_spread(9);
        assert_eq!(options.effective_bits_per_channel(), 1);
        assert_eq!(options.bits_per_channel, 4);
    }

    #[test]
    fn test_decode_options_override() {
        let base = EngineOptions::default().with_spread(7);
        let overrides = DecodeOptions {
            seed: Some(99),
            bits_per_channel: Some(2),
            ..Default::default()
        };

        let merged = overrides.apply_to(&base);
        assert_eq!(merged.seed, 99);
        assert_eq!(merged.bits_per_channel, 2);
        assert!(merged.spread);
        assert_eq!(base.seed, 7);
    }

    #[test]
    fn test_json_camel_case_with_defaults() {
        let json = r#"{"channels":["b","a"],"bitsPerChannel":2,"encryption":"xor","password":"k"}"#;
        let options: EngineOptions = serde_json::from_str(json).unwrap();

        assert_eq!(options.channels, vec![Channel::B, Channel::A]);
        assert_eq!(options.bits_per_channel, 2);
        assert_eq!(options.encryption, Encryption::Xor);
        assert_eq!(options.method, Method::Lsb);
        assert!(!options.spread);
    }

    #[test]
    fn test_method_tag() {
        assert_eq!(Method::Lsb.tag(), 0);
        assert_eq!(Method::Dct.tag(), 1);
        assert_eq!("lsb-rgba".parse::<Method>().unwrap(), Method::LsbRgba);
    }
}
