//! Payload framing.
//!
//! ```text
//! 0..4   magic "STEG"
//! 4..8   message length, u32 big-endian
//! 8      method tag (0 = lsb)
//! 9      bits per channel
//! 10     channel mask (bit0=r, bit1=g, bit2=b, bit3=a)
//! 11     spread flag
//! 12..   message bytes
//! ```

use crate::config::{channel_mask, EngineOptions, HEADER_SIZE, MAGIC_HEADER};
use crate::error::{Error, Result};

/// Decoded payload header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub length: u32,
    pub method_tag: u8,
    pub bits_per_channel: u8,
    pub channel_mask: u8,
    pub spread: bool,
}

impl Header {
    /// Header describing `length` message bytes written with `options`.
    pub fn new(length: u32, options: &EngineOptions) -> Self {
        Self {
            length,
            method_tag: options.method.tag(),
            bits_per_channel: options.bits_per_channel,
            channel_mask: channel_mask(&options.channels),
            spread: options.spread,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buffer = [0u8; HEADER_SIZE];
        buffer[0..4].copy_from_slice(&MAGIC_HEADER);
        buffer[4..8].copy_from_slice(&self.length.to_be_bytes());
        buffer[8] = self.method_tag;
        buffer[9] = self.bits_per_channel;
        buffer[10] = self.channel_mask;
        buffer[11] = self.spread as u8;
        buffer
    }

    /// Parse the first [`HEADER_SIZE`] bytes of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE || !has_magic(data) {
            return Err(Error::NoHiddenData);
        }
        Ok(Self {
            length: read_length(data),
            method_tag: data[8],
            bits_per_channel: data[9],
            channel_mask: data[10],
            spread: data[11] != 0,
        })
    }
}

/// True when `data` starts with the magic bytes.
pub fn has_magic(data: &[u8]) -> bool {
    data.len() >= MAGIC_HEADER.len() && data[..MAGIC_HEADER.len()] == MAGIC_HEADER
}

/// Big-endian length field. `data` must hold at least 8 bytes.
fn read_length(data: &[u8]) -> u32 {
    u32::from_be_bytes([data[4], data[5], data[6], data[7]])
}

/// Header followed by `data`.
pub fn build(data: &[u8], options: &EngineOptions) -> Result<Vec<u8>> {
    let length = u32::try_from(data.len()).map_err(|_| Error::CapacityExceeded {
        max: u32::MAX as usize,
        requested: data.len(),
    })?;

    let mut payload = Vec::with_capacity(HEADER_SIZE + data.len());
    payload.extend_from_slice(&Header::new(length, options).to_bytes());
    payload.extend_from_slice(data);
    Ok(payload)
}

/// Validate the magic and return the message bytes with their length.
pub fn parse(payload: &[u8]) -> Result<(Vec<u8>, u32)> {
    if !has_magic(payload) {
        return Err(Error::InvalidPayload("magic header missing".to_string()));
    }
    let header = Header::parse(payload)?;
    let end = HEADER_SIZE + header.length as usize;
    if payload.len() < end {
        return Err(Error::InvalidPayload(format!(
            "expected {} payload bytes, got {}",
            end,
            payload.len()
        )));
    }
    Ok((payload[HEADER_SIZE..end].to_vec(), header.length))
}

/// Prefix file contents with a 2-byte big-endian filename length and the
/// UTF-8 filename.
pub fn pack_file(file_data: &[u8], filename: &str) -> Result<Vec<u8>> {
    let name = filename.as_bytes();
    let name_len = u16::try_from(name.len()).map_err(|_| Error::FilenameTooLong(name.len()))?;

    let mut packed = Vec::with_capacity(2 + name.len() + file_data.len());
    packed.extend_from_slice(&name_len.to_be_bytes());
    packed.extend_from_slice(name);
    packed.extend_from_slice(file_data);
    Ok(packed)
}

/// Split a packed file into filename and contents.
pub fn unpack_file(data: &[u8]) -> Result<(String, Vec<u8>)> {
    if data.len() < 2 {
        return Err(Error::InvalidPayload(
            "file payload shorter than its length prefix".to_string(),
        ));
    }
    let name_len = u16::from_be_bytes([data[0], data[1]]) as usize;
    let name_end = 2 + name_len;
    if data.len() < name_end {
        return Err(Error::InvalidPayload(format!(
            "filename length {} exceeds payload",
            name_len
        )));
    }
    let filename = String::from_utf8_lossy(&data[2..name_end]).into_owned();
    Ok((filename, data[name_end..].to_vec()))
}
