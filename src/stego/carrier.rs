//! Bit placement inside a pixel buffer.
//!
//! A payload bit lands in a *slot*: one bit position of one channel byte.
//! Sequential mode walks pixels in index order and uses the low
//! `bits_per_channel` bits of every configured channel. Spread mode visits
//! pixels picked by a linear congruential generator and uses bit 0 of every
//! configured channel only.
//!
//! Encoder and decoder derive slots from the same function, so the order is
//! identical on both sides.

use crate::config::{lcg_params, EngineOptions, BYTES_PER_PIXEL};
use crate::pixels::PixelBuffer;
use crate::stego::bits::{bits_to_bytes, bytes_to_bits, get_bit, set_bit};

/// A single carrier bit: byte index into the pixel data and bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSlot {
    pub index: usize,
    pub bit: u8,
}

/// Generate up to `count` distinct pixel indices below `pixel_count`.
///
/// The sequence for a given seed is prefix-stable: asking for fewer
/// positions returns a prefix of a longer request.
pub fn spread_positions(count: usize, pixel_count: usize, seed: u32) -> Vec<usize> {
    // The generator has a 2^31 period, so no more residues than that exist.
    let target = count.min(pixel_count).min(lcg_params::MASK as usize + 1);
    let mut positions = Vec::with_capacity(target);
    if target == 0 {
        return positions;
    }

    let mut used = vec![false; pixel_count];
    let mut state = seed as u64;
    while positions.len() < target {
        state = (state * lcg_params::MULTIPLIER + lcg_params::INCREMENT) & lcg_params::MASK;
        let pos = (state % pixel_count as u64) as usize;
        if !used[pos] {
            used[pos] = true;
            positions.push(pos);
        }
    }
    positions
}

/// Ordered carrier slots for the first `bit_count` payload bits.
///
/// Returns fewer slots than requested when the image is too small.
pub fn bit_slots(image: &PixelBuffer, bit_count: usize, options: &EngineOptions) -> Vec<BitSlot> {
    let channels = &options.channels;
    let pixel_count = image.pixel_count();

    if options.spread {
        let needed = bit_count.div_ceil(channels.len().max(1));
        let positions = spread_positions(needed, pixel_count, options.effective_seed());
        tracing::trace!(
            seed = options.effective_seed(),
            pixels = positions.len(),
            "spread positions generated"
        );
        positions
            .into_iter()
            .flat_map(|pixel| {
                channels.iter().map(move |c| BitSlot {
                    index: pixel * BYTES_PER_PIXEL + c.offset(),
                    bit: 0,
                })
            })
            .take(bit_count)
            .collect()
    } else {
        let bits = options.bits_per_channel;
        (0..pixel_count)
            .flat_map(|pixel| {
                channels.iter().flat_map(move |c| {
                    (0..bits).map(move |bit| BitSlot {
                        index: pixel * BYTES_PER_PIXEL + c.offset(),
                        bit,
                    })
                })
            })
            .take(bit_count)
            .collect()
    }
}

/// Write `payload` into a copy of `image`.
///
/// Returns `None` when the image has fewer carrier bits than the payload.
pub fn embed(image: &PixelBuffer, payload: &[u8], options: &EngineOptions) -> Option<PixelBuffer> {
    let bits = bytes_to_bits(payload);
    let slots = bit_slots(image, bits.len(), options);
    if slots.len() < bits.len() {
        return None;
    }

    let mut output = image.clone();
    let data = output.data_mut();
    for (slot, &bit) in slots.iter().zip(bits.iter()) {
        data[slot.index] = set_bit(data[slot.index], slot.bit, bit);
    }
    Some(output)
}

/// Read `byte_count` bytes from the carrier bits of `image`.
///
/// Returns `None` when the image has fewer carrier bits than requested.
pub fn extract(image: &PixelBuffer, byte_count: usize, options: &EngineOptions) -> Option<Vec<u8>> {
    let bit_count = byte_count * 8;
    let slots = bit_slots(image, bit_count, options);
    if slots.len() < bit_count {
        return None;
    }

    let data = image.data();
    let bits: Vec<u8> = slots
        .iter()
        .map(|slot| get_bit(data[slot.index], slot.bit))
        .collect();
    Some(bits_to_bytes(&bits))
}
