//! Heuristic steganalysis.
//!
//! Scores an image on four indicators and never fails. The statistical
//! checks look at the red channel LSB of at most the first 2500 pixels,
//! whatever channels the engine is configured with.

use crate::config::{EngineOptions, Method, BYTES_PER_PIXEL, HEADER_SIZE};
use crate::pixels::PixelBuffer;
use crate::stego::{carrier, payload};
use serde::Serialize;

/// Bytes of pixel data sampled by the LSB statistics.
const SAMPLE_BYTES: usize = 10_000;

/// Window length for the repeated-pattern check.
const PATTERN_WINDOW: usize = 8;

const MAGIC_POINTS: u32 = 50;
const ANOMALY_POINTS: u32 = 20;
const PATTERN_POINTS: u32 = 15;
const CHI_SQUARE_POINTS: u32 = 15;

/// Confidence at which hidden data is asserted.
pub const DETECTION_THRESHOLD: u8 = 50;

pub const INDICATOR_MAGIC: &str = "Magic header detected";
pub const INDICATOR_ANOMALY: &str = "LSB distribution anomaly";
pub const INDICATOR_PATTERNS: &str = "Repeating patterns in LSB";
pub const INDICATOR_CHI_SQUARE: &str = "Chi-square test indicates hidden data";

/// Outcome of [`detect`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub has_hidden_data: bool,
    /// 0 to 100.
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_size: Option<u32>,
    pub indicators: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LsbStats {
    pub anomaly_score: f64,
    pub has_patterns: bool,
    /// Threshold proxy, not a goodness-of-fit statistic: 0.1 when the
    /// anomaly score exceeds 0.1, else 0.
    pub chi_square: f64,
}

/// Score `image` for hidden data.
///
/// The header probe reads with `options` but never decrypts.
pub fn detect(image: &PixelBuffer, options: &EngineOptions) -> DetectionResult {
    let mut indicators = Vec::new();
    let mut confidence = 0u32;

    if probe_header(image, options).is_some() {
        indicators.push(INDICATOR_MAGIC.to_string());
        confidence += MAGIC_POINTS;
    }

    let stats = analyze_lsb(image.data());
    if stats.anomaly_score > 0.3 {
        indicators.push(INDICATOR_ANOMALY.to_string());
        confidence += ANOMALY_POINTS;
    }
    if stats.has_patterns {
        indicators.push(INDICATOR_PATTERNS.to_string());
        confidence += PATTERN_POINTS;
    }
    if stats.chi_square > 0.05 {
        indicators.push(INDICATOR_CHI_SQUARE.to_string());
        confidence += CHI_SQUARE_POINTS;
    }

    let confidence = confidence.min(100) as u8;
    let has_hidden_data = confidence >= DETECTION_THRESHOLD;

    tracing::debug!(
        confidence,
        anomaly = stats.anomaly_score,
        patterns = stats.has_patterns,
        "detection finished"
    );

    DetectionResult {
        has_hidden_data,
        confidence,
        method: has_hidden_data.then_some(Method::Lsb),
        estimated_size: if has_hidden_data {
            probe_header(image, options).map(|h| h.length)
        } else {
            None
        },
        indicators,
    }
}

/// Unencrypted header at the start of the carrier, if any.
fn probe_header(image: &PixelBuffer, options: &EngineOptions) -> Option<payload::Header> {
    if options.validate().is_err() {
        return None;
    }
    let bytes = carrier::extract(image, HEADER_SIZE, options)?;
    payload::Header::parse(&bytes).ok()
}

pub(crate) fn analyze_lsb(data: &[u8]) -> LsbStats {
    let sample = &data[..data.len().min(SAMPLE_BYTES)];
    let lsbs: Vec<u8> = sample
        .iter()
        .step_by(BYTES_PER_PIXEL)
        .map(|b| b & 1)
        .collect();

    let total = lsbs.len();
    let zeros = lsbs.iter().filter(|&&b| b == 0).count();
    let expected_half = total as f64 / 2.0;
    let anomaly_score = if total == 0 {
        0.0
    } else {
        (zeros as f64 - expected_half).abs() / expected_half
    };

    let has_patterns = count_repeats(&lsbs) as f64 > total as f64 / 100.0;
    let chi_square = if anomaly_score > 0.1 { 0.1 } else { 0.0 };

    LsbStats {
        anomaly_score,
        has_patterns,
        chi_square,
    }
}

/// Count pairs of equal, non-overlapping 8-bit windows. Windows start at
/// offsets below `len - 8`.
fn count_repeats(lsbs: &[u8]) -> usize {
    let limit = lsbs.len().saturating_sub(PATTERN_WINDOW);
    let windows: Vec<u8> = (0..limit)
        .map(|i| {
            lsbs[i..i + PATTERN_WINDOW]
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | bit)
        })
        .collect();

    let mut count = 0;
    for i in 0..limit {
        for j in (i + PATTERN_WINDOW)..limit {
            if windows[i] == windows[j] {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_lsbs() {
        let data: Vec<u8> = (0..400).map(|i| (i / 4) as u8).collect();
        let stats = analyze_lsb(&data);

        assert_eq!(stats.anomaly_score, 0.0);
        assert_eq!(stats.chi_square, 0.0);
    }

    #[test]
    fn test_all_zero_lsbs() {
        let stats = analyze_lsb(&[0u8; 400]);

        assert_eq!(stats.anomaly_score, 1.0);
        assert_eq!(stats.chi_square, 0.1);
        assert!(stats.has_patterns);
    }

    #[test]
    fn test_sample_limited_to_first_pixels() {
        let mut data = vec![1u8; SAMPLE_BYTES];
        data.extend(vec![0u8; SAMPLE_BYTES]);
        let stats = analyze_lsb(&data);

        // Only the all-ones prefix is sampled.
        assert_eq!(stats.anomaly_score, 1.0);
    }

    #[test]
    fn test_empty_data() {
        let stats = analyze_lsb(&[]);
        assert_eq!(stats.anomaly_score, 0.0);
        assert!(!stats.has_patterns);
    }

    #[test]
    fn test_count_repeats() {
        // 20 bits: windows start at 0..12, pairs need a gap of 8.
        let lsbs = vec![0u8; 20];
        // i in 0..12, j in i+8..12: i=0..3 give 4,3,2,1.
        assert_eq!(count_repeats(&lsbs), 10);
        assert_eq!(count_repeats(&[1, 0, 1]), 0);
    }

    #[test]
    fn test_tiny_image_never_panics() {
        let image = PixelBuffer::filled(1, 1, 0).unwrap();
        let result = detect(&image, &EngineOptions::default());

        assert!(!result.indicators.iter().any(|i| i == INDICATOR_MAGIC));
        assert!(result.estimated_size.is_none());
    }
}
