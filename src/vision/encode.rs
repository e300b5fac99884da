//! Wire encoding of scan results
//!
//! Packs the unified observations together with PNG/base64 payloads of the
//! analyzed and original images, and serializes the whole thing to the
//! transport JSON string.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::capture::CapturedFrame;
use crate::vision::result::VisionResult;

/// The wire-level unit delivered across the transport boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub vision_result: VisionResult,
    /// PNG of the analyzed crop, base64-encoded; empty if the image could
    /// not be encoded
    pub cropped_image_base64: String,
    /// PNG of the unmodified camera image, base64-encoded; empty if the
    /// image could not be encoded
    pub original_image_base64: String,
}

/// The top-level result structure could not be serialized. Individual
/// image-encode failures never raise this; they degrade to empty payload
/// fields instead.
#[derive(Debug, Error)]
#[error("scan result could not be serialized: {0}")]
pub struct EncodingError(#[from] serde_json::Error);

/// Combine the unified result with both image payloads and serialize to
/// the transport string.
pub fn encode_scan_result(
    vision_result: VisionResult,
    cropped: &CapturedFrame,
    original: &CapturedFrame,
) -> Result<String, EncodingError> {
    let scan_result = ScanResult {
        vision_result,
        cropped_image_base64: image_to_base64_png(cropped),
        original_image_base64: image_to_base64_png(original),
    };

    Ok(serde_json::to_string(&scan_result)?)
}

/// PNG-encode a frame and wrap it in base64. An unencodable frame yields an
/// empty string rather than failing the scan.
fn image_to_base64_png(frame: &CapturedFrame) -> String {
    let Some(image) =
        image::RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
    else {
        warn!(
            "Frame buffer does not match {}x{} RGBA, sending empty payload",
            frame.width, frame.height
        );
        return String::new();
    };

    let mut buffer = Cursor::new(Vec::new());
    if let Err(e) = image.write_to(&mut buffer, image::ImageFormat::Png) {
        warn!("Failed to encode frame as PNG: {}", e);
        return String::new();
    }

    STANDARD.encode(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::geometry::{Rect, Size};
    use crate::vision::result::TextObservation;

    fn frame(width: u32, height: u32) -> CapturedFrame {
        CapturedFrame::new(vec![255; (width * height * 4) as usize], width, height)
    }

    fn sample_vision_result() -> VisionResult {
        VisionResult {
            source_image_size: Size::new(4.0, 4.0),
            text_observations: vec![TextObservation {
                text: "TOTAL".to_string(),
                confidence: 0.97,
                normalized_rect: Rect {
                    x_pos: 0.1,
                    y_pos: 0.15,
                    size: Size::new(0.3, 0.05),
                },
            }],
        }
    }

    #[test]
    fn round_trips_through_the_wire_schema() {
        let json = encode_scan_result(sample_vision_result(), &frame(4, 4), &frame(8, 8)).unwrap();

        let decoded: ScanResult = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.vision_result, sample_vision_result());
        assert!(!decoded.cropped_image_base64.is_empty());
        assert!(!decoded.original_image_base64.is_empty());
    }

    #[test]
    fn payloads_decode_back_to_png() {
        let json = encode_scan_result(sample_vision_result(), &frame(4, 4), &frame(8, 8)).unwrap();
        let decoded: ScanResult = serde_json::from_str(&json).unwrap();

        let png_bytes = STANDARD.decode(decoded.cropped_image_base64).unwrap();
        let image = image::load_from_memory(&png_bytes).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (4, 4));
    }

    #[test]
    fn undecodable_image_degrades_to_an_empty_field() {
        // Buffer too short for the declared dimensions
        let broken = CapturedFrame::new(vec![255; 4], 16, 16);

        let json = encode_scan_result(sample_vision_result(), &broken, &frame(8, 8)).unwrap();
        let decoded: ScanResult = serde_json::from_str(&json).unwrap();

        assert!(decoded.cropped_image_base64.is_empty());
        assert!(!decoded.original_image_base64.is_empty());
        assert_eq!(decoded.vision_result.text_observations.len(), 1);
    }

    #[test]
    fn transport_json_uses_exact_field_names() {
        let json = encode_scan_result(sample_vision_result(), &frame(4, 4), &frame(4, 4)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("visionResult").is_some());
        assert!(value.get("croppedImageBase64").is_some());
        assert!(value.get("originalImageBase64").is_some());
        let observation = &value["visionResult"]["textObservations"][0];
        assert!(observation.get("text").is_some());
        assert!(observation.get("confidence").is_some());
        assert!(observation["normalizedRect"].get("xPos").is_some());
        assert!(observation["normalizedRect"].get("yPos").is_some());
        assert!(observation["normalizedRect"]["size"].get("width").is_some());
    }
}
