//! Unified recognition result types
//!
//! The backend-agnostic schema every recognizer's output is mapped into.
//! Field names are part of the wire contract and must not change.

use serde::{Deserialize, Serialize};

use crate::vision::geometry::{Rect, Size};

/// Confidence value reported when a backend has no per-fragment confidence.
/// Not a probability; consumers must treat it as "unknown".
pub const UNKNOWN_CONFIDENCE: f32 = -1.0;

/// One recognized text fragment in unified form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextObservation {
    /// Recognized content, verbatim from the backend; never re-cased or
    /// trimmed here
    pub text: String,
    /// Backend-reported confidence in [0, 1], or [`UNKNOWN_CONFIDENCE`]
    pub confidence: f32,
    /// Bounding box in unified top-left normalized coordinates
    pub normalized_rect: Rect,
}

/// Backend-agnostic recognition outcome for one analyzed image.
///
/// Observations keep the backend's emission order (reading order is not
/// guaranteed) and are not deduplicated or filtered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionResult {
    /// Logical size of the analyzed image, in pixels
    pub source_image_size: Size,
    pub text_observations: Vec<TextObservation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vision_result_serializes_with_wire_field_names() {
        let result = VisionResult {
            source_image_size: Size::new(1000.0, 2000.0),
            text_observations: vec![TextObservation {
                text: "TOTAL".to_string(),
                confidence: 0.97,
                normalized_rect: Rect {
                    x_pos: 0.1,
                    y_pos: 0.15,
                    size: Size::new(0.3, 0.05),
                },
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("sourceImageSize").is_some());
        let observations = json["textObservations"].as_array().unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0]["text"], "TOTAL");
        assert!(observations[0].get("confidence").is_some());
        assert!(observations[0].get("normalizedRect").is_some());
    }

    #[test]
    fn round_trips_through_json() {
        let result = VisionResult {
            source_image_size: Size::new(640.0, 480.0),
            text_observations: vec![TextObservation {
                text: String::new(),
                confidence: UNKNOWN_CONFIDENCE,
                normalized_rect: Rect {
                    x_pos: 0.0,
                    y_pos: 0.0,
                    size: Size::new(0.0, 0.0),
                },
            }],
        };

        let json = serde_json::to_string(&result).unwrap();
        let decoded: VisionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, result);
    }
}
