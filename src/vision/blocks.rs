//! Block/line recognition backend
//!
//! Adapter for engines in the ML-Kit mold: a two-level structure of text
//! blocks containing lines, with frames in device pixels from a top-left
//! origin and no per-fragment confidence.

use anyhow::Result;
use tracing::debug;

use crate::capture::CapturedFrame;
use crate::config::RecognitionOptions;
use crate::vision::geometry::{normalize_rect, CoordinateOrigin, RawRect, Size};
use crate::vision::result::{TextObservation, VisionResult, UNKNOWN_CONFIDENCE};

/// One recognized line inside a block
#[derive(Debug, Clone)]
pub struct TextLine {
    /// Recognized line content
    pub text: String,
    /// Line frame in device pixels, top-left origin
    pub frame: RawRect,
}

/// A block of adjacent lines, as grouped by the engine
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<TextLine>,
}

/// A host-installed engine producing block/line results
pub trait BlockRecognizer: Send + Sync {
    /// Run recognition on one image and return the raw blocks in emission
    /// order
    fn recognize(
        &self,
        image: &CapturedFrame,
        options: &RecognitionOptions,
    ) -> Result<Vec<TextBlock>>;
}

/// Map raw blocks into the unified result.
///
/// The block level is flattened away; every line becomes one observation
/// stamped with the unknown-confidence sentinel. Line frames arrive in
/// device pixels, so normalization divides by the logical size scaled back
/// up by the device pixel factor.
pub fn unify_blocks(blocks: Vec<TextBlock>, source: &CapturedFrame) -> VisionResult {
    let (logical_width, logical_height) = source.logical_size();
    let image_width = logical_width * source.scale;
    let image_height = logical_height * source.scale;

    let mut text_observations = Vec::new();
    for block in blocks {
        for line in block.lines {
            text_observations.push(TextObservation {
                text: line.text,
                confidence: UNKNOWN_CONFIDENCE,
                normalized_rect: normalize_rect(
                    line.frame,
                    image_width,
                    image_height,
                    CoordinateOrigin::TopLeft,
                ),
            });
        }
    }

    debug!(
        "Unified {} line observations from a {}x{} image",
        text_observations.len(),
        source.width,
        source.height
    );

    VisionResult {
        source_image_size: Size::new(logical_width, logical_height),
        text_observations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32) -> CapturedFrame {
        CapturedFrame::new(vec![255; (width * height * 4) as usize], width, height)
    }

    #[test]
    fn pixel_line_normalizes_against_image_dimensions() {
        let blocks = vec![TextBlock {
            lines: vec![TextLine {
                text: "TOTAL".to_string(),
                frame: RawRect::new(100.0, 200.0, 300.0, 50.0),
            }],
        }];

        let result = unify_blocks(blocks, &frame(1000, 2000));

        assert_eq!(result.source_image_size, Size::new(1000.0, 2000.0));
        let observation = &result.text_observations[0];
        assert_eq!(observation.confidence, UNKNOWN_CONFIDENCE);
        assert!((observation.normalized_rect.x_pos - 0.1).abs() < 1e-6);
        assert!((observation.normalized_rect.y_pos - 0.1).abs() < 1e-6);
        assert!((observation.normalized_rect.size.width - 0.3).abs() < 1e-6);
        assert!((observation.normalized_rect.size.height - 0.025).abs() < 1e-6);
    }

    #[test]
    fn blocks_flatten_into_one_line_sequence() {
        let blocks = vec![
            TextBlock {
                lines: vec![
                    TextLine {
                        text: "one".to_string(),
                        frame: RawRect::new(0.0, 0.0, 10.0, 10.0),
                    },
                    TextLine {
                        text: "two".to_string(),
                        frame: RawRect::new(0.0, 10.0, 10.0, 10.0),
                    },
                ],
            },
            TextBlock {
                lines: vec![TextLine {
                    text: "three".to_string(),
                    frame: RawRect::new(0.0, 20.0, 10.0, 10.0),
                }],
            },
        ];

        let result = unify_blocks(blocks, &frame(100, 100));
        let texts: Vec<&str> = result
            .text_observations
            .iter()
            .map(|o| o.text.as_str())
            .collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn every_observation_gets_the_sentinel_confidence() {
        let blocks = vec![TextBlock {
            lines: vec![
                TextLine {
                    text: "a".to_string(),
                    frame: RawRect::new(0.0, 0.0, 5.0, 5.0),
                },
                TextLine {
                    text: "b".to_string(),
                    frame: RawRect::new(5.0, 5.0, 5.0, 5.0),
                },
            ],
        }];

        let result = unify_blocks(blocks, &frame(10, 10));
        assert!(result
            .text_observations
            .iter()
            .all(|o| o.confidence == UNKNOWN_CONFIDENCE));
    }

    #[test]
    fn scaled_frames_normalize_against_device_pixels() {
        // 500x1000 logical points at 2x: line frames come in device pixels
        let source = CapturedFrame::with_scale(vec![255; 1000 * 2000 * 4], 1000, 2000, 2.0);
        let blocks = vec![TextBlock {
            lines: vec![TextLine {
                text: "scaled".to_string(),
                frame: RawRect::new(100.0, 200.0, 300.0, 50.0),
            }],
        }];

        let result = unify_blocks(blocks, &source);

        // Source size reports logical points, geometry divides device pixels
        assert_eq!(result.source_image_size, Size::new(500.0, 1000.0));
        let rect = &result.text_observations[0].normalized_rect;
        assert!((rect.x_pos - 0.1).abs() < 1e-6);
        assert!((rect.y_pos - 0.1).abs() < 1e-6);
    }
}
