//! Fragment-level recognition backend
//!
//! Adapter for engines in the Vision-framework mold: per-fragment results
//! carrying a best-candidate string, a confidence score, and a bounding box
//! already normalized to the unit square with a bottom-left origin.

use anyhow::Result;
use tracing::debug;

use crate::capture::CapturedFrame;
use crate::config::RecognitionOptions;
use crate::vision::geometry::{normalize_rect, CoordinateOrigin, RawRect, Size};
use crate::vision::result::{TextObservation, VisionResult};

/// Raw per-fragment output of a fragment engine
#[derive(Debug, Clone)]
pub struct RecognizedFragment {
    /// Best candidate string for this fragment
    pub text: String,
    /// Engine-reported confidence in [0, 1]
    pub confidence: f32,
    /// Bounding box in unit-square coordinates, bottom-left origin
    pub bounding_box: RawRect,
}

/// A host-installed engine producing fragment-level results
pub trait FragmentRecognizer: Send + Sync {
    /// Run recognition on one image and return the raw fragments in
    /// emission order
    fn recognize(
        &self,
        image: &CapturedFrame,
        options: &RecognitionOptions,
    ) -> Result<Vec<RecognizedFragment>>;
}

/// Map raw fragments into the unified result.
///
/// Text and confidence pass through verbatim; geometry goes through the
/// bottom-left normalization path. Empty or degenerate fragments are kept,
/// not filtered.
pub fn unify_fragments(
    fragments: Vec<RecognizedFragment>,
    source: &CapturedFrame,
) -> VisionResult {
    let (logical_width, logical_height) = source.logical_size();

    let text_observations: Vec<TextObservation> = fragments
        .into_iter()
        .map(|fragment| TextObservation {
            text: fragment.text,
            confidence: fragment.confidence,
            normalized_rect: normalize_rect(
                fragment.bounding_box,
                logical_width,
                logical_height,
                CoordinateOrigin::BottomLeft,
            ),
        })
        .collect();

    debug!(
        "Unified {} fragment observations from a {}x{} image",
        text_observations.len(),
        source.width,
        source.height
    );

    VisionResult {
        source_image_size: Size::new(logical_width, logical_height),
        text_observations,
    }
}
