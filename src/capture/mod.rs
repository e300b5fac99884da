//! Capture Layer
//!
//! Data surface of the external capture flow (camera, edge detection and
//! cropping live in the host). The capture flow hands a finished scan over
//! as a [`CaptureResult`]; everything downstream works on [`CapturedFrame`]
//! values.

pub mod frame;

pub use frame::CapturedFrame;

/// A successful hand-off from the capture flow.
///
/// `original` is the full camera frame, `cropped` the deskewed document
/// crop, and `enhanced` an optional post-processed version of the crop.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    /// The unmodified camera image
    pub original: CapturedFrame,
    /// The cropped document image
    pub cropped: CapturedFrame,
    /// Contrast/color enhanced version of the crop, when the capture flow
    /// produced one
    pub enhanced: Option<CapturedFrame>,
}

impl CaptureResult {
    /// Create a capture result without an enhanced image
    pub fn new(original: CapturedFrame, cropped: CapturedFrame) -> Self {
        Self {
            original,
            cropped,
            enhanced: None,
        }
    }

    /// Attach an enhanced version of the crop
    pub fn with_enhanced(mut self, enhanced: CapturedFrame) -> Self {
        self.enhanced = Some(enhanced);
        self
    }

    /// Split into (analysis image, original image).
    ///
    /// The enhanced image replaces the plain crop entirely when present: it
    /// is both the image recognition runs on and the crop payload shipped
    /// in the final result.
    pub fn into_images(self) -> (CapturedFrame, CapturedFrame) {
        let analysis = match self.enhanced {
            Some(enhanced) => enhanced,
            None => self.cropped,
        };
        (analysis, self.original)
    }
}
