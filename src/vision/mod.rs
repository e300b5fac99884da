//! Vision/OCR Layer
//!
//! Normalizes recognition output from two structurally different OCR
//! backends into one backend-agnostic result:
//! - fragment engine: per-fragment results with unit-square bottom-left
//!   geometry and a confidence score
//! - block engine: block/line results with device-pixel top-left geometry
//!   and no confidence

pub mod blocks;
pub mod encode;
pub mod fragments;
pub mod geometry;
pub mod result;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::capture::CapturedFrame;
use crate::config::ScanConfig;

pub use blocks::{unify_blocks, BlockRecognizer, TextBlock, TextLine};
pub use encode::{encode_scan_result, EncodingError, ScanResult};
pub use fragments::{unify_fragments, FragmentRecognizer, RecognizedFragment};
pub use geometry::{normalize_rect, CoordinateOrigin, RawRect, Rect, Size};
pub use result::{TextObservation, VisionResult, UNKNOWN_CONFIDENCE};

/// Recognition backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerKind {
    /// Fragment-level engine, preferred where the platform supports it
    Fragment,
    /// Block/line-level engine, the fallback
    Block,
}

/// What the runtime platform can run.
///
/// Produced by a detection function injected into the pipeline, so no
/// platform-version checks hide inside call sites.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformCapabilities {
    /// Whether the fragment-level engine is available on this platform
    pub fragment_engine_available: bool,
}

/// Recognition pipeline over the two injected engines.
///
/// Owns the engines and the scan configuration; backend selection happens
/// per recognition call against a fresh capability probe.
pub struct RecognitionPipeline {
    fragment_engine: Option<Box<dyn FragmentRecognizer>>,
    block_engine: Option<Box<dyn BlockRecognizer>>,
    capabilities: Box<dyn Fn() -> PlatformCapabilities + Send + Sync>,
    config: ScanConfig,
}

impl RecognitionPipeline {
    /// Create a pipeline with no engines installed
    pub fn new(
        config: ScanConfig,
        capabilities: impl Fn() -> PlatformCapabilities + Send + Sync + 'static,
    ) -> Self {
        Self {
            fragment_engine: None,
            block_engine: None,
            capabilities: Box::new(capabilities),
            config,
        }
    }

    /// Install the fragment-level engine
    pub fn with_fragment_engine(mut self, engine: Box<dyn FragmentRecognizer>) -> Self {
        self.fragment_engine = Some(engine);
        self
    }

    /// Install the block/line-level engine
    pub fn with_block_engine(mut self, engine: Box<dyn BlockRecognizer>) -> Self {
        self.block_engine = Some(engine);
        self
    }

    /// Get the scan configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Pick the backend for one scan.
    ///
    /// Re-evaluated on every call; the capability probe result is never
    /// cached across scans.
    pub fn select_backend(&self) -> RecognizerKind {
        if let Some(kind) = self.config.backend_override {
            debug!("Backend forced to {:?} by configuration", kind);
            return kind;
        }

        if (self.capabilities)().fragment_engine_available {
            RecognizerKind::Fragment
        } else {
            RecognizerKind::Block
        }
    }

    /// Run the selected backend on one image and unify its raw output
    pub fn recognize(&self, image: &CapturedFrame) -> Result<VisionResult> {
        let backend = self.select_backend();
        info!("Recognizing with the {:?} backend", backend);

        match backend {
            RecognizerKind::Fragment => {
                let Some(engine) = &self.fragment_engine else {
                    bail!("fragment backend selected but no engine is installed");
                };
                let raw = engine.recognize(image, &self.config.recognition)?;
                debug!("Fragment engine returned {} fragments", raw.len());
                Ok(unify_fragments(raw, image))
            }
            RecognizerKind::Block => {
                let Some(engine) = &self.block_engine else {
                    bail!("block backend selected but no engine is installed");
                };
                let raw = engine.recognize(image, &self.config.recognition)?;
                debug!("Block engine returned {} blocks", raw.len());
                Ok(unify_blocks(raw, image))
            }
        }
    }
}
