//! Scan Configuration
//!
//! Plain in-memory settings owned by the recognition pipeline. Hosts build
//! one per scanner; nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::vision::RecognizerKind;

/// Trade-off between recognition accuracy and speed, forwarded to the
/// engine as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionLevel {
    /// Slower, more accurate recognition (document scans are not
    /// latency-sensitive)
    #[default]
    Accurate,
    /// Faster recognition at reduced accuracy
    Fast,
}

/// Request options forwarded verbatim to the injected recognition engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionOptions {
    /// Recognition accuracy/speed trade-off
    pub level: RecognitionLevel,
    /// Whether the engine should apply language-model correction to
    /// recognized strings
    pub language_correction: bool,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            level: RecognitionLevel::Accurate,
            language_correction: true,
        }
    }
}

/// Settings for one scanner instance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Options handed to whichever engine runs the recognition
    pub recognition: RecognitionOptions,
    /// Force a specific backend instead of capability-based selection.
    /// Intended for diagnostics; leave `None` to let the platform decide.
    pub backend_override: Option<RecognizerKind>,
}
