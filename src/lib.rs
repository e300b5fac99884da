//! Document scanner OCR core
//!
//! Normalizes raw output from two structurally different text-recognition
//! backends into one backend-agnostic, serializable scan result, and drives
//! the capture -> recognize -> encode -> deliver lifecycle of a single scan
//! request. The recognition engines themselves and the capture UI belong to
//! the host application; this crate owns everything between them.

pub mod capture;
pub mod config;
pub mod scanner;
pub mod vision;

pub use capture::{CaptureResult, CapturedFrame};
pub use config::{RecognitionLevel, RecognitionOptions, ScanConfig};
pub use scanner::{
    CameraPermission, DocumentScanner, ScanHandle, ScanPhase, ScanSession, ScannerBusy,
    ScannerError,
};
pub use vision::{
    encode_scan_result, BlockRecognizer, FragmentRecognizer, PlatformCapabilities,
    RecognitionPipeline, RecognizerKind, ScanResult, TextObservation, VisionResult,
    UNKNOWN_CONFIDENCE,
};
