//! Scan request lifecycle
//!
//! Drives one document scan from the capture hand-off through recognition
//! to the single delivery of the transport string. The caller waits on a
//! [`ScanHandle`]; the external capture flow reports into a
//! [`ScanSession`]; recognition runs on a worker thread so neither side
//! ever blocks on it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::capture::{CaptureResult, CapturedFrame};
use crate::vision::{encode_scan_result, RecognitionPipeline};

/// Failure reasons surfaced to the caller as fixed sentinel strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScannerError {
    /// Camera permission was never granted; capture could not start
    #[error("noCameraPermission")]
    NoCameraPermission,
    /// The user backed out of the capture flow
    #[error("scanCancelled")]
    ScanCancelled,
    /// The capture flow reported an error
    #[error("scanFailed")]
    ScanFailed,
}

impl ScannerError {
    /// The literal string sent across the transport boundary.
    ///
    /// Consumers distinguish failures from results by attempting to parse
    /// the delivered string as a scan result; these sentinels are not JSON.
    pub fn sentinel(self) -> &'static str {
        match self {
            ScannerError::NoCameraPermission => "noCameraPermission",
            ScannerError::ScanCancelled => "scanCancelled",
            ScannerError::ScanFailed => "scanFailed",
        }
    }
}

/// A scan was started while another one is still active
#[derive(Debug, Error)]
#[error("a scan is already in progress")]
pub struct ScannerBusy;

/// Outcome of the host's camera permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPermission {
    Granted,
    Denied,
}

/// Lifecycle of one scan request.
///
/// A request starts in `AwaitingCapture` (the scanner itself is idle
/// between requests) and ends in exactly one of the terminal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// Waiting for the external capture flow to hand images over
    AwaitingCapture,
    /// The recognition worker is running; cancellation is no longer
    /// possible
    Recognizing,
    /// The encoded result was delivered
    Completed,
    /// The user cancelled during capture
    Cancelled,
    /// The request ended without a result
    Failed,
}

/// Shared per-request cell: the phase machine, the take-once completion
/// sender, and the scanner's busy flag to release at the end.
struct SessionShared {
    phase: Mutex<ScanPhase>,
    completion: Mutex<Option<Sender<String>>>,
    active: Arc<AtomicBool>,
}

impl SessionShared {
    /// Move from the capture stage into a terminal phase and deliver the
    /// sentinel. Signals arriving after capture has ended are protocol
    /// violations and only get logged.
    fn finish_from_capture(&self, terminal: ScanPhase, error: ScannerError) {
        {
            let mut phase = self.phase.lock();
            match *phase {
                ScanPhase::AwaitingCapture => *phase = terminal,
                current => {
                    warn!(
                        "Ignoring {:?} signal, request is already {:?}",
                        terminal, current
                    );
                    return;
                }
            }
        }
        self.deliver(error.sentinel().to_string());
    }

    /// Deliver the encoded result from the recognition worker
    fn complete(&self, payload: String) {
        *self.phase.lock() = ScanPhase::Completed;
        self.deliver(payload);
    }

    /// End the request without delivering anything. The completion channel
    /// is dropped so a waiting caller unblocks with no result.
    fn abandon(&self) {
        *self.phase.lock() = ScanPhase::Failed;
        // Free the request slot before unblocking the caller
        self.active.store(false, Ordering::SeqCst);
        drop(self.completion.lock().take());
    }

    /// Send the payload exactly once; every later attempt is logged and
    /// suppressed.
    fn deliver(&self, payload: String) {
        let sender = self.completion.lock().take();
        // Free the request slot before unblocking the caller
        self.active.store(false, Ordering::SeqCst);
        match sender {
            Some(sender) => {
                if sender.send(payload).is_err() {
                    warn!("Scan result dropped, the caller went away");
                }
            }
            None => warn!("Completion already delivered, suppressing a second delivery"),
        }
    }
}

/// Entry point for scan requests.
///
/// Holds the recognition pipeline and enforces the one-active-request rule;
/// each accepted request gets its own session and handle.
pub struct DocumentScanner {
    pipeline: Arc<RecognitionPipeline>,
    active: Arc<AtomicBool>,
}

impl DocumentScanner {
    pub fn new(pipeline: RecognitionPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Begin one scan.
    ///
    /// The session goes to the capture flow, the handle to whoever waits
    /// for the result. A denied camera permission still yields both, with
    /// the request already failed and the sentinel already delivered.
    pub fn start_scan(
        &self,
        permission: CameraPermission,
    ) -> Result<(ScanSession, ScanHandle), ScannerBusy> {
        if self.active.swap(true, Ordering::SeqCst) {
            return Err(ScannerBusy);
        }

        let (sender, receiver) = bounded(1);
        let session = ScanSession {
            shared: Arc::new(SessionShared {
                phase: Mutex::new(ScanPhase::AwaitingCapture),
                completion: Mutex::new(Some(sender)),
                active: Arc::clone(&self.active),
            }),
            pipeline: Arc::clone(&self.pipeline),
        };

        if permission == CameraPermission::Denied {
            info!("Camera permission denied, capture never starts");
            session
                .shared
                .finish_from_capture(ScanPhase::Failed, ScannerError::NoCameraPermission);
        }

        Ok((session, ScanHandle { receiver }))
    }
}

/// The capture flow's surface of one scan request
pub struct ScanSession {
    shared: Arc<SessionShared>,
    pipeline: Arc<RecognitionPipeline>,
}

impl ScanSession {
    /// Current phase of the request
    pub fn phase(&self) -> ScanPhase {
        *self.shared.phase.lock()
    }

    /// The user backed out of the capture flow.
    ///
    /// Only honored while capture is the active stage; once recognition
    /// has started it runs to completion or failure.
    pub fn cancel_capture(&self) {
        self.shared
            .finish_from_capture(ScanPhase::Cancelled, ScannerError::ScanCancelled);
    }

    /// The capture flow reported an error
    pub fn fail_capture(&self) {
        self.shared
            .finish_from_capture(ScanPhase::Failed, ScannerError::ScanFailed);
    }

    /// Capture finished; hand the images to recognition on a worker
    /// thread. The pipeline runs recognize -> unify -> encode -> deliver
    /// strictly in order for this one request.
    pub fn finish_capture(&self, capture: CaptureResult) {
        {
            let mut phase = self.shared.phase.lock();
            if *phase != ScanPhase::AwaitingCapture {
                warn!("Ignoring capture completion, request is already {:?}", *phase);
                return;
            }
            *phase = ScanPhase::Recognizing;
        }

        let (analysis, original) = capture.into_images();
        let shared = Arc::clone(&self.shared);
        let pipeline = Arc::clone(&self.pipeline);
        thread::spawn(move || run_recognition(pipeline, analysis, original, shared));
    }
}

/// Recognition worker body: one request, strictly sequential stages.
fn run_recognition(
    pipeline: Arc<RecognitionPipeline>,
    analysis: CapturedFrame,
    original: CapturedFrame,
    shared: Arc<SessionShared>,
) {
    let vision_result = match pipeline.recognize(&analysis) {
        Ok(result) => result,
        Err(e) => {
            error!("Recognition failed, no result will be delivered: {:#}", e);
            shared.abandon();
            return;
        }
    };

    match encode_scan_result(vision_result, &analysis, &original) {
        Ok(json) => shared.complete(json),
        Err(e) => {
            error!("Result serialization failed, no result will be delivered: {}", e);
            shared.abandon();
        }
    }
}

/// The caller's end of the completion channel
pub struct ScanHandle {
    receiver: Receiver<String>,
}

impl ScanHandle {
    /// Block until the transport string arrives.
    ///
    /// Returns `None` when the request ended without a deliverable result
    /// (backend or serialization error). There is no internal timeout;
    /// bound the wait on the calling side if one is needed.
    pub fn wait(self) -> Option<String> {
        self.receiver.recv().ok()
    }

    /// Non-blocking poll for the transport string
    pub fn try_result(&self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}
