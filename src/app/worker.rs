//! The capture worker thread.
//!
//! Captures run off the UI thread so an interactive region selection never
//! blocks the menu. Requests from the menu and the hotkey listener funnel
//! through one channel and are processed strictly in order.

use super::state::AppState;
use crate::capture::{CaptureError, CaptureMode, CapturePipeline};
use log::{debug, info};
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread;

/// Handle to the worker thread.
#[derive(Clone)]
pub struct CaptureWorker {
    requests: Sender<CaptureMode>,
}

impl CaptureWorker {
    /// Spawn the worker. It reads the output folder from `state` at the
    /// moment each request is processed, so folder changes apply to every
    /// capture that has not started yet.
    pub fn spawn(pipeline: CapturePipeline, state: Arc<AppState>) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<CaptureMode>();

        thread::Builder::new()
            .name("capture-worker".to_string())
            .spawn(move || {
                while let Ok(mode) = rx.recv() {
                    let folder = state.output_folder();
                    debug!("Processing {} capture request", mode.label());
                    let outcome = pipeline.run(mode, &folder);
                    debug!("Capture outcome: {:?}", outcome);
                }
                info!("Capture worker shutting down");
            })?;

        Ok(Self { requests: tx })
    }

    /// Queue a capture.
    pub fn request(&self, mode: CaptureMode) -> Result<(), CaptureError> {
        self.requests
            .send(mode)
            .map_err(|_| CaptureError::WorkerStopped)
    }

    /// A sender the hotkey listener can feed directly.
    pub fn request_sender(&self) -> Sender<CaptureMode> {
        self.requests.clone()
    }

    #[cfg(test)]
    fn with_closed_channel() -> Self {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        Self { requests: tx }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{
        CaptureDependencies, CaptureChime, ClipboardPublisher, ImageOptimizer, ScreenGrabber,
    };
    use crate::notify::NotifySink;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    struct RecordingGrabber {
        destinations: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl ScreenGrabber for RecordingGrabber {
        fn grab(&self, _mode: CaptureMode, dest: &Path) -> Result<(), CaptureError> {
            self.destinations.lock().unwrap().push(dest.to_path_buf());
            std::fs::write(dest, b"png").unwrap();
            Ok(())
        }
    }

    struct NoopOptimizer;
    impl ImageOptimizer for NoopOptimizer {
        fn optimize(&self, _path: &Path) -> Result<(), CaptureError> {
            Ok(())
        }
    }

    struct NoopPublisher;
    impl ClipboardPublisher for NoopPublisher {
        fn publish(&self, _path: &Path) -> Result<(), CaptureError> {
            Ok(())
        }
    }

    struct NoopChime;
    impl CaptureChime for NoopChime {
        fn play(&self) {}
    }

    struct NoopSink;
    impl NotifySink for NoopSink {
        fn notify(&self, _title: &str, _body: &str) {}
    }

    fn test_pipeline(destinations: Arc<Mutex<Vec<PathBuf>>>) -> CapturePipeline {
        let deps = CaptureDependencies {
            grabber: Arc::new(RecordingGrabber { destinations }),
            optimizer: Arc::new(NoopOptimizer),
            publisher: Arc::new(NoopPublisher),
            chime: Arc::new(NoopChime),
        };
        CapturePipeline::with_dependencies(deps, Arc::new(NoopSink))
    }

    fn wait_for_count(destinations: &Arc<Mutex<Vec<PathBuf>>>, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if destinations.lock().unwrap().len() >= expected {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("worker never processed {} requests", expected);
    }

    #[test]
    fn worker_processes_queued_requests() {
        let temp = TempDir::new().unwrap();
        let destinations = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(AppState::new(temp.path().to_path_buf()));

        let worker =
            CaptureWorker::spawn(test_pipeline(Arc::clone(&destinations)), state).unwrap();
        worker.request(CaptureMode::FullScreen).unwrap();

        wait_for_count(&destinations, 1);
        assert!(destinations.lock().unwrap()[0].starts_with(temp.path()));
    }

    #[test]
    fn folder_change_applies_to_later_requests() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let destinations = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(AppState::new(first.path().to_path_buf()));

        let worker = CaptureWorker::spawn(
            test_pipeline(Arc::clone(&destinations)),
            Arc::clone(&state),
        )
        .unwrap();

        worker.request(CaptureMode::FullScreen).unwrap();
        wait_for_count(&destinations, 1);

        state.set_output_folder(second.path().to_path_buf());
        worker.request(CaptureMode::Region).unwrap();
        wait_for_count(&destinations, 2);

        let recorded = destinations.lock().unwrap();
        assert!(recorded[0].starts_with(first.path()));
        assert!(recorded[1].starts_with(second.path()));
    }

    #[test]
    fn request_after_shutdown_reports_stopped_worker() {
        let worker = CaptureWorker::with_closed_channel();
        let err = worker.request(CaptureMode::FullScreen).unwrap_err();
        assert!(matches!(err, CaptureError::WorkerStopped));
    }
}
