use std::sync::Arc;

use log::{error, info};

use crate::core::camera::{CameraBackend, CameraConstraints, CameraError, VideoStream};
use crate::core::frame::VideoFrame;

/// 视频流的唯一持有者
pub struct CameraAcquirer {
    backend: Arc<dyn CameraBackend>,
    stream: Option<Box<dyn VideoStream>>,
}

impl CameraAcquirer {
    pub fn new(backend: Arc<dyn CameraBackend>) -> Self {
        Self {
            backend,
            stream: None,
        }
    }

    /// Requests a stream, releasing the one already held first.
    pub fn acquire(&mut self, constraints: &CameraConstraints) -> Result<(), CameraError> {
        self.release();

        info!(
            "🎥 Requesting camera: {}x{} fps={:?} facing={:?}",
            constraints.width, constraints.height, constraints.frame_rate, constraints.facing
        );

        match self.backend.open(constraints) {
            Ok(stream) => {
                info!("✅ Camera stream obtained ({} tracks)", stream.live_tracks());
                self.stream = Some(stream);
                Ok(())
            }
            Err(e) => {
                error!("❌ Camera access error: {}", e);
                Err(e)
            }
        }
    }

    /// Stops every track of the held stream. Returns `false` when nothing was held.
    pub fn release(&mut self) -> bool {
        match self.stream.take() {
            Some(mut stream) => {
                stream.stop_tracks();
                info!("🛑 Camera stream released");
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    pub fn live_tracks(&self) -> usize {
        self.stream.as_ref().map_or(0, |s| s.live_tracks())
    }

    pub fn capture(&self) -> Option<VideoFrame> {
        self.stream.as_ref().and_then(|s| s.current_frame())
    }
}

impl Drop for CameraAcquirer {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::{CameraAvailability, HostCamera};

    fn frame(value: u8) -> VideoFrame {
        VideoFrame::new(4, 4, vec![value; 4 * 4 * 4], 0)
    }

    #[test]
    fn test_acquire_and_capture() {
        let host = HostCamera::new();
        let mut acquirer = CameraAcquirer::new(Arc::new(host.clone()));

        assert!(acquirer.capture().is_none());
        acquirer
            .acquire(&CameraConstraints::for_alphabet())
            .expect("camera should open");
        assert!(acquirer.is_active());
        assert_eq!(host.live_tracks(), 1);
        assert_eq!(host.last_constraints(), Some(CameraConstraints::for_alphabet()));

        host.submit_frame(frame(7));
        let captured = acquirer.capture().expect("frame should be available");
        assert_eq!(captured.data[0], 7);
    }

    #[test]
    fn test_reacquire_releases_previous_stream() {
        let host = HostCamera::new();
        let mut acquirer = CameraAcquirer::new(Arc::new(host.clone()));

        acquirer.acquire(&CameraConstraints::default()).unwrap();
        acquirer.acquire(&CameraConstraints::for_translator()).unwrap();

        assert_eq!(host.opened_streams(), 2);
        assert_eq!(host.stopped_tracks(), 1);
        assert_eq!(host.live_tracks(), 1);
    }

    #[test]
    fn test_release_is_idempotent() {
        let host = HostCamera::new();
        let mut acquirer = CameraAcquirer::new(Arc::new(host.clone()));
        acquirer.acquire(&CameraConstraints::default()).unwrap();

        assert!(acquirer.release());
        assert!(!acquirer.release());
        assert_eq!(host.stopped_tracks(), 1);
        assert_eq!(host.live_tracks(), 0);
    }

    #[test]
    fn test_drop_releases_stream() {
        let host = HostCamera::new();
        {
            let mut acquirer = CameraAcquirer::new(Arc::new(host.clone()));
            acquirer.acquire(&CameraConstraints::default()).unwrap();
            assert_eq!(host.live_tracks(), 1);
        }
        assert_eq!(host.live_tracks(), 0);
        assert_eq!(host.stopped_tracks(), 1);
    }

    #[test]
    fn test_errors_are_categorized() {
        let host = HostCamera::new();
        let mut acquirer = CameraAcquirer::new(Arc::new(host.clone()));

        host.set_availability(CameraAvailability::PermissionDenied);
        assert_eq!(
            acquirer.acquire(&CameraConstraints::default()),
            Err(CameraError::PermissionDenied)
        );

        host.set_availability(CameraAvailability::NoDevice);
        let err = acquirer.acquire(&CameraConstraints::default()).unwrap_err();
        assert_eq!(err, CameraError::DeviceNotFound);
        assert_eq!(err.to_string(), "No camera found. Please connect a camera.");

        assert!(!acquirer.is_active());
        assert_eq!(host.live_tracks(), 0);
    }
}
