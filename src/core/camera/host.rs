//! 宿主相机 - Flutter 侧持有物理相机，通过桥接层推送最新帧和权限状态

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use crate::core::camera::{CameraBackend, CameraConstraints, CameraError, VideoStream};
use crate::core::frame::VideoFrame;

/// 宿主上报的相机可用性
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CameraAvailability {
    #[default]
    Available,
    PermissionDenied,
    NoDevice,
    Unsupported,
    Failed(String),
}

#[derive(Default)]
struct HostCameraState {
    availability: CameraAvailability,
    latest: Option<VideoFrame>,
    live_tracks: usize,
    opened_streams: u64,
    stopped_tracks: u64,
    last_constraints: Option<CameraConstraints>,
}

#[derive(Clone, Default)]
pub struct HostCamera {
    state: Arc<Mutex<HostCameraState>>,
}

impl HostCamera {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HostCameraState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_availability(&self, availability: CameraAvailability) {
        debug!("📷 Host camera availability: {:?}", availability);
        self.lock().availability = availability;
    }

    /// Frames pushed while no stream is live are dropped.
    pub fn submit_frame(&self, frame: VideoFrame) {
        let mut state = self.lock();
        if state.live_tracks > 0 {
            state.latest = Some(frame);
        }
    }

    pub fn live_tracks(&self) -> usize {
        self.lock().live_tracks
    }

    pub fn opened_streams(&self) -> u64 {
        self.lock().opened_streams
    }

    pub fn stopped_tracks(&self) -> u64 {
        self.lock().stopped_tracks
    }

    pub fn last_constraints(&self) -> Option<CameraConstraints> {
        self.lock().last_constraints.clone()
    }
}

impl CameraBackend for HostCamera {
    fn open(&self, constraints: &CameraConstraints) -> Result<Box<dyn VideoStream>, CameraError> {
        let mut state = self.lock();
        match &state.availability {
            CameraAvailability::Available => {}
            CameraAvailability::PermissionDenied => return Err(CameraError::PermissionDenied),
            CameraAvailability::NoDevice => return Err(CameraError::DeviceNotFound),
            CameraAvailability::Unsupported => return Err(CameraError::Unsupported),
            CameraAvailability::Failed(message) => return Err(CameraError::Other(message.clone())),
        }

        state.live_tracks += 1;
        state.opened_streams += 1;
        state.last_constraints = Some(constraints.clone());

        Ok(Box::new(HostStream {
            state: Arc::clone(&self.state),
            stopped: false,
        }))
    }
}

struct HostStream {
    state: Arc<Mutex<HostCameraState>>,
    stopped: bool,
}

impl VideoStream for HostStream {
    fn current_frame(&self) -> Option<VideoFrame> {
        if self.stopped {
            return None;
        }
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.latest.clone()
    }

    fn live_tracks(&self) -> usize {
        if self.stopped {
            0
        } else {
            1
        }
    }

    fn stop_tracks(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.live_tracks = state.live_tracks.saturating_sub(1);
        state.stopped_tracks += 1;
        if state.live_tracks == 0 {
            state.latest = None;
        }
    }
}
