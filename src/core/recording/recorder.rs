use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::{timeout_at, Instant};

use crate::core::config::RecordingConfig;
use crate::core::landmarks::{normalize, FrameSequence, HandTrackingResult, LandmarkFrame};
use crate::core::recording::{RecordingAction, RecordingEvent, RecordingState, RecordingStateMachine};

/// 帧生产端，挂在追踪库的结果回调上
#[derive(Clone)]
pub struct FrameSink {
    tx: mpsc::Sender<LandmarkFrame>,
    active: Arc<AtomicBool>,
}

impl FrameSink {
    /// Queues a frame for the running recording. Returns `false` when no recording is
    /// active or the queue is already full.
    pub fn push(&self, frame: LandmarkFrame) -> bool {
        if !self.active.load(Ordering::Acquire) {
            return false;
        }
        match self.tx.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("📦 Frame queue full, dropping frame");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    pub fn push_result(&self, result: &HandTrackingResult) -> bool {
        self.push(normalize(result))
    }

    pub fn is_recording(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone)]
pub struct RecordingOutcome {
    pub state: RecordingState,
    pub sequence: FrameSequence,
}

impl RecordingOutcome {
    pub fn timed_out(&self) -> bool {
        matches!(self.state, RecordingState::TimedOut { .. })
    }
}

/// 帧消费端，一次 `record` 即一次录制尝试
pub struct FrameRecorder {
    rx: mpsc::Receiver<LandmarkFrame>,
    sink: FrameSink,
    machine: RecordingStateMachine,
    config: RecordingConfig,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::with_config(RecordingConfig::default())
    }

    pub fn with_config(config: RecordingConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.target_frames.max(1));
        Self {
            rx,
            sink: FrameSink {
                tx,
                active: Arc::new(AtomicBool::new(false)),
            },
            machine: RecordingStateMachine::with_config(config.clone()),
            config,
        }
    }

    pub fn sink(&self) -> FrameSink {
        self.sink.clone()
    }

    pub fn state(&self) -> &RecordingState {
        self.machine.current_state()
    }

    pub fn config(&self) -> &RecordingConfig {
        &self.config
    }

    /// Returns to Idle and discards anything still queued.
    pub fn reset(&mut self) {
        self.sink.active.store(false, Ordering::Release);
        self.drain();
        self.machine.reset();
    }

    /// Collects frames until the sequence is full or the deadline passes,
    /// whichever comes first.
    pub async fn record(&mut self) -> RecordingOutcome {
        self.reset();
        self.machine.process(RecordingEvent::Start);

        let target = self.config.target_frames;
        let deadline = Instant::now() + self.config.deadline;
        let mut sequence = FrameSequence::with_capacity(target);

        self.sink.active.store(true, Ordering::Release);
        info!("🎥 Recording started, waiting for {} frames", target);

        loop {
            match timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(frame)) => match self.machine.process(RecordingEvent::Frame) {
                    RecordingAction::Accept => {
                        sequence.push(frame);
                        if sequence.len() % 5 == 0 {
                            debug!("🎥 Recording... {}/{} frames", sequence.len(), target);
                        }
                    }
                    RecordingAction::Complete => {
                        sequence.push(frame);
                        info!("✅ Collected {} frames, stopping recording", sequence.len());
                        break;
                    }
                    _ => {}
                },
                // The sink keeps the sender alive, so a closed queue only means shutdown.
                Ok(None) | Err(_) => {
                    self.machine.process(RecordingEvent::Deadline);
                    info!("⏰ Recording timeout reached: {} frames collected", sequence.len());
                    break;
                }
            }
        }

        self.sink.active.store(false, Ordering::Release);
        self.drain();

        RecordingOutcome {
            state: self.machine.current_state().clone(),
            sequence,
        }
    }

    fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}

impl Default for FrameRecorder {
    fn default() -> Self {
        Self::new()
    }
}
