//! 手势录制 - 有界帧队列 + 截止时间
//!
//! 追踪库回调通过 `FrameSink` 生产帧，`FrameRecorder::record` 消费：
//! 凑满 30 帧即完成，4 秒截止时返回已收集的部分序列（可能为空）。

pub mod recorder;
pub mod state_machine;

pub use recorder::{FrameRecorder, FrameSink, RecordingOutcome};
pub use state_machine::{RecordingAction, RecordingEvent, RecordingState, RecordingStateMachine};
