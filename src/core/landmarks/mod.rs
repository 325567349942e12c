//! 手部关键点 - 把追踪库的逐帧输出整理成固定 126 维向量
//!
//! 2 只手 × 21 个点 × 3 个坐标，缺失的手或点一律补 0，
//! 后端推理依赖这个固定宽度。

pub mod normalizer;
pub mod sequence;
pub mod tracking;

pub const MAX_HANDS: usize = 2;
pub const POINTS_PER_HAND: usize = 21;
pub const COORDS_PER_POINT: usize = 3;
pub const FRAME_WIDTH: usize = MAX_HANDS * POINTS_PER_HAND * COORDS_PER_POINT;

pub use normalizer::{normalize, LandmarkFrame};
pub use sequence::FrameSequence;
pub use tracking::{HandTrackingResult, RawLandmark, TrackerOptions};
