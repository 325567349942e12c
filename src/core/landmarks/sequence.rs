use serde::Serialize;

use crate::core::landmarks::LandmarkFrame;

/// 一次录制得到的帧序列，作为 `/tutor-check` 的一个推理单元
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrameSequence {
    frames: Vec<LandmarkFrame>,
}

impl FrameSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    /// Builds a sequence from raw rows, fitting each to the fixed frame width.
    pub fn from_rows(rows: &[Vec<f32>]) -> Self {
        Self {
            frames: rows.iter().map(|row| LandmarkFrame::fit(row)).collect(),
        }
    }

    pub fn push(&mut self, frame: LandmarkFrame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[LandmarkFrame] {
        &self.frames
    }

    pub fn first(&self) -> Option<&LandmarkFrame> {
        self.frames.first()
    }

    /// True when there is no first frame or it carries no landmark at all.
    pub fn first_frame_blank(&self) -> bool {
        self.first().map_or(true, LandmarkFrame::is_blank)
    }

    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.frames.iter().map(LandmarkFrame::to_vec).collect()
    }
}

impl FromIterator<LandmarkFrame> for FrameSequence {
    fn from_iter<I: IntoIterator<Item = LandmarkFrame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}
