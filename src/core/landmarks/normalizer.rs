use log::debug;
use serde::{Serialize, Serializer};

use crate::core::landmarks::{HandTrackingResult, COORDS_PER_POINT, FRAME_WIDTH, MAX_HANDS, POINTS_PER_HAND};

/// 单帧关键点向量，长度恒为 126
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkFrame([f32; FRAME_WIDTH]);

impl LandmarkFrame {
    pub fn zeros() -> Self {
        Self([0.0; FRAME_WIDTH])
    }

    /// Truncates or zero-pads arbitrary input to exactly `FRAME_WIDTH` values.
    pub fn fit(values: &[f32]) -> Self {
        let mut out = [0.0; FRAME_WIDTH];
        let n = values.len().min(FRAME_WIDTH);
        out[..n].copy_from_slice(&values[..n]);
        Self(out)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.0.to_vec()
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    /// Number of hand slots carrying at least one non-zero value.
    pub fn hands_present(&self) -> usize {
        self.0
            .chunks_exact(POINTS_PER_HAND * COORDS_PER_POINT)
            .filter(|hand| hand.iter().any(|v| *v != 0.0))
            .count()
    }
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Serialize for LandmarkFrame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// Reshapes one tracker result into a `LandmarkFrame`.
///
/// Hands fill slots in detection order, at most `MAX_HANDS`. A hand with fewer than
/// 21 points counts as missing; a point with an absent or non-finite coordinate
/// contributes three zeros.
pub fn normalize(result: &HandTrackingResult) -> LandmarkFrame {
    let mut values = [0.0; FRAME_WIDTH];

    if result.hands.is_empty() {
        debug!("⚠️ No hands detected, returning zeros");
        return LandmarkFrame(values);
    }

    for (slot, hand) in result.hands.iter().take(MAX_HANDS).enumerate() {
        if hand.len() < POINTS_PER_HAND {
            continue;
        }
        for (index, point) in hand.iter().take(POINTS_PER_HAND).enumerate() {
            if let Some(coords) = point.coords() {
                let base = (slot * POINTS_PER_HAND + index) * COORDS_PER_POINT;
                values[base..base + COORDS_PER_POINT].copy_from_slice(&coords);
            }
        }
    }

    LandmarkFrame(values)
}
