use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::landmarks::{COORDS_PER_POINT, MAX_HANDS};

/// 手部追踪配置，宿主按此初始化追踪库
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerOptions {
    pub max_num_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            max_num_hands: MAX_HANDS as u32,
            model_complexity: 1,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
        }
    }
}

/// One tracked point. A coordinate is `None` when the tracker omitted it or sent a non-number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RawLandmark {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

impl RawLandmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// All three coordinates, only if each is present and finite.
    pub fn coords(&self) -> Option<[f32; COORDS_PER_POINT]> {
        match (self.x, self.y, self.z) {
            (Some(x), Some(y), Some(z)) if x.is_finite() && y.is_finite() && z.is_finite() => {
                Some([x, y, z])
            }
            _ => None,
        }
    }

    fn from_value(value: &Value) -> Self {
        let coord = |key: &str| value.get(key).and_then(Value::as_f64).map(|v| v as f32);
        Self {
            x: coord("x"),
            y: coord("y"),
            z: coord("z"),
        }
    }
}

/// 追踪库单帧输出
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HandTrackingResult {
    #[serde(
        rename = "multiHandLandmarks",
        default,
        deserialize_with = "lenient_hands"
    )]
    pub hands: Vec<Vec<RawLandmark>>,
}

impl HandTrackingResult {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Each hand as a flat `[x0, y0, z0, x1, ...]` list; a trailing partial point is dropped.
    pub fn from_flat_hands(hands: &[Vec<f32>]) -> Self {
        let hands = hands
            .iter()
            .map(|flat| {
                flat.chunks_exact(COORDS_PER_POINT)
                    .map(|c| RawLandmark::new(c[0], c[1], c[2]))
                    .collect()
            })
            .collect();
        Self { hands }
    }

    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }
}

fn lenient_hands<'de, D>(deserializer: D) -> Result<Vec<Vec<RawLandmark>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(hands)) = value else {
        return Ok(Vec::new());
    };

    Ok(hands
        .iter()
        .map(|hand| match hand {
            Value::Array(points) => points.iter().map(RawLandmark::from_value).collect(),
            _ => Vec::new(),
        })
        .collect())
}
