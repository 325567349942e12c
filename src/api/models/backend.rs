use serde::{Deserialize, Deserializer, Serialize};

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub reference_data_loaded: bool,
    #[serde(default)]
    pub available_letters: Vec<String>,
}

impl HealthStatus {
    pub fn has_reference(&self, letter: &str) -> bool {
        self.available_letters
            .iter()
            .any(|l| l.eq_ignore_ascii_case(letter))
    }
}

/// `POST /predict`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub prediction: Option<String>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub buffer_size: u32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub hands_detected: u32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub confidence: f64,
}

/// `POST /tutor-check` 判定结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignCheckResult {
    pub result: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub confidence: f64,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub frames_processed: Option<u32>,
    #[serde(default)]
    pub threshold_used: Option<f64>,
}

impl SignCheckResult {
    pub const ERROR: &'static str = "ERROR";

    pub fn error() -> Self {
        Self {
            result: Self::ERROR.to_string(),
            confidence: 0.0,
            distance: None,
            frames_processed: None,
            threshold_used: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.result == Self::ERROR
    }

    pub fn confidence_percent(&self) -> String {
        format!("{:.1}", self.confidence * 100.0)
    }
}

fn zero_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
