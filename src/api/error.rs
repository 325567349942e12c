use serde::{Deserialize, Serialize};

use crate::core::backend::BackendError;
use crate::core::camera::CameraError;
use crate::core::coach::CoachError;
use crate::core::translator::TranslatorError;
use crate::core::vocabulary::VocabularyError;

/// 桥接层统一错误，FRB 友好：`error_type` 供 Dart 侧分支，`message` 直接展示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslApiError {
    pub error_type: String,
    pub message: String,
}

impl IslApiError {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    pub(crate) fn runtime(e: impl std::fmt::Display) -> Self {
        Self::new("RuntimeError", format!("Async runtime error: {}", e))
    }
}

impl std::fmt::Display for IslApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_type, self.message)
    }
}

impl std::error::Error for IslApiError {}

impl From<CameraError> for IslApiError {
    fn from(e: CameraError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

impl From<BackendError> for IslApiError {
    fn from(e: BackendError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

impl From<CoachError> for IslApiError {
    fn from(e: CoachError) -> Self {
        Self::new(e.kind(), e.to_string())
    }
}

impl From<TranslatorError> for IslApiError {
    fn from(e: TranslatorError) -> Self {
        match e {
            TranslatorError::Camera(e) => e.into(),
            TranslatorError::Backend(e) => e.into(),
            TranslatorError::Encode(e) => Self::new("EncodeError", e.to_string()),
        }
    }
}

impl From<VocabularyError> for IslApiError {
    fn from(e: VocabularyError) -> Self {
        Self::new("RegexError", e.to_string())
    }
}

impl From<serde_json::Error> for IslApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::new("InvalidLandmarks", format!("Invalid landmark payload: {}", e))
    }
}

impl From<tokio::task::JoinError> for IslApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::runtime(e)
    }
}

impl From<std::io::Error> for IslApiError {
    fn from(e: std::io::Error) -> Self {
        Self::runtime(e)
    }
}
