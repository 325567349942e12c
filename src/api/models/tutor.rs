use serde::Serialize;

use crate::api::models::backend::SignCheckResult;
use crate::core::coach::CoachSnapshot;

/// 字母练习界面状态，路径与字母都转成字符串交给 Dart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TutorSnapshot {
    pub selected: Option<String>,
    pub reference_image: Option<String>,
    pub status: String,
    pub result: Option<SignCheckResult>,
    pub is_checking: bool,
    pub is_recording: bool,
}

impl From<CoachSnapshot> for TutorSnapshot {
    fn from(snapshot: CoachSnapshot) -> Self {
        Self {
            selected: snapshot.selected.map(String::from),
            reference_image: snapshot
                .reference_image
                .map(|p| p.to_string_lossy().into_owned()),
            status: snapshot.status,
            result: snapshot.result,
            is_checking: snapshot.is_checking,
            is_recording: snapshot.is_recording,
        }
    }
}
