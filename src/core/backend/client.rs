use std::time::Duration;

use log::{debug, error, info};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::models::backend::{HealthStatus, PredictResponse, SignCheckResult};
use crate::core::backend::BackendError;
use crate::core::config::BackendConfig;
use crate::core::landmarks::FrameSequence;

#[derive(Serialize)]
struct PredictRequest<'a> {
    session_id: &'a str,
    frame: &'a str,
}

#[derive(Serialize)]
struct ResetRequest<'a> {
    session_id: &'a str,
}

#[derive(Serialize)]
struct TutorCheckRequest<'a> {
    sign: &'a str,
    sequence: &'a FrameSequence,
}

pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus, BackendError> {
        debug!("🔍 Checking backend at: {}", self.config.base_url);
        let request = self.client.get(self.config.endpoint("health"));
        self.send_json(request, self.config.request_timeout).await
    }

    /// 单帧识别，服务端按 session 缓冲帧
    pub async fn predict(
        &self,
        session_id: &str,
        frame_b64: &str,
    ) -> Result<PredictResponse, BackendError> {
        let request = self
            .client
            .post(self.config.endpoint("predict"))
            .json(&PredictRequest {
                session_id,
                frame: frame_b64,
            });
        self.send_json(request, self.config.request_timeout).await
    }

    /// Clears the server-side buffer of a session. The response body is ignored.
    pub async fn reset(&self, session_id: &str) -> Result<(), BackendError> {
        let request = self
            .client
            .post(self.config.endpoint("reset"))
            .json(&ResetRequest { session_id });
        let response = self.send(request, self.config.request_timeout).await?;
        debug!("🔄 Session {} reset ({})", session_id, response.status());
        Ok(())
    }

    /// 提交一段录制序列，等待单个判定结果
    pub async fn tutor_check(
        &self,
        sign: &str,
        sequence: &FrameSequence,
    ) -> Result<SignCheckResult, BackendError> {
        info!(
            "📤 Sending request to /tutor-check: sign={} frames={}",
            sign,
            sequence.len()
        );
        let request = self
            .client
            .post(self.config.endpoint("tutor-check"))
            .json(&TutorCheckRequest { sign, sequence });
        self.send_json(request, self.config.check_timeout).await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<reqwest::Response, BackendError> {
        let response = request
            .timeout(timeout)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!("📥 Response status: {}", status);
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(body) => error_message(status.as_u16(), &body),
            Err(e) => format!("Failed to read error: {}", e),
        };
        error!("❌ Backend error {}: {}", status, message);
        Err(BackendError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        timeout: Duration,
    ) -> Result<T, BackendError> {
        let response = self.send(request, timeout).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

/// Human-readable message for a non-2xx response: the JSON `detail`, then `message`,
/// then the raw body.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "message"] {
            match map.get(key) {
                Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                Some(Value::String(_)) | Some(Value::Null) | None => continue,
                Some(other) => return other.to_string(),
            }
        }
    }

    let raw = body.trim();
    if raw.is_empty() {
        format!("Server error: {}", status)
    } else {
        raw.to_string()
    }
}
