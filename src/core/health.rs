//! 后端健康检查 - 启动时立即检查一次，之后每 30 秒一次，不重试不退避

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::api::models::backend::HealthStatus;
use crate::core::backend::{BackendClient, BackendError};
use crate::core::config::HealthConfig;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Connected(HealthStatus),
    Disconnected(String),
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected(_))
    }

    pub fn health(&self) -> Option<&HealthStatus> {
        match self {
            ConnectionStatus::Connected(health) => Some(health),
            _ => None,
        }
    }

    fn from_probe(result: Result<HealthStatus, BackendError>) -> Self {
        match result {
            Ok(health) => {
                info!(
                    "✅ Backend connected: model_loaded={} letters={}",
                    health.model_loaded,
                    health.available_letters.len()
                );
                ConnectionStatus::Connected(health)
            }
            Err(BackendError::Server { status, .. }) => {
                warn!("❌ Backend responded with error: {}", status);
                ConnectionStatus::Disconnected(format!("Backend responded with error ({})", status))
            }
            Err(e) => {
                warn!("⚠️ Backend health check failed: {}", e);
                ConnectionStatus::Disconnected(e.to_string())
            }
        }
    }
}

/// One-shot check, same classification as the monitor.
pub async fn check_health(client: &BackendClient) -> ConnectionStatus {
    ConnectionStatus::from_probe(client.health().await)
}

pub struct HealthMonitor {
    status: watch::Receiver<ConnectionStatus>,
    task: JoinHandle<()>,
}

impl HealthMonitor {
    pub fn spawn(client: Arc<BackendClient>, config: &HealthConfig) -> Self {
        Self::spawn_with(config.interval, move || {
            let client = Arc::clone(&client);
            async move { client.health().await }
        })
    }

    /// Runs `probe` now and then once per `period` until stopped.
    pub fn spawn_with<F, Fut>(period: Duration, probe: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<HealthStatus, BackendError>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(ConnectionStatus::Unknown);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let status = ConnectionStatus::from_probe(probe().await);
                if tx.send(status).is_err() {
                    break;
                }
            }
        });

        Self { status: rx, task }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}
