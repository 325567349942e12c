//! 推理后端 HTTP 客户端
//!
//! 后端不在本仓库内，只通过 `/health`、`/predict`、`/reset`、`/tutor-check` 交互。

pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{error_message, BackendClient};
pub use error::BackendError;
