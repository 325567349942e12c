pub mod coach;
pub mod error;
pub mod models;
pub mod translator;
pub mod vocabulary;

use std::future::Future;

use once_cell::sync::OnceCell;
use tokio::runtime::{Builder, Runtime};

use crate::api::error::IslApiError;

static RUNTIME: OnceCell<Runtime> = OnceCell::new();

/// 共享 tokio 运行时，reqwest 与定时器都依赖它
pub(crate) fn runtime() -> Result<&'static Runtime, IslApiError> {
    RUNTIME.get_or_try_init(|| {
        Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("isl-runtime")
            .enable_all()
            .build()
            .map_err(IslApiError::from)
    })
}

/// Runs `fut` on the shared runtime and waits for it from any executor.
pub(crate) async fn run<F, T>(fut: F) -> Result<T, IslApiError>
where
    F: Future<Output = Result<T, IslApiError>> + Send + 'static,
    T: Send + 'static,
{
    runtime()?.spawn(fut).await?
}
