//! Dashboard pages as server-side view models.
//!
//! Every page fetches its data once per request. A failed fetch is logged and
//! replaced by the page's literal demo dataset; the caller never sees the error.

pub mod fallback;
pub mod shell;
pub mod views;

pub use shell::*;
pub use views::*;

use crate::utils::AppError;
use serde::Serialize;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Fallback,
}

/// A dataset together with where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub source: DataSource,
    pub data: T,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self { source: DataSource::Live, data }
    }

    pub fn fallback(data: T) -> Self {
        Self { source: DataSource::Fallback, data }
    }

    pub fn is_live(&self) -> bool {
        self.source == DataSource::Live
    }
}

/// Awaits `fetch` once; on error logs it and returns `fallback()` instead
pub async fn fetch_or_fallback<T, F, D>(what: &str, fetch: F, fallback: D) -> Sourced<T>
where
    F: Future<Output = Result<T, AppError>>,
    D: FnOnce() -> T,
{
    match fetch.await {
        Ok(data) => Sourced::live(data),
        Err(e) => {
            log::warn!("⚠️  Error fetching {}: {} (using demo data)", what, e);
            Sourced::fallback(fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_is_live() {
        let sourced = fetch_or_fallback("numbers", async { Ok(vec![1, 2]) }, || vec![9]).await;
        assert_eq!(sourced, Sourced::live(vec![1, 2]));
    }

    #[tokio::test]
    async fn failure_uses_fallback() {
        let sourced = fetch_or_fallback(
            "numbers",
            async { Err::<Vec<i32>, _>(AppError::DatabaseError("down".into())) },
            || vec![9],
        )
        .await;
        assert_eq!(sourced, Sourced::fallback(vec![9]));
        assert!(!sourced.is_live());
    }
}
