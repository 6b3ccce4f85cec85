use crate::stations::error::StationError;
use crate::types::report::{WeatherForecast, WeatherReport};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

/// How long fetched data is served before it is fetched again.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Everything a station learned from one upstream fetch.
#[derive(Debug, Clone)]
pub struct StationSnapshot {
    pub report: WeatherReport,
    pub forecasts: Vec<WeatherForecast>,
    pub refreshed_at: Instant,
}

/// Time-to-live cache of a station's latest [`StationSnapshot`].
///
/// The snapshot is replaced as a whole, so readers see either the old report and
/// forecasts or the new ones, never a mix. Refreshes are single-flight: callers that
/// find the cache stale queue on a per-station lock, and only the first one fetches.
/// The rest find a fresh snapshot once they get the lock.
pub struct RefreshCache {
    ttl: Duration,
    snapshot: RwLock<Option<Arc<StationSnapshot>>>,
    refresh_lock: Mutex<()>,
}

impl Default for RefreshCache {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

impl RefreshCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached snapshot, if any, regardless of whether it is still fresh.
    pub async fn current(&self) -> Option<Arc<StationSnapshot>> {
        self.snapshot.read().await.clone()
    }

    async fn fresh(&self) -> Option<Arc<StationSnapshot>> {
        self.current()
            .await
            .filter(|snapshot| snapshot.refreshed_at.elapsed() < self.ttl)
    }

    /// Returns the cached snapshot if it is fresh, otherwise runs `refresh` and caches
    /// its result.
    ///
    /// A failed refresh leaves the previous snapshot in place (still stale) and
    /// returns the error. Nothing is retried.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<Arc<StationSnapshot>, StationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(WeatherReport, Vec<WeatherForecast>), StationError>>,
    {
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }

        let (report, forecasts) = refresh().await?;
        let snapshot = Arc::new(StationSnapshot {
            report,
            forecasts,
            refreshed_at: Instant::now(),
        });
        *self.snapshot.write().await = Some(snapshot.clone());
        Ok(snapshot)
    }
}
