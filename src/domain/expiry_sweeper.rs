//! Background retention policy for link records.
//!
//! Links live for a fixed retention window counted from `created_at`, regardless
//! of how often they are used. The sweeper runs alongside the HTTP server and
//! periodically asks the repository to drop everything older than the window.
//! Handlers never check expiry themselves.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Retention policy applied by the sweeper.
#[derive(Debug, Clone, Copy)]
pub struct ExpiryPolicy {
    /// How long a link survives after creation.
    pub retention: Duration,
    /// Delay between two sweeps.
    pub interval: std::time::Duration,
}

impl ExpiryPolicy {
    pub fn new(retention: Duration, interval: std::time::Duration) -> Self {
        Self {
            retention,
            interval,
        }
    }
}

/// Removes every link older than the retention window once.
///
/// Returns the number of purged links.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the cutoff falls outside the supported
/// date range, and propagates [`AppError::Internal`] from the repository.
pub async fn sweep_once(
    repository: &dyn LinkRepository,
    retention: Duration,
) -> Result<u64, AppError> {
    let cutoff = Utc::now().checked_sub_signed(retention).ok_or_else(|| {
        AppError::bad_request(
            "Retention window out of range",
            json!({ "retention_seconds": retention.num_seconds() }),
        )
    })?;
    let purged = repository.purge_created_before(cutoff).await?;

    if purged > 0 {
        info!(purged, %cutoff, "Expired links purged");
    } else {
        debug!(%cutoff, "No expired links");
    }

    Ok(purged)
}

/// Runs the sweeper until the task is dropped.
///
/// The first sweep happens immediately so links that expired while the
/// service was down disappear at startup. A failed sweep is logged and the
/// next tick tries again.
pub async fn run_expiry_sweeper(repository: Arc<dyn LinkRepository>, policy: ExpiryPolicy) {
    let mut ticker = time::interval(policy.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        if let Err(e) = sweep_once(repository.as_ref(), policy.retention).await {
            error!(error = %e, "Expiry sweep failed");
        }
    }
}
