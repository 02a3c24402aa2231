// ABOUTME: Background GPS sampling task that appends location fixes to an active session
// ABOUTME: Includes the LocationSource trait, stale-fix filtering, and cooperative shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChronoFit

//! Background location sampling.
//!
//! A sampler task is spawned per active session. It pulls fixes from a
//! [`LocationSource`] stream, drops fixes older than the configured
//! maximum age, and appends the rest to the session's location track.
//! Shutdown is cooperative: [`SamplerHandle::stop`] signals the task and
//! awaits its completion, so the caller knows no further samples can
//! land after `stop` returns.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use chronofit_core::constants::sampling::MAX_FIX_AGE_SECONDS;
use chronofit_core::errors::LocationError;
use chronofit_core::models::{LocationSample, WorkoutSession};

/// Source of location fixes.
///
/// Implementations wrap whatever positioning facility is available
/// (platform geolocation, a GPS device, a replay file). The returned
/// stream yields fixes until the source is exhausted or fails; a
/// sampler task drains exactly one stream for its lifetime.
pub trait LocationSource: Send + Sync {
    /// Open a stream of location fixes.
    fn watch(&self) -> BoxStream<'static, Result<LocationSample, LocationError>>;
}

/// A source that never produces a fix.
///
/// Used when location tracking is unavailable or declined; sessions
/// still run, with an empty track and zero distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLocationSource;

impl LocationSource for NullLocationSource {
    fn watch(&self) -> BoxStream<'static, Result<LocationSample, LocationError>> {
        stream::empty().boxed()
    }
}

/// Handle to a running sampler task.
pub struct SamplerHandle {
    shutdown_tx: mpsc::Sender<()>,
    join: JoinHandle<()>,
    failure: Arc<Mutex<Option<LocationError>>>,
}

impl SamplerHandle {
    /// The source failure that terminated sampling, if one occurred.
    ///
    /// The session itself keeps running after a source failure; this is
    /// how callers observe that location tracking stopped early.
    #[must_use]
    pub fn failure(&self) -> Option<LocationError> {
        self.failure.lock().ok().and_then(|guard| guard.clone())
    }

    /// Signal the sampler to stop and wait for the task to finish.
    ///
    /// After this returns no further samples will be appended to the
    /// session, which lets the caller freeze distance safely.
    pub async fn stop(self) {
        // Send failure means the task already exited; join regardless.
        let _ = self.shutdown_tx.send(()).await;
        if let Err(err) = self.join.await {
            if err.is_panic() {
                warn!("location sampler task panicked during shutdown");
            }
        }
    }
}

/// Spawn a sampler task feeding the given session from `source`.
///
/// `max_fix_age` bounds how stale a fix may be before it is discarded;
/// sources can replay cached positions and an old fix would distort the
/// track.
pub fn spawn(
    session: Arc<RwLock<WorkoutSession>>,
    source: &dyn LocationSource,
    max_fix_age: Duration,
) -> SamplerHandle {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
    let mut fixes = source.watch();
    let failure = Arc::new(Mutex::new(None));
    let failure_slot = Arc::clone(&failure);

    let join = tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    debug!("location sampler received shutdown signal");
                    break;
                }
                fix = fixes.next() => {
                    match fix {
                        Some(Ok(sample)) => {
                            handle_fix(&session, sample, max_fix_age).await;
                        }
                        Some(Err(err)) => {
                            // Tracking degrades gracefully: the session
                            // keeps running without further samples.
                            warn!(error = %err, "location source failed, stopping sampling");
                            if let Ok(mut slot) = failure_slot.lock() {
                                *slot = Some(err);
                            }
                            break;
                        }
                        None => {
                            debug!("location source exhausted");
                            break;
                        }
                    }
                }
            }
        }
    });

    SamplerHandle {
        shutdown_tx,
        join,
        failure,
    }
}

async fn handle_fix(
    session: &Arc<RwLock<WorkoutSession>>,
    sample: LocationSample,
    max_fix_age: Duration,
) {
    let age = Utc::now() - sample.timestamp;
    if age.num_milliseconds() > i64::try_from(max_fix_age.as_millis()).unwrap_or(i64::MAX) {
        debug!(age_ms = age.num_milliseconds(), "dropping stale location fix");
        return;
    }

    let mut guard = session.write().await;
    if !guard.is_active() {
        debug!("discarding location fix for ended session");
        return;
    }
    if !guard.record_sample(sample) {
        warn!(
            session_id = %guard.id,
            "dropping out-of-order location fix"
        );
    }
}

/// Default maximum fix age used when the config does not override it.
#[must_use]
pub fn default_max_fix_age() -> Duration {
    Duration::from_secs(MAX_FIX_AGE_SECONDS)
}
