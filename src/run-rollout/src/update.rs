// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Optimistic Concurrency Control (OCC) for service updates.
//!
//! Cloud Run services are updated by replacing the whole object. To avoid
//! lost updates, the replacement must be based on the freshest copy of the
//! service: Cloud Run compares the `metadata.resourceVersion` in the request
//! with the current value and rejects stale requests with a conflict.
//!
//! # Algorithm
//!
//! 1. Get the current service, including its `resourceVersion`.
//! 2. Apply the modifications via the caller's updater.
//! 3. Replace the service.
//! 4. On a conflict, [update_service] returns the error, while
//!    [update_service_with_occ] backs off and starts again from step 1.
//! 5. Any other error fails immediately.
//!
//! # Example
//! ```no_run
//! # async fn sample(client: &google_cloud_run_rollout::client::Services) -> anyhow::Result<()> {
//! use google_cloud_run_rollout::model::EnvVar;
//! use google_cloud_run_rollout::name::ServiceName;
//! use google_cloud_run_rollout::update::{OccConfig, update_service_with_occ};
//!
//! let name = ServiceName::new("my-project", "us-central1", "hello");
//! let service = update_service_with_occ(
//!     client,
//!     &name,
//!     |mut service| {
//!         let Some(container) = service.spec.template.spec.containers.first_mut() else {
//!             return Ok(None);
//!         };
//!         container.env.push(EnvVar::new("FOO", "bar"));
//!         Ok(Some(service))
//!     },
//!     OccConfig::default(),
//! )
//! .await?;
//! # Ok(()) }
//! ```

use crate::Result;
use crate::error::{Error, is_conflict};
use crate::model::Service;
use crate::name::ServiceName;
use crate::stub::Services;
use gax::backoff_policy::BackoffPolicy;
use gax::exponential_backoff::ExponentialBackoffBuilder;
use gax::retry_state::RetryState;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Configuration for the OCC retry loop.
///
/// ```
/// use google_cloud_run_rollout::update::OccConfig;
/// use gax::exponential_backoff::ExponentialBackoffBuilder;
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoffBuilder::new()
///     .with_initial_delay(Duration::from_millis(500))
///     .with_maximum_delay(Duration::from_secs(5))
///     .build()?;
/// let config = OccConfig {
///     max_attempts: 5,
///     max_duration: Duration::from_secs(10),
///     backoff_policy: std::sync::Arc::new(backoff),
/// };
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct OccConfig {
    /// Maximum number of attempts.
    ///
    /// Default: 10
    pub max_attempts: u32,

    /// Maximum total time for the retry loop.
    ///
    /// Default: 30 seconds
    pub max_duration: Duration,

    /// Backoff policy for delays between attempts.
    ///
    /// Default: exponential backoff with `100ms` initial delay, `32s` maximum
    /// delay, and a scaling factor of `2.0`.
    pub backoff_policy: Arc<dyn BackoffPolicy>,
}

impl Default for OccConfig {
    fn default() -> Self {
        let backoff = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_maximum_delay(Duration::from_secs(32))
            .with_scaling(2.0)
            .clamp();
        Self {
            max_attempts: 10,
            max_duration: Duration::from_secs(30),
            backoff_policy: Arc::new(backoff),
        }
    }
}

#[derive(Debug)]
struct OccLoopState {
    attempt_count: u32,
    start_time: Instant,
}

impl OccLoopState {
    fn new() -> Self {
        Self {
            attempt_count: 0,
            start_time: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    fn retry_state(&self) -> RetryState {
        RetryState::new(true)
            .set_start(self.start_time.into_std())
            .set_attempt_count(self.attempt_count)
    }
}

/// Applies `updater` to the freshest copy of the service and replaces it.
///
/// The updater returns `Ok(None)` to cancel the update, in which case the
/// service is returned unmodified. A concurrent change to the service fails
/// the update with an error where [is_conflict()][crate::error::is_conflict]
/// is true, the caller may retry.
pub async fn update_service<S, F>(stub: &S, name: &ServiceName, mut updater: F) -> Result<Service>
where
    S: Services,
    F: FnMut(Service) -> Result<Option<Service>>,
{
    update_once(stub, name, &mut updater).await
}

/// Like [update_service], but retries the read-modify-write on conflicts.
///
/// Only conflicts are retried. Exceeding the limits in `config` returns an
/// error where [is_exhausted()][Error::is_exhausted] is true, with the last
/// conflict as its source.
pub async fn update_service_with_occ<S, F>(
    stub: &S,
    name: &ServiceName,
    mut updater: F,
    config: OccConfig,
) -> Result<Service>
where
    S: Services,
    F: FnMut(Service) -> Result<Option<Service>>,
{
    let mut state = OccLoopState::new();
    loop {
        let e = match update_once(stub, name, &mut updater).await {
            Ok(service) => return Ok(service),
            Err(e) if !is_conflict(&e) => return Err(e),
            Err(e) => e,
        };
        state.attempt_count += 1;
        let elapsed = state.elapsed();
        if state.attempt_count >= config.max_attempts || elapsed >= config.max_duration {
            return Err(Error::exhausted(e));
        }
        tracing::debug!(
            attempt = state.attempt_count,
            elapsed_ms = elapsed.as_millis(),
            "service update aborted due to concurrent change, retrying..."
        );
        let delay = config
            .backoff_policy
            .on_failure(&state.retry_state())
            .min(config.max_duration - elapsed);
        tracing::debug!(delay_ms = delay.as_millis(), "applying backoff before retry");
        tokio::time::sleep(delay).await;
    }
}

async fn update_once<S, F>(stub: &S, name: &ServiceName, updater: &mut F) -> Result<Service>
where
    S: Services,
    F: FnMut(Service) -> Result<Option<Service>>,
{
    let current = stub.get_service(name).await?;
    let resource_version = current.metadata.resource_version.clone();
    let Some(mut updated) = updater(current.clone())? else {
        tracing::debug!("update of {name} cancelled by the updater");
        return Ok(current);
    };
    if updated.metadata.resource_version.is_empty() {
        updated.metadata.resource_version = resource_version;
    }
    updated.status = None;
    stub.replace_service(name, updated).await
}
