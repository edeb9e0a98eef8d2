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

//! Wait for a Cloud Run service to reach a desired state.
//!
//! Cloud Run reports the progress of a deployment through the conditions in
//! the service status. Each condition is `True`, `False`, or `Unknown`, and
//! some conditions only appear once the service starts processing a change.
//! The [ReadinessWatcher] polls the service until the condition is `True`
//! (success), `False` (a terminal failure), or the deadline expires.
//!
//! The watcher fails fast on an explicit negative signal, keeps waiting on an
//! ambiguous signal, and always bounds the total wait time.

use crate::error::{Error, is_not_found};
use crate::model::{Condition, ConditionStatus, READY, Service};
use crate::name::ServiceName;
use crate::stub::Services;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

/// The default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// The default deadline for [wait_for_ready][ReadinessWatcher::wait_for_ready].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// The condition label used in timeouts from
/// [wait_for_absence][ReadinessWatcher::wait_for_absence].
pub const DELETED: &str = "Deleted";

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

// Used for deadlines that cannot be represented, roughly 30 years.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Bounds the total time of a wait.
///
/// Relative deadlines are anchored when the wait starts, not when the
/// `Deadline` is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deadline {
    /// Expires at the given instant.
    At(Instant),
    /// Expires after the given duration, measured from the start of the wait.
    After(Duration),
}

impl Deadline {
    pub fn at(instant: Instant) -> Self {
        Self::At(instant)
    }

    pub fn after(duration: Duration) -> Self {
        Self::After(duration)
    }

    fn resolve(self, start: Instant) -> Instant {
        match self {
            Self::At(i) => i,
            Self::After(d) => start.checked_add(d).unwrap_or(start + FAR_FUTURE),
        }
    }
}

impl From<Duration> for Deadline {
    fn from(value: Duration) -> Self {
        Self::After(value)
    }
}

impl From<Instant> for Deadline {
    fn from(value: Instant) -> Self {
        Self::At(value)
    }
}

impl From<std::time::Instant> for Deadline {
    fn from(value: std::time::Instant) -> Self {
        Self::At(value.into())
    }
}

/// The error returned by the [ReadinessWatcher].
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum WaitError {
    /// The watcher could not fetch the service.
    ///
    /// This is never treated as "not ready yet", the service may have been
    /// deleted, or the caller may have lost access to it.
    #[error("cannot fetch the service status")]
    Fetch(#[source] Error),

    /// The condition reached an explicit negative status.
    #[error("condition {condition} is {status}, reason: {reason}, message: {message}")]
    ConditionFailed {
        condition: String,
        status: ConditionStatus,
        reason: String,
        message: String,
    },

    /// The deadline expired before the condition reached a terminal status.
    #[error("timeout after {elapsed:?} waiting for condition {condition}, last observed: {last:?}")]
    Timeout {
        condition: String,
        elapsed: Duration,
        /// The last observed value of the condition, if any.
        last: Option<Condition>,
    },
}

impl WaitError {
    /// The deadline expired, the caller may extend the wait and try again.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// The service reported a terminal failure.
    pub fn is_condition_failed(&self) -> bool {
        matches!(self, Self::ConditionFailed { .. })
    }

    /// The wrapped fetch error, if any.
    pub fn fetch_error(&self) -> Option<&Error> {
        match self {
            Self::Fetch(e) => Some(e),
            _ => None,
        }
    }
}

/// Polls a service until a condition becomes `True` or `False`.
///
/// Each call to [wait_for_condition][ReadinessWatcher::wait_for_condition]
/// is independent, the watcher holds no state between calls. Awaiting
/// several conditions, or several services, concurrently is safe.
///
/// The first poll happens one interval after the wait starts. Each fetch is
/// bounded by the deadline, so the wait never outlives it.
///
/// # Example
/// ```no_run
/// # async fn sample(client: &google_cloud_run_rollout::client::Services) -> anyhow::Result<()> {
/// use google_cloud_run_rollout::model::ROUTES_READY;
/// use google_cloud_run_rollout::name::ServiceName;
/// use google_cloud_run_rollout::watcher::{Deadline, ReadinessWatcher};
/// use std::time::Duration;
///
/// let name = ServiceName::new("my-project", "us-central1", "hello");
/// let watcher = ReadinessWatcher::new(client).with_poll_interval(Duration::from_secs(2));
/// match watcher.wait_for_condition(&name, ROUTES_READY, Deadline::after(Duration::from_secs(60))).await {
///     Ok(service) => println!("routes are ready: {:?}", service.url()),
///     Err(e) if e.is_timeout() => println!("still deploying, try again later"),
///     Err(e) => return Err(e.into()),
/// }
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct ReadinessWatcher<'a, S> {
    stub: &'a S,
    poll_interval: Duration,
    timeout: Duration,
}

impl<'a, S> ReadinessWatcher<'a, S>
where
    S: Services,
{
    pub fn new(stub: &'a S) -> Self {
        Self {
            stub,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Changes the time between polls.
    ///
    /// The value is clamped between one millisecond and one day.
    pub fn with_poll_interval(mut self, v: Duration) -> Self {
        self.poll_interval = v.clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL);
        self
    }

    /// Changes the deadline used by [wait_for_ready][Self::wait_for_ready].
    pub fn with_timeout(mut self, v: Duration) -> Self {
        self.timeout = v;
        self
    }

    /// Waits until the `Ready` condition is `True`.
    pub async fn wait_for_ready(&self, name: &ServiceName) -> Result<Service, WaitError> {
        self.wait_for_condition(name, READY, Deadline::after(self.timeout))
            .await
    }

    /// Waits until `condition_type` is `True`, returning the service as last
    /// observed.
    ///
    /// Returns [WaitError::ConditionFailed] as soon as the condition is
    /// `False`, and [WaitError::Timeout] if the deadline expires first. A
    /// missing condition is treated as `Unknown`.
    #[tracing::instrument(level = "debug", skip_all, fields(service = %name, condition = condition_type))]
    pub async fn wait_for_condition<D>(
        &self,
        name: &ServiceName,
        condition_type: &str,
        deadline: D,
    ) -> Result<Service, WaitError>
    where
        D: Into<Deadline>,
    {
        self.poll(name, condition_type, deadline.into(), |response| {
            let service = response.map_err(WaitError::Fetch)?;
            let Some(condition) = service.condition(condition_type).cloned() else {
                tracing::debug!("condition {condition_type} not reported yet");
                return Ok(Poll::Pending(None));
            };
            match condition.status {
                ConditionStatus::True => Ok(Poll::Ready(service)),
                ConditionStatus::False => Err(WaitError::ConditionFailed {
                    condition: condition.condition_type,
                    status: condition.status,
                    reason: condition.reason,
                    message: condition.message,
                }),
                ConditionStatus::Unknown => {
                    tracing::debug!(
                        "condition {condition_type} is Unknown, reason: {}",
                        condition.reason
                    );
                    Ok(Poll::Pending(Some(condition)))
                }
            }
        })
        .await
    }

    /// Waits until the service no longer exists.
    ///
    /// Cloud Run deletes services asynchronously. Use this function after
    /// [delete_service][Services::delete_service] to wait until the service
    /// is gone. Errors other than "not found" are returned immediately.
    #[tracing::instrument(level = "debug", skip_all, fields(service = %name))]
    pub async fn wait_for_absence<D>(&self, name: &ServiceName, deadline: D) -> Result<(), WaitError>
    where
        D: Into<Deadline>,
    {
        self.poll(name, DELETED, deadline.into(), |response| match response {
            Ok(_) => Ok(Poll::Pending(None)),
            Err(e) if is_not_found(&e) => Ok(Poll::Ready(())),
            Err(e) => Err(WaitError::Fetch(e)),
        })
        .await
    }

    async fn poll<T, F>(
        &self,
        name: &ServiceName,
        label: &str,
        deadline: Deadline,
        mut check: F,
    ) -> Result<T, WaitError>
    where
        F: FnMut(crate::Result<Service>) -> Result<Poll<T>, WaitError>,
    {
        let start = Instant::now();
        let deadline = deadline.resolve(start);
        let mut ticker = tokio::time::interval_at(start + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = None;
        let timeout = |last| WaitError::Timeout {
            condition: label.to_string(),
            elapsed: start.elapsed(),
            last,
        };
        loop {
            tokio::select! {
                biased;
                _ = tokio::time::sleep_until(deadline) => return Err(timeout(last)),
                _ = ticker.tick() => {},
            }
            let response =
                match tokio::time::timeout_at(deadline, self.stub.get_service(name)).await {
                    Ok(r) => r,
                    Err(_) => return Err(timeout(last)),
                };
            match check(response)? {
                Poll::Ready(v) => return Ok(v),
                Poll::Pending(observed) => last = observed.or(last),
            }
        }
    }
}

enum Poll<T> {
    Ready(T),
    Pending(Option<Condition>),
}
