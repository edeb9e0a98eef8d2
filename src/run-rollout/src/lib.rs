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

//! Helpers to drive the lifecycle of a [Cloud Run] service.
//!
//! Cloud Run applies most changes asynchronously: creating a service, or
//! updating its template, returns as soon as the request is accepted. The
//! service then reports its progress through a set of *conditions* in its
//! status. This crate contains:
//!
//! - [client::Services], a small client for the Cloud Run admin API.
//! - [watcher::ReadinessWatcher], which polls a service until a condition
//!   becomes `True` or `False`, or a deadline expires.
//! - [exists::service_exists], which turns "not found" into `false`.
//! - [update::update_service], a read-modify-write helper using the
//!   service's `resourceVersion` for optimistic concurrency control.
//! - [traffic::split] and [iam::allow_unauthenticated] for the most common
//!   changes after a deployment.
//! - [rollout::run], which strings all the pieces together.
//!
//! The helpers are generic over [stub::Services], so applications can test
//! their code with a mock or fake implementation.
//!
//! # Example
//! ```no_run
//! # async fn sample() -> anyhow::Result<()> {
//! use google_cloud_run_rollout::client::Services;
//! use google_cloud_run_rollout::name::ServiceName;
//! use google_cloud_run_rollout::watcher::ReadinessWatcher;
//! use std::time::Duration;
//!
//! let client = Services::builder().with_region("us-central1").build().await?;
//! let name = ServiceName::new("my-project", "us-central1", "hello");
//! let service = ReadinessWatcher::new(&client)
//!     .with_timeout(Duration::from_secs(120))
//!     .wait_for_ready(&name)
//!     .await?;
//! println!("service is ready at {:?}", service.url());
//! # Ok(()) }
//! ```
//!
//! [Cloud Run]: https://cloud.google.com/run

pub mod client;
pub mod error;
pub mod exists;
pub mod iam;
pub mod model;
pub mod name;
pub mod rollout;
pub mod stub;
pub mod traffic;
pub mod update;
pub mod watcher;

#[cfg(test)]
mod fake;

pub use gax::Result;
