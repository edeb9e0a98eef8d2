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

//! Distribute traffic across revisions.
//!
//! Cloud Run rejects traffic configurations whose percentages do not add up
//! to 100, but only after the request reaches the service. These helpers
//! detect the problem before sending any request.
//!
//! # Example
//! ```
//! # use google_cloud_run_rollout::traffic;
//! let targets = traffic::split([("hello-v1", 90), ("hello-v2", 10)])?;
//! assert_eq!(targets.len(), 2);
//! assert!(traffic::split([("hello-v1", 90), ("hello-v2", 20)]).is_err());
//! # Ok::<(), traffic::TrafficError>(())
//! ```

use crate::model::TrafficTarget;
use std::collections::HashSet;

/// A traffic configuration that Cloud Run would reject.
#[derive(thiserror::Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum TrafficError {
    #[error("the traffic configuration has no targets")]
    Empty,
    #[error("revision {revision} has an invalid percentage {percent}, must be in [0, 100]")]
    InvalidPercent { revision: String, percent: i32 },
    #[error("revision {0} appears more than once")]
    Duplicate(String),
    #[error("the percentages add up to {0}, must be exactly 100")]
    Sum(i64),
}

/// Builds a traffic configuration from `(revision, percent)` pairs.
pub fn split<I, R>(allocations: I) -> Result<Vec<TrafficTarget>, TrafficError>
where
    I: IntoIterator<Item = (R, i32)>,
    R: Into<String>,
{
    let targets = allocations
        .into_iter()
        .map(|(revision, percent)| TrafficTarget::revision(revision, percent))
        .collect::<Vec<_>>();
    validate(&targets)?;
    Ok(targets)
}

/// Verifies an existing traffic configuration.
///
/// A target routing to the latest revision counts like any other target.
pub fn validate(targets: &[TrafficTarget]) -> Result<(), TrafficError> {
    if targets.is_empty() {
        return Err(TrafficError::Empty);
    }
    let mut seen = HashSet::new();
    for t in targets {
        let revision = if t.is_latest() {
            "LATEST"
        } else {
            t.revision_name.as_str()
        };
        if !(0..=100).contains(&t.percent) {
            return Err(TrafficError::InvalidPercent {
                revision: revision.to_string(),
                percent: t.percent,
            });
        }
        if !seen.insert(revision) {
            return Err(TrafficError::Duplicate(revision.to_string()));
        }
    }
    let sum = targets.iter().map(|t| t.percent as i64).sum::<i64>();
    if sum != 100 {
        return Err(TrafficError::Sum(sum));
    }
    Ok(())
}
