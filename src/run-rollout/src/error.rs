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

//! Errors returned by the control-plane client and the helpers built on it.
//!
//! All calls to Cloud Run return [Error], the same type returned by the
//! Google Cloud client libraries. The helpers that poll for a state
//! transition return [WaitError][crate::watcher::WaitError], which wraps
//! [Error] when the poll itself fails.
//!
//! Cloud Run reports most failures as a Google JSON error, but some proxies
//! return a bare HTTP status. The predicates in this module check the
//! [Code][rpc::Code] when the service reported one, and fall back to the
//! HTTP status code otherwise.

pub use gax::error::Error;
pub use gax::error::rpc;

use rpc::Code;

/// The service, or the IAM policy of the service, does not exist.
pub fn is_not_found(error: &Error) -> bool {
    has_code(error, Code::NotFound, 404)
}

/// The update was rejected because it was based on a stale copy.
///
/// Cloud Run compares the `metadata.resourceVersion` in a replace request
/// with the current version. If they differ it rejects the request with
/// `409 Conflict` (reported as `ABORTED`). The caller should read the
/// resource again, reapply its changes, and retry.
pub fn is_conflict(error: &Error) -> bool {
    has_code(error, Code::Aborted, 409)
}

/// The caller lacks permission to perform the operation.
pub fn is_permission_denied(error: &Error) -> bool {
    has_code(error, Code::PermissionDenied, 403)
}

fn has_code(error: &Error, code: Code, http: u16) -> bool {
    match error.status().map(|s| s.code) {
        Some(c) if c != Code::Unknown => c == code,
        _ => error.http_status_code() == Some(http),
    }
}
