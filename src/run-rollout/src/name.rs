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

//! Identifies a Cloud Run service.

use std::str::FromStr;

/// The fully qualified name of a Cloud Run service.
///
/// The regional (Knative-style) endpoint addresses services as
/// `namespaces/{project}/services/{service}`, the region is implied by the
/// endpoint. The IAM methods use the global form
/// `projects/{project}/locations/{region}/services/{service}`.
///
/// # Example
/// ```
/// # use google_cloud_run_rollout::name::ServiceName;
/// let name = ServiceName::new("my-project", "us-central1", "hello");
/// assert_eq!(name.namespaced(), "namespaces/my-project/services/hello");
/// assert_eq!(name.to_string(), "projects/my-project/locations/us-central1/services/hello");
/// let parsed = "projects/my-project/locations/us-central1/services/hello".parse::<ServiceName>();
/// assert_eq!(parsed, Ok(name));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceName {
    project: String,
    region: String,
    service: String,
}

impl ServiceName {
    pub fn new<P, R, S>(project: P, region: R, service: S) -> Self
    where
        P: Into<String>,
        R: Into<String>,
        S: Into<String>,
    {
        Self {
            project: project.into(),
            region: region.into(),
            service: service.into(),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// The name of the containing collection, as used by the regional endpoint.
    pub fn parent(&self) -> String {
        format!("namespaces/{}/services", self.project)
    }

    /// The name as used by the regional endpoint.
    pub fn namespaced(&self) -> String {
        format!("namespaces/{}/services/{}", self.project, self.service)
    }
}

impl std::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/services/{}",
            self.project, self.region, self.service
        )
    }
}

/// The error returned when parsing a malformed [ServiceName].
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("invalid service name {0:?}, expected projects/{{project}}/locations/{{region}}/services/{{service}}")]
pub struct ParseError(String);

impl FromStr for ServiceName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split('/').collect::<Vec<_>>();
        match parts.as_slice() {
            ["projects", project, "locations", region, "services", service]
                if [project, region, service].iter().all(|p| !p.is_empty()) =>
            {
                Ok(Self::new(*project, *region, *service))
            }
            _ => Err(ParseError(s.to_string())),
        }
    }
}
