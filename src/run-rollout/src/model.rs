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

//! The resources exchanged with the Cloud Run admin API.
//!
//! Cloud Run exposes a Knative-compatible (`serving.knative.dev/v1`) surface
//! on its regional endpoints. These types model the subset of that surface
//! needed to create, update, watch, and delete a service. Unknown fields in
//! responses are ignored, and missing fields take their default values.
//!
//! Like the generated client libraries, the types have public fields and
//! `set_*` builder methods:
//! ```
//! # use google_cloud_run_rollout::model::*;
//! let service = Service::new()
//!     .set_metadata(ObjectMeta::new().set_name("hello"))
//!     .set_spec(ServiceSpec::new().set_template(
//!         RevisionTemplate::new()
//!             .set_metadata(ObjectMeta::new().set_name("hello-v1"))
//!             .set_spec(RevisionSpec::new().set_containers([
//!                 Container::new().set_image("gcr.io/google-samples/hello-app:1.0"),
//!             ])),
//!     ));
//! assert_eq!(service.api_version, "serving.knative.dev/v1");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The API version of the Knative-compatible surface.
pub const API_VERSION: &str = "serving.knative.dev/v1";

/// The condition reported once the latest revision is ready and serving.
pub const READY: &str = "Ready";

/// The condition reported once the traffic configuration is programmed.
pub const ROUTES_READY: &str = "RoutesReady";

/// The condition reported once the configuration has a ready revision.
pub const CONFIGURATIONS_READY: &str = "ConfigurationsReady";

/// A Cloud Run service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Service {
    /// Always `serving.knative.dev/v1`.
    pub api_version: String,

    /// Always `Service`.
    pub kind: String,

    pub metadata: ObjectMeta,

    /// The desired state.
    pub spec: ServiceSpec,

    /// The observed state. Ignored by the service in create and replace
    /// requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
}

impl Default for Service {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: "Service".to_string(),
            metadata: ObjectMeta::default(),
            spec: ServiceSpec::default(),
            status: None,
        }
    }
}

impl Service {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [metadata][Service::metadata].
    pub fn set_metadata<T: Into<ObjectMeta>>(mut self, v: T) -> Self {
        self.metadata = v.into();
        self
    }

    /// Sets the value of [spec][Service::spec].
    pub fn set_spec<T: Into<ServiceSpec>>(mut self, v: T) -> Self {
        self.spec = v.into();
        self
    }

    /// Sets the value of [status][Service::status].
    pub fn set_status<T: Into<ServiceStatus>>(mut self, v: T) -> Self {
        self.status = Some(v.into());
        self
    }

    /// Finds the condition with the given type, if the service reports it.
    pub fn condition(&self, condition_type: &str) -> Option<&Condition> {
        self.status
            .as_ref()
            .and_then(|s| s.condition(condition_type))
    }

    /// The public URL of the service, once it is available.
    pub fn url(&self) -> Option<&str> {
        let status = self.status.as_ref()?;
        status
            .url
            .as_deref()
            .or_else(|| status.address.as_ref().and_then(|a| a.url.as_deref()))
            .filter(|u| !u.is_empty())
    }
}

/// Metadata common to all persisted resources.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ObjectMeta {
    pub name: String,

    /// The project number or id. Set by the service.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,

    /// The optimistic concurrency token.
    ///
    /// Replace requests must carry the value returned by the most recent read.
    /// The service rejects requests with a stale value.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [name][ObjectMeta::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the value of [namespace][ObjectMeta::namespace].
    pub fn set_namespace<T: Into<String>>(mut self, v: T) -> Self {
        self.namespace = v.into();
        self
    }

    /// Sets the value of [resource_version][ObjectMeta::resource_version].
    pub fn set_resource_version<T: Into<String>>(mut self, v: T) -> Self {
        self.resource_version = v.into();
        self
    }

    /// Sets the value of [generation][ObjectMeta::generation].
    pub fn set_generation(mut self, v: i64) -> Self {
        self.generation = Some(v);
        self
    }

    /// Sets the value of [labels][ObjectMeta::labels].
    pub fn set_labels<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.labels = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Sets the value of [annotations][ObjectMeta::annotations].
    pub fn set_annotations<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.annotations = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }
}

/// The desired state of a [Service].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ServiceSpec {
    /// The template for new revisions.
    ///
    /// Any change to the template creates a new revision.
    pub template: RevisionTemplate,

    /// How to distribute traffic across revisions.
    ///
    /// When empty, all traffic goes to the latest ready revision. The
    /// percentages must add up to 100.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub traffic: Vec<TrafficTarget>,
}

impl ServiceSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [template][ServiceSpec::template].
    pub fn set_template<T: Into<RevisionTemplate>>(mut self, v: T) -> Self {
        self.template = v.into();
        self
    }

    /// Sets the value of [traffic][ServiceSpec::traffic].
    pub fn set_traffic<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<TrafficTarget>,
    {
        self.traffic = v.into_iter().map(|i| i.into()).collect();
        self
    }
}

/// The template for a new revision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RevisionTemplate {
    /// The revision name goes in `metadata.name`. It must be prefixed by the
    /// service name, e.g. `hello-v2` for the `hello` service.
    pub metadata: ObjectMeta,

    pub spec: RevisionSpec,
}

impl RevisionTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [metadata][RevisionTemplate::metadata].
    pub fn set_metadata<T: Into<ObjectMeta>>(mut self, v: T) -> Self {
        self.metadata = v.into();
        self
    }

    /// Sets the value of [spec][RevisionTemplate::spec].
    pub fn set_spec<T: Into<RevisionSpec>>(mut self, v: T) -> Self {
        self.spec = v.into();
        self
    }
}

/// The configuration of a revision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RevisionSpec {
    pub containers: Vec<Container>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_concurrency: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_account_name: String,
}

impl RevisionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [containers][RevisionSpec::containers].
    pub fn set_containers<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<Container>,
    {
        self.containers = v.into_iter().map(|i| i.into()).collect();
        self
    }

    /// Sets the value of [container_concurrency][RevisionSpec::container_concurrency].
    pub fn set_container_concurrency(mut self, v: i64) -> Self {
        self.container_concurrency = Some(v);
        self
    }

    /// Sets the value of [timeout_seconds][RevisionSpec::timeout_seconds].
    pub fn set_timeout_seconds(mut self, v: i64) -> Self {
        self.timeout_seconds = Some(v);
        self
    }

    /// Sets the value of [service_account_name][RevisionSpec::service_account_name].
    pub fn set_service_account_name<T: Into<String>>(mut self, v: T) -> Self {
        self.service_account_name = v.into();
        self
    }
}

/// A container in a revision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Container {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    pub image: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPort>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [name][Container::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the value of [image][Container::image].
    pub fn set_image<T: Into<String>>(mut self, v: T) -> Self {
        self.image = v.into();
        self
    }

    /// Sets the value of [env][Container::env].
    pub fn set_env<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<EnvVar>,
    {
        self.env = v.into_iter().map(|i| i.into()).collect();
        self
    }

    /// Sets the value of [resources][Container::resources].
    pub fn set_resources<T: Into<ResourceRequirements>>(mut self, v: T) -> Self {
        self.resources = Some(v.into());
        self
    }

    /// Sets the value of [ports][Container::ports].
    pub fn set_ports<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<ContainerPort>,
    {
        self.ports = v.into_iter().map(|i| i.into()).collect();
        self
    }
}

/// An environment variable for a container.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for EnvVar {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// Compute resources for a container, e.g. `{"cpu": "2", "memory": "1Gi"}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ResourceRequirements {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: BTreeMap<String, String>,
}

impl ResourceRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [limits][ResourceRequirements::limits].
    pub fn set_limits<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.limits = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Sets the value of [requests][ResourceRequirements::requests].
    pub fn set_requests<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.requests = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }
}

/// A port exposed by a container.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ContainerPort {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub container_port: i32,
}

impl ContainerPort {
    pub fn new(container_port: i32) -> Self {
        Self {
            container_port,
            ..Default::default()
        }
    }
}

/// The share of traffic routed to a revision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct TrafficTarget {
    /// The revision receiving traffic. Empty when
    /// [latest_revision][TrafficTarget::latest_revision] is set.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub revision_name: String,

    pub percent: i32,

    /// Route this share to whatever revision is the latest ready one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_revision: Option<bool>,

    /// Also expose the revision on a dedicated `https://{tag}---...` URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag: String,

    /// Set by the service for tagged targets.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl TrafficTarget {
    /// Route `percent` of the traffic to the named revision.
    pub fn revision<T: Into<String>>(revision_name: T, percent: i32) -> Self {
        Self {
            revision_name: revision_name.into(),
            percent,
            ..Default::default()
        }
    }

    /// Route `percent` of the traffic to the latest ready revision.
    pub fn latest(percent: i32) -> Self {
        Self {
            percent,
            latest_revision: Some(true),
            ..Default::default()
        }
    }

    /// Sets the value of [tag][TrafficTarget::tag].
    pub fn set_tag<T: Into<String>>(mut self, v: T) -> Self {
        self.tag = v.into();
        self
    }

    pub fn is_latest(&self) -> bool {
        self.latest_revision.unwrap_or(false)
    }
}

/// The observed state of a [Service].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ServiceStatus {
    pub conditions: Vec<Condition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub latest_ready_revision_name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub latest_created_revision_name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub traffic: Vec<TrafficTarget>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Addressable>,
}

impl ServiceStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [conditions][ServiceStatus::conditions].
    pub fn set_conditions<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<Condition>,
    {
        self.conditions = v.into_iter().map(|i| i.into()).collect();
        self
    }

    /// Sets the value of [url][ServiceStatus::url].
    pub fn set_url<T: Into<String>>(mut self, v: T) -> Self {
        self.url = Some(v.into());
        self
    }

    /// Sets the value of [address][ServiceStatus::address].
    pub fn set_address<T: Into<String>>(mut self, url: T) -> Self {
        self.address = Some(Addressable {
            url: Some(url.into()),
        });
        self
    }

    /// Sets the value of [traffic][ServiceStatus::traffic].
    pub fn set_traffic<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<TrafficTarget>,
    {
        self.traffic = v.into_iter().map(|i| i.into()).collect();
        self
    }

    /// Finds the condition with the given type.
    ///
    /// Conditions are keyed by type, a well-formed status has at most one
    /// entry for each type. If there are duplicates, the first one wins.
    pub fn condition(&self, condition_type: &str) -> Option<&Condition> {
        self.conditions
            .iter()
            .find(|c| c.condition_type == condition_type)
    }
}

/// The address where a service receives requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Addressable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One aspect of the health of a resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Condition {
    /// The aspect described by this condition, e.g. `Ready` or `RoutesReady`.
    #[serde(rename = "type")]
    pub condition_type: String,

    pub status: ConditionStatus,

    /// A one-word, CamelCase reason for the last transition.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// A human-readable description of the last transition.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// RFC 3339 timestamp of the last transition.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_transition_time: String,

    /// How to interpret a `False` status, `Error` (or empty) for conditions
    /// that block readiness.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub severity: String,
}

impl Condition {
    pub fn new<T: Into<String>>(condition_type: T, status: ConditionStatus) -> Self {
        Self {
            condition_type: condition_type.into(),
            status,
            ..Default::default()
        }
    }

    /// Sets the value of [reason][Condition::reason].
    pub fn set_reason<T: Into<String>>(mut self, v: T) -> Self {
        self.reason = v.into();
        self
    }

    /// Sets the value of [message][Condition::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }
}

/// The value of a [Condition].
///
/// The service sends `"True"`, `"False"`, or `"Unknown"`. Any other value is
/// treated as `Unknown`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

impl ConditionStatus {
    pub fn name(&self) -> &str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for ConditionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "True" => Self::True,
            "False" => Self::False,
            _ => Self::Unknown,
        }
    }
}

impl From<ConditionStatus> for String {
    fn from(value: ConditionStatus) -> Self {
        value.name().to_string()
    }
}

/// The response to a delete request.
///
/// Deletion is asynchronous: a `Success` status means the request was
/// accepted, the service may remain visible for a while.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct DeleteStatus {
    pub status: String,
    pub message: String,
    pub reason: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DeleteStatusDetails>,
}

impl DeleteStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [status][DeleteStatus::status].
    pub fn set_status<T: Into<String>>(mut self, v: T) -> Self {
        self.status = v.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == "Success"
    }
}

/// Identifies the resource removed by a delete request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct DeleteStatusDetails {
    pub name: String,
    pub group: String,
    pub kind: String,
    pub uid: String,
}

/// An IAM policy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Policy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<Binding>,

    /// The concurrency token for the policy. `set_iam_policy` fails with
    /// `ABORTED` if the policy changed since this value was read.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [bindings][Policy::bindings].
    pub fn set_bindings<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<Binding>,
    {
        self.bindings = v.into_iter().map(|i| i.into()).collect();
        self
    }

    /// Sets the value of [etag][Policy::etag].
    pub fn set_etag<T: Into<String>>(mut self, v: T) -> Self {
        self.etag = v.into();
        self
    }

    /// Returns true if `member` is granted `role` by some binding.
    pub fn has_member(&self, role: &str, member: &str) -> bool {
        self.bindings
            .iter()
            .any(|b| b.role == role && b.members.iter().any(|m| m == member))
    }
}

/// Associates members with a role.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Binding {
    pub role: String,
    pub members: Vec<String>,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [role][Binding::role].
    pub fn set_role<T: Into<String>>(mut self, v: T) -> Self {
        self.role = v.into();
        self
    }

    /// Sets the value of [members][Binding::members].
    pub fn set_members<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<String>,
    {
        self.members = v.into_iter().map(|i| i.into()).collect();
        self
    }
}

/// The body of a `setIamPolicy` request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SetIamPolicyRequest {
    pub policy: Policy,
}

impl SetIamPolicyRequest {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}
