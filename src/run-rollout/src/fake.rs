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

//! An in-memory implementation of [Services] for unit tests.
//!
//! The fake behaves like Cloud Run for a single region: replace requests
//! with a stale `resourceVersion` fail with a conflict, IAM writes with a
//! stale `etag` fail with `ABORTED`, and every accepted change becomes ready
//! immediately.

use crate::Result;
use crate::error::Error;
use crate::error::rpc::{Code, Status};
use crate::model::{
    CONFIGURATIONS_READY, Condition, ConditionStatus, DeleteStatus, Policy, READY, ROUTES_READY,
    Service, ServiceStatus, TrafficTarget,
};
use crate::name::ServiceName;
use crate::stub::Services;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub(crate) struct FakeServices {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    services: HashMap<String, Service>,
    policies: HashMap<String, Policy>,
    version: u64,
    // Number of upcoming replace calls that lose a race with another writer.
    pending_conflicts: u32,
    replace_calls: u32,
    set_iam_calls: u32,
}

impl FakeServices {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_conflicts(self, n: u32) -> Self {
        self.lock().pending_conflicts = n;
        self
    }

    pub(crate) fn with_policy(self, name: &ServiceName, policy: Policy) -> Self {
        self.lock().policies.insert(name.to_string(), policy);
        self
    }

    pub(crate) fn service(&self, name: &ServiceName) -> Option<Service> {
        self.lock().services.get(&name.namespaced()).cloned()
    }

    pub(crate) fn policy(&self, name: &ServiceName) -> Option<Policy> {
        self.lock().policies.get(&name.to_string()).cloned()
    }

    pub(crate) fn replace_calls(&self) -> u32 {
        self.lock().replace_calls
    }

    pub(crate) fn set_iam_calls(&self) -> u32 {
        self.lock().set_iam_calls
    }

    pub(crate) fn insert(&self, name: &ServiceName, service: Service) -> Service {
        let mut state = self.lock();
        state.version += 1;
        let stored = reconcile(name, service, state.version);
        state.services.insert(name.namespaced(), stored.clone());
        stored
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("fake state is never poisoned")
    }
}

fn error(code: Code, http: u16, message: &str) -> Error {
    Error::service_with_http_metadata(
        Status::default().set_code(code).set_message(message),
        Some(http),
        None,
    )
}

// Simulates the control plane accepting the change and finishing the rollout.
fn reconcile(name: &ServiceName, mut service: Service, version: u64) -> Service {
    service.metadata.name = name.service().to_string();
    service.metadata.namespace = name.project().to_string();
    service.metadata.resource_version = format!("v{version}");
    service.metadata.generation = Some(service.metadata.generation.unwrap_or(0) + 1);
    let revision = service.spec.template.metadata.name.clone();
    let traffic = if service.spec.traffic.is_empty() {
        vec![TrafficTarget::revision(&revision, 100)]
    } else {
        service.spec.traffic.clone()
    };
    service.status = Some(
        ServiceStatus::new()
            .set_conditions([
                Condition::new(READY, ConditionStatus::True),
                Condition::new(CONFIGURATIONS_READY, ConditionStatus::True),
                Condition::new(ROUTES_READY, ConditionStatus::True),
            ])
            .set_url(format!("https://{}-abc123-uc.a.run.app", name.service()))
            .set_traffic(traffic),
    );
    if let Some(status) = service.status.as_mut() {
        status.latest_created_revision_name = revision.clone();
        status.latest_ready_revision_name = revision;
        status.observed_generation = service.metadata.generation;
    }
    service
}

impl Services for FakeServices {
    async fn get_service(&self, name: &ServiceName) -> Result<Service> {
        self.service(name)
            .ok_or_else(|| error(Code::NotFound, 404, "service not found"))
    }

    async fn create_service(&self, name: &ServiceName, service: Service) -> Result<Service> {
        if self.service(name).is_some() {
            return Err(error(Code::AlreadyExists, 409, "service already exists"));
        }
        Ok(self.insert(name, service))
    }

    async fn replace_service(&self, name: &ServiceName, service: Service) -> Result<Service> {
        let mut state = self.lock();
        state.replace_calls += 1;
        let Some(current) = state.services.get(&name.namespaced()) else {
            return Err(error(Code::NotFound, 404, "service not found"));
        };
        if current.metadata.resource_version != service.metadata.resource_version {
            return Err(error(Code::Aborted, 409, "stale resourceVersion"));
        }
        if state.pending_conflicts > 0 {
            // Another writer got there first.
            state.pending_conflicts -= 1;
            state.version += 1;
            let version = state.version;
            if let Some(s) = state.services.get_mut(&name.namespaced()) {
                s.metadata.resource_version = format!("v{version}");
            }
            return Err(error(Code::Aborted, 409, "stale resourceVersion"));
        }
        state.version += 1;
        let stored = reconcile(name, service, state.version);
        state.services.insert(name.namespaced(), stored.clone());
        Ok(stored)
    }

    async fn delete_service(&self, name: &ServiceName) -> Result<DeleteStatus> {
        match self.lock().services.remove(&name.namespaced()) {
            Some(_) => Ok(DeleteStatus::new().set_status("Success")),
            None => Err(error(Code::NotFound, 404, "service not found")),
        }
    }

    async fn get_iam_policy(&self, name: &ServiceName) -> Result<Policy> {
        let state = self.lock();
        if !state.services.contains_key(&name.namespaced()) {
            return Err(error(Code::NotFound, 404, "service not found"));
        }
        Ok(state
            .policies
            .get(&name.to_string())
            .cloned()
            .unwrap_or_else(|| Policy::new().set_etag("BwAAAA==")))
    }

    async fn set_iam_policy(&self, name: &ServiceName, policy: Policy) -> Result<Policy> {
        let mut state = self.lock();
        state.set_iam_calls += 1;
        let current = state
            .policies
            .get(&name.to_string())
            .map(|p| p.etag.clone())
            .unwrap_or_else(|| "BwAAAA==".to_string());
        if !policy.etag.is_empty() && policy.etag != current {
            return Err(error(Code::Aborted, 409, "stale etag"));
        }
        let stored = policy.set_etag(format!("Bw{}==", state.set_iam_calls));
        state.policies.insert(name.to_string(), stored.clone());
        Ok(stored)
    }
}
