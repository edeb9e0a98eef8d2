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

//! Drive a Cloud Run service through its full lifecycle.
//!
//! [run] performs the following steps, stopping at the first failure:
//!
//! 1. Check if the service exists, and create it with a `{service}-v1`
//!    revision if it does not.
//! 2. Wait until the service is `Ready`.
//! 3. Allow unauthenticated invocations.
//! 4. Fetch the service URL.
//! 5. Deploy a `{service}-v2` revision with a new image, an environment
//!    variable, and resource limits, splitting the traffic 90/10 between
//!    `v1` and `v2`.
//! 6. Wait until the service is `Ready`, then until it is `RoutesReady`.
//!    Each wait has its own deadline.
//! 7. Delete the service, unless configured to keep it, and optionally wait
//!    until it is gone.

use crate::error::Error;
use crate::exists::service_exists;
use crate::iam::allow_unauthenticated;
use crate::model::{
    Container, EnvVar, ObjectMeta, READY, ROUTES_READY, ResourceRequirements, RevisionSpec,
    RevisionTemplate, Service, ServiceSpec, TrafficTarget,
};
use crate::name::ServiceName;
use crate::stub::Services;
use crate::traffic::{self, TrafficError};
use crate::update::{OccConfig, update_service_with_occ};
use crate::watcher::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, ReadinessWatcher, WaitError};
use std::time::Duration;

/// The image deployed in the first revision, unless configured otherwise.
pub const DEFAULT_IMAGE_V1: &str = "gcr.io/google-samples/hello-app:1.0";

/// The image deployed in the second revision, unless configured otherwise.
pub const DEFAULT_IMAGE_V2: &str = "gcr.io/google-samples/hello-app:2.0";

/// Configures [run].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct RolloutConfig {
    pub project: String,
    pub region: String,
    pub service: String,
    pub image_v1: String,
    pub image_v2: String,
    /// The deadline for each wait.
    pub ready_timeout: Duration,
    pub poll_interval: Duration,
    /// Skip the deletion at the end.
    pub keep: bool,
    /// Wait until the deleted service is no longer visible.
    pub wait_for_deletion: bool,
}

impl RolloutConfig {
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
            image_v1: DEFAULT_IMAGE_V1.to_string(),
            image_v2: DEFAULT_IMAGE_V2.to_string(),
            ready_timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            keep: false,
            wait_for_deletion: false,
        }
    }

    pub fn set_image_v1<T: Into<String>>(mut self, v: T) -> Self {
        self.image_v1 = v.into();
        self
    }

    pub fn set_image_v2<T: Into<String>>(mut self, v: T) -> Self {
        self.image_v2 = v.into();
        self
    }

    pub fn set_ready_timeout(mut self, v: Duration) -> Self {
        self.ready_timeout = v;
        self
    }

    pub fn set_poll_interval(mut self, v: Duration) -> Self {
        self.poll_interval = v;
        self
    }

    pub fn set_keep(mut self, v: bool) -> Self {
        self.keep = v;
        self
    }

    pub fn set_wait_for_deletion(mut self, v: bool) -> Self {
        self.wait_for_deletion = v;
        self
    }

    pub fn name(&self) -> ServiceName {
        ServiceName::new(&self.project, &self.region, &self.service)
    }

    fn revision(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.service)
    }

    fn initial_service(&self) -> Service {
        Service::new()
            .set_metadata(ObjectMeta::new().set_name(&self.service))
            .set_spec(
                ServiceSpec::new().set_template(
                    RevisionTemplate::new()
                        .set_metadata(ObjectMeta::new().set_name(self.revision("v1")))
                        .set_spec(
                            RevisionSpec::new()
                                .set_containers([Container::new().set_image(&self.image_v1)]),
                        ),
                ),
            )
    }

    fn next_revision(&self, mut service: Service, traffic: Vec<TrafficTarget>) -> Service {
        let template = &mut service.spec.template;
        template.metadata.name = self.revision("v2");
        if template.spec.containers.is_empty() {
            template.spec.containers.push(Container::new());
        }
        let container = &mut template.spec.containers[0];
        container.image = self.image_v2.clone();
        container.env = vec![EnvVar::new("FOO", "bar")];
        let resources = container
            .resources
            .get_or_insert_with(ResourceRequirements::default);
        resources.limits = [("cpu", "2"), ("memory", "1Gi")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        service.spec.traffic = traffic;
        service
    }
}

/// The outcome of a successful [run].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct RolloutReport {
    /// The service existed before the rollout started.
    pub existed: bool,
    /// The public URL, if Cloud Run reported one.
    pub url: Option<String>,
    /// The traffic split once the second revision was serving.
    pub traffic: Vec<TrafficTarget>,
    /// The service was deleted at the end of the rollout.
    pub deleted: bool,
}

/// The steps in a rollout, used to report where a rollout failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Step {
    CheckExists,
    Create,
    WaitReady,
    AllowUnauthenticated,
    GetUrl,
    Update,
    WaitUpdateReady,
    WaitRoutesReady,
    Delete,
    WaitDeleted,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CheckExists => "checking if the service exists",
            Self::Create => "creating the service",
            Self::WaitReady => "waiting for the service to become ready",
            Self::AllowUnauthenticated => "allowing unauthenticated invocations",
            Self::GetUrl => "fetching the service URL",
            Self::Update => "deploying the second revision",
            Self::WaitUpdateReady => "waiting for the second revision to become ready",
            Self::WaitRoutesReady => "waiting for the traffic split to become ready",
            Self::Delete => "deleting the service",
            Self::WaitDeleted => "waiting for the service to disappear",
        };
        f.write_str(s)
    }
}

/// The error returned by [run].
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum RolloutError {
    /// A call to Cloud Run failed.
    #[error("{step} failed")]
    Api {
        step: Step,
        #[source]
        source: Error,
    },
    /// The service did not reach the desired state.
    #[error("{step} failed")]
    Wait {
        step: Step,
        #[source]
        source: WaitError,
    },
    /// The traffic split is invalid.
    #[error("invalid traffic split")]
    Traffic(#[from] TrafficError),
}

impl RolloutError {
    /// The step that failed, if any.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Api { step, .. } | Self::Wait { step, .. } => Some(*step),
            Self::Traffic(_) => None,
        }
    }
}

fn api(step: Step) -> impl FnOnce(Error) -> RolloutError {
    move |source| RolloutError::Api { step, source }
}

fn wait(step: Step) -> impl FnOnce(WaitError) -> RolloutError {
    move |source| RolloutError::Wait { step, source }
}

/// Runs the full lifecycle of a service.
///
/// # Example
/// ```no_run
/// # async fn sample() -> anyhow::Result<()> {
/// use google_cloud_run_rollout::client::Services;
/// use google_cloud_run_rollout::rollout::{RolloutConfig, run};
///
/// let client = Services::builder().with_region("us-central1").build().await?;
/// let config = RolloutConfig::new("my-project", "us-central1", "hello").set_keep(true);
/// let report = run(&client, &config).await?;
/// println!("service URL: {:?}", report.url);
/// # Ok(()) }
/// ```
#[tracing::instrument(skip_all, fields(service = %config.name()))]
pub async fn run<S>(stub: &S, config: &RolloutConfig) -> Result<RolloutReport, RolloutError>
where
    S: Services,
{
    let name = config.name();
    let watcher = ReadinessWatcher::new(stub)
        .with_poll_interval(config.poll_interval)
        .with_timeout(config.ready_timeout);

    let existed = service_exists(stub, &name)
        .await
        .map_err(api(Step::CheckExists))?;
    tracing::info!("service exists?: {existed}");
    if !existed {
        stub.create_service(&name, config.initial_service())
            .await
            .map_err(api(Step::Create))?;
        tracing::info!("service create call completed");
    }

    tracing::info!("waiting for service to become ready");
    watcher
        .wait_for_ready(&name)
        .await
        .map_err(wait(Step::WaitReady))?;
    tracing::info!("service is ready and serving traffic");

    allow_unauthenticated(stub, &name)
        .await
        .map_err(api(Step::AllowUnauthenticated))?;

    // The URL is only available once the service is ready.
    let service = stub.get_service(&name).await.map_err(api(Step::GetUrl))?;
    let url = service.url().map(str::to_string);
    match &url {
        Some(u) => tracing::info!("service is deployed at: {u}"),
        None => tracing::warn!("service is ready but has no URL yet"),
    }

    let split = traffic::split([(config.revision("v1"), 90), (config.revision("v2"), 10)])?;
    update_service_with_occ(
        stub,
        &name,
        |service| Ok(Some(config.next_revision(service, split.clone()))),
        OccConfig::default(),
    )
    .await
    .map_err(api(Step::Update))?;
    tracing::info!("deployed an update, might not be ready");

    watcher
        .wait_for_condition(&name, READY, config.ready_timeout)
        .await
        .map_err(wait(Step::WaitUpdateReady))?;
    let service = watcher
        .wait_for_condition(&name, ROUTES_READY, config.ready_timeout)
        .await
        .map_err(wait(Step::WaitRoutesReady))?;
    tracing::info!("updated service is ready and serving with traffic split");

    let traffic = service
        .status
        .map(|s| s.traffic)
        .filter(|t| !t.is_empty())
        .unwrap_or(split);
    let mut report = RolloutReport {
        existed,
        url,
        traffic,
        deleted: false,
    };
    if config.keep {
        tracing::info!("keeping the service");
        return Ok(report);
    }

    let op = stub
        .delete_service(&name)
        .await
        .map_err(api(Step::Delete))?;
    tracing::info!("deleted service, status: {}", op.status);
    report.deleted = true;
    if config.wait_for_deletion {
        watcher
            .wait_for_absence(&name, config.ready_timeout)
            .await
            .map_err(wait(Step::WaitDeleted))?;
        tracing::info!("service is gone");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::rpc::{Code, Status};
    use crate::fake::FakeServices;
    use crate::iam::{ALL_USERS, INVOKER_ROLE};
    use crate::model::{Binding, Condition, ConditionStatus, Policy, ServiceStatus};
    use crate::stub::tests::MockServices;
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    fn config() -> RolloutConfig {
        RolloutConfig::new("p", "us-central1", "hello")
    }

    fn ninety_ten() -> Vec<TrafficTarget> {
        vec![
            TrafficTarget::revision("hello-v1", 90),
            TrafficTarget::revision("hello-v2", 10),
        ]
    }

    #[test]
    fn defaults() {
        let got = config();
        assert_eq!(got.image_v1, DEFAULT_IMAGE_V1);
        assert_eq!(got.image_v2, DEFAULT_IMAGE_V2);
        assert_eq!(got.ready_timeout, Duration::from_secs(120));
        assert_eq!(got.poll_interval, Duration::from_secs(5));
        assert!(!got.keep);
        assert!(!got.wait_for_deletion);
        assert_eq!(got.name(), ServiceName::new("p", "us-central1", "hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn full_lifecycle() -> anyhow::Result<()> {
        let fake = FakeServices::new();
        let config = config().set_wait_for_deletion(true);
        let start = Instant::now();
        let report = run(&fake, &config).await?;
        assert_eq!(
            report,
            RolloutReport {
                existed: false,
                url: Some("https://hello-abc123-uc.a.run.app".to_string()),
                traffic: ninety_ten(),
                deleted: true,
            }
        );
        // One poll per wait: ready, update ready, routes ready, deleted.
        assert_eq!(start.elapsed(), Duration::from_secs(20));
        assert!(fake.service(&config.name()).is_none());
        assert_eq!(fake.set_iam_calls(), 1);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn keep_existing_service() -> anyhow::Result<()> {
        let config = config()
            .set_keep(true)
            .set_image_v2("gcr.io/p/hello:2.1")
            .set_poll_interval(Duration::from_secs(1));
        let fake = FakeServices::new();
        fake.insert(&config.name(), config.initial_service());
        let report = run(&fake, &config).await?;
        assert!(report.existed, "{report:?}");
        assert!(!report.deleted, "{report:?}");

        let service = fake
            .service(&config.name())
            .expect("service should be kept");
        assert_eq!(service.spec.traffic, ninety_ten());
        assert_eq!(
            service.spec.traffic.iter().map(|t| t.percent).sum::<i32>(),
            100
        );
        let template = &service.spec.template;
        assert_eq!(template.metadata.name, "hello-v2");
        let container = &template.spec.containers[0];
        assert_eq!(container.image, "gcr.io/p/hello:2.1");
        assert_eq!(container.env, vec![EnvVar::new("FOO", "bar")]);
        assert_eq!(
            container.resources,
            Some(ResourceRequirements::new().set_limits([("cpu", "2"), ("memory", "1Gi")]))
        );
        let policy = fake.policy(&config.name()).expect("policy should be set");
        assert!(policy.has_member(INVOKER_ROLE, ALL_USERS), "{policy:?}");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn already_public() -> anyhow::Result<()> {
        let config = config().set_keep(true);
        let fake = FakeServices::new().with_policy(
            &config.name(),
            Policy::new().set_bindings([Binding::new()
                .set_role(INVOKER_ROLE)
                .set_members([ALL_USERS])]),
        );
        run(&fake, &config).await?;
        assert_eq!(fake.set_iam_calls(), 0);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn update_survives_conflicts() -> anyhow::Result<()> {
        let config = config().set_keep(true);
        let fake = FakeServices::new().with_conflicts(2);
        let report = run(&fake, &config).await?;
        assert_eq!(report.traffic, ninety_ten());
        assert_eq!(fake.replace_calls(), 3);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn first_revision_fails() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_get_service()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(Error::service(Status::default().set_code(Code::NotFound)))
            });
        mock.expect_create_service()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|_, s| {
                s.spec.template.metadata.name == "hello-v1"
                    && s.spec.template.spec.containers[0].image == DEFAULT_IMAGE_V1
            })
            .returning(|_, s| Ok(s));
        mock.expect_get_service()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(Service::new().set_status(ServiceStatus::new().set_conditions([
                    Condition::new(READY, ConditionStatus::False)
                        .set_reason("ContainerMissing")
                        .set_message("Image not found"),
                ])))
            });
        mock.expect_get_iam_policy().never();

        let err = run(&mock, &config()).await.unwrap_err();
        assert_eq!(err.step(), Some(Step::WaitReady));
        match err {
            RolloutError::Wait { source, .. } => {
                assert!(source.is_condition_failed(), "{source:?}");
                assert!(source.to_string().contains("Image not found"), "{source}");
            }
            e => panic!("unexpected error {e:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn exists_error_stops_rollout() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_service().times(1).returning(|_| {
            Err(Error::service(
                Status::default().set_code(Code::PermissionDenied),
            ))
        });
        mock.expect_create_service().never();
        let err = run(&mock, &config()).await.unwrap_err();
        assert_eq!(err.step(), Some(Step::CheckExists));
        assert!(err.to_string().contains("checking if the service exists"), "{err}");
        Ok(())
    }

    #[test]
    fn next_revision_without_containers() {
        let config = config();
        let got = config.next_revision(Service::new(), ninety_ten());
        assert_eq!(got.spec.template.spec.containers.len(), 1);
        assert_eq!(got.spec.template.spec.containers[0].image, DEFAULT_IMAGE_V2);
        assert_eq!(got.spec.traffic, ninety_ten());
    }

    #[test]
    fn traffic_error_has_no_step() {
        let err = RolloutError::from(TrafficError::Sum(110));
        assert_eq!(err.step(), None);
    }
}
