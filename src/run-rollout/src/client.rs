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

//! A client for the Cloud Run admin API.

use crate::Result;
use crate::error::Error;
use crate::error::rpc::Status;
use crate::model::{DeleteStatus, Policy, Service, SetIamPolicyRequest};
use crate::name::ServiceName;
use google_cloud_auth::credentials::{CacheableResource, Credentials};
use http::Extensions;
use std::time::Duration;

/// The region used when the builder does not set one.
pub const DEFAULT_REGION: &str = "us-central1";

const KNATIVE_PREFIX: &str = "/apis/serving.knative.dev/v1";
const IAM_ENDPOINT: &str = "https://run.googleapis.com";

/// Implements a client for the Cloud Run admin API.
///
/// Services are managed through the regional endpoint, which exposes the
/// Knative-compatible `serving.knative.dev/v1` surface. The IAM policies are
/// managed through the global endpoint.
///
/// # Example
/// ```no_run
/// # async fn sample() -> anyhow::Result<()> {
/// # use google_cloud_run_rollout::client::Services;
/// # use google_cloud_run_rollout::name::ServiceName;
/// let client = Services::builder().with_region("europe-west1").build().await?;
/// let name = ServiceName::new("my-project", "europe-west1", "hello");
/// let service = client.get_service(&name).await?;
/// println!("{:?}", service.status);
/// # Ok(()) }
/// ```
///
/// # Configuration
///
/// To configure `Services` use the `with_*` methods in the type returned by
/// [builder()][Services::builder]. The default configuration should work
/// for most applications. Common configuration changes include
///
/// * [with_region()]: the regional endpoint is derived from the region.
/// * [with_endpoint()]: by default this client uses the regional endpoint,
///   tests use this method to point the client at a local server.
/// * [with_credentials()]: by default this client uses
///   [Application Default Credentials]. Applications using custom
///   authentication may need to override this default.
///
/// [with_region()]: ClientBuilder::with_region
/// [with_endpoint()]: ClientBuilder::with_endpoint
/// [with_credentials()]: ClientBuilder::with_credentials
/// [Application Default Credentials]: https://cloud.google.com/docs/authentication#adc
///
/// # Pooling and Cloning
///
/// `Services` holds a connection pool internally, it is advised to
/// create one and then reuse it. You do not need to wrap `Services` in
/// an [Rc](std::rc::Rc) or [Arc](std::sync::Arc) to reuse it, because it
/// already uses an `Arc` internally.
#[derive(Clone, Debug)]
pub struct Services {
    inner: reqwest::Client,
    cred: Credentials,
    endpoint: String,
    iam_endpoint: String,
    request_timeout: Option<Duration>,
}

impl Services {
    /// Returns a builder for [Services].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Gets the current state of a service.
    pub async fn get_service(&self, name: &ServiceName) -> Result<Service> {
        let builder = self.knative(reqwest::Method::GET, &name.namespaced());
        self.execute(builder, None::<&Service>).await
    }

    /// Creates a new service.
    ///
    /// The service name, in `metadata.name`, must match the name. Cloud Run
    /// returns immediately, use a [ReadinessWatcher] to wait until the first
    /// revision is ready.
    ///
    /// [ReadinessWatcher]: crate::watcher::ReadinessWatcher
    pub async fn create_service(&self, name: &ServiceName, service: Service) -> Result<Service> {
        let service = with_namespace(name, service);
        let builder = self.knative(reqwest::Method::POST, &name.parent());
        self.execute(builder, Some(&service)).await
    }

    /// Replaces the service.
    ///
    /// The request must include the `metadata.resourceVersion` from a recent
    /// read, Cloud Run rejects it with a conflict otherwise.
    pub async fn replace_service(&self, name: &ServiceName, service: Service) -> Result<Service> {
        let service = with_namespace(name, service);
        let builder = self.knative(reqwest::Method::PUT, &name.namespaced());
        self.execute(builder, Some(&service)).await
    }

    /// Deletes the service.
    ///
    /// Deletion is asynchronous, the service may still be visible after this
    /// function returns.
    pub async fn delete_service(&self, name: &ServiceName) -> Result<DeleteStatus> {
        let builder = self.knative(reqwest::Method::DELETE, &name.namespaced());
        self.execute(builder, None::<&Service>).await
    }

    /// Gets the IAM policy of the service.
    pub async fn get_iam_policy(&self, name: &ServiceName) -> Result<Policy> {
        let builder = self.iam(reqwest::Method::GET, name, "getIamPolicy");
        self.execute(builder, None::<&Policy>).await
    }

    /// Sets the IAM policy of the service.
    ///
    /// Include the `etag` from [get_iam_policy][Services::get_iam_policy] to
    /// detect concurrent changes.
    pub async fn set_iam_policy(&self, name: &ServiceName, policy: Policy) -> Result<Policy> {
        let builder = self.iam(reqwest::Method::POST, name, "setIamPolicy");
        let body = SetIamPolicyRequest::new(policy);
        self.execute(builder, Some(&body)).await
    }

    fn knative(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.inner.request(
            method,
            format!("{}{KNATIVE_PREFIX}/{path}", &self.endpoint),
        )
    }

    fn iam(&self, method: reqwest::Method, name: &ServiceName, verb: &str) -> reqwest::RequestBuilder {
        self.inner
            .request(method, format!("{}/v1/{name}:{verb}", &self.iam_endpoint))
    }

    async fn execute<I, O>(&self, mut builder: reqwest::RequestBuilder, body: Option<&I>) -> Result<O>
    where
        I: serde::ser::Serialize + ?Sized,
        O: serde::de::DeserializeOwned,
    {
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let cached_auth_headers = self
            .cred
            .headers(Extensions::new())
            .await
            .map_err(Error::authentication)?;
        let auth_headers = match cached_auth_headers {
            CacheableResource::New { data, .. } => data,
            CacheableResource::NotModified => {
                unreachable!("headers are not cached");
            }
        };
        for (key, value) in auth_headers.iter() {
            builder = builder.header(key, value);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        if !response.status().is_success() {
            return Err(to_http_error(response).await);
        }
        let body = response.bytes().await.map_err(Error::io)?;
        serde_json::from_slice::<O>(&body).map_err(Error::deser)
    }
}

impl crate::stub::Services for Services {
    async fn get_service(&self, name: &ServiceName) -> Result<Service> {
        Services::get_service(self, name).await
    }

    async fn create_service(&self, name: &ServiceName, service: Service) -> Result<Service> {
        Services::create_service(self, name, service).await
    }

    async fn replace_service(&self, name: &ServiceName, service: Service) -> Result<Service> {
        Services::replace_service(self, name, service).await
    }

    async fn delete_service(&self, name: &ServiceName) -> Result<DeleteStatus> {
        Services::delete_service(self, name).await
    }

    async fn get_iam_policy(&self, name: &ServiceName) -> Result<Policy> {
        Services::get_iam_policy(self, name).await
    }

    async fn set_iam_policy(&self, name: &ServiceName, policy: Policy) -> Result<Policy> {
        Services::set_iam_policy(self, name, policy).await
    }
}

fn with_namespace(name: &ServiceName, mut service: Service) -> Service {
    if service.metadata.name.is_empty() {
        service.metadata.name = name.service().to_string();
    }
    if service.metadata.namespace.is_empty() {
        service.metadata.namespace = name.project().to_string();
    }
    service
}

fn map_send_error(err: reqwest::Error) -> Error {
    match err {
        e if e.is_timeout() => Error::timeout(e),
        e => Error::io(e),
    }
}

async fn to_http_error(response: reqwest::Response) -> Error {
    let status_code = response.status().as_u16();
    let headers = response.headers().clone();
    let body = match response.bytes().await {
        Ok(b) => b,
        Err(e) => return Error::io(e),
    };
    match Status::try_from(&body) {
        Ok(status) => Error::service_with_http_metadata(status, Some(status_code), Some(headers)),
        Err(_) => Error::http(status_code, headers, body),
    }
}

/// A builder for [Services].
///
/// ```no_run
/// # async fn sample() -> anyhow::Result<()> {
/// # use google_cloud_run_rollout::client::Services;
/// # use std::time::Duration;
/// let client = Services::builder()
///     .with_region("asia-northeast1")
///     .with_request_timeout(Duration::from_secs(30))
///     .build()
///     .await?;
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClientBuilder {
    region: Option<String>,
    endpoint: Option<String>,
    iam_endpoint: Option<String>,
    cred: Option<Credentials>,
    request_timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new client.
    ///
    /// Fails if no credentials are configured and the default credentials
    /// cannot be loaded.
    pub async fn build(self) -> std::result::Result<Services, BuilderError> {
        let cred = match self.cred {
            Some(c) => c,
            None => google_cloud_auth::credentials::Builder::default()
                .build()
                .map_err(BuilderError::cred)?,
        };
        let region = self.region.as_deref().unwrap_or(DEFAULT_REGION);
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| format!("https://{region}-run.googleapis.com"));
        let iam_endpoint = self
            .iam_endpoint
            .unwrap_or_else(|| IAM_ENDPOINT.to_string());
        tracing::debug!("creating Cloud Run client for {endpoint} and {iam_endpoint}");
        Ok(Services {
            inner: reqwest::Client::new(),
            cred,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            iam_endpoint: iam_endpoint.trim_end_matches('/').to_string(),
            request_timeout: self.request_timeout,
        })
    }

    /// Sets the region, used to compute the default regional endpoint.
    pub fn with_region<T: Into<String>>(mut self, v: T) -> Self {
        self.region = Some(v.into());
        self
    }

    /// Sets the endpoint for service operations, overriding the region.
    pub fn with_endpoint<T: Into<String>>(mut self, v: T) -> Self {
        self.endpoint = Some(v.into());
        self
    }

    /// Sets the endpoint for IAM operations.
    pub fn with_iam_endpoint<T: Into<String>>(mut self, v: T) -> Self {
        self.iam_endpoint = Some(v.into());
        self
    }

    /// Configures the authentication credentials.
    ///
    /// ```no_run
    /// # async fn sample() -> anyhow::Result<()> {
    /// # use google_cloud_run_rollout::client::Services;
    /// use google_cloud_auth::credentials::anonymous::Builder;
    /// let client = Services::builder()
    ///     .with_endpoint("http://localhost:8080")
    ///     .with_credentials(Builder::new().build())
    ///     .build()
    ///     .await?;
    /// # Ok(()) }
    /// ```
    pub fn with_credentials<T: Into<Credentials>>(mut self, v: T) -> Self {
        self.cred = Some(v.into());
        self
    }

    /// Sets a timeout for each request.
    ///
    /// By default requests have no timeout. The [ReadinessWatcher] bounds
    /// its requests by the wait deadline regardless of this setting.
    ///
    /// [ReadinessWatcher]: crate::watcher::ReadinessWatcher
    pub fn with_request_timeout(mut self, v: Duration) -> Self {
        self.request_timeout = Some(v);
        self
    }
}

/// The error returned by [ClientBuilder::build].
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct BuilderError(BuilderErrorKind);

impl BuilderError {
    /// If true, the client could not initialize the default credentials.
    pub fn is_default_credentials(&self) -> bool {
        matches!(&self.0, BuilderErrorKind::DefaultCredentials(_))
    }

    fn cred<T: Into<BoxError>>(source: T) -> Self {
        Self(BuilderErrorKind::DefaultCredentials(source.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum BuilderErrorKind {
    #[error("could not create default credentials")]
    DefaultCredentials(#[source] BoxError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous() -> Credentials {
        google_cloud_auth::credentials::anonymous::Builder::new().build()
    }

    #[tokio::test]
    async fn default_endpoints() -> anyhow::Result<()> {
        let client = Services::builder().with_credentials(anonymous()).build().await?;
        assert_eq!(client.endpoint, "https://us-central1-run.googleapis.com");
        assert_eq!(client.iam_endpoint, "https://run.googleapis.com");
        assert!(client.request_timeout.is_none(), "{client:?}");
        Ok(())
    }

    #[tokio::test]
    async fn regional_endpoint() -> anyhow::Result<()> {
        let client = Services::builder()
            .with_region("europe-west1")
            .with_credentials(anonymous())
            .build()
            .await?;
        assert_eq!(client.endpoint, "https://europe-west1-run.googleapis.com");
        Ok(())
    }

    #[tokio::test]
    async fn endpoint_overrides() -> anyhow::Result<()> {
        let client = Services::builder()
            .with_region("europe-west1")
            .with_endpoint("http://localhost:8080/")
            .with_iam_endpoint("http://localhost:8081")
            .with_request_timeout(Duration::from_secs(7))
            .with_credentials(anonymous())
            .build()
            .await?;
        assert_eq!(client.endpoint, "http://localhost:8080");
        assert_eq!(client.iam_endpoint, "http://localhost:8081");
        assert_eq!(client.request_timeout, Some(Duration::from_secs(7)));
        Ok(())
    }

    #[test]
    fn namespace_defaults() {
        let name = ServiceName::new("p", "r", "s");
        let got = with_namespace(&name, Service::new());
        assert_eq!(got.metadata.name, "s");
        assert_eq!(got.metadata.namespace, "p");

        let input = Service::new().set_metadata(
            crate::model::ObjectMeta::new()
                .set_name("s")
                .set_namespace("123456"),
        );
        let got = with_namespace(&name, input);
        assert_eq!(got.metadata.namespace, "123456");
    }

    #[test]
    fn builder_error() {
        let err = BuilderError::cred("no ADC");
        assert!(err.is_default_credentials(), "{err:?}");
        assert!(err.to_string().contains("default credentials"), "{err}");
    }
}
