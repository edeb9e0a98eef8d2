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

use crate::Result;
use crate::error::is_not_found;
use crate::name::ServiceName;
use crate::stub::Services;

/// Returns true if the service exists.
///
/// Only a "not found" response maps to `false`. Any other error, such as a
/// permission error or a transient outage, is returned to the caller.
pub async fn service_exists<S>(stub: &S, name: &ServiceName) -> Result<bool>
where
    S: Services,
{
    match stub.get_service(name).await {
        Ok(_) => Ok(true),
        Err(e) if is_not_found(&e) => {
            tracing::debug!("service {name} not found: {e}");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, is_permission_denied};
    use crate::error::rpc::{Code, Status};
    use crate::model::Service;
    use crate::stub::tests::MockServices;
    use http::HeaderMap;

    fn name() -> ServiceName {
        ServiceName::new("p", "us-central1", "hello")
    }

    #[tokio::test]
    async fn exists() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_service()
            .times(1)
            .returning(|_| Ok(Service::new()));
        assert!(service_exists(&mock, &name()).await?);
        Ok(())
    }

    #[tokio::test]
    async fn not_found_status() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_service().times(1).returning(|_| {
            Err(Error::service_with_http_metadata(
                Status::default().set_code(Code::NotFound),
                Some(404),
                None,
            ))
        });
        assert!(!service_exists(&mock, &name()).await?);
        Ok(())
    }

    #[tokio::test]
    async fn not_found_http() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_service()
            .times(1)
            .returning(|_| Err(Error::http(404, HeaderMap::new(), "not found".into())));
        assert!(!service_exists(&mock, &name()).await?);
        Ok(())
    }

    #[tokio::test]
    async fn permission_denied() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_service().times(1).returning(|_| {
            Err(Error::service_with_http_metadata(
                Status::default().set_code(Code::PermissionDenied),
                Some(403),
                None,
            ))
        });
        let err = service_exists(&mock, &name()).await.unwrap_err();
        assert!(is_permission_denied(&err), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn transport_error() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_service()
            .times(1)
            .returning(|_| Err(Error::io("connection refused")));
        let err = service_exists(&mock, &name()).await.unwrap_err();
        assert!(err.is_io(), "{err:?}");
        Ok(())
    }
}
