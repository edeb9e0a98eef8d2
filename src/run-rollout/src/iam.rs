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

//! Manage who can invoke a service.

use crate::Result;
use crate::model::{Binding, Policy};
use crate::name::ServiceName;
use crate::stub::Services;

/// The principal representing any caller, authenticated or not.
pub const ALL_USERS: &str = "allUsers";

/// The role required to send requests to a service.
pub const INVOKER_ROLE: &str = "roles/run.invoker";

/// Makes the service publicly reachable.
///
/// Grants [INVOKER_ROLE] to [ALL_USERS]. The policy is written back with
/// the `etag` from the read, so a concurrent change fails the request
/// instead of being overwritten. If the service is already public no write
/// is issued.
///
/// Returns the resulting policy.
pub async fn allow_unauthenticated<S>(stub: &S, name: &ServiceName) -> Result<Policy>
where
    S: Services,
{
    let policy = stub.get_iam_policy(name).await?;
    if policy.has_member(INVOKER_ROLE, ALL_USERS) {
        tracing::info!("{name} already allows unauthenticated invocations");
        return Ok(policy);
    }
    let policy = stub
        .set_iam_policy(name, grant(policy, INVOKER_ROLE, ALL_USERS))
        .await?;
    tracing::info!("{name} now allows unauthenticated invocations");
    Ok(policy)
}

/// Adds `member` to the binding for `role`, creating the binding if needed.
fn grant(mut policy: Policy, role: &str, member: &str) -> Policy {
    match policy.bindings.iter_mut().find(|b| b.role == role) {
        Some(binding) => binding.members.push(member.to_string()),
        None => policy
            .bindings
            .push(Binding::new().set_role(role).set_members([member])),
    }
    policy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, is_conflict, is_permission_denied};
    use crate::error::rpc::{Code, Status};
    use crate::stub::tests::MockServices;
    use pretty_assertions::assert_eq;

    fn name() -> ServiceName {
        ServiceName::new("p", "us-central1", "hello")
    }

    #[tokio::test]
    async fn adds_binding() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_iam_policy()
            .times(1)
            .returning(|_| Ok(Policy::new().set_etag("abc")));
        mock.expect_set_iam_policy()
            .times(1)
            .withf(|n, p| {
                n == &name()
                    && p.etag == "abc"
                    && p.bindings
                        == vec![Binding::new().set_role(INVOKER_ROLE).set_members([ALL_USERS])]
            })
            .returning(|_, p| Ok(p.set_etag("def")));
        let got = allow_unauthenticated(&mock, &name()).await?;
        assert!(got.has_member(INVOKER_ROLE, ALL_USERS), "{got:?}");
        assert_eq!(got.etag, "def");
        Ok(())
    }

    #[tokio::test]
    async fn extends_existing_binding() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_iam_policy().times(1).returning(|_| {
            Ok(Policy::new().set_etag("abc").set_bindings([
                Binding::new()
                    .set_role("roles/run.admin")
                    .set_members(["user:admin@example.com"]),
                Binding::new()
                    .set_role(INVOKER_ROLE)
                    .set_members(["serviceAccount:caller@p.iam.gserviceaccount.com"]),
            ]))
        });
        mock.expect_set_iam_policy()
            .times(1)
            .returning(|_, p| Ok(p));
        let got = allow_unauthenticated(&mock, &name()).await?;
        assert_eq!(
            got.bindings[1].members,
            vec![
                "serviceAccount:caller@p.iam.gserviceaccount.com".to_string(),
                ALL_USERS.to_string()
            ]
        );
        assert_eq!(got.bindings[0].members, vec!["user:admin@example.com".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn already_public() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_iam_policy().times(1).returning(|_| {
            Ok(Policy::new().set_bindings([Binding::new()
                .set_role(INVOKER_ROLE)
                .set_members([ALL_USERS])]))
        });
        mock.expect_set_iam_policy().never();
        let got = allow_unauthenticated(&mock, &name()).await?;
        assert!(got.has_member(INVOKER_ROLE, ALL_USERS), "{got:?}");
        Ok(())
    }

    #[tokio::test]
    async fn conflict() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_iam_policy()
            .times(1)
            .returning(|_| Ok(Policy::new().set_etag("abc")));
        mock.expect_set_iam_policy().times(1).returning(|_, _| {
            Err(Error::service(Status::default().set_code(Code::Aborted)))
        });
        let err = allow_unauthenticated(&mock, &name()).await.unwrap_err();
        assert!(is_conflict(&err), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn get_error() -> anyhow::Result<()> {
        let mut mock = MockServices::new();
        mock.expect_get_iam_policy().times(1).returning(|_| {
            Err(Error::service(
                Status::default().set_code(Code::PermissionDenied),
            ))
        });
        mock.expect_set_iam_policy().never();
        let err = allow_unauthenticated(&mock, &name()).await.unwrap_err();
        assert!(is_permission_denied(&err), "{err:?}");
        Ok(())
    }
}
