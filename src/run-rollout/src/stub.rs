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

//! Traits to mock the clients in this crate.
//!
//! Application developers may need to mock the clients in this crate to test
//! how their application works with different (and sometimes hard to trigger)
//! client and service behavior. Such testing can benefit from the traits in
//! this module.

use crate::Result;
use crate::error::Error;
use crate::error::rpc::{Code, Status};
use crate::model::{DeleteStatus, Policy, Service};
use crate::name::ServiceName;

/// Defines the trait used to implement [crate::client::Services].
///
/// All the helpers in this crate are generic over this trait. Application
/// developers may implement it to mock `client::Services`. In other
/// use-cases, application developers only use `client::Services` and need
/// not be concerned with this trait or its implementations.
///
/// Each method has a default implementation that returns an error, mocks
/// only need to implement the methods exercised by their tests.
pub trait Services: std::fmt::Debug + Send + Sync {
    /// Implements [crate::client::Services::get_service].
    fn get_service(
        &self,
        _name: &ServiceName,
    ) -> impl std::future::Future<Output = Result<Service>> + Send {
        unimplemented_stub::<Service>("get_service")
    }

    /// Implements [crate::client::Services::create_service].
    fn create_service(
        &self,
        _name: &ServiceName,
        _service: Service,
    ) -> impl std::future::Future<Output = Result<Service>> + Send {
        unimplemented_stub::<Service>("create_service")
    }

    /// Implements [crate::client::Services::replace_service].
    fn replace_service(
        &self,
        _name: &ServiceName,
        _service: Service,
    ) -> impl std::future::Future<Output = Result<Service>> + Send {
        unimplemented_stub::<Service>("replace_service")
    }

    /// Implements [crate::client::Services::delete_service].
    fn delete_service(
        &self,
        _name: &ServiceName,
    ) -> impl std::future::Future<Output = Result<DeleteStatus>> + Send {
        unimplemented_stub::<DeleteStatus>("delete_service")
    }

    /// Implements [crate::client::Services::get_iam_policy].
    fn get_iam_policy(
        &self,
        _name: &ServiceName,
    ) -> impl std::future::Future<Output = Result<Policy>> + Send {
        unimplemented_stub::<Policy>("get_iam_policy")
    }

    /// Implements [crate::client::Services::set_iam_policy].
    fn set_iam_policy(
        &self,
        _name: &ServiceName,
        _policy: Policy,
    ) -> impl std::future::Future<Output = Result<Policy>> + Send {
        unimplemented_stub::<Policy>("set_iam_policy")
    }
}

async fn unimplemented_stub<T: Send>(method: &'static str) -> Result<T> {
    let status = Status::default()
        .set_code(Code::Unimplemented)
        .set_message(format!("{method} is not implemented by this stub"));
    Err(Error::service(status))
}
