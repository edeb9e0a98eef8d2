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

use anyhow::bail;
use clap::Parser;
use google_cloud_run_rollout::rollout::{DEFAULT_IMAGE_V1, DEFAULT_IMAGE_V2, RolloutConfig};
use humantime::parse_duration;
use std::time::Duration;

/// Configuration options for the demo.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = super::DESCRIPTION)]
pub struct Args {
    /// The project hosting the service.
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    pub project: String,

    /// The region hosting the service.
    #[arg(long, env = "GOOGLE_CLOUD_REGION", default_value = "us-central1")]
    pub region: String,

    /// The name of the service.
    #[arg(long, env = "RUN_SERVICE_NAME", default_value = "hello")]
    pub service: String,

    /// The container image for the first revision.
    #[arg(long, default_value = DEFAULT_IMAGE_V1)]
    pub image_v1: String,

    /// The container image for the second revision.
    #[arg(long, default_value = DEFAULT_IMAGE_V2)]
    pub image_v2: String,

    /// How long to wait for each state transition.
    #[arg(long, value_parser = parse_duration, default_value = "120s")]
    pub ready_timeout: Duration,

    /// The time between polls while waiting.
    #[arg(long, value_parser = parse_duration, default_value = "5s")]
    pub poll_interval: Duration,

    /// Keep the service at the end of the demo.
    #[arg(long, default_value_t = false)]
    pub keep: bool,

    /// Wait until the deleted service disappears.
    #[arg(long, default_value_t = false)]
    pub wait_for_deletion: bool,
}

impl Args {
    /// Validates the arguments after parsing.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.project.is_empty() {
            bail!("the project cannot be empty")
        }
        if self.poll_interval.is_zero() {
            bail!("invalid poll interval, should be > 0")
        }
        if self.ready_timeout < self.poll_interval {
            bail!(
                "the ready timeout ({:?}) should be at least one poll interval ({:?})",
                self.ready_timeout,
                self.poll_interval
            )
        }
        Ok(())
    }

    pub fn config(&self) -> RolloutConfig {
        RolloutConfig::new(&self.project, &self.region, &self.service)
            .set_image_v1(&self.image_v1)
            .set_image_v2(&self.image_v2)
            .set_ready_timeout(self.ready_timeout)
            .set_poll_interval(self.poll_interval)
            .set_keep(self.keep)
            .set_wait_for_deletion(self.wait_for_deletion)
    }
}
