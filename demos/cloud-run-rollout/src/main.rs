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

//! Drive a Cloud Run service through its lifecycle.
//!
//! To authenticate, run `gcloud auth application-default login` on a
//! workstation. On Google Cloud the service account attached to the
//! environment is used automatically. Elsewhere, point
//! `GOOGLE_APPLICATION_CREDENTIALS` at a service account key file.

mod args;

use args::Args;
use clap::Parser;
use google_cloud_run_rollout::client::Services;
use google_cloud_run_rollout::rollout;

const DESCRIPTION: &str = concat!(
    "This program checks if a Cloud Run service exists, creates it, waits",
    " until it is ready, makes it public, rolls out a second revision with a",
    " 90/10 traffic split, and then deletes the service."
);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.validate()?;
    enable_tracing()?;
    tracing::info!("Configuration: {args:?}");

    let client = Services::builder()
        .with_region(&args.region)
        .build()
        .await?;
    let report = rollout::run(&client, &args.config()).await?;
    tracing::info!("Rollout complete: {report:?}");
    if let Some(url) = &report.url {
        println!("{url}");
    }
    Ok(())
}

fn enable_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
