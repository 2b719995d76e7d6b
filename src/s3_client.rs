// src/s3_client.rs
//
//! Blocking wrapper around the async AWS Rust SDK.
//!
//! Owns the global single-threaded Tokio runtime and the lazily-built S3
//! client. The archive allows unsigned reads, so the client is configured
//! without credentials; only `AWS_REGION` and `AWS_ENDPOINT_URL` are honored.

use anyhow::Result;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::{config::Region, Client};
use once_cell::sync::{Lazy, OnceCell};
use std::env;
use tokio::runtime::Runtime;

use crate::constants::{DEFAULT_REGION, ENV_AWS_ENDPOINT_URL, ENV_AWS_REGION};

// -----------------------------------------------------------------------------
//  Global runtime (lazy). Current-thread flavor: transfers are strictly
//  sequential, one object at a time, so there is nothing to fan out.
// -----------------------------------------------------------------------------
static RT: Lazy<Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime")
});

/// Run a future to completion on the shared runtime, blocking this thread.
pub fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    RT.block_on(fut)
}

// -----------------------------------------------------------------------------
//  Global S3 client (lazy, thread-safe)
// -----------------------------------------------------------------------------
static CLIENT: OnceCell<Client> = OnceCell::new();

/// Return the process-wide anonymous S3 client, building it on first use.
///
/// Construction drives the config loader on the shared runtime, so this must
/// be called from sync code, never from inside [`block_on`].
pub fn client() -> Result<Client> {
    CLIENT
        .get_or_try_init(|| {
            // Load .env first so AWS_* vars are available.
            dotenvy::dotenv().ok();

            let region = RegionProviderChain::first_try(
                env::var(ENV_AWS_REGION).ok().map(Region::new),
            )
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

            // No credential provider: requests go out unsigned.
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(region)
                .no_credentials();

            // Custom endpoints (MinIO, Ceph, ...) need path-style addressing;
            // virtual-hosted style only resolves against real AWS.
            let mut force_path_style = false;
            if let Ok(endpoint) = env::var(ENV_AWS_ENDPOINT_URL) {
                if !endpoint.is_empty() {
                    loader = loader.endpoint_url(endpoint);
                    force_path_style = true;
                }
            }

            let cfg = RT.block_on(loader.load());
            let s3_config = aws_sdk_s3::config::Builder::from(&cfg)
                .force_path_style(force_path_style)
                .build();
            Ok::<_, anyhow::Error>(Client::from_conf(s3_config))
        })
        .map(Clone::clone)
}
