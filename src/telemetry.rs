// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Structured logging setup for host applications.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "wellness_insights=debug,info";

/// Initialize structured JSON logging (GCP-compliant).
///
/// `RUST_LOG` overrides the default directives. An already installed
/// global subscriber stays in place; the failure is logged through it
/// and returned.
pub fn init_logging() -> Result<(), TryInitError> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init()
        .inspect_err(|e| tracing::warn!(error = %e, "Logging already initialized"))
}
