// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Optional log output for hosts that do not install a `tracing` subscriber of their own.

use crate::error::LoggingError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Builds the filter used by [`init`]. HTTP and TLS internals are silenced.
pub fn env_filter(log_level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(format!(
        "h2=off,hyper=off,rustls=off,reqwest=off,{log_level}"
    ))
    .map_err(|err| LoggingError::Filter(err.to_string()))
}

/// Installs a global `fmt` subscriber at the given level.
///
/// Fails if the level cannot be parsed or a global subscriber is already installed.
pub fn init(log_level: &str) -> Result<(), LoggingError> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter(log_level)?)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| LoggingError::AlreadyInitialized(err.to_string()))?;

    debug!("Logging subsystem enabled");
    Ok(())
}
