// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

/// Errors raised while building or validating the agent configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors that can occur while shipping a trace to the collector
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Invalid collector URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{}", render_chain(.0))]
    Transport(#[from] reqwest::Error),

    #[error("Failed to serialize trace: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Trace publisher aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Renders an error together with its sources, outermost first, separated by `": "`.
pub(crate) fn render_chain(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !cause_message.is_empty() && !rendered.ends_with(&cause_message) {
            rendered.push_str(": ");
            rendered.push_str(&cause_message);
        }
        source = cause.source();
    }
    rendered
}
