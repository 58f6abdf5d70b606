// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use core::time::Duration;
use reqwest::blocking::Client;
use reqwest::{header, StatusCode, Url};
use tracing::debug;

use crate::config::Config;
use crate::error::PublishError;

/// Applies to both connecting to the collector and waiting for its response.
pub const SEND_TIMEOUT: Duration = Duration::from_millis(5000);

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

/// Ships a serialized trace to the collector.
pub trait TracePublisher: Send + Sync {
    /// Sends `payload` to the collector named by `config`, returning the response status.
    /// Implementations must not retry.
    fn publish(&self, config: &Config, payload: Vec<u8>) -> Result<StatusCode, PublishError>;
}

/// Publishes traces with a single blocking HTTP POST.
///
/// A fresh client is built for every trace and dropped before `publish` returns, so no
/// connection outlives the call.
///
/// The read budget is enforced as a request-wide timeout of connect plus read. A collector that
/// accepts the connection but never answers holds `publish` for the full
/// [`max_send_duration`](Self::max_send_duration), 10 seconds with the default timeouts.
#[derive(Debug, Clone)]
pub struct HttpPublisher {
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl Default for HttpPublisher {
    fn default() -> Self {
        Self::new(SEND_TIMEOUT, SEND_TIMEOUT)
    }
}

impl HttpPublisher {
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            read_timeout,
        }
    }

    /// Upper bound on the time a single publish can block.
    pub fn max_send_duration(&self) -> Duration {
        self.connect_timeout + self.read_timeout
    }
}

impl TracePublisher for HttpPublisher {
    fn publish(&self, config: &Config, payload: Vec<u8>) -> Result<StatusCode, PublishError> {
        let collector_url = config.collector_url.as_deref().unwrap_or_default();
        let url = Url::parse(collector_url).map_err(|err| PublishError::InvalidUrl {
            url: collector_url.to_string(),
            reason: err.to_string(),
        })?;

        let client = build_client(
            config.https_proxy.as_deref(),
            self.connect_timeout,
            self.max_send_duration(),
        )?;

        debug!("Sending {} byte trace to {url}", payload.len());
        let response = client
            .post(url)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(payload)
            .send()?;

        Ok(response.status())
    }
}

/// Builds a blocking rustls client with optional proxy configuration and timeouts.
pub fn build_client(
    proxy_url: Option<&str>,
    connect_timeout: Duration,
    timeout: Duration,
) -> Result<Client, PublishError> {
    let mut builder = Client::builder()
        .use_rustls_tls()
        .connect_timeout(connect_timeout)
        .timeout(timeout);
    if let Some(proxy) = proxy_url {
        builder = builder.proxy(reqwest::Proxy::https(proxy)?);
    }
    Ok(builder.build()?)
}
