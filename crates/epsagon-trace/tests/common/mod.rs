// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use epsagon_trace::{Config, SharedConfig};
use std::net::TcpListener;

pub fn test_config(collector_url: &str) -> SharedConfig {
    SharedConfig::new(Config {
        token: Some("tok-1".to_string()),
        app_name: "svc".to_string(),
        version: "1.2.3".to_string(),
        collector_url: Some(collector_url.to_string()),
        ..Default::default()
    })
}

/// URL of a local port nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let port = listener
        .local_addr()
        .expect("Failed to get local addr")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}/trace")
}
