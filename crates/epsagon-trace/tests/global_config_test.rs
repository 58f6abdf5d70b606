// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use epsagon_trace::TraceBuffer;
use serial_test::serial;
use std::env;

// The global buffer reads the environment once, so this binary holds a single test.
#[test]
#[serial]
fn test_global_keeps_token_when_log_level_is_invalid() {
    env::set_var("EPSAGON_TOKEN", "tok-1");
    env::set_var("EPSAGON_COLLECTOR_URL", "http://localhost:9999/trace");
    env::set_var("EPSAGON_LOG_LEVEL", "verbose");

    let config = TraceBuffer::global().config().load();

    env::remove_var("EPSAGON_TOKEN");
    env::remove_var("EPSAGON_COLLECTOR_URL");
    env::remove_var("EPSAGON_LOG_LEVEL");

    assert_eq!(config.token(), Some("tok-1"));
    assert_eq!(
        config.collector_url.as_deref(),
        Some("http://localhost:9999/trace")
    );
    assert_eq!(config.log_level, "info");
}
