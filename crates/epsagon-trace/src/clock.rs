// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::time::UNIX_EPOCH;

/// Current wall-clock time in fractional seconds since the Unix epoch.
///
/// Not monotonic: follows whatever the system clock reports. A clock set before the epoch
/// reads as `0.0`.
pub fn current_time() -> f64 {
    UNIX_EPOCH
        .elapsed()
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default()
}
