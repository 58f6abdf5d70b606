// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! Process-wide trace buffer for the Epsagon agent.
//!
//! Instrumentation records events and exceptions into the active trace through
//! [`TraceBuffer`]; at the end of the unit of work [`TraceBuffer::send`] serializes the trace and
//! posts it to the collector. Delivery problems are logged and never reach the caller.

pub mod clock;
pub mod config;
pub mod error;
pub mod exception;
pub mod logging;
pub mod publisher;
pub mod trace;

pub use config::{Config, SharedConfig};
pub use error::{ConfigError, LoggingError, PublishError};
pub use exception::{CapturedError, ExceptionSource};
pub use publisher::{HttpPublisher, TracePublisher};
pub use trace::TraceBuffer;

pub use epsagon_protocol as protocol;
