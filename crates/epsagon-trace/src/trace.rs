// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The process-wide trace.
//!
//! Instrumentation appends events and exceptions to the active trace from any thread. The trace
//! is reset when a unit of work starts and sent when it ends:
//!
//! ```no_run
//! use epsagon_trace::TraceBuffer;
//! use epsagon_trace::protocol::Event;
//!
//! let trace = TraceBuffer::global();
//! trace.reset();
//! trace.add_event(Event::builder().id("evt-a").build());
//! trace.send();
//! ```

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;

use epsagon_protocol::{Event, EventBuilder, Trace};
use tracing::{debug, error, trace};

use crate::config::{Config, SharedConfig};
use crate::error::PublishError;
use crate::exception::{CapturedError, ExceptionSource};
use crate::publisher::{HttpPublisher, TracePublisher};

const RUNTIME_NAME: &str = "rust";

static GLOBAL: OnceLock<TraceBuffer> = OnceLock::new();

/// Collects the events and exceptions of one unit of work and ships them to the collector.
pub struct TraceBuffer {
    // `None` until the first reset or append.
    core: Mutex<Option<Trace>>,
    config: SharedConfig,
    publisher: Box<dyn TracePublisher>,
}

impl TraceBuffer {
    pub fn new(config: SharedConfig) -> Self {
        Self::with_publisher(config, HttpPublisher::default())
    }

    pub fn with_publisher(config: SharedConfig, publisher: impl TracePublisher + 'static) -> Self {
        TraceBuffer {
            core: Mutex::new(None),
            config,
            publisher: Box::new(publisher),
        }
    }

    /// The process-wide trace, configured from the environment on first access.
    pub fn global() -> &'static TraceBuffer {
        GLOBAL.get_or_init(|| {
            let config = SharedConfig::from_env().unwrap_or_else(|err| {
                error!("Error loading Epsagon configuration, using defaults: {err}");
                SharedConfig::default()
            });
            TraceBuffer::new(config)
        })
    }

    /// Handle to the configuration read on every `reset` and `send`.
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Runtime identifier reported as the trace platform, e.g. `rust 1.80.0`.
    pub fn platform() -> String {
        format!("{RUNTIME_NAME} {}", env!("EPSAGON_RUSTC_VERSION"))
    }

    /// Starts a new trace, dropping all collected events and exceptions.
    pub fn reset(&self) {
        let fresh = Self::new_trace(&self.config.load());
        *self.lock() = Some(fresh);
        trace!("trace reset");
    }

    /// Adds an event to the trace. `None` is ignored.
    pub fn add_event(&self, event: impl Into<Option<Event>>) {
        if let Some(event) = event.into() {
            self.with_trace(|trace| trace.events.push(event));
        }
    }

    /// Finalizes and adds an event to the trace. `None` is ignored.
    pub fn add_event_builder(&self, builder: impl Into<Option<EventBuilder>>) {
        if let Some(builder) = builder.into() {
            self.add_event(builder.build());
        }
    }

    /// Adds an exception to the trace.
    ///
    /// Accepts a reference to any error type, a [`CapturedError`](crate::CapturedError), a
    /// complete [`Exception`](epsagon_protocol::Exception) or an
    /// [`ExceptionBuilder`](epsagon_protocol::ExceptionBuilder). Type-erased errors are captured
    /// with [`CapturedError::from_dyn`].
    pub fn add_exception(&self, exception: impl Into<ExceptionSource>) {
        let exception = exception.into().into_exception();
        self.with_trace(|trace| trace.exceptions.push(exception));
    }

    /// Copy of the active trace, `None` before the first reset or append.
    pub fn snapshot(&self) -> Option<Trace> {
        self.lock().clone()
    }

    /// Ships the trace to the collector.
    ///
    /// Never fails: every problem is logged and the trace is dropped. The trace itself is kept,
    /// so sending again without a reset ships the same events. Blocks for at most the
    /// publisher's connect and read timeouts. The exchange runs on its own thread, so `send` may
    /// be called from inside an async runtime.
    pub fn send(&self) {
        trace!("sending trace");
        let config = self.config.load();

        let payload = {
            let mut core = self.lock();
            let Some(trace) = core.as_mut() else {
                error!("Trace must be restarted before sending.");
                return;
            };

            let Some(token) = config.token() else {
                error!("Epsagon token not set. A trace won't be sent.");
                return;
            };

            trace.token = token.to_string();
            trace.app_name.clone_from(&config.app_name);
            epsagon_protocol::to_json_vec(&*trace)
        };

        let collector_url = config.collector_url.as_deref().unwrap_or_default();
        let payload = match payload {
            Ok(payload) => payload,
            Err(err) => {
                report_failure(collector_url, &PublishError::from(err));
                return;
            }
        };

        if collector_url.trim().is_empty() {
            error!("Epsagon collector URL not set. A trace won't be sent.");
            return;
        }

        debug!(
            "trace JSON:{}\n collector URL: {collector_url}",
            String::from_utf8_lossy(&payload)
        );

        // The blocking client must not be created or dropped on an async runtime worker.
        let outcome = thread::scope(|scope| {
            scope
                .spawn(|| self.publisher.publish(&config, payload))
                .join()
        });

        match outcome {
            Ok(Ok(status)) => debug!("Response code: {}", status.as_u16()),
            Ok(Err(err)) => report_failure(collector_url, &err),
            Err(panic) => {
                let captured = CapturedError::from_panic(panic.as_ref());
                let err = PublishError::Aborted(captured.message().to_string());
                report_failure(collector_url, &err);
            }
        }
    }

    fn new_trace(config: &Config) -> Trace {
        Trace {
            platform: Self::platform(),
            version: config.version.clone(),
            ..Default::default()
        }
    }

    fn with_trace(&self, append: impl FnOnce(&mut Trace)) {
        let mut core = self.lock();
        let trace = core.get_or_insert_with(|| {
            debug!("No active trace, starting one");
            Self::new_trace(&self.config.load())
        });
        append(trace);
    }

    // A panic while holding the lock cannot leave a trace half-written, so a poisoned lock is
    // still usable.
    fn lock(&self) -> MutexGuard<'_, Option<Trace>> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn report_failure(collector_url: &str, err: &PublishError) {
    error!("{collector_url}");
    error!("Cannot connect to Trace collector URL. Cannot report to Epsagon.");
    error!("{err}");
}
