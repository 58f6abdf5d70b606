// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Normalization of the different ways an exception can be reported into an [`Exception`] record.

use std::any::{type_name, Any};
use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt::Write;

use epsagon_protocol::{Exception, ExceptionBuilder};

use crate::clock::current_time;

/// An exception as handed to [`TraceBuffer::add_exception`](crate::TraceBuffer::add_exception).
#[derive(Debug)]
pub enum ExceptionSource {
    /// A native error, captured at the point it was reported.
    Error(CapturedError),
    /// A fully formed record, appended as is.
    Record(Exception),
    /// A record still being assembled, finalized before it is appended.
    Builder(ExceptionBuilder),
}

impl ExceptionSource {
    /// Produces the record to append. Captured errors are stamped with the current time.
    pub fn into_exception(self) -> Exception {
        match self {
            Self::Error(captured) => captured.into_exception(current_time()),
            Self::Record(exception) => exception,
            Self::Builder(builder) => builder.build(),
        }
    }
}

impl From<Exception> for ExceptionSource {
    fn from(exception: Exception) -> Self {
        Self::Record(exception)
    }
}

impl From<ExceptionBuilder> for ExceptionSource {
    fn from(builder: ExceptionBuilder) -> Self {
        Self::Builder(builder)
    }
}

impl From<CapturedError> for ExceptionSource {
    fn from(captured: CapturedError) -> Self {
        Self::Error(captured)
    }
}

impl<E: Error + 'static> From<&E> for ExceptionSource {
    fn from(err: &E) -> Self {
        Self::Error(CapturedError::new(err))
    }
}

/// Type, message and stack of an error, taken when the error is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedError {
    type_name: String,
    message: String,
    traceback: String,
}

impl CapturedError {
    /// Captures a typed error. The type is reported with its full path.
    pub fn new<E: Error + 'static>(err: &E) -> Self {
        Self::from_parts(type_name::<E>(), err, &Backtrace::force_capture())
    }

    /// Captures an `anyhow` error. Its concrete type is erased, so the type is reported as
    /// `anyhow::Error` and the context chain goes into the traceback.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let err: &(dyn Error + 'static) = err.as_ref();
        Self::from_parts(type_name::<anyhow::Error>(), err, &Backtrace::force_capture())
    }

    /// Captures a type-erased error such as `&dyn Error` or the contents of a `Box<dyn Error>`.
    /// The concrete type is not known, so the type is reported as `dyn Error`.
    pub fn from_dyn(err: &(dyn Error + 'static)) -> Self {
        Self::from_parts("dyn Error", err, &Backtrace::force_capture())
    }

    /// Captures the payload of a panic caught with `std::panic::catch_unwind`.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            String::new()
        };
        let backtrace = Backtrace::force_capture();

        Self {
            traceback: render_traceback("panic", &message, &[], &backtrace),
            type_name: "panic".to_string(),
            message,
        }
    }

    fn from_parts(type_name: &str, err: &(dyn Error + 'static), backtrace: &Backtrace) -> Self {
        let message = err.to_string();
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            traceback: render_traceback(type_name, &message, &causes, backtrace),
            type_name: type_name.to_string(),
            message,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn traceback(&self) -> &str {
        &self.traceback
    }

    pub fn into_exception(self, time: f64) -> Exception {
        Exception::builder()
            .type_name(self.type_name)
            .message(self.message)
            .traceback(self.traceback)
            .time(time)
            .build()
    }
}

// Header line, one "Caused by" line per source, then the stack. The header always carries the
// type name, so the traceback is never empty.
fn render_traceback(
    type_name: &str,
    message: &str,
    causes: &[String],
    backtrace: &Backtrace,
) -> String {
    let mut traceback = String::from(type_name);
    if !message.is_empty() {
        traceback.push_str(": ");
        traceback.push_str(message);
    }
    traceback.push('\n');
    for cause in causes {
        let _ = writeln!(traceback, "Caused by: {cause}");
    }
    let _ = writeln!(traceback, "stack backtrace:\n{backtrace}");
    traceback
}
