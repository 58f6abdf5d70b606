// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Builders for records that are assembled piece by piece before they are added to a trace.

use crate::protocol::{ErrorCode, Event, Exception, Resource};

/// A not yet finalized [`Event`].
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.event.id = id.into();
        self
    }

    /// Start time, in fractional seconds since the Unix epoch.
    pub fn start_time(mut self, start_time: f64) -> Self {
        self.event.start_time = start_time;
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.event.duration = duration;
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.event.origin = origin.into();
        self
    }

    pub fn resource(mut self, resource: Resource) -> Self {
        self.event.resource = Some(resource);
        self
    }

    pub fn error_code(mut self, error_code: ErrorCode) -> Self {
        self.event.set_error_code(error_code);
        self
    }

    pub fn exception(mut self, exception: Exception) -> Self {
        self.event.exception = Some(exception);
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}

/// A not yet finalized [`Exception`].
#[derive(Debug, Clone, Default)]
pub struct ExceptionBuilder {
    exception: Exception,
}

impl ExceptionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.exception.r#type = type_name.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.exception.message = message.into();
        self
    }

    pub fn traceback(mut self, traceback: impl Into<String>) -> Self {
        self.exception.traceback = traceback.into();
        self
    }

    pub fn time(mut self, time: f64) -> Self {
        self.exception.time = time;
        self
    }

    pub fn additional_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.exception
            .additional_data
            .insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Exception {
        self.exception
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceBuilder {
    resource: Resource,
}

impl ResourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.resource.name = name.into();
        self
    }

    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource.r#type = resource_type.into();
        self
    }

    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.resource.operation = operation.into();
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.resource.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Resource {
        self.resource
    }
}

impl Event {
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }
}

impl Exception {
    pub fn builder() -> ExceptionBuilder {
        ExceptionBuilder::new()
    }
}

impl Resource {
    pub fn builder() -> ResourceBuilder {
        ResourceBuilder::new()
    }
}

impl From<EventBuilder> for Event {
    fn from(builder: EventBuilder) -> Self {
        builder.build()
    }
}

impl From<ExceptionBuilder> for Exception {
    fn from(builder: ExceptionBuilder) -> Self {
        builder.build()
    }
}
