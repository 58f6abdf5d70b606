// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Protobuf models for the Epsagon trace collector.
//!
//! The message types are generated by `prost-build` from the definitions under `proto/` and
//! derive `serde` so the trace can be shipped as JSON. The JSON produced by [`to_json`] is the
//! collector's wire format: proto field names are kept as declared, enum fields are written as
//! their integer ordinals and default-valued scalars and collections are always present.

pub mod builder;

#[allow(clippy::all)]
pub mod protocol {
    include!("epsagon.protocol.rs");
}

pub use builder::{EventBuilder, ExceptionBuilder, ResourceBuilder};
pub use protocol::*;

use serde::Serialize;

/// Serializes a protocol message into the collector's canonical JSON form.
pub fn to_json<T: Serialize>(message: &T) -> serde_json::Result<String> {
    serde_json::to_string(message)
}

/// Same as [`to_json`], returning the UTF-8 encoded body.
pub fn to_json_vec<T: Serialize>(message: &T) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(message)
}
