// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "generate-protobuf")]
    generate()?;

    Ok(())
}

#[cfg(feature = "generate-protobuf")]
fn generate() -> Result<(), Box<dyn Error>> {
    use std::path::Path;

    let proto_root = Path::new("proto");
    let proto_files = [
        proto_root.join("epsagon/protocol/exception.proto"),
        proto_root.join("epsagon/protocol/event.proto"),
        proto_root.join("epsagon/protocol/trace.proto"),
    ];

    for proto_file in &proto_files {
        println!("cargo:rerun-if-changed={}", proto_file.display());
    }

    let mut config = prost_build::Config::new();
    config.out_dir("src/");

    config.type_attribute(".", "#[derive(::serde::Serialize, ::serde::Deserialize)]");

    for message in ["Exception", "Resource", "Event", "Trace"] {
        config.type_attribute(format!(".epsagon.protocol.{}", message), "#[serde(default)]");
    }

    // Unset sub-messages are left out of the JSON, scalars and collections never are.
    for field in [
        ".epsagon.protocol.Event.resource",
        ".epsagon.protocol.Event.exception",
    ] {
        config.field_attribute(field, "#[serde(skip_serializing_if = \"Option::is_none\")]");
    }

    config.compile_protos(&proto_files, &[proto_root])?;

    Ok(())
}
