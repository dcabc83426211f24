//! Build script for user-server.
//!
//! Compiles `proto/user.proto` with protox (no system protoc needed), writes
//! the encoded descriptor set for the reflection service, and generates the
//! tonic server and client.

use prost::Message;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
    let file_descriptors = protox::compile(["proto/user.proto"], ["proto"])?;

    std::fs::write(
        out_dir.join("user_descriptor.bin"),
        file_descriptors.encode_to_vec(),
    )?;

    tonic_build::configure().compile_fds(file_descriptors)?;

    Ok(())
}
