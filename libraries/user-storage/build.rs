//! Build script for user-storage.
//!
//! Rebuild when the reference schema changes; tests embed it.

fn main() {
    println!("cargo:rerun-if-changed=schema");
}
