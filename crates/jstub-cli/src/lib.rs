//! Library wrapper around the `jstub` CLI implementation.
//!
//! Compiling the binary crate root as a module lets `cargo test -p jstub-cli --lib`
//! typecheck the CLI without building the integration tests.

#[allow(dead_code)]
#[path = "main.rs"]
mod main_bin;
