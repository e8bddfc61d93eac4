//! Shared test utilities for the gs-viewer workspace.
//!
//! Provides canned capability/schema documents and layer builders used
//! by tests across crates.
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;

pub use fixtures::*;
