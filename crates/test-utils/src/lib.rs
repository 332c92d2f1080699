//! Shared test utilities for the radar-volumes workspace.
//!
//! The main export is [`CfRadialFixture`], a builder that writes small
//! synthetic CfRadial1 netCDF files for integration tests, so no test
//! depends on external data downloads.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then build a fixture in a temp directory:
//!
//! ```ignore
//! use test_utils::CfRadialFixture;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = CfRadialFixture::new()
//!     .with_gates(500)
//!     .with_sweep(0.5, 100)
//!     .write(dir.path());
//! ```

pub mod cfradial;

pub use cfradial::{CfRadialFixture, MomentSpec};
