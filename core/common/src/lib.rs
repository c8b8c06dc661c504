//! Common utilities and types shared across Strata crates.
//!
//! This module provides the error taxonomy and the path utilities that
//! every storage backend builds on.

pub mod error;
pub mod path;

pub use error::{Error, Result};
