//! Storage-backend abstraction for Strata.
//!
//! This crate provides a uniform contract for listing, reading,
//! writing, deleting and existence-checking content at string-addressed
//! paths, decoupled from the concrete storage engine behind a pluggable
//! driver registry.
//!
//! # Design Principles
//! - Backend isolation: callers only see the [`StorageAdapter`] contract
//! - Connect-before-use: an adapter is connected at construction or it
//!   is never produced
//! - Synchronous operations: every call runs to completion; concurrent
//!   sharing is delegated to the engine handle
//! - Unified error semantics: consistent error types across backends
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use strata_storage::{create_default_registry, StorageAdapter};
//!
//! # fn main() -> strata_common::Result<()> {
//! let registry = create_default_registry();
//! let adapter = registry.bootstrap(&json!({"type": "memory"}))?;
//!
//! adapter.put("notes/today.txt", b"hello")?;
//! assert_eq!(adapter.get("notes/today.txt")?, b"hello");
//!
//! adapter.delete("notes/today.txt")?;
//! assert!(!adapter.exists("notes/today.txt")?);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod local;
pub mod memory;
pub mod registry;

pub use adapter::{EngineAdapter, Entry, StorageAdapter, StorageEngine};
pub use local::LocalEngine;
pub use memory::MemoryEngine;
pub use registry::{create_default_registry, DriverFactory, DriverRegistry};
