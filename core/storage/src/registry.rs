//! Driver registry for resolving configured backend types.

use std::collections::HashMap;

use serde_json::Value;

use crate::adapter::StorageAdapter;
use strata_common::{Error, Result};

/// Factory function type for constructing adapters from configuration.
pub type DriverFactory = Box<dyn Fn(&Value) -> Result<Box<dyn StorageAdapter>> + Send + Sync>;

/// Registry mapping driver aliases to adapter factories.
///
/// Decouples which backend to use (a runtime string in configuration)
/// from how to construct it, so new backends can be added without
/// touching the factory. The registry is an explicit value owned by the
/// caller; the library installs no process-wide state.
pub struct DriverRegistry {
    drivers: HashMap<String, DriverFactory>,
}

impl DriverRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Register a driver factory under `alias`.
    ///
    /// Re-registering an alias overwrites the previous factory. The
    /// factory's behavior is not validated at registration time.
    pub fn register(&mut self, alias: impl Into<String>, factory: DriverFactory) -> &mut Self {
        self.drivers.insert(alias.into(), factory);
        self
    }

    /// Construct an adapter from a configuration object.
    ///
    /// Reads the reserved `type` key, resolves the registered factory
    /// and invokes it with the full configuration. Construction
    /// failures (including a failed connect) propagate unchanged.
    ///
    /// # Errors
    /// - `Error::Configuration` if `type` is absent or not a string
    /// - `Error::Configuration` if no factory is registered for `type`
    pub fn bootstrap(&self, config: &Value) -> Result<Box<dyn StorageAdapter>> {
        let alias = config
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Configuration("type is not defined".to_string()))?;

        let factory = self
            .drivers
            .get(alias)
            .ok_or_else(|| Error::Configuration(format!("unrecognised type '{}'", alias)))?;

        factory(config)
    }

    /// Get the list of registered driver aliases.
    pub fn drivers(&self) -> Vec<String> {
        self.drivers.keys().cloned().collect()
    }

    /// Check if a driver is registered under `alias`.
    pub fn has_driver(&self, alias: &str) -> bool {
        self.drivers.contains_key(alias)
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry with the built-in drivers registered.
///
/// Registers `local` (disk-backed, requires a `path` option) and
/// `memory` (transient, for testing). Nothing is registered unless the
/// caller asks for it by using this constructor.
pub fn create_default_registry() -> DriverRegistry {
    let mut registry = DriverRegistry::new();

    registry.register(
        "local",
        Box::new(|config| {
            Ok(Box::new(crate::local::connect(config)?) as Box<dyn StorageAdapter>)
        }),
    );

    registry.register(
        "memory",
        Box::new(|config| {
            Ok(Box::new(crate::memory::connect(config)?) as Box<dyn StorageAdapter>)
        }),
    );

    registry
}
