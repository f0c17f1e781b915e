//! Name-keyed registry of backend initializers.
//!
//! Layout:
//! - `InitializerRegistry` lives here so `service.rs` can reach its private
//!   lookup without widening visibility.
//! - `service.rs` owns the process-wide instance and its free functions.
//!
//! Initializers are type-erased on registration: every entry produces a
//! `Box<dyn Backend>` and reports errors as `InitError`.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::errors::{InitError, Result};
use crate::initializer::BackendInitializer;
use tessera_abi::{Backend, InitializationOptionSetter, InitializationOptions};

/// Object-safe view over a `BackendInitializer<B, E>`.
trait ErasedInitializer: Send + Sync {
    fn default_options(&self) -> &InitializationOptions;
    fn load_defaults(&self, model_path: &Path) -> Result<Box<dyn Backend>>;
    fn load(
        &self,
        model_path: &Path,
        setters: &[InitializationOptionSetter],
    ) -> Result<Box<dyn Backend>>;
    fn load_with_options(
        &self,
        model_path: &Path,
        options: InitializationOptions,
    ) -> Result<Box<dyn Backend>>;
}

impl<B, E> ErasedInitializer for BackendInitializer<B, E>
where
    B: Backend + 'static,
    E: Into<InitError> + 'static,
{
    fn default_options(&self) -> &InitializationOptions {
        BackendInitializer::default_options(self)
    }

    fn load_defaults(&self, model_path: &Path) -> Result<Box<dyn Backend>> {
        BackendInitializer::load_defaults(self, model_path)
            .map(|b| Box::new(b) as Box<dyn Backend>)
            .map_err(Into::into)
    }

    fn load(
        &self,
        model_path: &Path,
        setters: &[InitializationOptionSetter],
    ) -> Result<Box<dyn Backend>> {
        BackendInitializer::load(self, model_path, setters)
            .map(|b| Box::new(b) as Box<dyn Backend>)
            .map_err(Into::into)
    }

    fn load_with_options(
        &self,
        model_path: &Path,
        options: InitializationOptions,
    ) -> Result<Box<dyn Backend>> {
        BackendInitializer::load_with_options(self, model_path, options)
            .map(|b| Box::new(b) as Box<dyn Backend>)
            .map_err(Into::into)
    }
}

/// Backend name → initializer.
#[derive(Clone, Default)]
pub struct InitializerRegistry {
    entries: HashMap<String, Arc<dyn ErasedInitializer>>,
}

impl InitializerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `initializer` under `name`. Returns `true` if it replaced an
    /// existing entry.
    pub fn register<B, E>(
        &mut self,
        name: impl Into<String>,
        initializer: BackendInitializer<B, E>,
    ) -> bool
    where
        B: Backend + 'static,
        E: Into<InitError> + 'static,
    {
        self.entries
            .insert(name.into(), Arc::new(initializer))
            .is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the defaults stored for `name`.
    pub fn default_options(&self, name: &str) -> Result<InitializationOptions> {
        Ok(self.get(name)?.default_options().clone())
    }

    pub fn load_defaults<P: AsRef<Path>>(
        &self,
        name: &str,
        model_path: P,
    ) -> Result<Box<dyn Backend>> {
        self.get(name)?.load_defaults(model_path.as_ref())
    }

    pub fn load<P: AsRef<Path>>(
        &self,
        name: &str,
        model_path: P,
        setters: &[InitializationOptionSetter],
    ) -> Result<Box<dyn Backend>> {
        self.get(name)?.load(model_path.as_ref(), setters)
    }

    pub fn load_with_options<P: AsRef<Path>>(
        &self,
        name: &str,
        model_path: P,
        options: InitializationOptions,
    ) -> Result<Box<dyn Backend>> {
        self.get(name)?.load_with_options(model_path.as_ref(), options)
    }

    fn get(&self, name: &str) -> Result<Arc<dyn ErasedInitializer>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| InitError::UnknownBackend(name.to_owned()))
    }
}

impl fmt::Debug for InitializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitializerRegistry")
            .field("backends", &self.names())
            .finish()
    }
}

// Process-wide instance + free functions.
mod service;
pub use service::{
    load_backend, load_backend_defaults, load_backend_with_options, register_backend_initializer,
    registered_backends,
};
