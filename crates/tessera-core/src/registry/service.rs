use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::OnceCell;

use super::{ErasedInitializer, InitializerRegistry};
use crate::errors::{InitError, Result};
use crate::initializer::BackendInitializer;
use tessera_abi::{Backend, InitializationOptionSetter, InitializationOptions};

static REGISTRY: OnceCell<RwLock<InitializerRegistry>> = OnceCell::new();

#[inline]
fn registry() -> &'static RwLock<InitializerRegistry> {
    REGISTRY.get_or_init(|| RwLock::new(InitializerRegistry::new()))
}

// Clone the entry out so the constructor never runs under the lock.
fn lookup(name: &str) -> Result<Arc<dyn ErasedInitializer>> {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
}

/// Register a backend initializer process-wide (typically once at startup).
/// Returns `true` if an earlier registration under `name` was replaced.
pub fn register_backend_initializer<B, E>(
    name: impl Into<String>,
    initializer: BackendInitializer<B, E>,
) -> bool
where
    B: Backend + 'static,
    E: Into<InitError> + 'static,
{
    let name = name.into();
    tracing::debug!(backend = %name, "registering backend initializer");
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(name, initializer)
}

/// Names of all process-wide registrations, sorted.
pub fn registered_backends() -> Vec<String> {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .names()
}

pub fn load_backend_defaults<P: AsRef<Path>>(name: &str, model_path: P) -> Result<Box<dyn Backend>> {
    lookup(name)?.load_defaults(model_path.as_ref())
}

pub fn load_backend<P: AsRef<Path>>(
    name: &str,
    model_path: P,
    setters: &[InitializationOptionSetter],
) -> Result<Box<dyn Backend>> {
    lookup(name)?.load(model_path.as_ref(), setters)
}

pub fn load_backend_with_options<P: AsRef<Path>>(
    name: &str,
    model_path: P,
    options: InitializationOptions,
) -> Result<Box<dyn Backend>> {
    lookup(name)?.load_with_options(model_path.as_ref(), options)
}
