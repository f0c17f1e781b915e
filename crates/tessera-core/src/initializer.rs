//! Generic binder of a backend's default options and its constructor.

use std::any::type_name;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::InitError;
use tessera_abi::{
    InitializationCapabilities, InitializationOptionSetter, InitializationOptions,
    merge_initialization_options,
};

/// `(model_path, options) -> backend | error`, supplied by each backend.
pub type Constructor<B, E> =
    dyn Fn(&Path, InitializationOptions) -> Result<B, E> + Send + Sync + 'static;

/// Each backend crate exports one of these, with `B` its backend wrapper.
///
/// Built once at setup time and never mutated afterwards; every call works on
/// its own copy of the defaults, so one initializer can be shared freely.
/// Errors come straight from the constructor, without wrapping or retry.
pub struct BackendInitializer<B, E = InitError> {
    defaults: InitializationOptions,
    constructor: Arc<Constructor<B, E>>,
    capabilities: Option<InitializationCapabilities>,
}

impl<B, E> BackendInitializer<B, E> {
    pub fn new<F>(defaults: InitializationOptions, constructor: F) -> Self
    where
        F: Fn(&Path, InitializationOptions) -> Result<B, E> + Send + Sync + 'static,
    {
        Self {
            defaults,
            constructor: Arc::new(constructor),
            capabilities: None,
        }
    }

    /// Declare which options the backend honours. Only used for warnings;
    /// options are still passed through untouched.
    pub fn with_capabilities(mut self, capabilities: InitializationCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Bake `setters` into the stored defaults. Meant for setup time, e.g.
    /// applying environment overrides before the initializer is shared.
    pub fn with_default_setters(mut self, setters: &[InitializationOptionSetter]) -> Self {
        self.defaults = merge_initialization_options(self.defaults, setters);
        self
    }

    #[inline]
    pub fn default_options(&self) -> &InitializationOptions {
        &self.defaults
    }

    #[inline]
    pub fn capabilities(&self) -> Option<InitializationCapabilities> {
        self.capabilities
    }

    /// The record `load` would hand to the constructor for these setters.
    pub fn resolve(&self, setters: &[InitializationOptionSetter]) -> InitializationOptions {
        merge_initialization_options(self.defaults.clone(), setters)
    }

    /// Construct with the stored defaults as-is.
    pub fn load_defaults<P: AsRef<Path>>(&self, model_path: P) -> Result<B, E> {
        self.construct(model_path.as_ref(), self.defaults.clone(), "defaults")
    }

    /// Construct with the stored defaults overridden by `setters`, applied in order.
    pub fn load<P: AsRef<Path>>(
        &self,
        model_path: P,
        setters: &[InitializationOptionSetter],
    ) -> Result<B, E> {
        self.construct(model_path.as_ref(), self.resolve(setters), "setters")
    }

    /// Construct with exactly `options`; the stored defaults are not consulted.
    pub fn load_with_options<P: AsRef<Path>>(
        &self,
        model_path: P,
        options: InitializationOptions,
    ) -> Result<B, E> {
        self.construct(model_path.as_ref(), options, "explicit")
    }

    fn construct(
        &self,
        model_path: &Path,
        options: InitializationOptions,
        entry: &'static str,
    ) -> Result<B, E> {
        let backend = type_name::<B>();
        if let Some(caps) = &self.capabilities {
            let ignored = caps.unsupported_fields(&options);
            if !ignored.is_empty() {
                warn!(backend, ?ignored, "backend will ignore these initialization options");
            }
        }
        debug!(backend, entry, model_path = %model_path.display(), "constructing backend");
        (self.constructor)(model_path, options)
    }
}

impl<B, E> Clone for BackendInitializer<B, E> {
    fn clone(&self) -> Self {
        Self {
            defaults: self.defaults.clone(),
            constructor: Arc::clone(&self.constructor),
            capabilities: self.capabilities,
        }
    }
}

impl<B, E> fmt::Debug for BackendInitializer<B, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendInitializer")
            .field("backend", &type_name::<B>())
            .field("defaults", &self.defaults)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
