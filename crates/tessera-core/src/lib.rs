//! Tessera core: builds backends from a model path plus functional options.
//!
//! - `initializer`: `BackendInitializer<B, E>`, the per-backend binder of
//!   default options and constructor.
//! - `registry`: name-keyed, type-erased initializers (local + process-wide).
//! - `env`: `TESSERA_*` environment overrides as setters.

pub mod env;
pub mod errors;
pub mod initializer;
pub mod registry;

pub use env::{initialization_setters_from, initialization_setters_from_env};
pub use errors::{InitError, Result};
pub use initializer::{BackendInitializer, Constructor};
pub use registry::{
    InitializerRegistry, load_backend, load_backend_defaults, load_backend_with_options,
    register_backend_initializer, registered_backends,
};

// Re-export the shared contracts so backends only need one dependency.
pub use tessera_abi as abi;
