//! Tessera ABI crate: option records and contracts shared by the host and
//! every backend implementation.

pub mod backend;
pub mod options;
pub mod setter;
pub mod token;

pub use backend::*;
pub use options::{
    InitializationOptionSetter, InitializationOptions, PredictionOptionSetter, PredictionOptions,
    initialization_merger, merge_initialization_options, merge_prediction_options,
    prediction_merger,
};
pub use setter::*;
pub use token::*;
