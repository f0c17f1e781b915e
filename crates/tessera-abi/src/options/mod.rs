//! Option records shared by every backend, plus one setter per field.
//!
//! These are deliberately a *superset* of what any single backend consumes.
//! A backend reads the fields it understands and ignores the rest.

// One setter per field: `name => field: Type`. Copy values are captured as-is.
macro_rules! copy_setters {
    ($record:ty; $( $(#[$doc:meta])* $name:ident => $field:ident : $ty:ty ),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(value: $ty) -> $crate::setter::OptionSetter<$record> {
                $crate::setter::OptionSetter::new(move |p: &mut $record| p.$field = value)
            }
        )*
    };
}

// Same, for `String` fields; accepts anything `Into<String>`.
macro_rules! string_setters {
    ($record:ty; $( $(#[$doc:meta])* $name:ident => $field:ident ),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(value: impl Into<String>) -> $crate::setter::OptionSetter<$record> {
                let value: String = value.into();
                $crate::setter::OptionSetter::new(move |p: &mut $record| p.$field.clone_from(&value))
            }
        )*
    };
}

pub mod init;
pub mod predict;

// Setters stay under `init::` / `predict::`; both records have e.g. `set_mlock`.
pub use init::{
    InitializationOptionSetter, InitializationOptions, initialization_merger,
    merge_initialization_options,
};
pub use predict::{
    PredictionOptionSetter, PredictionOptions, merge_prediction_options, prediction_merger,
};
