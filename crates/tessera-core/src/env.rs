//! Environment overrides for initialization defaults.
//!
//! `TESSERA_CONTEXT_SIZE=4096 TESSERA_MMAP=1 ...` turn into setters that a
//! host bakes into an initializer with `with_default_setters`. Unset
//! variables produce nothing; unparsable ones are skipped with a warning.

use tessera_abi::InitializationOptionSetter;
use tessera_abi::options::init::{
    set_context, set_embeddings, set_f16_memory, set_gpu_layers, set_low_vram, set_main_gpu,
    set_mlock, set_mmap, set_model_seed, set_n_batch, set_tensor_split,
};
use tracing::warn;

pub const ENV_PREFIX: &str = "TESSERA_";

enum Kind {
    Int(fn(i32) -> InitializationOptionSetter),
    Flag(fn(bool) -> InitializationOptionSetter),
    Text(fn(String) -> InitializationOptionSetter),
}

const VARS: &[(&str, Kind)] = &[
    ("CONTEXT_SIZE", Kind::Int(set_context)),
    ("SEED", Kind::Int(set_model_seed)),
    ("N_BATCH", Kind::Int(set_n_batch)),
    ("GPU_LAYERS", Kind::Int(set_gpu_layers)),
    ("MAIN_GPU", Kind::Text(|v| set_main_gpu(v))),
    ("TENSOR_SPLIT", Kind::Text(|v| set_tensor_split(v))),
    ("MMAP", Kind::Flag(set_mmap)),
    ("MLOCK", Kind::Flag(set_mlock)),
    ("F16_MEMORY", Kind::Flag(set_f16_memory)),
    ("EMBEDDINGS", Kind::Flag(set_embeddings)),
    ("LOW_VRAM", Kind::Flag(set_low_vram)),
];

/// Setters for every `TESSERA_*` variable present in the process environment.
pub fn initialization_setters_from_env() -> Vec<InitializationOptionSetter> {
    initialization_setters_from(|key| std::env::var(key).ok())
}

/// Same as [`initialization_setters_from_env`], reading through `lookup`.
/// Keys are passed with the prefix, e.g. `TESSERA_SEED`.
pub fn initialization_setters_from<F>(lookup: F) -> Vec<InitializationOptionSetter>
where
    F: Fn(&str) -> Option<String>,
{
    let mut setters = Vec::new();
    for (suffix, kind) in VARS {
        let key = format!("{ENV_PREFIX}{suffix}");
        let Some(raw) = lookup(&key) else { continue };
        let value = raw.trim();
        let setter = match kind {
            Kind::Int(make) => value.parse::<i32>().ok().map(make),
            Kind::Flag(make) => parse_flag(value).map(make),
            Kind::Text(make) => Some(make(value.to_owned())),
        };
        match setter {
            Some(s) => setters.push(s),
            None => warn!(var = %key, value = %raw, "ignoring unparsable override"),
        }
    }
    setters
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
