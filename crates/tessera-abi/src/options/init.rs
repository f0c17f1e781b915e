use serde::{Deserialize, Serialize};

use crate::setter::{OptionSetter, merge_options, merger_from_default};

/// How a backend should load and prepare a model.
///
/// Every field defaults to its zero value. A fresh copy is handed to the
/// backend constructor on each construction call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitializationOptions {
    pub context_size: i32,
    pub seed: i32,
    pub n_batch: i32,
    pub f16_memory: bool,
    pub mlock: bool,
    pub mmap: bool,
    pub embeddings: bool,
    /// Layers to offload to the GPU.
    pub n_gpu_layers: i32,
    pub main_gpu: String,
    /// Comma-separated split ratios across GPUs, backend-interpreted.
    pub tensor_split: String,
    pub low_vram: bool,
}

pub type InitializationOptionSetter = OptionSetter<InitializationOptions>;

copy_setters! { InitializationOptions;
    /// Context window size.
    set_context => context_size: i32,
    set_model_seed => seed: i32,
    set_n_batch => n_batch: i32,
    /// Number of layers to offload to the GPU.
    set_gpu_layers => n_gpu_layers: i32,
    set_mmap => mmap: bool,
    set_mlock => mlock: bool,
    set_f16_memory => f16_memory: bool,
    set_embeddings => embeddings: bool,
    set_low_vram => low_vram: bool,
}

string_setters! { InitializationOptions;
    set_main_gpu => main_gpu,
    set_tensor_split => tensor_split,
}

pub const ENABLE_EMBEDDINGS: InitializationOptionSetter =
    OptionSetter::fixed(|p: &mut InitializationOptions| p.embeddings = true);
pub const ENABLE_F16_MEMORY: InitializationOptionSetter =
    OptionSetter::fixed(|p: &mut InitializationOptions| p.f16_memory = true);
pub const ENABLE_MLOCK: InitializationOptionSetter =
    OptionSetter::fixed(|p: &mut InitializationOptions| p.mlock = true);
pub const ENABLE_LOW_VRAM: InitializationOptionSetter =
    OptionSetter::fixed(|p: &mut InitializationOptions| p.low_vram = true);

/// Apply `setters` to `base` in order. `base` is consumed, never shared.
#[inline]
pub fn merge_initialization_options(
    base: InitializationOptions,
    setters: &[InitializationOptionSetter],
) -> InitializationOptions {
    merge_options(base, setters)
}

/// Merge function bound to a copy of `defaults`.
pub fn initialization_merger(
    defaults: InitializationOptions,
) -> impl Fn(&[InitializationOptionSetter]) -> InitializationOptions {
    merger_from_default(defaults)
}
