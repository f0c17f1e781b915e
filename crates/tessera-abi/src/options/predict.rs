use serde::{Deserialize, Serialize};

use crate::setter::{OptionSetter, merge_options, merger_from_default};
use crate::token::TokenCallback;

/// Knobs for a single generation request.
///
/// Sampling values are passed through as-is; backends clamp or ignore what
/// they do not support.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionOptions {
    // Sampling
    pub seed: i32,
    pub threads: i32,
    pub tokens: i32,
    pub top_k: i32,
    pub repeat: i32,
    pub batch: i32,
    pub n_keep: i32,
    pub top_p: f32,
    pub temperature: f32,
    pub penalty: f32,
    pub tail_free_sampling_z: f32,
    pub typical_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    /// 0 = off, 1 = v1, 2 = v2.
    pub mirostat: i32,
    pub mirostat_eta: f32,
    pub mirostat_tau: f32,
    pub penalize_nl: bool,
    pub logit_bias: String,

    // Behaviour
    pub f16_kv: bool,
    pub debug_mode: bool,
    pub ignore_eos: bool,
    pub mlock: bool,
    pub mmap: bool,
    pub path_prompt_cache: String,
    pub prompt_cache_all: bool,
    pub prompt_cache_ro: bool,
    pub stop_prompts: Vec<String>,
    #[serde(skip)]
    pub token_callback: Option<TokenCallback>,

    pub main_gpu: String,
    pub tensor_split: String,
}

impl PredictionOptions {
    /// Hand `token` to the configured callback. With no callback set,
    /// generation always continues.
    #[inline]
    pub fn emit_token(&self, token: &str) -> bool {
        self.token_callback.as_ref().is_none_or(|cb| cb.call(token))
    }
}

pub type PredictionOptionSetter = OptionSetter<PredictionOptions>;

copy_setters! { PredictionOptions;
    /// Random seed for sampling.
    set_seed => seed: i32,
    set_threads => threads: i32,
    /// Number of tokens to generate.
    set_tokens => tokens: i32,
    set_top_k => top_k: i32,
    /// Nucleus sampling.
    set_top_p => top_p: f32,
    set_temperature => temperature: f32,
    /// Repetition penalty.
    set_penalty => penalty: f32,
    /// Window of recent tokens the repetition penalty looks at.
    set_repeat => repeat: i32,
    set_batch => batch: i32,
    /// Tokens from the initial prompt to keep when the context rolls over.
    set_n_keep => n_keep: i32,
    set_tail_free_sampling_z => tail_free_sampling_z: f32,
    set_typical_p => typical_p: f32,
    set_frequency_penalty => frequency_penalty: f32,
    set_presence_penalty => presence_penalty: f32,
    set_mirostat => mirostat: i32,
    set_mirostat_eta => mirostat_eta: f32,
    set_mirostat_tau => mirostat_tau: f32,
    set_penalize_nl => penalize_nl: bool,
    set_mlock => mlock: bool,
    set_memory_map => mmap: bool,
}

string_setters! { PredictionOptions;
    set_logit_bias => logit_bias,
    /// Session file used to store the prompt cache.
    set_path_prompt_cache => path_prompt_cache,
    set_prediction_main_gpu => main_gpu,
    set_prediction_tensor_split => tensor_split,
}

/// Replace the stop list. Generation halts once any of these is produced.
pub fn set_stop_words<I, S>(stop: I) -> PredictionOptionSetter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let stop: Vec<String> = stop.into_iter().map(Into::into).collect();
    OptionSetter::new(move |p: &mut PredictionOptions| p.stop_prompts.clone_from(&stop))
}

/// Install the per-token callback, replacing any earlier one.
pub fn set_token_callback<F>(f: F) -> PredictionOptionSetter
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    let cb = TokenCallback::new(f);
    OptionSetter::new(move |p: &mut PredictionOptions| p.token_callback = Some(cb.clone()))
}

pub const ENABLE_F16_KV: PredictionOptionSetter =
    OptionSetter::fixed(|p: &mut PredictionOptions| p.f16_kv = true);
pub const DEBUG: PredictionOptionSetter =
    OptionSetter::fixed(|p: &mut PredictionOptions| p.debug_mode = true);
pub const ENABLE_PROMPT_CACHE_ALL: PredictionOptionSetter =
    OptionSetter::fixed(|p: &mut PredictionOptions| p.prompt_cache_all = true);
pub const ENABLE_PROMPT_CACHE_RO: PredictionOptionSetter =
    OptionSetter::fixed(|p: &mut PredictionOptions| p.prompt_cache_ro = true);
pub const IGNORE_EOS: PredictionOptionSetter =
    OptionSetter::fixed(|p: &mut PredictionOptions| p.ignore_eos = true);

#[inline]
pub fn merge_prediction_options(
    base: PredictionOptions,
    setters: &[PredictionOptionSetter],
) -> PredictionOptions {
    merge_options(base, setters)
}

/// Merge function bound to a copy of `defaults`.
pub fn prediction_merger(
    defaults: PredictionOptions,
) -> impl Fn(&[PredictionOptionSetter]) -> PredictionOptions {
    merger_from_default(defaults)
}
