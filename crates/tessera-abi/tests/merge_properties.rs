//! Property tests for option merging.

use proptest::prelude::*;
use tessera_abi::options::init::{self, ENABLE_EMBEDDINGS, ENABLE_MLOCK};
use tessera_abi::options::predict;
use tessera_abi::{
    InitializationOptionSetter, InitializationOptions, PredictionOptionSetter, PredictionOptions,
    initialization_merger, merge_initialization_options, merge_prediction_options,
};

fn arb_init_options() -> impl Strategy<Value = InitializationOptions> {
    (
        (any::<i32>(), any::<i32>(), any::<i32>(), any::<i32>()),
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
        ("[0-9]{0,2}", "[0-9,]{0,6}"),
    )
        .prop_map(
            |(
                (context_size, seed, n_batch, n_gpu_layers),
                (f16_memory, mlock, mmap, embeddings, low_vram),
                (main_gpu, tensor_split),
            )| InitializationOptions {
                context_size,
                seed,
                n_batch,
                f16_memory,
                mlock,
                mmap,
                embeddings,
                n_gpu_layers,
                main_gpu,
                tensor_split,
                low_vram,
            },
        )
}

fn arb_init_setter() -> impl Strategy<Value = InitializationOptionSetter> {
    prop_oneof![
        any::<i32>().prop_map(init::set_context),
        any::<i32>().prop_map(init::set_model_seed),
        any::<i32>().prop_map(init::set_n_batch),
        any::<i32>().prop_map(init::set_gpu_layers),
        any::<bool>().prop_map(init::set_mmap),
        any::<bool>().prop_map(init::set_low_vram),
        "[0-9]{1,2}".prop_map(init::set_main_gpu),
        Just(ENABLE_MLOCK),
        Just(ENABLE_EMBEDDINGS),
    ]
}

// Finite floats only: NaN would make a record unequal to itself.
fn arb_prediction_options() -> impl Strategy<Value = PredictionOptions> {
    let ints = (
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        any::<i32>(),
        0i32..3,
    );
    let floats = (
        0.0f32..1.0,
        0.0f32..2.0,
        0.0f32..2.0,
        0.0f32..1.0,
        0.0f32..1.0,
        -2.0f32..2.0,
        -2.0f32..2.0,
        0.0f32..1.0,
        0.0f32..10.0,
    );
    let flags = (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    );
    let text = (
        "[0-9+-]{0,8}",
        "[a-z.]{0,8}",
        prop::collection::vec("[a-z<>/]{1,4}", 0..3),
        "[0-9]{0,2}",
        "[0-9,]{0,6}",
    );
    (ints, floats, flags, text).prop_map(
        |(
            (seed, threads, tokens, top_k, repeat, batch, n_keep, mirostat),
            (
                top_p,
                temperature,
                penalty,
                tail_free_sampling_z,
                typical_p,
                frequency_penalty,
                presence_penalty,
                mirostat_eta,
                mirostat_tau,
            ),
            (penalize_nl, f16_kv, debug_mode, ignore_eos, mlock, mmap, prompt_cache_all, prompt_cache_ro),
            (logit_bias, path_prompt_cache, stop_prompts, main_gpu, tensor_split),
        )| PredictionOptions {
            seed,
            threads,
            tokens,
            top_k,
            repeat,
            batch,
            n_keep,
            top_p,
            temperature,
            penalty,
            tail_free_sampling_z,
            typical_p,
            frequency_penalty,
            presence_penalty,
            mirostat,
            mirostat_eta,
            mirostat_tau,
            penalize_nl,
            logit_bias,
            f16_kv,
            debug_mode,
            ignore_eos,
            mlock,
            mmap,
            path_prompt_cache,
            prompt_cache_all,
            prompt_cache_ro,
            stop_prompts,
            token_callback: None,
            main_gpu,
            tensor_split,
        },
    )
}

fn arb_prediction_setter() -> impl Strategy<Value = PredictionOptionSetter> {
    prop_oneof![
        any::<i32>().prop_map(predict::set_seed),
        any::<i32>().prop_map(predict::set_tokens),
        any::<i32>().prop_map(predict::set_top_k),
        (0.0f32..2.0).prop_map(predict::set_temperature),
        (0.0f32..1.0).prop_map(predict::set_top_p),
        any::<bool>().prop_map(predict::set_memory_map),
        "[a-z.]{1,8}".prop_map(predict::set_path_prompt_cache),
        prop::collection::vec("[a-z]{1,4}", 0..3).prop_map(predict::set_stop_words),
        Just(predict::IGNORE_EOS),
        Just(predict::ENABLE_PROMPT_CACHE_ALL),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Merging never mutates the caller's record.
    #[test]
    fn prop_merge_leaves_base_untouched(
        base in arb_init_options(),
        setters in prop::collection::vec(arb_init_setter(), 0..12),
    ) {
        let snapshot = base.clone();
        let _ = merge_initialization_options(base.clone(), &setters);
        prop_assert_eq!(base, snapshot);
    }

    /// No setters: value-equal copy of the base.
    #[test]
    fn prop_empty_merge_is_identity(base in arb_init_options()) {
        prop_assert_eq!(merge_initialization_options(base.clone(), &[]), base);
    }

    /// Later setters on the same field win.
    #[test]
    fn prop_last_write_wins(
        base in arb_init_options(),
        first in any::<i32>(),
        second in any::<i32>(),
    ) {
        let out = merge_initialization_options(
            base.clone(),
            &[init::set_context(first), init::set_context(second)],
        );
        prop_assert_eq!(out.context_size, second);
        prop_assert_eq!(
            out,
            InitializationOptions { context_size: second, ..base }
        );
    }

    /// Same inputs, same output.
    #[test]
    fn prop_merge_is_deterministic(
        base in arb_init_options(),
        setters in prop::collection::vec(arb_init_setter(), 0..12),
    ) {
        let a = merge_initialization_options(base.clone(), &setters);
        let b = merge_initialization_options(base, &setters);
        prop_assert_eq!(a, b);
    }

    /// A merger bound to defaults behaves like merging onto a fresh copy.
    #[test]
    fn prop_merger_matches_direct_merge(
        defaults in arb_init_options(),
        setters in prop::collection::vec(arb_init_setter(), 0..8),
    ) {
        let merge = initialization_merger(defaults.clone());
        prop_assert_eq!(merge(&setters), merge_initialization_options(defaults.clone(), &setters));
        prop_assert_eq!(merge(&[]), defaults);
    }

    #[test]
    fn prop_prediction_last_write_wins(t1 in 0.0f32..2.0, t2 in 0.0f32..2.0, k in 1i32..100) {
        let out = merge_prediction_options(
            PredictionOptions::default(),
            &[predict::set_temperature(t1), predict::set_top_k(k), predict::set_temperature(t2)],
        );
        prop_assert_eq!(out.temperature, t2);
        prop_assert_eq!(out.top_k, k);
    }

    /// Merging never mutates the caller's prediction record.
    #[test]
    fn prop_prediction_merge_leaves_base_untouched(
        base in arb_prediction_options(),
        setters in prop::collection::vec(arb_prediction_setter(), 0..12),
    ) {
        let snapshot = base.clone();
        let _ = merge_prediction_options(base.clone(), &setters);
        prop_assert_eq!(base, snapshot);
    }

    #[test]
    fn prop_prediction_empty_merge_is_identity(base in arb_prediction_options()) {
        prop_assert_eq!(merge_prediction_options(base.clone(), &[]), base);
    }
}
