use crate::options::InitializationOptions;

/// Minimal surface every constructed backend exposes.
///
/// The generic initializer does not need this; only the name-keyed registry
/// does, since it hands out `Box<dyn Backend>`.
pub trait Backend: Send {
    /// Short identifier, e.g. "llama".
    fn name(&self) -> &str;

    /// Release native resources early. Dropping the backend must also be safe.
    fn close(&mut self) -> Result<(), String> {
        Ok(())
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn close(&mut self) -> Result<(), String> {
        (**self).close()
    }
}

/// Which initialization options a backend actually honours.
///
/// Purely informational: options are always passed through untouched and the
/// backend ignores what it cannot use. Hosts can use this to warn the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializationCapabilities {
    pub supports_context_size: bool,
    pub supports_seed: bool,
    pub supports_n_batch: bool,
    pub supports_f16_memory: bool,
    pub supports_mlock: bool,
    pub supports_mmap: bool,
    pub supports_embeddings: bool,
    /// Covers `n_gpu_layers`, `main_gpu` and `tensor_split`.
    pub supports_gpu_offload: bool,
    pub supports_low_vram: bool,
}

impl Default for InitializationCapabilities {
    fn default() -> Self {
        Self::all()
    }
}

impl InitializationCapabilities {
    pub const fn all() -> Self {
        Self {
            supports_context_size: true,
            supports_seed: true,
            supports_n_batch: true,
            supports_f16_memory: true,
            supports_mlock: true,
            supports_mmap: true,
            supports_embeddings: true,
            supports_gpu_offload: true,
            supports_low_vram: true,
        }
    }

    /// CPU-only backend: everything except GPU offload and low-VRAM mode.
    pub const fn cpu_only() -> Self {
        Self {
            supports_gpu_offload: false,
            supports_low_vram: false,
            ..Self::all()
        }
    }

    /// Names of fields set away from their zero value that this backend
    /// declared it does not support. Order follows the struct layout.
    pub fn unsupported_fields(&self, opts: &InitializationOptions) -> Vec<&'static str> {
        let checks = [
            (self.supports_context_size, opts.context_size != 0, "context_size"),
            (self.supports_seed, opts.seed != 0, "seed"),
            (self.supports_n_batch, opts.n_batch != 0, "n_batch"),
            (self.supports_f16_memory, opts.f16_memory, "f16_memory"),
            (self.supports_mlock, opts.mlock, "mlock"),
            (self.supports_mmap, opts.mmap, "mmap"),
            (self.supports_embeddings, opts.embeddings, "embeddings"),
            (self.supports_gpu_offload, opts.n_gpu_layers != 0, "n_gpu_layers"),
            (self.supports_gpu_offload, !opts.main_gpu.is_empty(), "main_gpu"),
            (self.supports_gpu_offload, !opts.tensor_split.is_empty(), "tensor_split"),
            (self.supports_low_vram, opts.low_vram, "low_vram"),
        ];
        checks
            .into_iter()
            .filter(|(supported, set, _)| !supported && *set)
            .map(|(_, _, name)| name)
            .collect()
    }
}
