//! Functional option setters and the merge that applies them.

use std::fmt;
use std::sync::Arc;

/// A single option mutation over a record of type `R`.
///
/// `Fixed` holds a plain function pointer so flag setters can live in `const`
/// items; `Shared` holds a capturing closure (the value being assigned).
/// Applying a setter is an in-place field assignment and cannot fail.
pub enum OptionSetter<R> {
    Fixed(fn(&mut R)),
    Shared(Arc<dyn Fn(&mut R) + Send + Sync>),
}

impl<R> OptionSetter<R> {
    /// Wrap a capturing closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut R) + Send + Sync + 'static,
    {
        Self::Shared(Arc::new(f))
    }

    /// Wrap a plain function; usable in `const` context.
    #[inline]
    pub const fn fixed(f: fn(&mut R)) -> Self {
        Self::Fixed(f)
    }

    /// Mutate `target` in place.
    #[inline]
    pub fn apply(&self, target: &mut R) {
        match self {
            Self::Fixed(f) => f(target),
            Self::Shared(f) => f(target),
        }
    }
}

// Manual impls: derives would demand `R: Clone` / `R: Debug`.
impl<R> Clone for OptionSetter<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(f) => Self::Fixed(*f),
            Self::Shared(f) => Self::Shared(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for OptionSetter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(_) => f.write_str("OptionSetter::Fixed"),
            Self::Shared(_) => f.write_str("OptionSetter::Shared"),
        }
    }
}

impl<R> From<fn(&mut R)> for OptionSetter<R> {
    #[inline]
    fn from(f: fn(&mut R)) -> Self {
        Self::Fixed(f)
    }
}

/// Apply `setters` to `base` left to right and return the result.
///
/// `base` is taken by value, so the caller's record is never touched. When two
/// setters target the same field the later one wins. An empty slice returns
/// `base` as-is.
pub fn merge_options<R>(mut base: R, setters: &[OptionSetter<R>]) -> R {
    for setter in setters {
        setter.apply(&mut base);
    }
    base
}

/// Returns a closure that merges setters onto a fresh copy of `defaults`
/// every time it is called.
pub fn merger_from_default<R>(defaults: R) -> impl Fn(&[OptionSetter<R>]) -> R
where
    R: Clone,
{
    move |setters| merge_options(defaults.clone(), setters)
}
