use std::fmt;
use std::sync::Arc;

/// Per-token hook a caller hands to a backend through `PredictionOptions`.
///
/// The backend calls it once per produced token, in order, passing the UTF-8
/// fragment. Returning `false` asks the backend to stop generating.
#[derive(Clone)]
pub struct TokenCallback(Arc<dyn Fn(&str) -> bool + Send + Sync>);

impl TokenCallback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Forward one produced token; `true` means keep going.
    #[inline]
    pub fn call(&self, token: &str) -> bool {
        (self.0)(token)
    }
}

// Two callbacks are equal only if they are the same allocation.
impl PartialEq for TokenCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TokenCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenCallback(..)")
    }
}
