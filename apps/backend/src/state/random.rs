use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::rng::{RandomSource, RngSource};

/// Process-wide random source shared by every table.
///
/// Callers borrow it for one synchronous operation through [`Self::with`];
/// the lock is never held across an await.
#[derive(Clone)]
pub struct SharedRandom(Arc<Mutex<Box<dyn RandomSource + Send>>>);

impl SharedRandom {
    pub fn new(source: impl RandomSource + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(Box::new(source))))
    }

    /// `StdRng` from `seed`, or from OS entropy when `None`.
    pub fn seeded(seed: Option<u64>) -> Self {
        Self::new(RngSource::from_seed(seed))
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut dyn RandomSource) -> T) -> T {
        let mut source = self.0.lock();
        f(&mut **source)
    }
}

impl Default for SharedRandom {
    fn default() -> Self {
        Self::seeded(None)
    }
}

impl fmt::Debug for SharedRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedRandom").finish_non_exhaustive()
    }
}
