//! Shared holder for the latest streamed ask

use rust_decimal::Decimal;
use std::sync::{Arc, RwLock};

/// Latest streamed ask, shared between the feed task and the evaluation loop.
///
/// One writer, any number of readers. The lock is held only for the copy, so
/// a reader can never observe a torn write, and it is never held across an
/// await point.
#[derive(Clone, Debug, Default)]
pub struct PriceCell {
    inner: Arc<RwLock<Option<Decimal>>>,
}

impl PriceCell {
    /// Create an empty cell; `get` returns `None` until the first tick
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest price, overwriting any prior value
    pub fn set(&self, price: Decimal) {
        *self.inner.write().expect("price cell lock poisoned") = Some(price);
    }

    /// Return the most recently stored price, if any
    pub fn get(&self) -> Option<Decimal> {
        *self.inner.read().expect("price cell lock poisoned")
    }
}
