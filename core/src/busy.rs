//! Reference-counted busy state.
//!
//! Several operations can be in flight at once but the view has a single busy
//! indicator. The indicator goes up with the first operation and comes down
//! with the last one. Per-item markers are counted the same way, so two quick
//! clicks on one post keep its marker until both requests finish.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct BusyState {
    in_flight: usize,
    items: HashMap<u64, usize>,
}

impl BusyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation. Returns true if the state went from idle to busy.
    pub fn begin(&mut self) -> bool {
        self.in_flight += 1;
        self.in_flight == 1
    }

    /// Unregister an operation. Returns true if the state went back to idle.
    pub fn end(&mut self) -> bool {
        match self.in_flight {
            0 => false,
            n => {
                self.in_flight = n - 1;
                self.in_flight == 0
            }
        }
    }

    /// Returns true if `id` just became busy.
    pub fn begin_item(&mut self, id: u64) -> bool {
        let count = self.items.entry(id).or_insert(0);
        *count += 1;
        *count == 1
    }

    /// Returns true if `id` is no longer busy.
    pub fn end_item(&mut self, id: u64) -> bool {
        let Some(count) = self.items.get_mut(&id) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.items.remove(&id);
            return true;
        }
        false
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn is_item_busy(&self, id: u64) -> bool {
        self.items.contains_key(&id)
    }
}
