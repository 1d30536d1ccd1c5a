//! Application state for the HR Policy Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::policy::{Clock, SystemClock};
use crate::store::Store;

/// Shared application state.
///
/// Holds the record store and the clock every handler reads the current
/// instant from.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates application state backed by the system clock.
    pub fn new(store: Store) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates application state with an explicit clock.
    pub fn with_clock(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(store),
            clock,
        }
    }

    /// Returns the record store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the current instant.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FixedClock;
    use chrono::TimeZone;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_now_reads_injected_clock() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 2, 1, 30, 0).unwrap();
        let clock = Arc::new(FixedClock::new(instant));
        let state = AppState::with_clock(Store::new(), clock.clone());

        assert_eq!(state.now(), instant);
        clock.set(instant + chrono::Duration::hours(1));
        assert_eq!(state.now(), instant + chrono::Duration::hours(1));
    }
}
