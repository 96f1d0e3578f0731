//! In-flight flag for a form's submit button
//!
//! Requests are never de-duplicated. The only protection against a double
//! submit is that the button stays disabled while a guard is alive.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub struct SubmitControl {
    in_flight: Arc<AtomicBool>,
}

impl SubmitControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another submit from this control is still running
    pub fn try_begin(&self) -> Option<SubmitGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    /// Whether the submit button should render as disabled
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Re-enables the submit button when dropped
#[derive(Debug)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_submit_at_a_time() {
        let control = SubmitControl::new();
        assert!(!control.is_loading());

        let guard = control.try_begin().unwrap();
        assert!(control.is_loading());
        assert!(control.try_begin().is_none());
        assert!(control.clone().try_begin().is_none());

        drop(guard);
        assert!(!control.is_loading());
        assert!(control.try_begin().is_some());
    }
}
