/*
[INPUT]:  User-triggered network calls from one screen
[OUTPUT]: Single-slot guard that rejects a second concurrent trigger
[POS]:    Screen layer - single-flight enforcement shared by login and board
[UPDATE]: When changing how overlapping triggers are handled
*/

use std::sync::atomic::{AtomicBool, Ordering};

use tasktrack_adapter::{Result, TasktrackError};

/// One in-flight slot per screen.
///
/// A trigger that arrives while the slot is taken fails with
/// [`TasktrackError::Busy`] and issues no request.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: AtomicBool,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the slot; it is released when the guard drops
    pub fn try_begin(&self) -> Result<InFlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| TasktrackError::Busy)?;
        Ok(InFlightGuard { slot: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct InFlightGuard<'a> {
    slot: &'a InFlight,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.slot.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_trigger_is_rejected() {
        let slot = InFlight::new();
        let guard = slot.try_begin().unwrap();
        assert!(slot.is_busy());
        assert!(matches!(slot.try_begin(), Err(TasktrackError::Busy)));

        drop(guard);
        assert!(!slot.is_busy());
        assert!(slot.try_begin().is_ok());
    }
}
