//! Frame clock - turns absolute frame timestamps into elapsed deltas.
//!
//! The first reading after construction or [`FrameClock::rebase`] only records
//! the timestamp. This is what keeps paused wall-clock time out of the drop
//! counter: resuming re-bases instead of reporting one huge delta.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameClock {
    last_ms: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Forget the previous timestamp.
    pub fn rebase(&mut self) {
        self.last_ms = None;
    }

    /// Record `now_ms` and return the time since the previous reading.
    ///
    /// Returns `None` right after construction or a re-base. Timestamps that go
    /// backwards yield a zero delta.
    pub fn delta(&mut self, now_ms: u64) -> Option<u32> {
        let prev = self.last_ms.replace(now_ms)?;
        let elapsed = now_ms.saturating_sub(prev);
        Some(u32::try_from(elapsed).unwrap_or(u32::MAX))
    }
}
