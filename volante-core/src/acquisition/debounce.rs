//! Per-line press suppression
//!
//! After a press is accepted on a line, further presses on the same line
//! are ignored until the window has elapsed. A zero window accepts every
//! press, which keeps pure edge-triggered behaviour.

use heapless::FnvIndexMap;

use volante_protocol::SourceId;

/// Maximum number of distinct lines tracked (must be a power of two)
pub const MAX_TRACKED_LINES: usize = 32;

/// Suppression window tracker
#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: u32,
    last_accepted: FnvIndexMap<SourceId, u64, MAX_TRACKED_LINES>,
}

impl Debouncer {
    /// Create a tracker with the given window (ms)
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted: FnvIndexMap::new(),
        }
    }

    /// Suppression window (ms)
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Decide whether a press on `line` at `at_ms` counts
    pub fn accept(&mut self, line: SourceId, at_ms: u64) -> bool {
        if self.window_ms == 0 {
            return true;
        }

        if let Some(&last) = self.last_accepted.get(&line) {
            if at_ms.saturating_sub(last) < u64::from(self.window_ms) {
                return false;
            }
        }

        // Table full: accept untracked rather than suppress a real press
        let _ = self.last_accepted.insert(line, at_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_window_accepts_everything() {
        let mut debouncer = Debouncer::new(0);
        assert!(debouncer.accept(2, 0));
        assert!(debouncer.accept(2, 0));
        assert!(debouncer.accept(2, 1));
    }

    #[test]
    fn test_bounce_is_suppressed() {
        let mut debouncer = Debouncer::new(30);
        assert!(debouncer.accept(2, 1000));
        assert!(!debouncer.accept(2, 1005));
        assert!(!debouncer.accept(2, 1029));
        assert!(debouncer.accept(2, 1030));
    }

    #[test]
    fn test_lines_are_independent() {
        let mut debouncer = Debouncer::new(30);
        assert!(debouncer.accept(2, 1000));
        assert!(debouncer.accept(3, 1001));
        assert!(!debouncer.accept(3, 1002));
    }

    #[test]
    fn test_suppressed_press_does_not_extend_window() {
        let mut debouncer = Debouncer::new(30);
        assert!(debouncer.accept(4, 0));
        assert!(!debouncer.accept(4, 20));
        assert!(debouncer.accept(4, 30));
    }
}
