//! Digital input capture
//!
//! Turns button falling edges into [`RawInputEvent`]s on the raw input
//! queue. This runs in interrupt context, so the hand-off never blocks and
//! never allocates: when the queue is full the edge is dropped and counted.
//! No debouncing happens here, but every event carries the time its edge was
//! seen so the debouncer downstream can judge bounce by edge spacing.
//!
//! Each line is waited on by its own [`ButtonLine::wait_for_edge`] loop.
//! An edge is only latched while its line has a wait armed, so sharing one
//! waiter between lines would lose edges that land together.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use portable_atomic::{AtomicU32, Ordering};

use volante_hal::EdgeInput;
use volante_protocol::SourceId;

/// A falling edge on a button line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawInputEvent {
    /// Hardware line the edge was seen on
    pub line: SourceId,
    /// Capture time in milliseconds since boot
    pub at_ms: u64,
}

/// A monitored button and the line id it reports as
pub struct ButtonLine<P> {
    /// Line number, also the button's source id on the wire
    pub line: SourceId,
    /// Edge-triggered input the button is wired to
    pub pin: P,
}

impl<P> ButtonLine<P> {
    /// Pair a pin with the line id its presses report
    pub const fn new(line: SourceId, pin: P) -> Self {
        Self { line, pin }
    }
}

impl<P: EdgeInput> ButtonLine<P> {
    /// Wait for the next falling edge on this line and return its id
    pub async fn wait_for_edge(&mut self) -> SourceId {
        self.pin.wait_for_falling_edge().await;
        self.line
    }
}

/// Producer side of the raw input queue, safe to use from interrupt context
///
/// Shared by every line's capture loop.
pub struct EdgeCapture<'a, M: RawMutex, const N: usize> {
    queue: Sender<'a, M, RawInputEvent, N>,
    dropped: AtomicU32,
}

impl<'a, M: RawMutex, const N: usize> EdgeCapture<'a, M, N> {
    /// Create a capture stage feeding `queue`
    pub const fn new(queue: Sender<'a, M, RawInputEvent, N>) -> Self {
        Self {
            queue,
            dropped: AtomicU32::new(0),
        }
    }

    /// Record a falling edge on `line` seen at `at_ms`
    ///
    /// Returns `false` when the queue was full and the edge was dropped.
    pub fn on_falling_edge(&self, line: SourceId, at_ms: u64) -> bool {
        match self.queue.try_send(RawInputEvent { line, at_ms }) {
            Ok(()) => true,
            Err(_) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Total edges dropped since start-up (or the last [`take_dropped`](Self::take_dropped))
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Read and reset the dropped-edge counter
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }
}
