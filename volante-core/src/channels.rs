//! Inter-task communication channels
//!
//! Types for the three shared resources of the pipeline. They are not
//! statics: the firmware constructs each one once at start-up and hands
//! references to the tasks that use them.
//!
//! ```text
//! capture ──► RawInputQueue ──► acquisition ──┐
//!                                             ├──► OutboundQueue ──► transmit
//!                                 encoder ────┘
//! acquisition ──► IndicatorSignal ──► indicator
//! ```

use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::signal::Signal;

use volante_protocol::OutboundPacket;

use crate::capture::RawInputEvent;

/// Falling-edge events from interrupt context to the acquisition task
pub type RawInputQueue<M, const N: usize> = Channel<M, RawInputEvent, N>;

/// Packets from every producer to the transmit task
pub type OutboundQueue<M, const N: usize> = Channel<M, OutboundPacket, N>;

/// Producer handle on the outbound queue
pub type OutboundSender<'a, M, const N: usize> = Sender<'a, M, OutboundPacket, N>;

/// Consumer handle on the outbound queue
pub type OutboundReceiver<'a, M, const N: usize> = Receiver<'a, M, OutboundPacket, N>;

/// Binary signal that pulses the indicator
pub type IndicatorSignal<M> = Signal<M, ()>;
