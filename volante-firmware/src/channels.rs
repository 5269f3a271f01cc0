//! Concrete types for the shared pipeline resources
//!
//! Nothing here is a static. `main` creates each resource once in a
//! `StaticCell` and hands the `'static` references to the tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel;

use volante_core::capture::{EdgeCapture, RawInputEvent};
use volante_core::channels::{self as core_channels, OutboundQueue, RawInputQueue};

use crate::config::{OUTBOUND_QUEUE_CAPACITY, RAW_INPUT_QUEUE_CAPACITY};

/// Queues are shared across interrupt executors, so they need a real lock
pub type Mutex = CriticalSectionRawMutex;

pub type RawInputs = RawInputQueue<Mutex, RAW_INPUT_QUEUE_CAPACITY>;
pub type RawInputReceiver = channel::Receiver<'static, Mutex, RawInputEvent, RAW_INPUT_QUEUE_CAPACITY>;

pub type Outbound = OutboundQueue<Mutex, OUTBOUND_QUEUE_CAPACITY>;
pub type OutboundSender = core_channels::OutboundSender<'static, Mutex, OUTBOUND_QUEUE_CAPACITY>;
pub type OutboundReceiver = core_channels::OutboundReceiver<'static, Mutex, OUTBOUND_QUEUE_CAPACITY>;

pub type Capture = EdgeCapture<'static, Mutex, RAW_INPUT_QUEUE_CAPACITY>;

pub type IndicatorSignal = core_channels::IndicatorSignal<Mutex>;
