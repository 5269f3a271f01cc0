//! Wheel-to-Host Serial Protocol
//!
//! This crate defines the byte stream the wheel controller writes to its
//! serial link. Every input source (buttons, pedals, encoder) is multiplexed
//! onto one channel as a sequence of fixed-size frames.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌───────────┬──────────┬──────────┬──────┐
//! │ SOURCE ID │ VALUE LO │ VALUE HI │ 0xFF │
//! │ 1B        │ 1B       │ 1B       │ 1B   │
//! └───────────┴──────────┴──────────┴──────┘
//! ```
//!
//! The value is a little-endian `i16`. The trailing `0xFF` is positional,
//! not a delimiter: value bytes may also be `0xFF`, so a receiver must count
//! bytes in groups of four instead of scanning for the marker.
//!
//! The link is one-way (device to host). There is no handshake,
//! acknowledgement, or checksum.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod packet;

pub use frame::{Frame, FrameError, END_OF_PACKET, FRAME_SIZE};
pub use packet::{OutboundPacket, SourceId, BUTTON_PRESSED};
