//! Volante Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the wheel controller
//! pipeline depends on. Chip-specific HALs (RP2040) implement them, and the
//! `mock` feature provides in-memory versions for host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  volante-core / volante-firmware        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  volante-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ volante-hal-  │       │  mock (tests) │
//! │    rp2040     │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::EdgeInput`], [`gpio::OutputPin`] - Digital I/O
//! - [`adc::AnalogInput`] - Analog sampling
//! - [`uart::UartTx`] - Serial transmit

#![cfg_attr(not(any(test, feature = "mock")), no_std)]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod uart;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::{EdgeInput, InputPin, OutputPin};
pub use uart::{UartConfig, UartTx};
