//! Board-agnostic core logic for the Volante wheel controller
//!
//! Everything between the HAL traits and the wire that does not depend on a
//! particular chip:
//!
//! - Button edge capture into the raw input queue
//! - The acquisition cycle (button presses and pedal sampling)
//! - Quadrature decoding with jump limiting and range clamping
//! - Frame transmission
//! - The indicator output
//! - Configuration types and compile-time validation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod acquisition;
pub mod capture;
pub mod channels;
pub mod config;
pub mod encoder;
pub mod indicator;
pub mod transmit;
