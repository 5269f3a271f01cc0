//! RP2040-specific HAL for the wheel controller firmware
//!
//! This crate provides RP2040-specific implementations:
//! - `volante-hal` traits for embassy-rp GPIO, ADC and UART drivers
//! - ADC and UART pin-mapping tables usable in `const` board checks

#![no_std]

pub mod adc;
pub mod gpio;
pub mod uart;

pub use adc::AdcChannel;
pub use gpio::{is_valid_gpio, lines_are_distinct};
pub use uart::{rp_config, tx_gpio_to_uart, UartId};
