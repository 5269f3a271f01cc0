//! GPIO trait implementations for embassy-rp pins
//!
//! Button lines and the encoder lines are `Input`s with pull-ups; the
//! indicator LED is an `Output`. Edge waits are serviced by embassy-rp's
//! `IO_IRQ_BANK0` handler, which wakes the waiting future.

use embassy_rp::gpio::{Input, Output};
use volante_hal::{EdgeInput, InputPin, OutputPin};

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Check that `pin` exists on the RP2040 user bank
pub const fn is_valid_gpio(pin: u8) -> bool {
    pin < GPIO_COUNT
}

/// Check that no line in `lines` is repeated or out of range
///
/// Usable in `const` assertions over a board pin table.
pub const fn lines_are_distinct(lines: &[u8]) -> bool {
    let mut i = 0;
    while i < lines.len() {
        if !is_valid_gpio(lines[i]) {
            return false;
        }
        let mut j = i + 1;
        while j < lines.len() {
            if lines[i] == lines[j] {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

impl InputPin for Input<'_> {
    fn is_high(&self) -> bool {
        Input::is_high(self)
    }
}

impl EdgeInput for Input<'_> {
    async fn wait_for_falling_edge(&mut self) {
        Input::wait_for_falling_edge(self).await
    }
}

impl OutputPin for Output<'_> {
    fn set_high(&mut self) {
        Output::set_high(self)
    }

    fn set_low(&mut self) {
        Output::set_low(self)
    }

    fn is_set_high(&self) -> bool {
        Output::is_set_high(self)
    }
}
