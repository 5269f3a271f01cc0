//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Digital output pin
///
/// Used for the indicator LED. Implementations handle the actual hardware
/// register manipulation for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin, sampled by polling
///
/// The encoder lines are read this way once per poll cycle.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Interrupt-driven digital input
///
/// Resolves when the hardware latches a falling edge on the line. On real
/// hardware the wake-up comes from the GPIO interrupt, and starting a wait
/// clears whatever edge was latched before it. An edge is therefore only
/// seen while a wait is armed, so every monitored line needs its own
/// waiter that is re-armed as soon as an edge has been handled.
#[allow(async_fn_in_trait)]
pub trait EdgeInput {
    /// Wait for the next high-to-low transition
    async fn wait_for_falling_edge(&mut self);
}
