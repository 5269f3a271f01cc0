//! Indicator output
//!
//! A single LED driven from the indicator signal. The pulse timing lives in
//! the firmware task; this only knows how to turn the output on and off.

use volante_hal::OutputPin;

/// Electrical level that lights the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Pin level for the requested logical state
    pub const fn level(self, asserted: bool) -> bool {
        match self {
            Self::ActiveHigh => asserted,
            Self::ActiveLow => !asserted,
        }
    }
}

pub struct Indicator<P: OutputPin> {
    pin: P,
    polarity: Polarity,
}

impl<P: OutputPin> Indicator<P> {
    /// Take the pin and drive it to the off state
    pub fn new(mut pin: P, polarity: Polarity) -> Self {
        pin.set_state(polarity.level(false));
        Self { pin, polarity }
    }

    pub fn assert(&mut self) {
        self.pin.set_state(self.polarity.level(true));
    }

    pub fn deassert(&mut self) {
        self.pin.set_state(self.polarity.level(false));
    }

    pub fn is_asserted(&self) -> bool {
        self.pin.is_set_high() == self.polarity.level(true)
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use volante_hal::mock::MockOutput;

    #[test]
    fn test_starts_deasserted() {
        let led = Indicator::new(MockOutput::new(), Polarity::ActiveHigh);
        assert!(!led.is_asserted());
        assert_eq!(led.pin().history(), &[false]);
    }

    #[test]
    fn test_pulse_active_high() {
        let mut led = Indicator::new(MockOutput::new(), Polarity::ActiveHigh);
        led.assert();
        assert!(led.is_asserted());
        led.deassert();
        assert_eq!(led.pin().history(), &[false, true, false]);
    }

    #[test]
    fn test_active_low_inverts() {
        let mut led = Indicator::new(MockOutput::new(), Polarity::ActiveLow);
        assert!(!led.is_asserted());
        led.assert();
        assert!(led.is_asserted());
        assert_eq!(led.pin().history(), &[true, false]);
    }
}
