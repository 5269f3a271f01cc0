//! ADC channel mapping and sampling
//!
//! RP2040 has a single ADC with four external inputs:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//!
//! The pedals sit on ADC0 (accelerator) and ADC1 (brake).

use embassy_rp::adc::{Adc, Blocking, Channel, Error};
use volante_hal::AnalogInput;

/// External ADC input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
}

impl AdcChannel {
    /// Get ADC channel from GPIO pin
    pub const fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }

    /// Check that `gpio` is routed to an ADC input
    pub const fn is_adc_gpio(gpio: u8) -> bool {
        Self::from_gpio(gpio).is_some()
    }
}

impl<'d> AnalogInput for Adc<'d, Blocking> {
    type Channel = Channel<'d>;
    type Error = Error;

    fn read(&mut self, channel: &mut Channel<'d>) -> Result<u16, Error> {
        self.blocking_read(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pedal_pins_are_adc() {
        assert_eq!(AdcChannel::from_gpio(26), Some(AdcChannel::Adc0));
        assert_eq!(AdcChannel::from_gpio(27), Some(AdcChannel::Adc1));
        assert!(!AdcChannel::is_adc_gpio(15));
    }

    #[test]
    fn test_only_bank_top_pins_are_adc() {
        let adc_pins: [u8; 4] = [26, 27, 28, 29];
        for gpio in 0..32u8 {
            assert_eq!(AdcChannel::is_adc_gpio(gpio), adc_pins.contains(&gpio));
        }
        assert_eq!(AdcChannel::from_gpio(29), Some(AdcChannel::Adc3));
    }
}
