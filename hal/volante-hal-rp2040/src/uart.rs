//! UART transmit support
//!
//! RP2040 has two UART peripherals (UART0 and UART1). The host link uses a
//! blocking transmitter; there is no receive direction.

use embassy_rp::uart::{self, Blocking};
use volante_hal::uart::{DataBits, Parity, StopBits};
use volante_hal::{UartConfig, UartTx};

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

/// Determine which UART can transmit on a given GPIO pin
///
/// RP2040 has fixed TX pin mappings for each UART.
pub const fn tx_gpio_to_uart(gpio: u8) -> Option<UartId> {
    // UART0 TX: GPIO 0, 12, 16, 28
    // UART1 TX: GPIO 4, 8, 20, 24
    match gpio {
        0 | 12 | 16 | 28 => Some(UartId::Uart0),
        4 | 8 | 20 | 24 => Some(UartId::Uart1),
        _ => None,
    }
}

/// Build an embassy-rp UART configuration
pub fn rp_config(config: &UartConfig) -> uart::Config {
    let mut rp = uart::Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    rp.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    rp
}

impl UartTx for uart::UartTx<'_, Blocking> {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), uart::Error> {
        self.blocking_write(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_pin_mapping() {
        assert_eq!(tx_gpio_to_uart(0), Some(UartId::Uart0));
        assert_eq!(tx_gpio_to_uart(8), Some(UartId::Uart1));
        assert_eq!(tx_gpio_to_uart(1), None);
    }
}
