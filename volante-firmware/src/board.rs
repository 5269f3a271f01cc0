//! Board pin table
//!
//! GPIO numbers for the reference wheel. Buttons report their line number
//! as source id, so `BUTTON_LINES` doubles as the button part of the wire
//! namespace. The peripherals taken in `main` must match these numbers.

use volante_hal_rp2040::{lines_are_distinct, tx_gpio_to_uart, AdcChannel, UartId};

/// Button lines: gear up, gear down, ignition, lights
pub const BUTTON_COUNT: usize = 4;
pub const BUTTON_LINES: [u8; BUTTON_COUNT] = [2, 3, 4, 5];

/// Encoder clock line
pub const ENCODER_CLK: u8 = 15;
/// Encoder data line
pub const ENCODER_DT: u8 = 14;

/// Accelerator pedal (ADC0)
pub const ACCELERATOR_GPIO: u8 = 26;
/// Brake pedal (ADC1)
pub const BRAKE_GPIO: u8 = 27;

/// Serial TX to the host
pub const UART_TX_GPIO: u8 = 0;

/// Indicator LED
pub const INDICATOR_GPIO: u8 = 7;

const PINS: [u8; 10] = [
    BUTTON_LINES[0],
    BUTTON_LINES[1],
    BUTTON_LINES[2],
    BUTTON_LINES[3],
    ENCODER_CLK,
    ENCODER_DT,
    ACCELERATOR_GPIO,
    BRAKE_GPIO,
    UART_TX_GPIO,
    INDICATOR_GPIO,
];

const _: () = assert!(lines_are_distinct(&PINS), "pin out of range or assigned twice");
const _: () = assert!(
    AdcChannel::is_adc_gpio(ACCELERATOR_GPIO) && AdcChannel::is_adc_gpio(BRAKE_GPIO),
    "pedals must be on ADC-capable pins"
);
const _: () = assert!(
    matches!(tx_gpio_to_uart(UART_TX_GPIO), Some(UartId::Uart0)),
    "serial TX must be a UART0 TX pin"
);
