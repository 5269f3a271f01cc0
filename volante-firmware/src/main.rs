//! Volante - Sim-Racing Wheel Controller Firmware
//!
//! Main firmware binary for RP2040-based steering wheels. Buttons, two
//! pedals and a rotary encoder are multiplexed onto one serial link as
//! 4-byte frames.
//!
//! Priorities, highest first:
//!
//! | Executor          | Interrupt  | Tasks                |
//! |-------------------|------------|----------------------|
//! | capture           | SWI_IRQ_2  | edge capture, 1/line |
//! | acquisition       | SWI_IRQ_1  | buttons + pedals     |
//! | encoder           | SWI_IRQ_0  | encoder polling      |
//! | thread (main)     | -          | transmit, indicator  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::uart::UartTx;
use embassy_sync::channel::Channel;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use volante_core::acquisition::{Acquisition, PedalInputs};
use volante_core::capture::{ButtonLine, EdgeCapture};
use volante_core::encoder::QuadratureDecoder;
use volante_core::transmit::Transmitter;
use volante_hal_rp2040::rp_config;

use crate::board::BUTTON_LINES;
use crate::channels::{Capture, Outbound, RawInputs};
use crate::config::CONFIG;

mod board;
mod channels;
mod config;
mod tasks;

static EXECUTOR_CAPTURE: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_ACQUISITION: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_ENCODER: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_2() {
    EXECUTOR_CAPTURE.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_ACQUISITION.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_ENCODER.on_interrupt()
}

// Pipeline resources, created once at start-up
static RAW_INPUTS: StaticCell<RawInputs> = StaticCell::new();
static OUTBOUND: StaticCell<Outbound> = StaticCell::new();
static CAPTURE: StaticCell<Capture> = StaticCell::new();
#[cfg(feature = "indicator")]
static INDICATOR: StaticCell<channels::IndicatorSignal> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Volante firmware starting...");
    info!("Config: {}", CONFIG);

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let raw_inputs: &'static RawInputs = RAW_INPUTS.init(Channel::new());
    let outbound: &'static Outbound = OUTBOUND.init(Channel::new());
    let capture: &'static Capture = CAPTURE.init(EdgeCapture::new(raw_inputs.sender()));

    #[cfg(feature = "indicator")]
    let indicator: Option<&'static channels::IndicatorSignal> = {
        let signal: &'static channels::IndicatorSignal =
            INDICATOR.init(embassy_sync::signal::Signal::new());
        Some(signal)
    };
    #[cfg(not(feature = "indicator"))]
    let indicator: Option<&'static channels::IndicatorSignal> = None;

    // Buttons (board::BUTTON_LINES), active low with pull-ups
    let buttons = [
        ButtonLine::new(BUTTON_LINES[0], Input::new(p.PIN_2, Pull::Up)),
        ButtonLine::new(BUTTON_LINES[1], Input::new(p.PIN_3, Pull::Up)),
        ButtonLine::new(BUTTON_LINES[2], Input::new(p.PIN_4, Pull::Up)),
        ButtonLine::new(BUTTON_LINES[3], Input::new(p.PIN_5, Pull::Up)),
    ];

    // Pedals (board::ACCELERATOR_GPIO / BRAKE_GPIO)
    let pedals = PedalInputs {
        adc: Adc::new_blocking(p.ADC, adc::Config::default()),
        accelerator: adc::Channel::new_pin(p.PIN_26, Pull::None),
        brake: adc::Channel::new_pin(p.PIN_27, Pull::None),
    };
    let acquisition = Acquisition::new(pedals, &CONFIG);

    // Encoder (board::ENCODER_CLK / ENCODER_DT)
    let clk = Input::new(p.PIN_15, Pull::Up);
    let dt = Input::new(p.PIN_14, Pull::Up);
    let decoder = QuadratureDecoder::new(CONFIG.sources.encoder, CONFIG.encoder, clk.is_high());

    // Host link (board::UART_TX_GPIO)
    let uart = UartTx::new_blocking(p.UART0, p.PIN_0, rp_config(&CONFIG.serial));
    let transmitter = Transmitter::new(uart);
    info!("UART initialized at {} baud", CONFIG.serial.baudrate);

    interrupt::SWI_IRQ_2.set_priority(Priority::P1);
    let capture_spawner = EXECUTOR_CAPTURE.start(interrupt::SWI_IRQ_2);
    for button in buttons {
        unwrap!(capture_spawner.spawn(tasks::capture_task(button, capture)));
    }

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let acquisition_spawner = EXECUTOR_ACQUISITION.start(interrupt::SWI_IRQ_1);
    unwrap!(acquisition_spawner.spawn(tasks::acquisition_task(
        acquisition,
        raw_inputs.receiver(),
        capture,
        outbound.sender(),
        indicator,
        CONFIG.timing,
    )));

    interrupt::SWI_IRQ_0.set_priority(Priority::P3);
    let encoder_spawner = EXECUTOR_ENCODER.start(interrupt::SWI_IRQ_0);
    unwrap!(encoder_spawner.spawn(tasks::encoder_task(
        decoder,
        clk,
        dt,
        outbound.sender(),
        CONFIG.timing.encoder_poll_ms,
    )));

    unwrap!(spawner.spawn(tasks::transmit_task(transmitter, outbound.receiver())));

    #[cfg(feature = "indicator")]
    if let Some(signal) = indicator {
        use embassy_rp::gpio::{Level, Output};
        use volante_core::indicator::{Indicator, Polarity};

        // Indicator LED (board::INDICATOR_GPIO)
        let led = Indicator::new(Output::new(p.PIN_7, Level::Low), Polarity::ActiveHigh);
        unwrap!(spawner.spawn(tasks::indicator_task(
            led,
            signal,
            CONFIG.timing.indicator_pulse_ms,
        )));
    }

    info!("All tasks spawned");
}
