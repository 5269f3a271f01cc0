//! Indicator LED task
//!
//! Holds the LED on for a fixed time each time the signal fires. Signals
//! that arrive during a pulse collapse into at most one further pulse.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Timer};

use volante_core::indicator::Indicator;

use crate::channels::IndicatorSignal;

#[embassy_executor::task]
pub async fn indicator_task(
    mut indicator: Indicator<Output<'static>>,
    signal: &'static IndicatorSignal,
    pulse_ms: u32,
) {
    info!("Indicator task started");

    let pulse = Duration::from_millis(pulse_ms.into());

    loop {
        signal.wait().await;
        indicator.assert();
        Timer::after(pulse).await;
        indicator.deassert();
    }
}
