//! Acquisition task
//!
//! Waits a bounded time for a button event, then runs one acquisition cycle
//! and sleeps, so consecutive pedal samples are at most
//! `event_wait_ms + pedal_interval_ms` apart.

use defmt::*;
use embassy_rp::adc::{Adc, Blocking};
use embassy_time::{with_timeout, Duration, Timer};

use volante_core::acquisition::{Acquisition, EventOutcome};
use volante_core::config::TimingConfig;

use crate::channels::{Capture, IndicatorSignal, OutboundSender, RawInputReceiver};

#[embassy_executor::task]
pub async fn acquisition_task(
    mut acquisition: Acquisition<Adc<'static, Blocking>>,
    raw_inputs: RawInputReceiver,
    capture: &'static Capture,
    outbound: OutboundSender,
    indicator: Option<&'static IndicatorSignal>,
    timing: TimingConfig,
) {
    info!("Acquisition task started");

    let event_wait = Duration::from_millis(timing.event_wait_ms.into());
    let interval = Duration::from_millis(timing.pedal_interval_ms.into());

    loop {
        let event = with_timeout(event_wait, raw_inputs.receive()).await.ok();
        let report = acquisition.run_cycle(event, &outbound, indicator).await;

        match report.event {
            Some(EventOutcome::Press { packet, indicator }) => {
                debug!("Button {} pressed (indicator: {})", packet.source_id, indicator);
            }
            Some(EventOutcome::Suppressed(line)) => {
                debug!("Button {} press inside debounce window", line);
            }
            None => {}
        }

        for fault in report.faults.iter() {
            warn!("{} pedal read failed: {:?}", fault.pedal, fault.error);
        }

        let dropped = capture.take_dropped();
        if dropped > 0 {
            warn!("Raw input queue full, {} button edges dropped", dropped);
        }

        Timer::after(interval).await;
    }
}
