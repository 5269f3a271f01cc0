//! Encoder polling task

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use volante_core::encoder::QuadratureDecoder;

use crate::channels::OutboundSender;

/// Encoder task - polls both lines every `poll_ms`
#[embassy_executor::task]
pub async fn encoder_task(
    mut decoder: QuadratureDecoder,
    clk: Input<'static>,
    dt: Input<'static>,
    outbound: OutboundSender,
    poll_ms: u32,
) {
    info!("Encoder task started ({} ms poll)", poll_ms);

    let mut ticker = Ticker::every(Duration::from_millis(poll_ms.into()));

    loop {
        if decoder.poll_and_send(&clk, &dt, &outbound).await.is_some() {
            trace!("Encoder position {}", decoder.state().position);
        }

        ticker.next().await;
    }
}
