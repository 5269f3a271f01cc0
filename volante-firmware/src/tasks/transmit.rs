//! Host serial transmit task
//!
//! Lowest priority. Sends one frame per dequeued packet; a failed write is
//! logged and the frame is lost.

use defmt::*;
use embassy_rp::uart::{Blocking, UartTx};

use volante_core::transmit::Transmitter;

use crate::channels::OutboundReceiver;

#[embassy_executor::task]
pub async fn transmit_task(
    mut transmitter: Transmitter<UartTx<'static, Blocking>>,
    outbound: OutboundReceiver,
) {
    info!("Transmit task started");

    loop {
        match transmitter.transmit_next(&outbound).await {
            Ok(packet) => trace!("Sent {}", packet),
            Err(e) => warn!(
                "Failed to send frame for source {}: {:?}",
                e.packet.source_id, e.error
            ),
        }
    }
}
