//! Serial transmission
//!
//! The single consumer of the outbound queue. Each packet becomes one
//! 4-byte frame written with a blocking write. There is no retry: a failed
//! write loses that frame and the next packet is sent as usual.

use embassy_sync::blocking_mutex::raw::RawMutex;

use volante_hal::UartTx;
use volante_protocol::{Frame, OutboundPacket};

use crate::channels::OutboundReceiver;

/// A frame that could not be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitError<E> {
    /// The packet whose frame was lost
    pub packet: OutboundPacket,
    pub error: E,
}

/// Frame writer over a serial transmitter
pub struct Transmitter<U: UartTx> {
    uart: U,
    frames_sent: u32,
}

impl<U: UartTx> Transmitter<U> {
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            frames_sent: 0,
        }
    }

    /// Frame and write one packet
    pub fn send(&mut self, packet: OutboundPacket) -> Result<(), TransmitError<U::Error>> {
        let frame = Frame::encode(packet);
        self.uart
            .write_blocking(frame.as_bytes())
            .map_err(|error| TransmitError { packet, error })?;
        self.frames_sent = self.frames_sent.wrapping_add(1);
        Ok(())
    }

    /// Wait for the next queued packet and send it
    pub async fn transmit_next<M: RawMutex, const N: usize>(
        &mut self,
        outbound: &OutboundReceiver<'_, M, N>,
    ) -> Result<OutboundPacket, TransmitError<U::Error>> {
        let packet = outbound.receive().await;
        self.send(packet)?;
        Ok(packet)
    }

    /// Frames written successfully (wraps)
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn into_inner(self) -> U {
        self.uart
    }
}
