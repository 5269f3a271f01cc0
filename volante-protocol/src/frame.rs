//! Frame encoding and decoding for the wheel-to-host link.
//!
//! Frame format:
//! - SOURCE ID (1 byte): producer of the value
//! - VALUE (2 bytes): `i16`, little-endian
//! - END (1 byte): 0xFF end-of-packet marker

use crate::packet::OutboundPacket;

/// Size of every frame on the wire
pub const FRAME_SIZE: usize = 4;

/// End-of-packet marker in the last byte of a frame
pub const END_OF_PACKET: u8 = 0xFF;

/// Errors that can occur during frame encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Fewer than [`FRAME_SIZE`] bytes available
    Incomplete,
    /// Last byte is not [`END_OF_PACKET`]
    MissingEndMarker,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A serialized packet, ready to be written to the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame([u8; FRAME_SIZE]);

impl Frame {
    /// Serialize a packet
    pub const fn encode(packet: OutboundPacket) -> Self {
        let [lo, hi] = packet.value.to_le_bytes();
        Self([packet.source_id, lo, hi, END_OF_PACKET])
    }

    /// The frame bytes in wire order
    pub const fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }

    /// Copy this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let dest = buffer
            .get_mut(..FRAME_SIZE)
            .ok_or(FrameError::BufferTooSmall)?;
        dest.copy_from_slice(&self.0);
        Ok(FRAME_SIZE)
    }

    /// Reconstruct the packet carried by the first [`FRAME_SIZE`] bytes
    ///
    /// This is the receiver's view of the wire contract: `value` is rebuilt
    /// as `lo | hi << 8` reinterpreted as `i16`.
    pub fn decode(bytes: &[u8]) -> Result<OutboundPacket, FrameError> {
        let frame: &[u8; FRAME_SIZE] = bytes
            .get(..FRAME_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(FrameError::Incomplete)?;

        if frame[3] != END_OF_PACKET {
            return Err(FrameError::MissingEndMarker);
        }

        let value = (frame[1] as u16 | (frame[2] as u16) << 8) as i16;
        Ok(OutboundPacket::new(frame[0], value))
    }
}

impl From<OutboundPacket> for Frame {
    fn from(packet: OutboundPacket) -> Self {
        Self::encode(packet)
    }
}
