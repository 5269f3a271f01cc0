//! Outbound packets
//!
//! A packet is one reading from one source. Buttons use their hardware line
//! number as source id; the pedals and the encoder use fixed ids agreed with
//! the host out of band. All of them share one `u8` namespace.

/// Source identifier on the wire
pub type SourceId = u8;

/// Value sent for a momentary button press
pub const BUTTON_PRESSED: i16 = 1;

/// One reading headed for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutboundPacket {
    /// Which producer this reading belongs to
    pub source_id: SourceId,
    /// Producer-defined value
    pub value: i16,
}

impl OutboundPacket {
    /// Create a packet from raw parts
    pub const fn new(source_id: SourceId, value: i16) -> Self {
        Self { source_id, value }
    }

    /// Button press on `line`
    pub const fn button_press(line: SourceId) -> Self {
        Self::new(line, BUTTON_PRESSED)
    }

    /// Raw pedal sample on `channel_id`
    ///
    /// ADC samples are 12-bit, so they always fit; anything larger saturates
    /// at `i16::MAX` instead of wrapping negative.
    pub const fn pedal(channel_id: SourceId, raw: u16) -> Self {
        let value = if raw > i16::MAX as u16 {
            i16::MAX
        } else {
            raw as i16
        };
        Self::new(channel_id, value)
    }

    /// Encoder position shifted into a non-negative transmission range
    ///
    /// `position + offset` saturates at the `i16` bounds.
    pub const fn encoder(encoder_id: SourceId, position: i32, offset: i32) -> Self {
        let shifted = position.saturating_add(offset);
        let value = if shifted > i16::MAX as i32 {
            i16::MAX
        } else if shifted < i16::MIN as i32 {
            i16::MIN
        } else {
            shifted as i16
        };
        Self::new(encoder_id, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_press_value() {
        let packet = OutboundPacket::button_press(3);
        assert_eq!(packet.source_id, 3);
        assert_eq!(packet.value, 1);
    }

    #[test]
    fn test_pedal_full_scale() {
        assert_eq!(OutboundPacket::pedal(26, 4095).value, 4095);
        assert_eq!(OutboundPacket::pedal(26, 0).value, 0);
    }

    #[test]
    fn test_pedal_saturates() {
        assert_eq!(OutboundPacket::pedal(26, u16::MAX).value, i16::MAX);
    }

    #[test]
    fn test_encoder_offset() {
        assert_eq!(OutboundPacket::encoder(15, -50, 50).value, 0);
        assert_eq!(OutboundPacket::encoder(15, 0, 50).value, 50);
        assert_eq!(OutboundPacket::encoder(15, 50, 50).value, 100);
    }
}
