//! Analog input abstractions
//!
//! The pedals are plain potentiometers on ADC channels. One converter is
//! shared by several channels, so a read takes the channel to convert.

/// Analog-to-digital converter
pub trait AnalogInput {
    /// Channel handle type (one per pedal)
    type Channel;

    /// Error type for conversions
    type Error;

    /// Perform one blocking conversion on `channel`
    ///
    /// Returns the raw sample (0..=4095 for a 12-bit converter).
    fn read(&mut self, channel: &mut Self::Channel) -> Result<u16, Self::Error>;
}
