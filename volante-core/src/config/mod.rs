//! Configuration types
//!
//! Board-agnostic compile-time configuration. [`ControllerConfig::DEFAULT`]
//! holds the reference design; [`ControllerConfig::validate`] is a `const fn`
//! so a bad configuration fails the build instead of misbehaving on the
//! wheel.

pub mod types;

pub use types::*;

use volante_hal::UartConfig;
use volante_protocol::SourceId;

/// Raw input queue capacity in the reference design
pub const RAW_INPUT_QUEUE_CAPACITY: usize = 32;

/// Outbound queue capacity in the reference design
pub const OUTBOUND_QUEUE_CAPACITY: usize = 32;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Two producers would share a source id
    DuplicateSourceId(SourceId),
    /// `min_position` is not below `max_position`
    EmptyEncoderRange,
    /// Position 0 (the start position) lies outside the encoder range
    StartOutsideRange,
    /// Step is not positive or exceeds the whole range
    InvalidStep,
    /// Max jump is not positive
    InvalidJump,
    /// Step is larger than max jump, so every step would be clipped
    StepExceedsJump,
    /// `position + offset` would not fit the `i16` wire value
    OffsetOverflow,
    /// A task period is zero
    ZeroInterval,
    /// The indicator trigger is not a monitored button line
    UnknownIndicatorLine(SourceId),
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    pub timing: TimingConfig,
    pub encoder: EncoderConfig,
    pub sources: SourceIds,
    pub buttons: ButtonConfig,
    pub serial: UartConfig,
}

impl ControllerConfig {
    /// Reference design values
    pub const DEFAULT: Self = Self {
        timing: TimingConfig {
            event_wait_ms: 100,
            pedal_interval_ms: 100,
            encoder_poll_ms: 1,
            indicator_pulse_ms: 200,
        },
        encoder: EncoderConfig {
            step: 2,
            max_jump: 4,
            min_position: -50,
            max_position: 50,
            offset: 50,
        },
        sources: SourceIds {
            accelerator: 26,
            brake: 27,
            encoder: 15,
        },
        buttons: ButtonConfig {
            debounce_ms: 0,
            indicator_line: Some(4),
        },
        serial: UartConfig::with_baudrate(115_200),
    };

    /// Check internal consistency against the monitored `button_lines`
    pub const fn validate(&self, button_lines: &[SourceId]) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if timing.event_wait_ms == 0
            || timing.pedal_interval_ms == 0
            || timing.encoder_poll_ms == 0
            || timing.indicator_pulse_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }

        let encoder = &self.encoder;
        if encoder.min_position >= encoder.max_position {
            return Err(ConfigError::EmptyEncoderRange);
        }
        if encoder.min_position > 0 || encoder.max_position < 0 {
            return Err(ConfigError::StartOutsideRange);
        }
        let span = encoder.max_position as i64 - encoder.min_position as i64;
        if encoder.step <= 0 || encoder.step as i64 > span {
            return Err(ConfigError::InvalidStep);
        }
        if encoder.max_jump <= 0 {
            return Err(ConfigError::InvalidJump);
        }
        if encoder.step > encoder.max_jump {
            return Err(ConfigError::StepExceedsJump);
        }
        let low = encoder.min_position as i64 + encoder.offset as i64;
        let high = encoder.max_position as i64 + encoder.offset as i64;
        if low < i16::MIN as i64 || high > i16::MAX as i64 {
            return Err(ConfigError::OffsetOverflow);
        }

        if let Some(id) = self.sources.duplicate() {
            return Err(ConfigError::DuplicateSourceId(id));
        }
        if let Some(id) = self.sources.collides_with(button_lines) {
            return Err(ConfigError::DuplicateSourceId(id));
        }
        let mut i = 0;
        while i < button_lines.len() {
            let mut j = i + 1;
            while j < button_lines.len() {
                if button_lines[i] == button_lines[j] {
                    return Err(ConfigError::DuplicateSourceId(button_lines[i]));
                }
                j += 1;
            }
            i += 1;
        }

        if let Some(line) = self.buttons.indicator_line {
            let mut k = 0;
            let mut found = false;
            while k < button_lines.len() {
                if button_lines[k] == line {
                    found = true;
                }
                k += 1;
            }
            if !found {
                return Err(ConfigError::UnknownIndicatorLine(line));
            }
        }

        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
