//! Configuration type definitions
//!
//! Every value here is fixed at compile time. The firmware build script
//! generates a [`ControllerConfig`](super::ControllerConfig) constant from
//! `controller.toml`; nothing is reconfigured at runtime.

use volante_protocol::SourceId;

/// Task periods and timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Longest wait for a button event per acquisition cycle (ms)
    pub event_wait_ms: u32,
    /// Sleep after each acquisition cycle (ms)
    pub pedal_interval_ms: u32,
    /// Encoder poll period (ms)
    pub encoder_poll_ms: u32,
    /// How long the indicator stays on per signal (ms)
    pub indicator_pulse_ms: u32,
}

/// Quadrature decoder limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// Position change per detected step
    pub step: i32,
    /// Largest change allowed relative to the last transmitted position
    pub max_jump: i32,
    /// Lowest reachable position
    pub min_position: i32,
    /// Highest reachable position
    pub max_position: i32,
    /// Added to the position before transmission
    pub offset: i32,
}

/// Fixed source ids for the non-button producers
///
/// Buttons transmit their own line number, so these must not collide with
/// any monitored button line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SourceIds {
    /// Accelerator pedal channel
    pub accelerator: SourceId,
    /// Brake pedal channel
    pub brake: SourceId,
    /// Rotary encoder
    pub encoder: SourceId,
}

impl SourceIds {
    /// Check whether any fixed id equals one of `lines`
    pub const fn collides_with(&self, lines: &[SourceId]) -> Option<SourceId> {
        let fixed = [self.accelerator, self.brake, self.encoder];
        let mut i = 0;
        while i < fixed.len() {
            let mut j = 0;
            while j < lines.len() {
                if fixed[i] == lines[j] {
                    return Some(fixed[i]);
                }
                j += 1;
            }
            i += 1;
        }
        None
    }

    /// First fixed id shared by two producers, if any
    pub const fn duplicate(&self) -> Option<SourceId> {
        if self.accelerator == self.brake || self.accelerator == self.encoder {
            Some(self.accelerator)
        } else if self.brake == self.encoder {
            Some(self.brake)
        } else {
            None
        }
    }
}

/// Button handling options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Per-line suppression window after an accepted press (ms, 0 = off)
    pub debounce_ms: u32,
    /// Button line whose press pulses the indicator
    pub indicator_line: Option<SourceId>,
}
