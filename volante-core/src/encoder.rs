//! Rotary encoder decoding
//!
//! Polls the clock and data lines of a quadrature encoder and turns clock
//! falling edges into position steps. Each update goes through two limits
//! before anything is emitted:
//!
//! 1. Jump limit: the new position may not move more than `max_jump` away
//!    from the last *transmitted* position.
//! 2. Range clamp: the position stays within `[min_position, max_position]`.
//!
//! A packet is produced only when the limited position differs from the last
//! transmitted one.

use embassy_sync::blocking_mutex::raw::RawMutex;

use volante_hal::InputPin;
use volante_protocol::{OutboundPacket, SourceId};

use crate::channels::OutboundSender;
use crate::config::EncoderConfig;

/// Decoder state, owned by the encoder task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderState {
    /// Clock level seen on the previous poll
    pub last_clk_level: bool,
    /// Current position
    pub position: i32,
    /// Position carried by the last emitted packet
    pub last_sent: i32,
}

/// Rotation direction of one detected step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    /// Direction at a clock falling edge, from the data line level
    ///
    /// Data differing from the (now low) clock means increase.
    pub const fn at_falling_edge(clk: bool, dt: bool) -> Self {
        if dt != clk {
            Self::Increase
        } else {
            Self::Decrease
        }
    }
}

/// Quadrature decoder with jump limiting and range clamping
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    source_id: SourceId,
    config: EncoderConfig,
    state: EncoderState,
}

impl QuadratureDecoder {
    /// Create a decoder at position 0
    ///
    /// `initial_clk` is the clock level at start-up, so a line that is
    /// already low does not register as a step on the first poll.
    pub const fn new(source_id: SourceId, config: EncoderConfig, initial_clk: bool) -> Self {
        Self {
            source_id,
            config,
            state: EncoderState {
                last_clk_level: initial_clk,
                position: 0,
                last_sent: 0,
            },
        }
    }

    /// Current decoder state
    pub fn state(&self) -> &EncoderState {
        &self.state
    }

    /// Feed one sample of both lines
    pub fn update(&mut self, clk: bool, dt: bool) -> Option<OutboundPacket> {
        let falling = self.state.last_clk_level && !clk;
        self.state.last_clk_level = clk;

        if !falling {
            return None;
        }

        let delta = match Direction::at_falling_edge(clk, dt) {
            Direction::Increase => self.config.step,
            Direction::Decrease => -self.config.step,
        };
        self.apply(delta)
    }

    /// Sample the pins and feed the result to [`update`](Self::update)
    pub fn poll<P: InputPin>(&mut self, clk: &P, dt: &P) -> Option<OutboundPacket> {
        self.update(clk.is_high(), dt.is_high())
    }

    /// Poll the pins and queue the resulting packet, if any
    ///
    /// Waits while the outbound queue is full; a position change is never
    /// dropped.
    pub async fn poll_and_send<P: InputPin, M: RawMutex, const N: usize>(
        &mut self,
        clk: &P,
        dt: &P,
        outbound: &OutboundSender<'_, M, N>,
    ) -> Option<OutboundPacket> {
        let packet = self.poll(clk, dt)?;
        outbound.send(packet).await;
        Some(packet)
    }

    /// Apply a raw position change through both limits
    ///
    /// Several steps folded into one `delta` are capped as a single update.
    pub fn apply(&mut self, delta: i32) -> Option<OutboundPacket> {
        let EncoderConfig {
            max_jump,
            min_position,
            max_position,
            offset,
            ..
        } = self.config;
        let last_sent = self.state.last_sent;

        let tentative = self.state.position.saturating_add(delta);
        let limited = tentative
            .min(last_sent.saturating_add(max_jump))
            .max(last_sent.saturating_sub(max_jump));
        let position = limited.min(max_position).max(min_position);
        self.state.position = position;

        if position == last_sent {
            return None;
        }

        self.state.last_sent = position;
        Some(OutboundPacket::encoder(self.source_id, position, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControllerConfig;
    use core::pin::pin;
    use core::task::Poll;
    use embassy_futures::{block_on, poll_once};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;
    use proptest::prelude::*;
    use volante_hal::mock::MockInput;

    const ID: SourceId = 15;
    const CONFIG: EncoderConfig = ControllerConfig::DEFAULT.encoder;

    fn decoder() -> QuadratureDecoder {
        QuadratureDecoder::new(ID, CONFIG, true)
    }

    /// One full clock cycle: high then low, with `dt` held
    fn step(decoder: &mut QuadratureDecoder, dt: bool) -> Option<OutboundPacket> {
        decoder.update(true, dt);
        decoder.update(false, dt)
    }

    #[test]
    fn test_single_step_up() {
        let mut dec = decoder();
        assert_eq!(step(&mut dec, true), Some(OutboundPacket::new(ID, 52)));
        assert_eq!(dec.state().position, 2);
        assert_eq!(dec.state().last_sent, 2);
    }

    #[test]
    fn test_single_step_down() {
        let mut dec = decoder();
        assert_eq!(step(&mut dec, false), Some(OutboundPacket::new(ID, 48)));
        assert_eq!(dec.state().position, -2);
    }

    #[test]
    fn test_no_edge_no_packet() {
        let mut dec = decoder();
        assert_eq!(dec.update(true, true), None);
        assert_eq!(dec.update(true, false), None);
        // Rising edge is not a step
        dec.update(false, false);
        assert_eq!(dec.update(true, false), None);
        assert_eq!(dec.state().position, -2);
    }

    #[test]
    fn test_initial_low_clock_is_not_a_step() {
        let mut dec = QuadratureDecoder::new(ID, CONFIG, false);
        assert_eq!(dec.update(false, true), None);
        assert_eq!(dec.state().position, 0);
    }

    #[test]
    fn test_burst_is_jump_limited() {
        let mut dec = decoder();
        // Ten steps of +2 folded into one update
        assert_eq!(dec.apply(20), Some(OutboundPacket::new(ID, 54)));
        assert_eq!(dec.state().position, 4);
        assert_eq!(dec.state().last_sent, 4);
    }

    #[test]
    fn test_range_clamped_at_top() {
        let mut dec = decoder();
        for _ in 0..40 {
            step(&mut dec, true);
        }
        assert_eq!(dec.state().position, 50);
        assert_eq!(step(&mut dec, true), None);
        assert_eq!(dec.state().last_sent, 50);
    }

    #[test]
    fn test_range_clamped_at_bottom() {
        let mut dec = decoder();
        let mut last = None;
        for _ in 0..40 {
            if let Some(packet) = step(&mut dec, false) {
                last = Some(packet);
            }
        }
        assert_eq!(last, Some(OutboundPacket::new(ID, 0)));
        assert_eq!(dec.state().position, -50);
    }

    #[test]
    fn test_reversal_emits() {
        let mut dec = decoder();
        step(&mut dec, true);
        assert_eq!(step(&mut dec, false), Some(OutboundPacket::new(ID, 50)));
    }

    #[test]
    fn test_poll_reads_pins() {
        let clk = MockInput::new(true);
        let dt = MockInput::new(true);
        let mut dec = QuadratureDecoder::new(ID, CONFIG, clk.is_high());

        assert_eq!(dec.poll(&clk, &dt), None);
        clk.set_level(false);
        assert_eq!(dec.poll(&clk, &dt), Some(OutboundPacket::new(ID, 52)));
        assert_eq!(dec.poll(&clk, &dt), None);
    }

    #[test]
    fn test_send_waits_on_full_queue() {
        let queue: Channel<NoopRawMutex, OutboundPacket, 1> = Channel::new();
        let pedal = OutboundPacket::new(26, 4095);
        queue.try_send(pedal).unwrap();
        let sender = queue.sender();

        let clk = MockInput::new(true);
        let dt = MockInput::new(true);
        let mut dec = QuadratureDecoder::new(ID, CONFIG, clk.is_high());
        clk.set_level(false);

        let mut send = pin!(dec.poll_and_send(&clk, &dt, &sender));
        assert!(poll_once(send.as_mut()).is_pending());
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.try_receive(), Ok(pedal));
        assert_eq!(
            poll_once(send.as_mut()),
            Poll::Ready(Some(OutboundPacket::new(ID, 52)))
        );
        assert_eq!(queue.try_receive(), Ok(OutboundPacket::new(ID, 52)));
    }

    #[test]
    fn test_send_without_step_queues_nothing() {
        let queue: Channel<NoopRawMutex, OutboundPacket, 1> = Channel::new();
        let clk = MockInput::new(true);
        let dt = MockInput::new(false);
        let mut dec = QuadratureDecoder::new(ID, CONFIG, clk.is_high());

        assert_eq!(block_on(dec.poll_and_send(&clk, &dt, &queue.sender())), None);
        assert!(queue.is_empty());
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_range(samples in prop::collection::vec(any::<(bool, bool)>(), 0..400)) {
            let mut dec = decoder();
            for (clk, dt) in samples {
                dec.update(clk, dt);
                let position = dec.state().position;
                prop_assert!((CONFIG.min_position..=CONFIG.max_position).contains(&position));
            }
        }

        #[test]
        fn prop_consecutive_packets_within_jump(deltas in prop::collection::vec(-40i32..=40, 0..200)) {
            let mut dec = decoder();
            let mut previous = CONFIG.offset;
            for delta in deltas {
                if let Some(packet) = dec.apply(delta) {
                    let value = i32::from(packet.value);
                    prop_assert!((value - previous).abs() <= CONFIG.max_jump);
                    prop_assert!((0..=100).contains(&value));
                    previous = value;
                }
            }
        }

        #[test]
        fn prop_packet_only_on_change(samples in prop::collection::vec(any::<(bool, bool)>(), 0..200)) {
            let mut dec = decoder();
            for (clk, dt) in samples {
                let before = dec.state().last_sent;
                match dec.update(clk, dt) {
                    Some(packet) => {
                        prop_assert_ne!(dec.state().last_sent, before);
                        prop_assert_eq!(i32::from(packet.value), dec.state().last_sent + CONFIG.offset);
                    }
                    None => prop_assert_eq!(dec.state().last_sent, before),
                }
            }
        }
    }
}
