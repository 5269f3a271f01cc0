//! Acquisition cycle
//!
//! One cycle turns at most one raw button event into a press packet, then
//! samples both pedals unconditionally. Debouncing uses the time the edge
//! was captured, not the time the cycle dequeued it, so a bounce burst that
//! sits in the queue across several cycles still collapses to one press. Packets go onto the outbound queue in
//! a fixed order (button, accelerator, brake), and every send waits for room
//! rather than dropping: once an event has been dequeued it is never lost.
//!
//! The bounded wait for the event and the sleep between cycles belong to the
//! caller, which owns the timer.

pub mod debounce;

pub use debounce::Debouncer;

use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::Vec;

use volante_hal::AnalogInput;
use volante_protocol::{OutboundPacket, SourceId};

use crate::capture::RawInputEvent;
use crate::channels::{IndicatorSignal, OutboundSender};
use crate::config::{ControllerConfig, SourceIds};

/// Which pedal a reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pedal {
    Accelerator,
    Brake,
}

/// A pedal conversion that failed; its packet is skipped for the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogReadError<E> {
    pub pedal: Pedal,
    pub error: E,
}

/// The ADC and the two channels the pedals are wired to
pub struct PedalInputs<A: AnalogInput> {
    pub adc: A,
    pub accelerator: A::Channel,
    pub brake: A::Channel,
}

/// What happened to a dequeued button event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventOutcome {
    /// Turned into a press packet
    Press {
        packet: OutboundPacket,
        /// The line is the indicator trigger
        indicator: bool,
    },
    /// Ignored inside the line's debounce window
    Suppressed(SourceId),
}

/// Result of one pedal sampling pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedalSample<E> {
    /// Packets in send order (accelerator first)
    pub packets: Vec<OutboundPacket, 2>,
    pub faults: Vec<AnalogReadError<E>, 2>,
}

/// Summary of one [`Acquisition::run_cycle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport<E> {
    pub event: Option<EventOutcome>,
    pub pedals_sent: usize,
    pub faults: Vec<AnalogReadError<E>, 2>,
}

/// Acquisition task state
pub struct Acquisition<A: AnalogInput> {
    pedals: PedalInputs<A>,
    sources: SourceIds,
    debouncer: Debouncer,
    indicator_line: Option<SourceId>,
}

impl<A: AnalogInput> Acquisition<A> {
    /// Create the acquisition stage for the given pedal inputs
    pub fn new(pedals: PedalInputs<A>, config: &ControllerConfig) -> Self {
        Self {
            pedals,
            sources: config.sources,
            debouncer: Debouncer::new(config.buttons.debounce_ms),
            indicator_line: config.buttons.indicator_line,
        }
    }

    /// Map a raw button event to its press packet
    pub fn on_event(&mut self, event: RawInputEvent) -> EventOutcome {
        if !self.debouncer.accept(event.line, event.at_ms) {
            return EventOutcome::Suppressed(event.line);
        }

        EventOutcome::Press {
            packet: OutboundPacket::button_press(event.line),
            indicator: self.indicator_line == Some(event.line),
        }
    }

    /// Sample both pedals once
    pub fn sample_pedals(&mut self) -> PedalSample<A::Error> {
        let mut sample = PedalSample {
            packets: Vec::new(),
            faults: Vec::new(),
        };

        let PedalInputs {
            adc,
            accelerator,
            brake,
        } = &mut self.pedals;

        for (pedal, channel, id) in [
            (Pedal::Accelerator, accelerator, self.sources.accelerator),
            (Pedal::Brake, brake, self.sources.brake),
        ] {
            // Both vectors hold two entries and each pedal pushes to exactly one
            match adc.read(channel) {
                Ok(raw) => {
                    let _ = sample.packets.push(OutboundPacket::pedal(id, raw));
                }
                Err(error) => {
                    let _ = sample.faults.push(AnalogReadError { pedal, error });
                }
            }
        }

        sample
    }

    /// Run one cycle on an already-awaited event
    ///
    /// Sends the press packet (if any) before sampling, then the pedal
    /// packets. Each send waits while the outbound queue is full.
    pub async fn run_cycle<M: RawMutex, const N: usize>(
        &mut self,
        event: Option<RawInputEvent>,
        outbound: &OutboundSender<'_, M, N>,
        indicator: Option<&IndicatorSignal<M>>,
    ) -> CycleReport<A::Error> {
        let event = event.map(|event| self.on_event(event));

        if let Some(EventOutcome::Press { packet, indicator: trigger }) = event {
            outbound.send(packet).await;
            if trigger {
                if let Some(signal) = indicator {
                    signal.signal(());
                }
            }
        }

        let sample = self.sample_pedals();
        let pedals_sent = sample.packets.len();
        for packet in sample.packets {
            outbound.send(packet).await;
        }

        CycleReport {
            event,
            pedals_sent,
            faults: sample.faults,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::EdgeCapture;
    use core::pin::pin;
    use core::task::Poll;
    use embassy_futures::{block_on, poll_once};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;
    use embassy_sync::signal::Signal;
    use volante_hal::mock::{MockAdc, MockAdcChannel, MockAdcError};

    const ACCEL: SourceId = 26;
    const BRAKE: SourceId = 27;

    fn press(line: SourceId, at_ms: u64) -> RawInputEvent {
        RawInputEvent { line, at_ms }
    }

    fn acquisition(accel: Option<u16>, brake: Option<u16>) -> Acquisition<MockAdc> {
        let mut adc = MockAdc::new(2);
        adc.set_sample(0, accel);
        adc.set_sample(1, brake);
        Acquisition::new(
            PedalInputs {
                adc,
                accelerator: MockAdcChannel(0),
                brake: MockAdcChannel(1),
            },
            &ControllerConfig::DEFAULT,
        )
    }

    #[test]
    fn test_button_event_maps_to_press() {
        let mut acq = acquisition(Some(0), Some(0));
        assert_eq!(
            acq.on_event(press(3, 0)),
            EventOutcome::Press {
                packet: OutboundPacket::new(3, 1),
                indicator: false,
            }
        );
    }

    #[test]
    fn test_indicator_line_is_flagged() {
        let mut acq = acquisition(Some(0), Some(0));
        assert!(matches!(
            acq.on_event(press(4, 0)),
            EventOutcome::Press { indicator: true, .. }
        ));
    }

    #[test]
    fn test_pedals_sampled_in_order() {
        let mut acq = acquisition(Some(4095), Some(120));
        let sample = acq.sample_pedals();

        assert_eq!(
            sample.packets.as_slice(),
            &[
                OutboundPacket::new(ACCEL, 4095),
                OutboundPacket::new(BRAKE, 120)
            ]
        );
        assert!(sample.faults.is_empty());
    }

    #[test]
    fn test_pedal_fault_skips_only_that_channel() {
        let mut acq = acquisition(None, Some(800));
        let sample = acq.sample_pedals();

        assert_eq!(sample.packets.as_slice(), &[OutboundPacket::new(BRAKE, 800)]);
        assert_eq!(
            sample.faults.as_slice(),
            &[AnalogReadError {
                pedal: Pedal::Accelerator,
                error: MockAdcError,
            }]
        );
    }

    #[test]
    fn test_cycle_orders_button_before_pedals() {
        let queue: Channel<NoopRawMutex, OutboundPacket, 8> = Channel::new();
        let mut acq = acquisition(Some(1000), Some(2000));

        let report = block_on(acq.run_cycle(Some(press(2, 0)), &queue.sender(), None));

        assert_eq!(report.pedals_sent, 2);
        assert_eq!(queue.try_receive(), Ok(OutboundPacket::new(2, 1)));
        assert_eq!(queue.try_receive(), Ok(OutboundPacket::new(ACCEL, 1000)));
        assert_eq!(queue.try_receive(), Ok(OutboundPacket::new(BRAKE, 2000)));
        assert!(queue.try_receive().is_err());
    }

    #[test]
    fn test_cycle_without_event_still_samples() {
        let queue: Channel<NoopRawMutex, OutboundPacket, 8> = Channel::new();
        let mut acq = acquisition(Some(10), Some(20));

        let report = block_on(acq.run_cycle(None, &queue.sender(), None));

        assert_eq!(report.event, None);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_cycle_signals_indicator() {
        let queue: Channel<NoopRawMutex, OutboundPacket, 8> = Channel::new();
        let signal: Signal<NoopRawMutex, ()> = Signal::new();
        let mut acq = acquisition(Some(0), Some(0));

        block_on(acq.run_cycle(Some(press(5, 0)), &queue.sender(), Some(&signal)));
        assert!(!signal.signaled());

        block_on(acq.run_cycle(Some(press(4, 0)), &queue.sender(), Some(&signal)));
        assert!(signal.signaled());
    }

    fn debounced(debounce_ms: u32) -> Acquisition<MockAdc> {
        let mut config = ControllerConfig::DEFAULT;
        config.buttons.debounce_ms = debounce_ms;
        Acquisition::new(
            PedalInputs {
                adc: MockAdc::new(2),
                accelerator: MockAdcChannel(0),
                brake: MockAdcChannel(1),
            },
            &config,
        )
    }

    #[test]
    fn test_queued_bounce_collapses_across_cycles() {
        let raw: Channel<NoopRawMutex, RawInputEvent, 8> = Channel::new();
        let capture = EdgeCapture::new(raw.sender());
        let queue: Channel<NoopRawMutex, OutboundPacket, 16> = Channel::new();
        let mut acq = debounced(50);

        // Contact bounce: three edges within 2 ms, all queued before the
        // acquisition loop gets to them
        for at_ms in [1000, 1001, 1002] {
            assert!(capture.on_falling_edge(2, at_ms));
        }

        // One event per cycle, cycles 100 ms apart
        let outcomes: std::vec::Vec<_> = (0..3)
            .map(|_| {
                let event = raw.try_receive().ok();
                block_on(acq.run_cycle(event, &queue.sender(), None)).event
            })
            .collect();

        assert_eq!(
            outcomes,
            [
                Some(EventOutcome::Press {
                    packet: OutboundPacket::button_press(2),
                    indicator: false,
                }),
                Some(EventOutcome::Suppressed(2)),
                Some(EventOutcome::Suppressed(2)),
            ]
        );
        // One press plus two pedal packets per cycle
        assert_eq!(queue.len(), 7);
    }

    #[test]
    fn test_press_after_window_is_accepted() {
        let queue: Channel<NoopRawMutex, OutboundPacket, 16> = Channel::new();
        let mut acq = debounced(50);

        block_on(acq.run_cycle(Some(press(2, 1000)), &queue.sender(), None));
        let report = block_on(acq.run_cycle(Some(press(2, 1050)), &queue.sender(), None));

        assert!(matches!(report.event, Some(EventOutcome::Press { .. })));
    }

    #[test]
    fn test_cycle_waits_for_room_instead_of_dropping() {
        let queue: Channel<NoopRawMutex, OutboundPacket, 2> = Channel::new();
        let backlog = OutboundPacket::new(15, 52);
        queue.try_send(backlog).unwrap();
        let sender = queue.sender();
        let mut acq = acquisition(Some(100), Some(200));

        let mut cycle = pin!(acq.run_cycle(Some(press(2, 0)), &sender, None));
        assert!(poll_once(cycle.as_mut()).is_pending());
        assert_eq!(queue.len(), 2);

        // Let the transmitter drain one packet per step until the cycle ends
        let mut received = std::vec::Vec::new();
        let report = loop {
            if let Ok(packet) = queue.try_receive() {
                received.push(packet);
            }
            if let Poll::Ready(report) = poll_once(cycle.as_mut()) {
                break report;
            }
        };
        while let Ok(packet) = queue.try_receive() {
            received.push(packet);
        }

        assert_eq!(report.pedals_sent, 2);
        assert_eq!(
            received,
            [
                backlog,
                OutboundPacket::new(2, 1),
                OutboundPacket::new(ACCEL, 100),
                OutboundPacket::new(BRAKE, 200),
            ]
        );
    }
}
