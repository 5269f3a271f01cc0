//! Mock HAL implementations for testing
//!
//! In-memory versions of every HAL trait so the pipeline can be exercised
//! on the host without hardware.
//!
//! Available during test builds and when the `mock` feature is enabled.

use core::cell::Cell;
use core::future::poll_fn;
use core::task::Poll;
use std::rc::Rc;
use std::vec::Vec;

use crate::adc::AnalogInput;
use crate::gpio::{EdgeInput, InputPin, OutputPin};
use crate::uart::UartTx;

/// Mock polled input
///
/// The level lives in a [`Cell`] so a test can drive the line while the
/// code under test holds a shared reference to it.
#[derive(Debug, Default)]
pub struct MockInput {
    level: Cell<bool>,
}

impl MockInput {
    /// Create an input reading `high`
    pub fn new(high: bool) -> Self {
        Self {
            level: Cell::new(high),
        }
    }

    /// Drive the simulated line level
    pub fn set_level(&self, high: bool) {
        self.level.set(high);
    }
}

impl InputPin for MockInput {
    fn is_high(&self) -> bool {
        self.level.get()
    }
}

/// Mock edge-triggered input
///
/// Behaves like an RP2040 bank interrupt: arming a wait clears any stale
/// edge, and an edge is latched only while a wait is armed. Tests drive the
/// line through a [`MockEdgeDriver`] taken before the wait starts.
#[derive(Debug, Default)]
pub struct MockEdgeInput {
    state: Rc<EdgeState>,
}

#[derive(Debug, Default)]
struct EdgeState {
    armed: Cell<bool>,
    latched: Cell<bool>,
}

/// Handle that pulls a [`MockEdgeInput`] line low
#[derive(Debug, Clone)]
pub struct MockEdgeDriver {
    state: Rc<EdgeState>,
}

impl MockEdgeInput {
    /// Create an idle input
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for producing edges on this line
    pub fn driver(&self) -> MockEdgeDriver {
        MockEdgeDriver {
            state: Rc::clone(&self.state),
        }
    }
}

impl MockEdgeDriver {
    /// Produce one falling edge
    ///
    /// Lost when no wait is armed on the line.
    pub fn fall(&self) {
        if self.state.armed.get() {
            self.state.latched.set(true);
        }
    }

    /// A wait is currently armed on the line
    pub fn is_armed(&self) -> bool {
        self.state.armed.get()
    }
}

/// Disarms the line when the wait completes or is dropped
struct Armed<'a>(&'a EdgeState);

impl Drop for Armed<'_> {
    fn drop(&mut self) {
        self.0.armed.set(false);
        self.0.latched.set(false);
    }
}

impl EdgeInput for MockEdgeInput {
    async fn wait_for_falling_edge(&mut self) {
        let state = &*self.state;
        state.latched.set(false);
        state.armed.set(true);
        let _armed = Armed(state);

        poll_fn(|_| {
            if state.latched.get() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await;
    }
}

/// Mock output pin recording every state it was driven to
#[derive(Debug, Default)]
pub struct MockOutput {
    state: bool,
    history: Vec<bool>,
}

impl MockOutput {
    /// Create an output that starts low
    pub fn new() -> Self {
        Self::default()
    }

    /// Every level written, in order
    pub fn history(&self) -> &[bool] {
        &self.history
    }
}

impl OutputPin for MockOutput {
    fn set_high(&mut self) {
        self.state = true;
        self.history.push(true);
    }

    fn set_low(&mut self) {
        self.state = false;
        self.history.push(false);
    }

    fn is_set_high(&self) -> bool {
        self.state
    }
}

/// Mock ADC error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAdcError;

/// Channel handle for [`MockAdc`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAdcChannel(pub usize);

/// Mock ADC with a programmable sample per channel
///
/// A channel set to `None` fails its conversions.
#[derive(Debug)]
pub struct MockAdc {
    samples: Vec<Option<u16>>,
    reads: usize,
}

impl MockAdc {
    /// Create an ADC with `channels` channels, all reading 0
    pub fn new(channels: usize) -> Self {
        Self {
            samples: std::vec![Some(0); channels],
            reads: 0,
        }
    }

    /// Set the value the next conversions on `channel` return
    pub fn set_sample(&mut self, channel: usize, sample: Option<u16>) {
        self.samples[channel] = sample;
    }

    /// Number of conversions performed
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl AnalogInput for MockAdc {
    type Channel = MockAdcChannel;
    type Error = MockAdcError;

    fn read(&mut self, channel: &mut MockAdcChannel) -> Result<u16, MockAdcError> {
        self.reads += 1;
        self.samples
            .get(channel.0)
            .copied()
            .flatten()
            .ok_or(MockAdcError)
    }
}

/// Mock UART error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockUartError;

/// Mock UART transmitter capturing written bytes
#[derive(Debug, Default)]
pub struct MockUart {
    tx_buffer: Vec<u8>,
    fail_writes: u32,
}

impl MockUart {
    /// Create a mock UART with an empty transmit buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Transmitted data (for test verification)
    pub fn tx_buffer(&self) -> &[u8] {
        &self.tx_buffer
    }

    /// Make the next `count` writes fail without transmitting
    pub fn fail_next_writes(&mut self, count: u32) {
        self.fail_writes = count;
    }
}

impl UartTx for MockUart {
    type Error = MockUartError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), MockUartError> {
        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            return Err(MockUartError);
        }
        self.tx_buffer.extend_from_slice(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::pin::pin;
    use embassy_futures::poll_once;

    #[test]
    fn test_mock_input_level() {
        let pin = MockInput::new(true);
        assert!(pin.is_high());
        pin.set_level(false);
        assert!(pin.is_low());
    }

    #[test]
    fn test_mock_output_history() {
        let mut pin = MockOutput::new();
        pin.set_state(true);
        pin.set_state(false);
        assert_eq!(pin.history(), &[true, false]);
        assert!(!pin.is_set_high());
    }

    #[test]
    fn test_mock_edge_needs_armed_wait() {
        let mut input = MockEdgeInput::new();
        let driver = input.driver();

        // Nobody waiting: the edge is gone
        driver.fall();
        {
            let mut wait = pin!(input.wait_for_falling_edge());
            assert!(poll_once(wait.as_mut()).is_pending());
            assert!(driver.is_armed());
            driver.fall();
            assert!(poll_once(wait.as_mut()).is_ready());
        }
        assert!(!driver.is_armed());
    }

    #[test]
    fn test_mock_edge_dropped_wait_disarms() {
        let mut input = MockEdgeInput::new();
        let driver = input.driver();
        {
            let mut wait = pin!(input.wait_for_falling_edge());
            assert!(poll_once(wait.as_mut()).is_pending());
            driver.fall();
        }
        assert!(!driver.is_armed());

        let mut wait = pin!(input.wait_for_falling_edge());
        assert!(poll_once(wait.as_mut()).is_pending());
    }

    #[test]
    fn test_mock_adc_fault() {
        let mut adc = MockAdc::new(2);
        adc.set_sample(0, Some(4095));
        adc.set_sample(1, None);
        assert_eq!(adc.read(&mut MockAdcChannel(0)), Ok(4095));
        assert_eq!(adc.read(&mut MockAdcChannel(1)), Err(MockAdcError));
        assert_eq!(adc.reads(), 2);
    }

    #[test]
    fn test_mock_uart_failure_injection() {
        let mut uart = MockUart::new();
        uart.fail_next_writes(1);
        assert_eq!(uart.write_blocking(&[1, 2]), Err(MockUartError));
        assert_eq!(uart.write_blocking(&[3, 4]), Ok(()));
        assert_eq!(uart.tx_buffer(), &[3, 4]);
    }
}
