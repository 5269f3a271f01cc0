//! Button capture tasks
//!
//! One task per button line, all on the highest-priority interrupt
//! executor. Each task keeps its line's edge wait armed and does nothing per
//! edge beyond stamping the time and a non-blocking enqueue; overflow is
//! counted, not logged.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use volante_core::capture::ButtonLine;

use crate::board::BUTTON_COUNT;
use crate::channels::Capture;

#[embassy_executor::task(pool_size = BUTTON_COUNT)]
pub async fn capture_task(mut button: ButtonLine<Input<'static>>, capture: &'static Capture) {
    info!("Capture task started on line {}", button.line);

    loop {
        let line = button.wait_for_edge().await;
        capture.on_falling_edge(line, Instant::now().as_millis());
    }
}
