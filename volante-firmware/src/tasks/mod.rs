//! Embassy async tasks
//!
//! Each task owns its hardware and talks to the others only through the
//! queues and the indicator signal created in `main`.

pub mod acquisition;
pub mod capture;
pub mod encoder;
#[cfg(feature = "indicator")]
pub mod indicator;
pub mod transmit;

pub use acquisition::acquisition_task;
pub use capture::capture_task;
pub use encoder::encoder_task;
#[cfg(feature = "indicator")]
pub use indicator::indicator_task;
pub use transmit::transmit_task;
