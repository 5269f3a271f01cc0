//! Build-time configuration
//!
//! The constants below are generated from `controller.toml` by build.rs.
//! Cross-checks that need the board pin table are done here, so an invalid
//! combination stops the build.

use volante_core::config::{
    ButtonConfig, ControllerConfig, EncoderConfig, SourceIds, TimingConfig,
};
use volante_hal::uart::{DataBits, Parity, StopBits, UartConfig};

use crate::board::BUTTON_LINES;

include!(concat!(env!("OUT_DIR"), "/controller_config.rs"));

const _: () = assert!(
    CONFIG.validate(&BUTTON_LINES).is_ok(),
    "controller.toml conflicts with the board button lines"
);
