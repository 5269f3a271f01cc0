//! Build script for volante-firmware
//!
//! - Sets up linker search paths for memory.x and the link scripts
//! - Validates controller.toml at compile time
//! - Generates the configuration constants the firmware includes

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    let config = load_config();
    validate_config(&config);
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse controller.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=controller.toml");

    let config_path = Path::new("controller.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: controller.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a controller.toml configuration file.     ║\n\
            ║  Please create one in the volante-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read controller.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in controller.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Report every collected error in one box and abort the build
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

const SECTIONS: [&str; 6] = ["timing", "queues", "encoder", "sources", "buttons", "serial"];

/// Integer at `section.key`, or None if missing or not an integer
fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn require_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> i64 {
    match int(config, section, key) {
        Some(v) if range.contains(&v) => v,
        Some(v) => {
            errors.push(format!(
                "[{}] {} = {} outside {}..={}",
                section,
                key,
                v,
                range.start(),
                range.end()
            ));
            0
        }
        None => {
            errors.push(format!("[{}] {} missing or not an integer", section, key));
            0
        }
    }
}

/// Validate controller.toml contents
fn validate_config(config: &toml::Value) {
    let missing: Vec<String> = SECTIONS
        .iter()
        .filter(|s| config.get(**s).and_then(|v| v.as_table()).is_none())
        .map(|s| format!("Missing [{}] section", s))
        .collect();
    if !missing.is_empty() {
        fail("Missing required sections in controller.toml", &missing);
    }

    let mut errors = Vec::new();

    for key in ["event_wait_ms", "pedal_interval_ms", "encoder_poll_ms", "indicator_pulse_ms"] {
        require_int(config, "timing", key, 1..=u32::MAX as i64, &mut errors);
    }

    for key in ["raw_input", "outbound"] {
        require_int(config, "queues", key, 1..=1024, &mut errors);
    }

    let step = require_int(config, "encoder", "step", 1..=i32::MAX as i64, &mut errors);
    let max_jump = require_int(config, "encoder", "max_jump", 1..=i32::MAX as i64, &mut errors);
    let min = require_int(config, "encoder", "min_position", i32::MIN as i64..=0, &mut errors);
    let max = require_int(config, "encoder", "max_position", 0..=i32::MAX as i64, &mut errors);
    let offset = require_int(
        config,
        "encoder",
        "offset",
        i32::MIN as i64..=i32::MAX as i64,
        &mut errors,
    );
    if min >= max {
        errors.push("[encoder] min_position must be below max_position".to_string());
    }
    if min + offset < i16::MIN as i64 || max + offset > i16::MAX as i64 {
        errors.push("[encoder] position + offset does not fit in i16".to_string());
    }
    if step > max_jump {
        errors.push(format!(
            "[encoder] step {} exceeds max_jump {}; steps would be clipped",
            step, max_jump
        ));
    }

    let mut ids = Vec::new();
    for key in ["accelerator", "brake", "encoder"] {
        ids.push(require_int(config, "sources", key, 0..=255, &mut errors));
    }
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != ids.len() {
        errors.push("[sources] accelerator, brake and encoder ids must differ".to_string());
    }

    require_int(config, "buttons", "debounce_ms", 0..=u32::MAX as i64, &mut errors);
    if let Some(line) = config.get("buttons").and_then(|b| b.get("indicator_line")) {
        match line.as_integer() {
            Some(v) if (0..=255).contains(&v) => {}
            _ => errors.push("[buttons] indicator_line must be a line number".to_string()),
        }
    }

    require_int(config, "serial", "baudrate", 1..=u32::MAX as i64, &mut errors);
    require_int(config, "serial", "data_bits", 7..=8, &mut errors);
    require_int(config, "serial", "stop_bits", 1..=2, &mut errors);
    match config
        .get("serial")
        .and_then(|s| s.get("parity"))
        .and_then(|p| p.as_str())
    {
        Some("none" | "even" | "odd") => {}
        _ => errors.push("[serial] parity must be \"none\", \"even\" or \"odd\"".to_string()),
    }

    if !errors.is_empty() {
        fail("Invalid values in controller.toml", &errors);
    }

    println!("cargo:warning=controller.toml validated successfully");
}

/// Write `$OUT_DIR/controller_config.rs`
///
/// Button-line collisions with source ids are checked by the firmware's own
/// const assertion, since the line table lives in board.rs.
fn generate_config(config: &toml::Value) {
    let get = |section: &str, key: &str| int(config, section, key).unwrap_or_default();

    let indicator_line = match int(config, "buttons", "indicator_line") {
        Some(line) => format!("Some({})", line),
        None => "None".to_string(),
    };
    let data_bits = match get("serial", "data_bits") {
        7 => "Seven",
        _ => "Eight",
    };
    let parity = match config
        .get("serial")
        .and_then(|s| s.get("parity"))
        .and_then(|p| p.as_str())
    {
        Some("even") => "Even",
        Some("odd") => "Odd",
        _ => "None",
    };
    let stop_bits = match get("serial", "stop_bits") {
        2 => "Two",
        _ => "One",
    };

    let source = format!(
        "// Generated from controller.toml by build.rs\n\
         \n\
         pub const RAW_INPUT_QUEUE_CAPACITY: usize = {raw_input};\n\
         pub const OUTBOUND_QUEUE_CAPACITY: usize = {outbound};\n\
         \n\
         pub const CONFIG: ControllerConfig = ControllerConfig {{\n\
         \x20   timing: TimingConfig {{\n\
         \x20       event_wait_ms: {event_wait_ms},\n\
         \x20       pedal_interval_ms: {pedal_interval_ms},\n\
         \x20       encoder_poll_ms: {encoder_poll_ms},\n\
         \x20       indicator_pulse_ms: {indicator_pulse_ms},\n\
         \x20   }},\n\
         \x20   encoder: EncoderConfig {{\n\
         \x20       step: {step},\n\
         \x20       max_jump: {max_jump},\n\
         \x20       min_position: {min_position},\n\
         \x20       max_position: {max_position},\n\
         \x20       offset: {offset},\n\
         \x20   }},\n\
         \x20   sources: SourceIds {{\n\
         \x20       accelerator: {accelerator},\n\
         \x20       brake: {brake},\n\
         \x20       encoder: {encoder},\n\
         \x20   }},\n\
         \x20   buttons: ButtonConfig {{\n\
         \x20       debounce_ms: {debounce_ms},\n\
         \x20       indicator_line: {indicator_line},\n\
         \x20   }},\n\
         \x20   serial: UartConfig {{\n\
         \x20       baudrate: {baudrate},\n\
         \x20       data_bits: DataBits::{data_bits},\n\
         \x20       parity: Parity::{parity},\n\
         \x20       stop_bits: StopBits::{stop_bits},\n\
         \x20   }},\n\
         }};\n",
        raw_input = get("queues", "raw_input"),
        outbound = get("queues", "outbound"),
        event_wait_ms = get("timing", "event_wait_ms"),
        pedal_interval_ms = get("timing", "pedal_interval_ms"),
        encoder_poll_ms = get("timing", "encoder_poll_ms"),
        indicator_pulse_ms = get("timing", "indicator_pulse_ms"),
        step = get("encoder", "step"),
        max_jump = get("encoder", "max_jump"),
        min_position = get("encoder", "min_position"),
        max_position = get("encoder", "max_position"),
        offset = get("encoder", "offset"),
        accelerator = get("sources", "accelerator"),
        brake = get("sources", "brake"),
        encoder = get("sources", "encoder"),
        debounce_ms = get("buttons", "debounce_ms"),
        indicator_line = indicator_line,
        baudrate = get("serial", "baudrate"),
        data_bits = data_bits,
        parity = parity,
        stop_bits = stop_bits,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("controller_config.rs"), source).unwrap();
}
