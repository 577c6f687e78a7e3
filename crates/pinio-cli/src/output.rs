//! Output formatting for CLI responses

use anyhow::Error;
use colored::Colorize;
use pinio_core::{PinMode, PinRecord, PinRegistry};
use pinio_protocol::PinCapabilities;
use serde::Serialize;
use serde_json::json;

use crate::hex::format_frame;

/// Print a successful result as pretty JSON with a `success` flag.
pub fn print_json<T: Serialize>(key: &str, value: &T) {
    let output = json!({
        "success": true,
        key: value,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format {key} as JSON: {e}"),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {error}", "Error:".red().bold());

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {err}", "Caused by:".yellow());
        source = err.source();
    }
}

fn mode_list(record: &PinRecord) -> String {
    let modes: Vec<String> = PinMode::ALL
        .iter()
        .filter(|mode| record.supports(**mode))
        .map(ToString::to_string)
        .collect();
    if modes.is_empty() {
        "-".to_string()
    } else {
        modes.join(",")
    }
}

fn analog_label(analog_id: Option<u8>) -> String {
    analog_id.map_or_else(|| "-".to_string(), |id| format!("A{id}"))
}

pub fn print_capabilities_human(pins: &[PinCapabilities]) {
    if pins.is_empty() {
        println!("{}", "No pins reported".yellow());
        return;
    }
    println!(
        "{}",
        format!(
            "{:>4}  {:<5} {:<6} {:<4} {:<5} {:<3}",
            "PIN", "DIGI", "ANALOG", "PWM", "SERVO", "I2C"
        )
        .bold()
    );
    for pin in pins {
        println!(
            "{:>4}  {:<5} {:<6} {:<4} {:<5} {:<3}",
            pin.digital_id,
            flag(pin.is_digital),
            flag(pin.is_analog),
            flag(pin.is_pwm),
            flag(pin.supports_servo),
            flag(pin.supports_i2c),
        );
    }
}

fn flag(set: bool) -> &'static str {
    if set { "yes" } else { "-" }
}

pub fn print_mapping_human(entries: &[(u8, u8)]) {
    if entries.is_empty() {
        println!("{}", "No analog channels mapped".yellow());
        return;
    }
    for (digital_id, channel) in entries {
        println!("  pin {:>3} -> {}", digital_id, analog_label(Some(*channel)).bold());
    }
}

pub fn print_registry_human(registry: &PinRegistry) {
    if registry.is_empty() {
        println!("{}", "Registry is empty".yellow());
        return;
    }
    println!(
        "{}",
        format!(
            "{:>4}  {:<6} {:<7} {:<5} {:>6}  {}",
            "PIN", "ANALOG", "MODE", "VALUE", "RAW", "MODES"
        )
        .bold()
    );
    for pin in registry {
        println!(
            "{:>4}  {:<6} {:<7} {:<5} {:>6}  {}",
            pin.digital_id(),
            analog_label(pin.analog_id()),
            pin.mode().to_string(),
            pin.digital_value().to_string(),
            pin.analog_value(),
            mode_list(pin),
        );
    }
    println!(
        "{} digital, {} analog",
        registry.digital_pin_count(),
        registry.analog_pin_count()
    );
}

pub fn print_frames_human(title: &str, frames: &[String]) {
    println!("{} ({})", title.bold(), frames.len());
    for frame in frames {
        println!("  {frame}");
    }
}

pub fn frames_as_hex(frames: &[Vec<u8>]) -> Vec<String> {
    frames.iter().map(|frame| format_frame(frame)).collect()
}
