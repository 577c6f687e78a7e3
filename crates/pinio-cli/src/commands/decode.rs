//! Offline decoding and replay of captured board traffic.

use anyhow::Result;
use pinio_core::{
    DiscoveryPhase, NullTimer, PinIoConfig, PinIoEvent, PinIoManager, PinRegistry,
    default_layout,
};
use pinio_protocol::{parse_analog_mapping_response, parse_capability_response};
use serde::Serialize;
use tracing::{debug, info};

use crate::commands::FrameInput;
use crate::error::CliError;
use crate::hex;
use crate::output;

/// Manager wired to in-memory collaborators. The timer never fires; an
/// unfinished capture is ended explicitly.
type ReplayManager = PinIoManager<Vec<Vec<u8>>, NullTimer, Vec<PinIoEvent>>;

#[derive(Debug, Serialize)]
struct MappingEntry {
    digital_id: u8,
    analog_id: u8,
}

#[derive(Debug, Serialize)]
struct ReplaySummary<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    used_default: Option<bool>,
    events: &'a [PinIoEvent],
    sent: Vec<String>,
    pins: &'a PinRegistry,
}

impl<'a> ReplaySummary<'a> {
    fn new(manager: &'a ReplayManager) -> Self {
        let used_default = manager.events().iter().find_map(|event| match event {
            PinIoEvent::DiscoveryFinished { used_default } => Some(*used_default),
            PinIoEvent::PinStateUpdated => None,
        });
        Self {
            used_default,
            events: manager.events(),
            sent: output::frames_as_hex(manager.writer()),
            pins: manager.registry(),
        }
    }

    fn print(&self, json: bool) {
        if json {
            output::print_json("replay", self);
            return;
        }
        if let Some(used_default) = self.used_default {
            let source = if used_default { "default layout" } else { "board response" };
            println!("Discovery finished from {source}");
        }
        let updates = self
            .events
            .iter()
            .filter(|event| **event == PinIoEvent::PinStateUpdated)
            .count();
        if updates > 0 {
            println!("{updates} telemetry update(s) applied");
        }
        output::print_registry_human(self.pins);
        output::print_frames_human("Sent", &self.sent);
    }
}

fn replay_manager(config: &PinIoConfig) -> Result<ReplayManager, CliError> {
    Ok(ReplayManager::with_config(
        config.clone(),
        Vec::new(),
        NullTimer,
        Vec::new(),
    )?)
}

pub fn capabilities(input: &FrameInput, json: bool) -> Result<()> {
    let frame = input.read_joined()?;
    let pins = parse_capability_response(&frame);
    debug!(bytes = frame.len(), pins = pins.len(), "decoded capability capture");

    if json {
        output::print_json("pins", &pins);
    } else {
        output::print_capabilities_human(&pins);
    }
    Ok(())
}

pub fn analog_map(input: &FrameInput, json: bool) -> Result<()> {
    let frame = input.read_joined()?;
    let mapping = parse_analog_mapping_response(&frame);

    if json {
        let entries: Vec<MappingEntry> = mapping
            .entries()
            .iter()
            .map(|&(digital_id, analog_id)| MappingEntry {
                digital_id,
                analog_id,
            })
            .collect();
        output::print_json("mapping", &entries);
    } else {
        output::print_mapping_human(mapping.entries());
    }
    Ok(())
}

/// Feed a recorded discovery exchange through the manager. A capture that
/// stops before a terminator is finished the way the board's silence would
/// finish it: a timeout during the capability stage, a plain end during the
/// mapping stage.
pub fn discover(
    capabilities: &[String],
    mapping: &[String],
    config: &PinIoConfig,
    json: bool,
) -> Result<()> {
    let capability_chunks = hex::read_frames(capabilities, None)?;
    let mapping_chunks = mapping
        .iter()
        .map(String::as_str)
        .map(hex::parse_frame)
        .collect::<Result<Vec<_>, _>>()?;

    let mut manager = replay_manager(config)?;
    manager.query_capabilities();
    for chunk in capability_chunks.iter().chain(&mapping_chunks) {
        manager.receive(chunk);
    }

    match manager.phase() {
        DiscoveryPhase::QueryingCapabilities => {
            info!("capability response never terminated, treating as timeout");
            manager.end_query(true);
        }
        DiscoveryPhase::QueryingAnalogMapping => {
            info!("analog mapping response never terminated, ending discovery");
            manager.end_query(false);
        }
        DiscoveryPhase::Idle => {}
    }

    ReplaySummary::new(&manager).print(json);
    Ok(())
}

/// Apply streamed reads to a manager running the default layout.
pub fn telemetry(input: &FrameInput, config: &PinIoConfig, json: bool) -> Result<()> {
    let frames = input.read()?;

    let mut manager = replay_manager(config)?;
    manager.end_query(true);
    manager.writer_mut().clear();
    manager.events_mut().clear();

    for frame in &frames {
        manager.receive(frame);
    }
    debug!(frames = frames.len(), "replayed telemetry");

    ReplaySummary::new(&manager).print(json);
    Ok(())
}

pub fn default_layout_table(json: bool) -> Result<()> {
    let registry = PinRegistry::from_records(default_layout());
    if json {
        output::print_json("pins", &registry);
    } else {
        output::print_registry_human(&registry);
    }
    Ok(())
}
