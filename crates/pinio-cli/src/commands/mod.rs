//! Command implementations for pinioctl

pub mod config;
pub mod decode;

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::error::CliError;
use crate::hex;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a capability response into a pin capability table
    Capabilities(FrameInput),

    /// Decode an analog mapping response
    AnalogMap(FrameInput),

    /// Replay a discovery exchange through the pin manager
    Discover {
        /// Capability response chunk, repeat for split reads
        #[arg(long = "capabilities", required = true)]
        capabilities: Vec<String>,
        /// Analog mapping response chunk, repeat for split reads
        #[arg(long = "mapping")]
        mapping: Vec<String>,
    },

    /// Replay streamed reads over the default layout
    Telemetry(FrameInput),

    /// Print the fallback pin layout
    DefaultLayout,

    /// Validate a manager configuration file
    CheckConfig {
        /// Path to a .json, .yaml or .yml file
        path: PathBuf,
    },
}

/// Hex frames from the command line and/or a capture file.
#[derive(Args, Debug)]
pub struct FrameInput {
    /// Hex frames, one per argument (e.g. "F0 6B 7F F7")
    pub frames: Vec<String>,

    /// Capture file with one hex frame per line
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl FrameInput {
    pub fn read(&self) -> Result<Vec<Vec<u8>>, CliError> {
        hex::read_frames(&self.frames, self.file.as_deref())
    }

    /// All frames joined into one buffer, for captures split across reads.
    pub fn read_joined(&self) -> Result<Vec<u8>, CliError> {
        Ok(self.read()?.concat())
    }
}
