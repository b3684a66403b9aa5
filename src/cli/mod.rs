//! CLI interface for Portal

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Speed-dial for gates and intercoms
#[derive(Parser)]
#[command(name = "portal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "portal.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List gates with their dial strings
    List,

    /// Add a gate
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Number to call
        #[arg(short, long)]
        phone: String,

        /// DTMF code sent after connecting
        #[arg(long)]
        code: String,

        /// Pauses before the code
        #[arg(short, long, default_value = "0")]
        delay: u32,

        /// Display color (defaults to the configured color)
        #[arg(long)]
        color: Option<String>,
    },

    /// Change a gate
    Edit {
        /// Gate id or name
        gate: String,

        #[command(flatten)]
        changes: GateChanges,
    },

    /// Delete a gate
    Remove {
        /// Gate id or name
        gate: String,
    },

    /// Call a gate
    Dial {
        /// Gate id or name
        gate: String,

        /// Print the dial string instead of calling
        #[arg(long)]
        print: bool,

        /// Play the code's tones before calling
        #[arg(long)]
        preview: bool,
    },

    /// Play a gate's DTMF tones
    Preview {
        #[command(flatten)]
        target: ToneTarget,
    },

    /// Render a gate's DTMF tones to a WAV file
    Render {
        #[command(flatten)]
        target: ToneTarget,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Sample rate in Hz (defaults to the configured rate)
        #[arg(short, long)]
        sample_rate: Option<u32>,
    },

    /// List available audio output devices
    Devices,

    /// Validate a configuration file
    Check,

    /// Generate an example configuration file
    Init,
}

/// Fields to replace when editing. Anything left out keeps its value.
#[derive(Args)]
pub struct GateChanges {
    /// New display name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New number to call
    #[arg(short, long)]
    pub phone: Option<String>,

    /// New DTMF code
    #[arg(long)]
    pub code: Option<String>,

    /// New pause count
    #[arg(short, long)]
    pub delay: Option<u32>,

    /// New display color
    #[arg(long)]
    pub color: Option<String>,
}

/// A stored gate or a literal code
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ToneTarget {
    /// Gate id or name
    pub gate: Option<String>,

    /// Code to play instead of a stored gate
    #[arg(long)]
    pub code: Option<String>,
}
