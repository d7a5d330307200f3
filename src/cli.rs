//! Command-line argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::types::ConversionSettings;

/// Convert images and PDFs to the formats their type allows
#[derive(Parser, Debug)]
#[command(name = "file-converter")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Files to add to the interactive session
    pub files: Vec<PathBuf>,

    /// JPEG quality (1-100)
    #[arg(long, global = true, default_value_t = 85, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Maximum output size in bytes for lossy output. Quality is lowered
    /// until the output fits or the attempts run out.
    #[arg(long, global = true)]
    pub max_size: Option<u64>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive session: add, select and convert files
    Session {
        /// Files to start with
        files: Vec<PathBuf>,
    },

    /// Show each file's type and the output formats it can be converted to
    Inspect {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Convert a single file
    Convert {
        /// File to convert
        input: PathBuf,

        /// Output format (PNG, JPG, BMP, WebP, PDF, DOCX, TXT)
        #[arg(short = 't', long = "to")]
        to: String,

        /// Output path. Defaults to `<name>_converted.<ext>` next to the input.
        /// The format's extension is appended when missing.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the conversion report as JSON
        #[arg(long)]
        json: bool,

        /// Don't show the progress spinner
        #[arg(short, long)]
        quiet: bool,
    },
}

impl Cli {
    pub fn settings(&self) -> ConversionSettings {
        ConversionSettings {
            quality: self.quality,
            max_size: self.max_size,
            ..ConversionSettings::default()
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
