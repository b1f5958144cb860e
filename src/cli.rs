use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// logplate - compile a JSON layout once, render log events fast
#[derive(Parser, Debug)]
#[command(name = "logplate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a template: compile it and report the plan shape
    Check {
        /// Path to the JSON template
        #[arg(short, long)]
        template: PathBuf,
    },

    /// Compile a template and render NDJSON event records as output lines
    Render {
        /// Path to the JSON template
        #[arg(short, long, conflicts_with = "config")]
        template: Option<PathBuf>,

        /// Load template and settings from a TOML config file instead
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// NDJSON event records (defaults to stdin)
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// Substitute for absent string-typed field values
        #[arg(long, default_value = "")]
        default_field_value: String,
    },
}
