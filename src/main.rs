//! logplate CLI - compile a JSON layout once, render log events fast
//!
//! Usage: logplate <COMMAND>
//!
//! Commands:
//!   check   Compile a template and report the plan shape
//!   render  Render NDJSON event records through a compiled template

mod cli;

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;

use logplate::{Ambient, EncoderConfig, JsonEncoder, LogEvent, Template};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { template } => cmd_check(&template),
        Commands::Render {
            template,
            config,
            events,
            default_field_value,
        } => cmd_render(
            template.as_deref(),
            config.as_deref(),
            events.as_deref(),
            &default_field_value,
        ),
    }
}

fn cmd_check(template: &Path) -> Result<()> {
    let text = fs::read_to_string(template)
        .with_context(|| format!("failed to read template {}", template.display()))?;
    let plan = Template::new(text).compile()?;

    println!(
        "template OK: {} nodes, {} dynamic",
        plan.nodes().len(),
        plan.dynamic_count()
    );
    Ok(())
}

fn cmd_render(
    template: Option<&Path>,
    config: Option<&Path>,
    events: Option<&Path>,
    default_field_value: &str,
) -> Result<()> {
    let encoder = match (template, config) {
        (Some(path), None) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read template {}", path.display()))?;
            JsonEncoder::new(&text)?.with_default_field_value(default_field_value)
        }
        (None, Some(path)) => JsonEncoder::from_config(&EncoderConfig::load(path)?)?,
        _ => bail!("either --template or --config is required"),
    };

    let reader: Box<dyn Read> = match events {
        Some(path) => Box::new(
            fs::File::open(path)
                .with_context(|| format!("failed to open events {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };

    let base = Ambient::from_process();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (number, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.context("failed to read event record")?;
        if line.trim().is_empty() {
            continue;
        }
        let (event, ambient) = parse_record(&line, &base)
            .with_context(|| format!("invalid event record on line {}", number + 1))?;
        encoder.encode(&event, &ambient, &mut out)?;
    }
    out.flush()?;

    Ok(())
}

/// One NDJSON record: the event fields, plus optional `mdc` and `context`
/// maps merged into the process-level ambient snapshot.
fn parse_record(line: &str, base: &Ambient) -> Result<(LogEvent, Ambient)> {
    let mut record: Value = serde_json::from_str(line)?;

    let mut ambient = base.clone();
    if let Some(map) = record.as_object_mut() {
        if let Some(mdc) = map.remove("mdc") {
            ambient.mdc = serde_json::from_value::<BTreeMap<String, String>>(mdc)
                .context("invalid mdc map")?;
        }
        if let Some(context) = map.remove("context") {
            ambient.context = serde_json::from_value::<BTreeMap<String, Value>>(context)
                .context("invalid context map")?;
        }
    }

    let event: LogEvent = serde_json::from_value(record)?;
    Ok((event, ambient))
}
