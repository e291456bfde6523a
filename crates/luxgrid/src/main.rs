//! Luxgrid - Fixture geometry and network output addressing
//!
//! Loads a rig file, builds the fixture structure and prints the resulting
//! output descriptors as JSON on stdout.
//!
//! ```text
//! luxgrid <rig.(ron|lxg|json)> [--log-level <level>]
//! ```

#![warn(missing_docs)]

mod logging_setup;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use luxgrid_control::{OutputDescriptor, Structure, SystemResolver};
use luxgrid_io::load_rig;
use tracing::info;

const USAGE: &str = "usage: luxgrid <rig.(ron|lxg|json)> [--log-level <level>]";

#[derive(Debug, PartialEq)]
struct Args {
    rig: PathBuf,
    log_level: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut rig = None;
    let mut log_level = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--log-level" => match args.next() {
                Some(level) => log_level = Some(level),
                None => bail!("--log-level needs a value\n{}", USAGE),
            },
            "-h" | "--help" => bail!(USAGE),
            other if other.starts_with('-') => bail!("unknown option '{}'\n{}", other, USAGE),
            other => {
                if rig.is_some() {
                    bail!("more than one rig file given\n{}", USAGE);
                }
                rig = Some(PathBuf::from(other));
            }
        }
    }
    match rig {
        Some(rig) => Ok(Args { rig, log_level }),
        None => bail!(USAGE),
    }
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    // Log settings live in the rig, so it is read before any subscriber exists
    let rig = load_rig(&args.rig)
        .with_context(|| format!("Failed to load rig {}", args.rig.display()))?;

    let mut log_config = rig.settings.log_config.clone();
    if let Some(level) = args.log_level {
        log_config.level = level;
    }
    let _log_session = logging_setup::init(&log_config, &args.rig)?;
    info!(
        "Loaded rig '{}' with {} fixture configurations",
        rig.name,
        rig.fixtures.len()
    );

    let mut structure = Structure::new(Arc::new(SystemResolver));
    rig.restore(&mut structure)
        .with_context(|| format!("Failed to restore rig '{}'", rig.name))?;

    let outputs: Vec<&OutputDescriptor> = structure.outputs().collect();
    let unknown_hosts = structure
        .fixtures()
        .iter()
        .filter(|f| f.unknown_host())
        .count();
    info!(
        "Rig '{}': {} fixtures, {} points, {} outputs, {} unknown hosts",
        rig.name,
        structure.len(),
        structure.size(),
        outputs.len(),
        unknown_hosts
    );

    let report = serde_json::json!({
        "rig": rig.name,
        "generation": structure.model().generation(),
        "points": structure.size(),
        "outputs": outputs,
    });
    let stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(stdout, &report).context("Failed to write descriptors")?;
    println!();
    Ok(())
}
