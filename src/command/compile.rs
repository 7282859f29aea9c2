use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::argsets::CompileArgs;
use crate::bus_mgmt;
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::emit::{self, Artifact};

/// Runs the whole pipeline in memory and only then writes the artifacts, so
/// a failure anywhere never leaves partial output behind.
pub fn compile(args: CompileArgs) -> Result<()> {
    let artifacts = build_artifacts(&args.input)?;
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| default_output_dir(&args.input));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("could not create output directory {}", output_dir.display()))?;
    for artifact in &artifacts {
        let path = output_dir.join(&artifact.file_name);
        fs::write(&path, &artifact.bytes)
            .with_context(|| format!("could not write {}", path.display()))?;
        log::debug!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
    }
    log::info!(
        "Compiled {} into {} artifacts under {}",
        args.input.display(),
        artifacts.len(),
        output_dir.display()
    );
    Ok(())
}

pub fn build_artifacts(input: &Path) -> Result<Vec<Artifact>> {
    let raw_text = fs::read_to_string(input)
        .with_context(|| format!("could not read {}", input.display()))?;
    let raw = bus_mgmt::raw::from_str(&raw_text)?;
    let bus = bus_mgmt::resolve_bus(&raw)?;
    bus_mgmt::validate(&bus)?;
    let bus = bus_mgmt::derive(bus);
    log::debug!(
        "Resolved bus: {} clients, {} groups",
        bus.clients.len(),
        bus.groups.len()
    );
    Ok(emit::emit_bus(&bus)?)
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(DEFAULT_OUTPUT_DIR)
}
