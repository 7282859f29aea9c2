use std::fs;

use anyhow::{Context, Result};

use crate::argsets::CheckArgs;
use crate::bus_mgmt;

/// Validates the bus description without emitting or writing anything.
pub fn check(args: CheckArgs) -> Result<()> {
    let raw_text = fs::read_to_string(&args.input)
        .with_context(|| format!("could not read {}", args.input.display()))?;
    let raw = bus_mgmt::raw::from_str(&raw_text)?;
    let bus = bus_mgmt::resolve_bus(&raw)?;
    bus_mgmt::validate(&bus)?;
    log::info!(
        "{}: {} clients, {} groups, configuration is valid",
        args.input.display(),
        bus.clients.len(),
        bus.groups.len()
    );
    Ok(())
}
