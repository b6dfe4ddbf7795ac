use super::{Context, read_document};
use anyhow::{Context as _, Result};
use kdm_core::version::oldest_known_version;
use kdm_infrastructure::migration::{MigrationChain, build_campaign_registry, detect_version};
use std::path::Path;

pub fn run(ctx: &Context, file: Option<&Path>) -> Result<()> {
    let document = match file {
        Some(path) => read_document(path)?,
        None => ctx
            .repository()?
            .load_raw()
            .context("Failed to load stored campaign")?,
    };

    let target = ctx.target(None)?;
    let registry = build_campaign_registry();
    let detected = detect_version(&document);

    println!("Schema version: {}", detected);
    println!("Target version: {}", target);

    match detected.effective(&oldest_known_version()) {
        Some(current) if current < target => {
            let pending: Vec<String> = registry
                .available_path(&current)
                .into_iter()
                .filter(|version| version <= &target)
                .map(|version| version.to_string())
                .collect();
            if pending.len() > 1 {
                println!("Migration pending: {}", pending.join(" -> "));
            } else {
                println!("No migration path from {}", current);
            }
        }
        Some(_) => println!("Up to date"),
        None => println!("Unrecognized version; migration will leave it untouched"),
    }
    Ok(())
}
