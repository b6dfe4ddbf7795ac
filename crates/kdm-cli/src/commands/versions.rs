use super::Context;
use anyhow::Result;
use kdm_infrastructure::migration::{Migration, build_campaign_registry};

pub fn show(ctx: &Context) -> Result<()> {
    let registry = build_campaign_registry();
    let target = ctx.target(None)?;

    println!("Schema versions (oldest first):");
    println!("  {} (untagged documents)", registry.oldest_version());
    for step in registry.steps() {
        let marker = if step.to_version() == target { " <- target" } else { "" };
        println!("  {}  {}{}", step.to_version(), step.description(), marker);
    }
    Ok(())
}
