use super::{Context, read_document};
use anyhow::{Context as _, Result};
use kdm_core::version::oldest_known_version;
use kdm_infrastructure::{CampaignMigrator, MigrationReport, write_atomic};
use std::path::Path;

pub fn run(ctx: &Context, file: Option<&Path>, target: Option<&str>, dry_run: bool) -> Result<()> {
    let target = ctx.target(target)?;

    let report = match file {
        Some(path) => migrate_file(path, &target, dry_run)?,
        None => migrate_stored(ctx, &target, dry_run)?,
    };

    print_report(&report);
    if dry_run && !report.is_noop() {
        println!("\n(dry run, nothing written)");
    }
    Ok(())
}

fn migrate_file(path: &Path, target: &semver::Version, dry_run: bool) -> Result<MigrationReport> {
    let mut document = read_document(path)?;
    let report = CampaignMigrator::standard().migrate_with_report(&mut document, target);

    if !dry_run && !report.is_noop() {
        write_atomic(path, &document)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ Updated {}", path.display());
    }
    Ok(report)
}

fn migrate_stored(ctx: &Context, target: &semver::Version, dry_run: bool) -> Result<MigrationReport> {
    let repository = ctx.repository()?.with_target(target.clone());

    if dry_run {
        let mut document = repository
            .load_raw()
            .context("Failed to load stored campaign")?;
        return Ok(CampaignMigrator::standard().migrate_with_report(&mut document, target));
    }

    let (_, report) = repository
        .load_with_report()
        .context("Failed to migrate stored campaign")?
        .with_context(|| format!("No campaign stored under '{}'", repository.key()))?;
    Ok(report)
}

fn print_report(report: &MigrationReport) {
    if report.is_noop() {
        println!(
            "Campaign is at {}; nothing to migrate.",
            report.from.describe(&oldest_known_version())
        );
        return;
    }

    println!(
        "Migrated campaign {} -> {}",
        report.from.describe(&oldest_known_version()),
        report.to
    );
    for step in &report.applied {
        println!("  ✓ {} -> {}: {}", step.from, step.to, step.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdm_core::version::app_version;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_migrate_file_rewrites_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("campaign.json");
        fs::write(&path, json!({ "settlements": [] }).to_string()).unwrap();

        let report = migrate_file(&path, &app_version(), false).unwrap();

        assert!(!report.is_noop());
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["version"], kdm_core::APP_VERSION);
        assert!(!temp_dir.path().join(".campaign.json.tmp").exists());
    }

    #[test]
    fn test_dry_run_leaves_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("campaign.json");
        let original = json!({ "version": "0.14.0" }).to_string();
        fs::write(&path, &original).unwrap();

        let report = migrate_file(&path, &app_version(), true).unwrap();

        assert!(!report.is_noop());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
