//! 0.14.0 → 0.14.1: settlement nemeses and quarries are identified by
//! numeric ID instead of display name.

use crate::migration::json::{default_array, default_false, int_field, objects_mut, str_field};
use kdm_core::monster::{Bestiary, Resolution, resolve_nemesis, resolve_quarry};
use serde_json::{Map, Value, json};

const NEMESIS_FLAGS: [&str; 7] = [
    "unlocked", "level1", "level2", "level3", "ccLevel1", "ccLevel2", "ccLevel3",
];

const QUARRY_FLAGS: [&str; 5] = ["unlocked", "ccPrologue", "ccLevel1", "ccLevel2", "ccLevel3"];

pub fn reconcile_settlement_monsters(document: &mut Value, bestiary: &Bestiary) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    for settlement in objects_mut(root, "settlements") {
        default_array(settlement, "nemeses");
        default_array(settlement, "quarries");

        for nemesis in objects_mut(settlement, "nemeses") {
            reconcile_nemesis_entry(nemesis, bestiary);
        }
        for quarry in objects_mut(settlement, "quarries") {
            reconcile_quarry_entry(quarry, bestiary);
        }
    }
}

/// Gives a legacy settlement nemesis record a numeric `id`.
///
/// Records that already carry an integer `id` only get their flags
/// defaulted. A resolved record drops its `name`; an unresolved one keeps it
/// next to the sentinel ID.
pub(super) fn reconcile_nemesis_entry(entry: &mut Map<String, Value>, bestiary: &Bestiary) {
    for flag in NEMESIS_FLAGS {
        default_false(entry, flag);
    }

    if int_field(entry, "id").is_some() {
        return;
    }

    let name = str_field(entry, "name").unwrap_or_default().to_string();
    let resolution = resolve_nemesis(bestiary.nemeses(), &name);
    apply_resolution(entry, resolution, &name, "nemesis");
}

/// Gives a legacy settlement quarry record a numeric `id` and its `node`.
pub(super) fn reconcile_quarry_entry(entry: &mut Map<String, Value>, bestiary: &Bestiary) {
    for flag in QUARRY_FLAGS {
        default_false(entry, flag);
    }

    if int_field(entry, "id").is_some() {
        return;
    }

    let name = str_field(entry, "name").unwrap_or_default().to_string();
    let resolved = resolve_quarry(bestiary.quarries(), &name);
    entry.insert("node".to_string(), json!(resolved.node.as_str()));
    apply_resolution(entry, resolved.resolution, &name, "quarry");
}

fn apply_resolution(
    entry: &mut Map<String, Value>,
    resolution: Resolution,
    name: &str,
    kind: &'static str,
) {
    if resolution.is_resolved() {
        entry.remove("name");
    } else {
        tracing::warn!(
            "Could not resolve {} '{}', storing sentinel ID {}",
            kind,
            name,
            resolution.id()
        );
    }
    entry.insert("id".to_string(), json!(resolution.id()));
}
