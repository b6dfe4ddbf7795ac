//! 0.15.0 → 0.15.1: settlement nemeses and quarries carry their own `name`,
//! `node` and `timeline` so views no longer join against the bestiary.

use super::v0_14_1::{reconcile_nemesis_entry, reconcile_quarry_entry};
use crate::migration::json::{default_array, default_object, default_value, int_field, objects_mut};
use kdm_core::monster::{Bestiary, MonsterRecord, MonsterType, timeline_to_value};
use serde_json::{Map, Value, json};

pub fn denormalize_settlement_monsters(document: &mut Value, bestiary: &Bestiary) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    for settlement in objects_mut(root, "settlements") {
        default_array(settlement, "nemeses");
        default_array(settlement, "quarries");

        for nemesis in objects_mut(settlement, "nemeses") {
            if int_field(nemesis, "id").is_none() {
                reconcile_nemesis_entry(nemesis, bestiary);
            }
            let record = int_field(nemesis, "id").and_then(|id| bestiary.nemesis(id));
            denormalize(nemesis, record, MonsterType::Nemesis);
        }
        for quarry in objects_mut(settlement, "quarries") {
            if int_field(quarry, "id").is_none() {
                reconcile_quarry_entry(quarry, bestiary);
            }
            let record = int_field(quarry, "id").and_then(|id| bestiary.quarry(id));
            denormalize(quarry, record, MonsterType::Quarry);
        }
    }
}

fn denormalize(entry: &mut Map<String, Value>, record: Option<&MonsterRecord>, monster_type: MonsterType) {
    match record {
        Some(record) => {
            entry.insert("name".to_string(), json!(record.name));
            entry.insert("node".to_string(), json!(record.node.as_str()));
            entry.insert("timeline".to_string(), timeline_to_value(&record.timeline));
        }
        None => {
            let placeholder = match monster_type {
                MonsterType::Nemesis => "Unknown Nemesis",
                MonsterType::Quarry => "Unknown Quarry",
            };
            default_value(entry, "name", json!(placeholder));
            default_value(entry, "node", json!(monster_type.default_node().as_str()));
            default_object(entry, "timeline");
        }
    }
}
