//! 0.14.2 → 0.15.0: `customMonsters` is split into `customNemeses` and
//! `customQuarries`.

use crate::migration::json::{default_array, default_object, str_field};
use kdm_core::monster::{Bestiary, MonsterNode, MonsterType, find_variant, timeline_to_value};
use serde_json::{Map, Value, json};

const LEGACY_KEY: &str = "customMonsters";
const NEMESES_KEY: &str = "customNemeses";
const QUARRIES_KEY: &str = "customQuarries";

/// Fields that only exist on custom quarries.
const QUARRY_ONLY: [&str; 3] = ["huntBoard", "locations", "ccRewards"];

pub fn partition_custom_monsters(document: &mut Value, bestiary: &Bestiary) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    default_object(root, NEMESES_KEY);
    default_object(root, QUARRIES_KEY);

    let legacy = match root.remove(LEGACY_KEY) {
        Some(Value::Object(legacy)) => legacy,
        Some(Value::Null) | None => Map::new(),
        Some(other) => {
            tracing::warn!("'{}' is not an object, leaving it in place", LEGACY_KEY);
            root.insert(LEGACY_KEY.to_string(), other);
            return;
        }
    };

    let mut nemeses = Map::new();
    let mut quarries = Map::new();

    for (key, monster) in legacy {
        let Value::Object(mut monster) = monster else {
            tracing::warn!("Skipping custom monster '{}': not an object", key);
            continue;
        };

        let monster_type = classify(&monster);
        monster.remove("type");
        normalize(&mut monster, monster_type, bestiary);

        match monster_type {
            MonsterType::Nemesis => nemeses.insert(key, Value::Object(monster)),
            MonsterType::Quarry => quarries.insert(key, Value::Object(monster)),
        };
    }

    merge_into(root, NEMESES_KEY, nemeses);
    merge_into(root, QUARRIES_KEY, quarries);
}

/// Determines the type from the `type` tag, then from a nemesis node.
fn classify(monster: &Map<String, Value>) -> MonsterType {
    if let Some(monster_type) = str_field(monster, "type").and_then(|t| t.parse().ok()) {
        return monster_type;
    }
    match parse_node(monster) {
        Some(node) if node.is_nemesis_node() => MonsterType::Nemesis,
        _ => MonsterType::Quarry,
    }
}

fn parse_node(monster: &Map<String, Value>) -> Option<MonsterNode> {
    str_field(monster, "node").and_then(|node| node.parse().ok())
}

fn normalize(monster: &mut Map<String, Value>, monster_type: MonsterType, bestiary: &Bestiary) {
    let node = parse_node(monster).unwrap_or_else(|| monster_type.default_node());
    monster.insert("node".to_string(), json!(node.as_str()));

    default_object(monster, "timeline");
    let timeline_empty = monster
        .get("timeline")
        .and_then(Value::as_object)
        .is_some_and(Map::is_empty);
    if timeline_empty {
        let name = str_field(monster, "name").unwrap_or_default();
        let variant_timeline = find_variant(bestiary.table(monster_type), name)
            .and_then(|variant| variant.timeline())
            .filter(|timeline| !timeline.is_empty())
            .map(timeline_to_value);
        if let Some(timeline) = variant_timeline {
            monster.insert("timeline".to_string(), timeline);
        }
    }

    match monster_type {
        MonsterType::Nemesis => {
            for field in QUARRY_ONLY {
                monster.remove(field);
            }
        }
        MonsterType::Quarry => {
            default_object(monster, "huntBoard");
            default_array(monster, "locations");
            default_array(monster, "ccRewards");
        }
    }
}

fn merge_into(root: &mut Map<String, Value>, key: &str, incoming: Map<String, Value>) {
    if incoming.is_empty() {
        return;
    }
    let Some(target) = root.get_mut(key).and_then(Value::as_object_mut) else {
        tracing::warn!("'{}' is not an object, dropping {} migrated monsters", key, incoming.len());
        return;
    };
    for (id, monster) in incoming {
        target.entry(id).or_insert(monster);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn migrate(mut doc: Value) -> Value {
        partition_custom_monsters(&mut doc, Bestiary::standard());
        doc
    }

    #[test]
    fn test_monsters_are_split_by_type() {
        let doc = migrate(json!({
            "customMonsters": {
                "a1": {
                    "name": "Gold Smoke Knight",
                    "type": "nemesis",
                    "node": "NN3",
                    "timeline": { "20": ["Nemesis Encounter - Gold Smoke Knight"] },
                    "huntBoard": { "1": "basic" },
                    "locations": [],
                    "ccRewards": []
                },
                "b2": {
                    "name": "Frogdog",
                    "type": "quarry",
                    "node": "NQ2",
                    "huntBoard": { "2": "event" }
                }
            }
        }));

        assert!(doc.get("customMonsters").is_none());

        let nemesis = &doc["customNemeses"]["a1"];
        assert_eq!(nemesis["name"], "Gold Smoke Knight");
        assert_eq!(nemesis["node"], "NN3");
        assert!(nemesis.get("type").is_none());
        assert!(nemesis.get("huntBoard").is_none());
        assert!(nemesis.get("locations").is_none());
        assert!(nemesis.get("ccRewards").is_none());

        let quarry = &doc["customQuarries"]["b2"];
        assert_eq!(quarry["huntBoard"], json!({ "2": "event" }));
        assert_eq!(quarry["locations"], json!([]));
        assert_eq!(quarry["ccRewards"], json!([]));
        assert_eq!(quarry["timeline"], json!({}));
    }

    #[test]
    fn test_missing_type_is_inferred_from_node() {
        let doc = migrate(json!({
            "customMonsters": {
                "n": { "name": "Stalker", "node": "NN2" },
                "q": { "name": "Crawler" }
            }
        }));

        assert_eq!(doc["customNemeses"]["n"]["node"], "NN2");
        assert_eq!(doc["customQuarries"]["q"]["node"], "NQ1");
    }

    #[test]
    fn test_unknown_node_falls_back_to_type_default() {
        let doc = migrate(json!({
            "customMonsters": { "x": { "name": "Odd", "type": "nemesis", "node": "ZZ" } }
        }));

        assert_eq!(doc["customNemeses"]["x"]["node"], "NN1");
    }

    #[test]
    fn test_empty_timeline_is_backfilled_from_variant() {
        let doc = migrate(json!({
            "customMonsters": {
                "k": { "name": "Killenium Butcher", "type": "nemesis" },
                "g": { "name": "White Gigalion", "type": "quarry", "timeline": {} },
                "s": { "name": "Screaming Nukalope", "type": "quarry" }
            }
        }));

        assert_eq!(
            doc["customNemeses"]["k"]["timeline"],
            json!({ "4": ["Nemesis Encounter - Killenium Butcher Lvl 1"] })
        );
        assert_eq!(
            doc["customQuarries"]["g"]["timeline"],
            json!({ "1": ["Returning Survivors"] })
        );
        assert_eq!(doc["customQuarries"]["s"]["timeline"], json!({}));
    }

    #[test]
    fn test_existing_entries_win_on_collision() {
        let doc = migrate(json!({
            "customQuarries": { "dup": { "name": "Current" } },
            "customMonsters": { "dup": { "name": "Legacy", "type": "quarry" } }
        }));

        assert_eq!(doc["customQuarries"]["dup"]["name"], "Current");
    }

    #[test]
    fn test_absent_custom_monsters_yields_empty_maps() {
        let doc = migrate(json!({ "settlements": [] }));

        assert_eq!(doc["customNemeses"], json!({}));
        assert_eq!(doc["customQuarries"], json!({}));
        assert!(doc.get("customMonsters").is_none());
    }

    #[test]
    fn test_non_object_custom_monsters_is_left_alone() {
        let doc = migrate(json!({ "customMonsters": [1, 2] }));

        assert_eq!(doc["customMonsters"], json!([1, 2]));
        assert_eq!(doc["customNemeses"], json!({}));
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let doc = migrate(json!({
            "customMonsters": { "bad": 3, "good": { "name": "Fine" } }
        }));

        assert!(doc["customQuarries"].get("bad").is_none());
        assert_eq!(doc["customQuarries"]["good"]["name"], "Fine");
    }
}
