//! 0.13.0 → 0.13.1: hunts and showdowns hold an array of monsters, each
//! with a structured AI deck instead of a single deck size.

use crate::migration::json::{default_value, objects_mut};
use kdm_core::monster::Bestiary;
use serde_json::{Map, Value, json};

const ENCOUNTERS: [&str; 2] = ["hunts", "showdowns"];

const AI_TIERS: [&str; 3] = ["basic", "advanced", "legendary"];

pub fn restructure_ai_decks(document: &mut Value, _bestiary: &Bestiary) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    for key in ENCOUNTERS {
        for encounter in objects_mut(root, key) {
            restructure_encounter(encounter);
        }
    }

    default_value(root, "selectedHuntMonsterIndex", json!(0));
    default_value(root, "selectedShowdownMonsterIndex", json!(0));
}

fn restructure_encounter(encounter: &mut Map<String, Value>) {
    if matches!(encounter.get("monsters"), None | Some(Value::Null)) {
        let monsters = match encounter.remove("monster") {
            Some(monster @ Value::Object(_)) => vec![monster],
            _ => Vec::new(),
        };
        encounter.insert("monsters".to_string(), Value::Array(monsters));
    }

    for monster in objects_mut(encounter, "monsters") {
        convert_ai_deck(monster);
    }
}

/// Replaces a legacy `aiDeckSize` with an `aiDeck` split and backfills
/// `aiDeckRemaining` with the deck total.
///
/// The whole legacy size is attributed to basic cards. A partial `aiDeck`
/// is defaulted tier by tier.
pub fn convert_ai_deck(monster: &mut Map<String, Value>) {
    let legacy_size = monster
        .remove("aiDeckSize")
        .and_then(|size| size.as_u64())
        .unwrap_or(0);

    let total = match monster.get_mut("aiDeck") {
        Some(Value::Object(deck)) => {
            for tier in AI_TIERS {
                default_value(deck, tier, json!(0));
            }
            AI_TIERS
                .iter()
                .map(|tier| deck.get(*tier).and_then(Value::as_u64).unwrap_or(0))
                .fold(0u64, u64::saturating_add)
        }
        _ => {
            monster.insert(
                "aiDeck".to_string(),
                json!({ "basic": legacy_size, "advanced": 0, "legendary": 0 }),
            );
            legacy_size
        }
    };

    default_value(monster, "aiDeckRemaining", json!(total));
}
