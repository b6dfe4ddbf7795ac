//! 0.12.0 → 0.13.0: backfill top-level collections, settings and selections.

use crate::migration::json::{default_array, default_false, default_object, default_value, object_mut};
use kdm_core::monster::Bestiary;
use serde_json::Value;

const COLLECTIONS: [&str; 4] = ["settlements", "survivors", "hunts", "showdowns"];

const SELECTIONS: [&str; 4] = [
    "selectedSettlementId",
    "selectedSurvivorId",
    "selectedHuntId",
    "selectedShowdownId",
];

const UNLOCK_FLAGS: [&str; 3] = ["killeniumButcher", "screamingNukalope", "whiteGigalion"];

pub fn backfill_defaults(document: &mut Value, _bestiary: &Bestiary) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    for key in COLLECTIONS {
        default_array(root, key);
    }
    default_object(root, "customMonsters");

    default_object(root, "settings");
    if let Some(settings) = object_mut(root, "settings") {
        default_false(settings, "disableToasts");
        default_object(settings, "unlockedMonsters");
        if let Some(unlocked) = object_mut(settings, "unlockedMonsters") {
            for flag in UNLOCK_FLAGS {
                default_false(unlocked, flag);
            }
        }
    }

    for key in SELECTIONS {
        default_value(root, key, Value::Null);
    }
}
