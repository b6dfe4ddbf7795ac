//! 0.13.1 → 0.14.0: survivors gain `wanderer` and a cosmetic `color`.
//!
//! The colour is recovered from the survivor's participant record in the
//! most recent hunt of its settlement, then the most recent showdown.

use crate::migration::json::{default_false, default_value, int_field, str_field};
use kdm_core::campaign::DEFAULT_SURVIVOR_COLOR;
use kdm_core::monster::Bestiary;
use serde_json::{Map, Value};

const ENCOUNTERS: [&str; 2] = ["hunts", "showdowns"];

pub fn backfill_survivors(document: &mut Value, _bestiary: &Bestiary) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    let colors: Vec<String> = {
        let root: &Map<String, Value> = root;
        match root.get("survivors").and_then(Value::as_array) {
            Some(survivors) => survivors
                .iter()
                .map(|survivor| {
                    survivor
                        .as_object()
                        .and_then(|survivor| recorded_color(root, survivor))
                        .unwrap_or_else(|| DEFAULT_SURVIVOR_COLOR.to_string())
                })
                .collect(),
            None => return,
        }
    };

    let Some(survivors) = root.get_mut("survivors").and_then(Value::as_array_mut) else {
        return;
    };

    for (survivor, color) in survivors.iter_mut().zip(colors) {
        let Some(survivor) = survivor.as_object_mut() else {
            continue;
        };
        default_false(survivor, "wanderer");
        default_value(survivor, "color", Value::String(color));
    }
}

/// Finds the colour last recorded for `survivor` in its settlement's
/// encounters, searching hunts before showdowns.
fn recorded_color(root: &Map<String, Value>, survivor: &Map<String, Value>) -> Option<String> {
    let id = survivor.get("id")?;
    let settlement = int_field(survivor, "settlement")?;

    ENCOUNTERS.iter().find_map(|key| {
        let latest = root
            .get(*key)
            .and_then(Value::as_array)?
            .iter()
            .filter_map(Value::as_object)
            .rev()
            .find(|encounter| int_field(encounter, "settlementId") == Some(settlement))?;
        participant_color(latest, id)
    })
}

fn participant_color(encounter: &Map<String, Value>, survivor_id: &Value) -> Option<String> {
    encounter
        .get("survivorDetails")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(Value::as_object)
        .find(|detail| detail.get("id") == Some(survivor_id))
        .and_then(|detail| str_field(detail, "color"))
        .filter(|color| !color.is_empty())
        .map(str::to_string)
}
