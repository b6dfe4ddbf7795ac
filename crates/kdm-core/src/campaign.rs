//! Typed view of a campaign document at the current schema version.
//!
//! Migration works on raw JSON so unknown fields survive; consumers decode
//! into these types only after the document has been migrated. Every struct
//! keeps unrecognised fields in `extra` so a decode/encode cycle is lossless.

use crate::monster::{MonsterNode, Timeline, UNRESOLVED_ID};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Survivor colour used when nothing better is known.
pub const DEFAULT_SURVIVOR_COLOR: &str = "neutral";

/// Root aggregate of one user's save state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub selected_settlement_id: Option<i64>,
    #[serde(default)]
    pub selected_survivor_id: Option<i64>,
    #[serde(default)]
    pub selected_hunt_id: Option<i64>,
    #[serde(default)]
    pub selected_showdown_id: Option<i64>,
    #[serde(default)]
    pub selected_hunt_monster_index: usize,
    #[serde(default)]
    pub selected_showdown_monster_index: usize,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
    #[serde(default)]
    pub survivors: Vec<Survivor>,
    #[serde(default)]
    pub hunts: Vec<Encounter>,
    #[serde(default)]
    pub showdowns: Vec<Encounter>,
    #[serde(default)]
    pub custom_nemeses: BTreeMap<String, CustomNemesis>,
    #[serde(default)]
    pub custom_quarries: BTreeMap<String, CustomQuarry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Campaign {
    pub fn settlement(&self, id: i64) -> Option<&Settlement> {
        self.settlements.iter().find(|s| s.id == id)
    }

    /// Survivors belonging to the given settlement, in document order.
    pub fn survivors_of(&self, settlement_id: i64) -> impl Iterator<Item = &Survivor> {
        self.survivors
            .iter()
            .filter(move |s| s.settlement == settlement_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub disable_toasts: bool,
    #[serde(default)]
    pub unlocked_monsters: UnlockedMonsters,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-monster unlock flags for vignette monsters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedMonsters {
    #[serde(default)]
    pub killenium_butcher: bool,
    #[serde(default)]
    pub screaming_nukalope: bool,
    #[serde(default)]
    pub white_gigalion: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nemeses: Vec<SettlementNemesis>,
    #[serde(default)]
    pub quarries: Vec<SettlementQuarry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementNemesis {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_nemesis_node")]
    pub node: MonsterNode,
    #[serde(default, deserialize_with = "year_keyed::deserialize")]
    pub timeline: Timeline,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub level1: bool,
    #[serde(default)]
    pub level2: bool,
    #[serde(default)]
    pub level3: bool,
    #[serde(default)]
    pub cc_level1: bool,
    #[serde(default)]
    pub cc_level2: bool,
    #[serde(default)]
    pub cc_level3: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettlementNemesis {
    pub fn is_resolved(&self) -> bool {
        self.id != UNRESOLVED_ID
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementQuarry {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quarry_node")]
    pub node: MonsterNode,
    #[serde(default, deserialize_with = "year_keyed::deserialize")]
    pub timeline: Timeline,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default)]
    pub cc_prologue: bool,
    #[serde(default)]
    pub cc_level1: bool,
    #[serde(default)]
    pub cc_level2: bool,
    #[serde(default)]
    pub cc_level3: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettlementQuarry {
    pub fn is_resolved(&self) -> bool {
        self.id != UNRESOLVED_ID
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survivor {
    pub id: i64,
    #[serde(default)]
    pub settlement: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_survivor_color")]
    pub color: String,
    #[serde(default)]
    pub wanderer: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A hunt or a showdown: survivors of one settlement facing monsters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub id: i64,
    #[serde(default)]
    pub settlement_id: i64,
    #[serde(default)]
    pub survivors: Vec<i64>,
    #[serde(default)]
    pub survivor_details: Vec<SurvivorDetail>,
    #[serde(default)]
    pub monsters: Vec<EncounterMonster>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-encounter state of a participating survivor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurvivorDetail {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterMonster {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default)]
    pub ai_deck: AiDeck,
    #[serde(default)]
    pub ai_deck_remaining: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A monster's AI draw pile, counted per card tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiDeck {
    #[serde(default)]
    pub basic: u32,
    #[serde(default)]
    pub advanced: u32,
    #[serde(default)]
    pub legendary: u32,
}

impl AiDeck {
    pub fn total(&self) -> u32 {
        self.basic
            .saturating_add(self.advanced)
            .saturating_add(self.legendary)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomNemesis {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_nemesis_node")]
    pub node: MonsterNode,
    #[serde(default, deserialize_with = "year_keyed::deserialize")]
    pub timeline: Timeline,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomQuarry {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quarry_node")]
    pub node: MonsterNode,
    #[serde(default, deserialize_with = "year_keyed::deserialize")]
    pub timeline: Timeline,
    #[serde(default)]
    pub hunt_board: Map<String, Value>,
    #[serde(default)]
    pub locations: Vec<Value>,
    #[serde(default)]
    pub cc_rewards: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Timelines are stored with lantern years as string keys. Structs holding
/// a flattened `extra` map buffer their fields, which breaks serde's usual
/// string-to-integer key conversion, so years are parsed here.
mod year_keyed {
    use super::*;
    use serde::de::Error;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timeline, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Vec<String>>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(year, events)| {
                year.trim()
                    .parse::<u32>()
                    .map(|year| (year, events))
                    .map_err(|e| D::Error::custom(format!("invalid lantern year '{}': {}", year, e)))
            })
            .collect()
    }
}

fn default_nemesis_node() -> MonsterNode {
    MonsterNode::NN1
}

fn default_quarry_node() -> MonsterNode {
    MonsterNode::NQ1
}

fn default_survivor_color() -> String {
    DEFAULT_SURVIVOR_COLOR.to_string()
}
