//! Monster reference data: classification nodes, canonical records, the
//! standard bestiary and legacy name reconciliation.

mod bestiary;
mod reconcile;

pub use bestiary::Bestiary;
pub use reconcile::{
    QuarryResolution, Resolution, UNRESOLVED_ID, VariantKind, VariantMatch, find_variant,
    resolve_nemesis, resolve_quarry,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Lantern year → timeline events for that year.
pub type Timeline = BTreeMap<u32, Vec<String>>;

/// Whether a monster is hunted (quarry) or encountered at the settlement (nemesis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonsterType {
    Nemesis,
    Quarry,
}

impl MonsterType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MonsterType::Nemesis => "nemesis",
            MonsterType::Quarry => "quarry",
        }
    }

    /// The node assigned when a monster of this type cannot be classified.
    pub const fn default_node(&self) -> MonsterNode {
        match self {
            MonsterType::Nemesis => MonsterNode::NN1,
            MonsterType::Quarry => MonsterNode::NQ1,
        }
    }
}

impl FromStr for MonsterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nemesis" => Ok(MonsterType::Nemesis),
            "quarry" => Ok(MonsterType::Quarry),
            other => Err(format!("Unknown monster type: '{}'", other)),
        }
    }
}

/// Classification slot of a monster on the settlement's campaign board.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonsterNode {
    NQ1,
    NQ2,
    NQ3,
    NQ4,
    NN1,
    NN2,
    NN3,
    /// Core
    CO,
    /// Finale
    FI,
}

impl MonsterNode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MonsterNode::NQ1 => "NQ1",
            MonsterNode::NQ2 => "NQ2",
            MonsterNode::NQ3 => "NQ3",
            MonsterNode::NQ4 => "NQ4",
            MonsterNode::NN1 => "NN1",
            MonsterNode::NN2 => "NN2",
            MonsterNode::NN3 => "NN3",
            MonsterNode::CO => "CO",
            MonsterNode::FI => "FI",
        }
    }

    pub const fn is_nemesis_node(&self) -> bool {
        matches!(self, MonsterNode::NN1 | MonsterNode::NN2 | MonsterNode::NN3)
    }
}

impl fmt::Display for MonsterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonsterNode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NQ1" => Ok(MonsterNode::NQ1),
            "NQ2" => Ok(MonsterNode::NQ2),
            "NQ3" => Ok(MonsterNode::NQ3),
            "NQ4" => Ok(MonsterNode::NQ4),
            "NN1" => Ok(MonsterNode::NN1),
            "NN2" => Ok(MonsterNode::NN2),
            "NN3" => Ok(MonsterNode::NN3),
            "CO" => Ok(MonsterNode::CO),
            "FI" => Ok(MonsterNode::FI),
            other => Err(format!("Unknown monster node: '{}'", other)),
        }
    }
}

/// An alternate or vignette version of a standard monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterVariant {
    pub name: String,
    #[serde(default)]
    pub timeline: Timeline,
}

/// Canonical record of a standard monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub name: String,
    pub node: MonsterNode,
    #[serde(default)]
    pub timeline: Timeline,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate: Option<MonsterVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vignette: Option<MonsterVariant>,
}

impl MonsterRecord {
    pub fn new(name: impl Into<String>, node: MonsterNode) -> Self {
        Self {
            name: name.into(),
            node,
            timeline: Timeline::new(),
            alternate: None,
            vignette: None,
        }
    }

    pub fn with_timeline(mut self, entries: &[(u32, &[&str])]) -> Self {
        self.timeline = build_timeline(entries);
        self
    }

    pub fn with_alternate(mut self, name: impl Into<String>, entries: &[(u32, &[&str])]) -> Self {
        self.alternate = Some(MonsterVariant {
            name: name.into(),
            timeline: build_timeline(entries),
        });
        self
    }

    pub fn with_vignette(mut self, name: impl Into<String>, entries: &[(u32, &[&str])]) -> Self {
        self.vignette = Some(MonsterVariant {
            name: name.into(),
            timeline: build_timeline(entries),
        });
        self
    }
}

fn build_timeline(entries: &[(u32, &[&str])]) -> Timeline {
    entries
        .iter()
        .map(|(year, events)| (*year, events.iter().map(|e| e.to_string()).collect()))
        .collect()
}

/// Renders a timeline the way campaign documents store it: an object keyed
/// by the lantern year as a string.
pub fn timeline_to_value(timeline: &Timeline) -> Value {
    let map: Map<String, Value> = timeline
        .iter()
        .map(|(year, events)| {
            (
                year.to_string(),
                Value::Array(events.iter().cloned().map(Value::String).collect()),
            )
        })
        .collect();
    Value::Object(map)
}
