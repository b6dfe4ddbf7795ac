//! Read-only lookup tables of standard monsters.

use super::{MonsterNode, MonsterRecord, MonsterType};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

static STANDARD: Lazy<Bestiary> = Lazy::new(|| Bestiary::new(standard_nemeses(), standard_quarries()));

/// Nemesis and quarry lookup tables keyed by small positive integers.
///
/// Keys are stable across releases: they are what campaign documents store
/// once a monster has been reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bestiary {
    nemeses: BTreeMap<i64, MonsterRecord>,
    quarries: BTreeMap<i64, MonsterRecord>,
}

impl Bestiary {
    pub fn new(
        nemeses: BTreeMap<i64, MonsterRecord>,
        quarries: BTreeMap<i64, MonsterRecord>,
    ) -> Self {
        Self { nemeses, quarries }
    }

    /// The standard bestiary shipped with the tracker.
    pub fn standard() -> &'static Bestiary {
        &STANDARD
    }

    pub fn nemeses(&self) -> &BTreeMap<i64, MonsterRecord> {
        &self.nemeses
    }

    pub fn quarries(&self) -> &BTreeMap<i64, MonsterRecord> {
        &self.quarries
    }

    pub fn table(&self, monster_type: MonsterType) -> &BTreeMap<i64, MonsterRecord> {
        match monster_type {
            MonsterType::Nemesis => &self.nemeses,
            MonsterType::Quarry => &self.quarries,
        }
    }

    pub fn nemesis(&self, id: i64) -> Option<&MonsterRecord> {
        self.nemeses.get(&id)
    }

    pub fn quarry(&self, id: i64) -> Option<&MonsterRecord> {
        self.quarries.get(&id)
    }
}

fn standard_nemeses() -> BTreeMap<i64, MonsterRecord> {
    BTreeMap::from([
        (
            1,
            MonsterRecord::new("Butcher", MonsterNode::NN1)
                .with_timeline(&[
                    (4, &["Nemesis Encounter - Butcher Lvl 1"]),
                    (16, &["Nemesis Encounter - Butcher Lvl 2"]),
                    (23, &["Nemesis Encounter - Butcher Lvl 3"]),
                ])
                .with_vignette(
                    "Killenium Butcher",
                    &[(4, &["Nemesis Encounter - Killenium Butcher Lvl 1"])],
                ),
        ),
        (
            2,
            MonsterRecord::new("King's Man", MonsterNode::NN2).with_timeline(&[
                (9, &["Nemesis Encounter - King's Man Lvl 1"]),
                (19, &["Nemesis Encounter - King's Man Lvl 2"]),
                (28, &["Nemesis Encounter - King's Man Lvl 3"]),
            ]),
        ),
        (
            3,
            MonsterRecord::new("The Hand", MonsterNode::NN3).with_timeline(&[
                (11, &["Nemesis Encounter - The Hand Lvl 1"]),
                (22, &["Nemesis Encounter - The Hand Lvl 2"]),
            ]),
        ),
        (
            4,
            MonsterRecord::new("Lion Knight", MonsterNode::NN2).with_timeline(&[
                (6, &["Nemesis Encounter - Lion Knight Lvl 1"]),
                (13, &["Nemesis Encounter - Lion Knight Lvl 2"]),
            ]),
        ),
        (5, MonsterRecord::new("Manhunter", MonsterNode::NN1)),
        (6, MonsterRecord::new("Slenderman", MonsterNode::NN2)),
    ])
}

fn standard_quarries() -> BTreeMap<i64, MonsterRecord> {
    BTreeMap::from([
        (
            1,
            MonsterRecord::new("White Lion", MonsterNode::NQ1)
                .with_timeline(&[(1, &["Returning Survivors"])])
                .with_alternate("Beast of Sorrow", &[])
                .with_vignette("White Gigalion", &[(1, &["Returning Survivors"])]),
        ),
        (
            2,
            MonsterRecord::new("Screaming Antelope", MonsterNode::NQ2)
                .with_vignette("Screaming Nukalope", &[]),
        ),
        (3, MonsterRecord::new("Phoenix", MonsterNode::NQ3)),
        (
            4,
            MonsterRecord::new("Gorm", MonsterNode::NQ1).with_timeline(&[
                (1, &["The Approaching Storm"]),
                (2, &["Gorm Climate"]),
            ]),
        ),
        (
            5,
            MonsterRecord::new("Spidicules", MonsterNode::NQ2)
                .with_timeline(&[(2, &["Young Rivals"])]),
        ),
        (
            6,
            MonsterRecord::new("Sunstalker", MonsterNode::NQ3)
                .with_timeline(&[(1, &["Sun Dipping"]), (2, &["The Great Sky Gift"])]),
        ),
        (
            7,
            MonsterRecord::new("Dragon King", MonsterNode::NQ4)
                .with_timeline(&[(1, &["Foundlings"]), (2, &["Armored Fist"])]),
        ),
        (8, MonsterRecord::new("Flower Knight", MonsterNode::NQ2)),
    ])
}
