//! Legacy entity reconciliation.
//!
//! Older campaign documents identify settlement monsters by display name.
//! These lookups resolve such names against a lookup table. The scan is
//! linear in ascending key order; the tables are small and reconciliation
//! runs once per document load.

use super::{MonsterNode, MonsterRecord};
use std::collections::BTreeMap;

/// Identifier stored for a legacy record whose name matches no known monster.
pub const UNRESOLVED_ID: i64 = -1;

/// Outcome of resolving a legacy monster name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The name matched the table entry with this key.
    Resolved(i64),
    /// No table entry has this name.
    Unresolved,
}

impl Resolution {
    /// The identifier to persist; [`UNRESOLVED_ID`] when unresolved.
    pub fn id(&self) -> i64 {
        match self {
            Resolution::Resolved(id) => *id,
            Resolution::Unresolved => UNRESOLVED_ID,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Outcome of resolving a legacy quarry name, including its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarryResolution {
    pub resolution: Resolution,
    /// The matched quarry's node, or `NQ1` when unresolved.
    pub node: MonsterNode,
}

impl QuarryResolution {
    pub fn id(&self) -> i64 {
        self.resolution.id()
    }
}

/// Which variant of a standard monster a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Alternate,
    Vignette,
}

/// A standard monster whose alternate or vignette carries a given name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantMatch<'a> {
    pub id: i64,
    pub kind: VariantKind,
    pub record: &'a MonsterRecord,
}

fn resolve<'a>(
    table: &'a BTreeMap<i64, MonsterRecord>,
    name: &str,
) -> Option<(i64, &'a MonsterRecord)> {
    table
        .iter()
        .find(|(_, record)| record.name == name)
        .map(|(id, record)| (*id, record))
}

/// Resolves a legacy nemesis name to its table key.
pub fn resolve_nemesis(table: &BTreeMap<i64, MonsterRecord>, name: &str) -> Resolution {
    match resolve(table, name) {
        Some((id, _)) => Resolution::Resolved(id),
        None => Resolution::Unresolved,
    }
}

/// Resolves a legacy quarry name to its table key and node.
pub fn resolve_quarry(table: &BTreeMap<i64, MonsterRecord>, name: &str) -> QuarryResolution {
    match resolve(table, name) {
        Some((id, record)) => QuarryResolution {
            resolution: Resolution::Resolved(id),
            node: record.node,
        },
        None => QuarryResolution {
            resolution: Resolution::Unresolved,
            node: MonsterNode::NQ1,
        },
    }
}

/// Finds the standard monster whose alternate or vignette is named `name`.
pub fn find_variant<'a>(
    table: &'a BTreeMap<i64, MonsterRecord>,
    name: &str,
) -> Option<VariantMatch<'a>> {
    table.iter().find_map(|(id, record)| {
        if record.alternate.as_ref().is_some_and(|v| v.name == name) {
            Some(VariantMatch {
                id: *id,
                kind: VariantKind::Alternate,
                record,
            })
        } else if record.vignette.as_ref().is_some_and(|v| v.name == name) {
            Some(VariantMatch {
                id: *id,
                kind: VariantKind::Vignette,
                record,
            })
        } else {
            None
        }
    })
}

impl<'a> VariantMatch<'a> {
    /// The timeline of the matched variant, borrowed from the lookup table.
    pub fn timeline(&self) -> Option<&'a super::Timeline> {
        let variant = match self.kind {
            VariantKind::Alternate => self.record.alternate.as_ref(),
            VariantKind::Vignette => self.record.vignette.as_ref(),
        };
        variant.map(|v| &v.timeline)
    }
}
