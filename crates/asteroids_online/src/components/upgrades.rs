//! Upgrade ledger
//!
//! Tracks one level per declared upgrade kind. Levels only move up, one step
//! at a time, and never past the kind's cap.

use crate::config::UpgradeCaps;
use crate::dto::UpgradeKind;
use arcade_engine::prelude::Component;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    level: u8,
    max: u8,
}

/// Upgrade levels of a player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradesComponent {
    slots: BTreeMap<UpgradeKind, Slot>,
}

impl UpgradesComponent {
    /// Ledger declaring every upgrade kind at level 0
    pub fn new(caps: &UpgradeCaps) -> Self {
        Self::with_caps(UpgradeKind::ALL.iter().map(|&kind| (kind, caps.cap(kind))))
    }

    /// Ledger declaring only the given kinds
    pub fn with_caps(caps: impl IntoIterator<Item = (UpgradeKind, u8)>) -> Self {
        Self {
            slots: caps
                .into_iter()
                .map(|(kind, max)| (kind, Slot { level: 0, max }))
                .collect(),
        }
    }

    fn slot(&self, kind: UpgradeKind) -> &Slot {
        match self.slots.get(&kind) {
            Some(slot) => slot,
            None => panic!("upgrade kind {kind:?} is not declared in this ledger"),
        }
    }

    /// Whether `kind` is below its cap
    ///
    /// # Panics
    /// Panics if `kind` was not declared.
    pub fn can_upgrade(&self, kind: UpgradeKind) -> bool {
        let slot = self.slot(kind);
        slot.level < slot.max
    }

    /// Raise `kind` by one level
    ///
    /// Returns false, with no change, when already at the cap.
    ///
    /// # Panics
    /// Panics if `kind` was not declared.
    pub fn upgrade(&mut self, kind: UpgradeKind) -> bool {
        if !self.can_upgrade(kind) {
            return false;
        }
        if let Some(slot) = self.slots.get_mut(&kind) {
            slot.level += 1;
        }
        true
    }

    /// Current level of `kind`
    ///
    /// # Panics
    /// Panics if `kind` was not declared.
    pub fn level(&self, kind: UpgradeKind) -> u8 {
        self.slot(kind).level
    }

    /// Cap of `kind`
    ///
    /// # Panics
    /// Panics if `kind` was not declared.
    pub fn max_level(&self, kind: UpgradeKind) -> u8 {
        self.slot(kind).max
    }

    /// Overwrite levels with server state, clamped to each cap
    ///
    /// Undeclared kinds are ignored.
    pub fn sync_levels(&mut self, levels: &BTreeMap<UpgradeKind, u8>) {
        for (kind, &level) in levels {
            match self.slots.get_mut(kind) {
                Some(slot) => slot.level = level.min(slot.max),
                None => log::debug!("Ignoring undeclared upgrade {:?}", kind),
            }
        }
    }

    /// Snapshot of every declared level
    pub fn levels(&self) -> BTreeMap<UpgradeKind, u8> {
        self.slots.iter().map(|(&kind, slot)| (kind, slot.level)).collect()
    }
}

impl Component for UpgradesComponent {}
