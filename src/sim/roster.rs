//! Character catalog and unlock/selection state

use serde::{Deserialize, Serialize};

use super::ability::AbilityId;
use super::economy::CurrencyLedger;

/// Playable characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterId {
    Striker,
    Archon,
    Blazer,
    Phantom,
    Warden,
}

/// Price tier for a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cost {
    Coins(u64),
    Gems(u64),
}

/// Immutable catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct CharacterDef {
    pub id: CharacterId,
    pub name: &'static str,
    pub cost: Cost,
    pub base_attack: i32,
    pub primary_ability: AbilityId,
    pub secondary_ability: AbilityId,
}

impl CharacterDef {
    /// Premium characters are the gem-priced ones.
    pub fn premium(&self) -> bool {
        matches!(self.cost, Cost::Gems(_))
    }
}

/// The static five-character catalog, in selection order.
pub const CHARACTERS: [CharacterDef; 5] = [
    CharacterDef {
        id: CharacterId::Striker,
        name: "Striker",
        cost: Cost::Coins(0),
        base_attack: 10,
        primary_ability: AbilityId::Dash,
        secondary_ability: AbilityId::Projectile,
    },
    CharacterDef {
        id: CharacterId::Archon,
        name: "Archon",
        cost: Cost::Coins(800),
        base_attack: 9,
        primary_ability: AbilityId::Projectile,
        secondary_ability: AbilityId::Dash,
    },
    CharacterDef {
        id: CharacterId::Blazer,
        name: "Blazer",
        cost: Cost::Coins(2000),
        base_attack: 12,
        primary_ability: AbilityId::Dash,
        secondary_ability: AbilityId::Projectile,
    },
    CharacterDef {
        id: CharacterId::Phantom,
        name: "Phantom",
        cost: Cost::Gems(30),
        base_attack: 11,
        primary_ability: AbilityId::Projectile,
        secondary_ability: AbilityId::Dash,
    },
    CharacterDef {
        id: CharacterId::Warden,
        name: "Warden",
        cost: Cost::Gems(60),
        base_attack: 13,
        primary_ability: AbilityId::Dash,
        secondary_ability: AbilityId::Projectile,
    },
];

/// Look up a catalog entry by id.
pub fn character_def(id: CharacterId) -> &'static CharacterDef {
    CHARACTERS
        .iter()
        .find(|c| c.id == id)
        .unwrap_or(&CHARACTERS[0])
}

/// Unlock set and current selection.
///
/// Invariant: the starter is always unlocked and `selected` is always a
/// member of the unlocked set.
#[derive(Debug, Clone)]
pub struct RosterState {
    unlocked: Vec<CharacterId>,
    selected: CharacterId,
}

impl Default for RosterState {
    fn default() -> Self {
        Self {
            unlocked: vec![CharacterId::Striker],
            selected: CharacterId::Striker,
        }
    }
}

impl RosterState {
    /// Rebuild roster state from a persisted unlock list and selection.
    /// The starter is re-added and an out-of-set selection falls back to it.
    pub fn from_save(unlocked: &[CharacterId], selected: CharacterId) -> Self {
        let mut roster = RosterState::default();
        for &id in unlocked {
            if !roster.unlocked.contains(&id) {
                roster.unlocked.push(id);
            }
        }
        if roster.unlocked.contains(&selected) {
            roster.selected = selected;
        }
        roster
    }

    pub fn is_unlocked(&self, id: CharacterId) -> bool {
        self.unlocked.contains(&id)
    }

    pub fn selected(&self) -> CharacterId {
        self.selected
    }

    pub fn unlocked(&self) -> &[CharacterId] {
        &self.unlocked
    }

    /// Attempt to unlock a character by spending its price from the ledger.
    ///
    /// A repeat unlock is a no-op success regardless of balance. On an
    /// insufficient balance nothing changes.
    pub fn try_unlock(&mut self, id: CharacterId, ledger: &mut CurrencyLedger) -> bool {
        if self.is_unlocked(id) {
            return true;
        }
        let def = character_def(id);
        let paid = match def.cost {
            Cost::Coins(price) => ledger.spend_coins(price),
            Cost::Gems(price) => ledger.spend_gems(price),
        };
        if paid {
            self.unlocked.push(id);
        }
        paid
    }

    /// Change the selection. Fails without side effects if locked.
    pub fn select(&mut self, id: CharacterId) -> bool {
        if !self.is_unlocked(id) {
            return false;
        }
        self.selected = id;
        true
    }
}
