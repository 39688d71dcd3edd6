//! Ability registry and cooldown gating
//!
//! The registry maps ability ids to cooldowns and engine-independent
//! effect descriptions. The gate tracks per-ability last-use timestamps
//! against the virtual clock; effects themselves are interpreted by the
//! tick pipeline (and, for the visual side, by the presentation layer).

use serde::{Deserialize, Serialize};

/// Named special actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityId {
    Dash,
    Projectile,
}

impl AbilityId {
    pub fn as_str(self) -> &'static str {
        match self {
            AbilityId::Dash => "dash",
            AbilityId::Projectile => "projectile",
        }
    }
}

/// What an ability does, as data. The sign of horizontal components is
/// flipped by the caller when the player faces left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectKind {
    /// Horizontal burst of movement with a small upward kick
    Dash { impulse_x: f32, impulse_y: f32 },
    /// Single-hit projectile fired in the facing direction
    Projectile {
        speed_x: f32,
        speed_y: f32,
        damage: f32,
        ttl_ms: f64,
        spawn_offset_x: f32,
        spawn_offset_y: f32,
    },
}

/// Immutable catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct AbilityDef {
    pub id: AbilityId,
    pub name: &'static str,
    pub cooldown_ms: f64,
    pub effect: EffectKind,
}

/// The fixed ability catalog.
pub const ABILITIES: [AbilityDef; 2] = [
    AbilityDef {
        id: AbilityId::Dash,
        name: "Dash",
        cooldown_ms: 1200.0,
        effect: EffectKind::Dash {
            impulse_x: 680.0,
            impulse_y: -80.0,
        },
    },
    AbilityDef {
        id: AbilityId::Projectile,
        name: "Pulse Shot",
        cooldown_ms: 900.0,
        effect: EffectKind::Projectile {
            speed_x: 520.0,
            speed_y: -40.0,
            damage: 18.0,
            ttl_ms: 1200.0,
            spawn_offset_x: 18.0,
            spawn_offset_y: -10.0,
        },
    },
];

pub fn ability_def(id: AbilityId) -> &'static AbilityDef {
    match id {
        AbilityId::Dash => &ABILITIES[0],
        AbilityId::Projectile => &ABILITIES[1],
    }
}

/// Per-session cooldown clocks. Default last-use is effectively -infinity
/// so every ability is ready at session start.
#[derive(Debug, Clone)]
pub struct AbilityGate {
    last_use_ms: [f64; 2],
}

impl Default for AbilityGate {
    fn default() -> Self {
        Self {
            last_use_ms: [f64::NEG_INFINITY; 2],
        }
    }
}

fn slot(id: AbilityId) -> usize {
    match id {
        AbilityId::Dash => 0,
        AbilityId::Projectile => 1,
    }
}

impl AbilityGate {
    /// Fire an ability if its cooldown has elapsed.
    ///
    /// On success the clock is stamped and the effect is returned exactly
    /// once; on cooldown nothing changes and `None` is returned.
    pub fn try_use(&mut self, id: AbilityId, now_ms: f64) -> Option<EffectKind> {
        let def = ability_def(id);
        if now_ms - self.last_use_ms[slot(id)] < def.cooldown_ms {
            return None;
        }
        self.last_use_ms[slot(id)] = now_ms;
        Some(def.effect)
    }

    /// Fetch the effect without consulting or stamping the clock.
    /// Used by modes with `abilities_free` (training).
    pub fn use_free(&self, id: AbilityId) -> EffectKind {
        ability_def(id).effect
    }

    /// Milliseconds until the ability is ready again (0 when ready).
    pub fn remaining_cooldown_ms(&self, id: AbilityId, now_ms: f64) -> f64 {
        let def = ability_def(id);
        (def.cooldown_ms - (now_ms - self.last_use_ms[slot(id)])).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_at_session_start() {
        let mut gate = AbilityGate::default();
        assert_eq!(gate.remaining_cooldown_ms(AbilityId::Dash, 0.0), 0.0);
        assert!(gate.try_use(AbilityId::Dash, 0.0).is_some());
    }

    #[test]
    fn test_cooldown_boundary_exact() {
        let mut gate = AbilityGate::default();
        let t0 = 5_000.0;
        let cd = ability_def(AbilityId::Projectile).cooldown_ms;

        assert!(gate.try_use(AbilityId::Projectile, t0).is_some());
        assert!(gate.try_use(AbilityId::Projectile, t0 + cd - 1.0).is_none());
        assert!(gate.try_use(AbilityId::Projectile, t0 + cd).is_some());
    }

    #[test]
    fn test_failed_use_does_not_stamp_clock() {
        let mut gate = AbilityGate::default();
        let t0 = 100.0;
        assert!(gate.try_use(AbilityId::Dash, t0).is_some());
        assert!(gate.try_use(AbilityId::Dash, t0 + 10.0).is_none());
        // Still counts down from t0, not from the failed attempt.
        assert_eq!(
            gate.remaining_cooldown_ms(AbilityId::Dash, t0 + 10.0),
            1190.0
        );
    }

    #[test]
    fn test_remaining_cooldown_counts_down_to_zero() {
        let mut gate = AbilityGate::default();
        let t0 = 0.0;
        let cd = ability_def(AbilityId::Dash).cooldown_ms;
        gate.try_use(AbilityId::Dash, t0);

        let mut prev = f64::INFINITY;
        for step in 0..=12 {
            let t = t0 + cd * step as f64 / 12.0;
            let remaining = gate.remaining_cooldown_ms(AbilityId::Dash, t);
            assert!(remaining <= prev);
            prev = remaining;
        }
        assert_eq!(gate.remaining_cooldown_ms(AbilityId::Dash, t0 + cd), 0.0);
    }

    #[test]
    fn test_free_use_bypasses_clock() {
        let gate = AbilityGate::default();
        let effect = gate.use_free(AbilityId::Dash);
        assert!(matches!(effect, EffectKind::Dash { .. }));
        // Clock untouched: gated use still ready.
        assert_eq!(gate.remaining_cooldown_ms(AbilityId::Dash, 1.0), 0.0);
    }

    #[test]
    fn test_gates_independent_per_ability() {
        let mut gate = AbilityGate::default();
        assert!(gate.try_use(AbilityId::Dash, 0.0).is_some());
        assert!(gate.try_use(AbilityId::Projectile, 0.0).is_some());
        assert!(gate.try_use(AbilityId::Dash, 1.0).is_none());
    }
}
