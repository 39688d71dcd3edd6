//! Game modes and their encounter parameters
//!
//! A mode is a named ruleset: spawn pacing, enemy scaling, and win/loss
//! conditions. `resolve` is a pure table lookup; it never fails and never
//! stores state.

use serde::{Deserialize, Serialize};

/// The seven selectable rulesets, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Story,
    #[default]
    Endless,
    Arena,
    BossRush,
    TimeAttack,
    Challenge,
    Training,
}

/// All modes in cycle order.
pub const ALL_MODES: [Mode; 7] = [
    Mode::Story,
    Mode::Endless,
    Mode::Arena,
    Mode::BossRush,
    Mode::TimeAttack,
    Mode::Challenge,
    Mode::Training,
];

impl Mode {
    /// The next mode in the cycle, wrapping after the last.
    pub fn next(self) -> Mode {
        let idx = ALL_MODES.iter().position(|&m| m == self).unwrap_or(0);
        ALL_MODES[(idx + 1) % ALL_MODES.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Story => "story",
            Mode::Endless => "endless",
            Mode::Arena => "arena",
            Mode::BossRush => "bossRush",
            Mode::TimeAttack => "timeAttack",
            Mode::Challenge => "challenge",
            Mode::Training => "training",
        }
    }
}

/// Derived encounter parameters for a (mode, level) pair.
///
/// Invariants: `spawn_delay_min_ms <= spawn_delay_max_ms`, all multipliers
/// strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeParams {
    pub spawn_delay_min_ms: f64,
    pub spawn_delay_max_ms: f64,
    pub enemy_hp_multiplier: f32,
    pub enemy_speed_multiplier: f32,
    pub player_hp_multiplier: f32,
    /// Round length for time attack
    pub time_limit_ms: Option<f64>,
    /// Enemies per wave for arena
    pub wave_size: Option<u32>,
    /// Boss spawn period for boss rush
    pub boss_every_ms: Option<f64>,
    /// Training: abilities bypass the cooldown gate
    pub abilities_free: bool,
    pub player_takes_damage: bool,
}

impl Default for ModeParams {
    /// Neutral fallback: all multipliers 1, no special fields.
    fn default() -> Self {
        Self {
            spawn_delay_min_ms: 400.0,
            spawn_delay_max_ms: 1200.0,
            enemy_hp_multiplier: 1.0,
            enemy_speed_multiplier: 1.0,
            player_hp_multiplier: 1.0,
            time_limit_ms: None,
            wave_size: None,
            boss_every_ms: None,
            abilities_free: false,
            player_takes_damage: true,
        }
    }
}

/// Look up hand-tuned encounter parameters for a mode at a level.
pub fn resolve(mode: Mode, level_index: u32) -> ModeParams {
    let lvl = level_index as f32;
    match mode {
        Mode::Story => ModeParams {
            spawn_delay_min_ms: (1000.0 - level_index as f64 * 10.0).max(300.0),
            spawn_delay_max_ms: (1800.0 - level_index as f64 * 12.0).max(500.0),
            enemy_hp_multiplier: 1.0 + lvl * 0.03,
            ..ModeParams::default()
        },
        Mode::Endless => ModeParams {
            spawn_delay_min_ms: 280.0,
            spawn_delay_max_ms: 900.0,
            enemy_hp_multiplier: 1.0 + lvl * 0.05,
            enemy_speed_multiplier: 1.1,
            ..ModeParams::default()
        },
        Mode::Arena => ModeParams {
            spawn_delay_min_ms: 200.0,
            spawn_delay_max_ms: 400.0,
            enemy_hp_multiplier: 1.0 + lvl * 0.04,
            enemy_speed_multiplier: 1.05,
            wave_size: Some(12 + (lvl * 0.8) as u32),
            ..ModeParams::default()
        },
        Mode::BossRush => ModeParams {
            spawn_delay_min_ms: 900.0,
            spawn_delay_max_ms: 1400.0,
            enemy_hp_multiplier: 1.4 + lvl * 0.08,
            enemy_speed_multiplier: 0.95,
            player_hp_multiplier: 1.1,
            boss_every_ms: Some(15_000.0),
            ..ModeParams::default()
        },
        Mode::TimeAttack => ModeParams {
            spawn_delay_min_ms: 260.0,
            spawn_delay_max_ms: 780.0,
            enemy_hp_multiplier: 1.0 + lvl * 0.03,
            enemy_speed_multiplier: 1.05,
            time_limit_ms: Some(90_000.0),
            ..ModeParams::default()
        },
        Mode::Challenge => ModeParams {
            spawn_delay_min_ms: 240.0,
            spawn_delay_max_ms: 760.0,
            enemy_hp_multiplier: 1.2 + lvl * 0.06,
            enemy_speed_multiplier: 1.25,
            player_hp_multiplier: 0.75,
            ..ModeParams::default()
        },
        Mode::Training => ModeParams {
            spawn_delay_min_ms: 320.0,
            spawn_delay_max_ms: 1100.0,
            player_hp_multiplier: 10.0,
            abilities_free: true,
            player_takes_damage: false,
            ..ModeParams::default()
        },
    }
}
