//! Live simulation state and the simulation-to-presentation event surface
//!
//! Everything here is owned by one session and advanced synchronously by
//! `tick`. Times are virtual-clock milliseconds; positions are pixels.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use super::ability::AbilityGate;
use super::economy::CurrencyLedger;
use super::mode::{self, Mode, ModeParams};
use super::roster::RosterState;
use super::stats::Stats;
use super::timer::TimerQueue;

/// Horizontal facing of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Normal,
    Boss,
}

/// A live enemy. Created by the encounter scheduler, removed on defeat or
/// mode reset, never reused.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub hp: f32,
    pub max_hp: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Contact damage re-arms once the clock passes this stamp
    pub contact_invulnerable_until: f64,
    /// Damage flash shown until cleared by the timer queue
    pub flashing: bool,
}

impl Enemy {
    pub fn on_ground(&self) -> bool {
        self.pos.y + ENEMY_HALF_HEIGHT >= GROUND_Y
    }
}

/// The player character.
#[derive(Debug, Clone)]
pub struct Player {
    pub hp: i32,
    pub max_hp: i32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
}

impl Player {
    fn spawn(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            pos: Vec2::new(PLAYER_SPAWN_X, GROUND_Y - PLAYER_HALF_HEIGHT),
            vel: Vec2::ZERO,
            facing: Facing::Right,
        }
    }

    pub fn on_ground(&self) -> bool {
        self.pos.y + PLAYER_HALF_HEIGHT >= GROUND_Y
    }
}

/// An in-flight ability projectile. Single hit; expires via the timer
/// queue when it outlives its TTL.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
}

/// Events emitted by one tick, consumed by the rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned {
        id: u32,
        kind: EnemyKind,
        max_hp: f32,
        pos: Vec2,
    },
    EnemyDamaged {
        id: u32,
        hp: f32,
    },
    EnemyDefeated {
        id: u32,
    },
    EnemyFlashCleared {
        id: u32,
    },
    MeleeTriggered {
        origin: Vec2,
        facing: Facing,
    },
    ProjectileFired {
        id: u32,
        origin: Vec2,
        facing: Facing,
    },
    ProjectileExpired {
        id: u32,
    },
    PlayerDamaged {
        hp: i32,
    },
    ModeChanged(Mode),
    LevelChanged(u32),
    GameOver,
}

/// Complete per-session simulation state.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub mode: Mode,
    /// 1-based level index
    pub level_index: u32,
    /// Virtual clock, ms since session start
    pub now_ms: f64,
    pub time_ticks: u64,
    pub paused: bool,

    // Encounter scheduler
    pub next_spawn_at_ms: f64,
    pub mode_start_ms: f64,
    pub arena_remaining: u32,
    pub next_boss_at_ms: Option<f64>,

    // Round-scoped combat state
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub kills: u64,
    pub score: u64,
    pub last_melee_ms: f64,

    // Cross-cutting session state
    pub ledger: CurrencyLedger,
    pub roster: RosterState,
    pub abilities: AbilityGate,
    pub stats: Stats,
    pub timers: TimerQueue,

    /// Events raised outside the tick (mode switch commands), drained
    /// into the next tick's output
    pub pending_events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh session at level 1 in the given mode.
    pub fn new(seed: u64, mode: Mode) -> Self {
        let params = mode::resolve(mode, 1);
        let max_hp = player_max_hp(&params);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode,
            level_index: 1,
            now_ms: 0.0,
            time_ticks: 0,
            paused: false,
            next_spawn_at_ms: 0.0,
            mode_start_ms: 0.0,
            arena_remaining: 0,
            next_boss_at_ms: None,
            player: Player::spawn(max_hp),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            kills: 0,
            score: 0,
            last_melee_ms: f64::NEG_INFINITY,
            ledger: CurrencyLedger::default(),
            roster: RosterState::default(),
            abilities: AbilityGate::default(),
            stats: Stats::default(),
            timers: TimerQueue::default(),
            pending_events: Vec::new(),
            next_id: 1,
        };
        state.reset_encounter();
        state
    }

    /// Mode parameters at the current level.
    pub fn params(&self) -> ModeParams {
        mode::resolve(self.mode, self.level_index)
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Re-arm the encounter scheduler from the current mode/level params.
    /// Clears the spawn timer so the next tick re-evaluates immediately,
    /// and cancels all pending one-shot timers atomically.
    pub fn reset_encounter(&mut self) {
        let params = self.params();
        self.mode_start_ms = self.now_ms;
        self.next_spawn_at_ms = 0.0;
        self.arena_remaining = params.wave_size.unwrap_or(0);
        self.next_boss_at_ms = params.boss_every_ms.map(|every| self.now_ms + every);
        self.enemies.clear();
        self.projectiles.clear();
        self.timers.clear();
        // Max HP follows the mode multiplier; current HP is clamped into
        // the new bounds.
        self.player.max_hp = player_max_hp(&params);
        self.player.hp = self.player.hp.clamp(0, self.player.max_hp);
    }

    /// Switch to a mode, resetting the scheduler. Queues a ModeChanged
    /// event for the next tick.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset_encounter();
        self.pending_events.push(GameEvent::ModeChanged(mode));
    }

    /// Round reset after the player falls or the time-attack clock runs
    /// out. Currency, unlocks, and stats survive; the round state does not.
    pub fn game_over(&mut self, events: &mut Vec<GameEvent>) {
        log::info!(
            "game over: mode={} level={} score={}",
            self.mode.as_str(),
            self.level_index,
            self.score
        );
        self.level_index = 1;
        self.kills = 0;
        self.score = 0;
        self.reset_encounter();
        self.player.hp = self.player.max_hp;
        events.push(GameEvent::GameOver);
        events.push(GameEvent::LevelChanged(self.level_index));
        events.push(GameEvent::PlayerDamaged {
            hp: self.player.hp,
        });
    }
}

/// Round the base HP through the mode multiplier.
pub fn player_max_hp(params: &ModeParams) -> i32 {
    (PLAYER_BASE_HP as f32 * params.player_hp_multiplier).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(7, Mode::Endless);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.player.hp, 100);
        assert_eq!(state.player.max_hp, 100);
        assert!(state.enemies.is_empty());
        assert_eq!(state.next_spawn_at_ms, 0.0);
    }

    #[test]
    fn test_mode_multiplier_shapes_max_hp() {
        let state = GameState::new(7, Mode::Training);
        assert_eq!(state.player.max_hp, 1000);
        let state = GameState::new(7, Mode::Challenge);
        assert_eq!(state.player.max_hp, 75);
    }

    #[test]
    fn test_set_mode_resets_scheduler() {
        let mut state = GameState::new(7, Mode::Endless);
        state.now_ms = 5_000.0;
        state.next_spawn_at_ms = 9_999.0;
        state.set_mode(Mode::BossRush);

        assert_eq!(state.mode_start_ms, 5_000.0);
        assert_eq!(state.next_spawn_at_ms, 0.0);
        assert_eq!(state.next_boss_at_ms, Some(20_000.0));
        assert!(matches!(
            state.pending_events.as_slice(),
            [GameEvent::ModeChanged(Mode::BossRush)]
        ));
    }

    #[test]
    fn test_arena_mode_arms_wave_counter() {
        let mut state = GameState::new(7, Mode::Endless);
        state.set_mode(Mode::Arena);
        assert_eq!(state.arena_remaining, 12);
    }

    #[test]
    fn test_game_over_clears_round_keeps_wallet() {
        let mut state = GameState::new(7, Mode::Endless);
        state.ledger.add_coins(42);
        state.level_index = 9;
        state.kills = 230;
        state.score = 2300;
        state.player.hp = 0;

        let mut events = Vec::new();
        state.game_over(&mut events);

        assert_eq!(state.level_index, 1);
        assert_eq!(state.kills, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.hp, state.player.max_hp);
        assert_eq!(state.ledger.coins(), 42);
        assert!(events.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = GameState::new(7, Mode::Endless);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
