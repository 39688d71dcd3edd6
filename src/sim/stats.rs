//! Session stats accumulator
//!
//! Monotonic counters fed by combat/economy events, reset each session
//! and never persisted. The snapshot is a pure read.

/// Read-only aggregate handed to the UI/advisor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsSnapshot {
    pub session_seconds: u64,
    pub kills: u64,
    pub coins_earned: u64,
    pub gems_earned: u64,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub melee_hits: u64,
    pub ability_uses: u64,
    pub projectiles_fired: u64,
    pub enemies_spawned: u64,
    pub bosses_defeated: u64,
    pub levels_gained: u64,
    /// Damage dealt per elapsed second, rounded to one decimal
    pub dps: f64,
    /// Kills since the player last took damage
    pub hitless_streak: u64,
}

/// Counter store. All `on_*` hooks are monotone except the hitless streak,
/// which resets on damage taken.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    kills: u64,
    coins_earned: u64,
    gems_earned: u64,
    damage_dealt: f64,
    damage_taken: f64,
    melee_hits: u64,
    ability_uses: u64,
    projectiles_fired: u64,
    enemies_spawned: u64,
    bosses_defeated: u64,
    levels_gained: u64,
    hitless_streak: u64,
}

impl Stats {
    pub fn on_enemy_spawned(&mut self) {
        self.enemies_spawned += 1;
    }

    pub fn on_enemy_defeated(&mut self) {
        self.kills += 1;
        self.hitless_streak += 1;
    }

    pub fn on_boss_defeated(&mut self) {
        self.bosses_defeated += 1;
    }

    pub fn on_coins(&mut self, amount: u64) {
        self.coins_earned += amount;
    }

    pub fn on_gems(&mut self, amount: u64) {
        self.gems_earned += amount;
    }

    pub fn on_melee_hit(&mut self, damage: f32) {
        self.melee_hits += 1;
        self.damage_dealt += damage.max(0.0) as f64;
    }

    pub fn on_projectile_hit(&mut self, damage: f32) {
        self.damage_dealt += damage.max(0.0) as f64;
    }

    pub fn on_damage_taken(&mut self, amount: i32) {
        self.damage_taken += amount.max(0) as f64;
        self.hitless_streak = 0;
    }

    pub fn on_ability_used(&mut self) {
        self.ability_uses += 1;
    }

    pub fn on_projectile_fired(&mut self) {
        self.projectiles_fired += 1;
    }

    pub fn on_level_gained(&mut self) {
        self.levels_gained += 1;
    }

    /// Snapshot against the virtual clock. `elapsed_ms` is the session's
    /// simulated time, so DPS is deterministic under test.
    pub fn snapshot(&self, elapsed_ms: f64) -> StatsSnapshot {
        let seconds = ((elapsed_ms / 1000.0).round() as u64).max(1);
        let dps = (self.damage_dealt / seconds as f64 * 10.0).round() / 10.0;
        StatsSnapshot {
            session_seconds: seconds,
            kills: self.kills,
            coins_earned: self.coins_earned,
            gems_earned: self.gems_earned,
            damage_dealt: self.damage_dealt,
            damage_taken: self.damage_taken,
            melee_hits: self.melee_hits,
            ability_uses: self.ability_uses,
            projectiles_fired: self.projectiles_fired,
            enemies_spawned: self.enemies_spawned,
            bosses_defeated: self.bosses_defeated,
            levels_gained: self.levels_gained,
            dps,
            hitless_streak: self.hitless_streak,
        }
    }
}
