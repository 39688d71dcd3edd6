//! Fixed timestep simulation tick
//!
//! One call advances the whole encounter: due timers fire first, then
//! player control, abilities, melee, the per-mode spawn scheduler, enemy
//! AI, projectiles, contact damage, and the round-ending checks. Events
//! describing everything that happened are returned for the presentation
//! layer.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use super::combat;
use super::mode::{Mode, ModeParams};
use super::progression;
use super::roster::character_def;
use super::state::{Enemy, EnemyKind, Facing, GameEvent, GameState, Projectile};
use super::timer::TimerAction;
use super::ability::{AbilityId, EffectKind};

/// Input snapshot for a single tick. Button fields are edge-triggered by
/// the host (pressed this tick), not held state, except `left`/`right`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Melee attack
    pub attack: bool,
    /// Selected character's primary ability
    pub primary: bool,
    /// Selected character's secondary ability
    pub secondary: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the simulation by one fixed timestep of `dt` seconds.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = std::mem::take(&mut state.pending_events);

    if input.pause {
        state.paused = !state.paused;
    }
    // Paused: clock frozen, nothing moves, nothing spawns.
    if state.paused {
        return events;
    }

    state.time_ticks += 1;
    state.now_ms += dt as f64 * 1000.0;
    let now = state.now_ms;
    let params = state.params();

    drain_timers(state, now, &mut events);
    fire_abilities(state, input, &params, now, &mut events);
    step_player(state, input, dt);
    melee_attack(state, input, now, &mut events);
    run_scheduler(state, &params, now, &mut events);
    step_enemies(state, &params, dt);
    step_projectiles(state, dt, now, &mut events);

    if contact_damage(state, &params, now, &mut events) {
        // Player fell; the round was reset atomically.
        return events;
    }
    if let Some(limit) = params.time_limit_ms
        && now - state.mode_start_ms >= limit
    {
        state.game_over(&mut events);
        return events;
    }
    arena_wave_check(state, &mut events);

    events
}

fn drain_timers(state: &mut GameState, now: f64, events: &mut Vec<GameEvent>) {
    for action in state.timers.drain_due(now) {
        match action {
            TimerAction::ExpireProjectile(id) => {
                let before = state.projectiles.len();
                state.projectiles.retain(|p| p.id != id);
                if state.projectiles.len() < before {
                    events.push(GameEvent::ProjectileExpired { id });
                }
            }
            TimerAction::ClearHitFlash(id) => {
                if let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == id) {
                    enemy.flashing = false;
                    events.push(GameEvent::EnemyFlashCleared { id });
                }
            }
        }
    }
}

fn step_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;

    if input.left && !input.right {
        player.vel.x = -PLAYER_MOVE_SPEED;
        player.facing = Facing::Left;
    } else if input.right && !input.left {
        player.vel.x = PLAYER_MOVE_SPEED;
        player.facing = Facing::Right;
    } else {
        // Bleed off any dash impulse instead of stopping dead.
        player.vel.x *= 0.8;
        if player.vel.x.abs() < 1.0 {
            player.vel.x = 0.0;
        }
    }

    if input.jump && player.on_ground() {
        player.vel.y = -PLAYER_JUMP_VEL;
    }

    player.vel.y += GRAVITY * dt;
    player.pos += player.vel * dt;

    player.pos.x = player
        .pos
        .x
        .clamp(PLAYER_HALF_WIDTH, WORLD_WIDTH - PLAYER_HALF_WIDTH);
    if player.pos.y + PLAYER_HALF_HEIGHT >= GROUND_Y {
        player.pos.y = GROUND_Y - PLAYER_HALF_HEIGHT;
        player.vel.y = 0.0;
    }
}

fn fire_abilities(
    state: &mut GameState,
    input: &TickInput,
    params: &ModeParams,
    now: f64,
    events: &mut Vec<GameEvent>,
) {
    let character = character_def(state.roster.selected());
    if input.primary {
        use_ability(state, character.primary_ability, params, now, events);
    }
    if input.secondary {
        use_ability(state, character.secondary_ability, params, now, events);
    }
}

fn use_ability(
    state: &mut GameState,
    id: AbilityId,
    params: &ModeParams,
    now: f64,
    events: &mut Vec<GameEvent>,
) {
    // Training bypasses the gate entirely and leaves the clocks untouched.
    let effect = if params.abilities_free {
        Some(state.abilities.use_free(id))
    } else {
        state.abilities.try_use(id, now)
    };
    let Some(effect) = effect else {
        return; // still cooling down; no state change
    };
    state.stats.on_ability_used();

    let facing = state.player.facing;
    match effect {
        EffectKind::Dash {
            impulse_x,
            impulse_y,
        } => {
            state.player.vel.x = facing.sign() * impulse_x;
            state.player.vel.y = impulse_y;
        }
        EffectKind::Projectile {
            speed_x,
            speed_y,
            damage,
            ttl_ms,
            spawn_offset_x,
            spawn_offset_y,
        } => {
            let id = state.next_entity_id();
            let origin = state.player.pos
                + Vec2::new(facing.sign() * spawn_offset_x, spawn_offset_y);
            state.projectiles.push(Projectile {
                id,
                pos: origin,
                vel: Vec2::new(facing.sign() * speed_x, speed_y),
                damage,
            });
            state
                .timers
                .schedule(now + ttl_ms, TimerAction::ExpireProjectile(id));
            state.stats.on_projectile_fired();
            events.push(GameEvent::ProjectileFired { id, origin, facing });
        }
    }
}

fn melee_attack(state: &mut GameState, input: &TickInput, now: f64, events: &mut Vec<GameEvent>) {
    if !input.attack || now - state.last_melee_ms < MELEE_COOLDOWN_MS {
        return;
    }
    state.last_melee_ms = now;

    let facing = state.player.facing;
    let center = combat::melee_center(state.player.pos, facing);
    events.push(GameEvent::MeleeTriggered {
        origin: center,
        facing,
    });

    let player_x = state.player.pos.x;
    let mut defeated = Vec::new();
    for enemy in state.enemies.iter_mut() {
        if !combat::in_melee_range(center, enemy.pos) {
            continue;
        }
        enemy.hp = (enemy.hp - MELEE_DAMAGE).clamp(0.0, enemy.max_hp);
        enemy.flashing = true;
        state
            .timers
            .schedule(now + MELEE_FLASH_MS, TimerAction::ClearHitFlash(enemy.id));
        state.stats.on_melee_hit(MELEE_DAMAGE);
        events.push(GameEvent::EnemyDamaged {
            id: enemy.id,
            hp: enemy.hp,
        });
        if enemy.hp <= 0.0 {
            defeated.push((enemy.id, enemy.kind));
        } else {
            enemy.vel.x = combat::knockback_sign(player_x, enemy.pos.x) * KNOCKBACK_SPEED;
        }
    }
    handle_defeats(state, defeated, events);
}

/// Per-mode spawn decisions behind the shared timer gate.
fn run_scheduler(
    state: &mut GameState,
    params: &ModeParams,
    now: f64,
    events: &mut Vec<GameEvent>,
) {
    // Boss rush runs a second, independent timer.
    if let Some(every) = params.boss_every_ms
        && let Some(at) = state.next_boss_at_ms
        && now > at
    {
        spawn_enemy(state, EnemyKind::Boss, params, events);
        state.next_boss_at_ms = Some(now + every);
    }

    if now <= state.next_spawn_at_ms {
        return;
    }
    // Every decision draws a fresh delay, spawn or not.
    state.next_spawn_at_ms = now
        + state
            .rng
            .random_range(params.spawn_delay_min_ms..=params.spawn_delay_max_ms);

    if state.mode == Mode::Arena {
        if state.arena_remaining > 0 {
            spawn_enemy(state, EnemyKind::Normal, params, events);
            state.arena_remaining -= 1;
        }
        return;
    }

    let cap = progression::current_params(state.level_index).enemy_count_cap;
    if (state.enemies.len() as u32) < cap {
        spawn_enemy(state, EnemyKind::Normal, params, events);
    }
}

fn spawn_enemy(
    state: &mut GameState,
    kind: EnemyKind,
    params: &ModeParams,
    events: &mut Vec<GameEvent>,
) {
    let base_hp = progression::current_params(state.level_index).base_enemy_hp as f32;
    let kind_mult = match kind {
        EnemyKind::Normal => 1.0,
        EnemyKind::Boss => BOSS_HP_MULT,
    };
    let max_hp = base_hp * params.enemy_hp_multiplier * kind_mult;

    let from_left = state.rng.random_bool(0.5);
    let x = if from_left { 40.0 } else { WORLD_WIDTH - 40.0 };
    let y = 200.0 + state.rng.random_range(0.0..120.0f32);
    let walk = ENEMY_WALK_SPEED * params.enemy_speed_multiplier;

    let id = state.next_entity_id();
    let pos = Vec2::new(x, y);
    state.enemies.push(Enemy {
        id,
        kind,
        hp: max_hp,
        max_hp,
        pos,
        vel: Vec2::new(if from_left { walk } else { -walk }, 0.0),
        contact_invulnerable_until: f64::NEG_INFINITY,
        flashing: false,
    });
    state.stats.on_enemy_spawned();
    events.push(GameEvent::EnemySpawned {
        id,
        kind,
        max_hp,
        pos,
    });
}

fn step_enemies(state: &mut GameState, params: &ModeParams, dt: f32) {
    let player_x = state.player.pos.x;
    let walk = ENEMY_WALK_SPEED * params.enemy_speed_multiplier;

    for enemy in state.enemies.iter_mut() {
        // Hit-stunned enemies keep their knockback velocity until the
        // flash clears; everyone else chases, with an occasional hop.
        if !enemy.flashing {
            let dx = player_x - enemy.pos.x;
            let dir = if dx == 0.0 {
                if state.rng.random_bool(0.5) { -1.0 } else { 1.0 }
            } else {
                dx.signum()
            };
            enemy.vel.x = dir * walk;
            if enemy.on_ground() && state.rng.random_bool(ENEMY_JUMP_CHANCE) {
                enemy.vel.y = -ENEMY_JUMP_VEL;
            }
        }

        enemy.vel.y += GRAVITY * dt;
        enemy.pos += enemy.vel * dt;
        enemy.pos.x = enemy
            .pos
            .x
            .clamp(ENEMY_HALF_WIDTH, WORLD_WIDTH - ENEMY_HALF_WIDTH);
        if enemy.pos.y + ENEMY_HALF_HEIGHT >= GROUND_Y {
            enemy.pos.y = GROUND_Y - ENEMY_HALF_HEIGHT;
            enemy.vel.y = 0.0;
        }
    }
}

fn step_projectiles(state: &mut GameState, dt: f32, now: f64, events: &mut Vec<GameEvent>) {
    let enemy_half = Vec2::new(ENEMY_HALF_WIDTH, ENEMY_HALF_HEIGHT);
    let mut consumed = Vec::new();
    let mut defeated = Vec::new();

    for projectile in state.projectiles.iter_mut() {
        projectile.pos += projectile.vel * dt;

        // First overlapped enemy absorbs the shot; no piercing.
        let hit = state
            .enemies
            .iter_mut()
            .find(|e| combat::bodies_overlap(projectile.pos, Vec2::ZERO, e.pos, enemy_half));
        let Some(enemy) = hit else {
            continue;
        };
        enemy.hp = (enemy.hp - projectile.damage).clamp(0.0, enemy.max_hp);
        enemy.flashing = true;
        state.timers.schedule(
            now + PROJECTILE_FLASH_MS,
            TimerAction::ClearHitFlash(enemy.id),
        );
        state.stats.on_projectile_hit(projectile.damage);
        events.push(GameEvent::EnemyDamaged {
            id: enemy.id,
            hp: enemy.hp,
        });
        if enemy.hp <= 0.0 {
            defeated.push((enemy.id, enemy.kind));
        }
        consumed.push(projectile.id);
    }

    state.projectiles.retain(|p| !consumed.contains(&p.id));
    handle_defeats(state, defeated, events);
}

/// Contact damage from overlapping enemies; returns true if the round
/// ended.
fn contact_damage(
    state: &mut GameState,
    params: &ModeParams,
    now: f64,
    events: &mut Vec<GameEvent>,
) -> bool {
    if !params.player_takes_damage {
        return false;
    }
    let player_pos = state.player.pos;
    let player_half = Vec2::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT);
    let enemy_half = Vec2::new(ENEMY_HALF_WIDTH, ENEMY_HALF_HEIGHT);

    let mut hits = 0;
    for enemy in state.enemies.iter_mut() {
        if now < enemy.contact_invulnerable_until {
            continue;
        }
        if !combat::bodies_overlap(player_pos, player_half, enemy.pos, enemy_half) {
            continue;
        }
        // One hit, then this enemy re-arms after the invulnerability
        // window.
        enemy.contact_invulnerable_until = now + CONTACT_INVULN_MS;
        hits += 1;
    }
    if hits == 0 {
        return false;
    }

    state.player.hp = (state.player.hp - CONTACT_DAMAGE * hits).clamp(0, state.player.max_hp);
    state.stats.on_damage_taken(CONTACT_DAMAGE * hits);
    events.push(GameEvent::PlayerDamaged {
        hp: state.player.hp,
    });
    if state.player.hp <= 0 {
        state.game_over(events);
        return true;
    }
    false
}

/// Arena advances a level once the wave quota is spent and the field is
/// clear.
fn arena_wave_check(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.mode != Mode::Arena || state.arena_remaining > 0 || !state.enemies.is_empty() {
        return;
    }
    state.level_index += 1;
    state.ledger.add_coins(ARENA_CLEAR_COINS);
    state.stats.on_coins(ARENA_CLEAR_COINS as u64);
    state.stats.on_level_gained();
    state.arena_remaining = state.params().wave_size.unwrap_or(0);
    events.push(GameEvent::LevelChanged(state.level_index));
}

fn handle_defeats(
    state: &mut GameState,
    defeated: Vec<(u32, EnemyKind)>,
    events: &mut Vec<GameEvent>,
) {
    for (id, kind) in defeated {
        let before = state.enemies.len();
        state.enemies.retain(|e| e.id != id);
        if state.enemies.len() == before {
            continue;
        }
        events.push(GameEvent::EnemyDefeated { id });

        state.kills += 1;
        state.score += SCORE_PER_KILL;
        state.ledger.add_coins(COINS_PER_KILL);
        state.stats.on_coins(COINS_PER_KILL as u64);
        state.stats.on_enemy_defeated();
        if kind == EnemyKind::Boss {
            state.stats.on_boss_defeated();
        }
        if state.rng.random_bool(GEM_DROP_CHANCE) {
            state.ledger.add_gems(1);
            state.stats.on_gems(1);
        }

        // Arena has its own wave-clear level path.
        if state.mode != Mode::Arena && state.kills % KILLS_PER_LEVEL == 0 {
            state.level_index += 1;
            state.player.hp = (state.player.hp + LEVEL_UP_HEAL).min(state.player.max_hp);
            state.stats.on_level_gained();
            events.push(GameEvent::LevelChanged(state.level_index));
            events.push(GameEvent::PlayerDamaged {
                hp: state.player.hp,
            });
        }
    }
}
