//! Session wiring
//!
//! A [`GameSession`] owns the simulation and a save store, restoring
//! progress on start and writing it back whenever something durable
//! changes: a level gained, a mode switch, an unlock, a round reset.
//! Discrete UI commands (mode cycling, character selection) live here
//! rather than in the per-tick input.

use crate::persistence::{self, SaveBlob, SaveStore};
use crate::sim::economy::CurrencyLedger;
use crate::sim::roster::{CharacterId, RosterState, character_def};
use crate::sim::state::{GameEvent, GameState};
use crate::sim::stats::StatsSnapshot;
use crate::sim::tick::{TickInput, tick};
use crate::sim::Mode;

pub struct GameSession<S: SaveStore> {
    state: GameState,
    store: S,
    /// Last loaded blob, kept so unknown keys written by newer builds
    /// survive our saves.
    blob: SaveBlob,
}

impl<S: SaveStore> GameSession<S> {
    /// Restore progress from `store` and stand up a fresh encounter.
    pub fn start(seed: u64, store: S) -> Self {
        let blob = persistence::load(&store, &SaveBlob::default());
        log::info!(
            "session start: mode {} level {} coins {} gems {}",
            blob.mode.as_str(),
            blob.level,
            blob.coins,
            blob.gems
        );

        let mut state = GameState::new(seed, blob.mode);
        state.level_index = blob.level.max(1);
        state.ledger = CurrencyLedger::new(blob.coins, blob.gems);
        state.roster = RosterState::from_save(&blob.unlocked, blob.selected);
        state.reset_encounter();

        Self { state, store, blob }
    }

    /// Advance one fixed timestep, persisting when a durable milestone
    /// shows up in the event stream.
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input, dt);
        if events.iter().any(|event| {
            matches!(
                event,
                GameEvent::LevelChanged(_) | GameEvent::ModeChanged(_) | GameEvent::GameOver
            )
        }) {
            self.flush();
        }
        events
    }

    /// Switch to the next mode in the cycle. Resets the encounter.
    pub fn cycle_mode(&mut self) -> Mode {
        let next = self.state.mode.next();
        self.state.set_mode(next);
        self.flush();
        next
    }

    /// Select a character, paying its unlock cost first if needed.
    /// Returns false when the character stays locked.
    pub fn select_or_unlock(&mut self, id: CharacterId) -> bool {
        if !self.state.roster.is_unlocked(id)
            && !self.state.roster.try_unlock(id, &mut self.state.ledger)
        {
            log::info!("cannot afford {}", character_def(id).name);
            return false;
        }
        self.state.roster.select(id);
        self.flush();
        true
    }

    /// Session stats against the simulation clock.
    pub fn stats(&self) -> StatsSnapshot {
        self.state.stats.snapshot(self.state.now_ms)
    }

    /// Write the current progress to the store.
    pub fn flush(&mut self) {
        let blob = self.to_blob();
        persistence::save(&mut self.store, &blob);
        self.blob = blob;
    }

    pub fn to_blob(&self) -> SaveBlob {
        SaveBlob {
            coins: self.state.ledger.coins(),
            gems: self.state.ledger.gems(),
            mode: self.state.mode,
            level: self.state.level_index,
            unlocked: self.state.roster.unlocked().to_vec(),
            selected: self.state.roster.selected(),
            mobile: self.blob.mobile,
            extra: self.blob.extra.clone(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
