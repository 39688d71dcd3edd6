//! Deterministic game simulation
//!
//! The simulation advances on a fixed 60 Hz timestep driven by the host
//! loop. All randomness flows through the seeded RNG in [`GameState`],
//! so a seed plus an input trace replays the exact same run.

pub mod ability;
pub mod combat;
pub mod economy;
pub mod mode;
pub mod progression;
pub mod roster;
pub mod state;
pub mod stats;
pub mod tick;
pub mod timer;

pub use ability::{AbilityGate, AbilityId, EffectKind, ability_def};
pub use economy::CurrencyLedger;
pub use mode::{Mode, ModeParams};
pub use roster::{CHARACTERS, CharacterId, Cost, RosterState, character_def};
pub use state::{Enemy, EnemyKind, Facing, GameEvent, GameState, Player, Projectile};
pub use stats::{Stats, StatsSnapshot};
pub use tick::{TickInput, tick};
