//! Arcstick headless entry point
//!
//! Runs the simulation at the fixed timestep with a scripted input
//! trace, logging progress once a second. Useful for smoke-testing
//! balance changes without a renderer attached.

use arcstick::advisor::{self, AdvisorContext};
use arcstick::consts::SIM_DT;
use arcstick::persistence::FileStore;
use arcstick::session::GameSession;
use arcstick::sim::TickInput;

fn main() {
    env_logger::init();
    log::info!("Arcstick (headless) starting...");

    let store = FileStore::new("arcstick-save.json");
    let mut session = GameSession::start(rand::random(), store);

    // Sixty simulated seconds: hold right toward the spawn lane, swing
    // every tick, dash and shoot as the cooldowns allow.
    let input = TickInput {
        right: true,
        attack: true,
        primary: true,
        secondary: true,
        ..Default::default()
    };
    let ticks_per_second = (1.0 / SIM_DT) as u64;
    for t in 0..60 * ticks_per_second {
        session.tick(&input, SIM_DT);
        if t % ticks_per_second == 0 {
            let state = session.state();
            let stats = session.stats();
            log::info!(
                "t={}s mode={} level={} hp={} enemies={} kills={} coins={} gems={} dps={}",
                t / ticks_per_second,
                state.mode.as_str(),
                state.level_index,
                state.player.hp,
                state.enemies.len(),
                state.kills,
                state.ledger.coins(),
                state.ledger.gems(),
                stats.dps,
            );
        }
    }

    let state = session.state();
    let ctx = AdvisorContext {
        mode: state.mode,
        level: state.level_index,
        coins: state.ledger.coins(),
        gems: state.ledger.gems(),
        selected: state.roster.selected(),
    };
    for tip in advisor::tips(&session.stats(), &ctx) {
        log::info!("advisor: {tip}");
    }

    session.flush();
    log::info!("progress saved");
}
