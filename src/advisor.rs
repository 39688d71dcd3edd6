//! Gameplay advisor
//!
//! Turns a stats snapshot plus session context into short text tips and
//! keyword-matched answers. Pure functions over the snapshot; nothing
//! here touches the simulation.

use crate::sim::mode::Mode;
use crate::sim::roster::{CharacterId, character_def};
use crate::sim::stats::StatsSnapshot;

/// What the advisor knows about the session beyond the stats.
#[derive(Debug, Clone, Copy)]
pub struct AdvisorContext {
    pub mode: Mode,
    pub level: u32,
    pub coins: u64,
    pub gems: u64,
    pub selected: CharacterId,
}

/// Up to four tips, most urgent first.
pub fn tips(stats: &StatsSnapshot, ctx: &AdvisorContext) -> Vec<String> {
    let mut tips = Vec::new();

    if stats.dps < 10.0 && stats.kills < 10 {
        tips.push("Try using abilities (Q/E) to boost your damage output.".to_owned());
    }
    if stats.damage_taken > stats.damage_dealt * 0.5 {
        tips.push(
            "You are taking a lot of damage. Jump to evade and strike after enemy jumps."
                .to_owned(),
        );
    }
    if ctx.mode == Mode::TimeAttack {
        tips.push("Time Attack: focus on fast melee and dashes to clear quickly.".to_owned());
    }
    if ctx.mode == Mode::BossRush {
        tips.push("Boss Rush: save abilities for boss spawns to burst them.".to_owned());
    }
    if stats.hitless_streak >= 15 {
        tips.push(format!(
            "Nice streak! {} enemies without getting hit.",
            stats.hitless_streak
        ));
    }
    if ctx.coins >= 800 {
        tips.push(
            "You have enough coins to unlock a new character. Press 2/3/4/5 or use the menu."
                .to_owned(),
        );
    }
    if ctx.gems >= 30 {
        tips.push("You have enough gems to unlock a premium character.".to_owned());
    }

    let character = character_def(ctx.selected);
    tips.push(format!(
        "{}: primary={}, secondary={}",
        character.name,
        character.primary_ability.as_str(),
        character.secondary_ability.as_str()
    ));

    if tips.len() == 1 {
        tips.insert(
            0,
            "Keep going! Cycle modes (M) and try Arena for burst rewards.".to_owned(),
        );
    }
    tips.truncate(4);
    tips
}

/// Answer a free-text question by keyword, first match wins.
pub fn answer(question: &str, stats: &StatsSnapshot, ctx: &AdvisorContext) -> String {
    let q = question.to_lowercase();

    if q.contains("gem") {
        return format!(
            "You have {} gems. Gems drop rarely on kills; higher levels and bosses increase chances.",
            ctx.gems
        );
    }
    if q.contains("coin") {
        return format!(
            "You have {} coins. Arena wave clears and kill farming increase coins quickly.",
            ctx.coins
        );
    }
    if q.contains("dps") || q.contains("damage") {
        return format!(
            "Current DPS: {}. Damage dealt: {}, taken: {}.",
            stats.dps, stats.damage_dealt, stats.damage_taken
        );
    }
    if q.contains("kill") {
        return format!(
            "Kills: {}, bosses: {}.",
            stats.kills, stats.bosses_defeated
        );
    }
    if q.contains("mode") {
        return format!(
            "Mode: {} at level {}. Arena spawns in waves; Boss Rush spawns bosses every ~15s.",
            ctx.mode.as_str(),
            ctx.level
        );
    }
    if q.contains("character") || q.contains("unlock") {
        return "Unlock characters with coins or gems. Use number keys 1-5 or the pause menu."
            .to_owned();
    }
    if q.contains("control") || q.contains("how") {
        return "Controls: Arrows move, Up jump, Space melee, Q/E abilities, M mode, Esc pause. \
                On mobile, use on-screen controls."
            .to_owned();
    }

    "I can help with stats (DPS, kills, coins/gems) and game tips (modes, unlocks). \
     Try asking: \"How to earn gems faster?\""
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> AdvisorContext {
        AdvisorContext {
            mode: Mode::Endless,
            level: 1,
            coins: 0,
            gems: 0,
            selected: CharacterId::Striker,
        }
    }

    fn quiet_stats() -> StatsSnapshot {
        StatsSnapshot {
            dps: 50.0,
            kills: 40,
            ..Default::default()
        }
    }

    #[test]
    fn test_low_output_tip_fires_early() {
        let stats = StatsSnapshot::default();
        let tips = tips(&stats, &ctx());
        assert!(tips[0].contains("abilities"));
    }

    #[test]
    fn test_quiet_session_still_gets_two_tips() {
        // With nothing to flag, the filler line plus the loadout line.
        let tips = tips(&quiet_stats(), &ctx());
        assert_eq!(tips.len(), 2);
        assert!(tips[0].contains("Keep going"));
        assert!(tips[1].starts_with("Striker:"));
    }

    #[test]
    fn test_tips_capped_at_four() {
        let stats = StatsSnapshot {
            damage_taken: 500.0,
            damage_dealt: 100.0,
            hitless_streak: 20,
            ..Default::default()
        };
        let context = AdvisorContext {
            mode: Mode::BossRush,
            coins: 1000,
            gems: 60,
            ..ctx()
        };
        assert_eq!(tips(&stats, &context).len(), 4);
    }

    #[test]
    fn test_answer_routes_by_keyword() {
        let stats = quiet_stats();
        let context = AdvisorContext {
            coins: 123,
            gems: 4,
            ..ctx()
        };
        assert!(answer("how many GEMS do I have?", &stats, &context).contains("4 gems"));
        assert!(answer("coin total?", &stats, &context).contains("123 coins"));
        assert!(answer("what's my dps", &stats, &context).contains("Current DPS"));
        assert!(answer("kills so far", &stats, &context).contains("Kills: 40"));
        assert!(answer("which mode", &stats, &context).contains("endless"));
    }

    #[test]
    fn test_answer_falls_back_politely() {
        let reply = answer("tell me a joke", &quiet_stats(), &ctx());
        assert!(reply.contains("I can help"));
    }
}
