use crate::battle::runner::RoundOutcome;
use crate::battle::state::{BattleState, Side};
use crate::loot::{rarity_without_stats, LootDraw, PackCatalog};
use crate::roster::Roster;
use schema::{Combatant, Rarity};
use std::fmt;

const HP_BAR_WIDTH: usize = 20;

/// Colour band of an hp bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpBand {
    Green,
    Yellow,
    Red,
}

impl fmt::Display for HpBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HpBand::Green => "green",
            HpBand::Yellow => "yellow",
            HpBand::Red => "red",
        };
        write!(f, "{}", name)
    }
}

/// Remaining hp as a percentage of max hp.
pub fn hp_percentage(current: u16, max: u16) -> f64 {
    if max == 0 {
        return 0.0;
    }
    f64::from(current) * 100.0 / f64::from(max)
}

/// Above half is green, above a quarter yellow, anything lower red.
pub fn hp_band(current: u16, max: u16) -> HpBand {
    let percentage = hp_percentage(current, max);
    if percentage > 50.0 {
        HpBand::Green
    } else if percentage > 25.0 {
        HpBand::Yellow
    } else {
        HpBand::Red
    }
}

/// Renders e.g. `[##########----------]  50% (green)`.
pub fn hp_bar(current: u16, max: u16) -> String {
    let percentage = hp_percentage(current, max);
    let filled = ((percentage / 100.0) * HP_BAR_WIDTH as f64).ceil() as usize;
    let filled = filled.min(HP_BAR_WIDTH);
    format!(
        "[{}{}] {:>3.0}% ({})",
        "#".repeat(filled),
        "-".repeat(HP_BAR_WIDTH - filled),
        percentage,
        hp_band(current, max)
    )
}

pub fn display_battle_status(state: &BattleState) -> String {
    let mut output = String::new();
    for side in [Side::Opponent, Side::Player] {
        let combatant = state.combatant(side);
        output.push_str(&format!(
            "{:<12} HP {:>3}/{:<3} {}\n",
            combatant.name,
            state.hp(side),
            state.max_hp(side),
            hp_bar(state.hp(side), state.max_hp(side))
        ));
    }
    output.push_str(&format!("{}", state));
    output
}

/// Numbered move list, 1-based as typed by the player.
pub fn display_move_list(combatant: &Combatant) -> String {
    if combatant.move_pool.is_empty() {
        return format!("{} has no moves.\n", combatant.name);
    }
    let mut output = String::new();
    for (i, move_) in combatant.move_pool.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, move_));
    }
    output
}

pub fn display_round(round: &RoundOutcome) -> String {
    let mut output = String::new();
    for event in &round.events {
        output.push_str(&format!("{}\n", event.format()));
    }

    match round.winner {
        Some(Side::Player) => output.push_str("\nYou won the battle!\n"),
        Some(Side::Opponent) => output.push_str("\nYou lost the battle!\n"),
        None if round.opponent_skipped() => {
            output.push_str("\nThe opponent has no moves left to use. The battle cannot go on.\n")
        }
        None if round.opponent_stalled() => {
            output.push_str("\nThe opponent could not act. The battle cannot go on.\n")
        }
        None => {}
    }
    output
}

pub fn display_roster(roster: &Roster) -> String {
    let mut output = String::from("Available combatants:\n");
    for combatant in roster.combatants() {
        output.push_str(&format!("  {}\n", combatant));
    }
    output
}

pub fn display_pack_list(catalog: &PackCatalog) -> String {
    let mut output = String::from("Available packs:\n");
    for pack in &catalog.packs {
        output.push_str(&format!("  {} - {}\n", pack.id, pack.name));
        output.push_str(&format!("      {}\n", pack.description));
        let rates: Vec<String> = pack
            .table
            .tier_weights()
            .iter()
            .map(|(name, weight)| format!("{} {:.0}%", name, weight * 100.0))
            .collect();
        output.push_str(&format!("      {}\n", rates.join(" | ")));
    }
    output
}

/// One line per draw. `rarity` is shown when the caller knows it.
pub fn display_draw(draw: &LootDraw, rarity: Option<Rarity>) -> String {
    match rarity {
        Some(rarity) => format!("#{:04} [{}] classified {}", draw.id, draw.tier, rarity),
        None => format!("#{:04} [{}]", draw.id, draw.tier),
    }
}

/// A freshly opened draw, with its rarity when the id alone decides it.
pub fn display_opened_draw(draw: &LootDraw) -> String {
    display_draw(draw, rarity_without_stats(draw.id))
}
