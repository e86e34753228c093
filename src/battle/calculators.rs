use crate::battle::state::{BattleState, Side};
use crate::rng::RandomSource;
use schema::{Combatant, Move};

/// Every combatant fights at this level.
pub const BATTLE_LEVEL: u16 = 50;

/// Damage variance is drawn from `[VARIANCE_MIN, VARIANCE_MAX)`.
pub const VARIANCE_MIN: f64 = 0.85;
pub const VARIANCE_MAX: f64 = 1.0;

/// `floor(((2*L/5 + 2) * P * A / D) / 50 + 2)`, evaluated in floating point.
///
/// A defense of 0 is read as 1 so the quotient stays finite.
pub fn base_damage(attack: u16, defense: u16, power: u16, level: u16) -> u32 {
    let level_factor = 2.0 * level as f64 / 5.0 + 2.0;
    let defense = defense.max(1) as f64;
    let raw = level_factor * power as f64 * attack as f64 / defense / 50.0 + 2.0;
    raw.floor() as u32
}

/// `max(1, floor(base * variance))`, saturating at `u16::MAX`.
pub fn apply_variance(base: u32, variance: f64) -> u16 {
    let scaled = (base as f64 * variance).floor() as u16;
    scaled.max(1)
}

/// Result of the damage calculation for one hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub base: u32,
    pub variance: f64,
    pub damage: u16,
}

/// Rolls variance and applies the damage formula for `move_` from
/// `attacker` into `defender`.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_: &Move,
    rng: &mut dyn RandomSource,
) -> DamageRoll {
    let base = base_damage(
        attacker.attack(),
        defender.defense(),
        move_.power,
        BATTLE_LEVEL,
    );
    let variance = rng.uniform(VARIANCE_MIN, VARIANCE_MAX, "damage variance");
    DamageRoll {
        base,
        variance,
        damage: apply_variance(base, variance),
    }
}

/// Draws in `[0, 100)`; the move misses when the draw exceeds its accuracy.
pub fn move_hits(accuracy: u8, rng: &mut dyn RandomSource) -> bool {
    let roll = rng.percent_roll("accuracy check");
    roll <= accuracy as f64
}

/// What a single attack does, computed without touching the battle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    Missed,
    Hit {
        roll: DamageRoll,
        remaining_hp: u16,
        knocked_out: bool,
    },
}

/// Calculate the outcome of `attacker` using the move at `move_index`.
///
/// Consumes the accuracy draw, then (on a hit) the variance draw. The caller
/// has already validated the index.
pub fn calculate_attack_outcome(
    state: &BattleState,
    attacker: Side,
    move_index: usize,
    rng: &mut dyn RandomSource,
) -> AttackOutcome {
    let defender = attacker.other();
    let attacker_mon = state.combatant(attacker);
    let defender_mon = state.combatant(defender);
    let move_ = &attacker_mon.move_pool[move_index];

    if !move_hits(move_.accuracy, rng) {
        return AttackOutcome::Missed;
    }

    let roll = calculate_damage(attacker_mon, defender_mon, move_, rng);
    let remaining_hp = state.hp(defender).saturating_sub(roll.damage);
    AttackOutcome::Hit {
        roll,
        remaining_hp,
        knocked_out: remaining_hp == 0,
    }
}
