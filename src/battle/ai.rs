//! A module for defining AI behaviors for the automated side of a battle.

use crate::battle::calculators::{base_damage, BATTLE_LEVEL};
use crate::battle::state::{BattleState, Side};
use crate::rng::RandomSource;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// A trait for any system that can pick a move for the automated side.
/// This provides a common interface for different AI difficulties or strategies.
pub trait Behavior {
    /// Inspects the battle state and returns an index into `side`'s move
    /// pool, or `None` when the pool is empty.
    fn choose_move(
        &self,
        side: Side,
        battle_state: &BattleState,
        rng: &mut dyn RandomSource,
    ) -> Option<usize>;
}

/// Picks uniformly among the available moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomMoveAI;

impl RandomMoveAI {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomMoveAI {
    fn choose_move(
        &self,
        side: Side,
        battle_state: &BattleState,
        rng: &mut dyn RandomSource,
    ) -> Option<usize> {
        let pool_size = battle_state.combatant(side).move_pool.len();
        if pool_size == 0 {
            return None;
        }
        Some(rng.index(pool_size, "ai move selection"))
    }
}

/// Picks the move with the best expected damage against the current
/// defender. Ties go to the earlier move. Never consumes randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAI;

impl GreedyAI {
    pub fn new() -> Self {
        Self
    }

    /// Expected damage before variance: base damage weighted by the hit chance.
    fn score_move(&self, move_index: usize, side: Side, state: &BattleState) -> f64 {
        let attacker = state.combatant(side);
        let defender = state.combatant(side.other());
        let move_ = &attacker.move_pool[move_index];

        let base = base_damage(
            attacker.attack(),
            defender.defense(),
            move_.power,
            BATTLE_LEVEL,
        ) as f64;
        let hit_chance = move_.accuracy.min(100) as f64 / 100.0;
        base * hit_chance
    }
}

impl Behavior for GreedyAI {
    fn choose_move(
        &self,
        side: Side,
        battle_state: &BattleState,
        _rng: &mut dyn RandomSource,
    ) -> Option<usize> {
        let pool_size = battle_state.combatant(side).move_pool.len();
        (0..pool_size).max_by_key(|&index| {
            (
                ordered_float::OrderedFloat(self.score_move(index, side, battle_state)),
                Reverse(index),
            )
        })
    }
}

/// Names the available behaviors so binaries can pick one from a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiKind {
    #[default]
    Random,
    Greedy,
}

impl AiKind {
    pub fn build(self) -> Box<dyn Behavior + Send> {
        match self {
            AiKind::Random => Box::new(RandomMoveAI::new()),
            AiKind::Greedy => Box::new(GreedyAI::new()),
        }
    }
}

impl FromStr for AiKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(AiKind::Random),
            "greedy" => Ok(AiKind::Greedy),
            other => Err(format!("unknown AI '{}', expected 'random' or 'greedy'", other)),
        }
    }
}

impl fmt::Display for AiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiKind::Random => write!(f, "random"),
            AiKind::Greedy => write!(f, "greedy"),
        }
    }
}
