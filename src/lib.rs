//! Pokedex Arena
//!
//! A turn-based 1v1 battle engine and a tiered loot resolver for a Pokemon
//! companion app. Both engines are synchronous and take every random value
//! from an injected [`rng::RandomSource`], so tests can script exact outcomes.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod data;
pub mod display;
pub mod errors;
pub mod logging;
pub mod loot;
pub mod pokeapi;
pub mod rng;
pub mod roster;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{is_legendary, Combatant, Move, PokemonType, Rarity, LEGENDARY_IDS, MAX_MOVES};

// --- From this crate's modules (`src/`) ---

// Battle engine functions and state.
pub use battle::ai::{AiKind, Behavior, GreedyAI, RandomMoveAI};
pub use battle::engine::{create_battle, submit_move, take_automated_turn, ActionOutcome};
pub use battle::runner::{BattleInfo, BattleRunner, RoundOutcome, SharedBattle, SideInfo};
pub use battle::state::{BattleEvent, BattleState, EventLog, Phase, Side};

// Loot resolver and packs.
pub use loot::{
    classify, classify_combatant, classify_rarity, draw, draw_from_table, rarity_without_stats,
    LootDraw, LootTable, LootTier, Pack, PackCatalog, TierPool,
};

pub use rng::{EntropySource, RandomSource, ScriptedRng};
pub use roster::Roster;

// Crate-specific error and result types.
pub use errors::{
    BattleError, BattleResult, DataError, DataResult, EngineError, EngineResult,
    InvalidTurnReason, LootError, LootResult,
};
