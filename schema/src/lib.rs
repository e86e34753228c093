// Pokedex Arena Schema - Shared type definitions
// This crate contains the plain data records exchanged between the data
// collaborators (API shaping, bundled rosters) and the battle/gacha engines.

// Re-export the main types
pub use combatant::*;
pub use pokemon_types::*;
pub use rarity::*;

pub mod combatant;
pub mod pokemon_types;
pub mod rarity;
