//! Tiered loot tables, the draw resolver, rarity classification and the
//! pack catalog built on top of them.

pub mod packs;
pub mod rarity;
pub mod resolver;
pub mod table;

pub use packs::{Pack, PackCatalog};
pub use rarity::{classify, classify_combatant, classify_rarity, rarity_without_stats};
pub use resolver::{draw, draw_from_table, select_tier, LootDraw};
pub use table::{LootTable, LootTableConfig, LootTier, TierPool};
