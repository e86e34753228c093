use schema::{Combatant, Rarity, LEGENDARY_IDS};
use std::collections::BTreeSet;

/// Base stat total from which a non-legendary counts as rare.
pub const RARE_STAT_TOTAL: u32 = 500;
/// Base stat total from which a non-legendary counts as uncommon.
pub const UNCOMMON_STAT_TOTAL: u32 = 400;

/// Rarity of a known id given its base stat total. Membership in
/// `exclusive_ids` outranks any stat total.
pub fn classify_rarity(id: u32, base_stat_total: u32, exclusive_ids: &BTreeSet<u32>) -> Rarity {
    if exclusive_ids.contains(&id) {
        Rarity::Legendary
    } else if base_stat_total >= RARE_STAT_TOTAL {
        Rarity::Rare
    } else if base_stat_total >= UNCOMMON_STAT_TOTAL {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}

/// [`classify_rarity`] against the bundled legendary list.
pub fn classify(id: u32, base_stat_total: u32) -> Rarity {
    let legendary: BTreeSet<u32> = LEGENDARY_IDS.iter().copied().collect();
    classify_rarity(id, base_stat_total, &legendary)
}

/// The rarity of `id` when its base stats are unknown. Only legendaries can
/// be told apart without them.
pub fn rarity_without_stats(id: u32) -> Option<Rarity> {
    schema::is_legendary(id).then_some(Rarity::Legendary)
}

pub fn classify_combatant(combatant: &Combatant) -> Rarity {
    classify(combatant.id, combatant.total_stats())
}
