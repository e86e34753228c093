use crate::errors::{LootError, LootResult};
use crate::loot::table::{LootTable, LootTier, TierPool};
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Redraws allowed on a range tier before falling back to picking among the
/// admissible ids directly.
pub const MAX_REDRAWS: usize = 64;

/// One resolved draw.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LootDraw {
    pub tier: String,
    pub tier_index: usize,
    pub id: u32,
}

/// Finds the tier a roll in `[0, 1)` lands in: the first one whose bound is
/// strictly greater than the roll.
pub fn select_tier(table: &LootTable, roll: f64) -> (usize, &LootTier) {
    let tiers = table.tiers();
    let index = tiers
        .iter()
        .position(|tier| tier.upper_bound > roll)
        .unwrap_or(tiers.len() - 1);
    (index, &tiers[index])
}

/// Rolls a tier, then an id from it. Range tiers never return an id from
/// `exclusion`. Exclusive tiers pick from their own set as is.
pub fn draw(
    table: &LootTable,
    exclusion: &BTreeSet<u32>,
    rng: &mut dyn RandomSource,
) -> LootResult<LootDraw> {
    let roll = rng.next_unit("loot tier roll");
    let (tier_index, tier) = select_tier(table, roll);

    let id = match &tier.pool {
        TierPool::Exclusive(ids) => ids[rng.index(ids.len(), "exclusive tier pick")],
        TierPool::Range { min, max } => draw_from_range(&tier.name, *min, *max, exclusion, rng)?,
    };

    tracing::debug!(tier = %tier.name, tier_index, id, roll, "loot drawn");
    Ok(LootDraw {
        tier: tier.name.clone(),
        tier_index,
        id,
    })
}

/// [`draw`] with the table's own exclusion set.
pub fn draw_from_table(table: &LootTable, rng: &mut dyn RandomSource) -> LootResult<LootDraw> {
    draw(table, &table.exclusion_set(), rng)
}

fn draw_from_range(
    tier: &str,
    min: u32,
    max: u32,
    exclusion: &BTreeSet<u32>,
    rng: &mut dyn RandomSource,
) -> LootResult<u32> {
    let span = u64::from(max - min) + 1;
    let excluded = exclusion.range(min..=max).count() as u64;
    let admissible = span - excluded;
    if admissible == 0 {
        tracing::warn!(tier, min, max, "every id in range is excluded");
        return Err(LootError::ExhaustedRange {
            tier: tier.to_string(),
            min,
            max,
        });
    }

    for attempt in 0..=MAX_REDRAWS {
        let id = rng.int_inclusive(min, max, "range tier pick");
        if !exclusion.contains(&id) {
            return Ok(id);
        }
        tracing::trace!(tier, id, attempt, "excluded id redrawn");
    }

    let k = rng.index(admissible as usize, "admissible id fallback");
    tracing::debug!(tier, admissible, k, "redraw limit reached");
    (min..=max)
        .filter(|id| !exclusion.contains(id))
        .nth(k)
        .ok_or_else(|| LootError::ExhaustedRange {
            tier: tier.to_string(),
            min,
            max,
        })
}
