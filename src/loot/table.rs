use crate::errors::{LootError, LootResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::TryFrom;

/// Where a tier draws its ids from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum TierPool {
    /// Every id in `min..=max`, minus the exclusion set.
    Range { min: u32, max: u32 },
    /// A fixed set of ids, picked uniformly.
    Exclusive(Vec<u32>),
}

/// A rarity bucket. A roll lands in the first tier whose `upper_bound` is
/// strictly greater than it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LootTier {
    pub name: String,
    pub upper_bound: f64,
    pub pool: TierPool,
}

impl LootTier {
    pub fn range(name: &str, upper_bound: f64, min: u32, max: u32) -> Self {
        Self {
            name: name.to_string(),
            upper_bound,
            pool: TierPool::Range { min, max },
        }
    }

    pub fn exclusive(name: &str, upper_bound: f64, ids: Vec<u32>) -> Self {
        Self {
            name: name.to_string(),
            upper_bound,
            pool: TierPool::Exclusive(ids),
        }
    }
}

/// The on-disk shape of a loot table, before validation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LootTableConfig {
    pub tiers: Vec<LootTier>,
    #[serde(default)]
    pub extra_exclusions: Vec<u32>,
}

/// An ordered, validated list of tiers.
///
/// Bounds never decrease and the last one is exactly 1.0, so the tiers
/// partition `[0, 1)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "LootTableConfig", into = "LootTableConfig")]
pub struct LootTable {
    tiers: Vec<LootTier>,
    extra_exclusions: BTreeSet<u32>,
}

impl LootTable {
    pub fn new(tiers: Vec<LootTier>) -> LootResult<Self> {
        validate_tiers(&tiers)?;
        Ok(Self {
            tiers,
            extra_exclusions: BTreeSet::new(),
        })
    }

    /// Adds ids that range tiers must never produce, on top of the ids of the
    /// exclusive tiers.
    pub fn with_extra_exclusions(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.extra_exclusions.extend(ids);
        self
    }

    pub fn tiers(&self) -> &[LootTier] {
        &self.tiers
    }

    /// Union of every exclusive tier's ids and the extra exclusions.
    pub fn exclusion_set(&self) -> BTreeSet<u32> {
        let mut excluded = self.extra_exclusions.clone();
        for tier in &self.tiers {
            if let TierPool::Exclusive(ids) = &tier.pool {
                excluded.extend(ids.iter().copied());
            }
        }
        excluded
    }

    /// Probability of landing in each tier, in declared order.
    pub fn tier_weights(&self) -> Vec<(&str, f64)> {
        let mut previous = 0.0;
        self.tiers
            .iter()
            .map(|tier| {
                let weight = tier.upper_bound - previous;
                previous = tier.upper_bound;
                (tier.name.as_str(), weight)
            })
            .collect()
    }
}

fn validate_tiers(tiers: &[LootTier]) -> LootResult<()> {
    let last = tiers
        .last()
        .ok_or_else(|| LootError::InvalidTable("a table needs at least one tier".to_string()))?;

    let mut previous = 0.0;
    for tier in tiers {
        if !(0.0..=1.0).contains(&tier.upper_bound) {
            return Err(LootError::InvalidTable(format!(
                "tier '{}' has bound {} outside [0, 1]",
                tier.name, tier.upper_bound
            )));
        }
        if tier.upper_bound < previous {
            return Err(LootError::InvalidTable(format!(
                "tier '{}' bound {} is below the previous bound {}",
                tier.name, tier.upper_bound, previous
            )));
        }
        previous = tier.upper_bound;

        match &tier.pool {
            TierPool::Range { min, max } if min > max => {
                return Err(LootError::InvalidTable(format!(
                    "tier '{}' range {}..={} is empty",
                    tier.name, min, max
                )));
            }
            TierPool::Exclusive(ids) if ids.is_empty() => {
                return Err(LootError::InvalidTable(format!(
                    "exclusive tier '{}' has no ids",
                    tier.name
                )));
            }
            _ => {}
        }
    }

    if last.upper_bound != 1.0 {
        return Err(LootError::InvalidTable(format!(
            "last tier '{}' must end at 1.0, not {}",
            last.name, last.upper_bound
        )));
    }
    Ok(())
}

impl TryFrom<LootTableConfig> for LootTable {
    type Error = LootError;

    fn try_from(config: LootTableConfig) -> LootResult<Self> {
        Ok(LootTable::new(config.tiers)?.with_extra_exclusions(config.extra_exclusions))
    }
}

impl From<LootTable> for LootTableConfig {
    fn from(table: LootTable) -> Self {
        LootTableConfig {
            tiers: table.tiers,
            extra_exclusions: table.extra_exclusions.into_iter().collect(),
        }
    }
}
