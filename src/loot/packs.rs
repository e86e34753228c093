use crate::data::{load_ron, parse_ron};
use crate::errors::{DataResult, LootError, LootResult};
use crate::loot::resolver::{draw_from_table, LootDraw};
use crate::loot::table::LootTable;
use crate::rng::RandomSource;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_PACKS: &str = include_str!("../../data/packs.ron");

/// A named loot table offered to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub id: String,
    pub name: String,
    pub description: String,
    pub table: LootTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackCatalog {
    pub packs: Vec<Pack>,
}

impl PackCatalog {
    /// The catalog compiled into the crate.
    pub fn builtin() -> DataResult<Self> {
        parse_ron("builtin packs.ron", BUILTIN_PACKS)
    }

    pub fn load(path: &Path) -> DataResult<Self> {
        let catalog: PackCatalog = load_ron(path)?;
        tracing::info!(path = %path.display(), packs = catalog.packs.len(), "pack catalog loaded");
        Ok(catalog)
    }

    /// Loads `path` when given, the builtin catalog otherwise.
    pub fn load_or_builtin(path: Option<&Path>) -> DataResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn find(&self, pack_id: &str) -> Option<&Pack> {
        self.packs.iter().find(|pack| pack.id == pack_id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.packs.iter().map(|pack| pack.id.as_str()).collect()
    }

    /// Draws once from the pack called `pack_id`.
    pub fn open_pack(&self, pack_id: &str, rng: &mut dyn RandomSource) -> LootResult<LootDraw> {
        let pack = self
            .find(pack_id)
            .ok_or_else(|| LootError::UnknownPack(pack_id.to_string()))?;
        draw_from_table(&pack.table, rng)
    }

    /// Draws `count` times from the same pack. Stops at the first failure.
    pub fn open_packs(
        &self,
        pack_id: &str,
        count: usize,
        rng: &mut dyn RandomSource,
    ) -> LootResult<Vec<LootDraw>> {
        (0..count).map(|_| self.open_pack(pack_id, rng)).collect()
    }
}
