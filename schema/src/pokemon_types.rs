use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// The eighteen elemental categories a move (or a Pokemon) can belong to.
///
/// Parsing accepts the lowercase names used by the public data API
/// (`"electric"`, `"fairy"`, ...), case-insensitively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl PokemonType {
    /// Looks up a type by its API name, falling back to `Normal` for anything
    /// unrecognised (newer generations occasionally add placeholder types).
    pub fn from_api_name(name: &str) -> PokemonType {
        name.parse().unwrap_or(PokemonType::Normal)
    }
}
