//! Shapes PokéAPI payloads into battle records.
//!
//! Nothing here talks to the network. Callers fetch `/pokemon/{id}`,
//! `/move/{name}` and `/pokemon-species/{id}` themselves and hand the JSON
//! over; only the fields the engines use are mirrored.

use crate::errors::{DataError, DataResult};
use schema::{Combatant, Move, PokemonType, MAX_MOVES};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Language the companion app shows names in. Callers pass the language to
/// [`move_from_api`] and [`localized_name`]; a missing translation falls back
/// to the API slug.
pub const DEFAULT_LANGUAGE: &str = "fr";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPokemon {
    pub id: u32,
    pub name: String,
    pub stats: Vec<ApiStat>,
    pub types: Vec<ApiTypeSlot>,
    #[serde(default)]
    pub moves: Vec<ApiPokemonMove>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiTypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPokemonMove {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
    pub version_group_details: Vec<ApiVersionGroupDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiVersionGroupDetail {
    pub level_learned_at: u32,
    pub version_group: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMove {
    pub id: u32,
    pub name: String,
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    pub pp: Option<u8>,
    pub priority: Option<i8>,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
    #[serde(default)]
    pub names: Vec<ApiLocalizedName>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLocalizedName {
    pub name: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSpecies {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub names: Vec<ApiLocalizedName>,
}

/// Parses one API payload.
pub fn from_json<T: DeserializeOwned>(source_name: &str, json: &str) -> DataResult<T> {
    serde_json::from_str(json).map_err(|err| DataError::Parse {
        source_name: source_name.to_string(),
        message: err.to_string(),
    })
}

/// Version group whose learnsets represent `generation`. Unknown
/// generations fall back to the first one.
pub fn version_group_for_generation(generation: u8) -> &'static str {
    match generation {
        2 => "gold-silver",
        3 => "ruby-sapphire",
        4 => "diamond-pearl",
        5 => "black-white",
        6 => "x-y",
        7 => "sun-moon",
        8 => "sword-shield",
        9 => "scarlet-violet",
        _ => "red-blue",
    }
}

/// Picks up to four moves learnable in `generation`, highest learn level
/// first (as listed in each move's first version detail).
pub fn select_moves_for_generation(pokemon: &ApiPokemon, generation: u8) -> Vec<&ApiPokemonMove> {
    let version_group = version_group_for_generation(generation);
    let mut learnable: Vec<&ApiPokemonMove> = pokemon
        .moves
        .iter()
        .filter(|m| {
            m.version_group_details
                .iter()
                .any(|detail| detail.version_group.name == version_group)
        })
        .collect();

    learnable.sort_by_key(|m| {
        std::cmp::Reverse(
            m.version_group_details
                .first()
                .map(|detail| detail.level_learned_at)
                .unwrap_or(0),
        )
    });
    learnable.truncate(MAX_MOVES);
    learnable
}

/// Name in `language`, if the payload has one.
pub fn localized_name<'a>(names: &'a [ApiLocalizedName], language: &str) -> Option<&'a str> {
    names
        .iter()
        .find(|entry| entry.language.name == language)
        .map(|entry| entry.name.as_str())
}

/// Converts a move payload. Missing power, accuracy, priority and pp take
/// the usual defaults (0, 100, 0, 15).
pub fn move_from_api(api_move: &ApiMove, language: &str) -> Move {
    let name = localized_name(&api_move.names, language).unwrap_or(&api_move.name);
    let mut converted = Move::new(
        name,
        PokemonType::from_api_name(&api_move.type_ref.name),
        api_move.power.unwrap_or(0),
        api_move.accuracy.unwrap_or(100),
    )
    .with_priority(api_move.priority.unwrap_or(0));
    if let Some(pp) = api_move.pp {
        converted = converted.with_pp(pp);
    }
    converted
}

fn stat_index(api_name: &str) -> Option<usize> {
    match api_name {
        "hp" => Some(schema::HP),
        "attack" => Some(schema::ATTACK),
        "defense" => Some(schema::DEFENSE),
        "special-attack" => Some(schema::SP_ATTACK),
        "special-defense" => Some(schema::SP_DEFENSE),
        "speed" => Some(schema::SPEED),
        _ => None,
    }
}

/// Builds a battle snapshot from a pokemon payload and its already
/// converted moves. `display_name` overrides the API's slug.
pub fn combatant_from_api(
    pokemon: &ApiPokemon,
    moves: Vec<Move>,
    display_name: Option<&str>,
) -> Combatant {
    let mut stats = [0u16; 6];
    for (position, entry) in pokemon.stats.iter().enumerate() {
        let index = stat_index(&entry.stat.name).unwrap_or(position);
        if let Some(slot) = stats.get_mut(index) {
            *slot = u16::try_from(entry.base_stat).unwrap_or(u16::MAX);
        }
    }

    let mut slots: Vec<&ApiTypeSlot> = pokemon.types.iter().collect();
    slots.sort_by_key(|slot| slot.slot);
    let types = slots
        .iter()
        .map(|slot| PokemonType::from_api_name(&slot.type_ref.name))
        .collect();

    Combatant::new(display_name.unwrap_or(&pokemon.name), stats, moves)
        .with_id(pokemon.id)
        .with_types(types)
}

/// Sum of the payload's base stats, as used for rarity.
pub fn total_base_stats(pokemon: &ApiPokemon) -> u32 {
    pokemon.stats.iter().map(|s| s.base_stat).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PIKACHU_JSON: &str = r#"{
        "id": 25,
        "name": "pikachu",
        "stats": [
            {"base_stat": 35, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 55, "stat": {"name": "attack", "url": ""}},
            {"base_stat": 40, "stat": {"name": "defense", "url": ""}},
            {"base_stat": 50, "stat": {"name": "special-attack", "url": ""}},
            {"base_stat": 50, "stat": {"name": "special-defense", "url": ""}},
            {"base_stat": 90, "stat": {"name": "speed", "url": ""}}
        ],
        "types": [
            {"slot": 1, "type": {"name": "electric", "url": ""}}
        ],
        "moves": [
            {"move": {"name": "thunder-shock", "url": ""},
             "version_group_details": [{"level_learned_at": 1, "version_group": {"name": "red-blue", "url": ""}}]},
            {"move": {"name": "thunderbolt", "url": ""},
             "version_group_details": [{"level_learned_at": 26, "version_group": {"name": "red-blue", "url": ""}}]},
            {"move": {"name": "agility", "url": ""},
             "version_group_details": [{"level_learned_at": 33, "version_group": {"name": "red-blue", "url": ""}}]},
            {"move": {"name": "thunder", "url": ""},
             "version_group_details": [{"level_learned_at": 43, "version_group": {"name": "red-blue", "url": ""}}]},
            {"move": {"name": "quick-attack", "url": ""},
             "version_group_details": [{"level_learned_at": 16, "version_group": {"name": "red-blue", "url": ""}}]},
            {"move": {"name": "nuzzle", "url": ""},
             "version_group_details": [{"level_learned_at": 1, "version_group": {"name": "x-y", "url": ""}}]}
        ]
    }"#;

    const SWIFT_JSON: &str = r#"{
        "id": 129,
        "name": "swift",
        "power": 60,
        "accuracy": null,
        "pp": 20,
        "priority": 0,
        "type": {"name": "normal", "url": ""},
        "names": [
            {"name": "Météores", "language": {"name": "fr", "url": ""}},
            {"name": "Swift", "language": {"name": "en", "url": ""}}
        ]
    }"#;

    fn pikachu() -> ApiPokemon {
        from_json("pikachu.json", PIKACHU_JSON).unwrap()
    }

    #[test]
    fn test_version_groups() {
        assert_eq!(version_group_for_generation(1), "red-blue");
        assert_eq!(version_group_for_generation(4), "diamond-pearl");
        assert_eq!(version_group_for_generation(9), "scarlet-violet");
        assert_eq!(version_group_for_generation(0), "red-blue");
        assert_eq!(version_group_for_generation(42), "red-blue");
    }

    #[test]
    fn test_select_moves_filters_sorts_and_truncates() {
        let pokemon = pikachu();
        let names: Vec<&str> = select_moves_for_generation(&pokemon, 1)
            .iter()
            .map(|m| m.move_ref.name.as_str())
            .collect();
        assert_eq!(names, vec!["thunder", "agility", "thunderbolt", "quick-attack"]);
    }

    #[test]
    fn test_select_moves_for_other_generation() {
        let pokemon = pikachu();
        let names: Vec<&str> = select_moves_for_generation(&pokemon, 6)
            .iter()
            .map(|m| m.move_ref.name.as_str())
            .collect();
        assert_eq!(names, vec!["nuzzle"]);
    }

    #[test]
    fn test_move_from_api_localizes_and_defaults() {
        let swift: ApiMove = from_json("swift.json", SWIFT_JSON).unwrap();

        let french = move_from_api(&swift, "fr");
        assert_eq!(french.name, "Météores");
        assert_eq!(french.accuracy, 100);
        assert_eq!(french.power, 60);
        assert_eq!(french.pp, 20);
        assert_eq!(french.move_type, PokemonType::Normal);

        let fallback = move_from_api(&swift, "de");
        assert_eq!(fallback.name, "swift");

        assert_eq!(move_from_api(&swift, DEFAULT_LANGUAGE).name, "Météores");
    }

    #[test]
    fn test_status_move_defaults() {
        let growl: ApiMove = from_json(
            "growl.json",
            r#"{"id": 45, "name": "growl", "power": null, "accuracy": 100,
                "pp": null, "priority": null, "type": {"name": "normal"}}"#,
        )
        .unwrap();

        let converted = move_from_api(&growl, DEFAULT_LANGUAGE);

        assert_eq!(converted.power, 0);
        assert_eq!(converted.pp, 15);
        assert_eq!(converted.priority, 0);
    }

    #[test]
    fn test_combatant_from_api() {
        let pokemon = pikachu();
        let moves = vec![Move::new("Thunder", PokemonType::Electric, 110, 70)];

        let combatant = combatant_from_api(&pokemon, moves, Some("Pikachu"));

        assert_eq!(combatant.id, 25);
        assert_eq!(combatant.name, "Pikachu");
        assert_eq!(combatant.stats, [35, 55, 40, 50, 50, 90]);
        assert_eq!(combatant.types, vec![PokemonType::Electric]);
        assert_eq!(combatant.move_pool.len(), 1);
        assert_eq!(total_base_stats(&pokemon), 320);
    }

    #[test]
    fn test_types_follow_slot_order() {
        let mut pokemon = pikachu();
        pokemon.types = vec![
            ApiTypeSlot {
                slot: 2,
                type_ref: NamedResource {
                    name: "flying".to_string(),
                    url: String::new(),
                },
            },
            ApiTypeSlot {
                slot: 1,
                type_ref: NamedResource {
                    name: "dragon".to_string(),
                    url: String::new(),
                },
            },
        ];

        let combatant = combatant_from_api(&pokemon, vec![], None);

        assert_eq!(combatant.name, "pikachu");
        assert_eq!(
            combatant.types,
            vec![PokemonType::Dragon, PokemonType::Flying]
        );
    }

    #[test]
    fn test_species_localized_name() {
        let species: ApiSpecies = from_json(
            "species.json",
            r#"{"id": 25, "name": "pikachu", "names": [
                {"name": "ピカチュウ", "language": {"name": "ja"}},
                {"name": "Pikachu", "language": {"name": "fr"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(localized_name(&species.names, "fr"), Some("Pikachu"));
        assert_eq!(localized_name(&species.names, "ko"), None);
    }

    #[test]
    fn test_bad_json_is_a_parse_error() {
        let result: DataResult<ApiMove> = from_json("broken.json", "{");
        assert!(matches!(result, Err(DataError::Parse { .. })));
    }
}
