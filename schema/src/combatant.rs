use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A combatant may bring at most this many moves into a battle.
pub const MAX_MOVES: usize = 4;

/// Index of each base value inside [`Combatant::stats`].
pub const HP: usize = 0;
pub const ATTACK: usize = 1;
pub const DEFENSE: usize = 2;
pub const SP_ATTACK: usize = 3;
pub const SP_DEFENSE: usize = 4;
pub const SPEED: usize = 5;

fn default_accuracy() -> u8 {
    100
}

fn default_pp() -> u8 {
    15
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    /// 0 marks a non-damaging move; it still goes through the damage formula.
    #[serde(default)]
    pub power: u16,
    /// Chance to hit, 0-100.
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
    /// Display only. Never decremented.
    #[serde(default = "default_pp")]
    pub pp: u8,
    /// Carried with the data, not used to order turns.
    #[serde(default)]
    pub priority: i8,
}

impl Move {
    pub fn new(name: &str, move_type: PokemonType, power: u16, accuracy: u8) -> Self {
        Self {
            name: name.to_string(),
            move_type,
            power,
            accuracy: accuracy.min(100),
            pp: default_pp(),
            priority: 0,
        }
    }

    pub fn with_pp(mut self, pp: u8) -> Self {
        self.pp = pp;
        self
    }

    pub fn with_priority(mut self, priority: i8) -> Self {
        self.priority = priority;
        self
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) Pow: {} Acc: {} PP {}/{}",
            self.name, self.move_type, self.power, self.accuracy, self.pp, self.pp
        )
    }
}

/// A Pokemon's stat and move snapshot, taken for the length of one battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// National dex number; 0 when the snapshot did not come from the dex.
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    /// HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub stats: [u16; 6],
    #[serde(default)]
    pub move_pool: Vec<Move>,
}

impl Combatant {
    /// Builds a combatant, keeping only the first [`MAX_MOVES`] moves.
    pub fn new(name: &str, stats: [u16; 6], mut move_pool: Vec<Move>) -> Self {
        move_pool.truncate(MAX_MOVES);
        Self {
            id: 0,
            name: name.to_string(),
            types: Vec::new(),
            stats,
            move_pool,
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn with_types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = types;
        self
    }

    pub fn hp(&self) -> u16 {
        self.stats[HP]
    }

    pub fn attack(&self) -> u16 {
        self.stats[ATTACK]
    }

    pub fn defense(&self) -> u16 {
        self.stats[DEFENSE]
    }

    /// Sum of all six base values.
    pub fn total_stats(&self) -> u32 {
        self.stats.iter().map(|&s| s as u32).sum()
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id > 0 {
            write!(f, "#{:03} ", self.id)?;
        }
        write!(f, "{}", self.name)?;
        if !self.types.is_empty() {
            let type_names: Vec<String> = self.types.iter().map(|t| t.to_string()).collect();
            write!(f, " [{}]", type_names.join(" / "))?;
        }
        if f.alternate() {
            writeln!(f)?;
            write!(
                f,
                "  HP:{} ATK:{} DEF:{} SP.ATK:{} SP.DEF:{} SPD:{}",
                self.stats[HP],
                self.stats[ATTACK],
                self.stats[DEFENSE],
                self.stats[SP_ATTACK],
                self.stats[SP_DEFENSE],
                self.stats[SPEED]
            )?;
            for (i, move_) in self.move_pool.iter().enumerate() {
                writeln!(f)?;
                write!(f, "  {}. {}", i + 1, move_)?;
            }
        }
        Ok(())
    }
}
