use crate::data::{load_ron, parse_ron};
use crate::errors::{DataError, DataResult};
use schema::{Combatant, MAX_MOVES};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_ROSTER: &str = include_str!("../data/roster.ron");

/// The combatants a player can pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new(combatants: Vec<Combatant>) -> Self {
        let combatants = combatants
            .into_iter()
            .map(|mut combatant| {
                if combatant.move_pool.len() > MAX_MOVES {
                    tracing::warn!(
                        name = %combatant.name,
                        moves = combatant.move_pool.len(),
                        "extra moves dropped"
                    );
                    combatant.move_pool.truncate(MAX_MOVES);
                }
                combatant
            })
            .collect();
        Self { combatants }
    }

    /// The roster compiled into the crate.
    pub fn builtin() -> DataResult<Self> {
        let roster: Roster = parse_ron("builtin roster.ron", BUILTIN_ROSTER)?;
        Ok(Self::new(roster.combatants))
    }

    pub fn load(path: &Path) -> DataResult<Self> {
        let roster: Roster = load_ron(path)?;
        Ok(Self::new(roster.combatants))
    }

    pub fn load_or_builtin(path: Option<&Path>) -> DataResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Looks a combatant up by name, ignoring case.
    pub fn find(&self, name: &str) -> DataResult<&Combatant> {
        self.combatants
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| DataError::UnknownCombatant(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.combatants.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }
}
