use crate::battle::state::Side;
use std::fmt;

/// Main error type for the Pokedex Arena engines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Error raised by the battle engine
    Battle(BattleError),
    /// Error raised by the loot resolver or a pack lookup
    Loot(LootError),
    /// Error loading configuration or shaping API payloads
    Data(DataError),
}

/// Why a move submission was turned away. The battle state is never touched
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidTurnReason {
    /// The battle already has a winner
    BattleFinished,
    /// The submitting side does not own the turn
    NotYourTurn { turn_owner: Side },
}

/// Errors related to battle actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    /// `submit_move` called after the battle ended or by the wrong side
    InvalidTurn(InvalidTurnReason),
    /// Move index is outside the side's move pool
    InvalidMoveIndex { side: Side, index: usize },
}

/// Errors related to loot tables and draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LootError {
    /// Every id of the selected range tier is excluded
    ExhaustedRange { tier: String, min: u32, max: u32 },
    /// Loot table violates one of its invariants
    InvalidTable(String),
    /// No pack with this id in the catalog
    UnknownPack(String),
}

/// Errors related to data files and API payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// File could not be read
    Io { path: String, message: String },
    /// RON or JSON could not be parsed
    Parse { source_name: String, message: String },
    /// No combatant with this name in the roster
    UnknownCombatant(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Battle(err) => write!(f, "Battle error: {}", err),
            EngineError::Loot(err) => write!(f, "Loot error: {}", err),
            EngineError::Data(err) => write!(f, "Data error: {}", err),
        }
    }
}

impl fmt::Display for InvalidTurnReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidTurnReason::BattleFinished => write!(f, "the battle is already over"),
            InvalidTurnReason::NotYourTurn { turn_owner } => {
                write!(f, "it is the {}'s turn", turn_owner)
            }
        }
    }
}

impl fmt::Display for BattleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleError::InvalidTurn(reason) => write!(f, "Invalid turn: {}", reason),
            BattleError::InvalidMoveIndex { side, index } => {
                write!(f, "Invalid move index {} for the {}", index, side)
            }
        }
    }
}

impl fmt::Display for LootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LootError::ExhaustedRange { tier, min, max } => write!(
                f,
                "Tier '{}' has no admissible id left in {}..={}",
                tier, min, max
            ),
            LootError::InvalidTable(details) => write!(f, "Invalid loot table: {}", details),
            LootError::UnknownPack(id) => write!(f, "Unknown pack: {}", id),
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io { path, message } => write!(f, "Could not read {}: {}", path, message),
            DataError::Parse {
                source_name,
                message,
            } => write!(f, "Could not parse {}: {}", source_name, message),
            DataError::UnknownCombatant(name) => write!(f, "Unknown combatant: {}", name),
        }
    }
}

impl std::error::Error for EngineError {}
impl std::error::Error for BattleError {}
impl std::error::Error for LootError {}
impl std::error::Error for DataError {}

impl From<BattleError> for EngineError {
    fn from(err: BattleError) -> Self {
        EngineError::Battle(err)
    }
}

impl From<LootError> for EngineError {
    fn from(err: LootError) -> Self {
        EngineError::Loot(err)
    }
}

impl From<DataError> for EngineError {
    fn from(err: DataError) -> Self {
        EngineError::Data(err)
    }
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using BattleError
pub type BattleResult<T> = Result<T, BattleError>;

/// Type alias for Results using LootError
pub type LootResult<T> = Result<T, LootError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;
