use crate::battle::ai::{Behavior, RandomMoveAI};
use crate::battle::engine::{create_battle, submit_move, take_automated_turn, ActionOutcome};
use crate::battle::state::{BattleEvent, BattleState, Phase, Side};
use crate::errors::{BattleError, BattleResult};
use crate::rng::{EntropySource, RandomSource};
use schema::Combatant;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A battle shared between threads. One mutex per battle serializes every
/// move submitted to it.
pub type SharedBattle = Arc<Mutex<BattleRunner>>;

/// Drives one battle between an externally controlled player and the
/// automated opponent.
pub struct BattleRunner {
    battle_state: BattleState,
    rng: Box<dyn RandomSource + Send>,
    behavior: Box<dyn Behavior + Send>,
}

/// Information about the current battle state for API queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleInfo {
    pub battle_id: String,
    pub turn_number: u32,
    pub turn_owner: Side,
    pub phase: Phase,
    pub sides: [SideInfo; 2],
}

/// Information about one side for API queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideInfo {
    pub side: Side,
    pub name: String,
    pub current_hp: u16,
    pub max_hp: u16,
    pub move_names: Vec<String>,
}

/// Everything one call to [`BattleRunner::play_move`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub events: Vec<BattleEvent>,
    pub player_outcome: ActionOutcome,
    /// `None` when the opponent did not get to act (the battle ended first,
    /// or its behavior picked a move the engine rejected).
    pub opponent_outcome: Option<ActionOutcome>,
    /// Set when the opponent's behavior picked a move the engine rejected.
    /// The player's action above still stands.
    pub opponent_error: Option<BattleError>,
    pub finished: bool,
    pub winner: Option<Side>,
}

impl RoundOutcome {
    /// The opponent could not act because its move pool is empty.
    pub fn opponent_skipped(&self) -> bool {
        self.opponent_outcome == Some(ActionOutcome::Skipped)
    }

    /// The opponent kept the turn without acting, either skipped or
    /// rejected. The battle cannot continue from here.
    pub fn opponent_stalled(&self) -> bool {
        self.opponent_skipped() || self.opponent_error.is_some()
    }
}

impl BattleRunner {
    /// Create a new battle runner with OS-seeded randomness and the uniform AI.
    pub fn new(player: Combatant, opponent: Combatant) -> Self {
        Self {
            battle_state: create_battle(player, opponent),
            rng: Box::new(EntropySource::from_os_rng()),
            behavior: Box::new(RandomMoveAI::new()),
        }
    }

    pub fn with_rng(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_behavior(mut self, behavior: Box<dyn Behavior + Send>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn into_shared(self) -> SharedBattle {
        Arc::new(Mutex::new(self))
    }

    /// Plays the player's move, then lets the opponent answer once.
    ///
    /// Any player action that leaves the battle running (hit or miss) is
    /// followed by exactly one automated action. The reverse never happens:
    /// after the opponent acts, control returns to the caller.
    ///
    /// `Err` means the player's move was rejected and nothing changed. Once
    /// the player's move has been applied the call always returns `Ok`; a
    /// rejected opponent choice is reported in [`RoundOutcome::opponent_error`].
    pub fn play_move(&mut self, move_index: usize) -> BattleResult<RoundOutcome> {
        let log_start = self.battle_state.log().len();

        let player_outcome = submit_move(
            &mut self.battle_state,
            Side::Player,
            move_index,
            self.rng.as_mut(),
        )?;

        let mut opponent_outcome = None;
        let mut opponent_error = None;
        if !self.battle_state.is_finished() {
            match take_automated_turn(
                &mut self.battle_state,
                Side::Opponent,
                self.behavior.as_ref(),
                self.rng.as_mut(),
            ) {
                Ok(outcome) => opponent_outcome = Some(outcome),
                Err(err) => {
                    tracing::warn!(
                        battle_id = %self.battle_state.battle_id,
                        %err,
                        "opponent behavior chose a rejected move"
                    );
                    opponent_error = Some(err);
                }
            }
        }

        Ok(RoundOutcome {
            events: self.battle_state.log().since(log_start).to_vec(),
            player_outcome,
            opponent_outcome,
            opponent_error,
            finished: self.battle_state.is_finished(),
            winner: self.battle_state.winner(),
        })
    }

    /// Get current battle information for API queries
    pub fn get_battle_info(&self) -> BattleInfo {
        let state = &self.battle_state;
        let side_info = |side: Side| {
            let combatant = state.combatant(side);
            SideInfo {
                side,
                name: combatant.name.clone(),
                current_hp: state.hp(side),
                max_hp: state.max_hp(side),
                move_names: combatant.move_pool.iter().map(|m| m.name.clone()).collect(),
            }
        };

        BattleInfo {
            battle_id: state.battle_id.clone(),
            turn_number: state.turn_number(),
            turn_owner: state.turn_owner(),
            phase: state.phase(),
            sides: [side_info(Side::Player), side_info(Side::Opponent)],
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.battle_state
    }

    pub fn is_battle_ended(&self) -> bool {
        self.battle_state.is_finished()
    }

    pub fn get_winner(&self) -> Option<Side> {
        self.battle_state.winner()
    }
}

impl fmt::Debug for BattleRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleRunner")
            .field("battle_state", &self.battle_state)
            .finish_non_exhaustive()
    }
}
