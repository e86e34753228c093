use crate::battle::ai::Behavior;
use crate::battle::calculators::{calculate_attack_outcome, AttackOutcome};
use crate::battle::state::{BattleEvent, BattleState, Phase, Side};
use crate::errors::{BattleError, BattleResult, InvalidTurnReason};
use crate::rng::RandomSource;
use schema::Combatant;

/// What a single submitted action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Missed,
    Hit { damage: u16 },
    KnockedOut { damage: u16 },
    /// The automated side had nothing to use. No event, turn not advanced.
    Skipped,
}

/// Starts a new battle with `player` to move first.
pub fn create_battle(player: Combatant, opponent: Combatant) -> BattleState {
    let battle_id = format!(
        "{}-vs-{}",
        player.name.to_lowercase(),
        opponent.name.to_lowercase()
    );
    tracing::debug!(%battle_id, "battle created");
    BattleState::new(battle_id, player, opponent)
}

/// Checks that `side` may act right now.
pub fn validate_turn(state: &BattleState, side: Side) -> BattleResult<()> {
    if let Phase::Finished { .. } = state.phase {
        return Err(BattleError::InvalidTurn(InvalidTurnReason::BattleFinished));
    }
    if side != state.turn_owner {
        return Err(BattleError::InvalidTurn(InvalidTurnReason::NotYourTurn {
            turn_owner: state.turn_owner,
        }));
    }
    Ok(())
}

/// Resolves `side` using the move at `move_index`.
///
/// Rejected submissions (battle over, wrong side, bad index) leave `state`
/// exactly as it was. On success the log grows by, in order: the attack
/// declaration, then either a miss or the damage line, and on a knockout the
/// knockout and victory lines. The turn passes to the other side unless the
/// battle just ended.
pub fn submit_move(
    state: &mut BattleState,
    side: Side,
    move_index: usize,
    rng: &mut dyn RandomSource,
) -> BattleResult<ActionOutcome> {
    if let Err(err) = validate_turn(state, side) {
        tracing::warn!(battle_id = %state.battle_id, %side, %err, "move submission rejected");
        return Err(err);
    }
    if move_index >= state.combatant(side).move_pool.len() {
        let err = BattleError::InvalidMoveIndex {
            side,
            index: move_index,
        };
        tracing::warn!(battle_id = %state.battle_id, %side, %err, "move submission rejected");
        return Err(err);
    }

    let defender = side.other();
    let attacker_name = state.combatant(side).name.clone();
    let defender_name = state.combatant(defender).name.clone();
    let move_name = state.combatant(side).move_pool[move_index].name.clone();

    state.log.push(BattleEvent::AttackDeclared {
        actor: side,
        attacker: attacker_name.clone(),
        move_name,
    });
    state.turn_number += 1;

    match calculate_attack_outcome(state, side, move_index, rng) {
        AttackOutcome::Missed => {
            state.log.push(BattleEvent::MoveMissed {
                actor: side,
                attacker: attacker_name,
            });
            state.turn_owner = defender;
            Ok(ActionOutcome::Missed)
        }
        AttackOutcome::Hit {
            roll,
            remaining_hp,
            knocked_out,
        } => {
            state.set_hp(defender, remaining_hp);
            state.log.push(BattleEvent::DamageDealt {
                target: defender,
                defender: defender_name.clone(),
                damage: roll.damage,
                remaining_hp,
            });

            if knocked_out {
                state.log.push(BattleEvent::KnockedOut {
                    target: defender,
                    pokemon: defender_name,
                });
                state.log.push(BattleEvent::VictoryDeclared {
                    winner: side,
                    pokemon: attacker_name,
                });
                state.phase = Phase::Finished { winner: side };
                tracing::debug!(battle_id = %state.battle_id, winner = %side, "battle finished");
                Ok(ActionOutcome::KnockedOut {
                    damage: roll.damage,
                })
            } else {
                state.turn_owner = defender;
                Ok(ActionOutcome::Hit {
                    damage: roll.damage,
                })
            }
        }
    }
}

/// Lets `behavior` act for `side`. An empty move pool skips the turn
/// without logging anything or passing the turn on.
pub fn take_automated_turn(
    state: &mut BattleState,
    side: Side,
    behavior: &dyn Behavior,
    rng: &mut dyn RandomSource,
) -> BattleResult<ActionOutcome> {
    validate_turn(state, side)?;

    match behavior.choose_move(side, state, rng) {
        Some(move_index) => submit_move(state, side, move_index, rng),
        None => {
            tracing::debug!(
                battle_id = %state.battle_id,
                %side,
                "empty move pool, turn skipped"
            );
            Ok(ActionOutcome::Skipped)
        }
    }
}
