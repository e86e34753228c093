#[cfg(test)]
mod tests {
    use crate::battle::ai::{Behavior, GreedyAI, RandomMoveAI};
    use crate::battle::engine::{submit_move, take_automated_turn, ActionOutcome};
    use crate::battle::state::{BattleEvent, Side};
    use crate::battle::tests::common::{
        assert_ok, create_test_battle, hyper_beam, predictable_rng, tackle, TestCombatantBuilder,
    };
    use crate::errors::{BattleError, InvalidTurnReason};
    use crate::rng::ScriptedRng;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_move_pool_skips_without_advancing_turn() {
        // Arrange
        let player = TestCombatantBuilder::new("Pikachu").build();
        let opponent = TestCombatantBuilder::new("Ditto").with_moves(vec![]).build();
        let mut battle_state = create_test_battle(player, opponent);
        let mut rng = predictable_rng();
        assert_ok(submit_move(&mut battle_state, Side::Player, 0, &mut rng));
        let log_len = battle_state.log().len();

        // Act
        let outcome = take_automated_turn(
            &mut battle_state,
            Side::Opponent,
            &RandomMoveAI::new(),
            &mut rng,
        );

        // Assert
        assert_eq!(outcome, Ok(ActionOutcome::Skipped));
        assert_eq!(battle_state.log().len(), log_len);
        assert_eq!(battle_state.turn_owner(), Side::Opponent);
        assert!(!battle_state.is_finished());

        // Skipping again is just as harmless.
        let again = take_automated_turn(
            &mut battle_state,
            Side::Opponent,
            &RandomMoveAI::new(),
            &mut rng,
        );
        assert_eq!(again, Ok(ActionOutcome::Skipped));
        assert_eq!(battle_state.turn_owner(), Side::Opponent);
    }

    #[test]
    fn test_automated_turn_resolves_like_a_submitted_move() {
        let player = TestCombatantBuilder::new("Pikachu").build();
        let opponent = TestCombatantBuilder::new("Charmander")
            .with_moves(vec![tackle(), hyper_beam()])
            .build();
        let mut battle_state = create_test_battle(player, opponent);
        // Player: hit + variance. Opponent: pick (0.75 -> Hyper Beam), hit, variance.
        let mut rng = ScriptedRng::new(vec![0.0, 0.0, 0.75, 0.0, 0.0]);
        assert_ok(submit_move(&mut battle_state, Side::Player, 0, &mut rng));

        let outcome = assert_ok(take_automated_turn(
            &mut battle_state,
            Side::Opponent,
            &RandomMoveAI::new(),
            &mut rng,
        ));

        // Hyper Beam at even stats: floor(22 * 150 / 50 + 2) = 68, * 0.85 -> 57
        assert_eq!(outcome, ActionOutcome::Hit { damage: 57 });
        assert_eq!(battle_state.hp(Side::Player), 43);
        assert_eq!(battle_state.turn_owner(), Side::Player);
        assert!(matches!(
            battle_state.log().events()[2],
            BattleEvent::AttackDeclared {
                actor: Side::Opponent,
                ref move_name,
                ..
            } if move_name == "Hyper Beam"
        ));
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_automated_turn_respects_turn_order() {
        let player = TestCombatantBuilder::new("Pikachu").build();
        let opponent = TestCombatantBuilder::new("Charmander").build();
        let mut battle_state = create_test_battle(player, opponent);
        let mut rng = ScriptedRng::new(vec![]);

        let result = take_automated_turn(
            &mut battle_state,
            Side::Opponent,
            &RandomMoveAI::new(),
            &mut rng,
        );

        assert_eq!(
            result,
            Err(BattleError::InvalidTurn(InvalidTurnReason::NotYourTurn {
                turn_owner: Side::Player
            }))
        );
        assert!(battle_state.log().is_empty());
    }

    #[test]
    fn test_greedy_ai_needs_no_selection_roll() {
        let player = TestCombatantBuilder::new("Pikachu").build();
        let opponent = TestCombatantBuilder::new("Dragonite")
            .with_moves(vec![tackle(), hyper_beam()])
            .build();
        let mut battle_state = create_test_battle(player, opponent);
        let mut rng = ScriptedRng::new(vec![0.0, 0.0, 0.0, 0.0]);
        assert_ok(submit_move(&mut battle_state, Side::Player, 0, &mut rng));

        let ai: &dyn Behavior = &GreedyAI::new();
        let outcome = assert_ok(take_automated_turn(
            &mut battle_state,
            Side::Opponent,
            ai,
            &mut rng,
        ));

        assert_eq!(outcome, ActionOutcome::Hit { damage: 57 });
        assert_eq!(rng.remaining(), 0);
    }
}
