#[cfg(test)]
mod tests {
    use crate::battle::engine::{submit_move, ActionOutcome};
    use crate::battle::state::{BattleEvent, Phase, Side};
    use crate::battle::tests::common::{
        assert_ok, blind_swing, create_test_battle, predictable_rng, tackle, TestCombatantBuilder,
    };
    use crate::errors::{BattleError, InvalidTurnReason};
    use crate::rng::{EntropySource, ScriptedRng};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_hit_appends_declaration_and_damage() {
        // Arrange
        let player = TestCombatantBuilder::new("Pikachu").build();
        let opponent = TestCombatantBuilder::new("Charmander").build();
        let mut battle_state = create_test_battle(player, opponent);
        let mut rng = predictable_rng();

        // Act
        let outcome = assert_ok(submit_move(&mut battle_state, Side::Player, 0, &mut rng));

        // Assert: base 19 from Tackle at even stats, variance 0.925 -> 17
        assert_eq!(outcome, ActionOutcome::Hit { damage: 17 });
        assert_eq!(battle_state.hp(Side::Opponent), 83);
        assert_eq!(battle_state.hp(Side::Player), 100);
        assert_eq!(
            battle_state.log().events(),
            &[
                BattleEvent::AttackDeclared {
                    actor: Side::Player,
                    attacker: "Pikachu".to_string(),
                    move_name: "Tackle".to_string(),
                },
                BattleEvent::DamageDealt {
                    target: Side::Opponent,
                    defender: "Charmander".to_string(),
                    damage: 17,
                    remaining_hp: 83,
                },
            ]
        );
        assert_eq!(battle_state.turn_owner(), Side::Opponent);
        assert_eq!(battle_state.turn_number(), 1);
    }

    #[test]
    fn test_miss_leaves_hp_unchanged() {
        // Arrange
        let player = TestCombatantBuilder::new("Pikachu")
            .with_moves(vec![blind_swing()])
            .build();
        let opponent = TestCombatantBuilder::new("Charmander").build();
        let mut battle_state = create_test_battle(player, opponent);
        let mut rng = ScriptedRng::new(vec![0.5]);

        // Act
        let outcome = assert_ok(submit_move(&mut battle_state, Side::Player, 0, &mut rng));

        // Assert
        assert_eq!(outcome, ActionOutcome::Missed);
        assert_eq!(battle_state.hp(Side::Opponent), 100);
        assert!(!battle_state
            .log()
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::DamageDealt { .. })));
        assert_eq!(
            battle_state.log().last(),
            Some(&BattleEvent::MoveMissed {
                actor: Side::Player,
                attacker: "Pikachu".to_string(),
            })
        );
        assert_eq!(battle_state.turn_owner(), Side::Opponent);
        assert_eq!(rng.remaining(), 0, "A miss must not roll variance");
    }

    #[test]
    fn test_wrong_side_is_rejected_without_side_effects() {
        let player = TestCombatantBuilder::new("Pikachu").build();
        let opponent = TestCombatantBuilder::new("Charmander").build();
        let mut battle_state = create_test_battle(player, opponent);
        // An empty script panics if the engine tries to roll anything.
        let mut rng = ScriptedRng::new(vec![]);

        let result = submit_move(&mut battle_state, Side::Opponent, 0, &mut rng);

        assert_eq!(
            result,
            Err(BattleError::InvalidTurn(InvalidTurnReason::NotYourTurn {
                turn_owner: Side::Player
            }))
        );
        assert!(battle_state.log().is_empty());
        assert_eq!(battle_state.turn_owner(), Side::Player);
        assert_eq!(battle_state.hp(Side::Player), 100);
    }

    #[test]
    fn test_invalid_move_index_is_rejected() {
        let player = TestCombatantBuilder::new("Pikachu").build();
        let opponent = TestCombatantBuilder::new("Charmander").build();
        let mut battle_state = create_test_battle(player, opponent);
        let mut rng = ScriptedRng::new(vec![]);

        let result = submit_move(&mut battle_state, Side::Player, 3, &mut rng);

        assert_eq!(
            result,
            Err(BattleError::InvalidMoveIndex {
                side: Side::Player,
                index: 3
            })
        );
        assert!(battle_state.log().is_empty());
        assert_eq!(battle_state.turn_owner(), Side::Player);
    }

    #[test]
    fn test_knockout_finishes_battle_without_flipping_turn() {
        // Arrange
        let player = TestCombatantBuilder::new("Pikachu").build();
        let opponent = TestCombatantBuilder::new("Charmander").with_hp(10).build();
        let mut battle_state = create_test_battle(player, opponent);
        let mut rng = predictable_rng();

        // Act
        let outcome = assert_ok(submit_move(&mut battle_state, Side::Player, 0, &mut rng));

        // Assert
        assert_eq!(outcome, ActionOutcome::KnockedOut { damage: 17 });
        assert_eq!(battle_state.hp(Side::Opponent), 0);
        assert_eq!(
            battle_state.phase(),
            Phase::Finished {
                winner: Side::Player
            }
        );
        assert_eq!(battle_state.turn_owner(), Side::Player);
        assert_eq!(
            &battle_state.log().events()[1..],
            &[
                BattleEvent::DamageDealt {
                    target: Side::Opponent,
                    defender: "Charmander".to_string(),
                    damage: 17,
                    remaining_hp: 0,
                },
                BattleEvent::KnockedOut {
                    target: Side::Opponent,
                    pokemon: "Charmander".to_string(),
                },
                BattleEvent::VictoryDeclared {
                    winner: Side::Player,
                    pokemon: "Pikachu".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_finished_battle_rejects_every_side() {
        let player = TestCombatantBuilder::new("Pikachu").build();
        let opponent = TestCombatantBuilder::new("Charmander").with_hp(1).build();
        let mut battle_state = create_test_battle(player, opponent);
        let mut rng = predictable_rng();
        assert_ok(submit_move(&mut battle_state, Side::Player, 0, &mut rng));
        let log_len = battle_state.log().len();

        for side in [Side::Player, Side::Opponent] {
            let result = submit_move(&mut battle_state, side, 0, &mut rng);
            assert_eq!(
                result,
                Err(BattleError::InvalidTurn(InvalidTurnReason::BattleFinished))
            );
        }

        assert_eq!(battle_state.log().len(), log_len);
        assert_eq!(battle_state.hp(Side::Player), 100);
    }

    #[test]
    fn test_defender_hp_never_increases_and_damage_is_positive() {
        // Weak attacker into a wall: the formula alone would round towards 0.
        let player = TestCombatantBuilder::new("Magikarp")
            .with_attack(5)
            .with_hp(500)
            .with_moves(vec![tackle()])
            .build();
        let opponent = TestCombatantBuilder::new("Shuckle")
            .with_defense(230)
            .with_hp(500)
            .with_moves(vec![tackle()])
            .build();
        let mut battle_state = create_test_battle(player, opponent);
        let mut rng = EntropySource::new(ChaCha8Rng::seed_from_u64(12345));

        for _ in 0..100 {
            let side = battle_state.turn_owner();
            let defender = side.other();
            let old_hp = battle_state.hp(defender);

            let outcome = assert_ok(submit_move(&mut battle_state, side, 0, &mut rng));

            let new_hp = battle_state.hp(defender);
            match outcome {
                ActionOutcome::Hit { damage } | ActionOutcome::KnockedOut { damage } => {
                    assert!(damage >= 1);
                    assert_eq!(new_hp, old_hp.saturating_sub(damage));
                }
                ActionOutcome::Missed => assert_eq!(new_hp, old_hp),
                ActionOutcome::Skipped => panic!("Both sides have moves"),
            }
            assert!(new_hp <= old_hp);
            if battle_state.is_finished() {
                break;
            }
        }
    }
}
