use crate::battle::state::{BattleEvent, BattleState};
use crate::errors::BattleResult;
use crate::rng::ScriptedRng;
use schema::{Combatant, Move, PokemonType};

/// A builder for creating test combatants with common defaults.
///
/// # Example
/// ```
/// let pikachu = TestCombatantBuilder::new("Pikachu")
///     .with_hp(20)
///     .with_moves(vec![tackle()])
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    stats: [u16; 6],
    moves: Vec<Move>,
}

impl TestCombatantBuilder {
    /// Creates a new builder with 100 in every stat and a single Tackle.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            stats: [100; 6],
            moves: vec![tackle()],
        }
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.stats[schema::HP] = hp;
        self
    }

    pub fn with_attack(mut self, attack: u16) -> Self {
        self.stats[schema::ATTACK] = attack;
        self
    }

    pub fn with_defense(mut self, defense: u16) -> Self {
        self.stats[schema::DEFENSE] = defense;
        self
    }

    /// Sets the moves for the test combatant.
    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    pub fn build(self) -> Combatant {
        Combatant::new(&self.name, self.stats, self.moves)
    }
}

pub fn tackle() -> Move {
    Move::new("Tackle", PokemonType::Normal, 40, 100)
}

/// Never hits unless the accuracy roll is exactly zero.
pub fn blind_swing() -> Move {
    Move::new("Blind Swing", PokemonType::Normal, 40, 0)
}

pub fn hyper_beam() -> Move {
    Move::new("Hyper Beam", PokemonType::Normal, 150, 90)
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(player: Combatant, opponent: Combatant) -> BattleState {
    BattleState::new("test_battle".to_string(), player, opponent)
}

/// A scripted source filled with mid-range values (always hits a 100 accuracy
/// move, mid variance, picks a middle move).
pub fn predictable_rng() -> ScriptedRng {
    ScriptedRng::new(vec![0.5; 200])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}

/// Asserts the structural guarantees every finished or running log must hold.
pub fn assert_log_well_formed(events: &[BattleEvent]) {
    let victories: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, BattleEvent::VictoryDeclared { .. }))
        .map(|(i, _)| i)
        .collect();
    assert!(victories.len() <= 1, "More than one victory: {:?}", events);

    if let Some(&victory_index) = victories.first() {
        assert_eq!(
            victory_index,
            events.len() - 1,
            "Events logged after the victory: {:?}",
            events
        );
        let winner_side = match &events[victory_index] {
            BattleEvent::VictoryDeclared { winner, .. } => *winner,
            _ => unreachable!(),
        };
        match events.get(victory_index.wrapping_sub(1)) {
            Some(BattleEvent::KnockedOut { target, .. }) => {
                assert_eq!(*target, winner_side.other())
            }
            other => panic!("Victory not preceded by a knockout: {:?}", other),
        }
    }

    // Every attack declaration is followed by a miss or damage line.
    for (i, event) in events.iter().enumerate() {
        if matches!(event, BattleEvent::AttackDeclared { .. }) {
            assert!(
                matches!(
                    events.get(i + 1),
                    Some(BattleEvent::MoveMissed { .. }) | Some(BattleEvent::DamageDealt { .. })
                ),
                "Declaration at {} not resolved: {:?}",
                i,
                events
            );
        }
    }
}
