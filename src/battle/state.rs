use schema::Combatant;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two seats of a battle. The player is driven from outside; the
/// opponent is the automated side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Finished { winner: Side },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    AttackDeclared {
        actor: Side,
        attacker: String,
        move_name: String,
    },
    MoveMissed {
        actor: Side,
        attacker: String,
    },
    DamageDealt {
        target: Side,
        defender: String,
        damage: u16,
        remaining_hp: u16,
    },
    KnockedOut {
        target: Side,
        pokemon: String,
    },
    VictoryDeclared {
        winner: Side,
        pokemon: String,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable line.
    pub fn format(&self) -> String {
        match self {
            BattleEvent::AttackDeclared {
                attacker,
                move_name,
                ..
            } => format!("{} used {}!", attacker, move_name),
            BattleEvent::MoveMissed { attacker, .. } => {
                format!("{}'s attack missed!", attacker)
            }
            BattleEvent::DamageDealt {
                defender, damage, ..
            } => format!("{} took {} damage!", defender, damage),
            BattleEvent::KnockedOut { pokemon, .. } => format!("{} fainted!", pokemon),
            BattleEvent::VictoryDeclared { pokemon, .. } => {
                format!("{} wins the battle!", pokemon)
            }
        }
    }

    /// Short tag for the kind of line, handy for styling a rendered log.
    pub fn kind(&self) -> &'static str {
        match self {
            BattleEvent::AttackDeclared { .. } => "attack",
            BattleEvent::MoveMissed { .. } => "miss",
            BattleEvent::DamageDealt { .. } => "damage",
            BattleEvent::KnockedOut { .. } => "knockout",
            BattleEvent::VictoryDeclared { .. } => "victory",
        }
    }
}

/// Append-only record of everything that happened in a battle.
///
/// Only the engine can push; readers get slices.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<BattleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub(crate) fn push(&mut self, event: BattleEvent) {
        tracing::debug!(event = %event.format(), kind = event.kind(), "battle event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Events appended at or after `index`. Empty if `index` is past the end.
    pub fn since(&self, index: usize) -> &[BattleEvent] {
        self.events.get(index..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&BattleEvent> {
        self.events.last()
    }

    /// Return true if the log contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the log.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Every event rendered with [`BattleEvent::format`].
    pub fn formatted_lines(&self) -> Vec<String> {
        self.events.iter().map(BattleEvent::format).collect()
    }
}

impl fmt::Display for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {}", event.format())?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub battle_id: String,
    pub(crate) combatants: [Combatant; 2],
    pub(crate) hp: [u16; 2],
    pub(crate) max_hp: [u16; 2],
    pub(crate) turn_owner: Side,
    pub(crate) phase: Phase,
    pub(crate) turn_number: u32,
    pub(crate) log: EventLog,
}

impl BattleState {
    /// Starts a battle: both sides at full HP (their HP base stat), the
    /// player to move, nothing logged yet.
    pub fn new(id: String, player: Combatant, opponent: Combatant) -> Self {
        let max_hp = [player.hp(), opponent.hp()];
        Self {
            battle_id: id,
            combatants: [player, opponent],
            hp: max_hp,
            max_hp,
            turn_owner: Side::Player,
            phase: Phase::InProgress,
            turn_number: 0,
            log: EventLog::new(),
        }
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    pub fn hp(&self, side: Side) -> u16 {
        self.hp[side.index()]
    }

    pub fn max_hp(&self, side: Side) -> u16 {
        self.max_hp[side.index()]
    }

    pub fn turn_owner(&self) -> Side {
        self.turn_owner
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            Phase::InProgress => None,
        }
    }

    /// Number of resolved actions so far (hits and misses, not skips).
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub(crate) fn set_hp(&mut self, side: Side, hp: u16) {
        self.hp[side.index()] = hp.min(self.max_hp[side.index()]);
    }
}

impl fmt::Display for BattleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for side in [Side::Opponent, Side::Player] {
            writeln!(
                f,
                "{:<9} {} (Lv. {}) HP: {}/{}",
                format!("[{}]", side),
                self.combatant(side).name,
                crate::battle::calculators::BATTLE_LEVEL,
                self.hp(side),
                self.max_hp(side)
            )?;
        }
        match self.phase {
            Phase::InProgress => write!(f, "Turn {}: {} to move", self.turn_number + 1, self.turn_owner),
            Phase::Finished { winner } => write!(
                f,
                "Battle over: {} won",
                self.combatant(winner).name
            ),
        }
    }
}
