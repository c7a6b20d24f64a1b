//! Turn engine
//!
//! Two-phase state machine: `Setup` until combat starts, `Active` until it
//! ends. Every operation is only legal in one phase; calling it in the
//! other is a caller bug and panics. Use [`TurnEngine::is_active`] to check
//! first.

use log::{debug, info};

use crate::combat_log::CombatLog;
use crate::combatant::{Combatant, CombatantId};

/// Combat phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Combat not started
    #[default]
    Setup,
    /// Combat running
    Active,
}

/// Request to replace a combatant's conditions with free text.
///
/// `raw` is `None` when the prompt was cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionEdit {
    pub id: CombatantId,
    pub raw: Option<String>,
}

impl ConditionEdit {
    pub fn new(id: CombatantId, raw: impl Into<String>) -> Self {
        Self {
            id,
            raw: Some(raw.into()),
        }
    }

    pub fn cancelled(id: CombatantId) -> Self {
        Self { id, raw: None }
    }

    /// Tokens the edit would install, `None` if it changes nothing.
    ///
    /// Blank tokens (from `a,,b` or a trailing comma) are kept.
    pub fn tokens(&self) -> Option<Vec<String>> {
        match self.raw.as_deref() {
            None | Some("") => None,
            Some(text) => Some(text.split(',').map(|t| t.trim().to_string()).collect()),
        }
    }
}

/// Result of advancing one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnAdvance {
    pub turn_index: usize,
    pub round: u32,
    /// The order wrapped and a new round began
    pub new_round: bool,
}

/// Turn order, round counter and combat log
#[derive(Debug, Clone)]
pub struct TurnEngine {
    phase: Phase,
    order: Vec<Combatant>,
    round: u32,
    turn_index: usize,
    log: CombatLog,
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnEngine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Setup,
            order: Vec::new(),
            round: 1,
            turn_index: 0,
            log: CombatLog::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Current turn order; empty outside combat
    pub fn order(&self) -> &[Combatant] {
        &self.order
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    /// Combatant occupying the active position
    pub fn active_combatant(&self) -> Option<&Combatant> {
        self.order.get(self.turn_index)
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    fn require(&self, phase: Phase, operation: &str) {
        assert!(
            self.phase == phase,
            "{} called in {:?} phase, requires {:?}",
            operation,
            self.phase,
            phase
        );
    }

    fn order_names(&self) -> Vec<String> {
        self.order.iter().map(|c| c.name.clone()).collect()
    }

    /// Sort `roster` into turn order and begin round 1.
    ///
    /// Highest initiative acts first; ties keep roster order.
    pub fn start_combat(&mut self, roster: &[Combatant]) {
        self.require(Phase::Setup, "start_combat");

        let mut order = roster.to_vec();
        order.sort_by(|a, b| b.initiative.cmp(&a.initiative));
        self.order = order;
        self.round = 1;
        self.turn_index = 0;
        self.log.clear();
        self.log.record(1, self.order_names());
        self.phase = Phase::Active;

        info!("combat started with {} combatants", self.order.len());
    }

    /// Move the active position forward, wrapping into a new round.
    ///
    /// The log entry for a new round captures the order as it stands now,
    /// including any reorders since the previous round. An empty order
    /// never advances.
    pub fn next_turn(&mut self) -> TurnAdvance {
        self.require(Phase::Active, "next_turn");

        if self.order.is_empty() {
            return TurnAdvance {
                turn_index: 0,
                round: self.round,
                new_round: false,
            };
        }

        let next = (self.turn_index + 1) % self.order.len();
        let new_round = next == 0;
        if new_round {
            self.round += 1;
            self.log.record(self.round, self.order_names());
            info!("round {} begins", self.round);
        }
        self.turn_index = next;

        TurnAdvance {
            turn_index: next,
            round: self.round,
            new_round,
        }
    }

    /// Drop the turn order and log and return to setup
    pub fn end_combat(&mut self) {
        self.require(Phase::Active, "end_combat");

        info!("combat ended after {} rounds", self.round);
        self.order.clear();
        self.round = 1;
        self.turn_index = 0;
        self.log.clear();
        self.phase = Phase::Setup;
    }

    /// Move `from` into the slot currently held by `to`.
    ///
    /// Everyone else keeps their relative order. The active position is
    /// not adjusted, so the highlight stays on the slot rather than
    /// following the moved combatant. Unknown ids and `from == to` are
    /// no-ops. Returns whether the order changed.
    pub fn reorder(&mut self, from: &CombatantId, to: &CombatantId) -> bool {
        self.require(Phase::Active, "reorder");

        if from == to {
            return false;
        }
        let Some(old_index) = self.order.iter().position(|c| &c.id == from) else {
            return false;
        };
        let Some(new_index) = self.order.iter().position(|c| &c.id == to) else {
            return false;
        };

        let moved = self.order.remove(old_index);
        debug!("moved {} from slot {} to {}", moved.name, old_index, new_index);
        self.order.insert(new_index, moved);
        true
    }

    /// Replace the conditions of a turn-order entry.
    ///
    /// Only the turn order is touched; the roster keeps its copy. A
    /// cancelled or empty edit, or an unknown id, changes nothing.
    /// Returns whether conditions were replaced.
    pub fn edit_conditions(&mut self, edit: &ConditionEdit) -> bool {
        self.require(Phase::Active, "edit_conditions");

        let Some(tokens) = edit.tokens() else {
            return false;
        };
        let Some(combatant) = self.order.iter_mut().find(|c| c.id == edit.id) else {
            return false;
        };
        debug!("conditions of {} set to {:?}", combatant.name, tokens);
        combatant.conditions = tokens;
        true
    }
}
