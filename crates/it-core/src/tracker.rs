//! Tracker facade
//!
//! Owns the roster and the turn engine and turns user intents into state
//! changes. Intents that do not apply to the current phase are ignored
//! here, so the engine's phase assertions are never reached from the UI.

use std::collections::VecDeque;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::combatant::{Combatant, CombatantId};
use crate::engine::{ConditionEdit, Phase, TurnAdvance, TurnEngine};
use crate::roster::{IntakeForm, RosterError, RosterStore};
use crate::storage::{LogSink, RosterStorage};

/// Maximum number of messages kept for display
const MAX_MESSAGES: usize = 50;

/// A user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(IntakeForm),
    StartCombat,
    NextTurn,
    EndCombat,
    Reorder { from: CombatantId, to: CombatantId },
    EditConditions(ConditionEdit),
    ExportLog,
}

/// What executing an intent did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(CombatantId),
    /// Intake was incomplete or malformed; nothing changed
    Rejected(String),
    Started { combatants: usize },
    Advanced(TurnAdvance),
    Ended,
    Reordered,
    ConditionsEdited,
    Exported(PathBuf),
    /// Not applicable in the current phase, or changed nothing
    Ignored,
    /// A storage or export backend failed
    Failed(String),
}

/// Roster, turn engine and message list
pub struct Tracker<S: RosterStorage> {
    roster: RosterStore<S>,
    engine: TurnEngine,
    messages: VecDeque<String>,
}

impl<S: RosterStorage> Tracker<S> {
    pub fn new(roster: RosterStore<S>) -> Self {
        Self {
            roster,
            engine: TurnEngine::new(),
            messages: VecDeque::new(),
        }
    }

    pub fn roster(&self) -> &RosterStore<S> {
        &self.roster
    }

    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    /// Entries shown to the user: the roster in setup, the turn order in combat
    pub fn visible(&self) -> &[Combatant] {
        match self.engine.phase() {
            Phase::Setup => self.roster.combatants(),
            Phase::Active => self.engine.order(),
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn last_message(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    /// Add a message for display
    pub fn message(&mut self, msg: impl Into<String>) {
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(msg.into());
    }

    /// Execute one intent
    pub fn execute(&mut self, intent: Intent, sink: &mut impl LogSink) -> Outcome {
        let active = self.engine.is_active();
        match intent {
            Intent::Add(form) => self.add(&form),
            Intent::StartCombat if !active => {
                self.engine.start_combat(self.roster.combatants());
                let combatants = self.engine.order().len();
                self.message(format!("Combat started with {} combatants.", combatants));
                Outcome::Started { combatants }
            }
            Intent::NextTurn if active => {
                let advance = self.engine.next_turn();
                if advance.new_round {
                    self.message(format!("Round {} begins.", advance.round));
                }
                Outcome::Advanced(advance)
            }
            Intent::EndCombat if active => {
                self.engine.end_combat();
                self.message("Combat ended.");
                Outcome::Ended
            }
            Intent::Reorder { from, to } if active => {
                if self.engine.reorder(&from, &to) {
                    Outcome::Reordered
                } else {
                    Outcome::Ignored
                }
            }
            Intent::EditConditions(edit) if active => {
                if self.engine.edit_conditions(&edit) {
                    Outcome::ConditionsEdited
                } else {
                    Outcome::Ignored
                }
            }
            Intent::ExportLog if active => match self.engine.log().export_to(sink) {
                Ok(path) => {
                    info!("exported combat log to {}", path.display());
                    self.message(format!("Log exported to {}.", path.display()));
                    Outcome::Exported(path)
                }
                Err(e) => {
                    warn!("log export failed: {}", e);
                    self.message(format!("Export failed: {}", e));
                    Outcome::Failed(e.to_string())
                }
            },
            other => {
                debug!("ignoring {:?} in {:?} phase", other, self.engine.phase());
                Outcome::Ignored
            }
        }
    }

    fn add(&mut self, form: &IntakeForm) -> Outcome {
        let result = self.roster.add_combatant(form).map(|c| c.id.clone());
        match result {
            Ok(id) => Outcome::Added(id),
            Err(e @ RosterError::Storage(_)) => {
                self.message(format!("Added, but {}", e));
                Outcome::Failed(e.to_string())
            }
            Err(e) => {
                debug!("intake rejected: {}", e);
                Outcome::Rejected(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdRng;
    use crate::storage::{MemorySink, MemoryStorage};

    fn tracker() -> Tracker<MemoryStorage> {
        Tracker::new(RosterStore::with_ids(MemoryStorage::new(), IdRng::new(3)))
    }

    fn add(t: &mut Tracker<MemoryStorage>, name: &str, player: &str, init: &str) -> CombatantId {
        match t.execute(Intent::Add(IntakeForm::new(name, player, init)), &mut MemorySink::default()) {
            Outcome::Added(id) => id,
            other => panic!("expected Added, got {:?}", other),
        }
    }

    #[test]
    fn test_visible_switches_with_phase() {
        let mut t = tracker();
        let mut sink = MemorySink::default();
        add(&mut t, "Low", "P1", "1");
        add(&mut t, "High", "P2", "9");

        assert_eq!(t.visible()[0].name, "Low");
        t.execute(Intent::StartCombat, &mut sink);
        assert_eq!(t.visible()[0].name, "High");
    }

    #[test]
    fn test_rejected_add_is_silent() {
        let mut t = tracker();
        let outcome = t.execute(
            Intent::Add(IntakeForm::new("", "P1", "3")),
            &mut MemorySink::default(),
        );
        assert!(matches!(outcome, Outcome::Rejected(_)));
        assert!(t.last_message().is_none());
    }

    #[test]
    fn test_wrong_phase_intents_ignored() {
        let mut t = tracker();
        let mut sink = MemorySink::default();
        assert_eq!(t.execute(Intent::NextTurn, &mut sink), Outcome::Ignored);
        assert_eq!(t.execute(Intent::EndCombat, &mut sink), Outcome::Ignored);
        assert_eq!(t.execute(Intent::ExportLog, &mut sink), Outcome::Ignored);

        t.execute(Intent::StartCombat, &mut sink);
        assert_eq!(t.execute(Intent::StartCombat, &mut sink), Outcome::Ignored);
        assert!(sink.files.is_empty());
    }

    #[test]
    fn test_add_allowed_during_combat_without_joining_order() {
        let mut t = tracker();
        let mut sink = MemorySink::default();
        add(&mut t, "Aria", "P1", "15");
        t.execute(Intent::StartCombat, &mut sink);
        add(&mut t, "Late", "P3", "30");

        assert_eq!(t.engine().order().len(), 1);
        assert_eq!(t.roster().len(), 2);
    }

    #[test]
    fn test_export_delivers_log() {
        let mut t = tracker();
        let mut sink = MemorySink::default();
        add(&mut t, "Aria", "P1", "15");
        t.execute(Intent::StartCombat, &mut sink);

        let outcome = t.execute(Intent::ExportLog, &mut sink);
        assert_eq!(outcome, Outcome::Exported(PathBuf::from("combat-log.json")));
        assert_eq!(sink.files.len(), 1);
    }

    #[test]
    fn test_round_message() {
        let mut t = tracker();
        let mut sink = MemorySink::default();
        add(&mut t, "Aria", "P1", "15");
        t.execute(Intent::StartCombat, &mut sink);
        t.execute(Intent::NextTurn, &mut sink);
        assert_eq!(t.last_message(), Some("Round 2 begins."));
    }

    #[test]
    fn test_messages_bounded() {
        let mut t = tracker();
        for i in 0..(MAX_MESSAGES + 5) {
            t.message(format!("m{}", i));
        }
        assert_eq!(t.messages().count(), MAX_MESSAGES);
        assert_eq!(t.messages().next(), Some("m5"));
    }
}
