//! it-core: Core logic for the initiative tracker
//!
//! This crate holds all tracker state with no I/O dependencies.
//! Durable storage and log export are reached only through the
//! [`RosterStorage`] and [`LogSink`] ports, so everything here can be
//! driven from tests with in-memory fakes.

pub mod combatant;
pub mod condition;
pub mod engine;
pub mod combat_log;
pub mod roster;
pub mod storage;
pub mod tracker;

mod rng;

pub use combatant::{ADVERSARY_LABEL, Combatant, CombatantId};
pub use condition::Condition;
pub use engine::{ConditionEdit, Phase, TurnAdvance, TurnEngine};
pub use combat_log::{CombatLog, EXPORT_FILE_NAME, LogEntry};
pub use rng::IdRng;
pub use roster::{IntakeForm, RosterError, RosterStore};
pub use storage::{LogSink, MemorySink, MemoryStorage, RosterStorage, StorageError};
pub use tracker::{Intent, Outcome, Tracker};
