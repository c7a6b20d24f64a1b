//! Roster store
//!
//! Collects combatants before combat starts and mirrors the player-owned
//! part of the roster into durable storage.

use log::{debug, info, warn};
use thiserror::Error;

use crate::combatant::Combatant;
use crate::condition::Condition;
use crate::rng::IdRng;
use crate::storage::{RosterStorage, StorageError};

/// Raw contents of the intake form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    pub name: String,
    pub player: String,
    /// Initiative as typed; parsed on submit
    pub initiative: String,
    /// Optional starting condition picked from the catalog
    pub condition: Option<Condition>,
}

impl IntakeForm {
    pub fn new(
        name: impl Into<String>,
        player: impl Into<String>,
        initiative: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            player: player.into(),
            initiative: initiative.into(),
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Reasons an add can fail
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("initiative is not a number: {0:?}")]
    InvalidInitiative(String),

    /// The combatant was added but could not be persisted
    #[error("roster not saved: {0}")]
    Storage(#[from] StorageError),
}

impl RosterError {
    /// Intake rejections leave the roster untouched; storage failures do not
    pub fn is_rejection(&self) -> bool {
        !matches!(self, RosterError::Storage(_))
    }
}

/// Pre-combat roster backed by a storage port
pub struct RosterStore<S: RosterStorage> {
    combatants: Vec<Combatant>,
    storage: S,
    ids: IdRng,
}

impl<S: RosterStorage> RosterStore<S> {
    /// Create an empty store; nothing is read from `storage`
    pub fn new(storage: S) -> Self {
        Self::with_ids(storage, IdRng::from_entropy())
    }

    /// Create an empty store with a specific id generator
    pub fn with_ids(storage: S, ids: IdRng) -> Self {
        Self {
            combatants: Vec::new(),
            storage,
            ids,
        }
    }

    /// Create a store seeded from the persisted roster.
    ///
    /// Missing data yields an empty roster. A stored image that cannot be
    /// read is treated the same way rather than aborting startup.
    pub fn load(storage: S) -> Self {
        Self::load_with_ids(storage, IdRng::from_entropy())
    }

    pub fn load_with_ids(storage: S, ids: IdRng) -> Self {
        let mut store = Self::with_ids(storage, ids);
        match store.storage.load() {
            Ok(Some(saved)) => {
                info!("loaded {} saved combatants", saved.len());
                store.combatants = saved;
            }
            Ok(None) => debug!("no saved roster"),
            Err(e) => warn!("ignoring unreadable saved roster: {}", e),
        }
        store
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add a combatant from the intake form.
    ///
    /// Incomplete forms and non-numeric initiative are rejected without
    /// touching the roster. Adding a non-adversary rewrites the stored
    /// image; if that write fails the combatant stays in memory and the
    /// storage error is returned.
    pub fn add_combatant(&mut self, form: &IntakeForm) -> Result<&Combatant, RosterError> {
        if form.name.is_empty() {
            return Err(RosterError::MissingField("name"));
        }
        if form.player.is_empty() {
            return Err(RosterError::MissingField("player"));
        }
        if form.initiative.is_empty() {
            return Err(RosterError::MissingField("initiative"));
        }
        let initiative: i32 = form
            .initiative
            .trim()
            .parse()
            .map_err(|_| RosterError::InvalidInitiative(form.initiative.clone()))?;

        let mut combatant = Combatant::new(
            self.ids.next_id(&form.name),
            form.name.clone(),
            form.player.clone(),
            initiative,
        );
        if let Some(condition) = form.condition {
            combatant.conditions.push(condition.to_string());
        }
        debug!("added {} ({}) at initiative {}", combatant.name, combatant.player, initiative);

        let adversary = combatant.is_adversary();
        self.combatants.push(combatant);
        if !adversary {
            self.persist()?;
        }

        let index = self.combatants.len() - 1;
        Ok(&self.combatants[index])
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let snapshot: Vec<Combatant> = self
            .combatants
            .iter()
            .filter(|c| !c.is_adversary())
            .cloned()
            .collect();
        self.storage.save(&snapshot).inspect_err(|e| {
            warn!("failed to save roster: {}", e);
        })
    }
}
