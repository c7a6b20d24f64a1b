//! Condition catalog
//!
//! The fixed set of status effects offered by the intake form. Conditions
//! entered through the edit prompt are free text and are not checked
//! against this list.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Standard status condition
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
}

impl Condition {
    /// All catalog entries, in display order
    pub fn catalog() -> Vec<Condition> {
        Condition::iter().collect()
    }

    /// Step through the catalog for a selector that also offers "none".
    ///
    /// `None` sits before the first entry; stepping past either end wraps.
    pub fn cycle(current: Option<Condition>, forward: bool) -> Option<Condition> {
        let catalog = Self::catalog();
        // Slot 0 is "none", slot i+1 is catalog[i]
        let slots = catalog.len() + 1;
        let slot = match current {
            None => 0,
            Some(c) => catalog.iter().position(|&x| x == c).map_or(0, |i| i + 1),
        };
        let next = if forward {
            (slot + 1) % slots
        } else {
            (slot + slots - 1) % slots
        };
        if next == 0 { None } else { Some(catalog[next - 1]) }
    }
}
