//! Combatant records

use std::fmt;

use serde::{Deserialize, Serialize};

/// Owner label reserved for non-player adversaries.
///
/// Combatants carrying this label are never written to durable storage.
pub const ADVERSARY_LABEL: &str = "enemy";

/// Opaque unique identifier of a combatant
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatantId(String);

impl CombatantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A participant in combat, player character or adversary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    /// Owning player; [`ADVERSARY_LABEL`] marks an adversary
    pub player: String,
    pub initiative: i32,
    /// Active conditions in insertion order, duplicates allowed
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl Combatant {
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        player: impl Into<String>,
        initiative: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            player: player.into(),
            initiative,
            conditions: Vec::new(),
        }
    }

    /// Check if this combatant is controlled by the game master
    pub fn is_adversary(&self) -> bool {
        self.player == ADVERSARY_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adversary_label_is_exact() {
        let goblin = Combatant::new(CombatantId::new("g"), "Goblin", "enemy", 8);
        let boss = Combatant::new(CombatantId::new("b"), "Boss", "Enemy", 20);
        assert!(goblin.is_adversary());
        assert!(!boss.is_adversary());
    }

    #[test]
    fn test_serialized_shape() {
        let mut aria = Combatant::new(CombatantId::new("Aria-1"), "Aria", "P1", 15);
        aria.conditions.push("Prone".to_string());

        let value = serde_json::to_value(&aria).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "Aria-1",
                "name": "Aria",
                "player": "P1",
                "initiative": 15,
                "conditions": ["Prone"],
            })
        );
    }

    #[test]
    fn test_missing_conditions_default_empty() {
        let json = r#"{"id":"x","name":"Bram","player":"P2","initiative":3}"#;
        let bram: Combatant = serde_json::from_str(json).unwrap();
        assert!(bram.conditions.is_empty());
    }
}
