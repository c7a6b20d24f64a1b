//! Combatant id generation
//!
//! Uses a seeded ChaCha RNG so tests can reproduce ids.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combatant::CombatantId;

/// Id generator for newly added combatants
#[derive(Debug, Clone)]
pub struct IdRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl IdRng {
    /// Create a new generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new generator with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this generator
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Mint a fresh id for a combatant named `name`.
    ///
    /// The name prefix only aids reading the persisted file; uniqueness
    /// comes from the 64 random bits.
    pub fn next_id(&mut self, name: &str) -> CombatantId {
        let bits = self.rng.next_u64();
        CombatantId::new(format!("{}-{:016x}", name, bits))
    }
}

impl Default for IdRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
