use super::*;

use rand::seq::IndexedRandom;

/// Probabilities driving the pre-insert removals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpChances {
    pub single_remove: f64,
    pub mass_remove: f64,
    /// Fraction of the live keys a mass removal takes out.
    pub mass_remove_coeff: f64,
}

impl Default for OpChances {
    fn default() -> Self {
        Self {
            single_remove: 0.3,
            mass_remove: 0.002,
            mass_remove_coeff: 0.8,
        }
    }
}

/// Mass removal only fires on tables with more entries than this.
pub const MASS_REMOVE_MIN_LEN: usize = 10;

/// Decides which removals happen before the insert of an iteration.
/// Holds no state besides the chances.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpGenerator {
    chances: OpChances,
}

impl OpGenerator {
    pub fn new(chances: OpChances) -> Self {
        Self { chances }
    }

    pub fn chances(&self) -> OpChances {
        self.chances
    }

    /// The key to remove this iteration, if any.
    pub fn single_remove<K, V, M, R>(&self, model: &M, rng: &mut R) -> Option<K>
    where
        K: Clone,
        M: Model<K, V> + ?Sized,
        R: Rng + ?Sized,
    {
        let should_remove = rng.random_bool(self.chances.single_remove);
        if !should_remove || model.is_empty() {
            return None;
        }
        let keys = model.keys();
        keys.choose(rng).cloned()
    }

    /// The batch of distinct keys to remove this iteration, if any.
    pub fn mass_remove<K, V, M, R>(&self, model: &M, rng: &mut R) -> Option<Vec<K>>
    where
        K: Clone,
        M: Model<K, V> + ?Sized,
        R: Rng + ?Sized,
    {
        let should_remove = rng.random_bool(self.chances.mass_remove);
        if !should_remove || model.len() <= MASS_REMOVE_MIN_LEN {
            return None;
        }
        let keys = model.keys();
        let amount = (self.chances.mass_remove_coeff * keys.len() as f64).floor() as usize;
        Some(keys.choose_multiple(rng, amount).cloned().collect())
    }
}
