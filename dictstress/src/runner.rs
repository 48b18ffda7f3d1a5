use super::*;

use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Number of iterations; each ends with one insert or update.
    pub n_inserts: usize,
    /// Cross-check every live and every removed key each iteration.
    pub extra_checks: bool,
    pub chances: OpChances,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            n_inserts: 500,
            extra_checks: true,
            chances: OpChances::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub iterations: usize,
    pub single_removes: usize,
    pub mass_removes: usize,
    pub mass_removed_keys: usize,
    pub inserts: usize,
    pub updates: usize,
    pub checks: usize,
}

/// One reference/candidate pair being driven in lockstep.
pub struct Session<K, V, R, C> {
    reference_impl: Implementation<K, V, R>,
    candidate_impl: Implementation<K, V, C>,
    reference: R,
    candidate: C,
    removed: HashSet<K>,
    generator: OpGenerator,
    extra_checks: bool,
    stats: RunStats,
}

impl<K, V, R, C> Session<K, V, R, C>
where
    K: Clone + Eq + Hash + Debug,
    V: Clone + PartialEq + Debug,
    R: Model<K, V>,
    C: Model<K, V>,
{
    pub fn new(
        reference_impl: Implementation<K, V, R>,
        candidate_impl: Implementation<K, V, C>,
        config: &RunConfig,
        initial_state: &[(K, V)],
    ) -> Self {
        let reference = reference_impl.build(initial_state);
        let candidate = candidate_impl.build(initial_state);

        log::debug!(
            "{}: presence by {}",
            reference_impl.name,
            if reference.as_fast_contains().is_some() {
                "fast_contains"
            } else {
                "query"
            }
        );

        Self {
            reference_impl,
            candidate_impl,
            reference,
            candidate,
            removed: HashSet::new(),
            generator: OpGenerator::new(config.chances),
            extra_checks: config.extra_checks,
            stats: RunStats::default(),
        }
    }

    pub fn reference(&self) -> &R {
        &self.reference
    }

    pub fn candidate(&self) -> &C {
        &self.candidate
    }

    /// Keys removed during the session and not inserted again since.
    pub fn removed(&self) -> &HashSet<K> {
        &self.removed
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn into_stats(self) -> RunStats {
        self.stats
    }

    /// Run one iteration: optional removals, optional cross-check, then one
    /// insert or update.
    pub fn step<F, G>(&mut self, kv: &mut F, rng: &mut G) -> Result<()>
    where
        F: KeyValueFactory<K, V>,
        G: Rng + ?Sized,
    {
        if let Some(key) = self.generator.single_remove(&self.reference, rng) {
            log::debug!("Removing {key:?}");
            self.remove_from_both(&key)?;
            self.stats.single_removes += 1;
            self.log_reference();
            self.check()?;
        }

        if let Some(batch) = self.generator.mass_remove(&self.reference, rng) {
            log::debug!("Mass-removing {} elements", batch.len());
            for key in &batch {
                self.remove_from_both(key)?;
            }
            self.stats.mass_removes += 1;
            self.stats.mass_removed_keys += batch.len();
        }

        if self.extra_checks {
            self.cross_check()?;
        }

        let key = kv.generate_key(rng);
        let value = kv.generate_value(rng);
        self.insert_or_update(key, value)?;

        self.stats.iterations += 1;
        Ok(())
    }

    fn remove_from_both(&mut self, key: &K) -> Result<()> {
        self.reference.delete(key).map_err(|_| {
            Error::ContractViolation(format!("reference does not contain {key:?} it listed"))
        })?;
        self.candidate.delete(key).map_err(|_| {
            Error::ContractViolation(format!("candidate reports NotFound deleting {key:?}"))
        })?;
        self.removed.insert(key.clone());
        Ok(())
    }

    fn cross_check(&self) -> Result<()> {
        for key in self.reference.keys() {
            let expected = self.reference.get(&key).map_err(|_| {
                Error::ContractViolation(format!("reference lists {key:?} but cannot get it"))
            })?;
            match self.candidate.get(&key) {
                Ok(actual) if actual == expected => {}
                Ok(actual) => {
                    return Err(Error::ContractViolation(format!(
                        "candidate maps {key:?} to {actual:?}, reference to {expected:?}"
                    )))
                }
                Err(NotFound) => {
                    return Err(Error::ContractViolation(format!(
                        "candidate lost {key:?}, reference maps it to {expected:?}"
                    )))
                }
            }
        }

        for key in &self.removed {
            self.expect_absent(key)?;
        }

        Ok(())
    }

    fn expect_absent(&self, key: &K) -> Result<()> {
        match self.candidate.get(key) {
            Err(NotFound) => Ok(()),
            Ok(stale) => Err(Error::ContractViolation(format!(
                "candidate still maps absent key {key:?} to {stale:?}"
            ))),
        }
    }

    fn is_present(&self, key: &K) -> bool {
        match self.reference.as_fast_contains() {
            Some(index) => index.fast_contains(key),
            None => self.reference.contains(key),
        }
    }

    fn insert_or_update(&mut self, key: K, value: V) -> Result<()> {
        if self.is_present(&key) {
            if let Ok(old) = self.reference.get(&key) {
                log::debug!("Replacing ({key:?}, {old:?}) with ({key:?}, {value:?})");
            }
            self.stats.updates += 1;
        } else {
            log::debug!("Inserting ({key:?}, {value:?})");
            self.expect_absent(&key)?;
            self.stats.inserts += 1;
        }

        self.removed.remove(&key);
        self.reference.set(key.clone(), value.clone());
        self.candidate.set(key.clone(), value.clone());
        self.log_reference();
        self.check()?;

        match self.candidate.get(&key) {
            Ok(actual) if *actual == value => Ok(()),
            Ok(actual) => Err(Error::ContractViolation(format!(
                "candidate maps {key:?} to {actual:?} right after setting {value:?}"
            ))),
            Err(NotFound) => Err(Error::ContractViolation(format!(
                "candidate lost {key:?} right after setting {value:?}"
            ))),
        }
    }

    fn check(&mut self) -> Result<()> {
        self.stats.checks += 1;
        verify_same(
            &self.reference,
            self.reference_impl.dumper,
            &self.candidate,
            self.candidate_impl.dumper,
        )
    }

    fn log_reference(&self) {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("reference keys: {:?}", self.reference.keys());
        }
    }
}

/// Drive `config.n_inserts` iterations against a fresh reference/candidate
/// pair built from `initial_state`. The first divergence ends the run.
pub fn run<K, V, R, C, F, G>(
    reference: Implementation<K, V, R>,
    candidate: Implementation<K, V, C>,
    config: &RunConfig,
    kv: &mut F,
    initial_state: &[(K, V)],
    rng: &mut G,
) -> Result<RunStats>
where
    K: Clone + Eq + Hash + Debug,
    V: Clone + PartialEq + Debug,
    R: Model<K, V>,
    C: Model<K, V>,
    F: KeyValueFactory<K, V>,
    G: Rng + ?Sized,
{
    log::debug!(
        "Starting test: {} vs {}, {} initial pairs",
        reference.name,
        candidate.name,
        initial_state.len()
    );

    let mut session = Session::new(reference, candidate, config, initial_state);
    for _ in 0..config.n_inserts {
        session.step(kv, rng)?;
    }

    Ok(session.into_stats())
}
