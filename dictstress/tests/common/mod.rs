#![allow(dead_code)]

use dictstress::{Cell, FastContains, Implementation, KeyValueFactory, Model, NotFound, Snapshot};
use rand::Rng;
use std::collections::{HashMap, HashSet};

#[derive(Clone)]
struct Slot {
    hash: Cell<i64>,
    key: Cell<u64>,
    value: Cell<u64>,
}

impl Slot {
    fn empty() -> Self {
        Self {
            hash: Cell::Empty,
            key: Cell::Empty,
            value: Cell::Empty,
        }
    }
}

/// Linear probing table keyed by identity hash.
pub struct LinearTable {
    slots: Vec<Slot>,
    fill: usize,
    used: usize,
    recycling: bool,
    index: Option<HashSet<u64>>,
}

impl LinearTable {
    pub fn new(recycling: bool, indexed: bool) -> Self {
        Self {
            slots: vec![Slot::empty(); 8],
            fill: 0,
            used: 0,
            recycling,
            index: indexed.then(HashSet::new),
        }
    }

    fn lookup(&self, key: u64) -> Option<usize> {
        let n = self.slots.len();
        let mut idx = key as usize % n;
        while !self.slots[idx].key.is_empty() {
            if self.slots[idx].key == Cell::Occupied(key) {
                return Some(idx);
            }
            idx = (idx + 1) % n;
        }
        None
    }

    fn resize(&mut self) {
        let mut new_size = 8;
        while new_size <= self.used * 4 {
            new_size *= 2;
        }
        let old = std::mem::replace(&mut self.slots, vec![Slot::empty(); new_size]);
        self.fill = self.used;
        for slot in old {
            if let Cell::Occupied(k) = slot.key {
                let mut idx = k as usize % new_size;
                while !self.slots[idx].key.is_empty() {
                    idx = (idx + 1) % new_size;
                }
                self.slots[idx] = Slot {
                    hash: slot.hash,
                    key: slot.key,
                    value: slot.value,
                };
            }
        }
    }
}

impl Model<u64, u64> for LinearTable {
    fn get(&self, key: &u64) -> Result<&u64, NotFound> {
        let idx = self.lookup(*key).ok_or(NotFound)?;
        self.slots[idx].value.as_occupied().ok_or(NotFound)
    }

    fn set(&mut self, key: u64, value: u64) {
        let n = self.slots.len();
        let mut idx = key as usize % n;
        let mut target = None;
        while !self.slots[idx].key.is_empty() {
            if self.slots[idx].key == Cell::Occupied(key) {
                target = Some(idx);
                break;
            }
            if self.recycling && target.is_none() && self.slots[idx].key == Cell::Dummy {
                target = Some(idx);
            }
            idx = (idx + 1) % n;
        }
        let target = target.unwrap_or(idx);
        match self.slots[target].key {
            Cell::Empty => {
                self.used += 1;
                self.fill += 1;
            }
            Cell::Dummy => self.used += 1,
            Cell::Occupied(_) => {}
        }
        self.slots[target] = Slot {
            hash: Cell::Occupied(key as i64),
            key: Cell::Occupied(key),
            value: Cell::Occupied(value),
        };
        if let Some(index) = &mut self.index {
            index.insert(key);
        }
        if self.fill * 3 >= self.slots.len() * 2 {
            self.resize();
        }
    }

    fn delete(&mut self, key: &u64) -> Result<(), NotFound> {
        let idx = self.lookup(*key).ok_or(NotFound)?;
        self.used -= 1;
        self.slots[idx].key = Cell::Dummy;
        self.slots[idx].value = Cell::Empty;
        if let Some(index) = &mut self.index {
            index.remove(key);
        }
        Ok(())
    }

    fn keys(&self) -> Vec<u64> {
        self.slots
            .iter()
            .filter_map(|s| s.key.as_occupied().copied())
            .collect()
    }

    fn len(&self) -> usize {
        self.used
    }

    fn as_fast_contains(&self) -> Option<&dyn FastContains<u64>> {
        self.index.as_ref().map(|_| self as &dyn FastContains<u64>)
    }
}

impl FastContains<u64> for LinearTable {
    fn fast_contains(&self, key: &u64) -> bool {
        self.index.as_ref().is_some_and(|index| index.contains(key))
    }
}

pub fn dump(t: &LinearTable) -> Snapshot<u64, u64> {
    Snapshot {
        hashes: t.slots.iter().map(|s| s.hash.clone()).collect(),
        keys: t.slots.iter().map(|s| s.key.clone()).collect(),
        values: t.slots.iter().map(|s| s.value.clone()).collect(),
        fill: t.fill,
        used: t.used,
    }
}

fn build(pairs: &[(u64, u64)], recycling: bool, indexed: bool) -> LinearTable {
    let mut t = LinearTable::new(recycling, indexed);
    for (k, v) in pairs {
        t.set(*k, *v);
    }
    t
}

pub fn recycling() -> Implementation<u64, u64, LinearTable> {
    Implementation {
        name: "linear_recycling",
        factory: |pairs| build(pairs, true, false),
        dumper: dump,
    }
}

pub fn recycling_indexed() -> Implementation<u64, u64, LinearTable> {
    Implementation {
        name: "linear_recycling_indexed",
        factory: |pairs| build(pairs, true, true),
        dumper: dump,
    }
}

pub fn no_recycling() -> Implementation<u64, u64, LinearTable> {
    Implementation {
        name: "linear_no_recycling",
        factory: |pairs| build(pairs, false, false),
        dumper: dump,
    }
}

/// Same layout as the recycling table but `get` keeps answering for
/// removed keys.
pub struct Ghost {
    inner: LinearTable,
    ghosts: HashMap<u64, u64>,
}

impl Model<u64, u64> for Ghost {
    fn get(&self, key: &u64) -> Result<&u64, NotFound> {
        match self.inner.get(key) {
            Ok(v) => Ok(v),
            Err(NotFound) => self.ghosts.get(key).ok_or(NotFound),
        }
    }

    fn set(&mut self, key: u64, value: u64) {
        self.inner.set(key, value)
    }

    fn delete(&mut self, key: &u64) -> Result<(), NotFound> {
        let v = *self.inner.get(key)?;
        self.inner.delete(key)?;
        self.ghosts.insert(*key, v);
        Ok(())
    }

    fn keys(&self) -> Vec<u64> {
        self.inner.keys()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

pub fn ghost() -> Implementation<u64, u64, Ghost> {
    Implementation {
        name: "ghost",
        factory: |pairs| Ghost {
            inner: build(pairs, true, false),
            ghosts: HashMap::new(),
        },
        dumper: |g| dump(&g.inner),
    }
}

/// Keys drawn from `0..n`.
pub struct IntKv {
    pub n: u64,
}

impl KeyValueFactory<u64, u64> for IntKv {
    fn generate_key<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u64 {
        rng.random_range(0..self.n)
    }

    fn generate_value<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u64 {
        rng.random_range(0..1000)
    }
}

/// Never repeats a key.
pub struct FreshKv {
    pub next: u64,
}

impl KeyValueFactory<u64, u64> for FreshKv {
    fn generate_key<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> u64 {
        self.next += 1;
        self.next
    }

    fn generate_value<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> u64 {
        self.next * 10
    }
}

static PHANTOM: u64 = 7;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `get` answers for keys that were never inserted.
    Phantom,
    /// `get` returns a different value than the one just set.
    SkewOnSet,
    /// `get` returns different values for the pre-seeded keys.
    SkewInitial,
}

/// Same layout as the recycling table with a broken `get`.
pub struct Faulty {
    inner: LinearTable,
    fault: Fault,
    skewed: HashMap<u64, u64>,
}

impl Faulty {
    fn build(pairs: &[(u64, u64)], fault: Fault) -> Self {
        let skewed = match fault {
            Fault::SkewInitial => pairs.iter().map(|(k, v)| (*k, v + 1)).collect(),
            _ => HashMap::new(),
        };
        Self {
            inner: build(pairs, true, false),
            fault,
            skewed,
        }
    }
}

impl Model<u64, u64> for Faulty {
    fn get(&self, key: &u64) -> Result<&u64, NotFound> {
        if let Some(v) = self.skewed.get(key) {
            return Ok(v);
        }
        match self.inner.get(key) {
            Err(NotFound) if self.fault == Fault::Phantom => Ok(&PHANTOM),
            other => other,
        }
    }

    fn set(&mut self, key: u64, value: u64) {
        self.inner.set(key, value);
        if self.fault == Fault::SkewOnSet {
            self.skewed.insert(key, value + 1);
        } else {
            self.skewed.remove(&key);
        }
    }

    fn delete(&mut self, key: &u64) -> Result<(), NotFound> {
        self.skewed.remove(key);
        self.inner.delete(key)
    }

    fn keys(&self) -> Vec<u64> {
        self.inner.keys()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

fn dump_faulty(t: &Faulty) -> Snapshot<u64, u64> {
    dump(&t.inner)
}

pub fn phantom() -> Implementation<u64, u64, Faulty> {
    Implementation {
        name: "phantom",
        factory: |pairs| Faulty::build(pairs, Fault::Phantom),
        dumper: dump_faulty,
    }
}

pub fn skew_on_set() -> Implementation<u64, u64, Faulty> {
    Implementation {
        name: "skew_on_set",
        factory: |pairs| Faulty::build(pairs, Fault::SkewOnSet),
        dumper: dump_faulty,
    }
}

pub fn skew_initial() -> Implementation<u64, u64, Faulty> {
    Implementation {
        name: "skew_initial",
        factory: |pairs| Faulty::build(pairs, Fault::SkewInitial),
        dumper: dump_faulty,
    }
}
