use super::*;

enum Lookup {
    Found(usize),
    /// Where a new entry for the key would go.
    Vacant(usize),
}

/// A simplified dict sharing the probing scheme of [`Dict32`] but written
/// without its op structure. Whether tombstones are reused is a switch;
/// with recycling on, its layout matches [`Dict32`] for tables up to
/// 50000 live entries. Keeps a key set on the side for membership tests.
#[derive(Clone, Debug)]
pub struct AlmostPythonDict {
    slots: Vec<Slot>,
    fill: usize,
    used: usize,
    recycling: bool,
    keys_set: HashSet<Obj>,
}

impl AlmostPythonDict {
    pub fn new(recycling: bool) -> Self {
        Self {
            slots: empty_slots(MIN_SIZE),
            fill: 0,
            used: 0,
            recycling,
            keys_set: HashSet::new(),
        }
    }

    pub fn recycling() -> Self {
        Self::new(true)
    }

    pub fn no_recycling() -> Self {
        Self::new(false)
    }

    pub fn from_pairs(recycling: bool, pairs: &[(Obj, Obj)]) -> Self {
        let mut dict = Self::new(recycling);
        for (k, v) in pairs {
            dict.set(k.clone(), v.clone());
        }
        dict
    }

    pub fn is_recycling(&self) -> bool {
        self.recycling
    }

    fn lookup(&self, hash_code: i64, key: &Obj) -> Lookup {
        let mut probe = Probe::new(hash_code, self.slots.len());
        let mut first_dummy = None;
        loop {
            let slot = &self.slots[probe.idx];
            match &slot.key {
                Cell::Empty => return Lookup::Vacant(first_dummy.unwrap_or(probe.idx)),
                Cell::Dummy => {
                    if self.recycling && first_dummy.is_none() {
                        first_dummy = Some(probe.idx);
                    }
                }
                Cell::Occupied(_) => {
                    if slot.holds(hash_code, key) {
                        return Lookup::Found(probe.idx);
                    }
                }
            }
            probe.advance();
        }
    }

    fn resize(&mut self) {
        let new_size = find_optimal_size(self.used * 4);
        log::trace!("almost python dict resize {} -> {}", self.slots.len(), new_size);

        let old_slots = std::mem::replace(&mut self.slots, empty_slots(new_size));
        self.fill = 0;
        self.used = 0;
        for slot in old_slots {
            if let (Cell::Occupied(hash_code), Cell::Occupied(key), Cell::Occupied(value)) =
                (slot.hash_code, slot.key, slot.value)
            {
                let mut probe = Probe::new(hash_code, new_size);
                while !self.slots[probe.idx].key.is_empty() {
                    probe.advance();
                }
                self.slots[probe.idx] = Slot::live(hash_code, key, value);
                self.fill += 1;
                self.used += 1;
            }
        }
    }
}

impl Model<Obj, Obj> for AlmostPythonDict {
    fn get(&self, key: &Obj) -> Result<&Obj> {
        match self.lookup(key.py_hash(), key) {
            Lookup::Found(idx) => self.slots[idx].value.as_occupied().ok_or(NotFound),
            Lookup::Vacant(_) => Err(NotFound),
        }
    }

    fn set(&mut self, key: Obj, value: Obj) {
        let hash_code = key.py_hash();
        match self.lookup(hash_code, &key) {
            Lookup::Found(idx) => {
                self.slots[idx].value = Cell::Occupied(value);
            }
            Lookup::Vacant(idx) => {
                if self.slots[idx].key.is_empty() {
                    self.fill += 1;
                }
                self.used += 1;
                self.keys_set.insert(key.clone());
                self.slots[idx] = Slot::live(hash_code, key, value);

                if self.fill * 3 >= self.slots.len() * 2 {
                    self.resize();
                }
            }
        }
    }

    fn delete(&mut self, key: &Obj) -> Result<()> {
        let Lookup::Found(idx) = self.lookup(key.py_hash(), key) else {
            return Err(NotFound);
        };
        self.slots[idx].key = Cell::Dummy;
        self.slots[idx].value = Cell::Empty;
        self.used -= 1;
        self.keys_set.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<Obj> {
        self.slots
            .iter()
            .filter_map(|s| s.key.as_occupied().cloned())
            .collect()
    }

    fn len(&self) -> usize {
        self.used
    }

    fn as_fast_contains(&self) -> Option<&dyn FastContains<Obj>> {
        Some(self as &dyn FastContains<Obj>)
    }
}

impl FastContains<Obj> for AlmostPythonDict {
    fn fast_contains(&self, key: &Obj) -> bool {
        self.keys_set.contains(key)
    }
}

impl SlotTable for AlmostPythonDict {
    fn slots(&self) -> &[Slot] {
        &self.slots
    }

    fn fill(&self) -> usize {
        self.fill
    }

    fn used(&self) -> usize {
        self.used
    }
}
