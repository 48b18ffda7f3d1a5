use super::*;

/// The dict of CPython 3.2: perturbed probing, tombstones recycled on
/// insert, resize at two thirds fill.
#[derive(Clone, Debug)]
pub struct Dict32 {
    pub(crate) slots: Vec<Slot>,
    pub(crate) fill: usize,
    pub(crate) used: usize,
}

impl Default for Dict32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Dict32 {
    pub fn new() -> Self {
        Self {
            slots: empty_slots(MIN_SIZE),
            fill: 0,
            used: 0,
        }
    }

    /// Insert `pairs` in order into a fresh dict.
    pub fn from_pairs(pairs: &[(Obj, Obj)]) -> Self {
        let mut dict = Self::new();
        for (k, v) in pairs {
            dict.set(k.clone(), v.clone());
        }
        dict
    }
}

impl Model<Obj, Obj> for Dict32 {
    fn get(&self, key: &Obj) -> Result<&Obj> {
        let idx = op::Lookdict { dict: self }.exec(key)?;
        self.slots[idx].value.as_occupied().ok_or(NotFound)
    }

    fn set(&mut self, key: Obj, value: Obj) {
        op::SetItem { dict: self }.exec(key, value)
    }

    fn delete(&mut self, key: &Obj) -> Result<()> {
        op::DelItem { dict: self }.exec(key)
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
}

impl SlotTable for Dict32 {
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
