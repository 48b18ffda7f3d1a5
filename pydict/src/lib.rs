//! Open-addressing dicts modelled on CPython 3.2 `dictobject.c`, together
//! with the dumper that exposes their slot layout to `dictstress`.

use dictstress::{Cell, FastContains, Model, NotFound, Snapshot};
use std::collections::HashSet;

type Result<T> = std::result::Result<T, NotFound>;

mod obj;
pub use obj::Obj;

mod op;

mod dict32;
pub use dict32::Dict32;

mod almost;
pub use almost::AlmostPythonDict;

pub const MIN_SIZE: usize = 8;
pub const PERTURB_SHIFT: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub hash_code: Cell<i64>,
    pub key: Cell<Obj>,
    pub value: Cell<Obj>,
}

impl Slot {
    fn empty() -> Self {
        Self {
            hash_code: Cell::Empty,
            key: Cell::Empty,
            value: Cell::Empty,
        }
    }

    fn live(hash_code: i64, key: Obj, value: Obj) -> Self {
        Self {
            hash_code: Cell::Occupied(hash_code),
            key: Cell::Occupied(key),
            value: Cell::Occupied(value),
        }
    }

    fn holds(&self, hash_code: i64, key: &Obj) -> bool {
        self.hash_code == Cell::Occupied(hash_code) && self.key.as_occupied() == Some(key)
    }
}

fn empty_slots(n: usize) -> Vec<Slot> {
    vec![Slot::empty(); n]
}

/// The perturbed probe sequence shared by every table here.
struct Probe {
    idx: usize,
    perturb: u64,
    len: usize,
}

impl Probe {
    fn new(hash_code: i64, len: usize) -> Self {
        Self {
            idx: hash_code.rem_euclid(len as i64) as usize,
            perturb: hash_code as u64,
            len,
        }
    }

    fn advance(&mut self) {
        // 5 * idx + perturb + 1 overflows u64 for large perturb values.
        let next = (self.idx as u128 * 5 + self.perturb as u128 + 1) % self.len as u128;
        self.idx = next as usize;
        self.perturb >>= PERTURB_SHIFT;
    }
}

/// Smallest power of two above `minused`, never below [`MIN_SIZE`].
fn find_optimal_size(minused: usize) -> usize {
    let mut new_size = MIN_SIZE;
    while new_size <= minused {
        new_size <<= 1;
    }
    new_size
}

/// Read access to a table's physical layout.
pub trait SlotTable {
    fn slots(&self) -> &[Slot];
    fn fill(&self) -> usize;
    fn used(&self) -> usize;
}

/// A dict that can be driven by the harness and dumped.
pub trait PyDictModel: Model<Obj, Obj> + SlotTable {}

impl<T: Model<Obj, Obj> + SlotTable> PyDictModel for T {}

/// Dump the slot layout of any table in this crate.
pub fn dump<T: SlotTable + ?Sized>(table: &T) -> Snapshot<Obj, Obj> {
    let slots = table.slots();
    Snapshot {
        hashes: slots.iter().map(|s| s.hash_code.clone()).collect(),
        keys: slots.iter().map(|s| s.key.clone()).collect(),
        values: slots.iter().map(|s| s.value.clone()).collect(),
        fill: table.fill(),
        used: table.used(),
    }
}
