use std::fmt;

/// One cell of a physical slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell<T> {
    Empty,
    /// Tombstone left behind by a deletion.
    Dummy,
    Occupied(T),
}

impl<T> Cell<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_occupied(&self) -> Option<&T> {
        match self {
            Cell::Occupied(x) => Some(x),
            _ => None,
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "EMPTY"),
            Cell::Dummy => write!(f, "DUMMY"),
            Cell::Occupied(x) => write!(f, "{x:?}"),
        }
    }
}

/// Physical layout of a table: per-slot hash, key and value plus the
/// fill/used counters. `hashes`, `keys` and `values` always have the same
/// length, which is the table capacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot<K, V> {
    pub hashes: Vec<Cell<i64>>,
    pub keys: Vec<Cell<K>>,
    pub values: Vec<Cell<V>>,
    pub fill: usize,
    pub used: usize,
}

impl<K, V> Snapshot<K, V> {
    pub fn capacity(&self) -> usize {
        self.hashes.len()
    }

    /// Number of slots present in all three sequences. Equals
    /// [`capacity`](Self::capacity) for a well-formed dump.
    pub fn slot_count(&self) -> usize {
        self.hashes.len().min(self.keys.len()).min(self.values.len())
    }

    /// True if any of the three cells at `idx` holds something.
    pub fn is_slot_taken(&self, idx: usize) -> bool {
        !(self.hashes[idx].is_empty() && self.keys[idx].is_empty() && self.values[idx].is_empty())
    }
}
