use super::*;

use std::fmt;

/// Side-by-side slot contents at one physical index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDiff {
    pub idx: usize,
    pub candidate: String,
    pub reference: String,
}

/// Diagnostic produced when two snapshots differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub reference_capacity: usize,
    pub candidate_capacity: usize,
    pub reference_fill_used: (usize, usize),
    pub candidate_fill_used: (usize, usize),
    /// Only filled in when both capacities agree.
    pub slots: Vec<SlotDiff>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "reference capacity: {}", self.reference_capacity)?;
        writeln!(f, "candidate capacity: {}", self.candidate_capacity)?;
        writeln!(
            f,
            "reference fill/used: {} {}",
            self.reference_fill_used.0, self.reference_fill_used.1
        )?;
        write!(
            f,
            "candidate fill/used: {} {}",
            self.candidate_fill_used.0, self.candidate_fill_used.1
        )?;
        if self.reference_capacity == self.candidate_capacity {
            write!(f, "\nidx | candidate | reference")?;
            for d in &self.slots {
                write!(f, "\n{}    {}    {}", d.idx, d.candidate, d.reference)?;
            }
        }
        Ok(())
    }
}

fn describe_slot<K: Debug, V: Debug>(snapshot: &Snapshot<K, V>, idx: usize) -> String {
    format!(
        "{} {} {}",
        snapshot.hashes[idx], snapshot.keys[idx], snapshot.values[idx]
    )
}

fn lengths<K, V>(snapshot: &Snapshot<K, V>) -> (usize, usize, usize) {
    (
        snapshot.hashes.len(),
        snapshot.keys.len(),
        snapshot.values.len(),
    )
}

/// Compare two snapshots. Any difference is returned as
/// [`Error::StructuralMismatch`] after the diagnostic has been logged.
pub fn compare<K, V>(reference: &Snapshot<K, V>, candidate: &Snapshot<K, V>) -> Result<()>
where
    K: PartialEq + Debug,
    V: PartialEq + Debug,
{
    if reference == candidate {
        return Ok(());
    }

    let mut slots = vec![];
    if reference.capacity() == candidate.capacity() {
        let width = reference.slot_count().min(candidate.slot_count());
        if width < reference.capacity() {
            log::error!(
                "ragged dump: hashes/keys/values lengths {:?} vs {:?}",
                lengths(reference),
                lengths(candidate)
            );
        }
        for idx in 0..width {
            if reference.is_slot_taken(idx) || candidate.is_slot_taken(idx) {
                slots.push(SlotDiff {
                    idx,
                    candidate: describe_slot(candidate, idx),
                    reference: describe_slot(reference, idx),
                });
            }
        }
    }

    let mismatch = Mismatch {
        reference_capacity: reference.capacity(),
        candidate_capacity: candidate.capacity(),
        reference_fill_used: (reference.fill, reference.used),
        candidate_fill_used: (candidate.fill, candidate.used),
        slots,
    };
    log::error!("snapshots differ\n{mismatch}");

    Err(Error::StructuralMismatch(Box::new(mismatch)))
}

/// Dump both models and compare the snapshots.
pub fn verify_same<K, V, R, C>(
    reference: &R,
    reference_dump: fn(&R) -> Snapshot<K, V>,
    candidate: &C,
    candidate_dump: fn(&C) -> Snapshot<K, V>,
) -> Result<()>
where
    K: PartialEq + Debug,
    V: PartialEq + Debug,
{
    compare(&reference_dump(reference), &candidate_dump(candidate))
}
