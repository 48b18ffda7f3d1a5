use super::*;

/// Above this many live entries the table only doubles instead of quadrupling.
const LARGE_DICT: usize = 50000;

pub struct Resize<'a> {
    pub dict: &'a mut Dict32,
}

impl Resize<'_> {
    pub fn exec(self) {
        let dict = self.dict;
        let quot = if dict.used > LARGE_DICT { 2 } else { 4 };
        let new_size = find_optimal_size(dict.used * quot);

        log::trace!("dict32 resize {} -> {}", dict.slots.len(), new_size);

        let old_slots = std::mem::replace(&mut dict.slots, empty_slots(new_size));
        dict.fill = dict.used;

        for slot in old_slots {
            let Slot {
                hash_code: Cell::Occupied(hash_code),
                key: Cell::Occupied(key),
                value,
            } = slot
            else {
                continue;
            };

            let mut probe = Probe::new(hash_code, new_size);
            while !dict.slots[probe.idx].key.is_empty() {
                probe.advance();
            }
            dict.slots[probe.idx] = Slot {
                hash_code: Cell::Occupied(hash_code),
                key: Cell::Occupied(key),
                value,
            };
        }
    }
}
