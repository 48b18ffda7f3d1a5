use super::*;

pub struct SetItem<'a> {
    pub dict: &'a mut Dict32,
}

impl SetItem<'_> {
    pub fn exec(self, key: Obj, value: Obj) {
        let dict = self.dict;
        let hash_code = key.py_hash();
        let mut probe = Probe::new(hash_code, dict.slots.len());

        // The first tombstone on the path is reused unless the key turns up later.
        let mut target_idx = None;
        while !dict.slots[probe.idx].key.is_empty() {
            let slot = &dict.slots[probe.idx];
            if slot.holds(hash_code, &key) {
                target_idx = Some(probe.idx);
                break;
            }
            if target_idx.is_none() && slot.key == Cell::Dummy {
                target_idx = Some(probe.idx);
            }
            probe.advance();
        }
        let target_idx = target_idx.unwrap_or(probe.idx);

        match dict.slots[target_idx].key {
            Cell::Empty => {
                dict.used += 1;
                dict.fill += 1;
            }
            Cell::Dummy => dict.used += 1,
            Cell::Occupied(_) => {}
        }
        dict.slots[target_idx] = Slot::live(hash_code, key, value);

        if dict.fill * 3 >= dict.slots.len() * 2 {
            op::Resize { dict }.exec();
        }
    }
}
