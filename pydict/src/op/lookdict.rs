use super::*;

pub struct Lookdict<'a> {
    pub dict: &'a Dict32,
}

impl Lookdict<'_> {
    /// Index of the live slot holding `key`.
    pub fn exec(self, key: &Obj) -> Result<usize> {
        let slots = &self.dict.slots;
        let hash_code = key.py_hash();
        let mut probe = Probe::new(hash_code, slots.len());

        while !slots[probe.idx].key.is_empty() {
            if slots[probe.idx].holds(hash_code, key) {
                return Ok(probe.idx);
            }
            probe.advance();
        }

        Err(NotFound)
    }
}
