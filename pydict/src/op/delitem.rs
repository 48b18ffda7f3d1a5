use super::*;

pub struct DelItem<'a> {
    pub dict: &'a mut Dict32,
}

impl DelItem<'_> {
    /// The hash stays behind in the tombstone.
    pub fn exec(self, key: &Obj) -> Result<()> {
        let idx = op::Lookdict { dict: self.dict }.exec(key)?;

        self.dict.used -= 1;
        let slot = &mut self.dict.slots[idx];
        slot.key = Cell::Dummy;
        slot.value = Cell::Empty;

        Ok(())
    }
}
