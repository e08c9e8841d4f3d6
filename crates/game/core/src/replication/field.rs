/// A value paired with a dirty flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Replicated<T> {
    value: T,
    dirty: bool,
}

impl<T: PartialEq> Replicated<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value,
            dirty: false,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Stores `value`, marking the field dirty only if it changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.dirty = true;
        true
    }

    /// Stores `value` without touching the dirty flag.
    pub fn overwrite(&mut self, value: T) {
        self.value = value;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
