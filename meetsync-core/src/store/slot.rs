//! Named-slot storage primitive.
//!
//! A slot holds one serialized value and is replaced as a whole on every
//! write. Event and identity storage are layered on top of this.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::MeetSyncResult;

/// A key-value store of whole-value slots.
pub trait SlotStore {
    /// Read a slot, `None` if it has never been written.
    fn read(&self, slot: &str) -> MeetSyncResult<Option<String>>;

    /// Replace the content of a slot in one write.
    fn write(&self, slot: &str, value: &str) -> MeetSyncResult<()>;
}

impl<T: SlotStore + ?Sized> SlotStore for &T {
    fn read(&self, slot: &str) -> MeetSyncResult<Option<String>> {
        (**self).read(slot)
    }

    fn write(&self, slot: &str, value: &str) -> MeetSyncResult<()> {
        (**self).write(slot, value)
    }
}

/// Slots stored as `<dir>/<slot>.json` files.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlotStore { dir: dir.into() }
    }

    pub fn path_for(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl SlotStore for FileSlotStore {
    fn read(&self, slot: &str) -> MeetSyncResult<Option<String>> {
        let path = self.path_for(slot);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn write(&self, slot: &str, value: &str) -> MeetSyncResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(slot);
        let temp = self.dir.join(format!("{}.json.tmp", slot));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-process slots. Nothing survives the value being dropped.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        MemorySlotStore::default()
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, slot: &str) -> MeetSyncResult<Option<String>> {
        Ok(self.slots.borrow().get(slot).cloned())
    }

    fn write(&self, slot: &str, value: &str) -> MeetSyncResult<()> {
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_slot_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path().join("data"));

        assert_eq!(store.read("userId").unwrap(), None);

        store.write("userId", "\"abc\"").unwrap();
        assert_eq!(store.read("userId").unwrap().as_deref(), Some("\"abc\""));
        assert!(store.path_for("userId").exists());
        assert!(!dir.path().join("data/userId.json.tmp").exists());

        store.write("userId", "\"def\"").unwrap();
        assert_eq!(store.read("userId").unwrap().as_deref(), Some("\"def\""));
    }

    #[test]
    fn test_memory_slots_shared_through_reference() {
        let store = MemorySlotStore::new();
        let borrowed = &store;
        borrowed.write("userName", "\"Alice\"").unwrap();
        assert_eq!(store.read("userName").unwrap().as_deref(), Some("\"Alice\""));
    }
}
