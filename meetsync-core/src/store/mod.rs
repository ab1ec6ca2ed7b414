//! Event persistence.
//!
//! All events live in a single slot as one JSON array. Every operation is a
//! whole-collection read-modify-write, so two writers racing on the same
//! slot lose updates (last write wins).

mod slot;

pub use slot::{FileSlotStore, MemorySlotStore, SlotStore};

use tracing::{debug, error, warn};

use crate::error::MeetSyncResult;
use crate::event::{Event, NewTimeOption};

/// Slot holding the serialized event collection.
pub const EVENTS_SLOT: &str = "meetSync_events";

pub struct EventStore<S> {
    slots: S,
}

impl<S: SlotStore> EventStore<S> {
    pub fn new(slots: S) -> Self {
        EventStore { slots }
    }

    /// Load every stored event.
    ///
    /// A missing slot is an empty collection. So is an unreadable or corrupt
    /// one; that case is logged rather than returned.
    pub fn all_events(&self) -> Vec<Event> {
        self.load_events().unwrap_or_else(|e| {
            warn!(slot = EVENTS_SLOT, "Couldn't load events: {}", e);
            Vec::new()
        })
    }

    pub fn event_by_id(&self, id: &str) -> Option<Event> {
        self.all_events().into_iter().find(|event| event.id == id)
    }

    /// Insert the event, or replace the stored event with the same id.
    ///
    /// Fails without writing if the stored collection can't be read.
    pub fn save_event(&self, event: &Event) -> MeetSyncResult<()> {
        let mut events = self
            .load_events()
            .inspect_err(|e| error!(event_id = %event.id, "Couldn't load events to save: {}", e))?;

        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event.clone(),
            None => events.push(event.clone()),
        }

        self.write_all(&events)
            .inspect_err(|e| error!(event_id = %event.id, "Couldn't save event: {}", e))
    }

    /// Remove an event. Returns false, leaving storage untouched, if no
    /// event has that id.
    pub fn delete_event(&self, id: &str) -> MeetSyncResult<bool> {
        let mut events = self
            .load_events()
            .inspect_err(|e| error!(event_id = id, "Couldn't load events to delete: {}", e))?;
        let before = events.len();
        events.retain(|event| event.id != id);

        if events.len() == before {
            debug!(event_id = id, "No event to delete");
            return Ok(false);
        }

        self.write_all(&events)
            .inspect_err(|e| error!(event_id = id, "Couldn't delete event: {}", e))?;
        Ok(true)
    }

    /// Build a new event and store it.
    pub fn create_event(
        &self,
        title: &str,
        description: Option<String>,
        location: Option<String>,
        created_by: &str,
        time_options: Vec<NewTimeOption>,
    ) -> MeetSyncResult<Event> {
        let event = Event::create(title, description, location, created_by, time_options)?;
        self.save_event(&event)?;
        Ok(event)
    }

    /// Record a response on a stored event.
    ///
    /// Returns `None` if there is no event with that id.
    pub fn add_attendee(
        &self,
        event_id: &str,
        name: &str,
        selected_time_ids: &[String],
        comment: Option<String>,
    ) -> MeetSyncResult<Option<Event>> {
        let Some(event) = self.event_by_id(event_id) else {
            return Ok(None);
        };

        let updated = event.add_attendee(name, selected_time_ids, comment)?;
        self.save_event(&updated)?;
        Ok(Some(updated))
    }

    /// Read the collection for a read-modify-write.
    ///
    /// Read failures are returned. Content that isn't a valid event list is
    /// logged and treated as empty, so the next write replaces it.
    fn load_events(&self) -> MeetSyncResult<Vec<Event>> {
        let Some(content) = self.slots.read(EVENTS_SLOT)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&content) {
            Ok(events) => Ok(events),
            Err(e) => {
                warn!(slot = EVENTS_SLOT, "Couldn't parse stored events: {}", e);
                Ok(Vec::new())
            }
        }
    }

    fn write_all(&self, events: &[Event]) -> MeetSyncResult<()> {
        let content = serde_json::to_string(events)?;
        self.slots.write(EVENTS_SLOT, &content)?;
        debug!(count = events.len(), "Stored events");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeetSyncError;
    use chrono::{NaiveDate, NaiveTime};

    fn options() -> Vec<NewTimeOption> {
        let mon = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        let tue = NaiveDate::from_ymd_opt(2025, 3, 18).unwrap();
        vec![
            NewTimeOption::on(
                mon,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            ),
            NewTimeOption::on(
                tue,
                NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            ),
        ]
    }

    fn team_sync() -> Event {
        Event::create("Team Sync", None, Some("Room 4".into()), "Dana", options()).unwrap()
    }

    /// Reads work, every write fails.
    struct ReadOnlySlots(MemorySlotStore);

    impl SlotStore for ReadOnlySlots {
        fn read(&self, slot: &str) -> MeetSyncResult<Option<String>> {
            self.0.read(slot)
        }

        fn write(&self, _slot: &str, _value: &str) -> MeetSyncResult<()> {
            Err(MeetSyncError::Storage("quota exceeded".into()))
        }
    }

    /// Every read fails; writes go through and are counted.
    #[derive(Default)]
    struct UnreadableSlots {
        writes: std::cell::Cell<usize>,
    }

    impl SlotStore for UnreadableSlots {
        fn read(&self, _slot: &str) -> MeetSyncResult<Option<String>> {
            Err(MeetSyncError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )))
        }

        fn write(&self, _slot: &str, _value: &str) -> MeetSyncResult<()> {
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_empty_store_has_no_events() {
        let store = EventStore::new(MemorySlotStore::new());
        assert!(store.all_events().is_empty());
        assert!(store.event_by_id("anything").is_none());
    }

    #[test]
    fn test_save_then_get_roundtrip() {
        let slots = MemorySlotStore::new();
        let store = EventStore::new(&slots);
        let event = team_sync();

        store.save_event(&event).unwrap();

        let loaded = store.event_by_id(&event.id).expect("event should be stored");
        assert_eq!(loaded, event);
    }

    #[test]
    fn test_save_then_get_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let event = team_sync();
        let mon = event.time_options[0].id.clone();
        let event = event
            .add_attendee("Alice", &[mon], Some("Either works".into()))
            .unwrap();

        EventStore::new(FileSlotStore::new(dir.path()))
            .save_event(&event)
            .unwrap();

        let reopened = EventStore::new(FileSlotStore::new(dir.path()));
        assert_eq!(reopened.event_by_id(&event.id), Some(event));
    }

    #[test]
    fn test_save_replaces_event_with_same_id() {
        let store = EventStore::new(MemorySlotStore::new());
        let first = team_sync();
        let second = team_sync();
        store.save_event(&first).unwrap();
        store.save_event(&second).unwrap();

        let tue = first.time_options[1].id.clone();
        let updated = first.add_attendee("Bob", &[tue], None).unwrap();
        store.save_event(&updated).unwrap();

        let all = store.all_events();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], updated);
        assert_eq!(all[1], second);
    }

    #[test]
    fn test_corrupt_blob_loads_as_empty() {
        let slots = MemorySlotStore::new();
        slots.write(EVENTS_SLOT, "{not json").unwrap();
        let store = EventStore::new(&slots);

        assert!(store.all_events().is_empty());
        assert!(store.event_by_id("x").is_none());
    }

    #[test]
    fn test_failed_write_is_reported() {
        let store = EventStore::new(ReadOnlySlots(MemorySlotStore::new()));
        let err = store.save_event(&team_sync()).unwrap_err();
        assert!(matches!(err, MeetSyncError::Storage(_)));
        assert!(store.all_events().is_empty());
    }

    #[test]
    fn test_failed_read_aborts_save_without_writing() {
        let slots = UnreadableSlots::default();
        let store = EventStore::new(&slots);

        let err = store.save_event(&team_sync()).unwrap_err();
        assert!(matches!(err, MeetSyncError::Io(_)));
        assert!(store.delete_event("any").is_err());
        assert_eq!(slots.writes.get(), 0);
        assert!(store.all_events().is_empty());
    }

    #[test]
    fn test_undecodable_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlotStore::new(dir.path());
        let store = EventStore::new(&slots);
        let kept = team_sync();
        store.save_event(&kept).unwrap();

        let path = slots.path_for(EVENTS_SLOT);
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.push(0xFF);
        std::fs::write(&path, &bytes).unwrap();

        assert!(store.save_event(&team_sync()).is_err());
        assert!(store.delete_event(&kept.id).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_delete_removes_only_matching_event() {
        let store = EventStore::new(MemorySlotStore::new());
        let keep = team_sync();
        let gone = team_sync();
        store.save_event(&keep).unwrap();
        store.save_event(&gone).unwrap();

        assert!(store.delete_event(&gone.id).unwrap());
        assert_eq!(store.all_events(), vec![keep]);
    }

    #[test]
    fn test_delete_missing_event_leaves_store_untouched() {
        let slots = MemorySlotStore::new();
        let store = EventStore::new(&slots);
        store.save_event(&team_sync()).unwrap();
        let before = slots.read(EVENTS_SLOT).unwrap();

        assert!(!store.delete_event("no-such-id").unwrap());
        assert_eq!(slots.read(EVENTS_SLOT).unwrap(), before);
    }

    #[test]
    fn test_delete_missing_event_does_not_write() {
        let store = EventStore::new(ReadOnlySlots(MemorySlotStore::new()));
        assert!(!store.delete_event("no-such-id").unwrap());
    }

    #[test]
    fn test_create_event_persists() {
        let store = EventStore::new(MemorySlotStore::new());
        let event = store
            .create_event("Team Sync", None, None, "Dana", options())
            .unwrap();
        assert_eq!(store.event_by_id(&event.id), Some(event));
    }

    #[test]
    fn test_create_event_rejects_invalid_input_without_storing() {
        let slots = MemorySlotStore::new();
        let store = EventStore::new(&slots);
        let err = store
            .create_event("", None, None, "Dana", options())
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(slots.read(EVENTS_SLOT).unwrap(), None);
    }

    #[test]
    fn test_add_attendee_updates_stored_event() {
        let store = EventStore::new(MemorySlotStore::new());
        let event = store
            .create_event("Team Sync", None, None, "Dana", options())
            .unwrap();
        let mon = event.time_options[0].id.clone();

        let updated = store
            .add_attendee(&event.id, "Alice", &[mon.clone()], None)
            .unwrap()
            .expect("event exists");

        assert_eq!(updated.attendees.len(), 1);
        let stored = store.event_by_id(&event.id).unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.best_time_options()[0].id, mon);
    }

    #[test]
    fn test_add_attendee_to_missing_event() {
        let store = EventStore::new(MemorySlotStore::new());
        let result = store
            .add_attendee("missing", "Alice", &["x".to_string()], None)
            .unwrap();
        assert!(result.is_none());
    }
}
