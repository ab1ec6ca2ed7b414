//! Per-client user identity.
//!
//! Holds the opaque user id, the display name, and the ids of events this
//! client created or answered. Event ids are weak references: deleting an
//! event does not remove it from this list.

use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::error::MeetSyncResult;
use crate::id::new_id;
use crate::store::SlotStore;

pub const USER_ID_SLOT: &str = "userId";
pub const USER_NAME_SLOT: &str = "userName";
pub const USER_EVENTS_SLOT: &str = "userEvents";

pub struct UserIdentity<S: SlotStore> {
    slots: S,
    user_id: String,
    user_name: String,
    user_events: Vec<String>,
}

impl<S: SlotStore> UserIdentity<S> {
    /// Load the stored identity, generating and persisting a new user id
    /// the first time.
    ///
    /// Fails if a slot can't be read, so stored values are never replaced
    /// because of a read error. Slots holding undecodable content load as
    /// absent.
    pub fn load_or_create(slots: S) -> MeetSyncResult<Self> {
        let stored_id = read_slot::<String>(&slots, USER_ID_SLOT)?.filter(|id| !id.is_empty());
        let user_id = match stored_id {
            Some(id) => id,
            None => {
                let id = new_id();
                slots.write(USER_ID_SLOT, &serde_json::to_string(&id)?)?;
                debug!(user_id = %id, "Created new user identity");
                id
            }
        };

        let user_name = read_slot(&slots, USER_NAME_SLOT)?.unwrap_or_default();
        let user_events = read_slot(&slots, USER_EVENTS_SLOT)?.unwrap_or_default();

        Ok(UserIdentity {
            slots,
            user_id,
            user_name,
            user_events,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The remembered display name, if one was ever set.
    pub fn user_name(&self) -> Option<&str> {
        Some(self.user_name.as_str()).filter(|name| !name.is_empty())
    }

    /// Change the display name. A blank name clears it for this session
    /// but leaves the stored name alone.
    pub fn set_user_name(&mut self, name: &str) -> MeetSyncResult<()> {
        self.user_name = name.trim().to_string();
        if self.user_name.is_empty() {
            return Ok(());
        }
        self.slots
            .write(USER_NAME_SLOT, &serde_json::to_string(&self.user_name)?)
    }

    pub fn user_events(&self) -> &[String] {
        &self.user_events
    }

    pub fn is_user_event(&self, event_id: &str) -> bool {
        self.user_events.iter().any(|id| id == event_id)
    }

    /// Track an event id. Returns false if it was already tracked.
    pub fn add_user_event(&mut self, event_id: &str) -> MeetSyncResult<bool> {
        if self.is_user_event(event_id) {
            return Ok(false);
        }
        self.user_events.push(event_id.to_string());
        self.slots
            .write(USER_EVENTS_SLOT, &serde_json::to_string(&self.user_events)?)?;
        Ok(true)
    }
}

/// Read and decode a slot. Read failures are returned; content that
/// doesn't decode is treated as absent.
fn read_slot<T: DeserializeOwned>(slots: &impl SlotStore, slot: &str) -> MeetSyncResult<Option<T>> {
    let Some(content) = slots
        .read(slot)
        .inspect_err(|e| error!(slot, "Couldn't read slot: {}", e))?
    else {
        return Ok(None);
    };

    Ok(serde_json::from_str(&content)
        .inspect_err(|e| warn!(slot, "Ignoring unreadable slot: {}", e))
        .ok())
}
