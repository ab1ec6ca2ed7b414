//! Identifier generation for events, time options, attendees and users.

use uuid::Uuid;

/// Length of generated ids (the nanoid default).
const ID_LEN: usize = 21;

/// Generate a short, URL-safe random identifier.
pub fn new_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_is_url_safe() {
        let id = new_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_new_id_does_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
