//! Core types for meetsync.
//!
//! This crate holds everything the presentation layer calls into:
//! - `event` for the poll data model and the best-time tally
//! - `store` for the slot-backed event collection
//! - `identity` for the per-client user record
//! - `config` for the global configuration file

pub mod config;
pub mod error;
pub mod event;
pub mod id;
pub mod identity;
pub mod store;

pub use error::{MeetSyncError, MeetSyncResult};
pub use event::{Attendee, Event, NewTimeOption, TimeOption};
