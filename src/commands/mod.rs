pub mod config;
pub mod delete;
pub mod identity;
pub mod list;
pub mod new;
pub mod respond;
pub mod show;

/// Name used when neither the identity nor the config has one.
pub const ANONYMOUS: &str = "Anonymous";
