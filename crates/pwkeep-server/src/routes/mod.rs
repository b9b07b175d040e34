//! HTTP route modules for the `pwkeep` backend.

pub mod health;
pub mod passwords;
