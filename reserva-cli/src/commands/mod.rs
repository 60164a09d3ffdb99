//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `reload`: Clear the store and save the seed names
//! - `list`: List all reservations
//! - `find`: Find reservations by name
//! - `save`: Save names without clearing
//! - `clear`: Delete every reservation
//! - `completions`: Generate shell completion scripts

pub mod clear;
pub mod completions;
pub mod find;
pub mod list;
pub mod reload;
pub mod save;

pub use clear::ClearCommand;
pub use completions::CompletionsCommand;
pub use find::FindCommand;
pub use list::ListCommand;
pub use reload::ReloadCommand;
pub use save::SaveCommand;
