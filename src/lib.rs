//! teamdeck library crate.
//!
//! This library provides the core of a team-switching sidebar for multi-team
//! chat workspaces, including:
//! - Ordered team list controller (drag reorder, keyboard switching)
//! - Keyboard shortcut dispatch and the "show order" overlay state
//! - Per-user selection memory over a flat key-value store
//! - Team rail widget

pub mod controller;
pub mod keyboard;
pub mod prefs;
pub mod team;
pub mod ui;
