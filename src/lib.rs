//! DLL Updater library
//!
//! Exposes the settings store and the sync operation so they can be driven
//! without the GUI, plus the pieces the desktop app is built from.

pub mod app;
pub mod config;
pub mod constant;
pub mod messages;
pub mod style;
pub mod sync_backend;
pub mod ui;
pub mod worker;
