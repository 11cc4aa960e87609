//! Shutterbar core library.
//!
//! The capture pipeline, preference store, notification sink and chord
//! tracker are platform-neutral and exported here; the menu bar shell and
//! the Quartz event tap live in the binary and only build on macOS.

pub mod capture;
pub mod config;
pub mod hotkey;
pub mod notify;

pub use config::{ConfigStore, Preferences};
