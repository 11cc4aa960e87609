//! Global capture shortcuts.
//!
//! The chord logic lives in [`chord`] as a platform-neutral state machine;
//! the event tap that feeds it is macOS only.

pub mod chord;

#[cfg(target_os = "macos")]
mod macos;

pub use chord::{ChordTracker, Key, KeyEvent};

#[cfg(target_os = "macos")]
pub use macos::spawn_listener;
