//! Application glue: shared state, the capture worker and the menu bar
//! shell.

pub mod dialog;
pub mod state;
pub mod worker;

#[cfg(target_os = "macos")]
mod shell;

#[cfg(target_os = "macos")]
pub use shell::run;
