//! Shared runtime state.

use std::path::PathBuf;
use std::sync::Mutex;

/// State shared between the menu, the hotkey listener and the capture
/// worker. The only mutable piece is the output folder.
#[derive(Debug)]
pub struct AppState {
    output_folder: Mutex<PathBuf>,
}

impl AppState {
    pub fn new(output_folder: PathBuf) -> Self {
        Self {
            output_folder: Mutex::new(output_folder),
        }
    }

    pub fn output_folder(&self) -> PathBuf {
        self.lock().clone()
    }

    pub fn set_output_folder(&self, folder: PathBuf) {
        *self.lock() = folder;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PathBuf> {
        // A poisoned lock only means another thread panicked mid-update;
        // the PathBuf inside is still valid.
        self.output_folder
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn folder_updates_are_visible() {
        let state = AppState::new(PathBuf::from("/tmp/before"));
        assert_eq!(state.output_folder(), Path::new("/tmp/before"));

        state.set_output_folder(PathBuf::from("/tmp/after"));
        assert_eq!(state.output_folder(), Path::new("/tmp/after"));
    }
}
