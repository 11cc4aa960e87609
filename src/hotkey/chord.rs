//! Modifier chord tracking.
//!
//! The tracker is a pure state machine over key transitions, so the chord
//! logic can be tested without a real event tap. Key repeat deliberately
//! fires the chord again on every press, matching how the system shortcuts
//! behave when the key is held.

use crate::capture::CaptureMode;

/// Keys the tracker cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Command,
    Shift,
    /// A character key, lowercased.
    Char(char),
    /// Anything else; tracked only so releases reset nothing by accident.
    Other,
}

/// A single key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Tracks held modifiers and recognizes the capture chords,
/// Cmd+Shift+3 for full screen and Cmd+Shift+4 for region.
#[derive(Debug, Default)]
pub struct ChordTracker {
    cmd_held: bool,
    shift_held: bool,
}

impl ChordTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transition, returning the capture mode if a chord completed.
    pub fn on_event(&mut self, event: KeyEvent) -> Option<CaptureMode> {
        match event {
            KeyEvent::Pressed(Key::Command) => {
                self.cmd_held = true;
                None
            }
            KeyEvent::Pressed(Key::Shift) => {
                self.shift_held = true;
                None
            }
            KeyEvent::Pressed(Key::Char(ch)) if self.cmd_held && self.shift_held => match ch {
                '3' => Some(CaptureMode::FullScreen),
                '4' => Some(CaptureMode::Region),
                _ => None,
            },
            KeyEvent::Pressed(_) => None,
            KeyEvent::Released(Key::Command) => {
                self.cmd_held = false;
                None
            }
            KeyEvent::Released(Key::Shift) => {
                self.shift_held = false;
                None
            }
            KeyEvent::Released(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(tracker: &mut ChordTracker, key: Key) -> Option<CaptureMode> {
        tracker.on_event(KeyEvent::Pressed(key))
    }

    fn release(tracker: &mut ChordTracker, key: Key) -> Option<CaptureMode> {
        tracker.on_event(KeyEvent::Released(key))
    }

    #[test]
    fn cmd_shift_3_triggers_full_screen() {
        let mut tracker = ChordTracker::new();
        assert_eq!(press(&mut tracker, Key::Command), None);
        assert_eq!(press(&mut tracker, Key::Shift), None);
        assert_eq!(
            press(&mut tracker, Key::Char('3')),
            Some(CaptureMode::FullScreen)
        );
    }

    #[test]
    fn cmd_shift_4_triggers_region() {
        let mut tracker = ChordTracker::new();
        press(&mut tracker, Key::Shift);
        press(&mut tracker, Key::Command);
        assert_eq!(
            press(&mut tracker, Key::Char('4')),
            Some(CaptureMode::Region)
        );
    }

    #[test]
    fn releasing_a_modifier_disarms_the_chord() {
        let mut tracker = ChordTracker::new();
        press(&mut tracker, Key::Command);
        press(&mut tracker, Key::Shift);
        release(&mut tracker, Key::Shift);
        assert_eq!(press(&mut tracker, Key::Char('3')), None);
    }

    #[test]
    fn key_repeat_fires_the_chord_again() {
        let mut tracker = ChordTracker::new();
        press(&mut tracker, Key::Command);
        press(&mut tracker, Key::Shift);
        for _ in 0..3 {
            assert_eq!(
                press(&mut tracker, Key::Char('3')),
                Some(CaptureMode::FullScreen)
            );
        }
    }

    #[test]
    fn bare_number_keys_do_nothing() {
        let mut tracker = ChordTracker::new();
        assert_eq!(press(&mut tracker, Key::Char('3')), None);
        assert_eq!(press(&mut tracker, Key::Char('4')), None);
    }

    #[test]
    fn other_characters_never_trigger() {
        let mut tracker = ChordTracker::new();
        press(&mut tracker, Key::Command);
        press(&mut tracker, Key::Shift);
        assert_eq!(press(&mut tracker, Key::Char('5')), None);
        assert_eq!(press(&mut tracker, Key::Other), None);
    }
}
