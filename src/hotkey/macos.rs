//! Global keyboard listening through a Quartz event tap.
//!
//! The tap is listen-only and runs on its own thread with its own run loop.
//! Modifier state arrives as `FlagsChanged` events rather than key
//! transitions, so the raw flag deltas are translated into synthetic
//! press/release events before they reach the [`ChordTracker`].

use super::chord::{ChordTracker, Key, KeyEvent};
use crate::capture::CaptureMode;
use crate::notify::NotifySink;
use core_foundation::runloop::{CFRunLoop, kCFRunLoopCommonModes};
use core_graphics::event::{
    CGEventFlags, CGEventTap, CGEventTapLocation, CGEventTapOptions, CGEventTapPlacement,
    CGEventType, EventField,
};
use log::{error, warn};
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

const KEYCODE_ANSI_3: i64 = 20;
const KEYCODE_ANSI_4: i64 = 21;

fn key_for_keycode(keycode: i64) -> Key {
    match keycode {
        KEYCODE_ANSI_3 => Key::Char('3'),
        KEYCODE_ANSI_4 => Key::Char('4'),
        _ => Key::Other,
    }
}

/// Synthetic press/release events for the modifier bits that changed
/// between two flag snapshots.
fn flag_transitions(before: CGEventFlags, after: CGEventFlags) -> Vec<KeyEvent> {
    let mut events = Vec::new();
    for (flag, key) in [
        (CGEventFlags::CGEventFlagCommand, Key::Command),
        (CGEventFlags::CGEventFlagShift, Key::Shift),
    ] {
        let was_held = before.contains(flag);
        let is_held = after.contains(flag);
        if !was_held && is_held {
            events.push(KeyEvent::Pressed(key));
        } else if was_held && !is_held {
            events.push(KeyEvent::Released(key));
        }
    }
    events
}

/// Start the global shortcut listener on a dedicated thread.
///
/// Chord completions are sent over `requests`. Creating the tap fails when
/// the app lacks the Accessibility permission, in which case the user is
/// told how to fix it and the app keeps running with menu-only capture.
pub fn spawn_listener(
    requests: Sender<CaptureMode>,
    notifier: Arc<dyn NotifySink>,
) -> std::io::Result<()> {
    thread::Builder::new()
        .name("hotkey-listener".to_string())
        .spawn(move || {
            if run_event_tap(requests).is_err() {
                error!("Could not create keyboard event tap");
                notifier.notify(
                    "Error",
                    "Keyboard shortcuts are unavailable. Grant Accessibility access in \
                     System Settings > Privacy & Security, then relaunch.",
                );
            }
        })?;
    Ok(())
}

fn run_event_tap(requests: Sender<CaptureMode>) -> Result<(), ()> {
    // The tap callback is Fn, so interior mutability carries the state.
    let tracker = RefCell::new(ChordTracker::new());
    let last_flags = Cell::new(CGEventFlags::CGEventFlagNull);

    let handle_event = |event: KeyEvent| {
        if let Some(mode) = tracker.borrow_mut().on_event(event)
            && requests.send(mode).is_err()
        {
            warn!("Capture worker is gone, dropping {} request", mode.label());
        }
    };

    let tap = CGEventTap::new(
        CGEventTapLocation::HID,
        CGEventTapPlacement::HeadInsertEventTap,
        CGEventTapOptions::ListenOnly,
        vec![CGEventType::KeyDown, CGEventType::FlagsChanged],
        |_proxy, event_type, event| {
            match event_type {
                CGEventType::KeyDown => {
                    let keycode =
                        event.get_integer_value_field(EventField::KEYBOARD_EVENT_KEYCODE);
                    handle_event(KeyEvent::Pressed(key_for_keycode(keycode)));
                }
                CGEventType::FlagsChanged => {
                    let flags = event.get_flags();
                    for transition in flag_transitions(last_flags.get(), flags) {
                        handle_event(transition);
                    }
                    last_flags.set(flags);
                }
                _ => {}
            }
            None
        },
    )?;

    let source = tap.mach_port.create_runloop_source(0)?;
    let current = CFRunLoop::get_current();
    unsafe {
        current.add_source(&source, kCFRunLoopCommonModes);
    }
    tap.enable();
    CFRunLoop::run_current();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keycodes_map_to_capture_digits() {
        assert_eq!(key_for_keycode(KEYCODE_ANSI_3), Key::Char('3'));
        assert_eq!(key_for_keycode(KEYCODE_ANSI_4), Key::Char('4'));
        assert_eq!(key_for_keycode(0), Key::Other);
    }

    #[test]
    fn flag_transitions_emit_presses_and_releases() {
        let none = CGEventFlags::CGEventFlagNull;
        let cmd = CGEventFlags::CGEventFlagCommand;
        let cmd_shift = cmd | CGEventFlags::CGEventFlagShift;

        assert_eq!(flag_transitions(none, cmd), vec![KeyEvent::Pressed(Key::Command)]);
        assert_eq!(
            flag_transitions(cmd, cmd_shift),
            vec![KeyEvent::Pressed(Key::Shift)]
        );
        assert_eq!(
            flag_transitions(cmd_shift, none),
            vec![
                KeyEvent::Released(Key::Command),
                KeyEvent::Released(Key::Shift)
            ]
        );
        assert!(flag_transitions(cmd, cmd).is_empty());
    }
}
