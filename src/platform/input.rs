//! Keyboard mapping
//!
//! Pure string matching on `KeyboardEvent.code` / `KeyboardEvent.key`, so the
//! rules are testable without a browser.

use crate::sim::LanderInput;
use crate::sim::siege::tick::accept_key;

/// Codes whose browser default (scrolling) is suppressed while the lander has focus
const LANDER_CODES: [&str; 5] = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "Space"];

/// Whether the page should call `preventDefault` for this code
pub fn lander_captures(code: &str) -> bool {
    LANDER_CODES.contains(&code)
}

/// Press state of the lander controls, fed by keydown/keyup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    thrust_up: bool,
    thrust_space: bool,
    left: bool,
    right: bool,
}

impl KeyState {
    /// Apply a keydown (`pressed = true`) or keyup; returns true if the code is bound
    pub fn apply(&mut self, code: &str, pressed: bool) -> bool {
        let slot = match code {
            "ArrowUp" => &mut self.thrust_up,
            "Space" => &mut self.thrust_space,
            "ArrowLeft" => &mut self.left,
            "ArrowRight" => &mut self.right,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Release everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn lander_input(&self) -> LanderInput {
        LanderInput {
            thrust: self.thrust_up || self.thrust_space,
            rotate_left: self.left,
            rotate_right: self.right,
        }
    }
}

/// The character a siege keystroke contributes, lowercased
///
/// `key` is `KeyboardEvent.key`; named keys like "Shift" or "Enter" are longer
/// than one character and ignored.
pub fn siege_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => accept_key(c),
        _ => None,
    }
}

/// Classic up-up-down-down cheat sequence, matched on `KeyboardEvent.key`
pub const KONAMI: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

/// Watches a key stream for a fixed sequence
#[derive(Debug, Clone)]
pub struct SequenceDetector {
    sequence: &'static [&'static str],
    progress: usize,
}

impl SequenceDetector {
    pub fn new(sequence: &'static [&'static str]) -> Self {
        Self {
            sequence,
            progress: 0,
        }
    }

    pub fn konami() -> Self {
        Self::new(&KONAMI)
    }

    /// Feed one key; true on the key that completes the sequence
    pub fn push(&mut self, key: &str) -> bool {
        if self.sequence.is_empty() {
            return false;
        }
        if self.sequence[self.progress] == key {
            self.progress += 1;
        } else {
            // A miss may still be the first key of a new attempt
            self.progress = usize::from(self.sequence[0] == key);
        }
        if self.progress == self.sequence.len() {
            self.progress = 0;
            return true;
        }
        false
    }

    pub fn progress(&self) -> usize {
        self.progress
    }
}
