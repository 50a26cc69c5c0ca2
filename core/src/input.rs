use log::{debug, warn};

use crate::constants::KEY_COUNT;

/// # Input latch
/// Pressed state of the sixteen hex keys, plus the register waiting on
/// `Fx0A` if any.
///
/// While a wait is armed the interpreter won't execute. The next key press
/// resolves it: `set_key` hands back the register to write the key into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLatch {
    pressed: [bool; KEY_COUNT],
    register_needing_key: Option<usize>,
}

impl InputLatch {
    pub fn new() -> Self {
        InputLatch {
            pressed: [false; KEY_COUNT],
            register_needing_key: None,
        }
    }

    /// Update the state of `key`.
    ///
    /// Returns the waiting register if this press satisfied a pending wait.
    /// Keys outside 0x0..=0xF are ignored.
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Option<usize> {
        let Some(state) = self.pressed.get_mut(key as usize) else {
            warn!("ignoring out of range key {:#04X}", key);
            return None;
        };
        *state = pressed;
        if !pressed {
            return None;
        }
        let register = self.register_needing_key.take()?;
        debug!("key {:X} resolves wait for V{:X}", key, register);
        Some(register)
    }

    /// Whether `key` is held; keys past 0xF never are
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    /// Block until the next key press, which is stored into Vx
    pub fn request_key(&mut self, register: usize) {
        debug!("waiting for a key press into V{:X}", register);
        self.register_needing_key = Some(register);
    }

    pub fn waiting_register(&self) -> Option<usize> {
        self.register_needing_key
    }

    pub fn is_waiting(&self) -> bool {
        self.register_needing_key.is_some()
    }

    pub fn cancel_wait(&mut self) {
        self.register_needing_key = None;
    }

    /// Release every key and drop any pending wait
    pub fn reset(&mut self) {
        self.pressed = [false; KEY_COUNT];
        self.cancel_wait();
    }
}

impl Default for InputLatch {
    fn default() -> Self {
        Self::new()
    }
}
