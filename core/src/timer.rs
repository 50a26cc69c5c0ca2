/// # Timers
/// Delay and sound timers, both 8-bit, counting down to zero once per tick.
///
/// Ticks come from an external 60Hz clock, never from instruction execution.
/// A non-zero sound timer means the tone should be audible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerUnit {
    delay: u8,
    sound: u8,
}

impl TimerUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count both timers down, flooring at zero.
    ///
    /// Returns whether the tone should be on after this tick.
    pub fn tick(&mut self) -> bool {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
        self.sound > 0
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
