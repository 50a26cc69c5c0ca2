use log::{info, warn};

use crate::chip8::Interpreter;
use crate::constants::{DEFAULT_TURBO_SPEED, TURBO_WARN_THRESHOLD};
use crate::error::Fault;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// The frame buffer changed and should be redrawn
    pub dirty: bool,
}

/// # Scheduler
/// Drives an interpreter from two independent external clocks:
/// - `frame`, once per display refresh, runs one instruction, or
///   `turbo_speed` of them while turbo is on
/// - `tick_timers`, at a fixed 60Hz, counts the timers down
///
/// Neither call sleeps or owns a clock; the host decides when they happen.
pub struct Scheduler {
    interpreter: Interpreter,
    turbo: bool,
    turbo_speed: u32,
}

impl Scheduler {
    pub fn new(interpreter: Interpreter) -> Self {
        Scheduler {
            interpreter,
            turbo: false,
            turbo_speed: DEFAULT_TURBO_SPEED,
        }
    }

    /// Run this frame's instructions.
    ///
    /// Stops early and returns the fault if one halts the machine.
    pub fn frame(&mut self) -> Result<FrameReport, Fault> {
        for _ in 0..self.steps_per_frame() {
            self.interpreter.step()?;
        }
        Ok(FrameReport {
            dirty: self.interpreter.is_dirty(),
        })
    }

    /// Returns whether the tone should be audible
    pub fn tick_timers(&mut self) -> bool {
        self.interpreter.tick_timers()
    }

    pub fn steps_per_frame(&self) -> u32 {
        if self.turbo {
            self.turbo_speed
        } else {
            1
        }
    }

    pub fn set_turbo(&mut self, enabled: bool) {
        if self.turbo != enabled {
            info!("turbo mode {}", if enabled { "on" } else { "off" });
        }
        self.turbo = enabled;
    }

    pub fn toggle_turbo(&mut self) {
        self.set_turbo(!self.turbo);
    }

    pub fn turbo(&self) -> bool {
        self.turbo
    }

    /// Instructions per frame in turbo mode. Zero is raised to one.
    pub fn set_turbo_speed(&mut self, speed: u32) {
        if speed >= TURBO_WARN_THRESHOLD {
            warn!("turbo speed {} is high and may cause lag", speed);
        }
        self.turbo_speed = speed.max(1);
    }

    pub fn turbo_speed(&self) -> u32 {
        self.turbo_speed
    }

    /// Reset the machine; turbo is switched off but its speed is kept
    pub fn reset(&mut self) {
        self.interpreter.reset();
        self.turbo = false;
    }

    /// Reset, then load `rom`
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Fault> {
        self.turbo = false;
        self.interpreter.load_rom(rom)
    }

    pub fn pause(&mut self) {
        self.interpreter.pause();
    }

    pub fn resume(&mut self) {
        self.interpreter.resume();
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }
}
