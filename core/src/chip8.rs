use log::{error, info, trace, warn};

use crate::error::Fault;
use crate::framebuffer::{Frame, FrameBuffer};
use crate::input::InputLatch;
use crate::instruction;
use crate::memory::Memory;
use crate::registers::RegisterFile;
use crate::stack::CallStack;
use crate::state::Machine;
use crate::timer::TimerUnit;

/// Whether `step` will execute anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Blocked on `Fx0A` until a key is pressed
    WaitingForKey,
    /// Paused, or stopped by a fault
    Halted,
}

/// # Interpreter
/// Fetches, decodes and executes instructions against a `Machine`.
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU, pausing and resuming it
/// - ticking the timers, which keep running while paused
/// - inspecting the frame buffer for rendering by some display
///
/// A fault halts the interpreter and is handed back to the caller; it stays
/// available from `fault` until the next reset.
pub struct Interpreter {
    machine: Machine,
    halted: bool,
    fault: Option<Fault>,
}

impl Interpreter {
    /// A machine whose random source is seeded from the OS
    pub fn new() -> Self {
        Self::from_machine(Machine::from_entropy())
    }

    /// A machine with a reproducible random source
    pub fn with_seed(seed: u64) -> Self {
        Self::from_machine(Machine::from_seed(seed))
    }

    fn from_machine(machine: Machine) -> Self {
        Interpreter {
            machine,
            halted: false,
            fault: None,
        }
    }

    /// Reset the machine and copy `rom` in at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw program image
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Fault> {
        self.reset();
        if let Err(fault) = self.machine.memory.load_program(rom) {
            return Err(self.halt(fault));
        }
        info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Reinitialise all state and return to `Running`, dropping any pending
    /// key wait or fault
    pub fn reset(&mut self) {
        self.machine.reset();
        self.halted = false;
        self.fault = None;
        info!("machine reset");
    }

    pub fn state(&self) -> RunState {
        if self.halted {
            RunState::Halted
        } else if self.machine.input.is_waiting() {
            RunState::WaitingForKey
        } else {
            RunState::Running
        }
    }

    /// Executes a single instruction
    /// - does nothing while waiting for a key or halted
    /// - advances the pc past the instruction before executing it
    /// - halts on a fault and returns it
    pub fn step(&mut self) -> Result<(), Fault> {
        if self.state() != RunState::Running {
            return Ok(());
        }
        self.execute().map_err(|fault| self.halt(fault))
    }

    fn execute(&mut self) -> Result<(), Fault> {
        let registers = &self.machine.registers;
        let op = self.machine.memory.read_word(usize::from(registers.pc()))?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            registers.all(),
            registers.index(),
            registers.pc()
        );
        self.machine.registers.advance_pc();
        instruction::from_op(&op)(&op, &mut self.machine)
    }

    fn halt(&mut self, fault: Fault) -> Fault {
        error!("halting: {}", fault);
        self.halted = true;
        self.fault = Some(fault);
        fault
    }

    /// Stop executing instructions; timers keep counting
    pub fn pause(&mut self) {
        if self.halted {
            return;
        }
        self.halted = true;
        warn!("paused");
    }

    pub fn resume(&mut self) {
        if !self.halted {
            return;
        }
        self.halted = false;
        warn!("resumed");
    }

    /// Set the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the hex key 0x0..=0xF
    /// * `pressed` whether it went down or came up
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        if let Some(register) = self.machine.input.set_key(key, pressed) {
            self.machine.registers.set(register, key);
        }
    }

    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    /// One 60Hz timer tick; returns whether the tone should be audible
    pub fn tick_timers(&mut self) -> bool {
        self.machine.timers.tick()
    }

    /// Returns the frame if the display should be redrawn, clearing the
    /// dirty flag
    pub fn take_frame(&mut self) -> Option<Frame> {
        if self.machine.frame_buffer.take_dirty() {
            Some(self.machine.frame_buffer.snapshot())
        } else {
            None
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.machine.frame_buffer.is_dirty()
    }

    /// The fault that last halted the machine, if any since the last reset
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.machine.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.machine.memory
    }

    pub fn stack(&self) -> &CallStack {
        &self.machine.stack
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.machine.frame_buffer
    }

    pub fn input(&self) -> &InputLatch {
        &self.machine.input
    }

    pub fn timers(&self) -> &TimerUnit {
        &self.machine.timers
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter(rom: &[u8]) -> Interpreter {
        let mut interpreter = Interpreter::with_seed(1);
        interpreter.load_rom(rom).unwrap();
        interpreter
    }

    #[test]
    fn test_steps_past_instruction() {
        let mut chip8 = interpreter(&[0x00, 0xE0]);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc(), 0x202);
    }

    #[test]
    fn test_captures_key_presses() {
        let mut chip8 = interpreter(&[0xF1, 0x0A]);
        chip8.step().unwrap();
        assert_eq!(chip8.state(), RunState::WaitingForKey);
        chip8.key_press(0xE);
        assert_eq!(chip8.state(), RunState::Running);
        assert_eq!(chip8.registers().get(0x1), 0xE);
    }

    #[test]
    fn test_doesnt_step_while_waiting_for_key() {
        let mut chip8 = interpreter(&[0xF1, 0x0A, 0x61, 0x01]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc(), 0x202);
        assert_eq!(chip8.registers().get(0x1), 0x0);
    }

    #[test]
    fn test_release_doesnt_satisfy_wait() {
        let mut chip8 = interpreter(&[0xF1, 0x0A]);
        chip8.step().unwrap();
        chip8.key_release(0x3);
        assert_eq!(chip8.state(), RunState::WaitingForKey);
    }

    #[test]
    fn test_doesnt_step_while_paused() {
        let mut chip8 = interpreter(&[0x60, 0x05]);
        chip8.pause();
        assert_eq!(chip8.state(), RunState::Halted);
        chip8.step().unwrap();
        assert_eq!(chip8.registers().pc(), 0x200);
        chip8.resume();
        chip8.step().unwrap();
        assert_eq!(chip8.registers().get(0x0), 0x5);
    }

    #[test]
    fn test_timers_run_while_paused() {
        let mut chip8 = interpreter(&[0x60, 0x03, 0xF0, 0x15]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        chip8.pause();
        chip8.tick_timers();
        assert_eq!(chip8.timers().delay(), 2);
    }

    #[test]
    fn test_fault_halts() {
        let mut chip8 = interpreter(&[0x00, 0xEE, 0x60, 0x01]);
        assert_eq!(chip8.step(), Err(Fault::StackUnderflow));
        assert_eq!(chip8.state(), RunState::Halted);
        assert_eq!(chip8.fault(), Some(Fault::StackUnderflow));
        chip8.step().unwrap();
        assert_eq!(chip8.registers().get(0x0), 0x0);
    }

    #[test]
    fn test_fetch_past_memory_faults() {
        let mut chip8 = interpreter(&[0x1F, 0xFF]);
        chip8.step().unwrap();
        assert_eq!(
            chip8.step(),
            Err(Fault::OutOfBoundsAccess { address: 0x1000 })
        );
    }

    #[test]
    fn test_reset_clears_fault_and_wait() {
        let mut chip8 = interpreter(&[0x00, 0xEE]);
        chip8.step().unwrap_err();
        chip8.reset();
        assert_eq!(chip8.state(), RunState::Running);
        assert_eq!(chip8.fault(), None);

        let mut chip8 = interpreter(&[0xF1, 0x0A]);
        chip8.step().unwrap();
        chip8.reset();
        assert_eq!(chip8.state(), RunState::Running);
        assert!(!chip8.input().is_waiting());
    }

    #[test]
    fn test_take_frame_only_when_dirty() {
        let mut chip8 = interpreter(&[0x00, 0xE0, 0x60, 0x01]);
        chip8.take_frame();
        chip8.step().unwrap();
        assert!(chip8.take_frame().is_some());
        chip8.step().unwrap();
        assert!(chip8.take_frame().is_none());
    }

    #[test]
    fn test_oversized_rom_halts() {
        let mut chip8 = Interpreter::with_seed(1);
        let rom = vec![0; 0xE01];
        assert_eq!(
            chip8.load_rom(&rom),
            Err(Fault::ProgramTooLarge {
                size: 0xE01,
                max: 0xE00
            })
        );
        assert_eq!(chip8.state(), RunState::Halted);
    }
}
