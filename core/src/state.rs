use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::framebuffer::FrameBuffer;
use crate::input::InputLatch;
use crate::memory::Memory;
use crate::registers::RegisterFile;
use crate::stack::CallStack;
use crate::timer::TimerUnit;

/// Everything an instruction can read or write
///
/// ## CPU
/// - 16 8-bit registers V0..VF, VF being the flag register
/// - a 16-bit index register I
/// - a 16-bit program counter
/// - a 16-frame call stack
///
/// ## Memory
/// - 4096 bytes, sprite sheet at 0x000, programs from 0x200
///
/// ## Peripherals
/// - 64x32 monochrome frame buffer
/// - 16-key hex keypad
/// - delay and sound timers counting down at 60Hz
///
/// Owned by exactly one interpreter; nothing here is shared.
pub struct Machine {
    pub memory: Memory,
    pub registers: RegisterFile,
    pub stack: CallStack,
    pub frame_buffer: FrameBuffer,
    pub input: InputLatch,
    pub timers: TimerUnit,
    rng: StdRng,
}

impl Machine {
    pub fn new(rng: StdRng) -> Self {
        Machine {
            memory: Memory::new(),
            registers: RegisterFile::new(),
            stack: CallStack::new(),
            frame_buffer: FrameBuffer::new(),
            input: InputLatch::new(),
            timers: TimerUnit::new(),
            rng,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Reinitialise every component; the random source carries on
    pub fn reset(&mut self) {
        self.memory.reset();
        self.registers = RegisterFile::new();
        self.stack.clear();
        self.frame_buffer.clear();
        self.input.reset();
        self.timers.reset();
    }

    /// A uniformly random byte for `Cxnn`
    pub fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }
}
