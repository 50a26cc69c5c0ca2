pub use chip8::{Interpreter, RunState};
pub use constants::TIMER_HZ;
pub use error::Fault;
pub use framebuffer::{Frame, FrameBuffer};
pub use scheduler::{FrameReport, Scheduler};

mod chip8;
pub mod constants;
mod error;
pub mod framebuffer;
pub mod input;
mod instruction;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
mod scheduler;
pub mod stack;
mod state;
pub mod timer;
