use crate::constants::STACK_DEPTH;
use crate::error::Fault;

/// Return addresses saved by `2nnn` and consumed by `00EE`.
///
/// Fixed capacity; a call past `STACK_DEPTH` frames is an overflow rather
/// than unbounded growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallStack {
    frames: [u16; STACK_DEPTH],
    sp: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), Fault> {
        if self.sp == STACK_DEPTH {
            return Err(Fault::StackOverflow {
                capacity: STACK_DEPTH,
            });
        }
        self.frames[self.sp] = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.frames[self.sp])
    }

    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    pub fn clear(&mut self) {
        self.sp = 0;
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}
