//! One function per opcode pattern. Each runs after the fetch, so the program
//! counter already points at the following instruction.

use log::debug;

use crate::constants::GLYPH_SIZE;
use crate::error::Fault;
use crate::opcode::Opcode;
use crate::state::Machine;

pub type OpResult = Result<(), Fault>;

/// pc += 2 if `condition`
fn skip_if(m: &mut Machine, condition: bool) -> OpResult {
    if condition {
        m.registers.advance_pc();
    }
    Ok(())
}

/// Unmapped patterns are skipped rather than faulting
pub fn nop(op: &dyn Opcode, _m: &mut Machine) -> OpResult {
    debug!("ignoring unmapped opcode {:X?}", op.nibbles());
    Ok(())
}

/// clear
pub fn clr(_op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.frame_buffer.clear();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let address = m.stack.pop()?;
    m.registers.set_pc(address);
    Ok(())
}

/// PC = nnn
pub fn jump(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.registers.set_pc(op.nnn());
    Ok(())
}

/// STACK.push(PC); PC = nnn
pub fn call(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.stack.push(m.registers.pc())?;
    m.registers.set_pc(op.nnn());
    Ok(())
}

/// if Vx == nn then pc += 2
pub fn ske(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let condition = m.registers.get(op.x()) == op.nn();
    skip_if(m, condition)
}

/// if Vx != nn then pc += 2
pub fn skne(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let condition = m.registers.get(op.x()) != op.nn();
    skip_if(m, condition)
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let condition = m.registers.get(op.x()) == m.registers.get(op.y());
    skip_if(m, condition)
}

/// Vx = nn
pub fn load(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.registers.set(op.x(), op.nn());
    Ok(())
}

/// Vx += nn, dropping any overflow; VF is untouched
pub fn add(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let res = m.registers.get(op.x()).wrapping_add(op.nn());
    m.registers.set(op.x(), res);
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.registers.set(op.x(), m.registers.get(op.y()));
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let res = m.registers.get(op.x()) | m.registers.get(op.y());
    m.registers.set(op.x(), res);
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let res = m.registers.get(op.x()) & m.registers.get(op.y());
    m.registers.set(op.x(), res);
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let res = m.registers.get(op.x()) ^ m.registers.get(op.y());
    m.registers.set(op.x(), res);
    Ok(())
}

// The flag-setting ALU ops below read both operands up front, then write VF
// followed by Vx. With x = F the result therefore wins over the flag.

/// Vx += Vy; VF = carry
pub fn addr(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let (res, over) = m
        .registers
        .get(op.x())
        .overflowing_add(m.registers.get(op.y()));
    m.registers.set_flag(over);
    m.registers.set(op.x(), res);
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let (vx, vy) = (m.registers.get(op.x()), m.registers.get(op.y()));
    m.registers.set_flag(vx > vy);
    m.registers.set(op.x(), vx.wrapping_sub(vy));
    Ok(())
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let vx = m.registers.get(op.x());
    m.registers.set_flag(vx & 0x1 == 1);
    m.registers.set(op.x(), vx >> 1);
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let (vx, vy) = (m.registers.get(op.x()), m.registers.get(op.y()));
    m.registers.set_flag(vy > vx);
    m.registers.set(op.x(), vy.wrapping_sub(vx));
    Ok(())
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let vx = m.registers.get(op.x());
    m.registers.set_flag(vx & 0x80 != 0);
    m.registers.set(op.x(), vx << 1);
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let condition = m.registers.get(op.x()) != m.registers.get(op.y());
    skip_if(m, condition)
}

/// I = nnn
pub fn loadi(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.registers.set_index(op.nnn());
    Ok(())
}

/// PC = nnn + V0
pub fn jumpi(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.registers
        .set_pc(op.nnn() + u16::from(m.registers.get(0x0)));
    Ok(())
}

/// Vx = random byte & nn
pub fn rand(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let byte = m.random_byte();
    m.registers.set(op.x(), byte & op.nn());
    Ok(())
}

/// draw_sprite(x=Vx y=Vy rows=mem[I..I+n])
/// XORs the sprite onto the frame buffer with wrapping; VF = collision
pub fn draw(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let x = m.registers.get(op.x());
    let y = m.registers.get(op.y());
    let sprite = m
        .memory
        .slice(usize::from(m.registers.index()), usize::from(op.n()))?;
    let collision = m.frame_buffer.draw_sprite(x, y, sprite);
    m.registers.set_flag(collision);
    Ok(())
}

/// if key(Vx).pressed then pc += 2
pub fn skpr(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let condition = m.input.is_pressed(m.registers.get(op.x()));
    skip_if(m, condition)
}

/// if !key(Vx).pressed then pc += 2
pub fn skup(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let condition = !m.input.is_pressed(m.registers.get(op.x()));
    skip_if(m, condition)
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.registers.set(op.x(), m.timers.delay());
    Ok(())
}

/// await keypress into Vx
pub fn keyd(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.input.request_key(op.x());
    Ok(())
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.timers.set_delay(m.registers.get(op.x()));
    Ok(())
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.timers.set_sound(m.registers.get(op.x()));
    Ok(())
}

/// I += Vx, wrapping at 16 bits
pub fn addi(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let i = m
        .registers
        .index()
        .wrapping_add(u16::from(m.registers.get(op.x())));
    m.registers.set_index(i);
    Ok(())
}

/// I = Vx * 5, the address of the glyph for digit Vx
pub fn ldspr(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    m.registers
        .set_index(u16::from(m.registers.get(op.x())) * GLYPH_SIZE);
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let vx = m.registers.get(op.x());
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    m.memory
        .slice_mut(usize::from(m.registers.index()), digits.len())?
        .copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I is left unchanged
pub fn stor(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let registers = m.registers.range(op.x());
    m.memory
        .slice_mut(usize::from(m.registers.index()), registers.len())?
        .copy_from_slice(registers);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I is left unchanged
pub fn read(op: &dyn Opcode, m: &mut Machine) -> OpResult {
    let bytes = m
        .memory
        .slice(usize::from(m.registers.index()), op.x() + 1)?;
    m.registers.range_mut(op.x()).copy_from_slice(bytes);
    Ok(())
}
