use crate::opcode::Opcode;

/// A decoded instruction: operation plus operand fields.
///
/// Register operands are the 4-bit register indices from the opcode, not the
/// register contents; execution resolves them against the current state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0: clear the framebuffer
    Clear,
    /// 00EE: pop the call stack into pc
    Return,
    /// 1NNN: pc = NNN
    Jump(u16),
    /// 2NNN: push pc, pc = NNN
    Call(u16),
    /// 3XNN: skip next if Vx == NN
    SkipEqImm(u8, u8),
    /// 4XNN: skip next if Vx != NN
    SkipNeImm(u8, u8),
    /// 5XY0: skip next if Vx == Vy
    SkipEqReg(u8, u8),
    /// 6XNN: Vx = NN
    LoadImm(u8, u8),
    /// 7XNN: Vx += NN, wrapping, no flag
    AddImm(u8, u8),
    /// 8XY0: Vx = Vy
    Move(u8, u8),
    /// 8XY1: Vx |= Vy
    Or(u8, u8),
    /// 8XY2: Vx &= Vy
    And(u8, u8),
    /// 8XY3: Vx ^= Vy
    Xor(u8, u8),
    /// 8XY4: Vx += Vy, VF = carry
    Add(u8, u8),
    /// 8XY5: Vx -= Vy, VF = no borrow
    Sub(u8, u8),
    /// 8XY6: VF = lsb, Vx >>= 1
    ShiftRight(u8),
    /// 8XY7: Vx = Vy - Vx, VF = no borrow
    SubFrom(u8, u8),
    /// 8XYE: VF = msb, Vx <<= 1
    ShiftLeft(u8),
    /// 9XY0: skip next if Vx != Vy
    SkipNeReg(u8, u8),
    /// ANNN: I = NNN
    LoadIndex(u16),
    /// BNNN: pc = NNN + V0
    JumpOffset(u16),
    /// CXNN: Vx = random byte & NN
    Random(u8, u8),
    /// DXYN: XOR an N-row sprite from memory[I..] at (Vx, Vy), VF = collision
    Draw(u8, u8, u8),
    /// EX9E: skip next if key Vx is pressed
    SkipKeyPressed(u8),
    /// EXA1: skip next if key Vx is not pressed
    SkipKeyReleased(u8),
    /// FX07: Vx = delay timer
    ReadDelay(u8),
    /// FX0A: busy-wait for a key press, then Vx = key
    WaitKey(u8),
    /// FX15: delay timer = Vx
    SetDelay(u8),
    /// FX18: sound timer = Vx
    SetSound(u8),
    /// FX1E: I += Vx
    AddIndex(u8),
    /// FX29: I = font address of glyph Vx
    LoadGlyph(u8),
    /// FX33: memory[I..I+3] = decimal digits of Vx
    StoreBcd(u8),
    /// FX55: memory[I..=I+x] = V0..=Vx
    StoreRegisters(u8),
    /// FX65: V0..=Vx = memory[I..=I+x]
    LoadRegisters(u8),
}

impl Instruction {
    /// Decodes an opcode, or `None` for anything outside the 35-instruction
    /// set (including SYS/0NNN, which this machine does not support).
    pub fn decode(op: Opcode) -> Option<Instruction> {
        use Instruction::*;

        let decoded = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump(op.nnn()),
            (0x2, ..) => Call(op.nnn()),
            (0x3, x, ..) => SkipEqImm(x, op.nn()),
            (0x4, x, ..) => SkipNeImm(x, op.nn()),
            (0x5, x, y, 0x0) => SkipEqReg(x, y),
            (0x6, x, ..) => LoadImm(x, op.nn()),
            (0x7, x, ..) => AddImm(x, op.nn()),
            (0x8, x, y, 0x0) => Move(x, y),
            (0x8, x, y, 0x1) => Or(x, y),
            (0x8, x, y, 0x2) => And(x, y),
            (0x8, x, y, 0x3) => Xor(x, y),
            (0x8, x, y, 0x4) => Add(x, y),
            (0x8, x, y, 0x5) => Sub(x, y),
            (0x8, x, _, 0x6) => ShiftRight(x),
            (0x8, x, y, 0x7) => SubFrom(x, y),
            (0x8, x, _, 0xE) => ShiftLeft(x),
            (0x9, x, y, 0x0) => SkipNeReg(x, y),
            (0xA, ..) => LoadIndex(op.nnn()),
            (0xB, ..) => JumpOffset(op.nnn()),
            (0xC, x, ..) => Random(x, op.nn()),
            (0xD, x, y, n) => Draw(x, y, n),
            (0xE, x, 0x9, 0xE) => SkipKeyPressed(x),
            (0xE, x, 0xA, 0x1) => SkipKeyReleased(x),
            (0xF, x, 0x0, 0x7) => ReadDelay(x),
            (0xF, x, 0x0, 0xA) => WaitKey(x),
            (0xF, x, 0x1, 0x5) => SetDelay(x),
            (0xF, x, 0x1, 0x8) => SetSound(x),
            (0xF, x, 0x1, 0xE) => AddIndex(x),
            (0xF, x, 0x2, 0x9) => LoadGlyph(x),
            (0xF, x, 0x3, 0x3) => StoreBcd(x),
            (0xF, x, 0x5, 0x5) => StoreRegisters(x),
            (0xF, x, 0x6, 0x5) => LoadRegisters(x),
            _ => return None,
        };
        Some(decoded)
    }
}
