use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, ENTRY_POINT, FONT_OFFSET, FONT_SET, KEY_COUNT, MEMORY_SIZE,
    STACK_DEPTH,
};

/// The framebuffer is indexed as `[y][x]` with cells holding 0 or 1.
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// The pressed status of the 16 hexadecimal keys, indexed 0x0-0xF.
///
/// The machine never polls input; the driver snapshots the keypad once per
/// frame and passes it in.
pub type Keypad = [bool; KEY_COUNT];

/// A snapshot of all CHIP-8 architectural state.
///
/// Registers
/// - (v) 16 general purpose 8-bit registers; VF doubles as the
///   carry/borrow/collision flag and is clobbered by any instruction that
///   defines flag semantics
/// - (i) the 16-bit index register, used only as a memory address by the
///   sprite/BCD/register-block instructions
///
/// Control flow
/// - (pc) a 16-bit program counter, starting at the 0x200 entry point
/// - (stack, sp) 16 16-bit return addresses and a stack pointer in 0..=16
///
/// Timers
/// - two 8-bit counters decremented once per 60 Hz tick while nonzero; the
///   sound timer hitting zero from 1 signals a beep
///
/// Memory
/// - 4096 bytes, with the font set at `FONT_OFFSET` and programs at
///   `ENTRY_POINT`
/// - a 64x32 one-bit framebuffer, only ever mutated by XOR draws and clears
///
/// The whole snapshot is `Copy` so instruction execution can be a pure
/// function from one `State` to the next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub memory: [u8; MEMORY_SIZE],
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: [u16; STACK_DEPTH],
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    /// A byte-for-byte deterministic power-on state: everything zeroed, the
    /// font set copied to its fixed offset, pc at the entry point.
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[FONT_OFFSET..FONT_OFFSET + FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            memory,
            v: [0; 16],
            i: 0,
            pc: ENTRY_POINT,
            stack: [0; STACK_DEPTH],
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Masks an address to the 12-bit space so index arithmetic can never
/// escape the 4096-byte memory array.
pub(crate) fn mem_index(addr: u16) -> usize {
    (addr as usize) & (MEMORY_SIZE - 1)
}
