/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Address at which loaded programs begin executing.
/// 0x000-0x1FF is reserved for the interpreter.
pub const ENTRY_POINT: u16 = 0x200;

/// Largest program that fits between the entry point and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - ENTRY_POINT as usize;

/// Address at which the built-in font set is loaded.
pub const FONT_OFFSET: usize = 0x050;

/// Display geometry in pixels.
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Call stack depth in return addresses.
pub const STACK_DEPTH: usize = 16;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Rate at which the delay and sound timers decrement, which is also the
/// nominal frame rate the driver is expected to tick at.
pub const TIMER_HZ: u32 = 60;

/// CPU budget used when the driver doesn't supply one.
pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 700;

/// Executed opcodes retained for the debug inspector before the oldest
/// entries are dropped.
pub const HISTORY_CAPACITY: usize = 256;

/// The built-in font set: 16 glyphs (0-F), 5 bytes per glyph, one row of
/// 8 pixels per byte with only the high nibble used.
///
/// FX29 points the index register at `FONT_OFFSET + glyph * 5`.
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
