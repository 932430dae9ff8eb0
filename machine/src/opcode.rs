use std::fmt;

/// A raw 16-bit CHIP-8 opcode.
///
/// Behavior is cased on some combination of its nibbles:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` or `(_, _, n, n)` specific behavior within a category
/// - `(_, n, n, n)` fixed functions that take no operands (e.g. 00E0)
///
/// Nibbles not used for dispatch carry operands:
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` an 8-bit immediate compared with or assigned to Vx
/// - `(_, n, _, _)` the register Vx, or the range V0..=Vx
/// - `(_, _, n, _)` the register Vy
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Opcode(u16);

impl Opcode {
    pub fn new(raw: u16) -> Self {
        Opcode(raw)
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    /// The component nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (((self.0 >> 12) & 0xF) as u8, self.x(), self.y(), self.n())
    }

    /// The second nibble: `[_x__]`
    pub fn x(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    /// The third nibble: `[__y_]`
    pub fn y(self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    /// The fourth nibble: `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    /// The least significant byte: `[__nn]`
    pub fn nn(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Everything but the most significant nibble: `[_nnn]`
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(raw: u16) -> Self {
        Opcode(raw)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opcode({:04X})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibbles() {
        assert_eq!(Opcode::new(0xABCD).nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        assert_eq!(Opcode::new(0xABCD).x(), 0xB);
    }

    #[test]
    fn test_y() {
        assert_eq!(Opcode::new(0xABCD).y(), 0xC);
    }

    #[test]
    fn test_n() {
        assert_eq!(Opcode::new(0xABCD).n(), 0xD);
    }

    #[test]
    fn test_nn() {
        assert_eq!(Opcode::new(0xABCD).nn(), 0xCD);
    }

    #[test]
    fn test_nnn() {
        assert_eq!(Opcode::new(0xABCD).nnn(), 0x0BCD);
    }

    #[test]
    fn test_display_is_bare_hex() {
        assert_eq!(Opcode::new(0x00E0).to_string(), "00E0");
        assert_eq!(Opcode::new(0xD01F).to_string(), "D01F");
    }
}
