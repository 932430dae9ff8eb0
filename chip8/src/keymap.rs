use sdl2::keyboard::Scancode;

/// # Keymap
/// CHIP-8 input is a hexadecimal keypad, mapped onto the left four columns
/// of a QWERTY keyboard:
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
/// Keyed on scancodes so the physical layout survives non-QWERTY keyboard
/// settings.
pub fn keymap(scancode: Scancode) -> Option<u8> {
    match scancode {
        Scancode::X => Some(0x0),
        Scancode::Num1 => Some(0x1),
        Scancode::Num2 => Some(0x2),
        Scancode::Num3 => Some(0x3),
        Scancode::Q => Some(0x4),
        Scancode::W => Some(0x5),
        Scancode::E => Some(0x6),
        Scancode::A => Some(0x7),
        Scancode::S => Some(0x8),
        Scancode::D => Some(0x9),
        Scancode::Z => Some(0xA),
        Scancode::C => Some(0xB),
        Scancode::Num4 => Some(0xC),
        Scancode::R => Some(0xD),
        Scancode::F => Some(0xE),
        Scancode::V => Some(0xF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_all_sixteen_keys_exactly_once() {
        let mapped: Vec<u8> = [
            Scancode::X,
            Scancode::Num1,
            Scancode::Num2,
            Scancode::Num3,
            Scancode::Q,
            Scancode::W,
            Scancode::E,
            Scancode::A,
            Scancode::S,
            Scancode::D,
            Scancode::Z,
            Scancode::C,
            Scancode::Num4,
            Scancode::R,
            Scancode::F,
            Scancode::V,
        ]
        .iter()
        .filter_map(|&sc| keymap(sc))
        .collect();

        let mut sorted = mapped.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(mapped.len(), 16);
        assert_eq!(sorted.len(), 16);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(keymap(Scancode::Return), None);
        assert_eq!(keymap(Scancode::Space), None);
    }
}
