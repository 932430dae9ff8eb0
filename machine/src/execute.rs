use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_OFFSET, STACK_DEPTH};
use crate::error::Error;
use crate::instruction::Instruction;
use crate::state::{mem_index, Keypad, State};

/// Executes one decoded instruction as a pure function from the current
/// state to the next.
///
/// The program counter has already been advanced past the instruction, so
/// jumps and calls assign absolute addresses, skips add another 2, and the
/// FX0A busy-wait rewinds by 2 to re-execute itself next step.
///
/// Flag-setting arithmetic computes VF from the original operand values
/// before any register is written, so `8XY6 VF,..` style operands behave.
pub fn execute(instruction: Instruction, state: &State, keys: &Keypad) -> Result<State, Error> {
    use Instruction::*;

    let next = match instruction {
        Clear => State {
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: true,
            ..*state
        },
        Return => {
            if state.sp == 0 {
                return Err(Error::StackUnderflow {
                    pc: state.pc.wrapping_sub(2),
                });
            }
            let sp = state.sp - 1;
            State {
                pc: state.stack[sp as usize],
                sp,
                ..*state
            }
        }
        Jump(addr) => State { pc: addr, ..*state },
        Call(addr) => {
            if state.sp as usize >= STACK_DEPTH {
                return Err(Error::StackOverflow {
                    pc: state.pc.wrapping_sub(2),
                });
            }
            let mut stack = state.stack;
            stack[state.sp as usize] = state.pc;
            State {
                pc: addr,
                sp: state.sp + 1,
                stack,
                ..*state
            }
        }
        SkipEqImm(x, nn) => skip_if(state, state.v[x as usize] == nn),
        SkipNeImm(x, nn) => skip_if(state, state.v[x as usize] != nn),
        SkipEqReg(x, y) => skip_if(state, state.v[x as usize] == state.v[y as usize]),
        LoadImm(x, nn) => with_register(state, x, nn),
        AddImm(x, nn) => {
            // wraps mod 256 without touching VF
            with_register(state, x, state.v[x as usize].wrapping_add(nn))
        }
        Move(x, y) => with_register(state, x, state.v[y as usize]),
        Or(x, y) => with_register(state, x, state.v[x as usize] | state.v[y as usize]),
        And(x, y) => with_register(state, x, state.v[x as usize] & state.v[y as usize]),
        Xor(x, y) => with_register(state, x, state.v[x as usize] ^ state.v[y as usize]),
        Add(x, y) => {
            let (sum, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
            with_flagged_register(state, x, sum, carry as u8)
        }
        Sub(x, y) => {
            let (diff, borrow) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
            with_flagged_register(state, x, diff, !borrow as u8)
        }
        ShiftRight(x) => {
            let vx = state.v[x as usize];
            with_flagged_register(state, x, vx >> 1, vx & 0x1)
        }
        SubFrom(x, y) => {
            let (diff, borrow) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
            with_flagged_register(state, x, diff, !borrow as u8)
        }
        ShiftLeft(x) => {
            let vx = state.v[x as usize];
            with_flagged_register(state, x, vx << 1, vx >> 7)
        }
        SkipNeReg(x, y) => skip_if(state, state.v[x as usize] != state.v[y as usize]),
        LoadIndex(addr) => State {
            i: addr,
            ..*state
        },
        JumpOffset(addr) => State {
            pc: addr.wrapping_add(u16::from(state.v[0x0])),
            ..*state
        },
        Random(x, nn) => with_register(state, x, rand::random::<u8>() & nn),
        Draw(x, y, n) => draw(state, x, y, n),
        SkipKeyPressed(x) => skip_if(state, keys[state.v[x as usize] as usize & 0xF]),
        SkipKeyReleased(x) => skip_if(state, !keys[state.v[x as usize] as usize & 0xF]),
        ReadDelay(x) => with_register(state, x, state.delay_timer),
        WaitKey(x) => match keys.iter().position(|&pressed| pressed) {
            // the lowest-indexed pressed key wins
            Some(key) => with_register(state, x, key as u8),
            // rewind so the same instruction re-executes next step; the
            // surrounding frame loop keeps running while this spins
            None => State {
                pc: state.pc.wrapping_sub(2),
                ..*state
            },
        },
        SetDelay(x) => State {
            delay_timer: state.v[x as usize],
            ..*state
        },
        SetSound(x) => State {
            sound_timer: state.v[x as usize],
            ..*state
        },
        AddIndex(x) => State {
            i: state.i.wrapping_add(u16::from(state.v[x as usize])),
            ..*state
        },
        LoadGlyph(x) => State {
            i: FONT_OFFSET as u16 + u16::from(state.v[x as usize]) * 5,
            ..*state
        },
        StoreBcd(x) => {
            let vx = state.v[x as usize];
            let mut memory = state.memory;
            memory[mem_index(state.i)] = vx / 100;
            memory[mem_index(state.i.wrapping_add(1))] = vx / 10 % 10;
            memory[mem_index(state.i.wrapping_add(2))] = vx % 10;
            State { memory, ..*state }
        }
        StoreRegisters(x) => {
            let mut memory = state.memory;
            for offset in 0..=u16::from(x) {
                memory[mem_index(state.i.wrapping_add(offset))] = state.v[offset as usize];
            }
            State { memory, ..*state }
        }
        LoadRegisters(x) => {
            let mut v = state.v;
            for offset in 0..=u16::from(x) {
                v[offset as usize] = state.memory[mem_index(state.i.wrapping_add(offset))];
            }
            State { v, ..*state }
        }
    };
    Ok(next)
}

/// Skips the next instruction (another +2 on top of the fetch advance) when
/// the condition holds.
fn skip_if(state: &State, condition: bool) -> State {
    State {
        pc: if condition {
            state.pc.wrapping_add(2)
        } else {
            state.pc
        },
        ..*state
    }
}

fn with_register(state: &State, x: u8, value: u8) -> State {
    let mut v = state.v;
    v[x as usize] = value;
    State { v, ..*state }
}

fn with_flagged_register(state: &State, x: u8, value: u8, flag: u8) -> State {
    let mut v = state.v;
    v[x as usize] = value;
    v[0xF] = flag;
    State { v, ..*state }
}

/// XORs an `n`-row sprite from `memory[I..I+n)` onto the framebuffer at
/// (Vx, Vy) with coordinate wraparound; VF reports whether any set pixel
/// was toggled off.
fn draw(state: &State, x: u8, y: u8, n: u8) -> State {
    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;

    v[0xF] = 0;
    for row in 0..n as usize {
        let sprite = state.memory[mem_index(state.i.wrapping_add(row as u16))];
        let py = (state.v[y as usize] as usize + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let px = (state.v[x as usize] as usize + bit) % DISPLAY_WIDTH;
            let pixel = (sprite >> (7 - bit)) & 1;
            v[0xF] |= pixel & frame_buffer[py][px];
            frame_buffer[py][px] ^= pixel;
        }
    }

    State {
        v,
        frame_buffer,
        draw_flag: true,
        ..*state
    }
}
