use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::constants::{ENTRY_POINT, HISTORY_CAPACITY, MAX_PROGRAM_SIZE, TIMER_HZ};
use crate::error::Error;
use crate::execute::execute;
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::state::{mem_index, FrameBuffer, Keypad, State};

/// What a tick tells the driver to do with its outputs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutput {
    /// The framebuffer changed this tick and should be re-rendered.
    pub redraw: bool,
    /// The sound timer just expired; play the beep.
    pub beep: bool,
}

/// # Machine
/// The CHIP-8 virtual machine: all architectural state plus a bounded
/// history of executed opcodes for the debug inspector.
///
/// The machine is a leaf component. It never blocks, sleeps, polls input,
/// or renders; an external driver owns it, feeds it a keypad snapshot and
/// an instruction budget once per 60 Hz frame, and consumes the framebuffer
/// and the redraw/beep signals.
pub struct Machine {
    state: State,
    history: VecDeque<u16>,
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            state: State::new(),
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Returns the machine to its power-on state: memory, registers, stack,
    /// framebuffer, and timers zeroed, the font set copied back in, pc at
    /// the entry point, and the opcode history cleared.
    ///
    /// Loading a ROM without a reset must not leak state from the previous
    /// run, so `load_program` calls this itself.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.history.clear();
        debug!("machine reset; font set at {:#05X}", crate::constants::FONT_OFFSET);
    }

    /// Resets the machine and copies `program` to the entry point.
    ///
    /// Programs larger than the 3584 bytes above the entry point are
    /// rejected with `Error::ProgramTooLarge` before any state is touched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Error> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                len: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        self.reset();
        let start = ENTRY_POINT as usize;
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        info!("loaded {} byte program at {:#05X}", program.len(), ENTRY_POINT);
        Ok(())
    }

    /// Runs one frame's worth of instructions (`instructions_per_second /
    /// 60`, integer division) and then updates both timers once.
    ///
    /// A zero budget executes nothing but still ticks the timers. The beep
    /// signal fires exactly on the tick where the sound timer goes from 1
    /// to 0.
    pub fn tick(
        &mut self,
        keys: &Keypad,
        instructions_per_second: u32,
    ) -> Result<TickOutput, Error> {
        for _ in 0..instructions_per_second / TIMER_HZ {
            self.step(keys)?;
        }

        let redraw = std::mem::take(&mut self.state.draw_flag);

        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        let beep = self.state.sound_timer == 1;
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }

        Ok(TickOutput { redraw, beep })
    }

    /// One fetch/decode/execute cycle.
    ///
    /// The pc advances past the instruction before it executes, so jumps,
    /// calls, and returns assign absolute addresses and the FX0A busy-wait
    /// rewinds to re-execute itself. Unrecognized opcodes are logged and
    /// skipped as no-ops; stack misuse is surfaced as an error.
    pub fn step(&mut self, keys: &Keypad) -> Result<(), Error> {
        let op = self.fetch();
        self.record(op.raw());
        self.state.pc = self.state.pc.wrapping_add(2);

        match Instruction::decode(op) {
            Some(instruction) => self.state = execute(instruction, &self.state, keys)?,
            None => warn!(
                "{}",
                Error::UnknownOpcode { opcode: op.raw() },
            ),
        }
        Ok(())
    }

    /// The current framebuffer, for rendering.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// A read-only view of registers, stack, timers, and memory for the
    /// debug inspector.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Executed opcodes, oldest first, bounded at `HISTORY_CAPACITY`.
    pub fn history(&self) -> impl ExactSizeIterator<Item = u16> + '_ {
        self.history.iter().copied()
    }

    /// Reads the big-endian opcode at the pc. Both byte reads are masked to
    /// the 12-bit address space.
    fn fetch(&self) -> Opcode {
        let hi = self.state.memory[mem_index(self.state.pc)];
        let lo = self.state.memory[mem_index(self.state.pc.wrapping_add(1))];
        Opcode::new(u16::from(hi) << 8 | u16::from(lo))
    }

    fn record(&mut self, opcode: u16) {
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(opcode);
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FONT_OFFSET, FONT_SET};

    const NO_KEYS: Keypad = [false; 16];

    #[test]
    fn test_fetch_combines_bytes_big_endian() {
        let mut machine = Machine::new();
        machine.state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(machine.fetch().raw(), 0xAABB);
    }

    #[test]
    fn test_load_program_round_trips() {
        let mut machine = Machine::new();
        let program = [0x60, 0x01, 0xA2, 0x2A, 0xD0, 0x15];
        machine.load_program(&program).unwrap();
        assert_eq!(machine.state.memory[0x200..0x206], program);
        assert_eq!(machine.state.pc, ENTRY_POINT);
    }

    #[test]
    fn test_load_program_rejects_oversized_input_untouched() {
        let mut machine = Machine::new();
        machine.state.v[0x1] = 0x42;
        let oversized = vec![0xFF; MAX_PROGRAM_SIZE + 1];
        assert_eq!(
            machine.load_program(&oversized),
            Err(Error::ProgramTooLarge {
                len: MAX_PROGRAM_SIZE + 1,
                max: MAX_PROGRAM_SIZE,
            })
        );
        // prior state kept: no reset, no partial copy
        assert_eq!(machine.state.v[0x1], 0x42);
        assert!(machine.state.memory[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_program_accepts_maximum_size() {
        let mut machine = Machine::new();
        let program = vec![0xAB; MAX_PROGRAM_SIZE];
        machine.load_program(&program).unwrap();
        assert_eq!(machine.state.memory[0x200..], program[..]);
    }

    #[test]
    fn test_load_program_implies_reset() {
        let mut machine = Machine::new();
        machine.state.frame_buffer[0][0] = 1;
        machine.state.v[0x3] = 0x99;
        machine.state.sound_timer = 20;
        machine.record(0x00E0);

        machine.load_program(&[0x12, 0x00]).unwrap();
        assert!(machine.state.frame_buffer.iter().flatten().all(|&px| px == 0));
        assert_eq!(machine.state.v[0x3], 0);
        assert_eq!(machine.state.sound_timer, 0);
        assert_eq!(machine.history.len(), 0);
        assert_eq!(machine.state.memory[FONT_OFFSET..FONT_OFFSET + 80], FONT_SET);
    }

    #[test]
    fn test_tick_budgets_integer_steps() {
        let mut machine = Machine::new();
        // a run of 7X01 adds; 700 ips at 60 Hz is exactly 11 steps
        let program: Vec<u8> = (0..16).flat_map(|_| [0x70, 0x01]).collect();
        machine.load_program(&program).unwrap();
        machine.tick(&NO_KEYS, 700).unwrap();
        assert_eq!(machine.state.v[0x0], 11);
        assert_eq!(machine.state.pc, ENTRY_POINT + 22);
    }

    #[test]
    fn test_tick_with_zero_budget_still_updates_timers() {
        let mut machine = Machine::new();
        machine.state.delay_timer = 5;
        machine.state.sound_timer = 3;
        let tick = machine.tick(&NO_KEYS, 0).unwrap();
        assert_eq!(machine.state.pc, ENTRY_POINT);
        assert_eq!(machine.state.delay_timer, 4);
        assert_eq!(machine.state.sound_timer, 2);
        assert!(!tick.beep);
    }

    #[test]
    fn test_tick_beeps_exactly_when_sound_timer_expires() {
        let mut machine = Machine::new();
        machine.state.sound_timer = 2;
        assert!(!machine.tick(&NO_KEYS, 0).unwrap().beep);
        assert!(machine.tick(&NO_KEYS, 0).unwrap().beep);
        assert!(!machine.tick(&NO_KEYS, 0).unwrap().beep);
        assert_eq!(machine.state.sound_timer, 0);
    }

    #[test]
    fn test_tick_reports_redraw_once() {
        let mut machine = Machine::new();
        // 00E0 then jump-to-self
        machine.load_program(&[0x00, 0xE0, 0x12, 0x02]).unwrap();
        let tick = machine.tick(&NO_KEYS, 700).unwrap();
        assert!(tick.redraw);
        let tick = machine.tick(&NO_KEYS, 700).unwrap();
        assert!(!tick.redraw);
    }

    #[test]
    fn test_step_skips_unknown_opcodes() {
        let mut machine = Machine::new();
        machine.load_program(&[0x01, 0x23, 0x61, 0x44]).unwrap();
        machine.step(&NO_KEYS).unwrap();
        assert_eq!(machine.state.pc, ENTRY_POINT + 2);
        machine.step(&NO_KEYS).unwrap();
        assert_eq!(machine.state.v[0x1], 0x44);
    }

    #[test]
    fn test_step_surfaces_stack_underflow() {
        let mut machine = Machine::new();
        machine.load_program(&[0x00, 0xEE]).unwrap();
        assert_eq!(
            machine.step(&NO_KEYS),
            Err(Error::StackUnderflow { pc: ENTRY_POINT })
        );
    }

    #[test]
    fn test_step_surfaces_stack_overflow() {
        let mut machine = Machine::new();
        // 2200: call self forever
        machine.load_program(&[0x22, 0x00]).unwrap();
        for _ in 0..16 {
            machine.step(&NO_KEYS).unwrap();
        }
        assert_eq!(
            machine.step(&NO_KEYS),
            Err(Error::StackOverflow { pc: ENTRY_POINT })
        );
    }

    #[test]
    fn test_wait_key_spins_then_captures_lowest_key() {
        let mut machine = Machine::new();
        machine.load_program(&[0xF1, 0x0A]).unwrap();
        for _ in 0..3 {
            machine.step(&NO_KEYS).unwrap();
            assert_eq!(machine.state.pc, ENTRY_POINT);
        }
        let mut keys = NO_KEYS;
        keys[0xC] = true;
        keys[0x4] = true;
        machine.step(&keys).unwrap();
        assert_eq!(machine.state.pc, ENTRY_POINT + 2);
        assert_eq!(machine.state.v[0x1], 0x4);
    }

    #[test]
    fn test_history_records_executed_opcodes_in_order() {
        let mut machine = Machine::new();
        machine.load_program(&[0x61, 0x05, 0x71, 0x01]).unwrap();
        machine.step(&NO_KEYS).unwrap();
        machine.step(&NO_KEYS).unwrap();
        assert_eq!(machine.history().collect::<Vec<_>>(), vec![0x6105, 0x7101]);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut machine = Machine::new();
        // jump-to-self executes forever without changing state
        machine.load_program(&[0x12, 0x00]).unwrap();
        for _ in 0..HISTORY_CAPACITY + 10 {
            machine.step(&NO_KEYS).unwrap();
        }
        assert_eq!(machine.history().len(), HISTORY_CAPACITY);
    }
}
