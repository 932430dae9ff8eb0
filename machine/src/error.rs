/// Errors surfaced by the machine to its driver.
///
/// `ProgramTooLarge` is recoverable: the load is rejected and prior state is
/// kept. The stack errors are fatal for the running ROM since continuing
/// would corrupt unrelated control flow. `UnknownOpcode` is reported but
/// tolerated during execution; many ROM corpora carry vendor-extension
/// opcodes that an interpreter should skip rather than die on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("program is {len} bytes but only {max} fit above the entry point")]
    ProgramTooLarge { len: usize, max: usize },

    #[error("call stack overflow at {pc:#06X}")]
    StackOverflow { pc: u16 },

    #[error("return with empty call stack at {pc:#06X}")]
    StackUnderflow { pc: u16 },

    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },
}
