pub use crate::error::Error;
pub use crate::instruction::Instruction;
pub use crate::machine::{Machine, TickOutput};
pub use crate::opcode::Opcode;
pub use crate::state::{FrameBuffer, Keypad, State};

pub mod constants;
mod error;
mod execute;
mod instruction;
mod machine;
mod opcode;
mod state;
