pub mod binding;
pub mod breakpoint;
pub mod context;
pub mod dump;
pub mod error;
pub mod helper;
pub mod ir_builder;
pub mod label;
pub mod op;
pub mod opcode;
pub mod tb;
pub mod temp;
pub mod types;
pub mod unwind;

pub use binding::{Bindings, Global};
pub use breakpoint::{check_breakpoint, BreakpointHit, Breakpoints};
pub use context::Context;
pub use error::{TcgError, TcgResult};
pub use helper::{HelperDesc, HelperFlags, HelperSig, HelperTable};
pub use label::Label;
pub use op::{LifeData, Op, OpIdx, MAX_OP_ARGS};
pub use opcode::{OpDef, OpFlags, Opcode, OPCODE_DEFS};
pub use tb::{JumpCache, TranslationBlock, TB_HASH_SIZE, TB_JMP_CACHE_SIZE};
pub use temp::{Temp, TempIdx, TempKind};
pub use types::{Cond, MemOp, RegSet, TempVal, Type};
pub use unwind::{check_prefix_alignment, UnwindEntry, UnwindTable};
