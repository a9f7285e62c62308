use thiserror::Error;

/// Errors recognized by the translator core.
///
/// `IllegalInstruction`, `PrivilegedInstruction`, and `AlignmentFault` are
/// guest-visible: a decoder that detects one of these never returns it as
/// an `Err` to its caller — it emits the matching helper-raise sequence
/// inline and sets `is_jmp = NoReturn`. They are still represented here so
/// that the decision of *which* exception to raise is made in one place.
///
/// `BufferFull` is the one variant that actually crosses the IR builder's
/// public `Result`-returning entry points; the translator loop recovers
/// from it locally per its epilogue mapping.
///
/// `FetchFault` is returned by the guest code-fetch collaborator and
/// propagated by abandoning the current TB.
///
/// `HelperArityMismatch`/`HelperTypeMismatch` indicate a bug in a
/// front-end's helper-call site, not a guest-visible condition; per the
/// IR builder's misuse policy these are expected to be treated as fatal
/// in debug builds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TcgError {
    #[error("illegal instruction at pc={pc:#x}")]
    IllegalInstruction { pc: u64 },

    #[error("privileged instruction at pc={pc:#x}")]
    PrivilegedInstruction { pc: u64 },

    #[error("alignment fault at pc={pc:#x}")]
    AlignmentFault { pc: u64 },

    #[error("IR op buffer exhausted")]
    BufferFull,

    #[error("fetch fault at pc={pc:#x}")]
    FetchFault { pc: u64 },

    #[error("helper {name} expected {expected} args, got {got}")]
    HelperArityMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("helper {name} arg {arg} has mismatched type")]
    HelperTypeMismatch { name: &'static str, arg: usize },
}

pub type TcgResult<T> = Result<T, TcgError>;
