//! OpenRISC per-CPU configuration.
//!
//! Mirrors `riscv::ext::RiscvCfg`'s role: a typed config struct gating
//! which undecoded opcodes are architecturally don't-care vs illegal.
//! OpenRISC has no MISA-style letter extensions; the one optional unit
//! modeled here is the MAC accumulator (`l.mac`/`l.msb`/`l.maci`/
//! `l.macrc`), which real OR1K implementations may omit.

/// Per-CPU OpenRISC configuration.
#[derive(Clone, Copy, Debug)]
pub struct OpenriscCfg {
    /// Whether the 64-bit MAC accumulator unit is present.
    pub has_mac: bool,
}

impl OpenriscCfg {
    /// Default OR1K profile: MAC unit present.
    pub const STANDARD: Self = Self { has_mac: true };
}

impl Default for OpenriscCfg {
    fn default() -> Self {
        Self::STANDARD
    }
}
