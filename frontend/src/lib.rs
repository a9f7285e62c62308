//! TCG Frontend — guest instruction decoding and IR generation.
//!
//! Provides the generic translation framework (`TranslatorOps` trait
//! and `translator_loop`) plus architecture-specific decoders.

pub mod openrisc;
pub mod riscv;

use tcg_core::context::MAX_INSNS;
use tcg_core::{Breakpoints, Context};

// ---------------------------------------------------------------
// Generic translation framework
// ---------------------------------------------------------------

/// TB termination reason set by `translate_insn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisasJumpType {
    /// Continue to the next sequential instruction.
    Next,
    /// Reached the maximum number of instructions per TB, or the IR
    /// buffer ran nearly full, or a page boundary was crossed.
    TooMany,
    /// Unconditional branch / exit — no fall-through; further IR in
    /// this instruction is unreachable.
    NoReturn,
    /// Indirect branch: the decoder already stored the computed PC into
    /// the PC global and emitted `exit_tb(0)`.
    Jump,
    /// Single-step is enabled: the epilogue stores `pc_next` and raises
    /// the architecture's DEBUG exception helper instead of a plain
    /// `exit_tb`.
    Update,
    /// The decoder already emitted a `goto_tb` terminator itself.
    TBJump,
    /// ISA-specific terminator variant, not covered by the above.
    /// Front-ends that use this are responsible for emitting their own
    /// epilogue tail in `tb_stop`; the generic loop treats it like
    /// `NoReturn` (no further ops are emitted on its behalf).
    Target(u8),
}

/// Base context shared by all guest architectures.
///
/// Mirrors QEMU's `DisasContextBase`.
pub struct DisasContextBase {
    /// PC of the first instruction in this TB.
    pub pc_first: u64,
    /// PC of the *next* instruction to decode.
    pub pc_next: u64,
    /// How the current instruction terminates.
    pub is_jmp: DisasJumpType,
    /// Number of guest instructions translated so far.
    pub num_insns: u32,
    /// Maximum instructions allowed in one TB.
    pub max_insns: u32,

    /// Single-step (debug) mode: the TB must contain exactly one guest
    /// instruction and end in an `Update` epilogue.
    pub singlestep_enabled: bool,
    /// Instrumentation (plugin) hooks are active for this TB.
    pub plugin_enabled: bool,
    /// ISA-feature bitmask (e.g. hardware-divide present), meaning is
    /// entirely front-end-defined.
    pub isa_features: u64,
    /// Guest privilege level / ring the TB was entered at.
    pub privilege: u32,
    /// Guest memory endianness for this TB.
    pub big_endian: bool,
    /// Delay-slot countdown for delay-slot ISAs: `None` outside a delay
    /// slot, `Some(1)` while decoding the instruction in the slot.
    pub delay_slot: Option<u32>,
    /// Shadow copy of a flags/condition-code global not yet committed to
    /// CPU state (used by ISAs that defer flag materialization).
    pub flag_sync_shadow: u64,
    /// Highest register-window index touched so far in this TB (Xtensa
    /// style lazily-emitted window-check elision).
    pub window_high_water: u32,
    /// First guest page this TB started on, for the page-crossing check.
    pub page_start: u64,
}

impl DisasContextBase {
    pub fn new(pc: u64, page_start: u64) -> Self {
        Self {
            pc_first: pc,
            pc_next: pc,
            is_jmp: DisasJumpType::Next,
            num_insns: 0,
            max_insns: MAX_INSNS as u32,
            singlestep_enabled: false,
            plugin_enabled: false,
            isa_features: 0,
            privilege: 0,
            big_endian: false,
            delay_slot: None,
            flag_sync_shadow: 0,
            window_high_water: 0,
            page_start,
        }
    }

    /// True on the very first instruction of the TB (page-crossing check
    /// is suppressed for it, per §4.F tie-break).
    pub fn is_first_insn(&self) -> bool {
        self.num_insns == 0
    }
}

/// Per-architecture translation operations.
///
/// Mirrors QEMU's `TranslatorOps` vtable.
pub trait TranslatorOps {
    /// Architecture-specific disassembly context.
    type DisasContext;

    /// Guest page size in bytes, used for the page-crossing check.
    const PAGE_SIZE: u64 = 4096;

    /// One-time setup before the translation loop (register bindings).
    fn init_disas_context(ctx: &mut Self::DisasContext, ir: &mut Context);

    /// Called once at the start of the TB (after init).
    fn tb_start(ctx: &mut Self::DisasContext, ir: &mut Context);

    /// Emit `insn_start` marker for the current guest PC.
    fn insn_start(ctx: &mut Self::DisasContext, ir: &mut Context);

    /// Decode and translate one guest instruction.
    ///
    /// Must advance `base().pc_next` and set `base().is_jmp`
    /// when the instruction terminates the TB.
    fn translate_insn(ctx: &mut Self::DisasContext, ir: &mut Context);

    /// Emit TB epilogue tail specific to this architecture (e.g. a
    /// `Target(n)` terminator). Called before the generic epilogue map.
    /// Default: nothing extra.
    fn tb_stop(_ctx: &mut Self::DisasContext, _ir: &mut Context) {}

    /// Whether `goto_tb` may currently be used: same guest page as TB
    /// start and single-step not enabled (§4.E "Goto-TB eligibility").
    fn goto_tb_eligible(ctx: &Self::DisasContext, target_pc: u64) -> bool {
        let base = Self::base(ctx);
        !base.singlestep_enabled
            && target_pc / Self::PAGE_SIZE == base.page_start / Self::PAGE_SIZE
    }

    /// Store `pc_next` into the PC global. Called by the generic
    /// epilogue before `goto_tb`/`exit_tb` for the `Next`/`TooMany`/
    /// `Update` cases.
    fn store_pc(ctx: &mut Self::DisasContext, ir: &mut Context, pc: u64);

    /// Emit a `goto_tb(slot)` to `target_pc`, called only when
    /// `goto_tb_eligible` held.
    fn goto_tb(ctx: &mut Self::DisasContext, ir: &mut Context, slot: u32, target_pc: u64);

    /// Emit the debug-exception helper call used by `check_breakpoint`'s
    /// hit sequence (`raise_helper(DEBUG)`). Default: a bare `exit_tb`,
    /// since the concrete `DEBUG` exception helper is architecture-owned.
    fn raise_debug(ctx: &mut Self::DisasContext, ir: &mut Context) {
        let _ = ctx;
        ir.gen_exit_tb(0);
    }

    /// Access the base context embedded in the arch context.
    fn base(ctx: &Self::DisasContext) -> &DisasContextBase;

    /// Mutable access to the base context.
    fn base_mut(ctx: &mut Self::DisasContext) -> &mut DisasContextBase;
}

/// Generic translation loop — drives the decode → translate
/// cycle.
///
/// Mirrors QEMU's `translator_loop()` in `accel/tcg/translator.c`. Takes
/// a breakpoint snapshot once, before the first instruction, per §5's
/// ownership note.
pub fn translator_loop<T: TranslatorOps>(
    ctx: &mut T::DisasContext,
    ir: &mut Context,
    breakpoints: &Breakpoints,
    icount: bool,
) {
    T::init_disas_context(ctx, ir);
    T::tb_start(ctx, ir);

    loop {
        let base = T::base(ctx);
        let pc_next = base.pc_next;
        let is_first = base.is_first_insn();
        let num_insns = base.num_insns;
        let max_insns = base.max_insns;

        if icount && num_insns + 1 == max_insns {
            ir.gen_io_start();
        }

        if tcg_core::check_breakpoint(breakpoints, pc_next)
            == tcg_core::BreakpointHit::Hit
        {
            // Already fully terminal (store_pc + raise_debug emitted
            // here); NoReturn tells the epilogue not to reprocess it.
            T::store_pc(ctx, ir, pc_next);
            T::raise_debug(ctx, ir);
            T::base_mut(ctx).is_jmp = DisasJumpType::NoReturn;
            break;
        }

        T::insn_start(ctx, ir);
        T::translate_insn(ctx, ir);
        T::base_mut(ctx).num_insns += 1;

        let base = T::base(ctx);
        if base.is_jmp != DisasJumpType::Next {
            break;
        }
        if base.num_insns >= base.max_insns {
            T::base_mut(ctx).is_jmp = DisasJumpType::TooMany;
            break;
        }
        if base.singlestep_enabled {
            T::base_mut(ctx).is_jmp = DisasJumpType::Update;
            break;
        }
        if !is_first && base.pc_next / T::PAGE_SIZE != base.page_start / T::PAGE_SIZE
        {
            T::base_mut(ctx).is_jmp = DisasJumpType::TooMany;
            break;
        }
        if ir.is_nearly_full() {
            T::base_mut(ctx).is_jmp = DisasJumpType::TooMany;
            break;
        }
    }

    T::tb_stop(ctx, ir);
    emit_epilogue::<T>(ctx, ir);
}

fn emit_epilogue<T: TranslatorOps>(ctx: &mut T::DisasContext, ir: &mut Context) {
    let is_jmp = T::base(ctx).is_jmp;
    match is_jmp {
        DisasJumpType::Next | DisasJumpType::TooMany => {
            let pc_next = T::base(ctx).pc_next;
            T::store_pc(ctx, ir, pc_next);
            let slot = if is_jmp == DisasJumpType::Next { 1 } else { 0 };
            if T::goto_tb_eligible(ctx, pc_next) {
                T::goto_tb(ctx, ir, slot, pc_next);
            } else {
                ir.gen_exit_tb(0);
            }
        }
        DisasJumpType::Jump => {
            ir.gen_exit_tb(0);
        }
        DisasJumpType::Update => {
            // Single-step: store the PC then raise the DEBUG exception
            // helper (spec.md §4.F/§8 scenario 6), not a bare exit_tb.
            let pc_next = T::base(ctx).pc_next;
            T::store_pc(ctx, ir, pc_next);
            T::raise_debug(ctx, ir);
        }
        DisasJumpType::TBJump | DisasJumpType::NoReturn | DisasJumpType::Target(_) => {}
    }
}
