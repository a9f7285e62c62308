//! OpenRISC frontend — fixed 32-bit instruction translation with
//! delay-slot branches.
//!
//! Unlike the RISC-V frontend's `decodetree`-generated dispatch, this
//! decoder is hand-written: a two-level match on the 6-bit major opcode
//! (bits 31:26) and, within a handful of major opcodes, a secondary
//! match on a few low bits — mirroring `dec_calc`/`dec_sys`/`dec_logic`
//! style family functions.

pub mod cfg;
pub mod cpu;
mod trans;

use crate::{DisasContextBase, DisasJumpType, TranslatorOps};
pub use cfg::OpenriscCfg;
use cpu::{
    gpr_offset, JMP_PC_OFFSET, MACHI_OFFSET, MACLO_OFFSET, NUM_GPRS, PC_OFFSET, SR_OFFSET,
};
use tcg_core::{Context, TempIdx, Type};

/// Delay-slot state machine (§9 redesign: a state machine, not a bare
/// countdown integer). A branch/jump sets `Branch` after computing its
/// target into the `jmp_pc` global; the *next* instruction decoded is
/// the delay slot, and after it is translated the pending branch is
/// finalized (`jmp_pc` moved into `pc`, TB exited).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayState {
    None,
    Branch,
}

pub struct OpenriscDisasContext {
    pub base: DisasContextBase,
    pub env: TempIdx,
    pub gpr: [TempIdx; NUM_GPRS],
    pub pc: TempIdx,
    pub sr: TempIdx,
    pub jmp_pc: TempIdx,
    /// MAC accumulator halves, used by `l.mac`/`l.msb`/`l.maci`/`l.macrc`.
    pub maclo: TempIdx,
    pub machi: TempIdx,
    pub delay: DelayState,
    pub guest_base: *const u8,
    /// Configured CPU features, gating which undecoded opcodes are
    /// architecturally don't-care vs illegal.
    pub cfg: OpenriscCfg,
}

impl OpenriscDisasContext {
    pub fn new(pc: u64, guest_base: *const u8) -> Self {
        let page_start = pc & !(OpenriscTranslator::PAGE_SIZE - 1);
        Self {
            base: DisasContextBase::new(pc, page_start),
            env: TempIdx(0),
            gpr: [TempIdx(0); NUM_GPRS],
            pc: TempIdx(0),
            sr: TempIdx(0),
            jmp_pc: TempIdx(0),
            maclo: TempIdx(0),
            machi: TempIdx(0),
            delay: DelayState::None,
            guest_base,
            cfg: OpenriscCfg::default(),
        }
    }

    /// Fetch the 32-bit instruction at the current PC.
    ///
    /// # Safety
    /// `guest_base + pc_next` must be a valid, readable, 4-byte aligned
    /// host address (OpenRISC instructions are always word-aligned).
    unsafe fn fetch_insn(&self) -> u32 {
        let ptr = self.guest_base.add(self.base.pc_next as usize) as *const u32;
        ptr.read_unaligned()
    }
}

pub struct OpenriscTranslator;

impl TranslatorOps for OpenriscTranslator {
    type DisasContext = OpenriscDisasContext;

    fn init_disas_context(ctx: &mut OpenriscDisasContext, ir: &mut Context) {
        ctx.env = ir.new_fixed(Type::I64, 5, "env");

        for i in 0..NUM_GPRS {
            ctx.gpr[i] = ir.new_global(Type::I32, ctx.env, gpr_offset(i), "gpr");
        }
        ctx.pc = ir.new_global(Type::I32, ctx.env, PC_OFFSET, "pc");
        ctx.sr = ir.new_global(Type::I32, ctx.env, SR_OFFSET, "sr");
        ctx.jmp_pc = ir.new_global(Type::I32, ctx.env, JMP_PC_OFFSET, "jmp_pc");
        ctx.maclo = ir.new_global(Type::I32, ctx.env, MACLO_OFFSET, "maclo");
        ctx.machi = ir.new_global(Type::I32, ctx.env, MACHI_OFFSET, "machi");
    }

    fn tb_start(_ctx: &mut OpenriscDisasContext, _ir: &mut Context) {}

    fn insn_start(ctx: &mut OpenriscDisasContext, ir: &mut Context) {
        ir.gen_insn_start(ctx.base.pc_next);
    }

    fn translate_insn(ctx: &mut OpenriscDisasContext, ir: &mut Context) {
        let pending_delay_slot = ctx.delay == DelayState::Branch;
        ctx.delay = DelayState::None;

        let insn = unsafe { ctx.fetch_insn() };
        trans::dispatch(ctx, ir, insn);

        ctx.base.pc_next += 4;

        // Only finalize the pending branch if the delay-slot instruction
        // itself fell through normally. An illegal/privileged opcode in
        // the delay slot already emitted its own terminal exit_tb and set
        // is_jmp = NoReturn; that must win, not be overwritten here.
        if pending_delay_slot && ctx.base.is_jmp == DisasJumpType::Next {
            ir.gen_mov(Type::I32, ctx.pc, ctx.jmp_pc);
            ir.gen_exit_tb(0);
            ctx.base.is_jmp = DisasJumpType::Jump;
        }
    }

    fn store_pc(ctx: &mut OpenriscDisasContext, ir: &mut Context, pc: u64) {
        let pc_const = ir.new_const(Type::I32, pc);
        ir.gen_mov(Type::I32, ctx.pc, pc_const);
    }

    fn goto_tb(_ctx: &mut OpenriscDisasContext, ir: &mut Context, slot: u32, _target_pc: u64) {
        ir.gen_goto_tb(slot);
        ir.gen_exit_tb(slot as u64);
    }

    fn base(ctx: &OpenriscDisasContext) -> &DisasContextBase {
        &ctx.base
    }

    fn base_mut(ctx: &mut OpenriscDisasContext) -> &mut DisasContextBase {
        &mut ctx.base
    }
}
