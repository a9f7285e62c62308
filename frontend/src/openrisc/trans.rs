//! OpenRISC instruction semantics, grouped the way the original
//! `target-openrisc/translate.c` groups them: one family function per
//! major opcode that needs a secondary sub-opcode match, called from a
//! single top-level dispatch on the 6-bit major opcode (bits 31:26).

use super::cpu::{SR_CY, SR_F, SR_OV, SR_OVE};
use super::OpenriscDisasContext;
use super::OpenriscTranslator;
use crate::{DisasJumpType, TranslatorOps};
use tcg_core::{Cond, Context, Type};

fn field(insn: u32, pos: u32, len: u32) -> u32 {
    (insn >> pos) & ((1u32 << len) - 1)
}

fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = 32 - bits;
    ((val << shift) as i32 >> shift) as i64
}

fn reg(ctx: &OpenriscDisasContext, r: u32) -> tcg_core::TempIdx {
    ctx.gpr[r as usize]
}

/// Top-level dispatch on the major opcode (bits 31:26).
pub fn dispatch(ctx: &mut OpenriscDisasContext, ir: &mut Context, insn: u32) {
    let op0 = field(insn, 26, 6);
    match op0 {
        0x06 => dec_m(ctx, ir, insn),
        0x08 => dec_sys(ctx, ir, insn),
        0x2e => dec_logic(ctx, ir, insn),
        0x2f => dec_compi(ctx, ir, insn),
        0x31 => dec_mac(ctx, ir, insn),
        0x38 => dec_calc(ctx, ir, insn),
        0x39 => dec_comp(ctx, ir, insn),
        _ => dec_misc(ctx, ir, insn),
    }
}

fn illegal(ctx: &mut OpenriscDisasContext, ir: &mut Context) {
    let pc = ctx.base.pc_next;
    OpenriscTranslator::store_pc(ctx, ir, pc);
    ir.gen_exit_tb(3);
    ctx.base.is_jmp = DisasJumpType::NoReturn;
}

fn privileged(ctx: &mut OpenriscDisasContext, ir: &mut Context) {
    let pc = ctx.base.pc_next;
    OpenriscTranslator::store_pc(ctx, ir, pc);
    ir.gen_exit_tb(4);
    ctx.base.is_jmp = DisasJumpType::NoReturn;
}

/// `l.div`/`l.divu`'s exception-on-overflow pattern: when the overflow
/// condition holds, raise `EXCP_RANGE` unless `SR_OVE` is clear, in
/// which case only the flag bits are set and execution continues.
/// Grounded on `original_source/target-openrisc/translate.c` lines
/// ~445-512.
fn gen_range_check(ctx: &mut OpenriscDisasContext, ir: &mut Context) {
    let sr_ove = ir.new_const(Type::I32, SR_OVE as u64);
    let flags = ir.new_const(Type::I32, (SR_OV | SR_CY) as u64);
    let new_sr = ir.new_temp(Type::I32);
    ir.gen_or(Type::I32, new_sr, ctx.sr, flags);
    ir.gen_mov(Type::I32, ctx.sr, new_sr);

    let masked = ir.new_temp(Type::I32);
    ir.gen_and(Type::I32, masked, ctx.sr, sr_ove);
    let skip = ir.new_label();
    ir.gen_brcond(Type::I32, masked, sr_ove, Cond::Ne, skip);
    let pc = ctx.base.pc_next;
    OpenriscTranslator::store_pc(ctx, ir, pc);
    ir.gen_exit_tb(5);
    ir.gen_set_label(skip);
}

// ---------------------------------------------------------------
// dec_calc — major opcode 0x38: register-register ALU, mul, div
// ---------------------------------------------------------------

fn dec_calc(ctx: &mut OpenriscDisasContext, ir: &mut Context, insn: u32) {
    let op0 = field(insn, 0, 4);
    let op1 = field(insn, 8, 2);
    let ra = field(insn, 16, 5);
    let rb = field(insn, 11, 5);
    let rd = field(insn, 21, 5);

    match op0 {
        0x0 if op1 == 0 => {
            // l.add
            let d = reg(ctx, rd);
            let a = reg(ctx, ra);
            let b = reg(ctx, rb);
            ir.gen_add(Type::I32, d, a, b);
        }
        0x2 if op1 == 0 => {
            // l.sub
            let d = reg(ctx, rd);
            let a = reg(ctx, ra);
            let b = reg(ctx, rb);
            ir.gen_sub(Type::I32, d, a, b);
        }
        0x3 if op1 == 0 => {
            // l.and
            let d = reg(ctx, rd);
            let a = reg(ctx, ra);
            let b = reg(ctx, rb);
            ir.gen_and(Type::I32, d, a, b);
        }
        0x4 if op1 == 0 => {
            // l.or
            let d = reg(ctx, rd);
            let a = reg(ctx, ra);
            let b = reg(ctx, rb);
            ir.gen_or(Type::I32, d, a, b);
        }
        0x5 if op1 == 0 => {
            // l.xor
            let d = reg(ctx, rd);
            let a = reg(ctx, ra);
            let b = reg(ctx, rb);
            ir.gen_xor(Type::I32, d, a, b);
        }
        0x6 if op1 == 3 => {
            // l.mul
            let d = reg(ctx, rd);
            let a = reg(ctx, ra);
            let b = reg(ctx, rb);
            ir.gen_mul(Type::I32, d, a, b);
        }
        0x9 if op1 == 3 => gen_div(ctx, ir, rd, ra, rb),
        0xa if op1 == 3 => gen_divu(ctx, ir, rd, ra, rb),
        0x8 => {
            // Shift-register family, secondary select in bits 7:6.
            let op2 = field(insn, 6, 2);
            let d = reg(ctx, rd);
            let a = reg(ctx, ra);
            let b = reg(ctx, rb);
            match op2 {
                0x0 => {
                    ir.gen_shl(Type::I32, d, a, b);
                }
                0x1 => {
                    ir.gen_shr(Type::I32, d, a, b);
                }
                0x2 => {
                    ir.gen_sar(Type::I32, d, a, b);
                }
                0x3 => {
                    ir.gen_rotr(Type::I32, d, a, b);
                }
                _ => illegal(ctx, ir),
            }
        }
        _ => illegal(ctx, ir),
    }
}

/// `l.div`: signed overflow is `INT_MIN / -1` or divide-by-zero; both
/// route through the `SR_OVE`-gated exception path instead of the host
/// trapping.
fn gen_div(ctx: &mut OpenriscDisasContext, ir: &mut Context, rd: u32, ra: u32, rb: u32) {
    let a = reg(ctx, ra);
    let b = reg(ctx, rb);
    let zero = ir.new_const(Type::I32, 0);
    let int_min = ir.new_const(Type::I32, 0x8000_0000);
    let neg_one = ir.new_const(Type::I32, 0xffff_ffff);

    let is_zero = ir.new_temp(Type::I32);
    ir.gen_setcond(Type::I32, is_zero, b, zero, Cond::Eq);
    let is_min = ir.new_temp(Type::I32);
    ir.gen_setcond(Type::I32, is_min, a, int_min, Cond::Eq);
    let is_neg1 = ir.new_temp(Type::I32);
    ir.gen_setcond(Type::I32, is_neg1, b, neg_one, Cond::Eq);
    let min_overflow = ir.new_temp(Type::I32);
    ir.gen_and(Type::I32, min_overflow, is_min, is_neg1);
    let overflow = ir.new_temp(Type::I32);
    ir.gen_or(Type::I32, overflow, is_zero, min_overflow);

    let do_div = ir.new_label();
    let done = ir.new_label();
    ir.gen_brcond(Type::I32, overflow, zero, Cond::Eq, do_div);
    gen_range_check(ctx, ir);
    ir.gen_br(done);
    ir.gen_set_label(do_div);
    let d = reg(ctx, rd);
    ir.gen_divs(Type::I32, d, a, b);
    ir.gen_set_label(done);
}

fn gen_divu(ctx: &mut OpenriscDisasContext, ir: &mut Context, rd: u32, ra: u32, rb: u32) {
    let a = reg(ctx, ra);
    let b = reg(ctx, rb);
    let zero = ir.new_const(Type::I32, 0);

    let is_zero = ir.new_temp(Type::I32);
    ir.gen_setcond(Type::I32, is_zero, b, zero, Cond::Eq);

    let do_div = ir.new_label();
    let done = ir.new_label();
    ir.gen_brcond(Type::I32, is_zero, zero, Cond::Eq, do_div);
    gen_range_check(ctx, ir);
    ir.gen_br(done);
    ir.gen_set_label(do_div);
    let d = reg(ctx, rd);
    ir.gen_divu(Type::I32, d, a, b);
    ir.gen_set_label(done);
}

// ---------------------------------------------------------------
// dec_logic — major opcode 0x2e: shift-immediate
// ---------------------------------------------------------------

fn dec_logic(ctx: &mut OpenriscDisasContext, ir: &mut Context, insn: u32) {
    let op0 = field(insn, 6, 2);
    let ra = field(insn, 16, 5);
    let rd = field(insn, 21, 5);
    let l5 = field(insn, 0, 5);

    let a = reg(ctx, ra);
    let shamt = ir.new_const(Type::I32, l5 as u64);
    let d = reg(ctx, rd);
    match op0 {
        0x0 => {
            ir.gen_shl(Type::I32, d, a, shamt);
        }
        0x1 => {
            ir.gen_shr(Type::I32, d, a, shamt);
        }
        0x2 => {
            ir.gen_sar(Type::I32, d, a, shamt);
        }
        0x3 => {
            ir.gen_rotr(Type::I32, d, a, shamt);
        }
        _ => illegal(ctx, ir),
    }
}

// ---------------------------------------------------------------
// dec_comp — major opcode 0x39: register-register set-flag compares
// ---------------------------------------------------------------

fn dec_comp(ctx: &mut OpenriscDisasContext, ir: &mut Context, insn: u32) {
    let op0 = field(insn, 21, 5);
    let ra = field(insn, 16, 5);
    let rb = field(insn, 11, 5);
    let cond = match op0 {
        0x0 => Cond::Eq,
        0x1 => Cond::Ne,
        0x2 => Cond::Gtu,
        0x3 => Cond::Geu,
        0x4 => Cond::Ltu,
        0x5 => Cond::Leu,
        0xa => Cond::Gt,
        0xb => Cond::Ge,
        0xc => Cond::Lt,
        0xd => Cond::Le,
        _ => {
            illegal(ctx, ir);
            return;
        }
    };
    gen_set_flag(ctx, ir, reg(ctx, ra), reg(ctx, rb), cond);
}

fn dec_compi(ctx: &mut OpenriscDisasContext, ir: &mut Context, insn: u32) {
    let op0 = field(insn, 21, 5);
    let ra = field(insn, 16, 5);
    let imm = sign_extend(field(insn, 0, 16), 16);
    let cond = match op0 {
        0x0 => Cond::Eq,
        0x1 => Cond::Ne,
        0x2 => Cond::Gtu,
        0x3 => Cond::Geu,
        0x4 => Cond::Ltu,
        0x5 => Cond::Leu,
        0xa => Cond::Gt,
        0xb => Cond::Ge,
        0xc => Cond::Lt,
        0xd => Cond::Le,
        _ => {
            illegal(ctx, ir);
            return;
        }
    };
    let b = ir.new_const(Type::I32, imm as u64);
    gen_set_flag(ctx, ir, reg(ctx, ra), b, cond);
}

fn gen_set_flag(
    ctx: &mut OpenriscDisasContext,
    ir: &mut Context,
    a: tcg_core::TempIdx,
    b: tcg_core::TempIdx,
    cond: Cond,
) {
    let flag = ir.new_temp(Type::I32);
    ir.gen_setcond(Type::I32, flag, a, b, cond);

    let sr_f = ir.new_const(Type::I32, SR_F as u64);
    let not_f = ir.new_const(Type::I32, !SR_F as u64);
    let cleared = ir.new_temp(Type::I32);
    ir.gen_and(Type::I32, cleared, ctx.sr, not_f);

    let bit = ir.new_temp(Type::I32);
    ir.gen_mul(Type::I32, bit, flag, sr_f);
    let new_sr = ir.new_temp(Type::I32);
    ir.gen_or(Type::I32, new_sr, cleared, bit);
    ir.gen_mov(Type::I32, ctx.sr, new_sr);
}

// ---------------------------------------------------------------
// dec_m — major opcode 0x06: l.movhi
// ---------------------------------------------------------------

fn dec_m(ctx: &mut OpenriscDisasContext, ir: &mut Context, insn: u32) {
    let op0 = field(insn, 16, 1);
    let rd = field(insn, 21, 5);
    match op0 {
        0x0 => {
            // l.movhi
            let k16 = field(insn, 0, 16);
            let c = ir.new_const(Type::I32, (k16 as u64) << 16);
            let d = reg(ctx, rd);
            ir.gen_mov(Type::I32, d, c);
        }
        0x1 => {
            // l.macrc: read back the accumulator, then clear it.
            if !ctx.cfg.has_mac {
                illegal(ctx, ir);
                return;
            }
            let d = reg(ctx, rd);
            ir.gen_mov(Type::I32, d, ctx.maclo);
            let zero = ir.new_const(Type::I32, 0);
            ir.gen_mov(Type::I32, ctx.maclo, zero);
            ir.gen_mov(Type::I32, ctx.machi, zero);
        }
        _ => illegal(ctx, ir),
    }
}

// ---------------------------------------------------------------
// dec_mac — major opcode 0x31: l.mac / l.msb (64-bit accumulate)
// ---------------------------------------------------------------

fn dec_mac(ctx: &mut OpenriscDisasContext, ir: &mut Context, insn: u32) {
    if !ctx.cfg.has_mac {
        illegal(ctx, ir);
        return;
    }
    let op0 = field(insn, 0, 4);
    let ra = field(insn, 16, 5);
    let rb = field(insn, 11, 5);
    match op0 {
        0x1 => gen_mac(ctx, ir, reg(ctx, ra), reg(ctx, rb), false), // l.mac
        0x2 => gen_mac(ctx, ir, reg(ctx, ra), reg(ctx, rb), true),  // l.msb
        _ => illegal(ctx, ir),
    }
}

/// `l.mac`/`l.msb`/`l.maci`: accumulate (or subtract) a 32x32 product into
/// the 64-bit `{machi, maclo}` accumulator. The high word is always
/// recovered via a literal `>> 32` on the 64-bit sum, preserved as-is from
/// `original_source/target-openrisc/translate.c`'s `dec_mac`/`l.maci`
/// bodies rather than normalized to a fixed bit-count constant.
fn gen_mac(ctx: &mut OpenriscDisasContext, ir: &mut Context, a: tcg_core::TempIdx, b: tcg_core::TempIdx, sub: bool) {
    let prod32 = ir.new_temp(Type::I32);
    ir.gen_mul(Type::I32, prod32, a, b);
    let prod64 = ir.new_temp(Type::I64);
    ir.gen_ext_i32_i64(prod64, prod32);

    let lo_ext = ir.new_temp(Type::I64);
    ir.gen_ext_u32_i64(lo_ext, ctx.maclo);
    let hi_ext = ir.new_temp(Type::I64);
    ir.gen_ext_u32_i64(hi_ext, ctx.machi);
    let shift32 = ir.new_const(Type::I64, 32);
    let hi_shifted = ir.new_temp(Type::I64);
    ir.gen_shl(Type::I64, hi_shifted, hi_ext, shift32);
    let acc = ir.new_temp(Type::I64);
    ir.gen_or(Type::I64, acc, hi_shifted, lo_ext);

    let new_acc = ir.new_temp(Type::I64);
    if sub {
        ir.gen_sub(Type::I64, new_acc, acc, prod64);
    } else {
        ir.gen_add(Type::I64, new_acc, acc, prod64);
    }

    let lo32 = ir.new_temp(Type::I32);
    ir.gen_extrl_i64_i32(lo32, new_acc);
    ir.gen_mov(Type::I32, ctx.maclo, lo32);

    let hi64 = ir.new_temp(Type::I64);
    ir.gen_shr(Type::I64, hi64, new_acc, shift32); // literal >> 32
    let hi32 = ir.new_temp(Type::I32);
    ir.gen_extrl_i64_i32(hi32, hi64);
    ir.gen_mov(Type::I32, ctx.machi, hi32);
}

// ---------------------------------------------------------------
// dec_sys — major opcode 0x08: l.sys / l.trap
// ---------------------------------------------------------------

fn dec_sys(ctx: &mut OpenriscDisasContext, ir: &mut Context, insn: u32) {
    let k16 = field(insn, 0, 16);
    let pc = ctx.base.pc_next;
    match k16 {
        0x000 => {
            // l.sys
            OpenriscTranslator::store_pc(ctx, ir, pc);
            ir.gen_exit_tb(1);
            ctx.base.is_jmp = DisasJumpType::NoReturn;
        }
        0x100 => {
            // l.trap
            OpenriscTranslator::store_pc(ctx, ir, pc);
            ir.gen_exit_tb(2);
            ctx.base.is_jmp = DisasJumpType::NoReturn;
        }
        _ => illegal(ctx, ir),
    }
}

// ---------------------------------------------------------------
// dec_misc — everything else: jumps/branches, loads, stores,
// register-immediate ALU.
// ---------------------------------------------------------------

fn dec_misc(ctx: &mut OpenriscDisasContext, ir: &mut Context, insn: u32) {
    let op0 = field(insn, 26, 6);
    let ra = field(insn, 16, 5);
    let rb = field(insn, 11, 5);
    let rd = field(insn, 21, 5);
    let i16v = sign_extend(field(insn, 0, 16), 16);
    let u16v = field(insn, 0, 16) as u64;
    let n26 = sign_extend(field(insn, 0, 26), 26);

    match op0 {
        0x00 => gen_jump_direct(ctx, ir, n26 << 2, false), // l.j
        0x01 => gen_jump_direct(ctx, ir, n26 << 2, true),  // l.jal
        0x03 => gen_jump_cond(ctx, ir, n26 << 2, false),   // l.bnf
        0x04 => gen_jump_cond(ctx, ir, n26 << 2, true),    // l.bf
        0x05 => {
            let op1 = field(insn, 24, 2);
            if op1 != 1 {
                // anything but l.nop is unimplemented in this subset
                illegal(ctx, ir);
            }
        }
        0x11 => gen_jump_reg(ctx, ir, rb, false), // l.jr
        0x12 => gen_jump_reg(ctx, ir, rb, true),  // l.jalr

        0x13 => {
            // l.maci: accumulate ra * sign-extend(split-immediate).
            if !ctx.cfg.has_mac {
                illegal(ctx, ir);
            } else {
                let imm = i16v_from_split(insn);
                let c = ir.new_const(Type::I32, imm as u64);
                gen_mac(ctx, ir, reg(ctx, ra), c, false);
            }
        }

        0x09 => privileged(ctx, ir),  // l.rfe: supervisor-only
        0x30 => privileged(ctx, ir),  // l.mtspr: supervisor-only

        0x21 => gen_load(ctx, ir, rd, ra, i16v, tcg_core::MemOp::ul()), // l.lwz
        0x22 => gen_load(ctx, ir, rd, ra, i16v, tcg_core::MemOp::sl()), // l.lws
        0x23 => gen_load(ctx, ir, rd, ra, i16v, tcg_core::MemOp::ub()), // l.lbz
        0x24 => gen_load(ctx, ir, rd, ra, i16v, tcg_core::MemOp::sb()), // l.lbs
        0x25 => gen_load(ctx, ir, rd, ra, i16v, tcg_core::MemOp::uw()), // l.lhz
        0x26 => gen_load(ctx, ir, rd, ra, i16v, tcg_core::MemOp::sw()), // l.lhs

        0x27 => {
            // l.addi (simplified: no SR_OVE overflow ladder)
            let a = reg(ctx, ra);
            let imm = ir.new_const(Type::I32, i16v as u64);
            let d = reg(ctx, rd);
            ir.gen_add(Type::I32, d, a, imm);
        }
        0x29 => {
            // l.andi
            let a = reg(ctx, ra);
            let imm = ir.new_const(Type::I32, u16v);
            let d = reg(ctx, rd);
            ir.gen_and(Type::I32, d, a, imm);
        }
        0x2a => {
            // l.ori
            let a = reg(ctx, ra);
            let imm = ir.new_const(Type::I32, u16v);
            let d = reg(ctx, rd);
            ir.gen_or(Type::I32, d, a, imm);
        }
        0x2b => {
            // l.xori
            let a = reg(ctx, ra);
            let imm = ir.new_const(Type::I32, i16v as u64);
            let d = reg(ctx, rd);
            ir.gen_xor(Type::I32, d, a, imm);
        }

        0x35 => gen_store(ctx, ir, ra, rb, i16v_from_split(insn), tcg_core::MemOp::ul()), // l.sw
        0x36 => gen_store(ctx, ir, ra, rb, i16v_from_split(insn), tcg_core::MemOp::ub()), // l.sb
        0x37 => gen_store(ctx, ir, ra, rb, i16v_from_split(insn), tcg_core::MemOp::uw()), // l.sh

        _ => illegal(ctx, ir),
    }
}

/// OpenRISC store immediates are split across two non-contiguous
/// fields (`rd`-position high bits, low 11 bits) since `rd` is repurposed
/// to hold immediate bits in S-type encodings.
fn i16v_from_split(insn: u32) -> i64 {
    let hi = field(insn, 21, 5);
    let lo = field(insn, 0, 11);
    sign_extend((hi << 11) | lo, 16)
}

fn gen_load(
    ctx: &mut OpenriscDisasContext,
    ir: &mut Context,
    rd: u32,
    ra: u32,
    imm: i64,
    memop: tcg_core::MemOp,
) {
    let base = reg(ctx, ra);
    let off = ir.new_const(Type::I32, imm as u64);
    let addr = ir.new_temp(Type::I32);
    ir.gen_add(Type::I32, addr, base, off);
    let d = reg(ctx, rd);
    ir.gen_qemu_ld(Type::I32, d, addr, memop.bits() as u32);
}

fn gen_store(
    ctx: &mut OpenriscDisasContext,
    ir: &mut Context,
    ra: u32,
    rb: u32,
    imm: i64,
    memop: tcg_core::MemOp,
) {
    let base = reg(ctx, ra);
    let off = ir.new_const(Type::I32, imm as u64);
    let addr = ir.new_temp(Type::I32);
    ir.gen_add(Type::I32, addr, base, off);
    let val = reg(ctx, rb);
    ir.gen_qemu_st(Type::I32, val, addr, memop.bits() as u32);
}

/// Link register for `l.jal`/`l.jalr` is always r9, matching the OR1K ABI.
const LINK_REG: u32 = 9;

fn gen_jump_direct(ctx: &mut OpenriscDisasContext, ir: &mut Context, disp: i64, link: bool) {
    if link {
        let link_pc = ctx.base.pc_next + 8;
        let c = ir.new_const(Type::I32, link_pc);
        let d = reg(ctx, LINK_REG);
        ir.gen_mov(Type::I32, d, c);
    }
    let target = (ctx.base.pc_next as i64).wrapping_add(disp) as u64;
    let c = ir.new_const(Type::I32, target);
    ir.gen_mov(Type::I32, ctx.jmp_pc, c);
    ctx.delay = super::DelayState::Branch;
}

fn gen_jump_reg(ctx: &mut OpenriscDisasContext, ir: &mut Context, rb: u32, link: bool) {
    if link {
        let link_pc = ctx.base.pc_next + 8;
        let c = ir.new_const(Type::I32, link_pc);
        let d = reg(ctx, LINK_REG);
        ir.gen_mov(Type::I32, d, c);
    }
    let target = reg(ctx, rb);
    ir.gen_mov(Type::I32, ctx.jmp_pc, target);
    ctx.delay = super::DelayState::Branch;
}

/// `l.bf`/`l.bnf`: both arms pre-compute a `jmp_pc` value (fallthrough
/// by default, overwritten with the branch target when taken), so the
/// delay-slot finalizer in `translate_insn` always has a valid target
/// regardless of which way the branch went.
fn gen_jump_cond(ctx: &mut OpenriscDisasContext, ir: &mut Context, disp: i64, branch_if_set: bool) {
    let fallthrough = ctx.base.pc_next + 8;
    let c = ir.new_const(Type::I32, fallthrough);
    ir.gen_mov(Type::I32, ctx.jmp_pc, c);

    let sr_f = ir.new_const(Type::I32, SR_F as u64);
    let flag = ir.new_temp(Type::I32);
    ir.gen_and(Type::I32, flag, ctx.sr, sr_f);

    let skip = ir.new_label();
    let cond = if branch_if_set { Cond::Ne } else { Cond::Eq };
    ir.gen_brcond(Type::I32, flag, sr_f, cond, skip);

    let target = (ctx.base.pc_next as i64).wrapping_add(disp) as u64;
    let tc = ir.new_const(Type::I32, target);
    ir.gen_mov(Type::I32, ctx.jmp_pc, tc);
    ir.gen_set_label(skip);

    ctx.delay = super::DelayState::Branch;
}
