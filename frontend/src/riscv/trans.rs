//! RISC-V instruction translation: lowers each decoded RV32I/RV64I/M
//! instruction (plus a curated RVC subset) to TCG IR.

use super::insn_decode::decode16_impl::{
    ArgsCa, ArgsCbAndi, ArgsCbShift, ArgsCi, ArgsCiLui, ArgsCjr, ArgsCr,
    ArgsEmpty as ArgsEmptyC,
};
use super::insn_decode::*;
use super::RiscvDisasContext;
use crate::{DisasJumpType, TranslatorOps};
use tcg_core::{Cond, Context, MemOp, TempIdx, Type};

// -- Register access helpers --
//
// x0 reads as zero and writes to it are discarded, matching the RISC-V
// hard-wired-zero register convention; there is no IR global for it.

fn read_reg(ctx: &RiscvDisasContext, ir: &mut Context, reg: i64) -> TempIdx {
    if reg == 0 {
        ir.new_const(Type::I64, 0)
    } else {
        ctx.gpr[reg as usize]
    }
}

fn dest_gpr(ctx: &RiscvDisasContext, ir: &mut Context, reg: i64) -> TempIdx {
    if reg == 0 {
        ir.new_temp(Type::I64)
    } else {
        ctx.gpr[reg as usize]
    }
}

fn write_reg(ctx: &mut RiscvDisasContext, ir: &mut Context, reg: i64, val: TempIdx) {
    if reg != 0 {
        ir.gen_mov(Type::I64, ctx.gpr[reg as usize], val);
    }
}

/// Narrow a 64-bit result to its low 32 bits, sign-extended back to 64,
/// for the RV64 `*w` instruction forms.
fn narrow_w(ir: &mut Context, d: TempIdx, wide: TempIdx) {
    let lo = ir.new_temp(Type::I32);
    ir.gen_extrl_i64_i32(lo, wide);
    ir.gen_ext_i32_i64(d, lo);
}

fn gen_load(ctx: &mut RiscvDisasContext, ir: &mut Context, a: &ArgsI, memop: MemOp) -> bool {
    let base = read_reg(ctx, ir, a.rs1);
    let imm = ir.new_const(Type::I64, a.imm as u64);
    let addr = ir.new_temp(Type::I64);
    ir.gen_add(Type::I64, addr, base, imm);
    let d = dest_gpr(ctx, ir, a.rd);
    ir.gen_qemu_ld(Type::I64, d, addr, memop.bits() as u32);
    true
}

fn gen_store(ctx: &mut RiscvDisasContext, ir: &mut Context, a: &ArgsS, memop: MemOp) -> bool {
    let base = read_reg(ctx, ir, a.rs1);
    let imm = ir.new_const(Type::I64, a.imm as u64);
    let addr = ir.new_temp(Type::I64);
    ir.gen_add(Type::I64, addr, base, imm);
    let val = read_reg(ctx, ir, a.rs2);
    ir.gen_qemu_st(Type::I64, val, addr, memop.bits() as u32);
    true
}

/// Conditional branch: terminates the TB from within the instruction
/// itself (both arms emit their own `goto_tb`/`exit_tb`), so the
/// generic epilogue has nothing left to do (`NoReturn`).
fn gen_branch(
    ctx: &mut RiscvDisasContext,
    ir: &mut Context,
    cond: Cond,
    rs1: i64,
    rs2: i64,
    imm: i64,
) -> bool {
    let a = read_reg(ctx, ir, rs1);
    let b = read_reg(ctx, ir, rs2);
    let pc_cur = ctx.base.pc_next;
    let target = (pc_cur as i64).wrapping_add(imm) as u64;
    let fallthrough = pc_cur + ctx.cur_insn_len as u64;

    let skip = ir.new_label();
    ir.gen_brcond(Type::I64, a, b, cond.invert(), skip);

    emit_arm(ctx, ir, 0, fallthrough);
    ir.gen_set_label(skip);
    emit_arm(ctx, ir, 1, target);

    ctx.base.is_jmp = DisasJumpType::NoReturn;
    true
}

fn emit_arm(ctx: &mut RiscvDisasContext, ir: &mut Context, slot: u32, pc: u64) {
    super::RiscvTranslator::store_pc(ctx, ir, pc);
    if super::RiscvTranslator::goto_tb_eligible(ctx, pc) {
        super::RiscvTranslator::goto_tb(ctx, ir, slot, pc);
    } else {
        ir.gen_exit_tb(0);
    }
}

impl Decode<Context> for RiscvDisasContext {
    // -- U/J type --

    fn trans_lui(&mut self, ir: &mut Context, a: &ArgsU) -> bool {
        let c = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_mov(Type::I64, d, c);
        true
    }

    fn trans_auipc(&mut self, ir: &mut Context, a: &ArgsU) -> bool {
        let target = (self.base.pc_next as i64).wrapping_add(a.imm) as u64;
        let c = ir.new_const(Type::I64, target);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_mov(Type::I64, d, c);
        true
    }

    fn trans_jal(&mut self, ir: &mut Context, a: &ArgsJ) -> bool {
        let link_pc = self.base.pc_next + self.cur_insn_len as u64;
        if a.rd != 0 {
            let c = ir.new_const(Type::I64, link_pc);
            write_reg(self, ir, a.rd, c);
        }
        let target = (self.base.pc_next as i64).wrapping_add(a.imm) as u64;
        emit_arm(self, ir, 1, target);
        self.base.is_jmp = DisasJumpType::TBJump;
        true
    }

    fn trans_jalr(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        let rs1val = read_reg(self, ir, a.rs1);
        let imm = ir.new_const(Type::I64, a.imm as u64);
        let raw = ir.new_temp(Type::I64);
        ir.gen_add(Type::I64, raw, rs1val, imm);
        let mask = ir.new_const(Type::I64, !1u64);
        let target = ir.new_temp(Type::I64);
        ir.gen_and(Type::I64, target, raw, mask);

        let link_pc = self.base.pc_next + self.cur_insn_len as u64;
        if a.rd != 0 {
            let c = ir.new_const(Type::I64, link_pc);
            write_reg(self, ir, a.rd, c);
        }
        ir.gen_mov(Type::I64, self.pc, target);
        ir.gen_exit_tb(0);
        self.base.is_jmp = DisasJumpType::Jump;
        true
    }

    // -- Branches --

    fn trans_beq(&mut self, ir: &mut Context, a: &ArgsB) -> bool {
        gen_branch(self, ir, Cond::Eq, a.rs1, a.rs2, a.imm)
    }
    fn trans_bne(&mut self, ir: &mut Context, a: &ArgsB) -> bool {
        gen_branch(self, ir, Cond::Ne, a.rs1, a.rs2, a.imm)
    }
    fn trans_blt(&mut self, ir: &mut Context, a: &ArgsB) -> bool {
        gen_branch(self, ir, Cond::Lt, a.rs1, a.rs2, a.imm)
    }
    fn trans_bge(&mut self, ir: &mut Context, a: &ArgsB) -> bool {
        gen_branch(self, ir, Cond::Ge, a.rs1, a.rs2, a.imm)
    }
    fn trans_bltu(&mut self, ir: &mut Context, a: &ArgsB) -> bool {
        gen_branch(self, ir, Cond::Ltu, a.rs1, a.rs2, a.imm)
    }
    fn trans_bgeu(&mut self, ir: &mut Context, a: &ArgsB) -> bool {
        gen_branch(self, ir, Cond::Geu, a.rs1, a.rs2, a.imm)
    }

    // -- Loads --

    fn trans_lb(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        gen_load(self, ir, a, MemOp::sb())
    }
    fn trans_lh(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        gen_load(self, ir, a, MemOp::sw())
    }
    fn trans_lw(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        gen_load(self, ir, a, MemOp::sl())
    }
    fn trans_lbu(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        gen_load(self, ir, a, MemOp::ub())
    }
    fn trans_lhu(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        gen_load(self, ir, a, MemOp::uw())
    }
    fn trans_lwu(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        gen_load(self, ir, a, MemOp::ul())
    }
    fn trans_ld(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        gen_load(self, ir, a, MemOp::uq())
    }

    // -- Stores --

    fn trans_sb(&mut self, ir: &mut Context, a: &ArgsS) -> bool {
        gen_store(self, ir, a, MemOp::ub())
    }
    fn trans_sh(&mut self, ir: &mut Context, a: &ArgsS) -> bool {
        gen_store(self, ir, a, MemOp::uw())
    }
    fn trans_sw(&mut self, ir: &mut Context, a: &ArgsS) -> bool {
        gen_store(self, ir, a, MemOp::ul())
    }
    fn trans_sd(&mut self, ir: &mut Context, a: &ArgsS) -> bool {
        gen_store(self, ir, a, MemOp::uq())
    }

    // -- Immediate ALU --

    fn trans_addi(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let imm = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_add(Type::I64, d, x, imm);
        true
    }
    fn trans_slti(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let imm = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_setcond(Type::I64, d, x, imm, Cond::Lt);
        true
    }
    fn trans_sltiu(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let imm = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_setcond(Type::I64, d, x, imm, Cond::Ltu);
        true
    }
    fn trans_xori(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let imm = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_xor(Type::I64, d, x, imm);
        true
    }
    fn trans_ori(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let imm = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_or(Type::I64, d, x, imm);
        true
    }
    fn trans_andi(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let imm = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_and(Type::I64, d, x, imm);
        true
    }
    fn trans_addiw(&mut self, ir: &mut Context, a: &ArgsI) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let imm = ir.new_const(Type::I64, a.imm as u64);
        let wide = ir.new_temp(Type::I64);
        ir.gen_add(Type::I64, wide, x, imm);
        let d = dest_gpr(self, ir, a.rd);
        narrow_w(ir, d, wide);
        true
    }

    // -- Shift-immediate (64-bit) --

    fn trans_slli(&mut self, ir: &mut Context, a: &ArgsShift) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let shamt = ir.new_const(Type::I64, a.shamt as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_shl(Type::I64, d, x, shamt);
        true
    }
    fn trans_srli(&mut self, ir: &mut Context, a: &ArgsShift) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let shamt = ir.new_const(Type::I64, a.shamt as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_shr(Type::I64, d, x, shamt);
        true
    }
    fn trans_srai(&mut self, ir: &mut Context, a: &ArgsShift) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let shamt = ir.new_const(Type::I64, a.shamt as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_sar(Type::I64, d, x, shamt);
        true
    }

    // -- Shift-immediate (32-bit, RV64 `w` forms) --

    fn trans_slliw(&mut self, ir: &mut Context, a: &ArgsShift) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let lo = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo, x);
        let shamt = ir.new_const(Type::I32, a.shamt as u64);
        let res = ir.new_temp(Type::I32);
        ir.gen_shl(Type::I32, res, lo, shamt);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }
    fn trans_srliw(&mut self, ir: &mut Context, a: &ArgsShift) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let lo = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo, x);
        let shamt = ir.new_const(Type::I32, a.shamt as u64);
        let res = ir.new_temp(Type::I32);
        ir.gen_shr(Type::I32, res, lo, shamt);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }
    fn trans_sraiw(&mut self, ir: &mut Context, a: &ArgsShift) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let lo = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo, x);
        let shamt = ir.new_const(Type::I32, a.shamt as u64);
        let res = ir.new_temp(Type::I32);
        ir.gen_sar(Type::I32, res, lo, shamt);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }

    // -- Register ALU (64-bit) --

    fn trans_add(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_add(Type::I64, d, x, y);
        true
    }
    fn trans_sub(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_sub(Type::I64, d, x, y);
        true
    }
    fn trans_slt(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_setcond(Type::I64, d, x, y, Cond::Lt);
        true
    }
    fn trans_sltu(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_setcond(Type::I64, d, x, y, Cond::Ltu);
        true
    }
    fn trans_xor(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_xor(Type::I64, d, x, y);
        true
    }
    fn trans_or(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_or(Type::I64, d, x, y);
        true
    }
    fn trans_and(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_and(Type::I64, d, x, y);
        true
    }
    fn trans_sll(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let mask = ir.new_const(Type::I64, 63);
        let shamt = ir.new_temp(Type::I64);
        ir.gen_and(Type::I64, shamt, y, mask);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_shl(Type::I64, d, x, shamt);
        true
    }
    fn trans_srl(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let mask = ir.new_const(Type::I64, 63);
        let shamt = ir.new_temp(Type::I64);
        ir.gen_and(Type::I64, shamt, y, mask);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_shr(Type::I64, d, x, shamt);
        true
    }
    fn trans_sra(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let mask = ir.new_const(Type::I64, 63);
        let shamt = ir.new_temp(Type::I64);
        ir.gen_and(Type::I64, shamt, y, mask);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_sar(Type::I64, d, x, shamt);
        true
    }

    // -- Register ALU (32-bit, RV64 `w` forms) --

    fn trans_addw(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let wide = ir.new_temp(Type::I64);
        ir.gen_add(Type::I64, wide, x, y);
        let d = dest_gpr(self, ir, a.rd);
        narrow_w(ir, d, wide);
        true
    }
    fn trans_subw(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let wide = ir.new_temp(Type::I64);
        ir.gen_sub(Type::I64, wide, x, y);
        let d = dest_gpr(self, ir, a.rd);
        narrow_w(ir, d, wide);
        true
    }
    fn trans_sllw(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let lo_x = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_x, x);
        let mask = ir.new_const(Type::I64, 31);
        let shamt64 = ir.new_temp(Type::I64);
        ir.gen_and(Type::I64, shamt64, y, mask);
        let shamt = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(shamt, shamt64);
        let res = ir.new_temp(Type::I32);
        ir.gen_shl(Type::I32, res, lo_x, shamt);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }
    fn trans_srlw(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let lo_x = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_x, x);
        let mask = ir.new_const(Type::I64, 31);
        let shamt64 = ir.new_temp(Type::I64);
        ir.gen_and(Type::I64, shamt64, y, mask);
        let shamt = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(shamt, shamt64);
        let res = ir.new_temp(Type::I32);
        ir.gen_shr(Type::I32, res, lo_x, shamt);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }
    fn trans_sraw(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let lo_x = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_x, x);
        let mask = ir.new_const(Type::I64, 31);
        let shamt64 = ir.new_temp(Type::I64);
        ir.gen_and(Type::I64, shamt64, y, mask);
        let shamt = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(shamt, shamt64);
        let res = ir.new_temp(Type::I32);
        ir.gen_sar(Type::I32, res, lo_x, shamt);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }

    // -- Memory ordering / system --

    fn trans_fence(&mut self, ir: &mut Context, _a: &ArgsAutoFence) -> bool {
        ir.gen_mb(0);
        true
    }
    fn trans_ecall(&mut self, ir: &mut Context, _a: &ArgsEmpty) -> bool {
        let pc = self.base.pc_next;
        super::RiscvTranslator::store_pc(self, ir, pc);
        ir.gen_exit_tb(1);
        self.base.is_jmp = DisasJumpType::NoReturn;
        true
    }
    fn trans_ebreak(&mut self, ir: &mut Context, _a: &ArgsEmpty) -> bool {
        let pc = self.base.pc_next;
        super::RiscvTranslator::store_pc(self, ir, pc);
        ir.gen_exit_tb(2);
        self.base.is_jmp = DisasJumpType::NoReturn;
        true
    }

    // -- M extension --

    fn trans_mul(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_mul(Type::I64, d, x, y);
        true
    }
    fn trans_mulh(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_mulsh(Type::I64, d, x, y);
        true
    }
    fn trans_mulhu(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_muluh(Type::I64, d, x, y);
        true
    }
    fn trans_mulhsu(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let lo = ir.new_temp(Type::I64);
        let hi = ir.new_temp(Type::I64);
        ir.gen_mulu2(Type::I64, lo, hi, x, y);
        // Correct the unsigned widening product for x's sign: when x < 0,
        // subtract y from the high word (x's two's-complement bias is -2^64).
        let sixty_three = ir.new_const(Type::I64, 63);
        let sign_mask = ir.new_temp(Type::I64);
        ir.gen_sar(Type::I64, sign_mask, x, sixty_three);
        let correction = ir.new_temp(Type::I64);
        ir.gen_and(Type::I64, correction, sign_mask, y);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_sub(Type::I64, d, hi, correction);
        true
    }
    fn trans_div(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_divs(Type::I64, d, x, y);
        true
    }
    fn trans_divu(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_divu(Type::I64, d, x, y);
        true
    }
    fn trans_rem(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_rems(Type::I64, d, x, y);
        true
    }
    fn trans_remu(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_remu(Type::I64, d, x, y);
        true
    }

    // -- RV64M `w` forms --

    fn trans_mulw(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let lo_x = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_x, x);
        let lo_y = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_y, y);
        let res = ir.new_temp(Type::I32);
        ir.gen_mul(Type::I32, res, lo_x, lo_y);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }
    fn trans_divw(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let lo_x = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_x, x);
        let lo_y = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_y, y);
        let res = ir.new_temp(Type::I32);
        ir.gen_divs(Type::I32, res, lo_x, lo_y);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }
    fn trans_divuw(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let lo_x = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_x, x);
        let lo_y = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_y, y);
        let res = ir.new_temp(Type::I32);
        ir.gen_divu(Type::I32, res, lo_x, lo_y);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }
    fn trans_remw(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let lo_x = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_x, x);
        let lo_y = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_y, y);
        let res = ir.new_temp(Type::I32);
        ir.gen_rems(Type::I32, res, lo_x, lo_y);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }
    fn trans_remuw(&mut self, ir: &mut Context, a: &ArgsR) -> bool {
        let x = read_reg(self, ir, a.rs1);
        let y = read_reg(self, ir, a.rs2);
        let lo_x = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_x, x);
        let lo_y = ir.new_temp(Type::I32);
        ir.gen_extrl_i64_i32(lo_y, y);
        let res = ir.new_temp(Type::I32);
        ir.gen_remu(Type::I32, res, lo_x, lo_y);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_ext_i32_i64(d, res);
        true
    }
}

impl Decode16<Context> for RiscvDisasContext {
    fn trans_c_addi(&mut self, ir: &mut Context, a: &ArgsCi) -> bool {
        let x = read_reg(self, ir, a.rd);
        let imm = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_add(Type::I64, d, x, imm);
        true
    }
    fn trans_c_li(&mut self, ir: &mut Context, a: &ArgsCi) -> bool {
        let c = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_mov(Type::I64, d, c);
        true
    }
    fn trans_c_lui(&mut self, ir: &mut Context, a: &ArgsCiLui) -> bool {
        let c = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_mov(Type::I64, d, c);
        true
    }
    fn trans_c_srli(&mut self, ir: &mut Context, a: &ArgsCbShift) -> bool {
        let x = read_reg(self, ir, a.rd3);
        let shamt = ir.new_const(Type::I64, a.shamt as u64);
        let d = dest_gpr(self, ir, a.rd3);
        ir.gen_shr(Type::I64, d, x, shamt);
        true
    }
    fn trans_c_srai(&mut self, ir: &mut Context, a: &ArgsCbShift) -> bool {
        let x = read_reg(self, ir, a.rd3);
        let shamt = ir.new_const(Type::I64, a.shamt as u64);
        let d = dest_gpr(self, ir, a.rd3);
        ir.gen_sar(Type::I64, d, x, shamt);
        true
    }
    fn trans_c_andi(&mut self, ir: &mut Context, a: &ArgsCbAndi) -> bool {
        let x = read_reg(self, ir, a.rd3);
        let imm = ir.new_const(Type::I64, a.imm as u64);
        let d = dest_gpr(self, ir, a.rd3);
        ir.gen_and(Type::I64, d, x, imm);
        true
    }
    fn trans_c_sub(&mut self, ir: &mut Context, a: &ArgsCa) -> bool {
        let x = read_reg(self, ir, a.rd3);
        let y = read_reg(self, ir, a.rs2_3);
        let d = dest_gpr(self, ir, a.rd3);
        ir.gen_sub(Type::I64, d, x, y);
        true
    }
    fn trans_c_xor(&mut self, ir: &mut Context, a: &ArgsCa) -> bool {
        let x = read_reg(self, ir, a.rd3);
        let y = read_reg(self, ir, a.rs2_3);
        let d = dest_gpr(self, ir, a.rd3);
        ir.gen_xor(Type::I64, d, x, y);
        true
    }
    fn trans_c_or(&mut self, ir: &mut Context, a: &ArgsCa) -> bool {
        let x = read_reg(self, ir, a.rd3);
        let y = read_reg(self, ir, a.rs2_3);
        let d = dest_gpr(self, ir, a.rd3);
        ir.gen_or(Type::I64, d, x, y);
        true
    }
    fn trans_c_and(&mut self, ir: &mut Context, a: &ArgsCa) -> bool {
        let x = read_reg(self, ir, a.rd3);
        let y = read_reg(self, ir, a.rs2_3);
        let d = dest_gpr(self, ir, a.rd3);
        ir.gen_and(Type::I64, d, x, y);
        true
    }
    fn trans_c_mv(&mut self, ir: &mut Context, a: &ArgsCr) -> bool {
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_mov(Type::I64, d, y);
        true
    }
    fn trans_c_add(&mut self, ir: &mut Context, a: &ArgsCr) -> bool {
        let x = read_reg(self, ir, a.rd);
        let y = read_reg(self, ir, a.rs2);
        let d = dest_gpr(self, ir, a.rd);
        ir.gen_add(Type::I64, d, x, y);
        true
    }
    fn trans_c_jr(&mut self, ir: &mut Context, a: &ArgsCjr) -> bool {
        let target = read_reg(self, ir, a.rd);
        ir.gen_mov(Type::I64, self.pc, target);
        ir.gen_exit_tb(0);
        self.base.is_jmp = DisasJumpType::Jump;
        true
    }
    fn trans_c_jalr(&mut self, ir: &mut Context, a: &ArgsCjr) -> bool {
        let target = read_reg(self, ir, a.rd);
        let saved = ir.new_temp(Type::I64);
        ir.gen_mov(Type::I64, saved, target);
        let link_pc = self.base.pc_next + self.cur_insn_len as u64;
        let c = ir.new_const(Type::I64, link_pc);
        write_reg(self, ir, 1, c);
        ir.gen_mov(Type::I64, self.pc, saved);
        ir.gen_exit_tb(0);
        self.base.is_jmp = DisasJumpType::Jump;
        true
    }
    fn trans_c_ebreak(&mut self, ir: &mut Context, _a: &ArgsEmptyC) -> bool {
        let pc = self.base.pc_next;
        super::RiscvTranslator::store_pc(self, ir, pc);
        ir.gen_exit_tb(2);
        self.base.is_jmp = DisasJumpType::NoReturn;
        true
    }
}
