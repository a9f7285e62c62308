//! Scenario tests for the RISC-V decoder: each decodes a literal
//! instruction word and asserts on the resulting op stream, per
//! SPEC_FULL.md §8's concrete-scenario test plan.

use tcg_core::{Context, Opcode};
use tcg_frontend::riscv::ext::{MisaExt, RiscvCfg};
use tcg_frontend::riscv::{RiscvDisasContext, RiscvTranslator};
use tcg_frontend::{DisasJumpType, TranslatorOps};

fn decode_one(code: &[u8]) -> (RiscvDisasContext, Context) {
    let mut ctx = RiscvDisasContext::new(0, code.as_ptr());
    let mut ir = Context::new();
    RiscvTranslator::init_disas_context(&mut ctx, &mut ir);
    RiscvTranslator::insn_start(&mut ctx, &mut ir);
    RiscvTranslator::translate_insn(&mut ctx, &mut ir);
    (ctx, ir)
}

fn decode_one_with_cfg(code: &[u8], cfg: RiscvCfg) -> (RiscvDisasContext, Context) {
    let mut ctx = RiscvDisasContext::new(0, code.as_ptr());
    ctx.cfg = cfg;
    let mut ir = Context::new();
    RiscvTranslator::init_disas_context(&mut ctx, &mut ir);
    RiscvTranslator::insn_start(&mut ctx, &mut ir);
    RiscvTranslator::translate_insn(&mut ctx, &mut ir);
    (ctx, ir)
}

#[test]
fn addi_emits_a_single_add_and_does_not_terminate_the_tb() {
    // addi x1, x0, 5
    let (ctx, ir) = decode_one(&[0x93, 0x00, 0x50, 0x00]);

    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(opcodes, vec![Opcode::InsnStart, Opcode::Add]);
    assert_eq!(ctx.base.is_jmp, DisasJumpType::Next);
    assert_eq!(ctx.base.pc_next, 4);
}

#[test]
fn jal_x0_is_a_direct_jump_resolved_via_goto_tb() {
    // jal x0, 256 (no link write since rd == x0)
    let (ctx, ir) = decode_one(&[0x6f, 0x00, 0x00, 0x10]);

    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(
        opcodes,
        vec![
            Opcode::InsnStart,
            Opcode::Mov,
            Opcode::GotoTb,
            Opcode::ExitTb,
        ]
    );
    assert_eq!(ctx.base.is_jmp, DisasJumpType::TBJump);
}

#[test]
fn jalr_stores_the_target_before_is_jmp_is_set_to_jump() {
    // jalr x1, x1, 0 — target must be captured before the link write
    // clobbers x1, matching original_source's ordering.
    // I-type: imm=0, rs1=1, funct3=0, rd=1, opcode=0x67
    let insn: u32 = (1 << 15) | (1 << 7) | 0x67;
    let (ctx, ir) = decode_one(&insn.to_le_bytes());

    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(
        opcodes,
        vec![
            Opcode::InsnStart,
            Opcode::Add,
            Opcode::And,
            Opcode::Mov, // link value written to x1
            Opcode::Mov, // target written to pc
            Opcode::ExitTb,
        ]
    );
    assert_eq!(ctx.base.is_jmp, DisasJumpType::Jump);
}

#[test]
fn beq_emits_a_dual_arm_terminator_and_sets_no_return() {
    // beq x0, x0, 8
    let (ctx, ir) = decode_one(&[0x63, 0x04, 0x00, 0x00]);

    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(
        opcodes,
        vec![
            Opcode::InsnStart,
            Opcode::BrCond,
            Opcode::Mov,
            Opcode::GotoTb,
            Opcode::ExitTb,
            Opcode::SetLabel,
            Opcode::Mov,
            Opcode::GotoTb,
            Opcode::ExitTb,
        ]
    );
    assert_eq!(ctx.base.is_jmp, DisasJumpType::NoReturn);
}

#[test]
fn flw_raises_illegal_when_the_profile_advertises_f() {
    // flw f1, 0(x2) — opcode 0x07, a legitimate F-extension encoding
    // that this decoder never implements.
    let insn: u32 = (2 << 15) | (2 << 12) | (1 << 7) | 0x07;
    let (ctx, ir) = decode_one_with_cfg(&insn.to_le_bytes(), RiscvCfg::RV64IMAFDC);

    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(opcodes, vec![Opcode::InsnStart, Opcode::Mov, Opcode::ExitTb]);
    assert_eq!(ctx.base.is_jmp, DisasJumpType::NoReturn);
}

#[test]
fn flw_is_a_silent_nop_when_the_profile_has_no_fd() {
    let insn: u32 = (2 << 15) | (2 << 12) | (1 << 7) | 0x07;
    let integer_only = RiscvCfg {
        misa: MisaExt::from_bits_truncate(MisaExt::I.bits() | MisaExt::M.bits() | MisaExt::C.bits()),
        ..RiscvCfg::RV64IMAFDC
    };
    let (ctx, ir) = decode_one_with_cfg(&insn.to_le_bytes(), integer_only);

    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(opcodes, vec![Opcode::InsnStart]);
    assert_eq!(ctx.base.is_jmp, DisasJumpType::Next);
}

#[test]
fn compressed_c_li_decodes_as_a_two_byte_instruction() {
    // c.li x5, 3
    let (ctx, ir) = decode_one(&[0x8d, 0x42, 0x00, 0x00]);

    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(opcodes, vec![Opcode::InsnStart, Opcode::Mov]);
    assert_eq!(ctx.base.pc_next, 2);
}
