//! Scenario tests for the OpenRISC decoder: delay-slot finalization,
//! illegal/privileged termination, and the `l.div`/`l.divu` overflow
//! check, per SPEC_FULL.md §8's concrete-scenario test plan.

use tcg_core::{Context, Opcode};
use tcg_frontend::openrisc::{DelayState, OpenriscCfg, OpenriscDisasContext, OpenriscTranslator};
use tcg_frontend::{DisasJumpType, TranslatorOps};

fn new_ctx(code: &[u8]) -> (OpenriscDisasContext, Context) {
    let mut ctx = OpenriscDisasContext::new(0, code.as_ptr());
    let mut ir = Context::new();
    OpenriscTranslator::init_disas_context(&mut ctx, &mut ir);
    (ctx, ir)
}

fn exit_tb_code(ir: &Context) -> Option<u32> {
    ir.ops()
        .iter()
        .find(|op| op.opc == Opcode::ExitTb)
        .map(|op| op.args[0].0)
}

#[test]
fn delay_slot_branch_finalizes_after_the_next_instruction() {
    // l.j +8 (major opcode 0x00, n26 = 2 -> disp = 8)
    let l_j: u32 = 0x0000_0002;
    // l.nop (major opcode 0x05, op1 == 1)
    let l_nop: u32 = (0x05 << 26) | (1 << 24);

    let mut code = Vec::new();
    code.extend_from_slice(&l_j.to_le_bytes());
    code.extend_from_slice(&l_nop.to_le_bytes());
    let (mut ctx, mut ir) = new_ctx(&code);

    OpenriscTranslator::insn_start(&mut ctx, &mut ir);
    OpenriscTranslator::translate_insn(&mut ctx, &mut ir);
    assert_eq!(ctx.delay, DelayState::Branch, "l.j arms the delay slot");
    assert_eq!(ctx.base.is_jmp, DisasJumpType::Next, "not terminated yet");
    assert_eq!(ctx.base.pc_next, 4);

    OpenriscTranslator::insn_start(&mut ctx, &mut ir);
    OpenriscTranslator::translate_insn(&mut ctx, &mut ir);
    assert_eq!(ctx.delay, DelayState::None, "delay slot consumed");
    assert_eq!(ctx.base.is_jmp, DisasJumpType::Jump, "branch finalized");
    assert_eq!(ctx.base.pc_next, 8);

    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(
        opcodes,
        vec![
            Opcode::InsnStart,
            Opcode::Mov, // jmp_pc <- 8
            Opcode::InsnStart,
            Opcode::Mov, // pc <- jmp_pc
            Opcode::ExitTb,
        ]
    );
}

#[test]
fn privileged_instruction_terminates_with_its_own_exit_code() {
    // l.rfe: op0 (major opcode) falls through dec_misc's default dispatch
    // to its own 0x09 case.
    let l_rfe: u32 = 0x09 << 26;
    let (mut ctx, mut ir) = new_ctx(&l_rfe.to_le_bytes());

    OpenriscTranslator::insn_start(&mut ctx, &mut ir);
    OpenriscTranslator::translate_insn(&mut ctx, &mut ir);

    assert_eq!(ctx.base.is_jmp, DisasJumpType::NoReturn);
    assert_eq!(exit_tb_code(&ir), Some(4));
}

#[test]
fn illegal_encoding_terminates_with_a_distinct_exit_code() {
    // An unassigned major opcode (0x3f) falls into dec_misc's catch-all.
    let bogus: u32 = 0x3f << 26;
    let (mut ctx, mut ir) = new_ctx(&bogus.to_le_bytes());

    OpenriscTranslator::insn_start(&mut ctx, &mut ir);
    OpenriscTranslator::translate_insn(&mut ctx, &mut ir);

    assert_eq!(ctx.base.is_jmp, DisasJumpType::NoReturn);
    assert_eq!(exit_tb_code(&ir), Some(3));
}

#[test]
fn illegal_instruction_in_a_delay_slot_wins_over_branch_finalization() {
    // l.j +8, followed in the delay slot by an unassigned major opcode.
    let l_j: u32 = 0x0000_0002;
    let bogus: u32 = 0x3f << 26;

    let mut code = Vec::new();
    code.extend_from_slice(&l_j.to_le_bytes());
    code.extend_from_slice(&bogus.to_le_bytes());
    let (mut ctx, mut ir) = new_ctx(&code);

    OpenriscTranslator::insn_start(&mut ctx, &mut ir);
    OpenriscTranslator::translate_insn(&mut ctx, &mut ir);
    assert_eq!(ctx.delay, DelayState::Branch);

    OpenriscTranslator::insn_start(&mut ctx, &mut ir);
    OpenriscTranslator::translate_insn(&mut ctx, &mut ir);

    // The illegal opcode's own NoReturn/exit_tb(3) must survive — not be
    // clobbered by the pending branch's Jump/exit_tb(0) finalization.
    assert_eq!(ctx.base.is_jmp, DisasJumpType::NoReturn);
    assert_eq!(exit_tb_code(&ir), Some(3));

    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(
        opcodes,
        vec![
            Opcode::InsnStart,
            Opcode::Mov, // jmp_pc <- 8
            Opcode::InsnStart,
            Opcode::Mov, // store_pc in illegal()
            Opcode::ExitTb,
        ],
        "no extra mov/exit_tb appended after the illegal-instruction terminator"
    );
}

#[test]
fn maci_accumulates_when_the_profile_has_a_mac_unit() {
    // l.maci r1, 5 (major opcode 0x13, dec_misc's catch-all dispatch)
    let insn: u32 = (0x13 << 26) | (1 << 16) | 5;
    let (mut ctx, mut ir) = new_ctx(&insn.to_le_bytes());

    OpenriscTranslator::insn_start(&mut ctx, &mut ir);
    OpenriscTranslator::translate_insn(&mut ctx, &mut ir);

    assert_eq!(ctx.base.is_jmp, DisasJumpType::Next);
    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert!(opcodes.contains(&Opcode::Mul), "gen_mac must emit the 32x32 product");
    assert!(exit_tb_code(&ir).is_none(), "l.maci does not terminate the TB");
}

#[test]
fn maci_raises_illegal_when_the_profile_has_no_mac_unit() {
    let insn: u32 = (0x13 << 26) | (1 << 16) | 5;
    let (mut ctx, mut ir) = new_ctx(&insn.to_le_bytes());
    ctx.cfg = OpenriscCfg { has_mac: false };

    OpenriscTranslator::insn_start(&mut ctx, &mut ir);
    OpenriscTranslator::translate_insn(&mut ctx, &mut ir);

    assert_eq!(ctx.base.is_jmp, DisasJumpType::NoReturn);
    assert_eq!(exit_tb_code(&ir), Some(3));
    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert!(!opcodes.contains(&Opcode::Mul), "no MAC op is emitted when the unit is absent");
}

#[test]
fn divu_by_register_emits_a_zero_check_before_the_real_divide() {
    // l.divu r3, r1, r2 (major 0x38, op0=0xa, op1=3)
    let insn: u32 = (0x38 << 26) | (3 << 21) | (1 << 16) | (2 << 11) | (3 << 8) | 0xa;
    let (mut ctx, mut ir) = new_ctx(&insn.to_le_bytes());

    OpenriscTranslator::insn_start(&mut ctx, &mut ir);
    OpenriscTranslator::translate_insn(&mut ctx, &mut ir);

    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    // A brcond guards entry to the unconditional divide; the real DivU
    // always appears after the check, never before.
    let brcond_pos = opcodes.iter().position(|o| *o == Opcode::BrCond).unwrap();
    let div_pos = opcodes.iter().position(|o| *o == Opcode::DivU).unwrap();
    assert!(brcond_pos < div_pos);
    assert_eq!(ctx.base.is_jmp, DisasJumpType::Next);
}
