//! Property tests over randomly generated instruction streams, covering
//! SPEC_FULL.md §8's universal invariants 1-3, 5 and 7 for both
//! front-ends. Each run drives the real `translator_loop` rather than
//! hand-calling `translate_insn`, so these exercise the page-boundary
//! and `max_insns` exit paths that the scenario tests in
//! `riscv.rs`/`openrisc.rs` don't reach.

use proptest::prelude::*;
use tcg_core::{Breakpoints, Context, Opcode};
use tcg_frontend::openrisc::{OpenriscDisasContext, OpenriscTranslator};
use tcg_frontend::riscv::{RiscvDisasContext, RiscvTranslator};
use tcg_frontend::{translator_loop, TranslatorOps};

const MAX_INSNS: u32 = 8;

/// Every `code` buffer is padded well past one guest page so that even a
/// 4-byte fetch straddling the nominal end of `code` never reads
/// out of bounds; the page-crossing check in `translator_loop` still
/// stops the TB using only the first `code.len()` bytes as "the page".
fn padded_buffer(code: &[u8]) -> Vec<u8> {
    let mut buf = code.to_vec();
    buf.resize(code.len() + 16, 0);
    buf
}

fn insn_start_pcs(ir: &Context) -> Vec<u64> {
    ir.ops()
        .iter()
        .filter(|op| op.opc == Opcode::InsnStart)
        .map(|op| (op.args[0].0 as u64) | ((op.args[1].0 as u64) << 32))
        .collect()
}

fn goto_tb_slots(ir: &Context) -> Vec<u32> {
    ir.ops()
        .iter()
        .filter(|op| op.opc == Opcode::GotoTb)
        .map(|op| op.args[0].0)
        .collect()
}

fn assert_universal_invariants(ctx_num_insns: u32, ir: &Context) {
    let pcs = insn_start_pcs(ir);

    // Invariant 1: one insn_start per translated instruction, strictly
    // increasing PCs.
    assert_eq!(pcs.len() as u32, ctx_num_insns);
    for w in pcs.windows(2) {
        assert!(w[1] > w[0], "insn_start PCs must strictly increase: {:?}", pcs);
    }

    // Invariant 2: the TB is well-terminated — the last emitted op is
    // always exit_tb (goto_tb is always immediately followed by one).
    let last = ir.ops().last().expect("TB must emit at least one op");
    assert_eq!(last.opc, Opcode::ExitTb, "TB must end in exit_tb");

    // Invariant 7: every goto_tb slot is 0 or 1, and each slot appears
    // at most once.
    let slots = goto_tb_slots(ir);
    for s in &slots {
        assert!(*s == 0 || *s == 1, "goto_tb slot must be 0 or 1, got {s}");
    }
    let unique: std::collections::HashSet<_> = slots.iter().collect();
    assert_eq!(unique.len(), slots.len(), "goto_tb slot reused in one TB: {:?}", slots);
}

#[test]
fn breakpoint_hit_emits_store_pc_and_raise_debug_exactly_once() {
    // addi x1, x0, 5 — never actually decoded, since the breakpoint at
    // pc 0 fires before the first instruction is translated.
    let buf = padded_buffer(&[0x93, 0x00, 0x50, 0x00]);
    let mut ctx = RiscvDisasContext::new(0, buf.as_ptr());
    ctx.base.max_insns = MAX_INSNS;
    let mut ir = Context::new();
    let bp = Breakpoints::from_sorted(&[0]);
    translator_loop::<RiscvTranslator>(&mut ctx, &mut ir, &bp, false);

    assert_eq!(ctx.base.num_insns, 0, "the real instruction is never decoded");
    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(
        opcodes,
        vec![Opcode::Mov, Opcode::ExitTb],
        "store_pc + raise_debug must appear exactly once, not reprocessed by the epilogue"
    );
}

#[test]
fn singlestep_epilogue_stores_pc_and_raises_debug_not_a_bare_exit() {
    // addi x1, x0, 5
    let buf = padded_buffer(&[0x93, 0x00, 0x50, 0x00]);
    let mut ctx = RiscvDisasContext::new(0, buf.as_ptr());
    ctx.base.max_insns = MAX_INSNS;
    ctx.base.singlestep_enabled = true;
    let mut ir = Context::new();
    translator_loop::<RiscvTranslator>(&mut ctx, &mut ir, &Breakpoints::empty(), false);

    assert_eq!(ctx.base.num_insns, 1);
    let opcodes: Vec<Opcode> = ir.ops().iter().map(|op| op.opc).collect();
    assert_eq!(
        opcodes,
        vec![Opcode::InsnStart, Opcode::Add, Opcode::Mov, Opcode::ExitTb],
        "epilogue must store_pc then raise_debug, per spec.md §8 scenario 6"
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn riscv_translator_loop_holds_universal_invariants(bytes in prop::collection::vec(any::<u8>(), 64)) {
        let buf = padded_buffer(&bytes);
        let mut ctx = RiscvDisasContext::new(0, buf.as_ptr());
        ctx.base.max_insns = MAX_INSNS;
        let mut ir = Context::new();
        translator_loop::<RiscvTranslator>(&mut ctx, &mut ir, &Breakpoints::empty(), false);

        assert_universal_invariants(ctx.base.num_insns, &ir);
        // Invariant 3: all PCs stay within the first page (trivial here,
        // since the 64-byte buffer is far smaller than PAGE_SIZE).
        for pc in insn_start_pcs(&ir) {
            prop_assert!(pc < RiscvTranslator::PAGE_SIZE);
        }
    }

    #[test]
    fn riscv_singlestep_always_yields_exactly_one_instruction(bytes in prop::collection::vec(any::<u8>(), 16)) {
        let buf = padded_buffer(&bytes);
        let mut ctx = RiscvDisasContext::new(0, buf.as_ptr());
        ctx.base.max_insns = MAX_INSNS;
        ctx.base.singlestep_enabled = true;
        let mut ir = Context::new();
        translator_loop::<RiscvTranslator>(&mut ctx, &mut ir, &Breakpoints::empty(), false);

        // Invariant 5.
        prop_assert_eq!(ctx.base.num_insns, 1);
    }

    #[test]
    fn openrisc_translator_loop_holds_universal_invariants(words in prop::collection::vec(any::<u32>(), 8)) {
        let mut bytes = Vec::with_capacity(words.len() * 4);
        for w in &words {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        let buf = padded_buffer(&bytes);
        let mut ctx = OpenriscDisasContext::new(0, buf.as_ptr());
        ctx.base.max_insns = MAX_INSNS;
        let mut ir = Context::new();
        translator_loop::<OpenriscTranslator>(&mut ctx, &mut ir, &Breakpoints::empty(), false);

        assert_universal_invariants(ctx.base.num_insns, &ir);
        for pc in insn_start_pcs(&ir) {
            prop_assert!(pc < OpenriscTranslator::PAGE_SIZE);
        }
    }

    #[test]
    fn openrisc_singlestep_always_yields_exactly_one_instruction(words in prop::collection::vec(any::<u32>(), 4)) {
        let mut bytes = Vec::with_capacity(words.len() * 4);
        for w in &words {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        let buf = padded_buffer(&bytes);
        let mut ctx = OpenriscDisasContext::new(0, buf.as_ptr());
        ctx.base.max_insns = MAX_INSNS;
        ctx.base.singlestep_enabled = true;
        let mut ir = Context::new();
        translator_loop::<OpenriscTranslator>(&mut ctx, &mut ir, &Breakpoints::empty(), false);

        prop_assert_eq!(ctx.base.num_insns, 1);
    }
}
