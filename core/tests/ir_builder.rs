//! Integration tests over `Context`'s IR emission: op-stream shape,
//! constant dedup, and the generic invariants from SPEC_FULL.md §8 that
//! don't belong to any single architecture decoder.

use tcg_core::{Context, Opcode, Type};

#[test]
fn gen_add_emits_a_single_add_op_with_the_given_type() {
    let mut ctx = Context::new();
    let a = ctx.new_temp(Type::I64);
    let b = ctx.new_temp(Type::I64);
    let d = ctx.new_temp(Type::I64);
    ctx.gen_add(Type::I64, d, a, b);

    let ops: Vec<_> = ctx.ops().iter().filter(|op| op.opc == Opcode::Add).collect();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].op_type, Type::I64);
}

#[test]
fn const_temps_are_deduplicated_per_type() {
    let mut ctx = Context::new();
    let a = ctx.new_const(Type::I32, 42);
    let b = ctx.new_const(Type::I32, 42);
    let c = ctx.new_const(Type::I64, 42);
    assert_eq!(a, b, "same type+value constants must share one temp");
    assert_ne!(a, c, "constants of different types must not collide");
}

#[test]
fn globals_are_assigned_before_locals_and_in_registration_order() {
    let mut ctx = Context::new();
    let env = ctx.new_fixed(Type::I64, 5, "env");
    let g0 = ctx.new_global(Type::I64, env, 0, "r0");
    let g1 = ctx.new_global(Type::I64, env, 8, "r1");
    let t = ctx.new_temp(Type::I64);

    assert!(env.0 < g0.0);
    assert!(g0.0 < g1.0);
    assert!(g1.0 < t.0);
}

#[test]
#[should_panic(expected = "globals must be registered before locals")]
fn registering_a_global_after_a_local_panics() {
    let mut ctx = Context::new();
    let env = ctx.new_fixed(Type::I64, 5, "env");
    let _t = ctx.new_temp(Type::I64);
    let _late_global = ctx.new_global(Type::I64, env, 0, "too_late");
}

#[test]
fn branch_sequence_emits_brcond_then_br_then_set_label() {
    let mut ctx = Context::new();
    let a = ctx.new_temp(Type::I32);
    let b = ctx.new_temp(Type::I32);
    let skip = ctx.new_label();
    ctx.gen_brcond(Type::I32, a, b, tcg_core::Cond::Eq, skip);
    ctx.gen_br(skip);
    ctx.gen_set_label(skip);

    let opcodes: Vec<Opcode> = ctx.ops().iter().map(|op| op.opc).collect();
    assert_eq!(
        opcodes,
        vec![Opcode::BrCond, Opcode::Br, Opcode::SetLabel]
    );
}

#[test]
fn divu_checked_elides_the_zero_guard_for_a_known_nonzero_constant() {
    let mut ctx = Context::new();
    let a = ctx.new_temp(Type::I32);
    let d = ctx.new_temp(Type::I32);
    let nonzero = ctx.new_const(Type::I32, 7);
    ctx.gen_divu_checked(Type::I32, d, a, nonzero);

    let opcodes: Vec<Opcode> = ctx.ops().iter().map(|op| op.opc).collect();
    assert_eq!(opcodes, vec![Opcode::DivU], "no brcond guard against a known-nonzero divisor");
}

#[test]
fn divu_checked_guards_a_non_constant_divisor() {
    let mut ctx = Context::new();
    let a = ctx.new_temp(Type::I32);
    let b = ctx.new_temp(Type::I32);
    let d = ctx.new_temp(Type::I32);
    ctx.gen_divu_checked(Type::I32, d, a, b);

    let opcodes: Vec<Opcode> = ctx.ops().iter().map(|op| op.opc).collect();
    assert_eq!(opcodes, vec![Opcode::BrCond, Opcode::DivU, Opcode::SetLabel]);
}

#[test]
fn divu_checked_still_guards_a_known_zero_constant() {
    let mut ctx = Context::new();
    let a = ctx.new_temp(Type::I32);
    let d = ctx.new_temp(Type::I32);
    let zero = ctx.new_const(Type::I32, 0);
    ctx.gen_divu_checked(Type::I32, d, a, zero);

    let opcodes: Vec<Opcode> = ctx.ops().iter().map(|op| op.opc).collect();
    assert_eq!(opcodes, vec![Opcode::BrCond, Opcode::DivU, Opcode::SetLabel]);
}

#[test]
fn is_nearly_full_trips_within_the_epilogue_margin() {
    use tcg_core::context::OPS_NEARLY_FULL_MARGIN;

    let mut ctx = Context::new();
    assert!(!ctx.is_nearly_full());

    // Push ops until fewer than the margin remain.
    loop {
        let a = ctx.new_temp(Type::I32);
        let b = ctx.new_temp(Type::I32);
        let d = ctx.new_temp(Type::I32);
        ctx.gen_add(Type::I32, d, a, b);
        if ctx.ops_remaining() < OPS_NEARLY_FULL_MARGIN {
            break;
        }
    }
    assert!(ctx.is_nearly_full());
}
