//! Helper-call emitter (§4.C): typed helper descriptors plus a
//! `Context::gen_helper_call` wrapper around the raw `gen_call` op that
//! checks arity/type and honors `NO_RETURN`.

use crate::context::Context;
use crate::error::{TcgError, TcgResult};
use crate::temp::TempIdx;
use crate::types::Type;

/// Properties of a helper function relevant to the translator, not its
/// body (helper bodies are out of scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperFlags(u32);

impl HelperFlags {
    pub const NONE: HelperFlags = HelperFlags(0);
    /// Reads CPU state but never writes it.
    pub const PURE_READ_STATE: HelperFlags = HelperFlags(0x01);
    /// Writes CPU state (implies globals must be flushed before the call).
    pub const WRITES_STATE: HelperFlags = HelperFlags(0x02);
    /// May raise a guest exception.
    pub const MAY_RAISE: HelperFlags = HelperFlags(0x04);
    /// Never returns to the caller (exception/longjmp helpers).
    pub const NO_RETURN: HelperFlags = HelperFlags(0x08);

    pub const fn empty() -> Self {
        Self::NONE
    }

    pub const fn contains(self, other: HelperFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: HelperFlags) -> Self {
        HelperFlags(self.0 | other.0)
    }
}

impl std::ops::BitOr for HelperFlags {
    type Output = HelperFlags;
    fn bitor(self, rhs: HelperFlags) -> HelperFlags {
        self.union(rhs)
    }
}

/// Argument/return type signature of a helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperSig {
    pub args: Vec<Type>,
    pub ret: Option<Type>,
}

impl HelperSig {
    pub fn new(args: Vec<Type>, ret: Option<Type>) -> Self {
        Self { args, ret }
    }
}

/// Static description of a helper function, registered once at front-end
/// init time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperDesc {
    pub name: &'static str,
    pub sig: HelperSig,
    pub flags: HelperFlags,
    pub id: u64,
}

/// Process-scoped table of registered helpers.
#[derive(Debug, Default)]
pub struct HelperTable {
    helpers: Vec<HelperDesc>,
}

impl HelperTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, desc: HelperDesc) {
        debug_assert!(
            self.get(desc.name).is_none(),
            "helper {} registered twice",
            desc.name
        );
        self.helpers.push(desc);
    }

    pub fn get(&self, name: &str) -> Option<&HelperDesc> {
        self.helpers.iter().find(|h| h.name == name)
    }

    pub fn id_of(&self, name: &str) -> Option<u64> {
        self.get(name).map(|h| h.id)
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}

impl Context {
    /// Emit a call to `desc`, checking arity and per-argument types against
    /// its signature. Implicitly prepends the CPU-state pointer as
    /// argument 0 of the underlying `gen_call`. If `desc.flags` has
    /// `NO_RETURN` set, the caller is expected to set
    /// `DisasContextBase.is_jmp = DisasJumpType::NoReturn` afterward (the
    /// emitter itself has no access to the front-end's decode context).
    pub fn gen_helper_call(
        &mut self,
        desc: &HelperDesc,
        dst: Option<TempIdx>,
        env: TempIdx,
        args: &[TempIdx],
        arg_types: &[Type],
    ) -> TcgResult<Option<TempIdx>> {
        debug_assert!(
            !self.unwind_table().is_empty(),
            "helper call {} emitted before any insn_start",
            desc.name
        );

        if args.len() != desc.sig.args.len() {
            return Err(TcgError::HelperArityMismatch {
                name: desc.name,
                expected: desc.sig.args.len(),
                got: args.len(),
            });
        }
        for (i, expected) in desc.sig.args.iter().enumerate() {
            if arg_types.get(i) != Some(expected) {
                return Err(TcgError::HelperTypeMismatch {
                    name: desc.name,
                    arg: i,
                });
            }
        }

        let mut full_args = Vec::with_capacity(1 + args.len());
        full_args.push(env);
        full_args.extend_from_slice(args);

        let ret_ty = desc.sig.ret.unwrap_or(Type::I64);
        let dst = dst.unwrap_or_else(|| self.new_temp(ret_ty));
        self.gen_call(dst, desc.id, &full_args);

        Ok(desc.sig.ret.map(|_| dst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    fn make_desc(flags: HelperFlags) -> HelperDesc {
        HelperDesc {
            name: "raise_exception",
            sig: HelperSig::new(vec![Type::I32], None),
            flags,
            id: 1,
        }
    }

    #[test]
    fn table_register_and_lookup() {
        let mut t = HelperTable::new();
        t.register(make_desc(HelperFlags::MAY_RAISE | HelperFlags::NO_RETURN));
        assert_eq!(t.id_of("raise_exception"), Some(1));
        assert!(t.get("missing").is_none());
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let mut ctx = Context::new();
        let env = ctx.new_fixed(Type::I64, 5, "env");
        ctx.gen_insn_start(0);
        let desc = make_desc(HelperFlags::empty());
        let arg = ctx.new_const(Type::I32, 1);
        let err = ctx
            .gen_helper_call(&desc, None, env, &[arg, arg], &[Type::I32, Type::I32])
            .unwrap_err();
        assert_eq!(
            err,
            TcgError::HelperArityMismatch {
                name: "raise_exception",
                expected: 1,
                got: 2,
            }
        );
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let mut ctx = Context::new();
        let env = ctx.new_fixed(Type::I64, 5, "env");
        ctx.gen_insn_start(0);
        let desc = make_desc(HelperFlags::empty());
        let arg = ctx.new_const(Type::I64, 1);
        let err = ctx
            .gen_helper_call(&desc, None, env, &[arg], &[Type::I64])
            .unwrap_err();
        assert_eq!(
            err,
            TcgError::HelperTypeMismatch {
                name: "raise_exception",
                arg: 0,
            }
        );
    }

    #[test]
    fn well_typed_call_succeeds() {
        let mut ctx = Context::new();
        let env = ctx.new_fixed(Type::I64, 5, "env");
        ctx.gen_insn_start(0);
        let desc = make_desc(HelperFlags::empty());
        let arg = ctx.new_const(Type::I32, 1);
        let result = ctx
            .gen_helper_call(&desc, None, env, &[arg], &[Type::I32])
            .unwrap();
        assert!(result.is_none());
        assert_eq!(ctx.num_ops(), 2);
    }

    #[test]
    #[should_panic(expected = "emitted before any insn_start")]
    fn call_before_insn_start_panics_in_debug() {
        let mut ctx = Context::new();
        let env = ctx.new_fixed(Type::I64, 5, "env");
        let desc = make_desc(HelperFlags::empty());
        let arg = ctx.new_const(Type::I32, 1);
        let _ = ctx.gen_helper_call(&desc, None, env, &[arg], &[Type::I32]);
    }
}
