//! Handler boilerplate, in the spirit of the teacher's `define_syscall!`:
//! a handler body returns a plain `Result`, and the macro takes care of
//! folding that into a [`sv_abi::Verdict`].

macro_rules! define_handler {
    ($name:ident($ctx:ident: &NotificationCtx) -> Result<u64, ErrorKind> $body:block) => {
        pub fn $name(
            $ctx: &$crate::dispatch::context::NotificationCtx,
        ) -> sv_abi::Verdict {
            let result: Result<u64, sv_abi::ErrorKind> = (|| $body)();
            match result {
                Ok(value) => sv_abi::Verdict::Success(value),
                Err(kind) => sv_abi::Verdict::Error(kind),
            }
        }
    };
    // A handler that sometimes needs to answer `continue` (spec.md §4.8's
    // `fstat`/`fstatat` demotion of an unknown caller) returns the `Verdict`
    // itself on the `Ok` side instead of a bare success value.
    ($name:ident($ctx:ident: &NotificationCtx) -> Result<Verdict, ErrorKind> $body:block) => {
        pub fn $name(
            $ctx: &$crate::dispatch::context::NotificationCtx,
        ) -> sv_abi::Verdict {
            let result: Result<sv_abi::Verdict, sv_abi::ErrorKind> = (|| $body)();
            match result {
                Ok(verdict) => verdict,
                Err(kind) => sv_abi::Verdict::Error(kind),
            }
        }
    };
}

pub(crate) use define_handler;
