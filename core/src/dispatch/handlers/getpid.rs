//! `getpid`: the caller thread group's leader, namespaced to its own
//! namespace (spec.md §4.8).

use sv_abi::ErrorKind;

use crate::dispatch::context::NotificationCtx;
use crate::dispatch::macros::define_handler;

define_handler!(getpid(ctx: &NotificationCtx) -> Result<u64, ErrorKind> {
    let caller = ctx.caller();
    ctx.supervisor.with_registry(|registry| {
        let tgid = registry.get(caller)?.tgid;
        let leader = registry.thread_group(tgid)?.leader();
        let ns_tid = registry.ns_tid_in_own_namespace(leader)?;
        Ok(ns_tid.get() as u64)
    })
});

#[cfg(test)]
mod tests {
    use sv_abi::{AbsTid, Notification, SyscallArgs, Verdict};

    use crate::supervisor::{Supervisor, SupervisorInit};

    fn test_supervisor(init_tid: AbsTid) -> Supervisor {
        Supervisor::new(
            SupervisorInit {
                sandbox_id: "test".into(),
                init_tid,
                host_root: "/".into(),
                stdout: Box::new(std::io::sink()),
                stderr: Box::new(std::io::sink()),
            },
            Box::new(crate::transport::FakeChannel::new()),
        )
    }

    #[test]
    fn getpid_of_known_root_thread_is_its_own_ns_tid() {
        let sv = test_supervisor(AbsTid::new(100));
        let note = Notification {
            id: 1,
            pid: 100,
            syscall: sv_abi::syscall_nr::GETPID,
            data: SyscallArgs::default(),
        };
        let ctx = super::NotificationCtx::new(&sv, &note);
        match super::getpid(&ctx) {
            Verdict::Success(v) => assert_eq!(v, 100),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn getpid_of_unknown_thread_is_srch() {
        let sv = test_supervisor(AbsTid::new(100));
        let note = Notification {
            id: 2,
            pid: 7777,
            syscall: sv_abi::syscall_nr::GETPID,
            data: SyscallArgs::default(),
        };
        let ctx = super::NotificationCtx::new(&sv, &note);
        match super::getpid(&ctx) {
            Verdict::Error(sv_abi::ErrorKind::Srch) => {}
            other => panic!("expected Srch, got {other:?}"),
        }
    }
}
