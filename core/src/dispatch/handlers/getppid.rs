//! `getppid`: the caller's parent thread group leader, namespaced to the
//! caller's own namespace rather than the parent's (spec.md §4.8).

use sv_abi::ErrorKind;

use crate::dispatch::context::NotificationCtx;
use crate::dispatch::macros::define_handler;

define_handler!(getppid(ctx: &NotificationCtx) -> Result<u64, ErrorKind> {
    let caller = ctx.caller();
    ctx.supervisor.with_registry(|registry| {
        let thread = registry.get(caller)?;
        let caller_ns = thread.namespace_id;
        let Some(parent) = thread.parent else {
            return Ok(0);
        };
        let parent_tgid = registry.get(parent)?.tgid;
        let parent_leader = registry.thread_group(parent_tgid)?.leader();
        Ok(registry.ns_tid_in_namespace(caller_ns, parent_leader).get() as u64)
    })
});

#[cfg(test)]
mod tests {
    use sv_abi::{AbsTid, CloneFlags, Notification, SyscallArgs, Verdict};

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
    fn init_thread_has_no_parent() {
        let sv = test_supervisor(AbsTid::new(100));
        let note = Notification {
            id: 1,
            pid: 100,
            syscall: sv_abi::syscall_nr::GETPPID,
            data: SyscallArgs::default(),
        };
        let ctx = super::NotificationCtx::new(&sv, &note);
        assert!(matches!(super::getppid(&ctx), Verdict::Success(0)));
    }

    #[test]
    fn child_sees_parent_pid() {
        let sv = test_supervisor(AbsTid::new(100));
        sv.with_registry(|reg| {
            reg.register_child(AbsTid::new(100), AbsTid::new(200), CloneFlags::empty())
        })
        .unwrap();
        let note = Notification {
            id: 2,
            pid: 200,
            syscall: sv_abi::syscall_nr::GETPPID,
            data: SyscallArgs::default(),
        };
        let ctx = super::NotificationCtx::new(&sv, &note);
        match super::getppid(&ctx) {
            Verdict::Success(v) => assert_eq!(v, 100),
            other => panic!("expected success, got {other:?}"),
        }
    }
}
