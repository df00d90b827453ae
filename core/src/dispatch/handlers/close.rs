//! `close`: drop the caller's reference to a vfd, tearing the backend down
//! if that was the last one (spec.md §4.2, §4.8).

use sv_abi::ErrorKind;

use crate::dispatch::context::NotificationCtx;
use crate::dispatch::macros::define_handler;

define_handler!(close(ctx: &NotificationCtx) -> Result<u64, ErrorKind> {
    let vfd = ctx.args().arg0_u32();
    let fd_table = ctx.supervisor.fd_table_of(ctx.caller())?;
    let removed = fd_table.lock().unwrap().remove(vfd);
    match removed {
        Some(_file) => Ok(0), // dropped here; last Arc teardown happens on drop
        None => Err(ErrorKind::Badf),
    }
});

#[cfg(test)]
mod tests {
    use sv_abi::{AbsTid, Notification, SyscallArgs, Verdict};

    use crate::supervisor::{Supervisor, SupervisorInit};

    fn test_supervisor() -> Supervisor {
        Supervisor::new(
            SupervisorInit {
                sandbox_id: "test".into(),
                init_tid: AbsTid::new(100),
                host_root: "/".into(),
                stdout: Box::new(std::io::sink()),
                stderr: Box::new(std::io::sink()),
            },
            Box::new(crate::transport::FakeChannel::new()),
        )
    }

    #[test]
    fn close_of_unopened_vfd_is_badf() {
        let sv = test_supervisor();
        let note = Notification {
            id: 1,
            pid: 100,
            syscall: sv_abi::syscall_nr::CLOSE,
            data: SyscallArgs {
                arg0: 3,
                ..Default::default()
            },
        };
        let ctx = super::NotificationCtx::new(&sv, &note);
        assert!(matches!(
            super::close(&ctx),
            Verdict::Error(sv_abi::ErrorKind::Badf)
        ));
    }
}
