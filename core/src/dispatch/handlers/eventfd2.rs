//! `eventfd2`: create a real host eventfd backend and splice it into the
//! guest's fd table and kernel fd table (spec.md §4.2, §4.8, the
//! canonical worked example from spec.md §8's S1/S2).

use std::sync::Arc;

use sv_abi::{ErrorKind, OpenFlags};

use crate::backends::{BackendKind, EventBackend};
use crate::dispatch::context::NotificationCtx;
use crate::dispatch::macros::define_handler;
use crate::fs::File;

define_handler!(eventfd2(ctx: &NotificationCtx) -> Result<u64, ErrorKind> {
    let count = ctx.args().arg0_u32();
    let flags = OpenFlags::from_bits_truncate(ctx.args().arg1_u32());
    let cloexec = flags.contains(OpenFlags::CLOEXEC);

    let backend = EventBackend::new(count, flags.bits()).map_err(|_| ErrorKind::Io)?;
    let host_fd = backend.raw_fd();
    let file = Arc::new(File::new(BackendKind::Event(backend)));

    let fd_table = ctx.supervisor.fd_table_of(ctx.caller())?;
    let vfd = fd_table.lock().unwrap().insert(file, cloexec);

    if let Err(_err) = ctx
        .supervisor
        .install_fd(ctx.id(), host_fd, vfd, cloexec)
    {
        // The kernel side never learned about `vfd`; undo the guest-side
        // bookkeeping so a later lookup doesn't find a half-installed fd.
        fd_table.lock().unwrap().remove(vfd);
        return Err(ErrorKind::Io);
    }
    Ok(vfd as u64)
});

#[cfg(test)]
mod tests {
    use sv_abi::{AbsTid, Notification, SyscallArgs};

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
    fn eventfd2_allocates_at_lowest_free_vfd() {
        let sv = test_supervisor();
        let note = Notification {
            id: 1,
            pid: 100,
            syscall: sv_abi::syscall_nr::EVENTFD2,
            data: SyscallArgs::default(),
        };
        let ctx = super::NotificationCtx::new(&sv, &note);
        match super::eventfd2(&ctx) {
            sv_abi::Verdict::Success(vfd) => assert_eq!(vfd, 3),
            other => panic!("expected success, got {other:?}"),
        }
    }
}
