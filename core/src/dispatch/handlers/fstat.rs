//! `fstat`: translate a backend's [`sv_abi::ExtendedStat`] into the legacy
//! ABI and write it into the caller's memory (spec.md §4.8, §6).
//!
//! FDs 0-2 and an unknown caller are both deliberately demoted to
//! `continue` rather than an error, per spec.md §9's open question (a) —
//! do not change either without revisiting that note.

use sv_abi::{legacy_stat_bytes, ErrorKind, LegacyStat, Verdict};

use crate::backends::BackendError;
use crate::bridge;
use crate::dispatch::context::NotificationCtx;
use crate::dispatch::macros::define_handler;

pub(crate) fn map_backend_err(e: BackendError) -> ErrorKind {
    match e {
        BackendError::NotSupported => ErrorKind::Inval,
        BackendError::NotFound => ErrorKind::Noent,
        BackendError::Io(_) => ErrorKind::Io,
    }
}

/// The shared body of `fstat(fd, statbuf_addr)`, also reused by `fstatat`'s
/// `AT_EMPTY_PATH` branch (spec.md §4.8's fstatat note).
pub(crate) fn stat_vfd(ctx: &NotificationCtx, vfd: u32, buf_addr: u64) -> Result<Verdict, ErrorKind> {
    if vfd <= 2 {
        return Ok(Verdict::Continue);
    }

    let fd_table = match ctx.supervisor.fd_table_of(ctx.caller()) {
        Ok(t) => t,
        Err(ErrorKind::Srch) => return Ok(Verdict::Continue),
        Err(e) => return Err(e),
    };
    let file = fd_table.lock().unwrap().get_ref(vfd).ok_or(ErrorKind::Badf)?;
    let extended = file.statx().map_err(map_backend_err)?;
    let legacy: LegacyStat = extended.into();
    bridge::write_slice(legacy_stat_bytes(&legacy), ctx.notification.pid, buf_addr)?;
    Ok(Verdict::Success(0))
}

define_handler!(fstat(ctx: &NotificationCtx) -> Result<Verdict, ErrorKind> {
    let vfd = ctx.args().arg0_u32();
    let buf_addr = ctx.args().arg1;
    stat_vfd(ctx, vfd, buf_addr)
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

    fn note(pid: u32, vfd: u32) -> Notification {
        Notification {
            id: 1,
            pid,
            syscall: sv_abi::syscall_nr::FSTAT,
            data: SyscallArgs {
                arg0: vfd as u64,
                ..Default::default()
            },
        }
    }

    #[test]
    fn stdio_vfd_continues() {
        let sv = test_supervisor();
        let note = note(100, 1);
        let ctx = super::NotificationCtx::new(&sv, &note);
        assert!(matches!(super::fstat(&ctx), Verdict::Continue));
    }

    #[test]
    fn unknown_caller_continues() {
        let sv = test_supervisor();
        let note = note(999, 3);
        let ctx = super::NotificationCtx::new(&sv, &note);
        assert!(matches!(super::fstat(&ctx), Verdict::Continue));
    }

    #[test]
    fn unopened_vfd_is_badf() {
        let sv = test_supervisor();
        let note = note(100, 3);
        let ctx = super::NotificationCtx::new(&sv, &note);
        assert!(matches!(
            super::fstat(&ctx),
            Verdict::Error(sv_abi::ErrorKind::Badf)
        ));
    }
}
