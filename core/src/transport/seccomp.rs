//! The real transport: `SECCOMP_IOCTL_NOTIF_*` against the fd a guest's
//! `seccomp(2)` filter installation handed back (spec.md §6's "the kernel
//! notification channel"). `nix` has no high-level wrapper for these, so
//! the ioctl numbers and wire structs are reproduced here from
//! `linux/seccomp.h`.

use std::os::fd::{AsRawFd, OwnedFd};

use nix::{ioctl_read, ioctl_readwrite, ioctl_write_ptr};
use sv_abi::{AddFd, Notification, SyscallArgs, Verdict};

use super::NotifyChannel;
use crate::error::SupervisorError;

const SECCOMP_IOC_MAGIC: u8 = b'!';

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct SeccompData {
    nr: i32,
    arch: u32,
    instruction_pointer: u64,
    args: [u64; 6],
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct SeccompNotif {
    id: u64,
    pid: u32,
    flags: u32,
    data: SeccompData,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct SeccompNotifResp {
    id: u64,
    val: i64,
    error: i32,
    flags: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct SeccompNotifAddFd {
    id: u64,
    flags: u32,
    srcfd: u32,
    newfd: u32,
    newfd_flags: u32,
}

ioctl_readwrite!(notif_recv, SECCOMP_IOC_MAGIC, 0, SeccompNotif);
ioctl_readwrite!(notif_send, SECCOMP_IOC_MAGIC, 1, SeccompNotifResp);
ioctl_read!(notif_id_valid, SECCOMP_IOC_MAGIC, 2, u64);
ioctl_write_ptr!(notif_addfd, SECCOMP_IOC_MAGIC, 3, SeccompNotifAddFd);

/// A live seccomp-unotify channel bound to one guest thread's filter fd.
pub struct SeccompNotifyChannel {
    fd: OwnedFd,
}

impl SeccompNotifyChannel {
    pub fn new(fd: OwnedFd) -> Self {
        SeccompNotifyChannel { fd }
    }
}

impl NotifyChannel for SeccompNotifyChannel {
    fn recv(&mut self) -> Result<Notification, SupervisorError> {
        let mut raw = SeccompNotif::default();
        // SAFETY: `raw` is a valid, correctly sized out parameter for
        // `SECCOMP_IOCTL_NOTIF_RECV`.
        unsafe { notif_recv(self.fd.as_raw_fd(), &mut raw) }
            .map_err(|e| SupervisorError::Channel(std::io::Error::from(e)))?;
        Ok(Notification {
            id: raw.id,
            pid: raw.pid,
            syscall: raw.data.nr as u64,
            data: SyscallArgs {
                arg0: raw.data.args[0],
                arg1: raw.data.args[1],
                arg2: raw.data.args[2],
                arg3: raw.data.args[3],
                arg4: raw.data.args[4],
                arg5: raw.data.args[5],
            },
        })
    }

    fn send(&mut self, id: u64, verdict: Verdict) -> Result<(), SupervisorError> {
        let (val, error) = match verdict {
            Verdict::Success(v) => (v as i64, 0),
            Verdict::Error(kind) => (-1, kind.errno()),
            // SECCOMP_USER_NOTIF_FLAG_CONTINUE asks the kernel to run the
            // original syscall; the response body is otherwise ignored.
            Verdict::Continue => (0, 0),
        };
        let flags = if matches!(verdict, Verdict::Continue) {
            1
        } else {
            0
        };
        let mut resp = SeccompNotifResp {
            id,
            val,
            error,
            flags,
        };
        // SAFETY: `resp` is fully initialized and matches the kernel's
        // expected layout for `SECCOMP_IOCTL_NOTIF_SEND`.
        unsafe { notif_send(self.fd.as_raw_fd(), &mut resp) }
            .map_err(|e| SupervisorError::Channel(std::io::Error::from(e)))?;
        Ok(())
    }

    fn add_fd(&mut self, req: AddFd) -> Result<(), SupervisorError> {
        let add = SeccompNotifAddFd {
            id: req.notification_id,
            flags: 0,
            srcfd: req.host_fd as u32,
            newfd: req.target_vfd,
            newfd_flags: if req.cloexec { libc::O_CLOEXEC as u32 } else { 0 },
        };
        // SAFETY: `add` is fully initialized and matches the kernel's
        // expected layout for `SECCOMP_IOCTL_NOTIF_ADDFD`.
        unsafe { notif_addfd(self.fd.as_raw_fd(), &add) }
            .map_err(|e| SupervisorError::Channel(std::io::Error::from(e)))?;
        Ok(())
    }
}

impl SeccompNotifyChannel {
    /// Whether `id` still refers to a notification the kernel is waiting
    /// on (the guest may have been killed before a verdict arrived).
    pub fn id_is_valid(&self, id: u64) -> bool {
        let mut id = id;
        // SAFETY: `id` is a valid in/out parameter for
        // `SECCOMP_IOCTL_NOTIF_ID_VALID`.
        unsafe { notif_id_valid(self.fd.as_raw_fd(), &mut id) }.is_ok()
    }
}
