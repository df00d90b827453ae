//! The backend behind a guest's `eventfd2` call: a real host eventfd, so
//! the guest's `read`/`write`/`poll` on the virtual fd is indistinguishable
//! from the genuine syscall (spec.md §4.2, §4.8 handler `eventfd2`).

use std::os::fd::{FromRawFd, OwnedFd, RawFd};

use sv_abi::ExtendedStat;

use super::{fstat_raw, BackendError, BackendOps, IoctlArg};

#[derive(Debug)]
pub struct EventBackend {
    fd: OwnedFd,
}

impl EventBackend {
    /// `count` and `flags` are the guest's narrowed `eventfd2(count, flags)`
    /// arguments; `flags` bits line up with the real `EFD_*` constants.
    pub fn new(count: u32, flags: u32) -> std::io::Result<Self> {
        // SAFETY: `eventfd(2)` either returns a valid owned fd or -1/errno.
        let raw = unsafe { libc::eventfd(count, flags as libc::c_int) };
        if raw < 0 {
            return Err(std::io::Error::last_os_error());
        }
        // SAFETY: `raw` was just returned by `eventfd(2)` and is owned here.
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };
        Ok(EventBackend { fd })
    }

    pub fn raw_fd(&self) -> RawFd {
        use std::os::fd::AsRawFd;
        self.fd.as_raw_fd()
    }
}

impl BackendOps for EventBackend {
    fn statx(&self) -> Result<ExtendedStat, BackendError> {
        fstat_raw(self.raw_fd())
    }

    fn ioctl(&self, _request: u64, _arg: IoctlArg<'_>) -> Result<i64, BackendError> {
        // Real eventfds accept no meaningful ioctls beyond FIONREAD, which
        // guests observing an eventfd never need; reject everything.
        Err(BackendError::NotSupported)
    }
}
