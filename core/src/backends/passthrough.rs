//! The backend behind a guest fd that is, underneath, a genuine host fd the
//! supervisor opened on the guest's behalf (spec.md §4.2).

use std::os::fd::{AsRawFd, OwnedFd, RawFd};

use sv_abi::ExtendedStat;

use super::{fstat_raw, BackendError, BackendOps, IoctlArg};

#[derive(Debug)]
pub struct PassthroughBackend {
    fd: OwnedFd,
}

impl PassthroughBackend {
    pub fn new(fd: OwnedFd) -> Self {
        PassthroughBackend { fd }
    }

    pub fn raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl BackendOps for PassthroughBackend {
    fn statx(&self) -> Result<ExtendedStat, BackendError> {
        fstat_raw(self.raw_fd())
    }

    fn ioctl(&self, request: u64, arg: IoctlArg<'_>) -> Result<i64, BackendError> {
        let rc = match arg {
            IoctlArg::Int(v) => unsafe { libc::ioctl(self.raw_fd(), request, v) },
            IoctlArg::Buf(buf) => unsafe {
                libc::ioctl(self.raw_fd(), request, buf.as_mut_ptr())
            },
        };
        if rc < 0 {
            return Err(BackendError::Io(std::io::Error::last_os_error()));
        }
        Ok(rc as i64)
    }
}
