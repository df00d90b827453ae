//! File backends: the fixed set of things a virtual file descriptor can
//! actually be (spec.md §4.2). Unlike a real VFS, the set of backend kinds
//! is closed and known at compile time, so dispatch is a match on
//! [`BackendKind`] rather than a vtable.

mod event;
mod passthrough;
mod proc;

pub use event::EventBackend;
pub use passthrough::PassthroughBackend;
pub use proc::ProcBackend;

use std::os::fd::RawFd;

use sv_abi::ExtendedStat;

/// `fstat(2)` via raw libc, shared by every backend that wraps a real host
/// fd. Kept in one place so the `libc::stat` -> [`ExtendedStat`] field
/// mapping is written once.
pub(crate) fn fstat_raw(fd: RawFd) -> Result<ExtendedStat, BackendError> {
    let mut st: libc::stat = unsafe { std::mem::zeroed() };
    // SAFETY: `fd` is a valid, open fd owned by the caller's backend; `st`
    // is a plain-old-data out parameter sized correctly for `fstat(2)`.
    let rc = unsafe { libc::fstat(fd, &mut st as *mut libc::stat) };
    if rc != 0 {
        return Err(BackendError::Io(std::io::Error::last_os_error()));
    }
    Ok(ExtendedStat {
        dev: st.st_dev as u64,
        ino: st.st_ino,
        mode: st.st_mode,
        nlink: st.st_nlink as u32,
        uid: st.st_uid,
        gid: st.st_gid,
        rdev: st.st_rdev as u64,
        size: st.st_size as u64,
        blksize: st.st_blksize as u32,
        blocks: st.st_blocks as u64,
        atime_sec: st.st_atime,
        atime_nsec: st.st_atime_nsec,
        mtime_sec: st.st_mtime,
        mtime_nsec: st.st_mtime_nsec,
        ctime_sec: st.st_ctime,
        ctime_nsec: st.st_ctime_nsec,
    })
}

/// An in-progress `ioctl`: either a narrow integer argument or a guest
/// buffer the backend reads/writes through the memory bridge before this
/// call (spec.md §4.2 lists `ioctl` as backend-dispatched).
pub enum IoctlArg<'a> {
    Int(u64),
    Buf(&'a mut [u8]),
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("operation not supported by this backend")]
    NotSupported,
    #[error("no such file or directory")]
    NotFound,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// The capabilities every backend exposes, regardless of concrete kind
/// (spec.md §4.2's "shared capabilities: statx, ioctl, close-on-drop").
/// Close-on-drop is not a method here: every backend owns its host fd as an
/// `OwnedFd`/`File`, so the capability falls out of `Drop` for free.
pub trait BackendOps {
    fn statx(&self) -> Result<ExtendedStat, BackendError>;
    fn ioctl(&self, request: u64, arg: IoctlArg<'_>) -> Result<i64, BackendError>;
}

/// The fixed set of backend kinds a [`crate::fs::File`] can wrap.
#[derive(Debug)]
pub enum BackendKind {
    Event(EventBackend),
    Passthrough(PassthroughBackend),
    Proc(ProcBackend),
}

impl BackendKind {
    pub fn raw_fd(&self) -> RawFd {
        match self {
            BackendKind::Event(b) => b.raw_fd(),
            BackendKind::Passthrough(b) => b.raw_fd(),
            BackendKind::Proc(b) => b.raw_fd(),
        }
    }
}

impl BackendOps for BackendKind {
    fn statx(&self) -> Result<ExtendedStat, BackendError> {
        match self {
            BackendKind::Event(b) => b.statx(),
            BackendKind::Passthrough(b) => b.statx(),
            BackendKind::Proc(b) => b.statx(),
        }
    }

    fn ioctl(&self, request: u64, arg: IoctlArg<'_>) -> Result<i64, BackendError> {
        match self {
            BackendKind::Event(b) => b.ioctl(request, arg),
            BackendKind::Passthrough(b) => b.ioctl(request, arg),
            BackendKind::Proc(b) => b.ioctl(request, arg),
        }
    }
}
