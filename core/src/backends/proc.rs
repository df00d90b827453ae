//! Synthetic `/proc` entries: enough of a directory-like stat to satisfy a
//! guest's `fstatat("/proc/<nstgid>")` without shelling out to the host's
//! real procfs for every namespaced pid (spec.md §4.3, §4.4).

use std::os::fd::RawFd;

use sv_abi::{ExtendedStat, NsTgid};

use super::{BackendError, BackendOps, IoctlArg};

#[derive(Debug)]
pub struct ProcBackend {
    nstgid: NsTgid,
}

impl ProcBackend {
    pub fn new(nstgid: NsTgid) -> Self {
        ProcBackend { nstgid }
    }

    pub fn nstgid(&self) -> NsTgid {
        self.nstgid
    }

    /// No real fd backs a synthetic proc entry; `-1` is never dereferenced
    /// by anything other than [`super::BackendKind::raw_fd`] debug paths.
    pub fn raw_fd(&self) -> RawFd {
        -1
    }
}

const S_IFDIR: u32 = 0o040000;

impl BackendOps for ProcBackend {
    fn statx(&self) -> Result<ExtendedStat, BackendError> {
        Ok(ExtendedStat {
            dev: 0,
            ino: self.nstgid.get() as u64,
            mode: S_IFDIR | 0o555,
            nlink: 2,
            uid: 0,
            gid: 0,
            rdev: 0,
            size: 0,
            blksize: 4096,
            blocks: 0,
            atime_sec: 0,
            atime_nsec: 0,
            mtime_sec: 0,
            mtime_nsec: 0,
            ctime_sec: 0,
            ctime_nsec: 0,
        })
    }

    fn ioctl(&self, _request: u64, _arg: IoctlArg<'_>) -> Result<i64, BackendError> {
        Err(BackendError::NotSupported)
    }
}
