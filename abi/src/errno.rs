//! Kernel-compatible error kinds (spec.md §7).
//!
//! These are the only values a guest syscall can observe as a negative
//! return; supervisor invariant violations never reach this type, they
//! panic instead (spec.md §7).

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("bad file descriptor")]
    Badf,
    #[error("no such process")]
    Srch,
    #[error("invalid argument")]
    Inval,
    #[error("bad address")]
    Fault,
    #[error("i/o error")]
    Io,
    #[error("no such file or directory")]
    Noent,
    #[error("function not implemented")]
    Nosys,
    #[error("operation not permitted")]
    Perm,
}

impl ErrorKind {
    /// The positive errno value the guest's `-errno` return is built from.
    pub const fn errno(self) -> i32 {
        match self {
            ErrorKind::Badf => libc::EBADF,
            ErrorKind::Srch => libc::ESRCH,
            ErrorKind::Inval => libc::EINVAL,
            ErrorKind::Fault => libc::EFAULT,
            ErrorKind::Io => libc::EIO,
            ErrorKind::Noent => libc::ENOENT,
            ErrorKind::Nosys => libc::ENOSYS,
            ErrorKind::Perm => libc::EPERM,
        }
    }
}
