//! Shared wire types for the syscall notification supervisor: identifiers,
//! the notification/verdict protocol, clone flags, and the stat ABI.
//!
//! This is the single source of truth both the core engine and any future
//! caller (CLI, test harness) import from, mirroring the teacher crate's
//! role as the kernel/userland ABI boundary.

pub mod clone_flags;
pub mod errno;
pub mod ids;
pub mod notify;
pub mod stat;
pub mod syscall_nr;

pub use clone_flags::{AtFlags, CloneFlags, OpenFlags};
pub use errno::ErrorKind;
pub use ids::{AbsTgid, AbsTid, NsTgid, NsTid, Vfd, STDIO_RESERVED_VFDS};
pub use notify::{AddFd, Notification, SyscallArgs, Verdict};
pub use stat::{ExtendedStat, LegacyStat};
