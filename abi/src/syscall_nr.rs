//! The syscall numbers the supervisor knows how to handle, x86_64 Linux
//! ABI (single source of truth, mirroring the teacher crate's own
//! `abi::syscall` table).

pub const CLOSE: u64 = 3;
pub const FSTAT: u64 = 5;
pub const IOCTL: u64 = 16;
pub const GETPID: u64 = 39;
pub const GETPPID: u64 = 110;
pub const NEWFSTATAT: u64 = 262;
pub const EVENTFD2: u64 = 290;
pub const DUP3: u64 = 292;
