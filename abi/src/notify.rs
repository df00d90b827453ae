//! The kernel notification transport's wire shapes (spec.md §6).
//!
//! `Notification` is what arrives on `notify_fd`; `Verdict` is what the
//! dispatcher writes back. `AddFd` is the side-channel request a handler
//! may additionally issue to install a real host fd into the guest's
//! kernel fd table (spec.md §4.1's "addfd side-effect").

use crate::errno::ErrorKind;

/// Raw, unnarrowed syscall arguments. Handlers narrow these as their own
/// ABI dictates (spec.md §4.1).
#[derive(Debug, Clone, Copy, Default)]
pub struct SyscallArgs {
    pub arg0: u64,
    pub arg1: u64,
    pub arg2: u64,
    pub arg3: u64,
    pub arg4: u64,
    pub arg5: u64,
}

impl SyscallArgs {
    #[inline]
    pub fn arg0_u32(&self) -> u32 {
        self.arg0 as u32
    }
    #[inline]
    pub fn arg0_i32(&self) -> i32 {
        self.arg0 as i32
    }
    #[inline]
    pub fn arg1_u32(&self) -> u32 {
        self.arg1 as u32
    }
    #[inline]
    pub fn arg1_usize(&self) -> usize {
        self.arg1 as usize
    }
    #[inline]
    pub fn arg2_u32(&self) -> u32 {
        self.arg2 as u32
    }
    #[inline]
    pub fn arg2_usize(&self) -> usize {
        self.arg2 as usize
    }
    #[inline]
    pub fn arg3_u32(&self) -> u32 {
        self.arg3 as u32
    }
}

/// A filtered guest syscall awaiting a supervisor verdict.
#[derive(Debug, Clone, Copy)]
pub struct Notification {
    pub id: u64,
    /// Host pid of the thread that issued the syscall.
    pub pid: u32,
    pub syscall: u64,
    pub data: SyscallArgs,
}

/// The dispatcher's reply to a single notification (spec.md §4.1).
#[derive(Debug, Clone, Copy)]
pub enum Verdict {
    /// The guest syscall returns `ret_value`.
    Success(u64),
    /// The guest syscall returns `-kind.errno()`.
    Error(ErrorKind),
    /// The kernel proceeds with the original syscall unmodified.
    Continue,
}

impl Verdict {
    pub fn ok(value: u64) -> Self {
        Verdict::Success(value)
    }

    pub fn err(kind: ErrorKind) -> Self {
        Verdict::Error(kind)
    }
}

/// Request to install a real host fd into the guest's kernel fd table at
/// `target_vfd`, with `cloexec` inherited from the guest's requested flags.
#[derive(Debug, Clone, Copy)]
pub struct AddFd {
    pub notification_id: u64,
    pub host_fd: i32,
    pub target_vfd: u32,
    pub cloexec: bool,
}
