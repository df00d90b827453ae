//! The notification channel boundary (spec.md §4.1, §6). The kernel-level
//! transport itself is out of scope; this trait is the seam the dispatcher
//! is written against, so it can run against a real seccomp-unotify fd in
//! production and an in-memory fake in tests.

mod fake;
mod seccomp;

pub use fake::FakeChannel;
pub use seccomp::SeccompNotifyChannel;

use sv_abi::{AddFd, Notification, Verdict};

use crate::error::SupervisorError;

pub trait NotifyChannel: Send {
    /// Blocks until the next filtered syscall arrives.
    fn recv(&mut self) -> Result<Notification, SupervisorError>;
    /// Delivers the dispatcher's verdict for notification `id`.
    fn send(&mut self, id: u64, verdict: Verdict) -> Result<(), SupervisorError>;
    /// Installs a host fd into the guest's real kernel fd table.
    fn add_fd(&mut self, req: AddFd) -> Result<(), SupervisorError>;
}
