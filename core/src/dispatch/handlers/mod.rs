//! The fixed set of syscalls the supervisor knows how to virtualize
//! (spec.md §4.8).

mod close;
mod dup3;
mod eventfd2;
mod fstat;
mod fstatat;
mod getpid;
mod getppid;
mod ioctl;

use sv_abi::{syscall_nr, Verdict};

use super::context::NotificationCtx;

pub type Handler = fn(&NotificationCtx) -> Verdict;

/// Looks up the handler for a syscall number, or `None` if the supervisor
/// was never asked to filter it in the first place.
pub fn lookup(syscall: u64) -> Option<Handler> {
    match syscall {
        syscall_nr::CLOSE => Some(close::close),
        syscall_nr::DUP3 => Some(dup3::dup3),
        syscall_nr::EVENTFD2 => Some(eventfd2::eventfd2),
        syscall_nr::FSTAT => Some(fstat::fstat),
        syscall_nr::NEWFSTATAT => Some(fstatat::fstatat),
        syscall_nr::GETPID => Some(getpid::getpid),
        syscall_nr::GETPPID => Some(getppid::getppid),
        syscall_nr::IOCTL => Some(ioctl::ioctl),
        _ => None,
    }
}
