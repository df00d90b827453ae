//! The guest memory bridge: reading and writing a guest thread's address
//! space from the supervisor's own process, keyed by host pid
//! (spec.md §4.5). Hosted supervisors have no page tables to walk, so this
//! is `process_vm_readv`/`process_vm_writev` rather than the teacher's
//! page-table-validated copy_from_user.

use std::io::{IoSlice, IoSliceMut};

use nix::sys::uio::{process_vm_readv, process_vm_writev, RemoteIoVec};
use nix::unistd::Pid;
use sv_abi::ErrorKind;

/// Reads `dst.len()` bytes from `pid`'s address space at `addr` into `dst`.
/// Any failure — no such process, unmapped address, partial read — is
/// reported as `Fault`, matching the single failure mode spec.md §4.5
/// surfaces to the guest.
pub fn read_slice(dst: &mut [u8], pid: u32, addr: u64) -> Result<(), ErrorKind> {
    if dst.is_empty() {
        return Ok(());
    }
    let remote = RemoteIoVec {
        base: addr as usize,
        len: dst.len(),
    };
    let local = [IoSliceMut::new(dst)];
    let n = process_vm_readv(Pid::from_raw(pid as i32), &local, &[remote])
        .map_err(|_| ErrorKind::Fault)?;
    if n != local[0].len() {
        return Err(ErrorKind::Fault);
    }
    Ok(())
}

/// Writes `src` into `pid`'s address space at `addr`.
pub fn write_slice(src: &[u8], pid: u32, addr: u64) -> Result<(), ErrorKind> {
    if src.is_empty() {
        return Ok(());
    }
    let remote = RemoteIoVec {
        base: addr as usize,
        len: src.len(),
    };
    let local = [IoSlice::new(src)];
    let n = process_vm_writev(Pid::from_raw(pid as i32), &local, &[remote])
        .map_err(|_| ErrorKind::Fault)?;
    if n != src.len() {
        return Err(ErrorKind::Fault);
    }
    Ok(())
}

/// Reads a NUL-terminated string of at most `buf.len()` bytes starting at
/// `addr`, returning the length of the string excluding the NUL. A string
/// that does not terminate within `buf.len()` bytes is treated the same as
/// any other bridge failure: `Fault` (an unresolved open question in
/// spec.md §4.5 — see DESIGN.md).
pub fn read_string(buf: &mut [u8], pid: u32, addr: u64) -> Result<usize, ErrorKind> {
    read_slice(buf, pid, addr)?;
    buf.iter().position(|&b| b == 0).ok_or(ErrorKind::Fault)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_slice_is_noop_for_empty_buffer() {
        assert_eq!(read_slice(&mut [], 1, 0), Ok(()));
    }

    #[test]
    fn read_from_nonexistent_pid_is_fault() {
        let mut buf = [0u8; 8];
        // pid 1 almost certainly exists but this address space is not ours
        // to read without CAP_SYS_PTRACE; a wildly invalid pid guarantees
        // ESRCH either way.
        let result = read_slice(&mut buf, u32::MAX, 0x1000);
        assert_eq!(result, Err(ErrorKind::Fault));
    }
}
