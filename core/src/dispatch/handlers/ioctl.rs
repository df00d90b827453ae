//! `ioctl`: forwarded to whichever backend owns the vfd (spec.md §4.2,
//! §4.8, the bad-fd scenario from spec.md §8's S4).
//!
//! The request's encoded `size`/`direction` bits follow the standard Linux
//! `_IOC_*` layout (`asm-generic/ioctl.h`): `size == 0` means `argp` is a
//! bare integer; otherwise it is a guest pointer to a `size`-byte payload,
//! capped at 256 bytes with no bridging performed above that cap
//! (spec.md §4.2).

use sv_abi::ErrorKind;

use crate::backends::{BackendError, IoctlArg};
use crate::bridge;
use crate::dispatch::context::NotificationCtx;
use crate::dispatch::macros::define_handler;

const MAX_PAYLOAD: usize = 256;

const NRBITS: u32 = 8;
const TYPEBITS: u32 = 8;
const SIZEBITS: u32 = 14;
const DIRBITS: u32 = 2;

const SIZESHIFT: u32 = NRBITS + TYPEBITS;
const DIRSHIFT: u32 = SIZESHIFT + SIZEBITS;

const DIR_WRITE: u64 = 1;
const DIR_READ: u64 = 2;

fn payload_size(request: u64) -> usize {
    ((request >> SIZESHIFT) & ((1 << SIZEBITS) - 1)) as usize
}

fn direction(request: u64) -> u64 {
    (request >> DIRSHIFT) & ((1 << DIRBITS) - 1)
}

fn map_backend_err(e: BackendError) -> ErrorKind {
    match e {
        BackendError::NotSupported => ErrorKind::Inval,
        BackendError::NotFound => ErrorKind::Noent,
        BackendError::Io(_) => ErrorKind::Io,
    }
}

define_handler!(ioctl(ctx: &NotificationCtx) -> Result<u64, ErrorKind> {
    let vfd = ctx.args().arg0_u32();
    let request = ctx.args().arg1;
    let argp = ctx.args().arg2;

    let fd_table = ctx.supervisor.fd_table_of(ctx.caller())?;
    let file = fd_table.lock().unwrap().get_ref(vfd).ok_or(ErrorKind::Badf)?;

    let size = payload_size(request);
    if size == 0 {
        let rc = file.ioctl(request, IoctlArg::Int(argp)).map_err(map_backend_err)?;
        return Ok(rc as u64);
    }

    if size > MAX_PAYLOAD {
        return Err(ErrorKind::Inval);
    }

    let dir = direction(request);
    let mut payload = [0u8; MAX_PAYLOAD];
    let buf = &mut payload[..size];
    if dir & DIR_WRITE != 0 {
        bridge::read_slice(buf, ctx.notification.pid, argp)?;
    } else {
        buf.fill(0);
    }

    let rc = file.ioctl(request, IoctlArg::Buf(buf)).map_err(map_backend_err)?;

    if dir & DIR_READ != 0 {
        bridge::write_slice(buf, ctx.notification.pid, argp)?;
    }

    Ok(rc as u64)
});
