//! `fstatat`: read a path out of guest memory, route it, resolve it
//! through the overlay, and write the translated stat back
//! (spec.md §4.3, §4.4, §4.8, the blocked-path scenario from spec.md §8's
//! S6).

use sv_abi::{legacy_stat_bytes, AtFlags, ErrorKind, LegacyStat, Verdict};

use super::fstat;
use crate::bridge;
use crate::dispatch::context::NotificationCtx;
use crate::dispatch::macros::define_handler;
use crate::router;

/// Paths are read in up to 256-byte chunks, matching the ioctl payload cap
/// rather than `PATH_MAX` (spec.md §4.8's fstatat note, open question (b)).
const PATH_BUF_LEN: usize = 256;

define_handler!(fstatat(ctx: &NotificationCtx) -> Result<Verdict, ErrorKind> {
    let dirfd = ctx.args().arg0_u32();
    let path_addr = ctx.args().arg1;
    let stat_addr = ctx.args().arg2;
    let at_flags = AtFlags::from_bits_truncate(ctx.args().arg3_u32());

    let mut path_buf = [0u8; PATH_BUF_LEN];
    let len = bridge::read_string(&mut path_buf, ctx.notification.pid, path_addr)?;
    let path = std::str::from_utf8(&path_buf[..len]).map_err(|_| ErrorKind::Inval)?;

    if at_flags.contains(AtFlags::EMPTY_PATH) && path.is_empty() {
        return fstat::stat_vfd(ctx, dirfd, stat_addr);
    }

    // Reject a relative path before it ever reaches the router: the router
    // only sees normalized absolute paths.
    if !path.starts_with('/') {
        return Err(ErrorKind::Inval);
    }

    let decision = router::route(path)?;
    let extended = ctx.supervisor.statx_by_path(decision, path, ctx.caller())?;
    let legacy: LegacyStat = extended.into();
    bridge::write_slice(legacy_stat_bytes(&legacy), ctx.notification.pid, stat_addr)?;
    Ok(Verdict::Success(0))
});
