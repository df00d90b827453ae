//! `dup3`: install a second vfd sharing the same [`crate::fs::File`]
//! (spec.md §4.2, §4.8).

use sv_abi::{ErrorKind, OpenFlags};

use crate::dispatch::context::NotificationCtx;
use crate::dispatch::macros::define_handler;

define_handler!(dup3(ctx: &NotificationCtx) -> Result<u64, ErrorKind> {
    let old_vfd = ctx.args().arg0_u32();
    let new_vfd = ctx.args().arg1_u32();
    let flags = OpenFlags::from_bits_truncate(ctx.args().arg2_u32());
    if old_vfd == new_vfd {
        return Err(ErrorKind::Inval);
    }
    let fd_table = ctx.supervisor.fd_table_of(ctx.caller())?;
    let mut table = fd_table.lock().unwrap();
    let file = table.get_ref(old_vfd).ok_or(ErrorKind::Badf)?;
    table.insert_at(new_vfd, file, flags.contains(OpenFlags::CLOEXEC));
    Ok(new_vfd as u64)
});
