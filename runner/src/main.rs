//! The runner binary: thin process wiring around [`sv_core::Supervisor`].
//!
//! Seccomp filter installation and guest process spawning are out of
//! scope (a separate privileged launcher is expected to `fork`+`exec` the
//! guest, install its `seccomp(2)` filter, and hand this process the
//! resulting notification fd — the same split `cattach`-style sandbox
//! attach tools use). This binary only needs that fd number, the host
//! root passthrough-routed paths resolve under, and the guest's initial
//! tid.

use std::os::fd::{FromRawFd, OwnedFd};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use sv_abi::AbsTid;
use sv_core::dispatch::Dispatcher;
use sv_core::{Supervisor, SupervisorInit};

fn main() -> Result<()> {
    sv_lib::logging::init();

    let mut args = std::env::args().skip(1);
    let notify_fd: i32 = args
        .next()
        .context("usage: sv-runner <notify_fd> <host_root> <init_tid>")?
        .parse()
        .context("notify_fd must be an integer fd number")?;
    let host_root = args.next().context("missing <host_root>")?;
    let init_tid: u32 = args
        .next()
        .context("missing <init_tid>")?
        .parse()
        .context("init_tid must be an integer pid")?;

    if notify_fd < 0 {
        bail!("notify_fd must be a valid fd number, got {notify_fd}");
    }
    // SAFETY: the caller (a privileged launcher) is expected to hand this
    // process ownership of `notify_fd` across the fork/exec boundary.
    let notify_fd: OwnedFd = unsafe { OwnedFd::from_raw_fd(notify_fd) };

    let supervisor = Arc::new(Supervisor::with_seccomp_notify_fd(
        SupervisorInit {
            sandbox_id: format!("sandbox-{init_tid}"),
            init_tid: AbsTid::new(init_tid),
            host_root: host_root.into(),
            stdout: Box::new(std::io::stdout()),
            stderr: Box::new(std::io::stderr()),
        },
        notify_fd,
    ));

    tracing::info!(init_tid, "supervisor starting");
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let handles = Dispatcher::spawn_workers(supervisor, workers);
    for handle in handles {
        let _ = handle.join();
    }
    Ok(())
}
