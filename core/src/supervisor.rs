//! The supervisor root: the aggregate every handler runs against
//! (spec.md §5). A single coarse mutex guards the registry and overlay;
//! the notification channel has its own lock so a blocking `addfd` never
//! holds up an unrelated lookup (spec.md §5's critical-section
//! discipline).

use std::io::Write;
use std::os::fd::RawFd;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use sv_abi::{AbsTid, AddFd, ErrorKind, ExtendedStat, Notification, Verdict, Vfd};

use crate::error::SupervisorError;
use crate::fs::FileTable;
use crate::overlay::{self, OverlayRoot};
use crate::registry::ThreadRegistry;
use crate::router::RouteDecision;
use crate::transport::{NotifyChannel, SeccompNotifyChannel};

/// Configuration for a fresh supervisor (spec.md §6's `SupervisorInit`).
pub struct SupervisorInit {
    /// Identifies this supervisor instance in logs.
    pub sandbox_id: String,
    /// Host pid/tid of the first guest thread the supervisor tracks.
    pub init_tid: AbsTid,
    /// Directory passthrough-routed paths are resolved underneath.
    pub host_root: PathBuf,
    pub stdout: Box<dyn Write + Send>,
    pub stderr: Box<dyn Write + Send>,
}

struct SupervisorState {
    registry: ThreadRegistry,
    overlay: OverlayRoot,
}

pub struct Supervisor {
    sandbox_id: String,
    state: Mutex<SupervisorState>,
    channel: Mutex<Box<dyn NotifyChannel>>,
    stdout: Mutex<Box<dyn Write + Send>>,
    stderr: Mutex<Box<dyn Write + Send>>,
}

impl Supervisor {
    pub fn new(init: SupervisorInit, channel: Box<dyn NotifyChannel>) -> Self {
        Supervisor {
            sandbox_id: init.sandbox_id,
            state: Mutex::new(SupervisorState {
                registry: ThreadRegistry::new(init.init_tid),
                overlay: OverlayRoot::new(init.host_root),
            }),
            channel: Mutex::new(channel),
            stdout: Mutex::new(init.stdout),
            stderr: Mutex::new(init.stderr),
        }
    }

    /// Convenience constructor for production use: wraps a raw seccomp
    /// user-notification fd (spec.md §6's `notify_fd`) in the real
    /// [`SeccompNotifyChannel`] transport.
    pub fn with_seccomp_notify_fd(init: SupervisorInit, notify_fd: std::os::fd::OwnedFd) -> Self {
        Supervisor::new(init, Box::new(SeccompNotifyChannel::new(notify_fd)))
    }

    pub fn sandbox_id(&self) -> &str {
        &self.sandbox_id
    }

    /// The guest thread that issued `notification`. In this model a host
    /// pid/tid *is* the `AbsTid` (spec.md's glossary: host-global
    /// identifiers are exactly what the kernel already hands the
    /// supervisor on every notification).
    pub fn caller(&self, notification: &Notification) -> AbsTid {
        AbsTid::new(notification.pid)
    }

    /// Runs `f` with exclusive access to the registry and fd tables. Keep
    /// this short: nothing that blocks on the kernel or another process's
    /// memory belongs inside it (spec.md §5).
    pub fn with_registry<R>(&self, f: impl FnOnce(&mut ThreadRegistry) -> R) -> R {
        let mut guard = self.state.lock().unwrap();
        f(&mut guard.registry)
    }

    /// A strong reference to `tid`'s fd table, cloned out from under the
    /// registry lock so the caller can do fd-table I/O without holding it
    /// (spec.md §5).
    pub fn fd_table_of(&self, tid: AbsTid) -> Result<Arc<Mutex<FileTable>>, ErrorKind> {
        self.with_registry(|reg| reg.get(tid).map(|t| Arc::clone(&t.fd_table)))
    }

    pub fn statx_by_path(
        &self,
        decision: RouteDecision,
        path: &str,
        caller: AbsTid,
    ) -> Result<ExtendedStat, ErrorKind> {
        let mut guard = self.state.lock().unwrap();
        let SupervisorState { registry, overlay } = &mut *guard;
        overlay::statx_by_path(overlay, decision, path, caller, registry)
    }

    /// Installs a host fd into the guest's real fd table. Issued outside
    /// the registry lock: this may block on the kernel (spec.md §4.1's
    /// addfd side-effect).
    pub fn install_fd(
        &self,
        notification_id: u64,
        host_fd: RawFd,
        target_vfd: Vfd,
        cloexec: bool,
    ) -> Result<(), SupervisorError> {
        self.channel.lock().unwrap().add_fd(AddFd {
            notification_id,
            host_fd,
            target_vfd,
            cloexec,
        })
    }

    pub fn recv(&self) -> Result<Notification, SupervisorError> {
        self.channel.lock().unwrap().recv()
    }

    pub fn respond(&self, id: u64, verdict: Verdict) -> Result<(), SupervisorError> {
        self.channel.lock().unwrap().send(id, verdict)
    }

    pub fn log_stdout(&self, bytes: &[u8]) -> std::io::Result<()> {
        self.stdout.lock().unwrap().write_all(bytes)
    }

    pub fn log_stderr(&self, bytes: &[u8]) -> std::io::Result<()> {
        self.stderr.lock().unwrap().write_all(bytes)
    }
}
