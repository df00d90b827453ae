//! The notification dispatch loop: pull one notification off the channel,
//! find its handler, reply (spec.md §4.1, §5). Mirrors the teacher's
//! `syscall_handle` entry point: an unrecognized syscall number never
//! reaches a handler, it gets `ENOSYS` straight back
//! (`core/src/syscall/dispatch.rs`'s unknown-syscall path).

use std::sync::Arc;
use std::thread;

use sv_abi::{ErrorKind, Verdict};
use tracing::{debug, warn};

use super::context::NotificationCtx;
use super::handlers;
use crate::error::SupervisorError;
use crate::supervisor::Supervisor;

pub struct Dispatcher {
    supervisor: Arc<Supervisor>,
}

impl Dispatcher {
    pub fn new(supervisor: Arc<Supervisor>) -> Self {
        Dispatcher { supervisor }
    }

    /// Services exactly one notification. Returns `Ok(false)` once the
    /// channel is closed, so callers can loop on `Ok(true)`.
    pub fn run_once(&self) -> Result<bool, SupervisorError> {
        let notification = match self.supervisor.recv() {
            Ok(n) => n,
            Err(SupervisorError::Closed) => return Ok(false),
            Err(e) => return Err(e),
        };

        let ctx = NotificationCtx::new(&self.supervisor, &notification);
        let verdict = match handlers::lookup(notification.syscall) {
            Some(handler) => {
                debug!(
                    sandbox = self.supervisor.sandbox_id(),
                    syscall = notification.syscall,
                    pid = notification.pid,
                    "dispatch"
                );
                handler(&ctx)
            }
            None => {
                warn!(syscall = notification.syscall, "unknown syscall");
                Verdict::Error(ErrorKind::Nosys)
            }
        };
        self.supervisor.respond(notification.id, verdict)?;
        Ok(true)
    }

    /// Runs `run_once` in a loop on the calling thread until the channel
    /// closes.
    pub fn run_forever(&self) -> Result<(), SupervisorError> {
        while self.run_once()? {}
        Ok(())
    }

    /// Spawns `workers` threads each running [`Self::run_forever`], for a
    /// real multi-threaded guest where handlers may run in parallel
    /// (spec.md §5). Each thread shares the same channel lock, so only one
    /// `recv`/`send` happens at a time; handler bodies themselves overlap.
    pub fn spawn_workers(supervisor: Arc<Supervisor>, workers: usize) -> Vec<thread::JoinHandle<()>> {
        (0..workers)
            .map(|_| {
                let supervisor = Arc::clone(&supervisor);
                thread::spawn(move || {
                    let dispatcher = Dispatcher::new(supervisor);
                    if let Err(e) = dispatcher.run_forever() {
                        warn!(error = %e, "dispatcher worker exiting");
                    }
                })
            })
            .collect()
    }
}
