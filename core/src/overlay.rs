//! The overlay root: the merged view [`crate::router::route`] decisions
//! are resolved against for path-based operations like `fstatat`
//! (spec.md §4.3, §4.4).

use std::os::fd::{FromRawFd, OwnedFd};
use std::path::{Path, PathBuf};

use nix::fcntl::{self, OFlag};
use nix::sys::stat::Mode;
use sv_abi::{AbsTid, ErrorKind, ExtendedStat, NsTgid};

use crate::backends::{BackendError, BackendOps, PassthroughBackend, ProcBackend};
use crate::registry::ThreadRegistry;
use crate::router::{BackendTag, RouteDecision};

/// The real directory passthrough-routed paths are resolved underneath.
/// Immutable for the lifetime of the supervisor it belongs to.
pub struct OverlayRoot {
    host_root: PathBuf,
}

impl OverlayRoot {
    pub fn new(host_root: impl Into<PathBuf>) -> Self {
        OverlayRoot {
            host_root: host_root.into(),
        }
    }

    pub fn host_root(&self) -> &Path {
        &self.host_root
    }
}

fn map_backend_err(e: BackendError) -> ErrorKind {
    match e {
        BackendError::NotFound => ErrorKind::Noent,
        BackendError::NotSupported => ErrorKind::Inval,
        BackendError::Io(_) => ErrorKind::Io,
    }
}

/// Extracts the namespaced tgid from a `/proc/<nstgid>`-shaped path.
fn parse_proc_nstgid(path: &str) -> Option<u32> {
    let rest = path.strip_prefix("/proc/")?;
    let first = rest.split('/').next()?;
    first.parse::<u32>().ok()
}

/// Resolves a routed path to its [`ExtendedStat`]. The registry is only
/// touched for `Proc`-routed paths: the caller thread is resolved first
/// (missing caller -> `SRCH`), then newly created guest threads are given a
/// chance to become visible before the proc lookup (spec.md §4.3's
/// `syncNewThreads` call, spec.md §4.8's fstatat note).
pub fn statx_by_path(
    overlay: &OverlayRoot,
    decision: RouteDecision,
    path: &str,
    caller: AbsTid,
    registry: &mut ThreadRegistry,
) -> Result<ExtendedStat, ErrorKind> {
    match decision {
        RouteDecision::Block => Err(ErrorKind::Perm),
        RouteDecision::Handle(BackendTag::Proc) => {
            registry.get(caller)?;
            registry.sync_new_threads();
            let nstgid = parse_proc_nstgid(path).ok_or(ErrorKind::Noent)?;
            ProcBackend::new(NsTgid::new(nstgid))
                .statx()
                .map_err(map_backend_err)
        }
        RouteDecision::Handle(BackendTag::Passthrough) => {
            let full = overlay.host_root.join(path.trim_start_matches('/'));
            let fd = fcntl::open(&full, OFlag::O_PATH | OFlag::O_NOFOLLOW, Mode::empty())
                .map_err(|_| ErrorKind::Noent)?;
            // SAFETY: `open` just returned a fresh, owned fd.
            let owned = unsafe { OwnedFd::from_raw_fd(fd) };
            PassthroughBackend::new(owned)
                .statx()
                .map_err(map_backend_err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_abi::AbsTid;

    #[test]
    fn parses_proc_nstgid() {
        assert_eq!(parse_proc_nstgid("/proc/1234"), Some(1234));
        assert_eq!(parse_proc_nstgid("/proc/1234/status"), Some(1234));
        assert_eq!(parse_proc_nstgid("/proc/self"), None);
    }

    #[test]
    fn blocked_route_never_touches_the_filesystem() {
        let overlay = OverlayRoot::new("/");
        let mut registry = ThreadRegistry::new(AbsTid::new(1));
        let result = statx_by_path(
            &overlay,
            RouteDecision::Block,
            "/forbidden",
            AbsTid::new(1),
            &mut registry,
        );
        assert_eq!(result, Err(ErrorKind::Perm));
    }

    #[test]
    fn proc_route_with_unknown_caller_is_srch() {
        let overlay = OverlayRoot::new("/");
        let mut registry = ThreadRegistry::new(AbsTid::new(1));
        let result = statx_by_path(
            &overlay,
            RouteDecision::Handle(BackendTag::Proc),
            "/proc/1",
            AbsTid::new(999),
            &mut registry,
        );
        assert_eq!(result, Err(ErrorKind::Srch));
    }
}
