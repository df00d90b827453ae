//! The path router: a pure function from an absolute path to a routing
//! decision (spec.md §4.4). Routing policy itself — which prefixes are
//! blocked, which hit `/proc` — is out of scope; the contract this module
//! owns is determinism and purity, not the rule table. The rules below are
//! a minimal stand-in sufficient to exercise that contract.

use sv_abi::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendTag {
    Passthrough,
    Proc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Block,
    Handle(BackendTag),
}

/// Routes `path`, which must already be the guest's raw (not yet
/// normalized) path string. Returns `Inval` for anything that cannot be
/// normalized to an absolute, `.`/`..`-free path.
pub fn route(path: &str) -> Result<RouteDecision, ErrorKind> {
    let normalized = normalize(path)?;
    if normalized == "/proc" || normalized.starts_with("/proc/") {
        return Ok(RouteDecision::Handle(BackendTag::Proc));
    }
    if normalized == "/forbidden" || normalized.starts_with("/forbidden/") {
        return Ok(RouteDecision::Block);
    }
    Ok(RouteDecision::Handle(BackendTag::Passthrough))
}

/// Rejects anything not absolute, containing an embedded NUL, or carrying
/// a `.`/`..` component. Does not touch the filesystem: purely syntactic.
fn normalize(path: &str) -> Result<&str, ErrorKind> {
    if path.is_empty() || !path.starts_with('/') || path.contains('\0') {
        return Err(ErrorKind::Inval);
    }
    for component in path.split('/') {
        if component == "." || component == ".." {
            return Err(ErrorKind::Inval);
        }
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_paths() {
        assert_eq!(route("etc/passwd"), Err(ErrorKind::Inval));
    }

    #[test]
    fn rejects_dotdot_traversal() {
        assert_eq!(route("/a/../b"), Err(ErrorKind::Inval));
    }

    #[test]
    fn routes_proc_paths() {
        assert_eq!(
            route("/proc/1234"),
            Ok(RouteDecision::Handle(BackendTag::Proc))
        );
    }

    #[test]
    fn blocks_forbidden_prefix() {
        assert_eq!(route("/forbidden/secret"), Ok(RouteDecision::Block));
    }

    #[test]
    fn falls_back_to_passthrough() {
        assert_eq!(
            route("/etc/hostname"),
            Ok(RouteDecision::Handle(BackendTag::Passthrough))
        );
    }
}
