//! Supervisor-wide logging setup.
//!
//! The teacher funnels all kernel log output through a single registered
//! backend (`klog::klog_register_backend`) with a level gate
//! (`lib/src/klog.rs`). Hosted on a real OS, that backend is
//! `tracing-subscriber`'s own dispatcher; this module's `init` plays the
//! role the teacher's `klog_init` played at boot.

use tracing_subscriber::EnvFilter;

/// Install the process-wide tracing subscriber. Safe to call more than
/// once; later calls are no-ops (mirrors `klog_init`'s idempotence).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
