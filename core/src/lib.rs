//! The syscall notification supervisor engine: thread/namespace registry,
//! virtual file descriptors and backends, the guest memory bridge, path
//! routing and overlay resolution, and the notification dispatch loop
//! built on top of them.

pub mod backends;
pub mod bridge;
pub mod dispatch;
pub mod error;
pub mod fs;
pub mod overlay;
pub mod registry;
pub mod router;
pub mod supervisor;
pub mod transport;

pub use error::SupervisorError;
pub use supervisor::{Supervisor, SupervisorInit};
