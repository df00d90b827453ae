//! The notification dispatch engine: context, handler registry, and the
//! worker loop (spec.md §4.1, §4.8, §5).

pub mod context;
mod dispatcher;
pub mod handlers;
mod macros;

pub use context::NotificationCtx;
pub use dispatcher::Dispatcher;
