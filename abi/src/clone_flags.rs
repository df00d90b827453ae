//! Clone flags relevant to thread/namespace registration (spec.md §4.6).

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CloneFlags: u64 {
        /// Child joins the parent's thread group instead of starting a new one.
        const THREAD  = 1 << 16;
        /// Child shares the parent's file-descriptor table.
        const FILES   = 1 << 10;
        /// Child starts in a new, nested PID namespace (receives NsTid == 1).
        const NEWPID  = 1 << 29;
    }
}

bitflags! {
    /// Flags narrowed from an `eventfd2`/`open`-style syscall argument.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        const CLOEXEC  = 0o2000000;
        const NONBLOCK = 0o4000;
    }
}

bitflags! {
    /// `at_flags` narrowed from an `*at`-style syscall argument.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AtFlags: u32 {
        /// An empty path argument names `dirfd` itself (spec.md §4.8's
        /// `fstatat` note).
        const EMPTY_PATH = 0x1000;
    }
}
