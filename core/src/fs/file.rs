//! An open file: a backend plus the refcount that decides when the backend
//! tears down (spec.md §4.2).
//!
//! The spec models `ref()`/`unref()` as the only mutators of a hand-rolled
//! refcount, with the last `unref()` destroying the backend. `Arc` gives us
//! exactly that for free: `Arc::clone` is `ref()`, dropping a clone is
//! `unref()`, and the backend (and its `close`-on-drop fd) is torn down the
//! moment the last `Arc` goes away. No manual counter needed.

use std::sync::Mutex;

use sv_abi::ExtendedStat;

use crate::backends::{BackendError, BackendKind, BackendOps, IoctlArg};

/// An open file, shared by every [`Vfd`](sv_abi::Vfd) that refers to it
/// (e.g. after `dup3`). Construct behind an `Arc` — see the module docs.
#[derive(Debug)]
pub struct File {
    backend: Mutex<BackendKind>,
}

impl File {
    pub fn new(backend: BackendKind) -> Self {
        File {
            backend: Mutex::new(backend),
        }
    }

    pub fn statx(&self) -> Result<ExtendedStat, BackendError> {
        self.backend.lock().unwrap().statx()
    }

    pub fn ioctl(&self, request: u64, arg: IoctlArg<'_>) -> Result<i64, BackendError> {
        self.backend.lock().unwrap().ioctl(request, arg)
    }

    pub fn raw_fd(&self) -> std::os::fd::RawFd {
        self.backend.lock().unwrap().raw_fd()
    }
}
