//! A guest thread's virtual fd table (spec.md §4.2, §6).

use std::collections::HashMap;
use std::sync::Arc;

use sv_abi::{Vfd, STDIO_RESERVED_VFDS};

use super::File;

struct Entry {
    file: Arc<File>,
    cloexec: bool,
}

/// Maps a guest's virtual fds to open [`File`]s. Vfds 0-2 are reserved for
/// host stdio passthrough and are never allocated here (spec.md §6).
#[derive(Default)]
pub struct FileTable {
    entries: HashMap<Vfd, Entry>,
}

impl FileTable {
    pub fn new() -> Self {
        FileTable {
            entries: HashMap::new(),
        }
    }

    /// Inserts `file` at the lowest free vfd `>= STDIO_RESERVED_VFDS`.
    pub fn insert(&mut self, file: Arc<File>, cloexec: bool) -> Vfd {
        let vfd = self.lowest_free();
        self.entries.insert(vfd, Entry { file, cloexec });
        vfd
    }

    /// Inserts `file` at a specific vfd, displacing whatever was there
    /// (used by `dup3`'s explicit-target form).
    pub fn insert_at(&mut self, vfd: Vfd, file: Arc<File>, cloexec: bool) {
        self.entries.insert(vfd, Entry { file, cloexec });
    }

    pub fn remove(&mut self, vfd: Vfd) -> Option<Arc<File>> {
        self.entries.remove(&vfd).map(|e| e.file)
    }

    /// A new strong reference to the file at `vfd`, if any (spec.md §4.2's
    /// "get_ref increments the refcount").
    pub fn get_ref(&self, vfd: Vfd) -> Option<Arc<File>> {
        self.entries.get(&vfd).map(|e| Arc::clone(&e.file))
    }

    pub fn get_cloexec(&self, vfd: Vfd) -> Option<bool> {
        self.entries.get(&vfd).map(|e| e.cloexec)
    }

    pub fn contains(&self, vfd: Vfd) -> bool {
        self.entries.contains_key(&vfd)
    }

    fn lowest_free(&self) -> Vfd {
        let mut candidate = STDIO_RESERVED_VFDS;
        while self.entries.contains_key(&candidate) {
            candidate += 1;
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{BackendKind, ProcBackend};

    fn dummy_file() -> Arc<File> {
        Arc::new(File::new(BackendKind::Proc(ProcBackend::new(
            sv_abi::NsTgid::new(1),
        ))))
    }

    #[test]
    fn insert_skips_reserved_range() {
        let mut table = FileTable::new();
        let vfd = table.insert(dummy_file(), false);
        assert_eq!(vfd, STDIO_RESERVED_VFDS);
    }

    #[test]
    fn insert_reuses_lowest_free_slot() {
        let mut table = FileTable::new();
        let a = table.insert(dummy_file(), false);
        let b = table.insert(dummy_file(), false);
        assert_eq!(b, a + 1);
        table.remove(a);
        let c = table.insert(dummy_file(), false);
        assert_eq!(c, a);
    }

    #[test]
    fn get_ref_clones_without_removing() {
        let mut table = FileTable::new();
        let vfd = table.insert(dummy_file(), false);
        assert!(table.get_ref(vfd).is_some());
        assert!(table.contains(vfd));
    }
}
