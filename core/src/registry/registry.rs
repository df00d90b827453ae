//! The registry: the single owner of every live thread, thread group, and
//! namespace (spec.md §3). Everything else holds lookup handles into it,
//! never owning references, which is what keeps a thread group's leader
//! and a thread's namespace from forming a reference cycle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sv_abi::{AbsTgid, AbsTid, CloneFlags, ErrorKind, NsTid};

use super::namespace::{Namespace, NamespaceId};
use super::thread::{Thread, ThreadGroup};
use crate::fs::FileTable;

pub struct ThreadRegistry {
    threads: HashMap<AbsTid, Thread>,
    groups: HashMap<AbsTgid, ThreadGroup>,
    namespaces: HashMap<NamespaceId, Namespace>,
    next_namespace_id: u64,
}

impl ThreadRegistry {
    /// A fresh registry with a single root namespace and its first thread
    /// already registered (the supervisor's initial guest thread).
    pub fn new(init_tid: AbsTid) -> Self {
        let root_id = NamespaceId(0);
        let mut namespaces = HashMap::new();
        let mut root = Namespace::root(root_id);
        root.get_or_assign(init_tid);
        namespaces.insert(root_id, root);

        let mut groups = HashMap::new();
        groups.insert(AbsTgid::new(init_tid.get()), ThreadGroup::new(init_tid));

        let mut threads = HashMap::new();
        threads.insert(
            init_tid,
            Thread {
                tid: init_tid,
                tgid: AbsTgid::new(init_tid.get()),
                namespace_id: root_id,
                parent: None,
                fd_table: Arc::new(Mutex::new(FileTable::new())),
            },
        );

        ThreadRegistry {
            threads,
            groups,
            namespaces,
            next_namespace_id: 1,
        }
    }

    pub fn get(&self, tid: AbsTid) -> Result<&Thread, ErrorKind> {
        self.threads.get(&tid).ok_or(ErrorKind::Srch)
    }

    pub fn get_mut(&mut self, tid: AbsTid) -> Result<&mut Thread, ErrorKind> {
        self.threads.get_mut(&tid).ok_or(ErrorKind::Srch)
    }

    pub fn thread_group(&self, tgid: AbsTgid) -> Result<&ThreadGroup, ErrorKind> {
        self.groups.get(&tgid).ok_or(ErrorKind::Srch)
    }

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        self.namespaces
            .get(&id)
            .expect("namespace missing for a thread that references it")
    }

    fn namespace_mut(&mut self, id: NamespaceId) -> &mut Namespace {
        self.namespaces
            .get_mut(&id)
            .expect("namespace missing for a thread that references it")
    }

    /// The namespaced id of `tid` within `tid`'s own (innermost) namespace,
    /// assigning one if this is the first lookup (invariant I1: always
    /// defined for a live thread's group leader).
    pub fn ns_tid_in_own_namespace(&mut self, tid: AbsTid) -> Result<NsTid, ErrorKind> {
        let ns_id = self.get(tid)?.namespace_id;
        Ok(self.namespace_mut(ns_id).get_or_assign(tid))
    }

    /// The namespaced id `tid` is known by inside `ns_id`, assigning one if
    /// this is the first lookup there. Used to resolve a parent's pid the
    /// way the caller's own namespace would see it (`getppid`).
    pub fn ns_tid_in_namespace(&mut self, ns_id: NamespaceId, tid: AbsTid) -> NsTid {
        self.namespace_mut(ns_id).get_or_assign(tid)
    }

    /// Registers a clone child of `parent`, returning the child's new
    /// [`AbsTid`]. `clone_flags` decides thread-group and namespace
    /// membership and whether the child shares `parent`'s fd table
    /// (spec.md §4.6).
    pub fn register_child(
        &mut self,
        parent: AbsTid,
        child: AbsTid,
        clone_flags: CloneFlags,
    ) -> Result<AbsTid, ErrorKind> {
        let parent_thread_namespace = self.get(parent)?.namespace_id;
        let parent_tgid = self.get(parent)?.tgid;
        let parent_fd_table = Arc::clone(&self.get(parent)?.fd_table);

        let namespace_id = if clone_flags.contains(CloneFlags::NEWPID) {
            let id = NamespaceId(self.next_namespace_id);
            self.next_namespace_id += 1;
            self.namespaces
                .insert(id, Namespace::nested(id, parent_thread_namespace));
            id
        } else {
            parent_thread_namespace
        };
        self.namespace_mut(namespace_id).get_or_assign(child);

        let tgid = if clone_flags.contains(CloneFlags::THREAD) {
            self.groups
                .get_mut(&parent_tgid)
                .expect("parent thread's group must exist")
                .add_member(child);
            parent_tgid
        } else {
            let tgid = AbsTgid::new(child.get());
            self.groups.insert(tgid, ThreadGroup::new(child));
            tgid
        };

        let fd_table = if clone_flags.contains(CloneFlags::FILES) {
            parent_fd_table
        } else {
            Arc::new(Mutex::new(FileTable::new()))
        };

        self.threads.insert(
            child,
            Thread {
                tid: child,
                tgid,
                namespace_id,
                parent: Some(parent),
                fd_table,
            },
        );
        Ok(child)
    }

    /// Observes any guest threads created outside the clone path the
    /// registry already tracks (e.g. discovered via host procfs). The
    /// supervisor's scope stops at the notification channel, so there is
    /// nothing external to reconcile against yet; this is the integration
    /// point a host-side thread-discovery component would call into.
    pub fn sync_new_threads(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_thread_ns_tid_equals_abs_tid() {
        let mut reg = ThreadRegistry::new(AbsTid::new(100));
        assert_eq!(
            reg.ns_tid_in_own_namespace(AbsTid::new(100)).unwrap(),
            NsTid::new(100)
        );
    }

    #[test]
    fn newpid_child_becomes_ns_tid_one() {
        let mut reg = ThreadRegistry::new(AbsTid::new(100));
        reg.register_child(AbsTid::new(100), AbsTid::new(9999), CloneFlags::NEWPID)
            .unwrap();
        assert_eq!(
            reg.ns_tid_in_own_namespace(AbsTid::new(9999)).unwrap(),
            NsTid::new(1)
        );
    }

    #[test]
    fn thread_clone_joins_parent_group() {
        let mut reg = ThreadRegistry::new(AbsTid::new(100));
        reg.register_child(AbsTid::new(100), AbsTid::new(101), CloneFlags::THREAD)
            .unwrap();
        let group = reg.thread_group(AbsTgid::new(100)).unwrap();
        assert_eq!(group.leader(), AbsTid::new(100));
        assert!(group.members().any(|t| t == AbsTid::new(101)));
    }

    #[test]
    fn clone_files_shares_fd_table() {
        let mut reg = ThreadRegistry::new(AbsTid::new(100));
        reg.register_child(
            AbsTid::new(100),
            AbsTid::new(101),
            CloneFlags::THREAD | CloneFlags::FILES,
        )
        .unwrap();
        assert!(Arc::ptr_eq(
            &reg.get(AbsTid::new(100)).unwrap().fd_table,
            &reg.get(AbsTid::new(101)).unwrap().fd_table
        ));
    }

    #[test]
    fn unknown_tid_is_srch() {
        let reg = ThreadRegistry::new(AbsTid::new(100));
        assert_eq!(reg.get(AbsTid::new(42)).unwrap_err(), ErrorKind::Srch);
    }
}
