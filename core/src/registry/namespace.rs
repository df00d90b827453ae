//! PID namespaces: the mapping from host-global thread ids to the
//! namespaced ids a guest observes (spec.md §3, §4.6).

use std::collections::HashMap;

use sv_abi::{AbsTid, NsTid};

/// Opaque handle to a [`Namespace`] stored in the [`super::ThreadRegistry`].
/// Threads hold this instead of owning a `Namespace` directly, so a thread
/// group's namespace can be looked up without a cyclic reference back into
/// the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespaceId(pub(super) u64);

/// A PID namespace: every member is assigned a namespaced id the first time
/// it is observed in this namespace. The root namespace is the identity
/// mapping (host pid doubles as the namespaced id, matching an unnested
/// guest); nested namespaces (created by `CLONE_NEWPID`) allocate ids from
/// 1 upward, so the namespace's first member always becomes NsTid 1.
#[derive(Debug)]
pub struct Namespace {
    id: NamespaceId,
    parent: Option<NamespaceId>,
    is_root: bool,
    next_ns_tid: u32,
    table: HashMap<AbsTid, NsTid>,
}

impl Namespace {
    pub(super) fn root(id: NamespaceId) -> Self {
        Namespace {
            id,
            parent: None,
            is_root: true,
            next_ns_tid: 1,
            table: HashMap::new(),
        }
    }

    pub(super) fn nested(id: NamespaceId, parent: NamespaceId) -> Self {
        Namespace {
            id,
            parent: Some(parent),
            is_root: false,
            next_ns_tid: 1,
            table: HashMap::new(),
        }
    }

    pub fn id(&self) -> NamespaceId {
        self.id
    }

    pub fn parent(&self) -> Option<NamespaceId> {
        self.parent
    }

    /// Namespaced id of `tid` within this namespace, assigning one if this
    /// is the first time `tid` is observed here.
    pub(super) fn get_or_assign(&mut self, tid: AbsTid) -> NsTid {
        if let Some(existing) = self.table.get(&tid) {
            return *existing;
        }
        let assigned = if self.is_root {
            NsTid::new(tid.get())
        } else {
            let v = self.next_ns_tid;
            self.next_ns_tid += 1;
            NsTid::new(v)
        };
        self.table.insert(tid, assigned);
        assigned
    }

    /// Namespaced id of a thread already registered in this namespace.
    pub fn get_ns_tid(&self, tid: AbsTid) -> Option<NsTid> {
        self.table.get(&tid).copied()
    }
}
