//! Guest threads and the thread groups they belong to (spec.md §3).

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use sv_abi::{AbsTgid, AbsTid};

use super::namespace::NamespaceId;
use crate::fs::FileTable;

/// A single guest thread as the supervisor tracks it.
#[derive(Debug)]
pub struct Thread {
    pub tid: AbsTid,
    pub tgid: AbsTgid,
    pub namespace_id: NamespaceId,
    pub parent: Option<AbsTid>,
    /// Shared with every thread this one was cloned `CLONE_FILES` from;
    /// private otherwise (spec.md §4.6).
    pub fd_table: Arc<Mutex<FileTable>>,
}

/// A thread group: one or more threads sharing a tgid, always reachable
/// through a live leader (spec.md §3, invariant I1).
#[derive(Debug)]
pub struct ThreadGroup {
    tgid: AbsTgid,
    leader: AbsTid,
    members: HashSet<AbsTid>,
}

impl ThreadGroup {
    pub(super) fn new(leader: AbsTid) -> Self {
        let tgid = AbsTgid::new(leader.get());
        let mut members = HashSet::new();
        members.insert(leader);
        ThreadGroup {
            tgid,
            leader,
            members,
        }
    }

    pub fn tgid(&self) -> AbsTgid {
        self.tgid
    }

    /// Never empty for a live group: the leader is inserted at construction
    /// and is only ever removed together with the whole group.
    pub fn leader(&self) -> AbsTid {
        self.leader
    }

    pub fn members(&self) -> impl Iterator<Item = AbsTid> + '_ {
        self.members.iter().copied()
    }

    pub(super) fn add_member(&mut self, tid: AbsTid) {
        self.members.insert(tid);
    }
}
