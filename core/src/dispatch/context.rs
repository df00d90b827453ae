//! Per-notification context handlers are invoked with — the hosted
//! equivalent of the teacher's `SyscallContext` (spec.md §4.1).

use sv_abi::{AbsTid, Notification, SyscallArgs};

use crate::supervisor::Supervisor;

pub struct NotificationCtx<'a> {
    pub supervisor: &'a Supervisor,
    pub notification: &'a Notification,
}

impl<'a> NotificationCtx<'a> {
    pub fn new(supervisor: &'a Supervisor, notification: &'a Notification) -> Self {
        NotificationCtx {
            supervisor,
            notification,
        }
    }

    pub fn args(&self) -> &SyscallArgs {
        &self.notification.data
    }

    pub fn caller(&self) -> AbsTid {
        self.supervisor.caller(self.notification)
    }

    pub fn id(&self) -> u64 {
        self.notification.id
    }
}
