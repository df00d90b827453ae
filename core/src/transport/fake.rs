//! An in-memory [`super::NotifyChannel`] for tests: a queue of
//! pre-scripted notifications in, a record of verdicts and addfd requests
//! out.

use std::collections::VecDeque;

use sv_abi::{AddFd, Notification, Verdict};

use super::NotifyChannel;
use crate::error::SupervisorError;

#[derive(Default)]
pub struct FakeChannel {
    pending: VecDeque<Notification>,
    pub sent: Vec<(u64, Verdict)>,
    pub addfd_requests: Vec<AddFd>,
}

impl FakeChannel {
    pub fn new() -> Self {
        FakeChannel::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.pending.push_back(notification);
    }
}

impl NotifyChannel for FakeChannel {
    fn recv(&mut self) -> Result<Notification, SupervisorError> {
        self.pending.pop_front().ok_or(SupervisorError::Closed)
    }

    fn send(&mut self, id: u64, verdict: Verdict) -> Result<(), SupervisorError> {
        self.sent.push((id, verdict));
        Ok(())
    }

    fn add_fd(&mut self, req: AddFd) -> Result<(), SupervisorError> {
        self.addfd_requests.push(req);
        Ok(())
    }
}
