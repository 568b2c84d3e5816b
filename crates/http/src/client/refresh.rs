//! Single-flight coordination for credential renewal.
//!
//! When several in-flight requests hit an authorization failure off the
//! same expired credential, exactly one of them (the leader) performs
//! the renewal call; the rest park a continuation here and are woken
//! with the shared outcome once the renewal settles. The queue only
//! exists while a renewal is in flight and is always fully drained
//! before the next renewal can start.

use futures::channel::oneshot;
use std::sync::Mutex;

/// How a renewal attempt settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RefreshOutcome {
    /// A fresh credential was stored; waiters may replay once
    Renewed,
    /// The session is terminally expired; the store has been cleared
    Expired,
}

/// What a failing call should do next
pub(crate) enum RefreshTicket {
    /// This call starts the renewal and must report back via `finish`
    Leader,
    /// A renewal is already in flight; await the shared outcome
    Follower(oneshot::Receiver<RefreshOutcome>),
}

enum Phase {
    Idle,
    Renewing {
        waiters: Vec<oneshot::Sender<RefreshOutcome>>,
    },
}

/// The `Idle -> Renewing -> settled -> Idle` state machine, with the
/// waiter queue attached only during `Renewing`. The single mutex is
/// the critical section around the start-renewal transition.
pub(crate) struct RefreshCoordinator {
    phase: Mutex<Phase>,
}

impl RefreshCoordinator {
    pub(crate) fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::Idle),
        }
    }

    /// Join the renewal window, starting it if nobody has yet
    pub(crate) fn begin(&self) -> RefreshTicket {
        let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
        match &mut *phase {
            Phase::Idle => {
                *phase = Phase::Renewing {
                    waiters: Vec::new(),
                };
                RefreshTicket::Leader
            }
            Phase::Renewing { waiters } => {
                let (tx, rx) = oneshot::channel();
                waiters.push(tx);
                RefreshTicket::Follower(rx)
            }
        }
    }

    /// Settle the renewal: drain every waiter with the outcome and
    /// return to idle. Only the leader calls this.
    pub(crate) fn finish(&self, outcome: RefreshOutcome) {
        let waiters = {
            let mut phase = self.phase.lock().unwrap_or_else(|e| e.into_inner());
            match std::mem::replace(&mut *phase, Phase::Idle) {
                Phase::Renewing { waiters } => waiters,
                Phase::Idle => Vec::new(),
            }
        };
        for waiter in waiters {
            // A dropped receiver means the caller gave up; nothing to do
            let _ = waiter.send(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_caller_leads_later_callers_follow() {
        let coordinator = RefreshCoordinator::new();
        assert!(matches!(coordinator.begin(), RefreshTicket::Leader));
        assert!(matches!(coordinator.begin(), RefreshTicket::Follower(_)));
        assert!(matches!(coordinator.begin(), RefreshTicket::Follower(_)));
    }

    #[test]
    fn finish_drains_waiters_and_reopens_the_window() {
        let coordinator = RefreshCoordinator::new();
        assert!(matches!(coordinator.begin(), RefreshTicket::Leader));
        let mut rx = match coordinator.begin() {
            RefreshTicket::Follower(rx) => rx,
            RefreshTicket::Leader => panic!("second caller must follow"),
        };

        coordinator.finish(RefreshOutcome::Renewed);
        assert_eq!(rx.try_recv().unwrap(), Some(RefreshOutcome::Renewed));

        // Window is closed and drained: the next failure leads again
        assert!(matches!(coordinator.begin(), RefreshTicket::Leader));
        coordinator.finish(RefreshOutcome::Expired);
    }
}
