//! Synchronously readable session snapshot for route resolution.
//!
//! Route guards run before (and outside) the reactive tree, so they
//! cannot await the session context. The container publishes its last
//! computed value here; guards read it without suspending. The
//! snapshot may be one transition stale at the instant it is read,
//! and the guard table is written to tolerate that.

use std::cell::RefCell;
use std::rc::Rc;

/// The last published session value, reduced to what guards consult
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl SessionSnapshot {
    /// The snapshot published by a session with no credential
    pub const ANONYMOUS: Self = Self {
        is_authenticated: false,
        is_loading: false,
    };
}

/// Single-writer/multi-reader snapshot cell.
///
/// Cloneable handle over shared interior state; constructed once at
/// app start and handed to the session provider (the writer) and the
/// router (the reader) explicitly.
#[derive(Debug, Clone, Default)]
pub struct SessionBridge {
    inner: Rc<RefCell<Option<SessionSnapshot>>>,
}

impl SessionBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the snapshot with a freshly computed session value
    pub fn publish(&self, snapshot: SessionSnapshot) {
        *self.inner.borrow_mut() = Some(snapshot);
    }

    /// Read the last published snapshot; `None` until the container
    /// has initialized
    pub fn read(&self) -> Option<SessionSnapshot> {
        *self.inner.borrow()
    }
}

impl PartialEq for SessionBridge {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
