//! The "current engine logger" slot an adapter reads on every call, and the
//! guards that swap it for the lifetime of a scope.
//!
//! With [`ScopeIsolation::Shared`] the slot is one value per adapter. Every
//! thread logging through that adapter sees every active scope, and a scope
//! released out of order restores whatever was current when it began, which
//! may by then be stale. Releasing guards in reverse order of creation (what
//! dropping them at the end of nested blocks does) keeps the slot
//! consistent.
//!
//! [`ScopeIsolation::PerThread`] keeps one slot per calling thread, so
//! scopes begun on one thread are invisible to, and cannot be clobbered by,
//! another. Nesting on a single thread behaves exactly as in shared mode.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ThreadId};

/// How scopes on one adapter interact across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeIsolation {
    /// One slot per adapter, shared by every thread.
    #[default]
    Shared,
    /// One slot per adapter and thread.
    PerThread,
}

enum Slots<L> {
    Shared(Mutex<L>),
    PerThread {
        root: L,
        threads: Mutex<HashMap<ThreadId, L>>,
    },
}

/// What to put back when a scope ends.
struct Prior<L> {
    thread: ThreadId,
    /// `None` when the thread had no slot of its own yet.
    handle: Option<L>,
}

pub(crate) struct HandleSlot<L> {
    slots: Slots<L>,
}

impl<L: Clone> HandleSlot<L> {
    pub(crate) fn new(initial: L, isolation: ScopeIsolation) -> Self {
        let slots = match isolation {
            ScopeIsolation::Shared => Slots::Shared(Mutex::new(initial)),
            ScopeIsolation::PerThread => Slots::PerThread {
                root: initial,
                threads: Mutex::new(HashMap::new()),
            },
        };
        Self { slots }
    }

    pub(crate) fn isolation(&self) -> ScopeIsolation {
        match self.slots {
            Slots::Shared(_) => ScopeIsolation::Shared,
            Slots::PerThread { .. } => ScopeIsolation::PerThread,
        }
    }

    /// The handle in effect for the calling thread.
    pub(crate) fn current(&self) -> L {
        match &self.slots {
            Slots::Shared(slot) => slot.lock().unwrap_or_else(PoisonError::into_inner).clone(),
            Slots::PerThread { root, threads } => threads
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&thread::current().id())
                .unwrap_or(root)
                .clone(),
        }
    }

    fn replace(&self, handle: L) -> Prior<L> {
        let thread = thread::current().id();
        let prior = match &self.slots {
            Slots::Shared(slot) => Some(std::mem::replace(
                &mut *slot.lock().unwrap_or_else(PoisonError::into_inner),
                handle,
            )),
            Slots::PerThread { threads, .. } => threads
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(thread, handle),
        };
        Prior {
            thread,
            handle: prior,
        }
    }

    fn restore(&self, prior: Prior<L>) {
        match &self.slots {
            Slots::Shared(slot) => {
                if let Some(handle) = prior.handle {
                    *slot.lock().unwrap_or_else(PoisonError::into_inner) = handle;
                }
            }
            Slots::PerThread { threads, .. } => {
                let mut threads = threads.lock().unwrap_or_else(PoisonError::into_inner);
                match prior.handle {
                    Some(handle) => {
                        threads.insert(prior.thread, handle);
                    }
                    None => {
                        threads.remove(&prior.thread);
                    }
                }
            }
        }
    }

    /// Installs `handle` and returns the guard that puts the previous one back.
    pub(crate) fn enter(&self, handle: L) -> ScopeGuard<'_, L> {
        let prior = self.replace(handle);
        ScopeGuard {
            slot: self,
            prior: Some(prior),
        }
    }
}

/// An active scope. Releasing it, explicitly or by dropping it, restores
/// the handle that was current when the scope began.
#[must_use = "the scope ends as soon as the guard is dropped"]
pub struct ScopeGuard<'a, L: Clone> {
    slot: &'a HandleSlot<L>,
    prior: Option<Prior<L>>,
}

impl<L: Clone> ScopeGuard<'_, L> {
    /// Ends the scope. Only the first call has any effect.
    pub fn release(&mut self) {
        if let Some(prior) = self.prior.take() {
            self.slot.restore(prior);
        }
    }

    pub fn is_released(&self) -> bool {
        self.prior.is_none()
    }
}

impl<L: Clone> Drop for ScopeGuard<'_, L> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<L: Clone> std::fmt::Debug for ScopeGuard<'_, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("released", &self.is_released())
            .finish()
    }
}
