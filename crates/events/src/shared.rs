//! Thread-safe dispatcher wrapper.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use eda_core::DispatchResult;

use crate::config::DispatcherConfig;
use crate::dispatcher::{self, DispatchReport, Dispatcher, Registry};
use crate::{Event, HandlerRef, NamedEvent};

/// A [`Dispatcher`] behind an `RwLock`, usable through `&self`.
///
/// - Registry operations take the lock for their own duration only
/// - `dispatch` copies the handler list under the read lock and runs the
///   handlers after releasing it, so a handler may register, remove or
///   dispatch on the same `SharedDispatcher` without deadlocking
/// - Changes made while a dispatch is running apply to the next dispatch
///
/// Share it across threads with `Arc<SharedDispatcher<E>>`.
pub struct SharedDispatcher<E = NamedEvent> {
    inner: RwLock<Dispatcher<E>>,
}

impl<E: Event> SharedDispatcher<E> {
    pub fn new() -> Self {
        Self::from(Dispatcher::new())
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self::from(Dispatcher::with_config(config))
    }

    pub fn register(
        &self,
        event_name: impl Into<String>,
        handler: HandlerRef<E>,
    ) -> DispatchResult<()> {
        self.write().register(event_name, handler)
    }

    pub fn remove(&self, event_name: &str, handler: &HandlerRef<E>) -> bool {
        self.write().remove(event_name, handler)
    }

    pub fn has(&self, event_name: &str, handler: &HandlerRef<E>) -> bool {
        self.read().has(event_name, handler)
    }

    pub fn dispatch(&self, event: &E) -> DispatchReport {
        let (handlers, policy) = {
            let guard = self.read();
            (
                guard.handlers_for(event.name()).to_vec(),
                guard.config().panic_policy,
            )
        };
        dispatcher::invoke(&handlers, event, policy)
    }

    pub fn clear(&self) {
        self.write().clear()
    }

    pub fn handlers(&self) -> Registry<E> {
        self.read().handlers()
    }

    pub fn handlers_for(&self, event_name: &str) -> Vec<HandlerRef<E>> {
        self.read().handlers_for(event_name).to_vec()
    }

    pub fn into_inner(self) -> Dispatcher<E> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // Handlers never run while the lock is held, so a poisoned lock can only
    // come from a panic inside the registry code itself; the data is still
    // consistent at that point.
    fn read(&self) -> RwLockReadGuard<'_, Dispatcher<E>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Dispatcher<E>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Event> Default for SharedDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> From<Dispatcher<E>> for SharedDispatcher<E> {
    fn from(dispatcher: Dispatcher<E>) -> Self {
        Self {
            inner: RwLock::new(dispatcher),
        }
    }
}

impl<E> core::fmt::Debug for SharedDispatcher<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedDispatcher")
            .field("inner", &self.inner)
            .finish()
    }
}
