//! Synchronous in-process event dispatch.
//!
//! The [`Dispatcher`] owns a registry mapping event names to ordered handler
//! lists. Dispatching an event runs every handler registered under the event's
//! name, in registration order, on the caller's thread, before returning.
//!
//! ## Registry invariants
//!
//! - A handler reference appears at most once per event name; a second
//!   registration is rejected with [`DispatchError::AlreadyRegistered`] and
//!   the registry is left untouched.
//! - Removal never reorders the remaining handlers.
//! - An event name stays in the registry once registered, even after its
//!   last handler is removed; only [`Dispatcher::clear`] forgets names.
//!
//! ## Ownership
//!
//! The registry owns its handler references. Events are borrowed for the
//! duration of a dispatch and never retained.
//!
//! ## Threading
//!
//! Mutation requires `&mut self`, so a `Dispatcher` cannot be mutated from
//! several threads without external synchronisation. Use
//! [`SharedDispatcher`](crate::SharedDispatcher) when the registry must be
//! shared.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, error, trace};

use eda_core::{DispatchError, DispatchResult};

use crate::config::{DispatcherConfig, PanicPolicy};
use crate::{Event, HandlerRef, NamedEvent};

/// Event name -> handlers in invocation order.
pub type Registry<E> = HashMap<String, Vec<HandlerRef<E>>>;

/// Outcome of a single dispatch.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// Handlers that were called.
    pub invoked: usize,
    /// Handlers whose panic was caught (only under [`PanicPolicy::Isolate`]).
    pub panicked: usize,
}

impl DispatchReport {
    /// Handlers that ran to completion.
    pub fn completed(&self) -> usize {
        self.invoked.saturating_sub(self.panicked)
    }
}

/// Registry of event handlers with synchronous fan-out dispatch.
pub struct Dispatcher<E = NamedEvent> {
    handlers: Registry<E>,
    config: DispatcherConfig,
}

impl<E: Event> Dispatcher<E> {
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            handlers: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Append `handler` to the handlers of `event_name`.
    pub fn register(
        &mut self,
        event_name: impl Into<String>,
        handler: HandlerRef<E>,
    ) -> DispatchResult<()> {
        let event_name = event_name.into();
        if self.has(&event_name, &handler) {
            return Err(DispatchError::already_registered(event_name, handler.id()));
        }

        debug!(
            event = %event_name,
            handler = handler.name(),
            handler_id = %handler.id(),
            "handler registered"
        );
        self.handlers.entry(event_name).or_default().push(handler);
        Ok(())
    }

    /// Remove `handler` from `event_name`, keeping the order of the others.
    ///
    /// Returns whether anything was removed; removing an unknown handler or
    /// from an unknown event name is a no-op.
    pub fn remove(&mut self, event_name: &str, handler: &HandlerRef<E>) -> bool {
        let Some(handlers) = self.handlers.get_mut(event_name) else {
            return false;
        };
        let Some(pos) = handlers.iter().position(|h| h == handler) else {
            return false;
        };

        handlers.remove(pos);

        debug!(
            event = event_name,
            handler = handler.name(),
            handler_id = %handler.id(),
            "handler removed"
        );
        true
    }

    pub fn has(&self, event_name: &str, handler: &HandlerRef<E>) -> bool {
        self.handlers_for(event_name).contains(handler)
    }

    /// Run every handler registered for `event.name()`, in order.
    ///
    /// Dispatch itself cannot fail. How handler panics are treated depends on
    /// the configured [`PanicPolicy`].
    pub fn dispatch(&self, event: &E) -> DispatchReport {
        invoke(self.handlers_for(event.name()), event, self.config.panic_policy)
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        let event_names = self.handlers.len();
        self.handlers.clear();
        debug!(event_names, "registry cleared");
    }

    /// Copy of the whole registry.
    ///
    /// Changes to the returned map do not affect the dispatcher.
    pub fn handlers(&self) -> Registry<E> {
        self.handlers.clone()
    }

    /// Handlers registered for `event_name`, in invocation order.
    pub fn handlers_for(&self, event_name: &str) -> &[HandlerRef<E>] {
        self.handlers
            .get(event_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// True when no event name has ever been registered since construction
    /// or the last [`clear`](Self::clear).
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E: Event> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> core::fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers)
            .field("config", &self.config)
            .finish()
    }
}

/// Run `handlers` against `event` on the current thread.
pub(crate) fn invoke<E: Event>(
    handlers: &[HandlerRef<E>],
    event: &E,
    policy: PanicPolicy,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for handler in handlers {
        report.invoked += 1;
        match policy {
            PanicPolicy::Propagate => handler.handle(event),
            PanicPolicy::Isolate => {
                if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(event)))
                {
                    report.panicked += 1;
                    error!(
                        event = event.name(),
                        handler = handler.name(),
                        handler_id = %handler.id(),
                        panic = panic_message(&*payload),
                        "handler panicked; continuing dispatch"
                    );
                }
            }
        }
    }

    trace!(
        event = event.name(),
        invoked = report.invoked,
        panicked = report.panicked,
        "event dispatched"
    );
    report
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
