use std::sync::Arc;

use eda_core::HandlerId;

/// Reacts to a dispatched event (side effects only).
///
/// Handlers run synchronously on the dispatching thread, in registration
/// order. They take `&self`; handlers that accumulate state use interior
/// mutability.
///
/// Closures `Fn(&E)` are handlers too:
///
/// ```ignore
/// let h = HandlerRef::new(|e: &NamedEvent| println!("{}", e.name()));
/// ```
pub trait Handler<E>: Send + Sync {
    fn handle(&self, event: &E);

    /// Human-readable label used in logs.
    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }
}

impl<E, F> Handler<E> for F
where
    F: Fn(&E) + Send + Sync,
{
    fn handle(&self, event: &E) {
        self(event)
    }
}

/// A registrable handler reference.
///
/// Identity is the handler's allocation: clones, and every [`HandlerRef::from_arc`]
/// over the same `Arc`, are the same handler. Each [`HandlerRef::new`]
/// allocates, so two references wrapping identical handlers are still
/// distinct registrations.
pub struct HandlerRef<E> {
    handler: Arc<dyn Handler<E>>,
}

impl<E> HandlerRef<E> {
    pub fn new<H>(handler: H) -> Self
    where
        H: Handler<E> + 'static,
    {
        Self::from_arc(Arc::new(handler))
    }

    /// Wrap an already shared handler, keeping the caller's `Arc` usable for
    /// inspecting handler state.
    pub fn from_arc<H>(handler: Arc<H>) -> Self
    where
        H: Handler<E> + 'static,
    {
        Self { handler }
    }

    pub fn id(&self) -> HandlerId {
        HandlerId::of(Arc::as_ptr(&self.handler))
    }

    pub fn name(&self) -> &str {
        self.handler.name()
    }

    pub fn handle(&self, event: &E) {
        self.handler.handle(event)
    }
}

impl<E> Clone for HandlerRef<E> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<E> PartialEq for HandlerRef<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<E> Eq for HandlerRef<E> {}

impl<E> core::fmt::Debug for HandlerRef<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerRef")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}
