//! Synchronous in-process event dispatch.
//!
//! Register [`HandlerRef`]s under event names on a [`Dispatcher`], then
//! dispatch [`Event`]s: every handler registered for the event's name runs,
//! in registration order, before `dispatch` returns.
//!
//! ```ignore
//! let mut dispatcher = Dispatcher::new();
//! let audit = HandlerRef::new(|e: &NamedEvent| tracing::info!(event = e.name(), "audit"));
//! dispatcher.register("order_created", audit.clone())?;
//! dispatcher.dispatch(&NamedEvent::new("order_created", json!({ "orderId": 42 })));
//! ```

pub mod config;
pub mod dispatcher;
pub mod event;
pub mod handler;
pub mod shared;

pub use config::{ConfigError, DispatcherConfig, PanicPolicy};
pub use dispatcher::{DispatchReport, Dispatcher, Registry};
pub use eda_core::{DispatchError, DispatchResult, EventId, HandlerId};
pub use event::{Event, NamedEvent};
pub use handler::{Handler, HandlerRef};
pub use shared::SharedDispatcher;
