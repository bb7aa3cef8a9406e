use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use eda_core::EventId;

/// Something that can be routed through a dispatcher.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **named** (the name is the routing key)
/// - **opaque** beyond that (the dispatcher never looks at the payload)
pub trait Event {
    type Payload: ?Sized;

    /// Routing key (e.g. "order_created").
    fn name(&self) -> &str;

    /// When the event was created.
    fn timestamp(&self) -> DateTime<Utc>;

    fn payload(&self) -> &Self::Payload;
}

/// General-purpose event: a name, a creation time and a payload.
///
/// The payload defaults to JSON so producers and consumers can agree on shape
/// without sharing types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEvent<P = JsonValue> {
    id: EventId,
    name: String,
    timestamp: DateTime<Utc>,
    payload: P,
}

impl<P> NamedEvent<P> {
    /// Create an event stamped with the current time.
    pub fn new(name: impl Into<String>, payload: P) -> Self {
        Self::at(name, Utc::now(), payload)
    }

    /// Create an event with an explicit timestamp (useful for deterministic tests).
    pub fn at(name: impl Into<String>, timestamp: DateTime<Utc>, payload: P) -> Self {
        Self {
            id: EventId::new(),
            name: name.into(),
            timestamp,
            payload,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<P> Event for NamedEvent<P> {
    type Payload = P;

    fn name(&self) -> &str {
        &self.name
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn payload(&self) -> &P {
        &self.payload
    }
}
