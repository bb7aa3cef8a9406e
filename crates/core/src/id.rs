//! Strongly-typed identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identity of a handler: the address of the shared allocation it lives in.
///
/// Every reference to the same allocation has the same id, and two separately
/// allocated handlers never share one while both are alive. An id says
/// nothing about a handler once its allocation has been freed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerId(usize);

impl HandlerId {
    /// Identity of the value behind `ptr`. Only the data address is kept,
    /// so fat pointers to the same allocation agree.
    pub fn of<T: ?Sized>(ptr: *const T) -> Self {
        Self(ptr.cast::<()>() as usize)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl core::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Identifier of a single event instance (UUIDv7, so later events sort later).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for EventId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<EventId> for Uuid {
    fn from(value: EventId) -> Self {
        value.0
    }
}

impl FromStr for EventId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s)
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("EventId: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_id_ignores_pointer_metadata() {
        let value = [1u8, 2, 3];
        let thin: *const [u8; 3] = &value;
        let fat: *const [u8] = &value[..];

        assert_eq!(HandlerId::of(thin), HandlerId::of(fat));
        assert_ne!(HandlerId::of(thin), HandlerId::of(&value[1]));
    }

    #[test]
    fn handler_id_displays_as_hex_address() {
        let id = HandlerId::of(0x2a as *const u8);
        assert_eq!(id.to_string(), "0x2a");
        assert_eq!(id.as_usize(), 42);
    }

    #[test]
    fn fresh_event_ids_are_distinct() {
        assert_ne!(EventId::new(), EventId::new());
    }

    #[test]
    fn event_id_parses_its_own_display() {
        let id = EventId::new();
        let parsed: EventId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn invalid_input_is_rejected_with_type_name() {
        let err = "not-a-uuid".parse::<EventId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("EventId:")),
        }
    }

    #[test]
    fn event_id_serializes_as_bare_uuid() {
        let id = EventId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
