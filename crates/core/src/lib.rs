//! `eda-core` — foundation types shared by the dispatcher crates.
//!
//! This crate holds the error model and strongly-typed identifiers. It has no
//! knowledge of handlers or dispatch mechanics.

pub mod error;
pub mod id;

pub use error::{DispatchError, DispatchResult, DomainError};
pub use id::{EventId, HandlerId};
