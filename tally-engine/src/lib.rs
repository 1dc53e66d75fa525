//! Booking code temporal resolution and time-bucketed aggregation.
//!
//! The engine resolves which booking code is active for a group at an
//! instant (validity windows may overlap; resolution is deterministic),
//! validates engineer time entries before they reach storage, and aggregates
//! entries into dense calendar-bucketed report matrices.
//!
//! All calendar bucketing happens in a single fixed reference time zone
//! (UTC) on half-open `[start, end)` intervals; see [`domain::models::Period`].
//!
//! Storage is an external collaborator consumed through the outbound ports
//! in [`domain::ports::outbound`]; the `adapters::in_memory` implementations
//! back the tests and the bundled HTTP service.

pub mod adapters;
pub mod domain;
