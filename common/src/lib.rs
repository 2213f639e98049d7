//! Shared data types for the SafetyNet services.
//!
//! Everything here is plain serde data: entity records as stored, inbound
//! request payloads, and the projected response shapes returned to callers.

pub mod model;
pub mod requests;
pub mod responses;
