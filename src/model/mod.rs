//! Domain model for the traffic-enforcement record store
//!
//! Five record kinds, each identified by a store-assigned surrogate
//! `RecordId` and one business-meaningful natural key:
//!
//! - Driver           - license number (10 digits)
//! - Car              - VIN (17 chars) and license plate (both unique)
//! - ViolationArticle - article code
//! - ViolationType    - type name
//! - Violation        - resolution number (20 digits)
//!
//! Cross-entity references inside the store are structured `RecordId`s.
//! Natural keys are used only at the interchange boundary (see `document`)
//! and for lookups; they are never re-parsed out of display strings.

mod entities;

pub use entities::{Car, Driver, EntityKind, RecordId, Violation, ViolationArticle, ViolationType};
