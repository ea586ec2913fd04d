//! roadbase - A records system for traffic-enforcement data
//!
//! Drivers, cars, violation articles, violation types and violations,
//! persisted in a transactional record store, with full-store export to a
//! self-describing JSON document and best-effort import of such documents
//! under three conflict-resolution modes. See FORMAT.md for the document
//! layout.

pub mod cli;
pub mod document;
pub mod exchange;
pub mod model;
pub mod registry;
pub mod store;
pub mod validate;
