//! Document codec
//!
//! Serializes the full record set to one self-describing JSON document and
//! parses such documents back into wire records. See FORMAT.md.
//!
//! Reading tolerates partial documents: absent sections, absent or
//! malformed scalar fields, and records missing their natural key (dropped
//! with a warning) never fail the batch. Writing is atomic: temp file,
//! fsync, rename.

mod errors;
mod lenient;
mod reader;
mod types;
mod writer;

pub use errors::{DocumentError, DocumentResult};
pub use reader::read_document;
pub use types::{
    ArticleRecord, CarRecord, DriverRecord, ExchangeDocument, TypeRecord, ViolationRecord,
};
pub use writer::write_document;
