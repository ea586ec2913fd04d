//! Validation rules for record construction and update
//!
//! Validators are pure: they never mutate the store, and they collect every
//! violated rule into one `ValidationError` instead of failing on the first.
//! The same validators run on both write paths:
//!
//! - interactive add/edit (see `registry`), where the caller reports all
//!   reasons at once
//! - bulk import (see `exchange`), where an invalid record is skipped and
//!   the rest of the batch continues
//!
//! Uniqueness checks go through the `KeyLookup` seam. A record being updated
//! passes its own prior natural key as the exclusion key so it does not
//! collide with itself; when the key is unchanged, both the format and the
//! uniqueness check are skipped (the stored value already passed them).

mod drafts;
mod entities;
mod errors;
pub mod fields;

pub use drafts::{ArticleDraft, CarDraft, DriverDraft, TypeDraft, ViolationDraft};
pub use entities::{
    validate_article, validate_car, validate_driver, validate_type, validate_violation,
};
pub use errors::ValidationError;

/// Read-only view of the natural keys currently in the store.
///
/// Implemented by `store::Store`; tests may substitute a stub.
pub trait KeyLookup {
    fn license_number_exists(&self, license_number: &str) -> bool;
    fn vin_exists(&self, vin: &str) -> bool;
    fn license_plate_exists(&self, plate: &str) -> bool;
    fn article_code_exists(&self, code: &str) -> bool;
    fn type_name_exists(&self, name: &str) -> bool;
    fn resolution_exists(&self, resolution: &str) -> bool;
}
