//! Entity validators.
//!
//! Each validator checks every field of a draft, collects all violated rules,
//! and on success produces the fully-typed record under the given id. Dates
//! used in business logic must not lie in the future; a driver must be an
//! adult. Natural-key format and uniqueness checks are skipped when the key
//! equals the exclusion key (an update that leaves the key untouched).

use chrono::{Months, NaiveDate, Utc};

use crate::model::{Car, Driver, RecordId, Violation, ViolationArticle, ViolationType};

use super::drafts::{ArticleDraft, CarDraft, DriverDraft, TypeDraft, ViolationDraft};
use super::errors::ValidationError;
use super::fields;
use super::KeyLookup;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn validate_driver(
    id: RecordId,
    draft: &DriverDraft,
    keys: &dyn KeyLookup,
    prior_license: Option<&str>,
) -> Result<Driver, ValidationError> {
    let mut reasons = Vec::new();

    match draft.first_name.as_deref().map(str::trim) {
        None | Some("") => reasons.push("First name must not be empty.".into()),
        Some(name) if !fields::is_cyrillic(name) => {
            reasons.push("First name must contain only Cyrillic letters.".into())
        }
        _ => {}
    }

    match draft.last_name.as_deref().map(str::trim) {
        None | Some("") => reasons.push("Last name must not be empty.".into()),
        Some(name) if !fields::is_cyrillic(name) => {
            reasons.push("Last name must contain only Cyrillic letters.".into())
        }
        _ => {}
    }

    // Middle name is optional, but alphabet-restricted when present.
    if let Some(middle) = draft.middle_name.as_deref().map(str::trim) {
        if !middle.is_empty() && !fields::is_cyrillic(middle) {
            reasons.push("Middle name must contain only Cyrillic letters.".into());
        }
    }

    match draft.birth_date {
        None => reasons.push("Birth date must be a valid date.".into()),
        Some(birth) if birth > today() => {
            reasons.push("Birth date must lie in the past.".into())
        }
        Some(birth) => {
            let adult_at = birth.checked_add_months(Months::new(12 * 18));
            if adult_at.map_or(true, |d| d > today()) {
                reasons.push("Driver must be at least 18 years old.".into());
            }
        }
    }

    match draft.city.as_deref().map(str::trim) {
        None | Some("") => reasons.push("City must not be empty.".into()),
        Some(city) if !fields::is_cyrillic_with_dash(city) => {
            reasons.push("City may contain only Cyrillic letters and dashes.".into())
        }
        _ => {}
    }

    match draft.license_number.as_deref() {
        None => reasons.push("License number must consist of exactly 10 digits.".into()),
        Some(license) if prior_license != Some(license) => {
            if let Err(reason) = fields::check_license_number(license) {
                reasons.push(reason);
            } else if keys.license_number_exists(license) {
                reasons.push("License number already exists.".into());
            }
        }
        _ => {}
    }

    match (
        &draft.first_name,
        &draft.last_name,
        &draft.license_number,
        draft.birth_date,
        &draft.city,
    ) {
        (Some(first), Some(last), Some(license), Some(birth), Some(city))
            if reasons.is_empty() =>
        {
            Ok(Driver {
                id,
                first_name: first.trim().to_string(),
                last_name: last.trim().to_string(),
                middle_name: draft
                    .middle_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string),
                license_number: license.clone(),
                birth_date: birth,
                city: city.trim().to_string(),
            })
        }
        _ => Err(ValidationError::new(reasons)),
    }
}

pub fn validate_car(
    id: RecordId,
    draft: &CarDraft,
    keys: &dyn KeyLookup,
    prior_vin: Option<&str>,
    prior_plate: Option<&str>,
) -> Result<Car, ValidationError> {
    let mut reasons = Vec::new();

    match draft.brand.as_deref().map(str::trim) {
        None | Some("") => reasons.push("Brand must not be empty.".into()),
        Some(brand) if !fields::is_cyrillic(brand) && !fields::is_latin(brand) => {
            reasons.push("Brand must consist of letters of a single alphabet.".into())
        }
        _ => {}
    }

    match draft.model.as_deref().map(str::trim) {
        None | Some("") => reasons.push("Model must not be empty.".into()),
        Some(model) if fields::mixes_alphabets(model) => {
            reasons.push("Model must not mix Cyrillic and Latin letters.".into())
        }
        _ => {}
    }

    match draft.vin_number.as_deref() {
        None => reasons.push("VIN must consist of exactly 17 characters.".into()),
        Some(vin) if prior_vin != Some(vin) => {
            if let Err(reason) = fields::check_vin(vin) {
                reasons.push(reason);
            } else if keys.vin_exists(vin) {
                reasons.push("VIN already exists.".into());
            }
        }
        _ => {}
    }

    match draft.license_plate.as_deref() {
        None => reasons.push("License plate must consist of 8 or 9 characters.".into()),
        Some(plate) if prior_plate != Some(plate) => {
            if let Err(reason) = fields::check_license_plate(plate) {
                reasons.push(reason);
            } else if keys.license_plate_exists(plate) {
                reasons.push("License plate already exists.".into());
            }
        }
        _ => {}
    }

    if draft.owner.is_none() {
        reasons.push("Owner must be specified.".into());
    }

    match draft.last_inspection {
        None => reasons.push("Last inspection date must be a valid date.".into()),
        Some(date) if date > today() => {
            reasons.push("Last inspection date must lie in the past.".into())
        }
        _ => {}
    }

    match (
        &draft.brand,
        &draft.model,
        &draft.vin_number,
        &draft.license_plate,
        draft.owner,
        draft.last_inspection,
    ) {
        (Some(brand), Some(model), Some(vin), Some(plate), Some(owner), Some(inspection))
            if reasons.is_empty() =>
        {
            Ok(Car {
                id,
                brand: brand.trim().to_string(),
                model: model.trim().to_string(),
                vin_number: vin.clone(),
                license_plate: plate.clone(),
                owner,
                last_inspection: inspection,
            })
        }
        _ => Err(ValidationError::new(reasons)),
    }
}

pub fn validate_article(
    id: RecordId,
    draft: &ArticleDraft,
    keys: &dyn KeyLookup,
    prior_code: Option<&str>,
) -> Result<ViolationArticle, ValidationError> {
    let mut reasons = Vec::new();

    match draft.code.as_deref() {
        None => reasons.push("Article code must not be empty.".into()),
        Some(code) if prior_code != Some(code) => {
            if let Err(reason) = fields::check_article_code(code) {
                reasons.push(reason);
            } else if keys.article_code_exists(code) {
                reasons.push("An article with this code already exists.".into());
            }
        }
        _ => {}
    }

    match draft.description.as_deref().map(str::trim) {
        None | Some("") => reasons.push("Description must not be empty.".into()),
        Some(description) if !fields::is_cyrillic_text(description) => reasons.push(
            "Description may contain only Cyrillic letters, digits and punctuation.".into(),
        ),
        _ => {}
    }

    match draft.fine {
        Some(fine) if fine > 0 => {}
        _ => reasons.push("Fine must be a positive number.".into()),
    }

    match (&draft.code, &draft.description, draft.fine) {
        (Some(code), Some(description), Some(fine)) if reasons.is_empty() => Ok(ViolationArticle {
            id,
            code: code.clone(),
            description: description.trim().to_string(),
            fine,
        }),
        _ => Err(ValidationError::new(reasons)),
    }
}

pub fn validate_type(
    id: RecordId,
    draft: &TypeDraft,
    keys: &dyn KeyLookup,
    prior_name: Option<&str>,
) -> Result<ViolationType, ValidationError> {
    let mut reasons = Vec::new();

    match draft.name.as_deref().map(str::trim) {
        None | Some("") => reasons.push("Type name must not be empty.".into()),
        Some(name) if !fields::is_cyrillic_text(name) => reasons
            .push("Type name may contain only Cyrillic letters and punctuation.".into()),
        Some(name) if prior_name != Some(name) && keys.type_name_exists(name) => {
            reasons.push("A violation type with this name already exists.".into())
        }
        _ => {}
    }

    match &draft.name {
        Some(name) if reasons.is_empty() => Ok(ViolationType {
            id,
            name: name.trim().to_string(),
        }),
        _ => Err(ValidationError::new(reasons)),
    }
}

pub fn validate_violation(
    id: RecordId,
    draft: &ViolationDraft,
    keys: &dyn KeyLookup,
    prior_resolution: Option<&str>,
) -> Result<Violation, ValidationError> {
    let mut reasons = Vec::new();

    match draft.date {
        None => reasons.push("Violation date must be a valid date.".into()),
        Some(date) if date > today() => {
            reasons.push("Violation date must lie in the past.".into())
        }
        _ => {}
    }

    match draft.resolution.as_deref() {
        None => reasons.push("Resolution number must consist of exactly 20 digits.".into()),
        Some(resolution) if prior_resolution != Some(resolution) => {
            if let Err(reason) = fields::check_resolution(resolution) {
                reasons.push(reason);
            } else if keys.resolution_exists(resolution) {
                reasons.push("Resolution number already exists.".into());
            }
        }
        _ => {}
    }

    if draft.car.is_none() {
        reasons.push("Car must be specified.".into());
    }
    if draft.violation_type.is_none() {
        reasons.push("Violation type must be specified.".into());
    }
    if draft.article.is_none() {
        reasons.push("Violation article must be specified.".into());
    }

    match (
        &draft.resolution,
        draft.car,
        draft.article,
        draft.violation_type,
        draft.date,
    ) {
        (Some(resolution), Some(car), Some(article), Some(violation_type), Some(date))
            if reasons.is_empty() =>
        {
            Ok(Violation {
                id,
                resolution: resolution.clone(),
                car,
                article,
                violation_type,
                date,
                paid: draft.paid,
            })
        }
        _ => Err(ValidationError::new(reasons)),
    }
}
