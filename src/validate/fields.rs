//! Per-field format checks.
//!
//! Field rules mirror the agency's paper formats:
//!
//! - license number: exactly 10 digits
//! - VIN: exactly 17 alphanumeric characters, letters I, O, Q forbidden
//! - license plate: 8-9 characters; positions 0, 4, 5 from the plate letter
//!   set; positions 1-3 digits; the remaining positions (region code) digits
//! - resolution number: exactly 20 digits
//! - article code: `<chapter>.<paragraph>[ p.<point>]`, chapter 1-20,
//!   paragraph 1-50, point 1-10
//!
//! Name and description fields are alphabet-restricted to Cyrillic the way
//! the agency records them; plate letters are the Cyrillic subset used on
//! real plates.
//!
//! Each check returns the reason string the entity validators collect.

use std::sync::LazyLock;

use regex::Regex;

/// Letters permitted in a license plate (positions 0, 4 and 5).
const PLATE_LETTERS: &str = "АВЕКМНОРСТУХ";

/// Letters never used in a VIN.
const VIN_FORBIDDEN: &str = "IOQ";

static ARTICLE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d{1,2})( p\.(\d{1,2}))?$").expect("article code pattern")
});

static CYRILLIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[а-яА-Я]+$").expect("cyrillic pattern"));

static CYRILLIC_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[а-яА-Я-]+$").expect("cyrillic-dash pattern"));

static LATIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("latin pattern"));

static ANY_CYRILLIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[а-яА-Я]").expect("any-cyrillic pattern"));

static ANY_LATIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]").expect("any-latin pattern"));

static CYRILLIC_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[а-яА-Я0-9[:punct:]\s]+$").expect("cyrillic-text pattern")
});

pub fn check_license_number(license: &str) -> Result<(), String> {
    if license.chars().count() != 10 || !license.chars().all(|c| c.is_ascii_digit()) {
        return Err("License number must consist of exactly 10 digits.".into());
    }
    Ok(())
}

pub fn check_vin(vin: &str) -> Result<(), String> {
    if vin.chars().count() != 17 {
        return Err("VIN must consist of exactly 17 characters.".into());
    }
    for c in vin.chars() {
        if VIN_FORBIDDEN.contains(c) {
            return Err("VIN must not contain the letters I, O or Q.".into());
        }
        if !c.is_alphanumeric() {
            return Err("VIN must contain only letters and digits.".into());
        }
    }
    Ok(())
}

pub fn check_license_plate(plate: &str) -> Result<(), String> {
    let chars: Vec<char> = plate.chars().collect();
    if chars.len() < 8 || chars.len() > 9 {
        return Err("License plate must consist of 8 or 9 characters.".into());
    }
    if !PLATE_LETTERS.contains(chars[0])
        || !PLATE_LETTERS.contains(chars[4])
        || !PLATE_LETTERS.contains(chars[5])
    {
        return Err("License plate contains invalid letters.".into());
    }
    if !chars[1..4].iter().all(|c| c.is_ascii_digit()) {
        return Err("License plate contains invalid digits.".into());
    }
    if !chars[6..].iter().all(|c| c.is_ascii_digit()) {
        return Err("License plate has an invalid region code.".into());
    }
    Ok(())
}

pub fn check_resolution(resolution: &str) -> Result<(), String> {
    if resolution.chars().count() != 20 || !resolution.chars().all(|c| c.is_ascii_digit()) {
        return Err("Resolution number must consist of exactly 20 digits.".into());
    }
    Ok(())
}

pub fn check_article_code(code: &str) -> Result<(), String> {
    let caps = ARTICLE_CODE
        .captures(code)
        .ok_or_else(|| "Article code has an invalid format. Example: '12.9 p.2'.".to_string())?;

    // Captures 1, 2 and 4 are 1-2 digit groups; parsing cannot fail.
    let chapter: u32 = caps[1].parse().unwrap_or(0);
    if !(1..=20).contains(&chapter) {
        return Err("Article chapter must be between 1 and 20.".into());
    }
    let paragraph: u32 = caps[2].parse().unwrap_or(0);
    if !(1..=50).contains(&paragraph) {
        return Err("Article paragraph must be between 1 and 50.".into());
    }
    if let Some(point) = caps.get(4) {
        let point: u32 = point.as_str().parse().unwrap_or(0);
        if !(1..=10).contains(&point) {
            return Err("Article point must be between 1 and 10.".into());
        }
    }
    Ok(())
}

/// Whole word of Cyrillic letters (driver names).
pub fn is_cyrillic(s: &str) -> bool {
    CYRILLIC.is_match(s)
}

/// Cyrillic letters plus dashes (city names).
pub fn is_cyrillic_with_dash(s: &str) -> bool {
    CYRILLIC_DASH.is_match(s)
}

/// Whole word of Latin letters.
pub fn is_latin(s: &str) -> bool {
    LATIN.is_match(s)
}

/// True when the value mixes Cyrillic and Latin letters (car models must not).
pub fn mixes_alphabets(s: &str) -> bool {
    ANY_CYRILLIC.is_match(s) && ANY_LATIN.is_match(s)
}

/// Cyrillic free text: letters, digits, punctuation, whitespace
/// (article descriptions, type names).
pub fn is_cyrillic_text(s: &str) -> bool {
    CYRILLIC_TEXT.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn license_number_valid() {
        assert!(check_license_number("1234567890").is_ok());
    }

    #[test]
    fn license_number_wrong_length() {
        assert!(check_license_number("123456789").is_err());
        assert!(check_license_number("12345678901").is_err());
    }

    #[test]
    fn license_number_non_digit() {
        assert!(check_license_number("12345678a0").is_err());
    }

    #[test]
    fn vin_valid() {
        assert!(check_vin("1HGBH41JXMN109186").is_ok());
    }

    #[test]
    fn vin_wrong_length() {
        let err = check_vin("1HGBH41JXMN1091869").unwrap_err();
        assert!(err.contains("17"));
    }

    #[test]
    fn vin_forbidden_letters() {
        let err = check_vin("1HGBH41IOQN109186").unwrap_err();
        assert!(err.contains("I, O or Q"));
    }

    #[test]
    fn vin_non_alphanumeric() {
        assert!(check_vin("1H!BH41JX_N109)86").is_err());
    }

    #[test]
    fn plate_valid_8_chars() {
        assert!(check_license_plate("Е123ЕЕ78").is_ok());
    }

    #[test]
    fn plate_valid_9_chars() {
        assert!(check_license_plate("Е123ЕЕ178").is_ok());
    }

    #[test]
    fn plate_wrong_length() {
        assert!(check_license_plate("А987АА1").is_err());
    }

    #[test]
    fn plate_letters_outside_allowed_set() {
        let err = check_license_plate("Ф123ЯЮ178").unwrap_err();
        assert!(err.contains("letters"));
    }

    #[test]
    fn plate_non_digit_positions() {
        let err = check_license_plate("Е1Н3ЕЕ178").unwrap_err();
        assert!(err.contains("digits"));
    }

    #[test]
    fn plate_bad_region_code() {
        let err = check_license_plate("Е123ЕЕ1х8").unwrap_err();
        assert!(err.contains("region"));
    }

    #[test]
    fn resolution_valid() {
        assert!(check_resolution("18810177170123456789").is_ok());
    }

    #[test]
    fn resolution_invalid() {
        assert!(check_resolution("1881017717012345678").is_err());
        assert!(check_resolution("1881017717012345678x").is_err());
    }

    #[test]
    fn article_code_valid_without_point() {
        assert!(check_article_code("12.9").is_ok());
    }

    #[test]
    fn article_code_valid_with_point() {
        assert!(check_article_code("12.9 p.2").is_ok());
    }

    #[test]
    fn article_code_bad_format() {
        assert!(check_article_code("12-9").is_err());
        assert!(check_article_code("chapter 12.9").is_err());
    }

    #[test]
    fn article_code_out_of_range() {
        assert!(check_article_code("21.9").is_err());
        assert!(check_article_code("12.51").is_err());
        assert!(check_article_code("12.9 p.11").is_err());
    }

    #[test]
    fn alphabet_checks() {
        assert!(is_cyrillic("Иван"));
        assert!(!is_cyrillic("Ivan"));
        assert!(is_cyrillic_with_dash("Ростов-на-Дону"));
        assert!(is_latin("Toyota"));
        assert!(mixes_alphabets("ЛадаVesta"));
        assert!(!mixes_alphabets("Веста 2.0"));
        assert!(is_cyrillic_text("Превышение скорости на 20-40 км/ч."));
        assert!(!is_cyrillic_text("Speeding"));
    }
}
