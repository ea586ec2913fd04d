//! Lenient scalar deserializers.
//!
//! Bulk documents come from other installations and hand edits; a mangled
//! date or number in one record must not fail the whole parse. Each helper
//! accepts the canonical JSON form plus the stringly-typed form older
//! exports produce, and decodes anything else to `None` with a warning.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// Non-empty trimmed string; anything else is absent.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(other) if !other.is_null() => {
            warn!(value = %other, "ignoring non-string value");
            None
        }
        _ => None,
    })
}

/// ISO `YYYY-MM-DD` date; malformed values are absent.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => match NaiveDate::from_str(s.trim()) {
            Ok(date) => Some(date),
            Err(_) => {
                warn!(value = %s, "ignoring malformed date value");
                None
            }
        },
        Some(other) if !other.is_null() => {
            warn!(value = %other, "ignoring malformed date value");
            None
        }
        _ => None,
    })
}

/// Integer, given either as a JSON number or a digit string.
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => match s.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                warn!(value = %s, "ignoring malformed integer value");
                None
            }
        },
        Some(other) if !other.is_null() => {
            warn!(value = %other, "ignoring malformed integer value");
            None
        }
        _ => None,
    })
}

/// Boolean, given either as a JSON bool or "true"/"false".
pub fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().parse() {
            Ok(b) => Some(b),
            Err(_) => {
                warn!(value = %s, "ignoring malformed boolean value");
                None
            }
        },
        Some(other) if !other.is_null() => {
            warn!(value = %other, "ignoring malformed boolean value");
            None
        }
        _ => None,
    })
}

/// Surrogate id; foreign documents may carry anything here, and imports
/// never rely on it.
pub fn id<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Uuid::from_str(s.trim()).ok(),
        _ => None,
    })
}
