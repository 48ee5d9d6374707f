use serde::{Deserialize, Deserializer, de};
use std::{fmt, str::FromStr};

/// Deserializes an optional query parameter, treating `?key=` the same as a
/// missing key.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => FromStr::from_str(s).map_err(de::Error::custom).map(Some),
    }
}

/// Like [`empty_string_as_none`], but rejects `NaN` and infinities, which
/// SQLite cannot compare against.
pub fn finite_f64_or_none<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none::<D, f64>(de)? {
        Some(value) if !value.is_finite() => Err(de::Error::custom(format!(
            "expected a finite number, got {value}"
        ))),
        parsed => Ok(parsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "empty_string_as_none")]
        since: Option<DateTime<Utc>>,
    }

    fn parse(raw: &str) -> Result<Params, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[test]
    fn empty_and_missing_values_are_none() {
        let params = parse(r#"{"amount": ""}"#).unwrap();
        assert!(params.amount.is_none());
        assert!(params.since.is_none());
    }

    #[test]
    fn values_are_parsed() {
        let params = parse(r#"{"amount": "12.5", "since": "2024-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(params.amount, Some(12.5));
        assert_eq!(
            params.since,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse(r#"{"amount": "ten"}"#).is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Bounds {
        #[serde(default, deserialize_with = "finite_f64_or_none")]
        low: Option<f64>,
    }

    #[test]
    fn finite_bounds_reject_nan_and_infinity() {
        let bounds: Bounds = serde_json::from_str(r#"{"low": "-3.5"}"#).unwrap();
        assert_eq!(bounds.low, Some(-3.5));

        let bounds: Bounds = serde_json::from_str(r#"{"low": ""}"#).unwrap();
        assert_eq!(bounds.low, None);

        for raw in ["NaN", "nan", "inf", "-Infinity"] {
            let json = format!(r#"{{"low": "{raw}"}}"#);
            assert!(serde_json::from_str::<Bounds>(&json).is_err(), "{raw}");
        }
    }
}
