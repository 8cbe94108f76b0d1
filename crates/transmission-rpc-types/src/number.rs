//! Integer fields decoded from any JSON number.
//!
//! The daemon's JSON makes no integer/float distinction, so `2.0` is accepted wherever an
//! integer is expected. Fractional values are still rejected.

use serde::{Deserialize, Deserializer};
use serde_json::Number;

pub(crate) fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    to_i64(&number)
}

pub(crate) fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Number>::deserialize(deserializer)?
        .map(|number| to_i64(&number))
        .transpose()
}

fn to_i64<E: serde::de::Error>(number: &Number) -> Result<i64, E> {
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
        .ok_or_else(|| E::custom(format!("expected an integer, got {number}")))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "super::integer")]
        count: i64,
        #[serde(default, deserialize_with = "super::optional_integer")]
        size: Option<i64>,
    }

    #[test]
    fn integral_floats_are_accepted() {
        let sample: Sample = serde_json::from_value(json!({ "count": 2.0, "size": 3 })).unwrap();
        assert_eq!(sample.count, 2);
        assert_eq!(sample.size, Some(3));
    }

    #[test]
    fn missing_and_null_optionals() {
        let sample: Sample = serde_json::from_value(json!({ "count": -1 })).unwrap();
        assert_eq!(sample.size, None);

        let sample: Sample = serde_json::from_value(json!({ "count": 1, "size": null })).unwrap();
        assert_eq!(sample.size, None);
    }

    #[test]
    fn fractions_and_strings_are_rejected() {
        let err = serde_json::from_value::<Sample>(json!({ "count": 2.5 })).unwrap_err();
        assert!(err.to_string().contains("expected an integer, got 2.5"));

        assert!(serde_json::from_value::<Sample>(json!({ "count": "2" })).is_err());
    }
}
