//! Built-in type converters.
//!
//! A converter returns the typed value, or `None` when the raw value does
//! not convert. Dates have no JSON type of their own and convert to RFC 3339
//! UTC strings, which convert to themselves.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::handler::Converter;
use crate::model::Model;
use crate::value;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y"];

pub(crate) fn builtin_converters() -> Vec<(&'static str, Arc<dyn Converter>)> {
    vec![
        entry("string", to_string),
        entry("number", to_number),
        entry("integer", to_integer),
        entry("boolean", to_boolean),
        entry("array", to_array),
        entry("date", to_date),
    ]
}

fn entry<C>(name: &'static str, converter: C) -> (&'static str, Arc<dyn Converter>)
where
    C: Converter + 'static,
{
    let converter: Arc<dyn Converter> = Arc::new(converter);
    (name, converter)
}

fn to_string(_model: &Model, value: &Value) -> Option<Value> {
    if value.is_null() {
        return None;
    }
    Some(Value::String(value::display(value)))
}

fn to_number(_model: &Model, value: &Value) -> Option<Value> {
    if is_exact_integer(value) {
        return Some(value.clone());
    }
    value::to_number(value).and_then(value::number_value)
}

fn to_integer(model: &Model, value: &Value) -> Option<Value> {
    if is_exact_integer(value) {
        return Some(value.clone());
    }
    let n = model.convert("number", value)?;
    let f = n.as_f64()?;
    (f.fract() == 0.0).then_some(n)
}

/// JSON integers are kept as they are: an `f64` round trip loses precision
/// beyond 2^53.
fn is_exact_integer(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_i64() || n.is_u64())
}

fn to_boolean(_model: &Model, value: &Value) -> Option<Value> {
    let s = value::display(value);
    if s.eq_ignore_ascii_case("true") {
        Some(Value::Bool(true))
    } else if s.eq_ignore_ascii_case("false") {
        Some(Value::Bool(false))
    } else {
        None
    }
}

fn to_array(_model: &Model, value: &Value) -> Option<Value> {
    value.is_array().then(|| value.clone())
}

fn to_date(_model: &Model, value: &Value) -> Option<Value> {
    let date = match value {
        Value::Number(n) => from_epoch_millis(n)?,
        Value::String(s) => parse_date(s.trim())?,
        _ => return None,
    };
    Some(Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true)))
}

#[allow(clippy::cast_possible_truncation)]
fn from_epoch_millis(n: &serde_json::Number) -> Option<DateTime<Utc>> {
    let millis = match n.as_i64() {
        Some(ms) => ms,
        None => n.as_f64().filter(|f| f.is_finite())?.trunc() as i64,
    };
    DateTime::<Utc>::from_timestamp_millis(millis)
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(date) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(date.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn convert(name: &str, value: Value) -> Option<Value> {
        Model::base().convert(name, &value)
    }

    #[test]
    fn string_accepts_anything_but_null() {
        assert_eq!(convert("string", json!(7)), Some(json!("7")));
        assert_eq!(convert("string", json!("str2")), Some(json!("str2")));
        assert_eq!(convert("string", json!(false)), Some(json!("false")));
        assert_eq!(convert("string", json!(0)), Some(json!("0")));
        assert_eq!(convert("string", Value::Null), None);
    }

    #[test]
    fn number_parses_numeric_strings() {
        assert_eq!(convert("number", json!("1.5")), Some(json!(1.5)));
        assert_eq!(convert("number", json!("7e2")), Some(json!(700)));
        assert_eq!(convert("number", json!(3.25)), Some(json!(3.25)));
        assert_eq!(convert("number", json!("abc")), None);
        assert_eq!(convert("number", json!(["1"])), None);
        assert_eq!(convert("number", json!({"n": 1})), None);
    }

    #[test]
    fn integer_requires_zero_fraction() {
        assert_eq!(convert("integer", json!("1")), Some(json!(1)));
        assert_eq!(convert("integer", json!("10")), Some(json!(10)));
        assert_eq!(convert("integer", json!(4)), Some(json!(4)));
        assert_eq!(convert("integer", json!("4.0")), Some(json!(4)));
        assert_eq!(convert("integer", json!("4.5")), None);
        assert_eq!(convert("integer", json!("invalid id")), None);
    }

    #[test]
    fn json_integers_keep_full_precision() {
        let beyond_f64 = json!(9_007_199_254_740_993_u64);
        assert_eq!(convert("integer", beyond_f64.clone()), Some(beyond_f64.clone()));
        assert_eq!(convert("number", beyond_f64.clone()), Some(beyond_f64));
        assert_eq!(convert("number", json!(u64::MAX)), Some(json!(u64::MAX)));
        assert_eq!(convert("integer", json!(i64::MIN)), Some(json!(i64::MIN)));
        assert_eq!(convert("integer", json!(4.0)), Some(json!(4)));
    }

    #[test]
    fn integer_reuses_the_models_number_converter() {
        let model = Model::base().extend_with(
            crate::RulesMap::new(),
            crate::ExtendOptions::new().converter("number", |_: &Model, v: &Value| {
                v.as_str()
                    .and_then(|s| s.strip_suffix(" units"))
                    .and_then(|s| s.parse::<i64>().ok())
                    .map(Value::from)
            }),
        );
        assert_eq!(model.convert("integer", &json!("12 units")), Some(json!(12)));
        assert_eq!(model.convert("integer", &json!("12")), None);
    }

    #[test]
    fn boolean_matches_literal_tokens() {
        assert_eq!(convert("boolean", json!("true")), Some(json!(true)));
        assert_eq!(convert("boolean", json!("FALSE")), Some(json!(false)));
        assert_eq!(convert("boolean", json!(true)), Some(json!(true)));
        assert_eq!(convert("boolean", json!("yes")), None);
        assert_eq!(convert("boolean", json!(1)), None);
    }

    #[test]
    fn array_only_accepts_arrays() {
        assert_eq!(convert("array", json!([1, 2])), Some(json!([1, 2])));
        assert_eq!(convert("array", json!("1,2")), None);
        assert_eq!(convert("array", json!({"0": 1})), None);
    }

    #[test]
    fn date_accepts_common_layouts() {
        let cases = [
            (json!(2_332_234_423_i64), "1970-01-27T23:50:34.423Z"),
            (json!("October 13, 1975 11:13:00"), "1975-10-13T11:13:00.000Z"),
            (json!("07/08/2000"), "2000-07-08T00:00:00.000Z"),
            (json!("2012-06-20"), "2012-06-20T00:00:00.000Z"),
            (json!("2012-06-20 07:33:00"), "2012-06-20T07:33:00.000Z"),
            (json!("1980-10-1"), "1980-10-01T00:00:00.000Z"),
            (json!("2012-06-20T07:33:00+02:00"), "2012-06-20T05:33:00.000Z"),
        ];
        for (input, expected) in cases {
            assert_eq!(convert("date", input.clone()), Some(json!(expected)), "{input}");
        }
    }

    #[test]
    fn date_rejects_unparsable_values() {
        assert_eq!(convert("date", json!("invalid date")), None);
        assert_eq!(convert("date", json!("2012-13-45")), None);
        assert_eq!(convert("date", json!(true)), None);
        assert_eq!(convert("date", json!([2012, 6, 20])), None);
    }

    #[test]
    fn date_output_converts_to_itself() {
        let once = convert("date", json!("October 13, 1975 11:13:00")).expect("valid date");
        assert_eq!(convert("date", once.clone()), Some(once));
    }
}
