use std::cmp::Ordering;

use serde_json::Value;

use crate::error::Error;
use crate::handler::{RuleInput, RuleOutcome};
use crate::model::Model;
use crate::value::{is_empty, to_number};

use super::{MAX, MIN, fail};

pub(crate) fn min(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    match compare(MIN, input)? {
        Some(Ordering::Less) => fail(model, input, MIN),
        _ => Ok(None),
    }
}

pub(crate) fn max(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    match compare(MAX, input)? {
        Some(Ordering::Greater) => fail(model, input, MAX),
        _ => Ok(None),
    }
}

/// Orders the value against the bound: numerically when both have a numeric
/// form, lexicographically when both are strings that are not numbers.
/// `None` when empty or incomparable.
fn compare(rule: &str, input: &RuleInput<'_>) -> Result<Option<Ordering>, Error> {
    let bound = input.param;
    if matches!(bound, Value::Null | Value::Array(_) | Value::Object(_)) {
        return Err(Error::invalid_param(
            rule,
            format!("expected a number or string bound, got {bound}"),
        ));
    }
    if is_empty(input.value) {
        return Ok(None);
    }
    let Some(value) = input.value else {
        return Ok(None);
    };

    let ordering = match (numeric(value), numeric(bound)) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => match (value, bound) {
            (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
            _ => None,
        },
    };
    Ok(ordering)
}

/// Numeric form of a comparison operand. Blank strings have none.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        _ => to_number(value),
    }
}
