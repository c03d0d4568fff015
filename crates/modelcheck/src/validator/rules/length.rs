use serde_json::Value;

use crate::handler::{RuleInput, RuleOutcome};
use crate::model::Model;
use crate::value::is_empty;

use super::{MAX_LENGTH, MIN_LENGTH, fail, numeric_param};

pub(crate) fn min_length(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    let limit = numeric_param(MIN_LENGTH, input.param)?;
    match length(input) {
        Some(len) if len < limit => fail(model, input, MIN_LENGTH),
        _ => Ok(None),
    }
}

pub(crate) fn max_length(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    let limit = numeric_param(MAX_LENGTH, input.param)?;
    match length(input) {
        Some(len) if len > limit => fail(model, input, MAX_LENGTH),
        _ => Ok(None),
    }
}

/// Character count of a string, element count of an array. Empty values and
/// other kinds have no length.
#[allow(clippy::cast_precision_loss)]
fn length(input: &RuleInput<'_>) -> Option<f64> {
    if is_empty(input.value) {
        return None;
    }
    match input.value? {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        _ => None,
    }
}
