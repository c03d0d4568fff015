use serde_json::Value;

use crate::handler::{RuleInput, RuleOutcome};
use crate::model::Model;
use crate::path;

use super::{EQUAL_TO, fail, str_param};

/// Fails unless the value equals the current value at the path named by the
/// parameter. Two absent values are equal; empty values are still compared.
pub(crate) fn equal_to(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    let other = str_param(EQUAL_TO, input.param, "a property path")?;
    if !same(input.value, path::get(input.target, other)) {
        return fail(model, input, EQUAL_TO);
    }
    Ok(None)
}

/// Strict equality, except that a float equals an integer of the same value
/// (`10 == 10.0`).
fn same(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x == y
                || ((x.is_f64() || y.is_f64())
                    && x.as_f64().zip(y.as_f64()).is_some_and(|(x, y)| x == y))
        }
        _ => a == b,
    }
}
