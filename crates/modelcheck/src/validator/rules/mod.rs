pub(crate) mod equality;
pub(crate) mod format;
pub(crate) mod length;
pub(crate) mod presence;
pub(crate) mod range;
pub(crate) mod types;

use std::sync::Arc;

use serde_json::Value;

use crate::error::Error;
use crate::handler::{Handler, RuleInput, RuleOutcome};
use crate::model::Model;

pub(crate) const TYPE: &str = "type";
pub(crate) const REQUIRED: &str = "required";
pub(crate) const PATTERN: &str = "pattern";
pub(crate) const MIN_LENGTH: &str = "minlength";
pub(crate) const MAX_LENGTH: &str = "maxlength";
pub(crate) const MIN: &str = "min";
pub(crate) const MAX: &str = "max";
pub(crate) const EMAIL: &str = "email";
pub(crate) const URL: &str = "url";
pub(crate) const NUMBER: &str = "number";
pub(crate) const DIGITS: &str = "digits";
pub(crate) const CREDIT_CARD: &str = "creditcard";
pub(crate) const EQUAL_TO: &str = "equalTo";

/// Handlers registered on [`Model::base`].
pub(crate) fn builtin_handlers() -> Vec<(&'static str, Arc<dyn Handler>)> {
    vec![
        entry(TYPE, types::check_type),
        entry(REQUIRED, presence::required),
        entry(PATTERN, format::pattern),
        entry(MIN_LENGTH, length::min_length),
        entry(MAX_LENGTH, length::max_length),
        entry(MIN, range::min),
        entry(MAX, range::max),
        entry(EMAIL, format::email),
        entry(URL, format::url),
        entry(NUMBER, format::number),
        entry(DIGITS, format::digits),
        entry(CREDIT_CARD, format::credit_card),
        entry(EQUAL_TO, equality::equal_to),
    ]
}

fn entry<H>(name: &'static str, handler: H) -> (&'static str, Arc<dyn Handler>)
where
    H: Handler + 'static,
{
    let handler: Arc<dyn Handler> = Arc::new(handler);
    (name, handler)
}

/// Failure outcome for `rule`, rendered through the model's formatter.
pub(crate) fn fail(model: &Model, input: &RuleInput<'_>, rule: &'static str) -> RuleOutcome {
    Ok(Some(model.get_error(&input.error_context(rule))))
}

/// Numeric rule parameter: a JSON number or a numeric string.
pub(crate) fn numeric_param(rule: &str, param: &Value) -> Result<f64, Error> {
    let n = match param {
        Value::Number(_) | Value::String(_) => crate::value::to_number(param),
        _ => None,
    };
    n.ok_or_else(|| Error::invalid_param(rule, format!("expected a number, got {param}")))
}

/// String rule parameter.
pub(crate) fn str_param<'a>(rule: &str, param: &'a Value, what: &str) -> Result<&'a str, Error> {
    param
        .as_str()
        .ok_or_else(|| Error::invalid_param(rule, format!("expected {what}, got {param}")))
}

#[cfg(test)]
pub(crate) fn run(rule: &str, param: Value, value: Option<Value>) -> RuleOutcome {
    let target = match &value {
        Some(v) => serde_json::json!({ "p": v }),
        None => serde_json::json!({}),
    };
    run_on(&Model::base(), rule, &param, &target, "p")
}

#[cfg(test)]
pub(crate) fn run_on(
    model: &Model,
    rule: &str,
    param: &Value,
    target: &Value,
    property: &str,
) -> RuleOutcome {
    let handler = model.handler(rule).expect("rule is registered");
    let input = RuleInput {
        rule,
        value: crate::path::get(target, property),
        param,
        target,
        property,
    };
    handler.check(model, &input)
}
