use crate::error::Error;
use crate::handler::{RuleInput, RuleOutcome};
use crate::model::Model;
use crate::value::{display, is_empty};

use super::{CREDIT_CARD, DIGITS, EMAIL, NUMBER, PATTERN, URL, fail, str_param};

/// Fails when the string form of a non-empty value does not match the
/// regex given as parameter. The match is unanchored.
pub(crate) fn pattern(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    let source = str_param(PATTERN, input.param, "a regex source string")?;
    let re = model
        .patterns()
        .load_or_compile(source)
        .map_err(|e| Error::invalid_param(PATTERN, format!("invalid regex pattern: {e}")))?;
    check(model, input, PATTERN, |s| re.is_match(s))
}

pub(crate) fn email(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    check(model, input, EMAIL, modelcheck_formats::is_email)
}

pub(crate) fn url(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    check(model, input, URL, modelcheck_formats::is_url)
}

pub(crate) fn number(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    check(model, input, NUMBER, modelcheck_formats::is_number)
}

pub(crate) fn digits(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    check(model, input, DIGITS, modelcheck_formats::is_digits)
}

pub(crate) fn credit_card(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    check(model, input, CREDIT_CARD, modelcheck_formats::is_credit_card)
}

fn check(
    model: &Model,
    input: &RuleInput<'_>,
    rule: &'static str,
    accepts: impl Fn(&str) -> bool,
) -> RuleOutcome {
    let Some(value) = input.value.filter(|_| !is_empty(input.value)) else {
        return Ok(None);
    };
    if accepts(&display(value)) {
        Ok(None)
    } else {
        fail(model, input, rule)
    }
}
