use crate::error::Error;
use crate::handler::{RuleInput, RuleOutcome};
use crate::model::Model;
use crate::value::is_empty;

use super::{TYPE, fail, str_param};

/// Fails when a non-empty value does not convert with the converter named
/// by the parameter.
///
/// An unregistered type name is reported even for empty values, so a broken
/// schema surfaces on the first call.
pub(crate) fn check_type(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    let name = str_param(TYPE, input.param, "a type name")?;
    let converter = model.converter(name).ok_or_else(|| Error::UnknownType {
        name: name.to_string(),
    })?;

    match input.value {
        Some(value) if !is_empty(input.value) => {
            if converter.convert(model, value).is_none() {
                return fail(model, input, TYPE);
            }
            Ok(None)
        }
        _ => Ok(None),
    }
}
