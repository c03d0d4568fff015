use crate::handler::{RuleInput, RuleOutcome};
use crate::model::Model;
use crate::value::is_empty;

use super::{REQUIRED, fail};

/// Fails for absent, `null` and blank-string values. The parameter is not
/// consulted.
pub(crate) fn required(model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
    if is_empty(input.value) {
        return fail(model, input, REQUIRED);
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::validator::rules::run;

    #[test]
    fn required_rejects_missing_null_and_blank() {
        for value in [None, Some(Value::Null), Some(json!("")), Some(json!("   "))] {
            let outcome = run("required", json!(true), value.clone()).expect("no config error");
            assert_eq!(outcome.as_deref(), Some("Required"), "{value:?}");
        }
    }

    #[test]
    fn required_accepts_present_values() {
        for value in [json!("req1"), json!(0), json!(false), json!([]), json!({})] {
            let outcome = run("required", json!(true), Some(value.clone())).expect("no config error");
            assert_eq!(outcome, None, "{value}");
        }
    }
}
