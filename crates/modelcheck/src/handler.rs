use serde_json::Value;

use crate::error::Error;
use crate::model::Model;

/// What a rule handler returns: `Ok(Some(message))` for a failed rule,
/// `Ok(None)` for a passing one, `Err` for a broken model.
pub type RuleOutcome = Result<Option<String>, Error>;

/// One rule application: the property value plus everything a handler may
/// need to judge it.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// Declared rule name.
    pub rule: &'a str,
    /// Value at `property`, `None` when absent.
    pub value: Option<&'a Value>,
    /// Rule parameter from the rules map.
    pub param: &'a Value,
    /// The whole object being validated.
    pub target: &'a Value,
    /// Dotted path of the property under validation.
    pub property: &'a str,
}

impl<'a> RuleInput<'a> {
    /// Message context for reporting a failure of `rule` on this input.
    #[must_use]
    pub fn error_context(&self, rule: &'a str) -> ErrorContext<'a> {
        ErrorContext {
            rule,
            param: Some(self.param),
            value: self.value,
            target: Some(self.target),
            property: Some(self.property),
        }
    }
}

/// Arguments to [`Model::get_error`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    /// Rule whose message template is used.
    pub rule: &'a str,
    /// Substituted for `{param}` in the template.
    pub param: Option<&'a Value>,
    /// The offending value.
    pub value: Option<&'a Value>,
    /// The object being validated.
    pub target: Option<&'a Value>,
    /// Dotted path of the offending property.
    pub property: Option<&'a str>,
}

impl<'a> ErrorContext<'a> {
    /// Context carrying only a rule name.
    #[must_use]
    pub fn new(rule: &'a str) -> Self {
        Self {
            rule,
            param: None,
            value: None,
            target: None,
            property: None,
        }
    }

    /// Sets the parameter substituted into the template.
    #[must_use]
    pub fn with_param(mut self, param: &'a Value) -> Self {
        self.param = Some(param);
        self
    }
}

/// Predicate implementing one named rule.
///
/// Implemented for every `Fn(&Model, &RuleInput<'_>) -> RuleOutcome`.
/// The model is the one being validated against, so handlers can reach its
/// converters, messages and other handlers.
pub trait Handler: Send + Sync {
    /// Judges one property value.
    fn check(&self, model: &Model, input: &RuleInput<'_>) -> RuleOutcome;
}

impl<F> Handler for F
where
    F: Fn(&Model, &RuleInput<'_>) -> RuleOutcome + Send + Sync,
{
    fn check(&self, model: &Model, input: &RuleInput<'_>) -> RuleOutcome {
        self(model, input)
    }
}

/// Named value coercion: the converted value, or `None` when the value does
/// not convert.
pub trait Converter: Send + Sync {
    /// Converts one raw value.
    fn convert(&self, model: &Model, value: &Value) -> Option<Value>;
}

impl<F> Converter for F
where
    F: Fn(&Model, &Value) -> Option<Value> + Send + Sync,
{
    fn convert(&self, model: &Model, value: &Value) -> Option<Value> {
        self(model, value)
    }
}

/// Replacement for the default message formatting of a model.
pub trait ErrorFormatter: Send + Sync {
    /// Renders the message for a failed rule.
    fn format(&self, model: &Model, ctx: &ErrorContext<'_>) -> String;
}

impl<F> ErrorFormatter for F
where
    F: Fn(&Model, &ErrorContext<'_>) -> String + Send + Sync,
{
    fn format(&self, model: &Model, ctx: &ErrorContext<'_>) -> String {
        self(model, ctx)
    }
}
