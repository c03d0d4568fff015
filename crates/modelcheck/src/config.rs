use std::sync::Arc;

use serde_json::Value;

use crate::handler::{Converter, ErrorContext, ErrorFormatter, Handler, RuleInput, RuleOutcome};
use crate::model::Model;

/// Options for a single `validate_with` / `validate_property_with` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationOption {
    /// Replace each value that passes its `type` rule with the converted
    /// value.
    EnsureTypes,
    /// Stop evaluating a property after its first failing rule. Other
    /// properties are still validated.
    FailFast,
}

/// Runtime configuration threaded through one validation call.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ValidationConfig {
    pub ensure_types: bool,
    pub fail_fast: bool,
}

impl ValidationConfig {
    pub fn from_options(options: &[ValidationOption]) -> Self {
        let mut cfg = Self::default();
        for option in options {
            match option {
                ValidationOption::EnsureTypes => cfg.ensure_types = true,
                ValidationOption::FailFast => cfg.fail_fast = true,
            }
        }
        cfg
    }
}

/// Handlers, converters and messages a derived model adds or overrides.
///
/// ```
/// use modelcheck::{ExtendOptions, Model, RulesMap};
///
/// let strict = Model::base().extend_with(
///     RulesMap::new().rule("name", "required", true),
///     ExtendOptions::new().message("required", "Please fill in this field"),
/// );
/// let errors = strict
///     .validate(&serde_json::json!({}))
///     .unwrap()
///     .expect("name is missing");
/// assert_eq!(errors["name"], ["Please fill in this field"]);
/// ```
#[derive(Clone, Default)]
pub struct ExtendOptions {
    pub(crate) handlers: Vec<(String, Arc<dyn Handler>)>,
    pub(crate) types: Vec<(String, Arc<dyn Converter>)>,
    pub(crate) messages: Vec<(String, String)>,
    pub(crate) formatter: Option<Arc<dyn ErrorFormatter>>,
}

impl ExtendOptions {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler for rule `name`.
    #[must_use]
    pub fn handler<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Model, &RuleInput<'_>) -> RuleOutcome + Send + Sync + 'static,
    {
        self.handlers.push((name.into(), Arc::new(handler)));
        self
    }

    /// Registers the converter for type `name`.
    #[must_use]
    pub fn converter<F>(mut self, name: impl Into<String>, converter: F) -> Self
    where
        F: Fn(&Model, &Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.types.push((name.into(), Arc::new(converter)));
        self
    }

    /// Sets the message template for rule `name`. `{param}` is replaced by
    /// the rule parameter.
    #[must_use]
    pub fn message(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.messages.push((name.into(), template.into()));
        self
    }

    /// Replaces message formatting for the derived model and its
    /// descendants.
    #[must_use]
    pub fn error_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Model, &ErrorContext<'_>) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }
}

impl std::fmt::Debug for ExtendOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendOptions")
            .field(
                "handlers",
                &self.handlers.iter().map(|(n, _)| n).collect::<Vec<_>>(),
            )
            .field("types", &self.types.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("messages", &self.messages)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}
