mod layered;
mod rules;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::ExtendOptions;
use crate::handler::{
    Converter, ErrorContext, ErrorFormatter, Handler, RuleInput, RuleOutcome,
};
use crate::messages;
use crate::validator::convert;
use crate::validator::patterns::PatternCache;
use crate::validator::rules as handlers;
use crate::value;

use layered::Layered;

pub use rules::{RuleSet, RulesMap};

/// A validation schema: declared rules per property path, plus the handlers,
/// converters and message templates those rules resolve to.
///
/// Models are built by derivation. [`Model::base`] carries the built-in
/// registries and no rules; [`Model::extend`] layers new rules (and,
/// through [`Model::extend_with`], new registrations) on top of an existing
/// model. A derived model sees everything its ancestors declared unless it
/// shadows it, and nothing it declares leaks back into them.
///
/// ```
/// use modelcheck::{Model, RulesMap};
/// use serde_json::json;
///
/// let person = Model::base().extend(
///     RulesMap::from_json(json!({"id": {"type": "integer", "required": true}})).unwrap(),
/// );
/// let customer = person.extend(
///     RulesMap::from_json(json!({"contact.email": {"email": true, "required": true}})).unwrap(),
/// );
///
/// let errors = customer.validate(&json!({})).unwrap().expect("both fields missing");
/// assert_eq!(errors.len(), 2);
/// assert!(person.validate(&json!({"id": 1})).unwrap().is_none());
/// ```
#[derive(Clone)]
pub struct Model {
    rules: Layered<RuleSet>,
    handlers: Layered<Arc<dyn Handler>>,
    types: Layered<Arc<dyn Converter>>,
    messages: Layered<String>,
    formatter: Option<Arc<dyn ErrorFormatter>>,
    patterns: Arc<PatternCache>,
}

impl Model {
    /// Model with the built-in handlers, converters and messages, and no
    /// declared rules.
    #[must_use]
    pub fn base() -> Self {
        Self {
            rules: Layered::new(),
            handlers: handlers::builtin_handlers()
                .into_iter()
                .map(|(name, h)| (name.to_string(), h))
                .collect(),
            types: convert::builtin_converters()
                .into_iter()
                .map(|(name, c)| (name.to_string(), c))
                .collect(),
            messages: messages::DEFAULT_MESSAGES
                .iter()
                .map(|(name, text)| ((*name).to_string(), (*text).to_string()))
                .collect(),
            formatter: None,
            patterns: Arc::new(PatternCache::default()),
        }
    }

    /// Model with no handlers, converters, messages or rules.
    ///
    /// Useful as the root of a family that must not inherit the built-ins.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: Layered::new(),
            handlers: Layered::new(),
            types: Layered::new(),
            messages: Layered::new(),
            formatter: None,
            patterns: Arc::new(PatternCache::default()),
        }
    }

    /// Derives a model that adds or replaces the rule sets in `rules`.
    #[must_use]
    pub fn extend(&self, rules: RulesMap) -> Self {
        self.extend_with(rules, ExtendOptions::default())
    }

    /// Derives a model that adds or replaces rule sets, handlers, converters
    /// and messages, and optionally swaps the error formatter.
    #[must_use]
    pub fn extend_with(&self, rules: RulesMap, options: ExtendOptions) -> Self {
        let mut derived = Self {
            rules: self.rules.derive(),
            handlers: self.handlers.derive(),
            types: self.types.derive(),
            messages: self.messages.derive(),
            formatter: self.formatter.clone(),
            patterns: Arc::clone(&self.patterns),
        };

        for (path, set) in rules {
            derived.rules.insert(path, set);
        }
        for (name, handler) in options.handlers {
            derived.handlers.insert(name, handler);
        }
        for (name, converter) in options.types {
            derived.types.insert(name, converter);
        }
        for (name, template) in options.messages {
            derived.messages.insert(name, template);
        }
        if let Some(formatter) = options.formatter {
            derived.formatter = Some(formatter);
        }

        tracing::trace!(
            depth = derived.rules.depth(),
            paths = derived.rules.len(),
            "derived model"
        );
        derived
    }

    /// Declares (or replaces) the rule set of `path` on this model only.
    pub fn set_rules(&mut self, path: impl Into<String>, rules: RuleSet) {
        self.rules.insert(path, rules);
    }

    /// Registers the handler for rule `name` on this model only.
    pub fn register_handler<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&Model, &RuleInput<'_>) -> RuleOutcome + Send + Sync + 'static,
    {
        self.handlers.insert(name, Arc::new(handler));
    }

    /// Registers the converter for type `name` on this model only.
    pub fn register_type<F>(&mut self, name: impl Into<String>, converter: F)
    where
        F: Fn(&Model, &Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.types.insert(name, Arc::new(converter));
    }

    /// Sets the message template of rule `name` on this model only.
    pub fn register_message(&mut self, name: impl Into<String>, template: impl Into<String>) {
        self.messages.insert(name, template.into());
    }

    /// Declared property paths, inherited ones first.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.rules.keys()
    }

    /// Effective rule set of `path`.
    #[must_use]
    pub fn rules_for(&self, path: &str) -> Option<&RuleSet> {
        self.rules.get(path)
    }

    /// Handler registered for rule `name`.
    #[must_use]
    pub fn handler(&self, name: &str) -> Option<&dyn Handler> {
        self.handlers.get(name).map(|handler| &**handler)
    }

    /// Converter registered for type `name`.
    #[must_use]
    pub fn converter(&self, name: &str) -> Option<&dyn Converter> {
        self.types.get(name).map(|converter| &**converter)
    }

    /// Message template of rule `name`.
    #[must_use]
    pub fn message(&self, name: &str) -> Option<&str> {
        self.messages.get(name).map(String::as_str)
    }

    /// Converts `value` with the converter registered as `name`.
    ///
    /// Returns `None` both for unregistered types and failed conversions;
    /// use [`Model::converter`] to tell them apart.
    #[must_use]
    pub fn convert(&self, name: &str, value: &Value) -> Option<Value> {
        self.converter(name)?.convert(self, value)
    }

    /// Message for a failed rule, rendered by the nearest custom formatter
    /// or by [`Model::default_error`].
    #[must_use]
    pub fn get_error(&self, ctx: &ErrorContext<'_>) -> String {
        match &self.formatter {
            Some(formatter) => formatter.format(self, ctx),
            None => self.default_error(ctx),
        }
    }

    /// Shorthand for [`Model::get_error`] with only a rule name and
    /// parameter.
    #[must_use]
    pub fn error_message(&self, rule: &str, param: Option<&Value>) -> String {
        let mut ctx = ErrorContext::new(rule);
        ctx.param = param;
        self.get_error(&ctx)
    }

    /// Template of `ctx.rule` with its first `{param}` replaced by the
    /// parameter's string form (empty for a missing or `null` parameter).
    /// Rules without a template render as their own name.
    #[must_use]
    pub fn default_error(&self, ctx: &ErrorContext<'_>) -> String {
        let param = ctx
            .param
            .filter(|p| !p.is_null())
            .map(value::display)
            .unwrap_or_default();
        match self.message(ctx.rule) {
            Some(template) => template.replacen("{param}", &param, 1),
            None => ctx.rule.to_string(),
        }
    }

    pub(crate) fn patterns(&self) -> &PatternCache {
        &self.patterns
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::base()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("paths", &self.rules.keys().collect::<Vec<_>>())
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .field("messages", &self.messages.keys().collect::<Vec<_>>())
            .field("custom_formatter", &self.formatter.is_some())
            .field("depth", &self.rules.depth())
            .finish()
    }
}
