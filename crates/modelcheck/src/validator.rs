use serde_json::Value;

use crate::config::{ValidationConfig, ValidationOption};
use crate::error::{Error, ValidationErrors};
use crate::handler::RuleInput;
use crate::model::{Model, RuleSet};
use crate::path;
use crate::value::is_empty;

pub(crate) mod convert;
pub(crate) mod patterns;
pub(crate) mod rules;

/// The object under validation. Only an exclusive borrow can receive
/// coerced values.
enum Target<'a> {
    Shared(&'a Value),
    Exclusive(&'a mut Value),
}

impl Target<'_> {
    fn as_value(&self) -> &Value {
        match self {
            Self::Shared(value) => value,
            Self::Exclusive(value) => value,
        }
    }
}

impl Model {
    /// Validates `target` against every declared property.
    ///
    /// Returns `Ok(None)` when every rule passes. Rules of a property run in
    /// declaration order and all failures are collected.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the model references an unregistered rule or
    /// type, or a rule parameter is malformed.
    pub fn validate(&self, target: &Value) -> Result<Option<ValidationErrors>, Error> {
        validate_model(self, Target::Shared(target), ValidationConfig::default())
    }

    /// Validates `target` and replaces every value that passes its `type`
    /// rule with the converted value.
    ///
    /// # Errors
    ///
    /// See [`Model::validate`]. Values coerced before a configuration error
    /// was raised stay coerced.
    pub fn validate_and_coerce(
        &self,
        target: &mut Value,
    ) -> Result<Option<ValidationErrors>, Error> {
        self.validate_with(target, &[ValidationOption::EnsureTypes])
    }

    /// Validates `target` with per-call options.
    ///
    /// # Errors
    ///
    /// See [`Model::validate_and_coerce`].
    pub fn validate_with(
        &self,
        target: &mut Value,
        options: &[ValidationOption],
    ) -> Result<Option<ValidationErrors>, Error> {
        let cfg = ValidationConfig::from_options(options);
        validate_model(self, Target::Exclusive(target), cfg)
    }

    /// Validates the single declared property `path`.
    ///
    /// Returns the property's messages in rule order, or `Ok(None)` when it
    /// passes or is not declared.
    ///
    /// # Errors
    ///
    /// See [`Model::validate`].
    pub fn validate_property(
        &self,
        path: &str,
        target: &Value,
    ) -> Result<Option<Vec<String>>, Error> {
        validate_one(self, path, Target::Shared(target), ValidationConfig::default())
    }

    /// Validates the single declared property `path` and coerces it when it
    /// passes its `type` rule.
    ///
    /// # Errors
    ///
    /// See [`Model::validate_and_coerce`].
    pub fn validate_property_and_coerce(
        &self,
        path: &str,
        target: &mut Value,
    ) -> Result<Option<Vec<String>>, Error> {
        self.validate_property_with(path, target, &[ValidationOption::EnsureTypes])
    }

    /// Validates the single declared property `path` with per-call options.
    ///
    /// # Errors
    ///
    /// See [`Model::validate_and_coerce`].
    pub fn validate_property_with(
        &self,
        path: &str,
        target: &mut Value,
        options: &[ValidationOption],
    ) -> Result<Option<Vec<String>>, Error> {
        let cfg = ValidationConfig::from_options(options);
        validate_one(self, path, Target::Exclusive(target), cfg)
    }
}

fn validate_model(
    model: &Model,
    mut target: Target<'_>,
    cfg: ValidationConfig,
) -> Result<Option<ValidationErrors>, Error> {
    let mut errors = ValidationErrors::new();
    for path in model.paths() {
        let Some(set) = model.rules_for(path) else {
            continue;
        };
        let messages = validate_rules(model, path, set, &mut target, cfg)?;
        errors.insert(path, messages);
    }

    tracing::debug!(
        failed_properties = errors.len(),
        ensure_types = cfg.ensure_types,
        "validated target"
    );
    Ok(errors.into_option())
}

fn validate_one(
    model: &Model,
    path: &str,
    mut target: Target<'_>,
    cfg: ValidationConfig,
) -> Result<Option<Vec<String>>, Error> {
    let Some(set) = model.rules_for(path) else {
        tracing::trace!(property = path, "property has no declared rules");
        return Ok(None);
    };
    let messages = validate_rules(model, path, set, &mut target, cfg)?;
    Ok((!messages.is_empty()).then_some(messages))
}

/// Runs the rules of one property in order, collecting failure messages.
fn validate_rules(
    model: &Model,
    path: &str,
    set: &RuleSet,
    target: &mut Target<'_>,
    cfg: ValidationConfig,
) -> Result<Vec<String>, Error> {
    // Every rule name must resolve, even those a fail-fast break skips.
    let resolved = set
        .iter()
        .map(|(rule, param)| {
            let handler = model.handler(rule).ok_or_else(|| Error::UnknownRule {
                rule: rule.to_string(),
                property: path.to_string(),
            })?;
            Ok::<_, Error>((rule, param, handler))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let mut messages = Vec::new();
    for (rule, param, handler) in resolved {
        let outcome = {
            let root = target.as_value();
            let input = RuleInput {
                rule,
                value: path::get(root, path),
                param,
                target: root,
                property: path,
            };
            handler.check(model, &input)?
        };

        match outcome {
            Some(message) if !message.is_empty() => {
                tracing::debug!(property = path, rule, "rule failed");
                messages.push(message);
                if cfg.fail_fast {
                    break;
                }
            }
            _ if cfg.ensure_types && rule == rules::TYPE => coerce(model, path, param, target)?,
            _ => {}
        }
    }

    Ok(messages)
}

/// Replaces the value at `path` with its conversion to the type named by
/// `param`. Empty values and failed conversions are left as they are.
fn coerce(model: &Model, path: &str, param: &Value, target: &mut Target<'_>) -> Result<(), Error> {
    let Target::Exclusive(root) = target else {
        return Ok(());
    };
    let root: &mut Value = root;

    let name = rules::str_param(rules::TYPE, param, "a type name")?;
    let converter = model.converter(name).ok_or_else(|| Error::UnknownType {
        name: name.to_string(),
    })?;

    let current = path::get(root, path);
    if is_empty(current) {
        return Ok(());
    }
    let Some(converted) = current.and_then(|value| converter.convert(model, value)) else {
        tracing::trace!(property = path, ty = name, "conversion failed, value kept");
        return Ok(());
    };

    if path::set(root, path, converted) {
        tracing::trace!(property = path, ty = name, "coerced value");
    } else {
        tracing::trace!(property = path, ty = name, "no object to write coerced value into");
    }
    Ok(())
}
