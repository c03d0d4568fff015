use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Error;

/// Rules declared for one property: rule name to parameter, in declaration
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: IndexMap<String, Value>,
}

impl RuleSet {
    /// Empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a rule, keeping the position of a replaced one.
    #[must_use]
    pub fn rule(mut self, name: impl Into<String>, param: impl Into<Value>) -> Self {
        self.rules.insert(name.into(), param.into());
        self
    }

    /// Parameter of `name`, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.rules.get(name)
    }

    /// `(rule, param)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.rules.iter().map(|(name, param)| (name.as_str(), param))
    }

    /// Number of declared rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl TryFrom<Value> for RuleSet {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self {
                rules: map.into_iter().collect(),
            }),
            other => Err(Error::InvalidRules(format!(
                "rule set must be an object, got {other}"
            ))),
        }
    }
}

/// Property path to [`RuleSet`], in declaration order.
///
/// Build it fluently or from a JSON document shaped like
/// `{ "contact.email": { "email": true, "required": true } }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulesMap {
    properties: IndexMap<String, RuleSet>,
}

impl RulesMap {
    /// Empty rules map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `{ path: { rule: param } }` document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRules`] if the document or any rule set is not
    /// a JSON object.
    pub fn from_json(value: Value) -> Result<Self, Error> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidRules(format!(
                    "rules map must be an object, got {other}"
                )));
            }
        };

        let mut properties = IndexMap::with_capacity(map.len());
        for (path, rules) in map {
            let rules = RuleSet::try_from(rules).map_err(|e| match e {
                Error::InvalidRules(reason) => Error::InvalidRules(format!("'{path}': {reason}")),
                other => other,
            })?;
            properties.insert(path, rules);
        }
        Ok(Self { properties })
    }

    /// Adds one rule to `path`, creating its rule set on first use.
    #[must_use]
    pub fn rule(
        mut self,
        path: impl Into<String>,
        name: impl Into<String>,
        param: impl Into<Value>,
    ) -> Self {
        let rules = self.properties.entry(path.into()).or_default();
        *rules = std::mem::take(rules).rule(name, param);
        self
    }

    /// Declares the whole rule set of `path`, replacing any previous one.
    #[must_use]
    pub fn property(mut self, path: impl Into<String>, rules: RuleSet) -> Self {
        self.properties.insert(path.into(), rules);
        self
    }

    /// Returns true if no property is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl TryFrom<Value> for RulesMap {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl IntoIterator for RulesMap {
    type Item = (String, RuleSet);
    type IntoIter = indexmap::map::IntoIter<String, RuleSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn from_json_keeps_declaration_order() {
        let rules = RulesMap::from_json(json!({
            "id": {"type": "integer", "required": true},
            "contact.email": {"email": true},
        }))
        .expect("valid rules");

        let collected: Vec<(String, Vec<String>)> = rules
            .into_iter()
            .map(|(path, set)| (path, set.iter().map(|(n, _)| n.to_string()).collect()))
            .collect();
        assert_eq!(
            collected,
            vec![
                ("id".to_string(), vec!["type".to_string(), "required".to_string()]),
                ("contact.email".to_string(), vec!["email".to_string()]),
            ]
        );
    }

    #[test]
    fn from_json_rejects_non_objects() {
        let err = RulesMap::from_json(json!(["id"])).expect_err("array is not a rules map");
        assert!(matches!(err, Error::InvalidRules(_)));

        let err = RulesMap::from_json(json!({"id": "required"})).expect_err("bad rule set");
        let Error::InvalidRules(reason) = err else {
            panic!("expected invalid rules");
        };
        assert!(reason.starts_with("'id':"), "{reason}");
    }

    #[test]
    fn rule_set_lookup_and_size() {
        let set = RuleSet::new().rule("type", "integer").rule("required", true);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(set.get("type"), Some(&json!("integer")));
        assert_eq!(set.get("min"), None);

        let replaced = set.rule("type", "string");
        assert_eq!(replaced.len(), 2);
        assert_eq!(replaced.get("type"), Some(&json!("string")));
        assert!(RuleSet::new().is_empty());
    }

    #[test]
    fn empty_rules_maps() {
        assert!(RulesMap::new().is_empty());
        assert!(RulesMap::from_json(json!({})).expect("valid rules").is_empty());
        assert!(!RulesMap::new().rule("id", "required", true).is_empty());
    }

    #[test]
    fn fluent_builder_matches_json() {
        let built = RulesMap::new()
            .rule("id", "type", "integer")
            .rule("id", "required", true)
            .property("name", RuleSet::new().rule("minlength", 2));
        let parsed = RulesMap::from_json(json!({
            "id": {"type": "integer", "required": true},
            "name": {"minlength": 2},
        }))
        .expect("valid rules");
        assert_eq!(built, parsed);
    }
}
