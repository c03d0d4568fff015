use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;

/// Configuration error raised while validating against a broken model.
///
/// These point at the schema, never at the data being validated, and abort
/// the whole call. Data problems are reported through [`ValidationErrors`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A rules map references a rule name with no registered handler.
    #[error("rule '{rule}' on '{property}' has no handler")]
    UnknownRule {
        /// The unresolved rule name.
        rule: String,
        /// The property path that declared it.
        property: String,
    },

    /// A `type` rule names a converter that is not registered.
    #[error("type '{name}' is not registered")]
    UnknownType {
        /// The unresolved type name.
        name: String,
    },

    /// A rule parameter has the wrong shape for its handler.
    #[error("invalid parameter for rule '{rule}': {reason}")]
    InvalidParam {
        /// The rule whose parameter was rejected.
        rule: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A rules document is not a `{ path: { rule: param } }` object.
    #[error("invalid rules definition: {0}")]
    InvalidRules(String),
}

impl Error {
    pub(crate) fn invalid_param(rule: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParam {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failed properties of one validation call, keyed by property path.
///
/// Paths keep the order in which the model declares them, and every path
/// holds at least one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    by_path: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, path: &str, messages: Vec<String>) {
        if !messages.is_empty() {
            self.by_path.insert(path.to_string(), messages);
        }
    }

    /// Turns an empty collection into the no-errors sentinel.
    pub(crate) fn into_option(self) -> Option<Self> {
        if self.by_path.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    /// Messages reported for `path`, in rule declaration order.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.by_path.get(path).map(Vec::as_slice)
    }

    /// Returns true if `path` failed at least one rule.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// Number of failed properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Always false for a collection handed out by a validation call.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Failed property paths, in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.by_path.keys().map(String::as_str)
    }

    /// `(path, messages)` pairs, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_path
            .iter()
            .map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }

    /// Consumes the collection into its underlying ordered map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.by_path
    }
}

impl Index<&str> for ValidationErrors {
    type Output = [String];

    fn index(&self, path: &str) -> &Self::Output {
        match self.get(path) {
            Some(messages) => messages,
            None => panic!("no validation errors for '{path}'"),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count: usize = self.by_path.values().map(Vec::len).sum();
        match count {
            0 => Ok(()),
            1 => {
                let (path, messages) = self.iter().next().ok_or(fmt::Error)?;
                write!(f, "validation error: {path}: {}", messages[0])
            }
            _ => {
                write!(f, "validation errors:")?;
                for (path, messages) in self.iter() {
                    for message in messages {
                        write!(f, "\n - {path}: {message}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_path.iter()
    }
}
