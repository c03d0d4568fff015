//! Default message catalog of [`Model::base`](crate::Model::base).
//!
//! `{param}` is replaced by the string form of the rule parameter.

/// Built-in `(rule, template)` pairs.
pub const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("type", "Expecting {param}"),
    ("required", "Required"),
    ("pattern", "Doesn't match the expected pattern"),
    ("email", "Invalid email address"),
    ("url", "Invalid URL"),
    ("number", "Not a number"),
    ("digits", "Contains non-digit characters"),
    ("creditcard", "Invalid credit card number"),
    ("equalTo", "{param} doesn't match with this"),
    ("maxlength", "Maximum length is {param}"),
    ("minlength", "Minimum length is {param}"),
    ("max", "Maximum value is {param}"),
    ("min", "Minimum value is {param}"),
];
