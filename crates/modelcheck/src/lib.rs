//! Declarative validation of JSON objects against inheritable rule models.
//!
//! A [`Model`] maps dotted property paths (`"contact.email"`) to an ordered
//! set of named rules (`required`, `type`, `minlength`, ...). Each rule name
//! resolves to a [`Handler`], each `type` parameter to a [`Converter`], and
//! each failure is rendered from a message template or a custom
//! [`ErrorFormatter`]. Models derive from one another with [`Model::extend`]:
//! a derived model inherits everything above it and may shadow any of it
//! without affecting its ancestors.
//!
//! # Example
//!
//! ```
//! use modelcheck::{Model, RulesMap};
//! use serde_json::json;
//!
//! let person = Model::base().extend(RulesMap::from_json(json!({
//!     "id": {"type": "integer", "required": true},
//!     "name": {"type": "string", "required": true},
//! }))?);
//!
//! let mut input = json!({"id": "10", "name": "Ada"});
//! assert!(person.validate_and_coerce(&mut input)?.is_none());
//! assert_eq!(input["id"], json!(10));
//!
//! let errors = person.validate(&json!({"id": "x"}))?.expect("invalid");
//! assert_eq!(errors["id"], ["Expecting integer"]);
//! assert_eq!(errors["name"], ["Required"]);
//! # Ok::<(), modelcheck::Error>(())
//! ```
#![warn(missing_docs)]

mod config;
mod error;
mod handler;
pub mod messages;
mod model;
pub mod path;
mod validator;
pub mod value;

pub use config::{ExtendOptions, ValidationOption};
pub use error::{Error, ValidationErrors};
pub use handler::{Converter, ErrorContext, ErrorFormatter, Handler, RuleInput, RuleOutcome};
pub use model::{Model, RuleSet, RulesMap};
