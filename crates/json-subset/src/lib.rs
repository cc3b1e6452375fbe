//! json-subset - structural containment checks for JSON values.
//!
//! Decides whether an expected ("contained") value is present within an
//! actual ("container") value: every key of an expected mapping must be in
//! the actual mapping, every element of an expected sequence must match some
//! element of the actual sequence, and scalars must be equal. Extra data in
//! the container is ignored.
//!
//! # Example
//!
//! ```
//! use json_subset::{contains, Checker, Options};
//! use serde_json::json;
//!
//! let response = json!({"user": {"id": 7, "roles": ["admin", "dev"]}, "ok": true});
//!
//! assert!(contains(&response, &json!({"user": {"roles": ["dev"]}})));
//!
//! let expected = json!({"user": {"id": 8}});
//! let outcome = Checker::new(Options::new().collect_all())
//!     .check(&response, &expected)
//!     .unwrap();
//! assert_eq!(outcome.report(), "Problems:\n/user/id: expected 8, found 7\n");
//! ```

pub mod assert;
mod contains;
mod diagnostics;
mod error;
mod options;
mod path;
mod value;

pub use contains::{contains, Checker};
pub use diagnostics::{Mismatch, Outcome};
pub use error::ContainsError;
pub use options::{Mode, Options, UnsupportedPolicy};
pub use path::{escape_component, Path, PathStep};
pub use value::{JsonLike, JsonMapping, Node, Number, Shape};
