//! Shorthand predicate compiler.
//!
//! Collection helpers take their predicate in one of four notations, all
//! normalized by [`compile`] into one [`Predicate`]:
//!
//! - a function, used as-is
//! - a path (`"a.b"`), extracting the value at that path
//! - a partial-match map, testing each of its keys
//! - a `(path, value)` pair, testing a single path
//!
//! ```rust
//! use keypath_core::Value;
//! use keypath_predicate::{compile, Shorthand};
//!
//! let row = Shorthand::try_from(Value::Array(vec![Value::from("a"), Value::from(1i64)])).unwrap();
//! let object: Value = vec![("a".to_string(), Value::from(1i64))].into_iter().collect();
//! assert!(compile(row).test(&object));
//! ```

pub mod collection;
mod error;
mod predicate;
mod shorthand;

pub use error::PredicateError;
pub use predicate::{
    constant, identity, is_match, matches, matches_property, negate, property, property_of,
    Predicate,
};
pub use shorthand::{compile, compile_value, iteratee, Shorthand};
