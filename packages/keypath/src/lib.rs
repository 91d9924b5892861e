//! keypath: a dynamic path engine over value trees.
//!
//! Nested maps and arrays are addressed by paths such as `"a.b[0].c"` or
//! `["a", "b", 0, "c"]`. One compiled form drives every operation:
//!
//! | Operation | Behavior on unreachable paths |
//! |---|---|
//! | [`get`] | `None` |
//! | [`has`] / [`has_in`] | `false` |
//! | [`set`] / [`update`] | intermediate containers are created |
//! | [`unset`] | `false` |
//!
//! Collection helpers in [`collection`] accept predicates in four shorthand
//! notations (a function, a path, a partial-match map, or a `(path, value)`
//! pair), all compiled by [`compile`].
//!
//! # Example
//!
//! ```rust
//! use keypath::{collection, get, set, Value};
//!
//! let mut users = Value::array();
//! set(&mut users, "[0].name", Value::from("barney"));
//! set(&mut users, "[0].active", Value::from(true));
//! set(&mut users, "[1].name", Value::from("fred"));
//! set(&mut users, "[1].active", Value::from(false));
//!
//! let active = collection::filter(&users, "active");
//! assert_eq!(get(active[0], "name"), Some(&Value::from("barney")));
//! assert_eq!(collection::find_index(&users, ("name", "fred")), Some(1));
//! ```
//!
//! # Features
//!
//! - `serde` (default): [`Path`] serializes as its canonical string, and
//!   the `serde` module converts between [`Value`] and serde types.

pub use keypath_core::{
    at, get, get_mut, get_or, has, has_in, same_value_zero, set, unset, update, Path,
    PathError, Segment, ToPath, Value,
};
pub use keypath_predicate::{
    collection, compile, compile_value, constant, identity, is_match, iteratee, matches,
    matches_property, negate, property, property_of, Predicate, PredicateError, Shorthand,
};

#[cfg(feature = "serde")]
pub use keypath_serde as serde;
