//! keypath core: value trees and the dynamic path engine.
//!
//! - `Value`: a tree of maps, arrays and scalars
//! - `Path`: a compiled sequence of key/index segments
//! - Accessors that read, test, write and delete by path
//!
//! Paths are accepted in any raw form implementing [`ToPath`]: dot/bracket
//! strings, lists of segment-likes, or an already compiled [`Path`].
//!
//! # Example
//!
//! ```rust
//! use keypath_core::{get, has, has_in, set, unset, Value};
//!
//! let mut tree = Value::map();
//! set(&mut tree, "a.b.0", Value::from("x"));
//! assert!(get(&tree, "a.b").unwrap().is_array());
//!
//! set(&mut tree, "a.count", Value::from(0i64));
//! assert!(has(&tree, "a.count"));
//! assert!(!has_in(&tree, "a.count"));
//!
//! assert!(unset(&mut tree, "a.count"));
//! assert!(!unset(&mut tree, "missing.count"));
//! ```

mod access;
mod equality;
mod path;
mod value;

pub use access::{at, get, get_mut, get_or, has, has_in, set, unset, update};
pub use equality::same_value_zero;
pub use path::{Path, PathError, Segment, ToPath};
pub use value::Value;
