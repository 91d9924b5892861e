//! Serde integration for keypath.
//!
//! Converts between [`Value`] trees and `serde_json::Value`, JSON text, or
//! any serde type. Path engine operations work on `Value`, so this is the
//! way typed data gets in and out of them.
//!
//! # Example
//!
//! ```rust
//! use keypath_core::{get, set, Value};
//! use keypath_serde::{from_value, to_value};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let mut tree = to_value(&User { name: "fred".into(), age: 40 }).unwrap();
//! set(&mut tree, "age", Value::from(41i64));
//! assert_eq!(get(&tree, "name"), Some(&Value::from("fred")));
//!
//! let user: User = from_value(tree).unwrap();
//! assert_eq!(user.age, 41);
//! ```

mod convert;
mod error;

pub use convert::{from_json_str, from_value, json_to_value, to_json_string, to_value, value_to_json};
pub use error::Error;
