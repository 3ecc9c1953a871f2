//! # Argument Kind Checking
//!
//! Options built in Rust are checked by the compiler. Options that arrive as
//! JSON (see [`crate::prompt::document`]) are not, so every field of a prompt
//! document is passed through [`expect_type`] before a prompt is built.
//!
//! ```rust
//! use askline::utils::{ArgKind, expect_type};
//! use serde_json::json;
//!
//! let value = json!(["stop", "quit"]);
//! assert!(expect_type("canCancel", Some(&value), &[ArgKind::Boolean, ArgKind::Array], true).is_ok());
//!
//! let err = expect_type("prompt", Some(&json!(3)), &[ArgKind::String], true).unwrap_err();
//! assert_eq!(err.to_string(), "Type error: prompt must be of type string");
//! ```

use std::fmt::Display;

use serde_json::Value;

use crate::error::ContractViolation;

/// The kinds of value a configuration field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    String,
    Number,
    Boolean,
    Array,
}

impl ArgKind {
    /// Returns `true` if `value` is of this kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
        }
    }
}

impl Display for ArgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
            Self::Array => write!(f, "array"),
        }
    }
}

/// Phrases the accepted kinds for an error message.
///
/// - one kind: `of type string`
/// - several kinds: `of type string or number`
/// - the array kind: `an array`, followed by the other kinds (`an array or boolean`)
pub(crate) fn describe_kinds(kinds: &[ArgKind]) -> String {
    let others: Vec<String> = kinds
        .iter()
        .filter(|k| **k != ArgKind::Array)
        .map(ToString::to_string)
        .collect();

    if kinds.contains(&ArgKind::Array) {
        if others.is_empty() {
            "an array".to_string()
        } else {
            format!("an array or {}", others.join(" or "))
        }
    } else {
        format!("of type {}", others.join(" or "))
    }
}

/// Checks that the argument `arg` holds one of `kinds`.
///
/// `None` stands for an absent field. Absent fields and JSON `null` pass when
/// `allow_null` is set.
pub fn expect_type(
    arg: &str,
    value: Option<&Value>,
    kinds: &[ArgKind],
    allow_null: bool,
) -> Result<(), ContractViolation> {
    match value {
        None | Some(Value::Null) if allow_null => Ok(()),
        Some(v) if kinds.iter().any(|k| k.matches(v)) => Ok(()),
        _ => Err(ContractViolation::WrongKind {
            arg: arg.to_string(),
            expected: kinds.to_vec(),
        }),
    }
}
