//! # Input Sanitization & Validation
//!
//! The small building blocks every prompt is made of:
//!
//! - [`Verdict`]: what a validation predicate says about a candidate value
//! - [`CancelPolicy`]: which input lines end a prompt early
//! - [`check_range`]: structural check of a numeric `[min, max]` bound
//! - [`parse_number`]: coercion of raw text into a number
//!
//! ## Examples
//!
//! ### Predicates
//! ```rust
//! use askline::utils::Verdict;
//!
//! fn even(n: f64) -> Verdict {
//!     if n % 2.0 == 0.0 {
//!         Verdict::Accepted
//!     } else {
//!         "Please pick an even number".into()
//!     }
//! }
//!
//! assert_eq!(even(4.0), Verdict::Accepted);
//! assert_eq!(even(3.0), Verdict::Rejected(Some("Please pick an even number".to_string())));
//! ```
//!
//! ### Cancellation
//! ```rust
//! use askline::utils::CancelPolicy;
//!
//! assert!(CancelPolicy::default().is_cancel("exit"));
//! assert!(!CancelPolicy::from(false).is_cancel("exit"));
//! assert!(CancelPolicy::from(vec!["stop"]).is_cancel("stop"));
//! ```
use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ContractViolation;

/// Tokens treated as a cancellation under [`CancelPolicy::Keywords`].
pub const CANCEL_KEYWORDS: [&str; 2] = ["cancel", "exit"];

/// Outcome of a validation predicate.
///
/// - `Accepted`: the candidate is kept and the prompt returns it.
/// - `Rejected(None)`: the prompt asks again and prints its current failure message.
/// - `Rejected(Some(msg))`: `msg` becomes the failure message, is printed, and the prompt asks again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Option<String>),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl From<bool> for Verdict {
    fn from(ok: bool) -> Self {
        if ok {
            Self::Accepted
        } else {
            Self::Rejected(None)
        }
    }
}

impl From<String> for Verdict {
    fn from(msg: String) -> Self {
        Self::Rejected(Some(msg))
    }
}

impl From<&str> for Verdict {
    fn from(msg: &str) -> Self {
        Self::Rejected(Some(msg.to_string()))
    }
}

/// Bridges predicates whose result is only known at runtime (scripting hosts,
/// JSON-speaking plugins). Only booleans and strings are meaningful.
impl TryFrom<&Value> for Verdict {
    type Error = ContractViolation;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(ok) => Ok((*ok).into()),
            Value::String(msg) => Ok(msg.as_str().into()),
            _ => Err(ContractViolation::InvalidVerdict),
        }
    }
}

/// Decides which trimmed input lines cancel a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCancelPolicy", into = "RawCancelPolicy")]
pub enum CancelPolicy {
    /// Cancellation is never triggered.
    Disabled,
    /// `"cancel"` and `"exit"` cancel.
    #[default]
    Keywords,
    /// Exact membership in the list cancels.
    Tokens(Vec<String>),
}

/// Wire shape of a policy: `true`, `false` or a list of tokens.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawCancelPolicy {
    Flag(bool),
    Tokens(Vec<String>),
}

impl From<RawCancelPolicy> for CancelPolicy {
    fn from(raw: RawCancelPolicy) -> Self {
        match raw {
            RawCancelPolicy::Flag(flag) => flag.into(),
            RawCancelPolicy::Tokens(tokens) => Self::Tokens(tokens),
        }
    }
}

impl From<CancelPolicy> for RawCancelPolicy {
    fn from(policy: CancelPolicy) -> Self {
        match policy {
            CancelPolicy::Disabled => Self::Flag(false),
            CancelPolicy::Keywords => Self::Flag(true),
            CancelPolicy::Tokens(tokens) => Self::Tokens(tokens),
        }
    }
}

impl From<bool> for CancelPolicy {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Keywords } else { Self::Disabled }
    }
}

impl From<Vec<String>> for CancelPolicy {
    fn from(tokens: Vec<String>) -> Self {
        Self::Tokens(tokens)
    }
}

impl From<Vec<&str>> for CancelPolicy {
    fn from(tokens: Vec<&str>) -> Self {
        Self::Tokens(tokens.into_iter().map(String::from).collect())
    }
}

impl CancelPolicy {
    /// Returns `true` if `input` (already trimmed) ends the prompt.
    pub fn is_cancel(&self, input: &str) -> bool {
        match self {
            Self::Disabled => false,
            Self::Keywords => CANCEL_KEYWORDS.contains(&input),
            Self::Tokens(tokens) => tokens.iter().any(|t| t == input),
        }
    }

    /// Same policy with every explicit token lower-cased.
    pub(crate) fn lowercased(&self) -> Self {
        match self {
            Self::Tokens(tokens) => Self::Tokens(tokens.iter().map(|t| t.to_lowercase()).collect()),
            other => other.clone(),
        }
    }
}

/// Validates a numeric bound and returns it as `(min, max)`.
///
/// The bound must hold exactly two values and the first must not exceed the
/// second. A `NaN` bound fails the ordering check.
pub fn check_range(range: &[f64]) -> Result<(f64, f64), ContractViolation> {
    let [min, max] = range else {
        return Err(ContractViolation::RangeLength);
    };

    if min <= max {
        Ok((*min, *max))
    } else {
        Err(ContractViolation::RangeOrder)
    }
}

/// Coerces trimmed text into a number.
///
/// Accepts finite float literals as understood by [`str::parse::<f64>`] (`42`,
/// `-1.5`, `1e3`) and unsigned integer literals with a `0x`, `0o` or `0b` prefix.
/// Empty input, `NaN` and infinities are not numbers.
pub fn parse_number(input: &str) -> Option<f64> {
    let lowered: Cow<'_, str> = if input.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(input.to_ascii_lowercase())
    } else {
        Cow::Borrowed(input)
    };

    let radix = [("0x", 16), ("0o", 8), ("0b", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| lowered.strip_prefix(prefix).map(|digits| (digits, radix)));

    match radix {
        Some((digits, radix)) if !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix)) => {
            u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
        }
        Some(_) => None,
        None => input.parse::<f64>().ok().filter(|n| n.is_finite()),
    }
}

/// Turns one raw line into text: drops the `\n` / `\r\n` terminator and
/// replaces invalid UTF-8 with U+FFFD so the prompt can reject it like any
/// other bad answer.
pub(crate) fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verdict_from_predicate_results() {
        assert_eq!(Verdict::from(true), Verdict::Accepted);
        assert_eq!(Verdict::from(false), Verdict::Rejected(None));
        assert_eq!(
            Verdict::from("try again"),
            Verdict::Rejected(Some("try again".to_string()))
        );
    }

    #[test]
    fn test_verdict_is_accepted() {
        assert!(Verdict::Accepted.is_accepted());
        assert!(!Verdict::Rejected(None).is_accepted());
        assert!(!Verdict::from("no").is_accepted());
    }

    #[test]
    fn test_decode_line() {
        assert_eq!(decode_line(b"hello\n"), "hello");
        assert_eq!(decode_line(b"hello\r\n"), "hello");
        assert_eq!(decode_line(b"last"), "last");
        assert_eq!(decode_line(b"\xff\xfe\n"), "\u{fffd}\u{fffd}");
    }

    #[test]
    fn test_verdict_from_dynamic_value() {
        assert_eq!(Verdict::try_from(&json!(true)), Ok(Verdict::Accepted));
        assert_eq!(Verdict::try_from(&json!(false)), Ok(Verdict::Rejected(None)));
        assert_eq!(
            Verdict::try_from(&json!("too short")),
            Ok(Verdict::Rejected(Some("too short".to_string())))
        );
        assert_eq!(
            Verdict::try_from(&json!(42)),
            Err(ContractViolation::InvalidVerdict)
        );
        assert!(Verdict::try_from(&Value::Null).is_err());
    }

    #[test]
    fn test_cancel_policy_keywords() {
        let policy = CancelPolicy::default();
        assert!(policy.is_cancel("cancel"));
        assert!(policy.is_cancel("exit"));
        assert!(!policy.is_cancel("Cancel"));
        assert!(!policy.is_cancel("stop"));
    }

    #[test]
    fn test_cancel_policy_tokens() {
        let policy = CancelPolicy::from(vec!["stop"]);
        assert!(policy.is_cancel("stop"));
        assert!(!policy.is_cancel("cancel"));
        assert!(!CancelPolicy::Tokens(Vec::new()).is_cancel(""));
    }

    #[test]
    fn test_cancel_policy_disabled() {
        let policy = CancelPolicy::from(false);
        assert!(!policy.is_cancel("cancel"));
        assert!(!policy.is_cancel("exit"));
    }

    #[test]
    fn test_cancel_policy_lowercased() {
        let policy = CancelPolicy::from(vec!["STOP", "Quit"]).lowercased();
        assert_eq!(policy, CancelPolicy::from(vec!["stop", "quit"]));
        assert_eq!(CancelPolicy::Keywords.lowercased(), CancelPolicy::Keywords);
    }

    #[test]
    fn test_cancel_policy_serde_shape() {
        let policy: CancelPolicy = serde_json::from_value(json!(["q"])).unwrap();
        assert_eq!(policy, CancelPolicy::from(vec!["q"]));
        let policy: CancelPolicy = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(policy, CancelPolicy::Disabled);
        assert_eq!(serde_json::to_value(CancelPolicy::Keywords).unwrap(), json!(true));
    }

    #[test]
    fn test_check_range() {
        assert_eq!(check_range(&[1.0, 10.0]), Ok((1.0, 10.0)));
        assert_eq!(check_range(&[5.0, 5.0]), Ok((5.0, 5.0)));
        assert_eq!(check_range(&[10.0, 1.0]), Err(ContractViolation::RangeOrder));
        assert_eq!(check_range(&[1.0]), Err(ContractViolation::RangeLength));
        assert_eq!(check_range(&[1.0, 2.0, 3.0]), Err(ContractViolation::RangeLength));
        assert_eq!(check_range(&[f64::NAN, 1.0]), Err(ContractViolation::RangeOrder));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-1.5"), Some(-1.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("0o17"), Some(15.0));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-Infinity"), None);
        assert_eq!(parse_number("1e999"), None);
        assert_eq!(parse_number("0x+1f"), None);
        assert_eq!(parse_number("0b102"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("twelve"), None);
        assert_eq!(parse_number("12abc"), None);
    }
}
