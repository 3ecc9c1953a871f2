//! # Errors
//!
//! Two layers of failure exist in a prompt call:
//!
//! - [`ContractViolation`]: the integrator handed the library a malformed
//!   configuration (wrong kind of value, an inverted range, a predicate result
//!   that is neither a boolean nor a message). These are raised before any
//!   terminal I/O and are never retried.
//! - [`PromptError`]: everything a prompt call can return as `Err`, which is a
//!   contract violation or a failure of the terminal itself.
//!
//! Bad *end-user* input is not an error at all. It is reported on the output
//! sink and the prompt asks again.

use std::io;

use thiserror::Error;

use crate::utils::types::{ArgKind, describe_kinds};

/// Misuse of the library by the calling program.
#[derive(Debug, Error, PartialEq)]
pub enum ContractViolation {
    #[error("Type error: {arg} must be {}", describe_kinds(.expected))]
    WrongKind { arg: String, expected: Vec<ArgKind> },

    #[error("Range must be an array with 2 values")]
    RangeLength,

    #[error("The first number in the range must be smaller than the second number")]
    RangeOrder,

    #[error("validation function must return true or false or a string")]
    InvalidVerdict,

    #[error("Type error: question type must be string, number or boolean, got {0:?}")]
    UnknownQuestionType(String),
}

/// Error returned by every prompt entry point.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error(transparent)]
    Contract(#[from] ContractViolation),

    #[error("input closed before an answer was accepted")]
    InputClosed,

    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid prompt document: {0}")]
    Document(#[from] serde_json::Error),
}

impl PromptError {
    /// `true` when the failure is a programming mistake rather than a terminal problem.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Contract(_))
    }
}
