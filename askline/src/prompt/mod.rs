//! # Prompts
//!
//! A prompt is a single ask / validate / retry interaction. Every prompt goes
//! through the same states:
//!
//! ```text
//!                  +-------------- rejected ---------------+
//!                  v                                       |
//!   AWAITING_INPUT --(cancel token)--> CANCELLED           |
//!                  \--(evaluate)-----> ACCEPTED            |
//!                   \--(evaluate)-----------------------------+
//! ```
//!
//! The types here hold no I/O. A [`Prompt`] only knows how to judge one trimmed
//! line given the current [`LoopState`]; the drivers in
//! [`crate::utils::terminal`] (blocking) and `crate::utils::asynchronous`
//! (tokio) own the reading and printing. Both call [`step`] once per line.

use std::fmt::Display;

use serde::{Serialize, Serializer};

pub mod boolean;
pub mod document;
pub mod number;
pub mod string;

pub use boolean::{BooleanOptions, BooleanPrompt};
pub use document::{Question, QuestionPrompt, parse_questions};
pub use number::{NumberOptions, NumberPrompt, NumberValidator};
pub use string::{StringOptions, StringPrompt, StringValidator};

/// Literal returned in place of a value when the user cancels.
pub const CANCELLED: &str = "cancelled";

/// Result of a completed prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer<T> {
    Value(T),
    Cancelled,
}

impl<T> Answer<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The accepted value, or `None` if the prompt was cancelled.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Cancelled => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Answer<U> {
        match self {
            Self::Value(v) => Answer::Value(f(v)),
            Self::Cancelled => Answer::Cancelled,
        }
    }
}

impl<T: Display> Display for Answer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::Cancelled => write!(f, "{}", CANCELLED),
        }
    }
}

impl<T: Serialize> Serialize for Answer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Cancelled => serializer.serialize_str(CANCELLED),
        }
    }
}

/// Per-call loop state. Created fresh by [`Prompt::initial_state`], moved into
/// each evaluation and handed back on rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopState {
    /// Message printed after the next rejection.
    pub failed_msg: String,
    /// Lines evaluated so far.
    pub attempts: u32,
}

impl LoopState {
    pub fn new(failed_msg: impl Into<String>) -> Self {
        Self {
            failed_msg: failed_msg.into(),
            attempts: 0,
        }
    }

    /// Records a rejection. A replacement message, if any, sticks for later rejections.
    pub fn reject(self, msg: Option<String>) -> Self {
        Self {
            failed_msg: msg.unwrap_or(self.failed_msg),
            attempts: self.attempts,
        }
    }
}

/// What the driver should do after one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    Accept(T),
    Cancel,
    /// Print `failed_msg` and read again.
    Retry(LoopState),
}

/// One flavor of prompt.
pub trait Prompt {
    type Output;

    /// Text written before each read.
    fn text(&self) -> &str;

    fn initial_state(&self) -> LoopState;

    /// Judges one trimmed line. Cancellation must be checked before anything else.
    fn evaluate(&self, input: &str, state: LoopState) -> Step<Self::Output>;
}

/// Runs one loop iteration over a raw line.
pub fn step<P: Prompt>(prompt: &P, raw: &str, mut state: LoopState) -> Step<P::Output> {
    state.attempts += 1;
    let attempts = state.attempts;

    let next = prompt.evaluate(raw.trim(), state);
    match &next {
        Step::Accept(_) => log::debug!("prompt {:?} accepted after {} attempt(s)", prompt.text(), attempts),
        Step::Cancel => log::debug!("prompt {:?} cancelled after {} attempt(s)", prompt.text(), attempts),
        Step::Retry(state) => log::trace!("prompt {:?} rejected input: {}", prompt.text(), state.failed_msg),
    }
    next
}
