//! Free-form text prompts.

use std::fmt::Debug;

use crate::prompt::{LoopState, Prompt, Step};
use crate::utils::sanitize::{CancelPolicy, Verdict};

/// Failure message printed when a predicate rejects without supplying one.
pub const DEFAULT_FAILED_MSG: &str = "invalid input";

/// Predicate over the trimmed input of a string prompt.
pub type StringValidator = Box<dyn Fn(&str) -> Verdict + Send + Sync>;

/// Options for a string prompt.
///
/// ```rust
/// use askline::prompt::StringOptions;
///
/// let options = StringOptions::new()
///     .validation(|name: &str| name.len() >= 3 || name == "Al")
///     .can_cancel(vec!["quit"]);
/// ```
#[derive(Default)]
pub struct StringOptions {
    /// Without a predicate the first non-cancelling line is accepted.
    pub validation: Option<StringValidator>,
    pub can_cancel: CancelPolicy,
}

impl Debug for StringOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringOptions")
            .field("validation", &self.validation.is_some())
            .field("can_cancel", &self.can_cancel)
            .finish()
    }
}

impl StringOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the predicate. It may return a `bool`, a message, or a [`Verdict`].
    pub fn validation<F, V>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        self.validation = Some(Box::new(move |input| f(input).into()));
        self
    }

    pub fn can_cancel(mut self, policy: impl Into<CancelPolicy>) -> Self {
        self.can_cancel = policy.into();
        self
    }
}

/// A configured string prompt.
#[derive(Debug)]
pub struct StringPrompt {
    text: String,
    options: StringOptions,
}

impl StringPrompt {
    pub fn new(text: impl Into<String>, options: StringOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}

impl Prompt for StringPrompt {
    type Output = String;

    fn text(&self) -> &str {
        &self.text
    }

    fn initial_state(&self) -> LoopState {
        LoopState::new(DEFAULT_FAILED_MSG)
    }

    fn evaluate(&self, input: &str, state: LoopState) -> Step<String> {
        if self.options.can_cancel.is_cancel(input) {
            return Step::Cancel;
        }

        match self.options.validation.as_ref().map(|f| f(input)) {
            None | Some(Verdict::Accepted) => Step::Accept(input.to_string()),
            Some(Verdict::Rejected(msg)) => Step::Retry(state.reject(msg)),
        }
    }
}
