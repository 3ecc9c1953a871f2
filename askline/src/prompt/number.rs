//! Numeric prompts with an optional inclusive range.
//!
//! Each line is coerced with [`parse_number`] before anything else looks at
//! it, so the predicate and the range always see an `f64`:
//!
//! 1. cancellation check on the trimmed text
//! 2. coercion (failure prints [`NOT_A_NUMBER_MSG`])
//! 3. the caller's predicate, if any
//! 4. the range, if any (failure prints the range message)

use std::fmt::Debug;

use crate::error::PromptError;
use crate::prompt::{LoopState, Prompt, Step};
use crate::utils::sanitize::{CancelPolicy, Verdict, check_range, parse_number};

pub const NOT_A_NUMBER_MSG: &str = "Sorry, that's not a valid number";

/// Predicate over the coerced value of a number prompt.
pub type NumberValidator = Box<dyn Fn(f64) -> Verdict + Send + Sync>;

/// Options for a number prompt.
#[derive(Default)]
pub struct NumberOptions {
    pub validation: Option<NumberValidator>,
    /// Inclusive `[min, max]`. Checked when the prompt is built.
    pub range: Option<[f64; 2]>,
    pub can_cancel: CancelPolicy,
}

impl Debug for NumberOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberOptions")
            .field("validation", &self.validation.is_some())
            .field("range", &self.range)
            .field("can_cancel", &self.can_cancel)
            .finish()
    }
}

impl NumberOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validation<F, V>(mut self, f: F) -> Self
    where
        F: Fn(f64) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        self.validation = Some(Box::new(move |n| f(n).into()));
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some([min, max]);
        self
    }

    pub fn can_cancel(mut self, policy: impl Into<CancelPolicy>) -> Self {
        self.can_cancel = policy.into();
        self
    }
}

/// A configured number prompt.
pub struct NumberPrompt {
    text: String,
    validation: Option<NumberValidator>,
    range: Option<(f64, f64)>,
    can_cancel: CancelPolicy,
}

impl Debug for NumberPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberPrompt")
            .field("text", &self.text)
            .field("validation", &self.validation.is_some())
            .field("range", &self.range)
            .field("can_cancel", &self.can_cancel)
            .finish()
    }
}

impl NumberPrompt {
    /// Builds the prompt, failing with a contract violation if the range is inverted.
    pub fn new(text: impl Into<String>, options: NumberOptions) -> Result<Self, PromptError> {
        let range = options.range.as_ref().map(|r| check_range(r)).transpose()?;

        Ok(Self {
            text: text.into(),
            validation: options.validation,
            range,
            can_cancel: options.can_cancel,
        })
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        self.range
    }
}

impl Prompt for NumberPrompt {
    type Output = f64;

    fn text(&self) -> &str {
        &self.text
    }

    fn initial_state(&self) -> LoopState {
        LoopState::new(NOT_A_NUMBER_MSG)
    }

    fn evaluate(&self, input: &str, state: LoopState) -> Step<f64> {
        if self.can_cancel.is_cancel(input) {
            return Step::Cancel;
        }

        let Some(number) = parse_number(input) else {
            return Step::Retry(state.reject(Some(NOT_A_NUMBER_MSG.to_string())));
        };

        if let Some(Verdict::Rejected(msg)) = self.validation.as_ref().map(|f| f(number)) {
            return Step::Retry(state.reject(msg));
        }

        if let Some((min, max)) = self.range {
            if !(min..=max).contains(&number) {
                return Step::Retry(state.reject(Some(format!(
                    "Sorry, that's not a valid number in the range {} to {}",
                    min, max
                ))));
            }
        }

        Step::Accept(number)
    }
}
