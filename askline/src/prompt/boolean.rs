//! Yes/no prompts.
//!
//! The accepted and rejected token sets are fixed when the prompt is built:
//!
//! - unless `disable_default` is set, [`DEFAULT_ACCEPT`] and [`DEFAULT_REJECT`]
//!   are placed in front of the caller's tokens
//! - unless `match_case` is set, every token, every explicit cancel token and
//!   every input line is lower-cased before comparison
//!
//! A token present in both sets answers `true`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::prompt::{LoopState, Prompt, Step};
use crate::utils::sanitize::CancelPolicy;

pub const DEFAULT_ACCEPT: [&str; 6] = ["y", "yes", "true", "Y", "Yes", "True"];
pub const DEFAULT_REJECT: [&str; 6] = ["n", "no", "false", "N", "No", "False"];
pub const DEFAULT_REJECT_MSG: &str = "invalid boolean input";

/// Options for a boolean prompt.
///
/// Field names on the wire follow the camelCase style of prompt documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BooleanOptions {
    pub accept: Vec<String>,
    pub reject: Vec<String>,
    pub disable_default: bool,
    pub match_case: bool,
    pub reject_msg: String,
    pub can_cancel: CancelPolicy,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self {
            accept: Vec::new(),
            reject: Vec::new(),
            disable_default: false,
            match_case: false,
            reject_msg: DEFAULT_REJECT_MSG.to_string(),
            can_cancel: CancelPolicy::default(),
        }
    }
}

impl BooleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accept = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn reject<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reject = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn disable_default(mut self, disable: bool) -> Self {
        self.disable_default = disable;
        self
    }

    pub fn match_case(mut self, match_case: bool) -> Self {
        self.match_case = match_case;
        self
    }

    pub fn reject_msg(mut self, msg: impl Into<String>) -> Self {
        self.reject_msg = msg.into();
        self
    }

    pub fn can_cancel(mut self, policy: impl Into<CancelPolicy>) -> Self {
        self.can_cancel = policy.into();
        self
    }
}

/// A configured boolean prompt with its effective token sets.
#[derive(Debug, Clone)]
pub struct BooleanPrompt {
    text: String,
    accept: Vec<String>,
    reject: Vec<String>,
    match_case: bool,
    reject_msg: String,
    can_cancel: CancelPolicy,
}

/// Default tokens followed by the caller's, case-folded unless `match_case`.
fn effective_tokens(defaults: &[&str], extra: Vec<String>, options: &BooleanOptions) -> Vec<String> {
    let defaults = if options.disable_default { &[][..] } else { defaults };

    defaults
        .iter()
        .map(|t| t.to_string())
        .chain(extra)
        .map(|t| if options.match_case { t } else { t.to_lowercase() })
        .collect()
}

impl BooleanPrompt {
    pub fn new(text: impl Into<String>, options: BooleanOptions) -> Self {
        let accept = effective_tokens(&DEFAULT_ACCEPT, options.accept.clone(), &options);
        let reject = effective_tokens(&DEFAULT_REJECT, options.reject.clone(), &options);
        let can_cancel = if options.match_case {
            options.can_cancel
        } else {
            options.can_cancel.lowercased()
        };

        Self {
            text: text.into(),
            accept,
            reject,
            match_case: options.match_case,
            reject_msg: options.reject_msg,
            can_cancel,
        }
    }

    pub fn accepted_tokens(&self) -> &[String] {
        &self.accept
    }

    pub fn rejected_tokens(&self) -> &[String] {
        &self.reject
    }
}

impl Prompt for BooleanPrompt {
    type Output = bool;

    fn text(&self) -> &str {
        &self.text
    }

    fn initial_state(&self) -> LoopState {
        LoopState::new(self.reject_msg.clone())
    }

    fn evaluate(&self, input: &str, state: LoopState) -> Step<bool> {
        let input: Cow<'_, str> = if self.match_case {
            Cow::Borrowed(input)
        } else {
            Cow::Owned(input.to_lowercase())
        };

        if self.can_cancel.is_cancel(&input) {
            return Step::Cancel;
        }

        if self.accept.iter().any(|t| *t == *input) {
            Step::Accept(true)
        } else if self.reject.iter().any(|t| *t == *input) {
            Step::Accept(false)
        } else {
            Step::Retry(state.reject(None))
        }
    }
}
