//! # Prompt Documents
//!
//! A prompt document is a JSON array of questions, so a program can keep its
//! interactive flow in a file instead of in code:
//!
//! ```json
//! [
//!   { "name": "user", "type": "string", "prompt": "Your name: " },
//!   { "name": "age", "type": "number", "prompt": "Age: ", "range": [0, 130] },
//!   { "name": "subscribe", "type": "boolean", "prompt": "Subscribe? ",
//!     "accept": ["sure"], "rejectMsg": "yes or no please", "canCancel": ["q"] }
//! ]
//! ```
//!
//! Option keys keep their camelCase names. Every field is kind-checked with
//! [`expect_type`] and ranges go through [`check_range`], so a malformed
//! document fails in [`parse_questions`], before anything is read from the
//! terminal.

use serde_json::{Map, Value};

use crate::error::{ContractViolation, PromptError};
use crate::prompt::{
    BooleanOptions, BooleanPrompt, NumberOptions, NumberPrompt, StringOptions, StringPrompt,
};
use crate::utils::sanitize::{CancelPolicy, check_range};
use crate::utils::types::{ArgKind, expect_type};

/// One named question of a document.
#[derive(Debug)]
pub struct Question {
    pub name: String,
    pub prompt: QuestionPrompt,
}

/// The prompt behind a [`Question`].
#[derive(Debug)]
pub enum QuestionPrompt {
    String(StringPrompt),
    Number(NumberPrompt),
    Boolean(BooleanPrompt),
}

/// Parses and validates a prompt document.
pub fn parse_questions(json: &str) -> Result<Vec<Question>, PromptError> {
    let entries: Vec<Map<String, Value>> = serde_json::from_str(json)?;
    entries.iter().map(parse_question).collect()
}

fn parse_question(entry: &Map<String, Value>) -> Result<Question, PromptError> {
    let name = required_str(entry, "name")?;
    let kind = required_str(entry, "type")?;

    expect_type("prompt", entry.get("prompt"), &[ArgKind::String], true)?;
    let text = entry
        .get("prompt")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let can_cancel = cancel_policy(entry)?;

    let prompt = match kind.as_str() {
        "string" => QuestionPrompt::String(StringPrompt::new(
            text,
            StringOptions::new().can_cancel(can_cancel),
        )),
        "number" => {
            let mut options = NumberOptions::new().can_cancel(can_cancel);
            if let Some(values) = numbers(entry, "range")? {
                let (min, max) = check_range(&values)?;
                options = options.range(min, max);
            }
            QuestionPrompt::Number(NumberPrompt::new(text, options)?)
        }
        "boolean" => QuestionPrompt::Boolean(BooleanPrompt::new(text, boolean_options(entry, can_cancel)?)),
        other => return Err(ContractViolation::UnknownQuestionType(other.to_string()).into()),
    };

    Ok(Question { name, prompt })
}

fn boolean_options(
    entry: &Map<String, Value>,
    can_cancel: CancelPolicy,
) -> Result<BooleanOptions, ContractViolation> {
    let mut options = BooleanOptions::new().can_cancel(can_cancel);

    if let Some(accept) = strings(entry, "accept")? {
        options = options.accept(accept);
    }
    if let Some(reject) = strings(entry, "reject")? {
        options = options.reject(reject);
    }
    if let Some(disable) = flag(entry, "disableDefault")? {
        options = options.disable_default(disable);
    }
    if let Some(match_case) = flag(entry, "matchCase")? {
        options = options.match_case(match_case);
    }

    expect_type("rejectMsg", entry.get("rejectMsg"), &[ArgKind::String], true)?;
    if let Some(msg) = entry.get("rejectMsg").and_then(Value::as_str) {
        options = options.reject_msg(msg);
    }

    Ok(options)
}

fn required_str(entry: &Map<String, Value>, key: &str) -> Result<String, ContractViolation> {
    let value = entry.get(key);
    expect_type(key, value, &[ArgKind::String], false)?;
    Ok(value.and_then(Value::as_str).unwrap_or_default().to_string())
}

fn flag(entry: &Map<String, Value>, key: &str) -> Result<Option<bool>, ContractViolation> {
    let value = entry.get(key);
    expect_type(key, value, &[ArgKind::Boolean], true)?;
    Ok(value.and_then(Value::as_bool))
}

/// Array field whose items must all be of `kind`.
fn items<'a>(
    entry: &'a Map<String, Value>,
    key: &str,
    kind: ArgKind,
) -> Result<Option<&'a Vec<Value>>, ContractViolation> {
    let value = entry.get(key);
    expect_type(key, value, &[ArgKind::Array], true)?;

    let Some(items) = value.and_then(Value::as_array) else {
        return Ok(None);
    };
    for (i, item) in items.iter().enumerate() {
        expect_type(&format!("{key}[{i}]"), Some(item), &[kind], false)?;
    }
    Ok(Some(items))
}

fn strings(entry: &Map<String, Value>, key: &str) -> Result<Option<Vec<String>>, ContractViolation> {
    Ok(items(entry, key, ArgKind::String)?.map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect()
    }))
}

fn numbers(entry: &Map<String, Value>, key: &str) -> Result<Option<Vec<f64>>, ContractViolation> {
    Ok(items(entry, key, ArgKind::Number)?
        .map(|items| items.iter().filter_map(Value::as_f64).collect()))
}

fn cancel_policy(entry: &Map<String, Value>) -> Result<CancelPolicy, ContractViolation> {
    let value = entry.get("canCancel");
    expect_type("canCancel", value, &[ArgKind::Boolean, ArgKind::Array], true)?;

    match value {
        Some(Value::Bool(enabled)) => Ok((*enabled).into()),
        Some(Value::Array(_)) => Ok(strings(entry, "canCancel")?.unwrap_or_default().into()),
        _ => Ok(CancelPolicy::default()),
    }
}
