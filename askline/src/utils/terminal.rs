//! # Terminal Input Helper
//!
//! This module drives prompts against a line-oriented terminal. It repeatedly
//! asks the user until the input is accepted by the prompt or the user types a
//! cancellation token.
//!
//! ## Features
//! - Continuously prompts the user until valid input is received.
//! - Prints the prompt's failure message after every rejected line.
//! - Works over the process terminal ([`StdinReader`]) or any `BufRead` /
//!   `Write` pair ([`IoReader`]), which is how scripted input is fed in.
//!
//! ## Usage
//!
//! ### Example 1: Number in a range
//! ```rust,no_run
//! use askline::prompt::NumberOptions;
//! use askline::utils::Terminal;
//!
//! let mut terminal = Terminal::stdio();
//! let threads = terminal
//!     .prompt_for_number("Threads (1-16): ", NumberOptions::new().range(1.0, 16.0))
//!     .unwrap();
//!
//! println!("Threads: {}", threads);
//! ```
//!
//! ### Example 2: Scripted input
//! ```rust
//! use std::io::Cursor;
//! use askline::prompt::{Answer, BooleanOptions};
//! use askline::utils::{IoReader, Terminal};
//!
//! let reader = IoReader::new(Cursor::new("maybe\nYES\n"), Vec::new());
//! let mut terminal = Terminal::new(reader, Vec::new());
//!
//! let answer = terminal.prompt_for_boolean("Continue? ", BooleanOptions::new()).unwrap();
//! assert_eq!(answer, Answer::Value(true));
//! assert_eq!(terminal.output(), b"invalid boolean input\n");
//! ```

use std::io::{self, BufRead, Stdout, Write};

use serde_json::Value;

use crate::error::PromptError;
use crate::utils::sanitize::decode_line;
use crate::prompt::{
    Answer, BooleanOptions, BooleanPrompt, NumberOptions, NumberPrompt, Prompt, Question,
    QuestionPrompt, Step, StringOptions, StringPrompt, step,
};

/// One blocking prompt-and-read cycle.
pub trait LineReader {
    /// Writes `prompt`, waits for a full line and returns it without the line terminator.
    ///
    /// End of input is reported as [`PromptError::InputClosed`].
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;
}

fn read_prompted_line<B: BufRead, W: Write>(
    input: &mut B,
    echo: &mut W,
    prompt: &str,
) -> Result<String, PromptError> {
    echo.write_all(prompt.as_bytes())?;
    echo.flush()?;

    let mut raw = Vec::new();
    if input.read_until(b'\n', &mut raw)? == 0 {
        return Err(PromptError::InputClosed);
    }

    Ok(decode_line(&raw))
}

/// Reads from the process stdin and writes prompts to stdout.
///
/// Both streams are locked for the duration of a single read and released
/// before `read_line` returns, whatever the outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinReader;

impl LineReader for StdinReader {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        read_prompted_line(&mut stdin.lock(), &mut stdout.lock(), prompt)
    }
}

/// Reads lines from any buffered reader and echoes prompts to any writer.
#[derive(Debug)]
pub struct IoReader<B, W> {
    input: B,
    echo: W,
}

impl<B: BufRead, W: Write> IoReader<B, W> {
    pub fn new(input: B, echo: W) -> Self {
        Self { input, echo }
    }

    /// Everything written as prompts so far.
    pub fn echo(&self) -> &W {
        &self.echo
    }

    pub fn into_parts(self) -> (B, W) {
        (self.input, self.echo)
    }
}

impl<B: BufRead, W: Write> LineReader for IoReader<B, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        read_prompted_line(&mut self.input, &mut self.echo, prompt)
    }
}

/// A helper for repeatedly asking the user for input until a prompt accepts it.
///
/// Rejection messages are written, one per line, to `output`.
#[derive(Debug)]
pub struct Terminal<R, W> {
    reader: R,
    output: W,
}

impl Terminal<StdinReader, Stdout> {
    /// Terminal over the process stdin/stdout.
    pub fn stdio() -> Self {
        Terminal::new(StdinReader, io::stdout())
    }
}

impl<R: LineReader, W: Write> Terminal<R, W> {
    pub fn new(reader: R, output: W) -> Self {
        Self { reader, output }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.output)
    }

    /// Prints the prompt and loops until it accepts a line or the user cancels.
    pub fn ask<P: Prompt>(&mut self, prompt: &P) -> Result<Answer<P::Output>, PromptError> {
        let mut state = prompt.initial_state();

        loop {
            let line = self.reader.read_line(prompt.text())?;

            match step(prompt, &line, state) {
                Step::Accept(value) => break Ok(Answer::Value(value)),
                Step::Cancel => break Ok(Answer::Cancelled),
                Step::Retry(next) => {
                    writeln!(self.output, "{}", next.failed_msg)?;
                    state = next;
                }
            }
        }
    }

    /// Asks for a free-form string.
    pub fn prompt_for_string(
        &mut self,
        prompt: &str,
        options: StringOptions,
    ) -> Result<Answer<String>, PromptError> {
        self.ask(&StringPrompt::new(prompt, options))
    }

    /// Asks for a string without printing a prompt first.
    pub fn input(&mut self, options: StringOptions) -> Result<Answer<String>, PromptError> {
        self.prompt_for_string("", options)
    }

    /// Asks for a number. An inverted range fails before anything is read.
    pub fn prompt_for_number(
        &mut self,
        prompt: &str,
        options: NumberOptions,
    ) -> Result<Answer<f64>, PromptError> {
        let prompt = NumberPrompt::new(prompt, options)?;
        self.ask(&prompt)
    }

    /// Asks a yes/no question.
    pub fn prompt_for_boolean(
        &mut self,
        prompt: &str,
        options: BooleanOptions,
    ) -> Result<Answer<bool>, PromptError> {
        self.ask(&BooleanPrompt::new(prompt, options))
    }

    /// Asks one question of a prompt document.
    pub fn ask_question(&mut self, question: &Question) -> Result<Answer<Value>, PromptError> {
        Ok(match &question.prompt {
            QuestionPrompt::String(p) => self.ask(p)?.map(Value::from),
            QuestionPrompt::Number(p) => self.ask(p)?.map(Value::from),
            QuestionPrompt::Boolean(p) => self.ask(p)?.map(Value::from),
        })
    }
}

/// [`Terminal::prompt_for_string`] on the process terminal.
pub fn prompt_for_string(prompt: &str, options: StringOptions) -> Result<Answer<String>, PromptError> {
    Terminal::stdio().prompt_for_string(prompt, options)
}

/// [`Terminal::prompt_for_number`] on the process terminal.
pub fn prompt_for_number(prompt: &str, options: NumberOptions) -> Result<Answer<f64>, PromptError> {
    Terminal::stdio().prompt_for_number(prompt, options)
}

/// [`Terminal::prompt_for_boolean`] on the process terminal.
pub fn prompt_for_boolean(prompt: &str, options: BooleanOptions) -> Result<Answer<bool>, PromptError> {
    Terminal::stdio().prompt_for_boolean(prompt, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContractViolation;
    use crate::prompt::parse_questions;
    use crate::utils::sanitize::Verdict;
    use std::io::Cursor;

    type Scripted = Terminal<IoReader<Cursor<String>, Vec<u8>>, Vec<u8>>;

    fn scripted(input: &str) -> Scripted {
        Terminal::new(IoReader::new(Cursor::new(input.to_string()), Vec::new()), Vec::new())
    }

    fn printed(terminal: &Scripted) -> String {
        String::from_utf8(terminal.output().clone()).unwrap()
    }

    fn echoed(terminal: &Scripted) -> String {
        String::from_utf8(terminal.reader().echo().clone()).unwrap()
    }

    #[test]
    fn test_ask_string_first_line_without_validation() {
        let mut t = scripted("  hello world \nsecond\n");
        let answer = t.prompt_for_string("Say: ", StringOptions::new()).unwrap();
        assert_eq!(answer, Answer::Value("hello world".to_string()));
        assert_eq!(printed(&t), "");
        assert_eq!(echoed(&t), "Say: ");
    }

    #[test]
    fn test_ask_string_prints_messages_until_valid() {
        let mut t = scripted("a\nbb\nccc\n");
        let options = StringOptions::new().validation(|s: &str| match s.len() {
            1 => Verdict::Rejected(None),
            2 => "try again".into(),
            _ => Verdict::Accepted,
        });

        let answer = t.prompt_for_string("Word: ", options).unwrap();
        assert_eq!(answer, Answer::Value("ccc".to_string()));
        assert_eq!(printed(&t), "invalid input\ntry again\n");
        assert_eq!(echoed(&t), "Word: Word: Word: ");
    }

    #[test]
    fn test_cancel_stops_reading() {
        let mut t = scripted("cancel\nnext\n");
        let answer = t.prompt_for_string("Say: ", StringOptions::new()).unwrap();
        assert!(answer.is_cancelled());
        assert_eq!(answer.to_string(), "cancelled");

        let answer = t.prompt_for_string("Again: ", StringOptions::new()).unwrap();
        assert_eq!(answer, Answer::Value("next".to_string()));
    }

    #[test]
    fn test_cancel_on_every_prompt_type() {
        let mut t = scripted("  exit\ncancel\nCANCEL\n");
        assert!(t.prompt_for_string("s: ", StringOptions::new()).unwrap().is_cancelled());
        assert!(t.prompt_for_number("n: ", NumberOptions::new()).unwrap().is_cancelled());
        assert!(t.prompt_for_boolean("b: ", BooleanOptions::new()).unwrap().is_cancelled());
        assert_eq!(printed(&t), "");
    }

    #[test]
    fn test_custom_cancel_tokens() {
        let mut t = scripted("cancel\nstop\n");
        let answer = t
            .prompt_for_string("s: ", StringOptions::new().can_cancel(vec!["stop"]))
            .unwrap();
        assert_eq!(answer, Answer::Value("cancel".to_string()));

        let answer = t
            .prompt_for_string("s: ", StringOptions::new().can_cancel(vec!["stop"]))
            .unwrap();
        assert!(answer.is_cancelled());
    }

    #[test]
    fn test_number_prompt_retries_until_in_range() {
        let mut t = scripted("ten\n42\n7\n");
        let answer = t
            .prompt_for_number("n: ", NumberOptions::new().range(1.0, 10.0))
            .unwrap();
        assert_eq!(answer, Answer::Value(7.0));
        assert_eq!(
            printed(&t),
            "Sorry, that's not a valid number\nSorry, that's not a valid number in the range 1 to 10\n"
        );
    }

    #[test]
    fn test_inverted_range_fails_before_reading() {
        let mut t = scripted("5\n");
        let err = t
            .prompt_for_number("n: ", NumberOptions::new().range(10.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, PromptError::Contract(ContractViolation::RangeOrder)));
        assert_eq!(echoed(&t), "");

        // the scripted line is still there
        let answer = t.prompt_for_number("n: ", NumberOptions::new()).unwrap();
        assert_eq!(answer, Answer::Value(5.0));
    }

    #[test]
    fn test_boolean_prompt_defaults() {
        let mut t = scripted("maybe\nYes\nno\n");
        let answer = t.prompt_for_boolean("ok? ", BooleanOptions::new()).unwrap();
        assert_eq!(answer, Answer::Value(true));
        assert_eq!(printed(&t), "invalid boolean input\n");

        let answer = t.prompt_for_boolean("ok? ", BooleanOptions::new()).unwrap();
        assert_eq!(answer, Answer::Value(false));
    }

    #[test]
    fn test_input_has_empty_prompt() {
        let mut t = scripted("value\n");
        let answer = t.input(StringOptions::new()).unwrap();
        assert_eq!(answer, Answer::Value("value".to_string()));
        assert_eq!(echoed(&t), "");
    }

    #[test]
    fn test_end_of_input_is_reported() {
        let mut t = scripted("maybe\n");
        let err = t.prompt_for_boolean("ok? ", BooleanOptions::new()).unwrap_err();
        assert!(matches!(err, PromptError::InputClosed));
    }

    #[test]
    fn test_crlf_and_missing_newline() {
        let mut t = scripted("first\r\nlast");
        assert_eq!(
            t.prompt_for_string("", StringOptions::new()).unwrap(),
            Answer::Value("first".to_string())
        );
        assert_eq!(
            t.prompt_for_string("", StringOptions::new()).unwrap(),
            Answer::Value("last".to_string())
        );
    }

    #[test]
    fn test_identical_scripts_give_identical_results() {
        let run = || {
            let mut t = scripted("abc\n12\n3\nnope\ny\n");
            let s = t.prompt_for_string("s: ", StringOptions::new()).unwrap();
            let n = t
                .prompt_for_number("n: ", NumberOptions::new().range(0.0, 5.0))
                .unwrap();
            let b = t.prompt_for_boolean("b: ", BooleanOptions::new()).unwrap();
            (s, n, b, printed(&t), echoed(&t))
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_ask_question_returns_json_values() {
        let questions = parse_questions(
            r#"[
                { "name": "user", "type": "string", "prompt": "Name: " },
                { "name": "age", "type": "number", "prompt": "Age: ", "range": [0, 130] },
                { "name": "ok", "type": "boolean", "prompt": "Ok? ", "canCancel": ["q"] }
            ]"#,
        )
        .unwrap();
        let mut t = scripted("Ferris\n200\n9\nQ\n");

        let answers: Vec<Answer<Value>> = questions
            .iter()
            .map(|q| t.ask_question(q).unwrap())
            .collect();

        assert_eq!(answers[0], Answer::Value(Value::from("Ferris")));
        assert_eq!(answers[1], Answer::Value(Value::from(9.0)));
        assert!(answers[2].is_cancelled());
        assert_eq!(
            printed(&t),
            "Sorry, that's not a valid number in the range 0 to 130\n"
        );
    }

    #[test]
    fn test_invalid_utf8_line_is_retried() {
        let reader = IoReader::new(Cursor::new(b"\xff\n5\n".to_vec()), Vec::new());
        let mut t = Terminal::new(reader, Vec::new());

        let answer = t.prompt_for_number("n: ", NumberOptions::new()).unwrap();
        assert_eq!(answer, Answer::Value(5.0));
        assert_eq!(t.output().as_slice(), b"Sorry, that's not a valid number\n");
    }

    #[test]
    fn test_infinity_is_not_a_number() {
        let questions = parse_questions(r#"[{ "name": "n", "type": "number" }]"#).unwrap();
        let mut t = scripted("inf\n-infinity\n0x+1f\n0x1f\n");

        let answer = t.ask_question(&questions[0]).unwrap();
        assert_eq!(answer, Answer::Value(Value::from(31.0)));
        assert_eq!(printed(&t), "Sorry, that's not a valid number\n".repeat(3));
    }

    #[test]
    fn test_into_parts_keeps_unread_input() {
        let mut t = scripted("cancel\nleft over\n");
        assert!(t.prompt_for_string("s: ", StringOptions::new()).unwrap().is_cancelled());

        let (reader, output) = t.into_parts();
        assert!(output.is_empty());

        let (mut input, echo) = reader.into_parts();
        assert_eq!(echo, b"s: ");
        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "left over\n");
    }
}
