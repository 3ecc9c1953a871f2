//! # Async Terminal
//!
//! Tokio flavor of [`crate::utils::Terminal`]. The prompt evaluation is the
//! same; only the reading and printing are awaited, so a prompt can sit in an
//! async program without blocking a runtime thread.
//!
//! ```rust,no_run
//! use askline::prompt::BooleanOptions;
//! use askline::utils::AsyncTerminal;
//!
//! # async fn run() -> Result<(), askline::PromptError> {
//! let mut terminal = AsyncTerminal::stdio();
//! let answer = terminal.prompt_for_boolean("Continue? ", BooleanOptions::new()).await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

use std::io;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, Stdin, Stdout};
use tokio_stream::StreamExt;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, FramedRead};

use crate::error::PromptError;
use crate::utils::sanitize::decode_line;
use crate::prompt::{
    Answer, BooleanOptions, BooleanPrompt, NumberOptions, NumberPrompt, Prompt, Question,
    QuestionPrompt, Step, StringOptions, StringPrompt, step,
};

/// One awaited prompt-and-read cycle.
#[async_trait]
pub trait AsyncLineReader: Send {
    /// Writes `prompt`, waits for a full line and returns it without the line terminator.
    async fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;
}

/// Newline-delimited chunks framed with [`AnyDelimiterCodec`] from `R`,
/// prompts written to `W`. Chunks are decoded lossily, so bytes that are not
/// UTF-8 reach the prompt as ordinary (rejected) input.
///
/// The stream is owned for the lifetime of the reader so lines buffered by the
/// codec are not lost between prompts.
#[derive(Debug)]
pub struct FramedLines<R, W> {
    lines: FramedRead<R, AnyDelimiterCodec>,
    echo: W,
}

impl FramedLines<Stdin, Stdout> {
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R: AsyncRead + Unpin + Send, W: AsyncWrite + Unpin + Send> FramedLines<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        Self {
            lines: FramedRead::new(input, AnyDelimiterCodec::new(b"\n".to_vec(), b"\n".to_vec())),
            echo,
        }
    }

    pub fn echo(&self) -> &W {
        &self.echo
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send, W: AsyncWrite + Unpin + Send> AsyncLineReader for FramedLines<R, W> {
    async fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.echo.write_all(prompt.as_bytes()).await?;
        self.echo.flush().await?;

        match self.lines.next().await {
            Some(Ok(chunk)) => Ok(decode_line(&chunk)),
            Some(Err(AnyDelimiterCodecError::Io(e))) => Err(e.into()),
            Some(Err(AnyDelimiterCodecError::MaxChunkLengthExceeded)) => Err(PromptError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "line too long",
            ))),
            None => Err(PromptError::InputClosed),
        }
    }
}

/// Async twin of [`crate::utils::Terminal`].
#[derive(Debug)]
pub struct AsyncTerminal<R, W> {
    reader: R,
    output: W,
}

impl AsyncTerminal<FramedLines<Stdin, Stdout>, Stdout> {
    pub fn stdio() -> Self {
        AsyncTerminal::new(FramedLines::stdio(), tokio::io::stdout())
    }
}

impl<R: AsyncLineReader, W: AsyncWrite + Unpin + Send> AsyncTerminal<R, W> {
    pub fn new(reader: R, output: W) -> Self {
        Self { reader, output }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Prints the prompt and loops until it accepts a line or the user cancels.
    pub async fn ask<P: Prompt + Sync>(&mut self, prompt: &P) -> Result<Answer<P::Output>, PromptError> {
        let mut state = prompt.initial_state();

        loop {
            let line = self.reader.read_line(prompt.text()).await?;

            match step(prompt, &line, state) {
                Step::Accept(value) => break Ok(Answer::Value(value)),
                Step::Cancel => break Ok(Answer::Cancelled),
                Step::Retry(next) => {
                    self.output.write_all(next.failed_msg.as_bytes()).await?;
                    self.output.write_all(b"\n").await?;
                    self.output.flush().await?;
                    state = next;
                }
            }
        }
    }

    pub async fn prompt_for_string(
        &mut self,
        prompt: &str,
        options: StringOptions,
    ) -> Result<Answer<String>, PromptError> {
        self.ask(&StringPrompt::new(prompt, options)).await
    }

    pub async fn input(&mut self, options: StringOptions) -> Result<Answer<String>, PromptError> {
        self.prompt_for_string("", options).await
    }

    pub async fn prompt_for_number(
        &mut self,
        prompt: &str,
        options: NumberOptions,
    ) -> Result<Answer<f64>, PromptError> {
        let prompt = NumberPrompt::new(prompt, options)?;
        self.ask(&prompt).await
    }

    pub async fn prompt_for_boolean(
        &mut self,
        prompt: &str,
        options: BooleanOptions,
    ) -> Result<Answer<bool>, PromptError> {
        self.ask(&BooleanPrompt::new(prompt, options)).await
    }

    pub async fn ask_question(&mut self, question: &Question) -> Result<Answer<Value>, PromptError> {
        Ok(match &question.prompt {
            QuestionPrompt::String(p) => self.ask(p).await?.map(Value::from),
            QuestionPrompt::Number(p) => self.ask(p).await?.map(Value::from),
            QuestionPrompt::Boolean(p) => self.ask(p).await?.map(Value::from),
        })
    }
}
