#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Askline
//!
//! A small Rust library for asking a terminal user for one value at a time:
//! print a prompt, read a line, validate or coerce it, and ask again until the
//! answer is acceptable or the user cancels.
//!
//! ## Features
//!
//! - **String prompts** - free-form text with an optional validation predicate
//! - **Number prompts** - numeric coercion with an optional inclusive range
//! - **Boolean prompts** - yes/no tokens with defaults, custom tokens and case folding
//! - **Cancellation** - `cancel`/`exit` (or your own tokens) end a prompt with [`Answer::Cancelled`]
//! - **Prompt documents** - questions described in JSON, checked before any I/O
//!
//! ## Feature Variants
//!
//! | Feature     | Description                                                   |
//! |-------------|---------------------------------------------------------------|
//! | `std`       | Blocking [`utils::Terminal`] over stdin/stdout (default).     |
//! | `tokio-dep` | `utils::AsyncTerminal`, an awaited terminal built on Tokio.   |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use askline::prompt::{Answer, BooleanOptions, NumberOptions, StringOptions};
//! use askline::utils::Terminal;
//!
//! let mut terminal = Terminal::stdio();
//!
//! let name = terminal
//!     .prompt_for_string("Name: ", StringOptions::new().validation(|s: &str| !s.is_empty()))
//!     .unwrap();
//!
//! let threads = terminal
//!     .prompt_for_number("Scan threads (1-16): ", NumberOptions::new().range(1.0, 16.0))
//!     .unwrap();
//!
//! match terminal.prompt_for_boolean("Start? ", BooleanOptions::new()).unwrap() {
//!     Answer::Value(true) => println!("{} starts {} threads", name, threads),
//!     Answer::Value(false) => println!("not today"),
//!     Answer::Cancelled => println!("cancelled"),
//! }
//! ```
//!
//! ## Error Handling
//!
//! A user typing nonsense is not an error: the failure message is printed and
//! the prompt asks again. `Err` is reserved for configuration mistakes
//! ([`ContractViolation`], raised before anything is read) and for a broken or
//! closed terminal.
//!
//! ```rust,no_run
//! use askline::prompt::NumberOptions;
//! use askline::utils::prompt_for_number;
//!
//! let err = prompt_for_number("n: ", NumberOptions::new().range(10.0, 1.0)).unwrap_err();
//! assert!(err.is_contract_violation());
//! ```
//!
//! ## License
//!
//! This project is licensed under the MIT License.

pub mod error;
pub mod prompt;
pub mod utils;

pub use error::{ContractViolation, PromptError};
pub use prompt::Answer;
