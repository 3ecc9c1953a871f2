pub mod sanitize;
pub use sanitize::{CANCEL_KEYWORDS, CancelPolicy, Verdict, check_range, parse_number};

pub mod types;
pub use types::{ArgKind, expect_type};

cfg_if::cfg_if! {
    if #[cfg(any(feature = "std", doc))] {
        pub mod terminal;
        pub use terminal::{
            IoReader, LineReader, StdinReader, Terminal, prompt_for_boolean, prompt_for_number,
            prompt_for_string,
        };
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio-dep")] {
        pub mod asynchronous;
        pub use asynchronous::{AsyncLineReader, AsyncTerminal, FramedLines};
    }
}
