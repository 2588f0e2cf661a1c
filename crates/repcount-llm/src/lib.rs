//! LLM-assisted exercise parsing.
//!
//! A [`Completer`] turns a prompt into text; [`LlmParser`] wraps one and maps
//! its reply to a [`repcount_parse::ParseOutcome`].

mod gemini;
mod output;
mod parser;
mod prompts;
mod resolve;
mod traits;
mod verdict;

pub use gemini::GeminiCompleter;
pub use output::CompletionOutput;
pub use parser::LlmParser;
pub use prompts::ExercisePrompts;
pub use resolve::{resolve_from_candidates, resolve_completer, DEFAULT_MODELS};
pub use traits::{Completer, CompleterConfig, CompleterError, DEFAULT_TIMEOUT};
pub use verdict::{LlmVerdict, VerdictParseError};
