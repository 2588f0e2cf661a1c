//! # repcount-core
//!
//! Ties the parser stages together and turns a session's records into
//! display lines.
//!
//! - [`ExerciseParser`] - LLM-assisted parsing with a rule-based fallback
//! - [`summarize`] - Grouped, weight-bucketed session summary

mod error;
mod parser;
mod plural;
mod summary;

pub use error::CoreError;
pub use parser::{ExerciseParser, ParseReport, ParseSource};
pub use plural::{approaches_word, plural_uk, reps_word};
pub use summary::{
    describe_record, format_record, group_entries, record_from_row, summarize, OrderedGroups,
    SummaryGroup, WeightBucket,
};
