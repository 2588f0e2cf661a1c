//! # repcount-parse
//!
//! Rule-based parsing of exercise sets from short Ukrainian utterances.
//!
//! ## Key Types
//!
//! - [`ExerciseRecord`] - A validated exercise set (name, reps, optional weight)
//! - [`ParseOutcome`] - Tri-state result of any parser stage
//! - [`FallbackParser`] - Synchronous parser stage, implemented by [`RuleParser`]
//!
//! ## Modules
//!
//! - [`numbers`] - Repetition and weight extraction
//! - [`names`] - Misrecognition corrections and the ordered exercise rule table

mod fallback;
pub mod names;
pub mod numbers;
mod outcome;
mod record;

pub use fallback::{fallback_parse, FallbackParser, RuleParser};
pub use names::{canonical_name, canonicalize};
pub use numbers::{extract_reps, extract_weight};
pub use outcome::ParseOutcome;
pub use record::{format_weight, ExerciseRecord};
