use crate::ExerciseRecord;

/// Result of a single parser stage
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// The stage produced a usable record
    Valid(ExerciseRecord),
    /// The stage positively decided the text is not an exercise. Terminal.
    ExplicitNonExercise,
    /// The stage could not decide; the next stage may try
    Inconclusive,
}

impl ParseOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ParseOutcome::Valid(_))
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self, ParseOutcome::Inconclusive)
    }

    pub fn into_record(self) -> Option<ExerciseRecord> {
        match self {
            ParseOutcome::Valid(record) => Some(record),
            _ => None,
        }
    }

    /// Get a short description of the outcome for logging
    pub fn short_description(&self) -> String {
        match self {
            ParseOutcome::Valid(record) => format!("VALID ({})", record.name()),
            ParseOutcome::ExplicitNonExercise => "NOT_EXERCISE".to_string(),
            ParseOutcome::Inconclusive => "INCONCLUSIVE".to_string(),
        }
    }
}

impl From<Option<ExerciseRecord>> for ParseOutcome {
    fn from(record: Option<ExerciseRecord>) -> Self {
        record.map_or(ParseOutcome::Inconclusive, ParseOutcome::Valid)
    }
}
