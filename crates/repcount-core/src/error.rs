use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Malformed entry: name={name:?}, reps={reps}, weight={weight:?}")]
    MalformedEntry {
        name: String,
        reps: i64,
        weight: Option<f64>,
    },
}
