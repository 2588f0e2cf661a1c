use serde::{Deserialize, Serialize};

/// A single recorded exercise set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct ExerciseRecord {
    name: String,
    reps: u32,
    weight: Option<f64>,
}

#[derive(Deserialize)]
struct RawRecord {
    name: String,
    reps: u32,
    #[serde(default)]
    weight: Option<f64>,
}

impl TryFrom<RawRecord> for ExerciseRecord {
    type Error = String;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        ExerciseRecord::new(&raw.name, raw.reps, raw.weight).ok_or_else(|| {
            format!(
                "invalid exercise record: name={:?} reps={} weight={:?}",
                raw.name, raw.reps, raw.weight
            )
        })
    }
}

impl ExerciseRecord {
    /// Build a record, returning `None` if the name is blank, reps is zero,
    /// or the weight is present but not a positive finite number.
    pub fn new(name: &str, reps: u32, weight: Option<f64>) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() || reps == 0 {
            return None;
        }
        if let Some(w) = weight {
            if !w.is_finite() || w <= 0.0 {
                return None;
            }
        }
        Some(Self {
            name: name.to_string(),
            reps,
            weight,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }
}

/// Format a weight for display: whole numbers without a fractional part.
pub fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0}", weight)
    } else {
        let s = format!("{:.2}", weight);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
