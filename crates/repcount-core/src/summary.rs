//! Session aggregation: groups a session's records by exercise name and
//! renders them as display lines.

use std::collections::HashMap;

use repcount_parse::{format_weight, ExerciseRecord};

use crate::{approaches_word, reps_word, CoreError};

/// Reps accumulated under one weight value within a group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBucket {
    /// `None` for sets done without weight
    pub weight: Option<f64>,
    pub reps: u64,
}

/// All sets of one exercise within a session, in recording order
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryGroup {
    name: String,
    sets: Vec<(u32, Option<f64>)>,
}

impl SummaryGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sets: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sets(&self) -> &[(u32, Option<f64>)] {
        &self.sets
    }

    pub fn approaches(&self) -> usize {
        self.sets.len()
    }

    pub fn total_reps(&self) -> u64 {
        self.sets.iter().map(|(reps, _)| u64::from(*reps)).sum()
    }

    /// Per-weight subtotals, heaviest first; the unweighted bucket sorts last.
    pub fn buckets(&self) -> Vec<WeightBucket> {
        let mut buckets: Vec<WeightBucket> = Vec::new();
        for &(reps, weight) in &self.sets {
            let reps = u64::from(reps);
            match buckets.iter_mut().find(|b| b.weight == weight) {
                Some(bucket) => bucket.reps += reps,
                None => buckets.push(WeightBucket { weight, reps }),
            }
        }
        buckets.sort_by(|a, b| {
            let a = a.weight.unwrap_or(0.0);
            let b = b.weight.unwrap_or(0.0);
            b.total_cmp(&a)
        });
        buckets
    }

    fn lines(&self) -> Vec<String> {
        if let [(reps, weight)] = self.sets.as_slice() {
            return vec![single_line(&self.name, *reps, *weight)];
        }

        let approaches = self.approaches() as u64;
        let total = self.total_reps();
        let mut lines = vec![format!(
            "• {} – {} {}, {} {}:",
            self.name,
            approaches,
            approaches_word(approaches),
            total,
            reps_word(total)
        )];

        lines.extend(self.buckets().into_iter().map(|bucket| {
            let reps = bucket.reps;
            match bucket.weight {
                Some(weight) => format!(
                    "  - {} {} з вагою {} кг",
                    reps,
                    reps_word(reps),
                    format_weight(weight)
                ),
                None => format!("  - {} {} без ваги", reps, reps_word(reps)),
            }
        }));
        lines
    }
}

/// Groups keyed by exact name, iterated in first-seen order
#[derive(Debug, Default)]
pub struct OrderedGroups {
    groups: Vec<SummaryGroup>,
    index: HashMap<String, usize>,
}

impl OrderedGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &ExerciseRecord) {
        let slot = match self.index.get(record.name()) {
            Some(&slot) => slot,
            None => {
                self.groups.push(SummaryGroup::new(record.name()));
                let slot = self.groups.len() - 1;
                self.index.insert(record.name().to_string(), slot);
                slot
            }
        };
        self.groups[slot].sets.push((record.reps(), record.weight()));
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> Vec<SummaryGroup> {
        self.groups
    }
}

pub fn group_entries(entries: &[ExerciseRecord]) -> Vec<SummaryGroup> {
    let mut groups = OrderedGroups::new();
    for entry in entries {
        groups.push(entry);
    }
    groups.into_groups()
}

/// Render a session's records as display lines
pub fn summarize(entries: &[ExerciseRecord]) -> Vec<String> {
    group_entries(entries)
        .iter()
        .flat_map(SummaryGroup::lines)
        .collect()
}

/// Render one record the way a single-set group is rendered
pub fn format_record(record: &ExerciseRecord) -> String {
    single_line(record.name(), record.reps(), record.weight())
}

/// `<name> – <reps> <unit>[ з вагою <w> кг]`, without the bullet
pub fn describe_record(record: &ExerciseRecord) -> String {
    describe(record.name(), record.reps(), record.weight())
}

/// Rebuild a record from stored column values
pub fn record_from_row(
    name: &str,
    reps: i64,
    weight: Option<f64>,
) -> Result<ExerciseRecord, CoreError> {
    let malformed = || CoreError::MalformedEntry {
        name: name.to_string(),
        reps,
        weight,
    };
    let reps = u32::try_from(reps).map_err(|_| malformed())?;
    ExerciseRecord::new(name, reps, weight).ok_or_else(malformed)
}

fn single_line(name: &str, reps: u32, weight: Option<f64>) -> String {
    format!("• {}", describe(name, reps, weight))
}

fn describe(name: &str, reps: u32, weight: Option<f64>) -> String {
    let reps = u64::from(reps);
    let mut line = format!("{} – {} {}", name, reps, reps_word(reps));
    if let Some(weight) = weight {
        line.push_str(&format!(" з вагою {} кг", format_weight(weight)));
    }
    line
}
