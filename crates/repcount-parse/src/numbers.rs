//! Repetition and weight extraction from normalized (lower-cased, trimmed) text.
//!
//! Both extractors walk an ordered list of patterns and stop at the first
//! pattern that yields a usable value. Absence is a plain `None`.

use regex::Regex;
use std::sync::LazyLock;

static REPS_NUMBER_THEN_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:повтор|раз|rep)").expect("valid regex"));
static REPS_UNIT_THEN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:повтор|раз|rep)\w*\s*(\d+)").expect("valid regex"));
static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:\s|$)").expect("valid regex"));

static WEIGHT_NUMBER_THEN_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*(?:кг|kg|кілограм)").expect("valid regex")
});
static WEIGHT_WITH_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"з\s*вагою\s*(\d+(?:[.,]\d+)?)").expect("valid regex"));
static WEIGHT_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"вага\s*(\d+(?:[.,]\d+)?)").expect("valid regex"));

const MASS_UNITS: &[&str] = &["кг", "kg", "кілограм"];
const WEIGHT_PHRASES: &[&str] = &["вагою", "вага"];

/// Extract the repetition count.
///
/// Tries, in order: a number followed by a repetition keyword, a keyword
/// followed by a number, then the first bare number that is not a weight.
pub fn extract_reps(text: &str) -> Option<u32> {
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    for pattern in [&*REPS_NUMBER_THEN_UNIT, &*REPS_UNIT_THEN_NUMBER] {
        if let Some(reps) = pattern
            .captures(text)
            .and_then(|caps| parse_count(&caps[1]))
        {
            return Some(reps);
        }
    }

    bare_reps(text)
}

/// Extract the weight, independently of repetitions.
pub fn extract_weight(text: &str) -> Option<f64> {
    [
        &*WEIGHT_NUMBER_THEN_UNIT,
        &*WEIGHT_WITH_PHRASE,
        &*WEIGHT_KEYWORD,
    ]
    .into_iter()
    .find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| parse_weight(&caps[1]))
    })
}

fn bare_reps(text: &str) -> Option<u32> {
    for caps in BARE_NUMBER.captures_iter(text) {
        let Some(number) = caps.get(1) else {
            continue;
        };

        let before = &text[..number.start()];
        let after = text[number.end()..].trim_start();

        // Part of a decimal like 22.5
        if before.ends_with(['.', ',']) {
            continue;
        }
        if MASS_UNITS.iter().any(|unit| after.starts_with(unit)) {
            continue;
        }
        if WEIGHT_PHRASES
            .iter()
            .any(|phrase| before.trim_end().ends_with(phrase))
        {
            continue;
        }

        if let Some(reps) = parse_count(number.as_str()) {
            return Some(reps);
        }
    }
    None
}

fn parse_count(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

fn parse_weight(digits: &str) -> Option<f64> {
    digits
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reps_no_digits() {
        assert_eq!(extract_reps("присідання багато разів"), None);
        assert_eq!(extract_reps(""), None);
    }

    #[test]
    fn test_reps_number_before_keyword() {
        assert_eq!(extract_reps("присідання 30 разів з вагою 20 кг"), Some(30));
        assert_eq!(extract_reps("жим лежачи 12 повторів"), Some(12));
        assert_eq!(extract_reps("squats 15 reps"), Some(15));
    }

    #[test]
    fn test_reps_keyword_before_number() {
        assert_eq!(extract_reps("підтягування повторів 8"), Some(8));
    }

    #[test]
    fn test_reps_keyword_adjacent_beats_trailing_number() {
        assert_eq!(extract_reps("зробив 12 разів присідання 3"), Some(12));
        assert_eq!(extract_reps("5 підходів по 10 разів 7"), Some(10));
    }

    #[test]
    fn test_reps_bare_number() {
        assert_eq!(extract_reps("відтискань я 15"), Some(15));
        assert_eq!(extract_reps("зробив 20 відтискань"), Some(20));
    }

    #[test]
    fn test_reps_bare_number_skips_weight() {
        assert_eq!(extract_reps("жим лежачи 80 кг 10"), Some(10));
        assert_eq!(extract_reps("жим з вагою 60 8"), Some(8));
        assert_eq!(extract_reps("жим 22.5 кг 6"), Some(6));
    }

    #[test]
    fn test_reps_weight_only_is_none() {
        assert_eq!(extract_reps("жим 80кг"), None);
        assert_eq!(extract_reps("жим 80 кг"), None);
    }

    #[test]
    fn test_reps_zero_is_absent() {
        assert_eq!(extract_reps("присідання 0 разів"), None);
    }

    #[test]
    fn test_weight_patterns() {
        assert_eq!(extract_weight("жим штанги лежачи 10 разів 80 кг"), Some(80.0));
        assert_eq!(extract_weight("присідання 30 разів з вагою 20"), Some(20.0));
        assert_eq!(extract_weight("тяга вага 45 10 разів"), Some(45.0));
        assert_eq!(extract_weight("жим 8 разів 22,5 кг"), Some(22.5));
        assert_eq!(extract_weight("deadlift 5 reps 100kg"), Some(100.0));
    }

    #[test]
    fn test_weight_absent() {
        assert_eq!(extract_weight("присідання 20 разів"), None);
        assert_eq!(extract_weight("вага"), None);
    }

    #[test]
    fn test_weight_independent_of_reps() {
        assert_eq!(extract_reps("жим 80 кг"), None);
        assert_eq!(extract_weight("жим 80 кг"), Some(80.0));
    }
}
