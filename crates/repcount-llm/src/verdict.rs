use repcount_parse::ExerciseRecord;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// What the completion model decided about an utterance
#[derive(Debug, Clone, PartialEq)]
pub enum LlmVerdict {
    /// The utterance describes one exercise set
    Exercise(ExerciseRecord),
    /// The model positively rejected the utterance
    NotExercise,
}

#[derive(Error, Debug)]
pub enum VerdictParseError {
    #[error("No JSON object found in completion output")]
    NoJsonFound,

    #[error("Failed to parse verdict JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid verdict shape: {0}")]
    InvalidShape(String),
}

impl LlmVerdict {
    /// Parse a verdict from raw completion text
    ///
    /// Expected payload, possibly wrapped in a code fence or surrounding prose:
    /// ```text
    /// {"name": "жим лежачи", "reps": 10, "weight": 80}
    /// ```
    /// or
    /// ```text
    /// {"error": "not_exercise"}
    /// ```
    pub fn parse(output: &str) -> Result<Self, VerdictParseError> {
        debug!(output_len = output.len(), "Parsing completion verdict");

        let json_str = Self::extract_json(output)?;
        let value: Value = serde_json::from_str(json_str)?;
        let Value::Object(object) = value else {
            return Err(VerdictParseError::InvalidShape(
                "top-level value is not an object".to_string(),
            ));
        };

        if let Some(error) = object.get("error").filter(|e| !e.is_null()) {
            return match error.as_str() {
                Some("not_exercise") => Ok(LlmVerdict::NotExercise),
                _ => Err(VerdictParseError::InvalidShape(format!(
                    "unexpected error value: {}",
                    error
                ))),
            };
        }

        Self::parse_record(&object).map(LlmVerdict::Exercise)
    }

    fn extract_json(output: &str) -> Result<&str, VerdictParseError> {
        let unfenced = Self::strip_code_fence(output.trim());

        let start = unfenced.find('{');
        let end = unfenced.rfind('}');

        match (start, end) {
            (Some(start), Some(end)) if start < end => Ok(&unfenced[start..=end]),
            _ => Err(VerdictParseError::NoJsonFound),
        }
    }

    fn strip_code_fence(output: &str) -> &str {
        let Some(rest) = output.strip_prefix("```") else {
            return output;
        };
        // Drop the language tag line, if any
        let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
        body.trim_end().strip_suffix("```").unwrap_or(body).trim()
    }

    fn parse_record(object: &Map<String, Value>) -> Result<ExerciseRecord, VerdictParseError> {
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| VerdictParseError::InvalidShape("missing or empty name".to_string()))?;

        let reps = object
            .get("reps")
            .and_then(Value::as_u64)
            .and_then(|reps| u32::try_from(reps).ok())
            .filter(|reps| *reps > 0)
            .ok_or_else(|| {
                VerdictParseError::InvalidShape(format!(
                    "reps must be a positive integer, got {:?}",
                    object.get("reps")
                ))
            })?;

        let weight = match object.get("weight") {
            None | Some(Value::Null) => None,
            Some(value) => match value.as_u64() {
                Some(0) => None,
                Some(weight) => Some(weight as f64),
                None => {
                    return Err(VerdictParseError::InvalidShape(format!(
                        "weight must be a non-negative integer or null, got {}",
                        value
                    )))
                }
            },
        };

        ExerciseRecord::new(name, reps, weight)
            .ok_or_else(|| VerdictParseError::InvalidShape("record invariants violated".to_string()))
    }

    pub fn is_exercise(&self) -> bool {
        matches!(self, LlmVerdict::Exercise(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exercise() {
        let verdict =
            LlmVerdict::parse(r#"{"name": "жим штанги лежачи", "reps": 10, "weight": 80}"#).unwrap();
        assert!(verdict.is_exercise());
        if let LlmVerdict::Exercise(record) = verdict {
            assert_eq!(record.name(), "жим штанги лежачи");
            assert_eq!(record.reps(), 10);
            assert_eq!(record.weight(), Some(80.0));
        }
    }

    #[test]
    fn test_parse_not_exercise() {
        let verdict = LlmVerdict::parse(r#"{"error": "not_exercise"}"#).unwrap();
        assert_eq!(verdict, LlmVerdict::NotExercise);
    }

    #[test]
    fn test_parse_fenced_with_prose() {
        let output = r#"```json
{"name": "присідання", "reps": 20, "weight": null}
```"#;
        let verdict = LlmVerdict::parse(output).unwrap();
        assert_eq!(
            verdict,
            LlmVerdict::Exercise(ExerciseRecord::new("присідання", 20, None).unwrap())
        );

        let output = "Ось результат: {\"error\": \"not_exercise\"} готово.";
        assert_eq!(LlmVerdict::parse(output).unwrap(), LlmVerdict::NotExercise);
    }

    #[test]
    fn test_missing_weight_and_zero_weight() {
        let verdict = LlmVerdict::parse(r#"{"name": "планка", "reps": 3}"#).unwrap();
        assert_eq!(
            verdict,
            LlmVerdict::Exercise(ExerciseRecord::new("планка", 3, None).unwrap())
        );

        let verdict = LlmVerdict::parse(r#"{"name": "планка", "reps": 3, "weight": 0}"#).unwrap();
        assert_eq!(
            verdict,
            LlmVerdict::Exercise(ExerciseRecord::new("планка", 3, None).unwrap())
        );
    }

    #[test]
    fn test_no_json() {
        let result = LlmVerdict::parse("I cannot help with that.");
        assert!(matches!(result, Err(VerdictParseError::NoJsonFound)));

        let result = LlmVerdict::parse("} backwards {");
        assert!(matches!(result, Err(VerdictParseError::NoJsonFound)));
    }

    #[test]
    fn test_malformed_json() {
        let result = LlmVerdict::parse(r#"{"name": "жим", "reps": }"#);
        assert!(matches!(result, Err(VerdictParseError::JsonParseError(_))));
    }

    #[test]
    fn test_invalid_shapes() {
        let cases = [
            r#"{"name": "жим", "reps": "10"}"#,
            r#"{"name": "жим", "reps": 10.5}"#,
            r#"{"name": "жим", "reps": 0}"#,
            r#"{"name": "жим", "reps": -3}"#,
            r#"{"name": "   ", "reps": 10}"#,
            r#"{"reps": 10}"#,
            r#"{"name": "жим", "reps": 10, "weight": -5}"#,
            r#"{"name": "жим", "reps": 10, "weight": 22.5}"#,
            r#"{"name": "жим", "reps": 10, "weight": "80"}"#,
            r#"{"error": "rate_limited"}"#,
        ];
        for case in cases {
            let result = LlmVerdict::parse(case);
            assert!(
                matches!(result, Err(VerdictParseError::InvalidShape(_))),
                "expected InvalidShape for {}, got {:?}",
                case,
                result
            );
        }
    }
}
