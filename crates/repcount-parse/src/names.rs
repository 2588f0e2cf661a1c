//! Exercise name canonicalization.
//!
//! Three steps, in order:
//! 1. Known speech-recognition mistakes are replaced literally.
//! 2. The ordered rule table is searched; the first matching rule names the exercise.
//! 3. If nothing matched, a window of the user's own words around a base keyword is used.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Misrecognitions produced by speech-to-text for common exercises.
/// Applied in order as literal substring replacements.
pub const CORRECTIONS: &[(&str, &str)] = &[
    ("приїде", "присідання"),
    ("приїду", "присідання"),
    ("приїдь", "присідання"),
    ("відтискань я", "відтискання"),
    ("відтискання я", "відтискання"),
    ("підтягуван я", "підтягування"),
    ("підтягув я", "підтягування"),
    ("планк а", "планка"),
];

/// Base keywords used when no rule matches
pub const BASE_KEYWORDS: &[&str] = &[
    "жим",
    "присідання",
    "підтягування",
    "відтискання",
    "віджимання",
    "планка",
    "тяга",
];

/// A single entry of the rule table
pub struct NameRule {
    /// Exercise family the rule belongs to
    pub family: &'static str,
    pattern: &'static str,
    /// Canonical name returned on match
    pub name: &'static str,
}

impl NameRule {
    const fn new(family: &'static str, pattern: &'static str, name: &'static str) -> Self {
        Self {
            family,
            pattern,
            name,
        }
    }

    pub fn pattern(&self) -> &'static str {
        self.pattern
    }
}

/// Ordered rule table.
///
/// Within a family, qualified variants (grip, implement, body position) must
/// come before the generic form. Matching stops at the first hit, so a
/// generic rule placed earlier shadows every specific rule after it.
pub const NAME_RULES: &[NameRule] = &[
    NameRule::new("жим", r"французьк\w*\s+жим(?:\s+лежачи)?", "французький жим лежачи"),
    NameRule::new("жим", r"жим\s+штанги\s+лежачи", "жим штанги лежачи"),
    NameRule::new("жим", r"жим\s+гантел\w*\s+лежачи", "жим гантель лежачи"),
    NameRule::new("жим", r"жим\s+лежачи", "жим лежачи"),
    NameRule::new("жим", r"жим\s+стоячи", "жим стоячи"),
    NameRule::new("жим", r"жим(?:\s+від)?\s+грудей", "жим від грудей"),
    NameRule::new("присідання", r"присідан\w*\s+(?:з|зі)\s+штанг\w*", "присідання з штангою"),
    NameRule::new("присідання", r"присідан\w*\s+(?:з|зі)\s+гантел\w*", "присідання з гантеллю"),
    NameRule::new("присідання", r"присідан\w*", "присідання"),
    NameRule::new("підтягування", r"підтягуван\w*\s+широким\s+хватом", "підтягування широким хватом"),
    NameRule::new("підтягування", r"підтягуван\w*\s+вузьким\s+хватом", "підтягування вузьким хватом"),
    NameRule::new("підтягування", r"підтягуван\w*\s+зворотним\s+хватом", "підтягування зворотним хватом"),
    NameRule::new("підтягування", r"підтягуван\w*", "підтягування"),
    NameRule::new("відтискання", r"(?:відтискан|віджиман)\w*\s+від\s+підлоги", "відтискання від підлоги"),
    NameRule::new("відтискання", r"(?:відтискан|віджиман)\w*\s+на\s+брусах", "відтискання на брусах"),
    NameRule::new("відтискання", r"(?:відтискан|віджиман)\w*", "відтискання"),
    NameRule::new("планка", r"планк\w*\s+на\s+ліктях", "планка на ліктях"),
    NameRule::new("планка", r"планк\w*\s+на\s+руках", "планка на руках"),
    NameRule::new("планка", r"планк\w*", "планка"),
    NameRule::new("тяга", r"тяга\s+штанги\s+в\s+нахилі", "тяга штанги в нахилі"),
    NameRule::new("тяга", r"тяга\s+гантел\w*\s+в\s+нахилі", "тяга гантель в нахилі"),
    NameRule::new("тяга", r"тяга\s+верхнього\s+блоку", "тяга верхнього блоку"),
    NameRule::new("махи", r"махи\s+гантел\w*", "махи гантелями"),
    NameRule::new("розведення", r"розведення\s+гантел\w*\s+лежачи", "розведення гантель лежачи"),
    NameRule::new("розведення", r"розведення\s+гантел\w*", "розведення гантель"),
    NameRule::new("випади", r"випади\s+з\s+гантел\w*", "випади з гантелями"),
    NameRule::new("випади", r"випад\w*", "випади"),
    NameRule::new("скручування", r"скручуван\w*", "скручування"),
];

static COMPILED_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    NAME_RULES
        .iter()
        .map(|rule| (Regex::new(rule.pattern).expect("valid regex"), rule.name))
        .collect()
});

static WINDOW_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d+(?:[.,]\d+)?(?:кг|kg|кілограм\w*)?|\b(?:повтор\w*|раз\w*|rep\w*|кг|kg|кілограм\w*|з\s+вагою|вага)\b",
    )
    .expect("valid regex")
});
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

const WINDOW_BEFORE: usize = 2;
const WINDOW_AFTER: usize = 3;

/// Apply the misrecognition table to lower-cased text.
pub fn apply_corrections(text_lower: &str) -> String {
    let mut corrected = text_lower.to_string();
    for (wrong, right) in CORRECTIONS {
        if corrected.contains(wrong) {
            corrected = corrected.replace(wrong, right);
        }
    }
    corrected
}

/// Find the canonical exercise name.
///
/// `original_text` is the user's text as written; `text_lower` is its
/// lower-cased, trimmed form. Returns `None` when no exercise keyword occurs.
pub fn canonicalize(original_text: &str, text_lower: &str) -> Option<String> {
    let corrected = apply_corrections(text_lower);

    if let Some(name) = match_rule(&corrected) {
        debug!(name = name, "Matched exercise rule");
        return Some(name.to_string());
    }

    let name = keyword_window(original_text, &corrected);
    debug!(name = ?name, "Keyword window fallback");
    name
}

/// Canonicalize free text in one step.
pub fn canonical_name(text: &str) -> Option<String> {
    let original = text.trim();
    canonicalize(original, &original.to_lowercase())
}

fn match_rule(corrected: &str) -> Option<&'static str> {
    COMPILED_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(corrected))
        .map(|(_, name)| *name)
}

fn keyword_window(original_text: &str, corrected: &str) -> Option<String> {
    let keyword = BASE_KEYWORDS.iter().find(|kw| corrected.contains(*kw))?;

    let words: Vec<&str> = original_text.split_whitespace().collect();
    let Some(position) = words
        .iter()
        .position(|word| word.to_lowercase().contains(*keyword))
    else {
        // Keyword only exists after correction
        return Some(keyword.to_string());
    };

    let start = position.saturating_sub(WINDOW_BEFORE);
    let end = (position + 1 + WINDOW_AFTER).min(words.len());
    let window = words[start..end].join(" ");

    let stripped = WINDOW_NOISE.replace_all(&window, "");
    let cleaned = MULTI_SPACE.replace_all(stripped.trim(), " ").to_string();

    // Stripping numbers can join words into a rule phrase
    if let Some(name) = match_rule(&apply_corrections(&cleaned.to_lowercase())) {
        return Some(name.to_string());
    }

    if cleaned.chars().count() > keyword.chars().count() {
        Some(cleaned)
    } else {
        Some(keyword.to_string())
    }
}
