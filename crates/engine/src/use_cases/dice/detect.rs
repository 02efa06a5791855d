//! Detect dice use case - finds roll candidates in free chat text.
//!
//! Direct notation (`roll 1d20+5`) is extracted verbatim. Phrases naming an
//! ability check, skill check, save or initiative suggest a plain `1d20` at
//! lower confidence. Nothing is executed here.

use std::sync::LazyLock;

use dmhelper_domain::DiceExpression;
use regex_lite::Regex;

const NOTATION_CONFIDENCE: f64 = 0.9;
const D20_BONUS: f64 = 0.05;
const NEGATION_FACTOR: f64 = 0.3;
/// Bytes before a match searched for negating words.
const NEGATION_WINDOW: usize = 32;
const CONTEXTUAL_EXPRESSION: &str = "1d20";

// Patterns are compile-time constants; a failure here is a programming error.
static NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:\d+\s*[+-]\s*)*\d*d\d+(?:adv|dis|[dk][lh]\d+)?(?:\s*[+-]\s*(?:\d*d\d+(?:adv|dis|[dk][lh]\d+)?|\d+))*\b",
    )
    .expect("notation pattern")
});

static NEGATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:don'?t|do\s+not|never)\b").expect("negation pattern")
});

static CONTEXTUAL: LazyLock<Vec<(Regex, DetectionKind, f64)>> = LazyLock::new(|| {
    [
        (
            r"(?i)\b(?:strength|str|dexterity|dex|constitution|con|intelligence|int|wisdom|wis|charisma|cha)\s+(?:check|save|saving\s+throw)\b",
            DetectionKind::AbilityCheck,
            0.8,
        ),
        (
            r"(?i)\b(?:acrobatics|animal\s+handling|arcana|athletics|deception|history|insight|intimidation|investigation|medicine|nature|perception|performance|persuasion|religion|sleight\s+of\s+hand|stealth|survival)\s+check\b",
            DetectionKind::SkillCheck,
            0.8,
        ),
        (
            r"(?i)\bdeath\s+sav(?:e|ing\s+throw)\b",
            DetectionKind::Special,
            0.8,
        ),
        (
            r"(?i)\bconcentration\s+(?:check|save|saving\s+throw)\b",
            DetectionKind::Special,
            0.7,
        ),
        (
            r"(?i)\b(?:roll\s+(?:for\s+)?)?initiative\b",
            DetectionKind::Initiative,
            0.7,
        ),
    ]
    .into_iter()
    .map(|(pattern, kind, confidence)| {
        (Regex::new(pattern).expect("contextual pattern"), kind, confidence)
    })
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionKind {
    Notation,
    AbilityCheck,
    SkillCheck,
    Initiative,
    Special,
}

impl DetectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notation => "notation",
            Self::AbilityCheck => "ability_check",
            Self::SkillCheck => "skill_check",
            Self::Initiative => "initiative",
            Self::Special => "special",
        }
    }
}

impl std::fmt::Display for DetectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate expression and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub expression: String,
    /// In [0, 1]
    pub confidence: f64,
    pub kind: DetectionKind,
    pub matched: String,
    /// Byte span in the scanned text
    pub start: usize,
    pub end: usize,
}

/// Scans free text for dice candidates.
pub struct DetectDice;

impl DetectDice {
    pub fn new() -> Self {
        Self
    }

    /// Candidates ordered by position. A match overlapping an earlier one is
    /// skipped; at equal positions direct notation wins.
    pub fn execute(&self, text: &str) -> Vec<Detection> {
        let mut candidates: Vec<Detection> = Vec::new();

        for m in NOTATION.find_iter(text) {
            let expression: String = m.as_str().chars().filter(|c| !c.is_whitespace()).collect();
            if let Err(e) = DiceExpression::parse(&expression) {
                tracing::trace!(candidate = %expression, error = %e, "Skipping unparsable notation");
                continue;
            }
            let mut confidence = NOTATION_CONFIDENCE;
            if expression.to_ascii_lowercase().contains("d20") {
                confidence += D20_BONUS;
            }
            candidates.push(Detection {
                expression,
                confidence,
                kind: DetectionKind::Notation,
                matched: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            });
        }

        for (pattern, kind, confidence) in CONTEXTUAL.iter() {
            for m in pattern.find_iter(text) {
                candidates.push(Detection {
                    expression: CONTEXTUAL_EXPRESSION.to_string(),
                    confidence: *confidence,
                    kind: *kind,
                    matched: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                });
            }
        }

        // Stable sort keeps notation ahead of contextual matches at the same start.
        candidates.sort_by_key(|d| d.start);

        let mut accepted: Vec<Detection> = Vec::with_capacity(candidates.len());
        for mut candidate in candidates {
            if accepted.last().is_some_and(|prev| candidate.start < prev.end) {
                continue;
            }
            if is_negated(text, candidate.start) {
                candidate.confidence *= NEGATION_FACTOR;
            }
            candidate.confidence = candidate.confidence.clamp(0.0, 1.0);
            accepted.push(candidate);
        }

        tracing::debug!(found = accepted.len(), "Scanned text for dice");
        accepted
    }
}

impl Default for DetectDice {
    fn default() -> Self {
        Self::new()
    }
}

fn is_negated(text: &str, start: usize) -> bool {
    let mut from = start.saturating_sub(NEGATION_WINDOW);
    while !text.is_char_boundary(from) {
        from -= 1;
    }
    NEGATION.is_match(&text[from..start])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> Vec<Detection> {
        DetectDice::new().execute(text)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_direct_notation() {
        let found = detect("I attack! Roll 1d20+5 to hit, then 2d6 + 3 damage.");
        assert_eq!(found.len(), 2);

        assert_eq!(found[0].expression, "1d20+5");
        assert_eq!(found[0].kind, DetectionKind::Notation);
        assert!(approx(found[0].confidence, 0.95));

        assert_eq!(found[1].expression, "2d6+3");
        assert_eq!(found[1].matched, "2d6 + 3");
        assert!(approx(found[1].confidence, 0.9));
        assert!(found[0].start < found[1].start);
    }

    #[test]
    fn test_span_points_at_match() {
        let text = "roll 4d6dl1 for stats";
        let found = detect(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], "4d6dl1");
    }

    #[test]
    fn test_mechanics_and_shorthand() {
        let found = detect("with advantage: 1D20ADV, or just d20");
        let expressions: Vec<&str> = found.iter().map(|d| d.expression.as_str()).collect();
        assert_eq!(expressions, vec!["1D20ADV", "d20"]);
    }

    #[test]
    fn test_invalid_notation_is_skipped() {
        assert!(detect("roll a 1d7 please").is_empty());
    }

    #[test]
    fn test_contextual_phrases() {
        let found = detect("Make a Strength check, then a stealth check.");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, DetectionKind::AbilityCheck);
        assert_eq!(found[0].expression, "1d20");
        assert!(approx(found[0].confidence, 0.8));
        assert_eq!(found[1].kind, DetectionKind::SkillCheck);

        let found = detect("Everyone roll initiative");
        assert_eq!(found[0].kind, DetectionKind::Initiative);
        assert_eq!(found[0].matched, "roll initiative");

        let found = detect("time for a death saving throw and a concentration check");
        let kinds: Vec<DetectionKind> = found.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DetectionKind::Special, DetectionKind::Special]);
    }

    #[test]
    fn test_contextual_below_direct_confidence() {
        let direct = detect("1d20")[0].confidence;
        let contextual = detect("wisdom save")[0].confidence;
        assert!(contextual < direct);
        assert!((0.6..=0.8).contains(&contextual));
    }

    #[test]
    fn test_negation_reduces_confidence() {
        let found = detect("Please don't roll 1d20 yet");
        assert_eq!(found.len(), 1);
        assert!(approx(found[0].confidence, 0.95 * 0.3));

        let found = detect("You do not need a dex save here");
        assert!(approx(found[0].confidence, 0.8 * 0.3));
    }

    #[test]
    fn test_repeated_phrases_do_not_overlap() {
        let found = detect("roll initiative initiative");
        assert_eq!(found.len(), 2);
        assert!(found[0].end <= found[1].start);
    }

    #[test]
    fn test_no_candidates() {
        assert!(detect("The tavern is quiet tonight.").is_empty());
        assert!(detect("").is_empty());
        assert!(detect("add 2 + 3").is_empty());
    }

    #[test]
    fn test_confidence_in_unit_range() {
        for d in detect("roll 1d20adv, d20, str save, initiative, never 2d6") {
            assert!((0.0..=1.0).contains(&d.confidence));
        }
    }

    #[test]
    fn test_negation_window_respects_char_boundaries() {
        let found = detect("ééééééééééééééééééé never 1d6");
        assert_eq!(found.len(), 1);
        assert!(approx(found[0].confidence, 0.9 * 0.3));
    }
}
