//! Suggest expressions use case.

const MAX_SUGGESTIONS: usize = 10;

/// Common rolls, most general first.
const COMMON: [&str; 10] = [
    "1d20", "1d20+5", "2d6", "1d8+3", "4d6dl1", "1d20adv", "1d20dis", "1d4", "3d6", "1d12+2",
];

/// Context keywords and the expressions they promote, first match wins.
const CONTEXTUAL: [(&[&str], &[&str]); 5] = [
    (&["attack"], &["1d20+5", "1d20adv"]),
    (&["damage"], &["1d8+3", "2d6"]),
    (&["save", "saving"], &["1d20+3"]),
    (&["ability", "stat"], &["4d6dl1"]),
    (&["initiative"], &["1d20+2"]),
];

/// Returns up to ten common expressions, reordered for a context word.
pub struct SuggestExpressions;

impl SuggestExpressions {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, context: Option<&str>) -> Vec<String> {
        let context = context.unwrap_or_default().to_lowercase();
        let promoted: &[&str] = CONTEXTUAL
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| context.contains(k)))
            .map(|(_, promoted)| *promoted)
            .unwrap_or_default();

        let mut suggestions: Vec<String> = Vec::with_capacity(MAX_SUGGESTIONS);
        for expression in promoted.iter().chain(COMMON.iter()) {
            if suggestions.len() == MAX_SUGGESTIONS {
                break;
            }
            if !suggestions.iter().any(|s| s == expression) {
                suggestions.push((*expression).to_string());
            }
        }
        suggestions
    }
}

impl Default for SuggestExpressions {
    fn default() -> Self {
        Self::new()
    }
}
