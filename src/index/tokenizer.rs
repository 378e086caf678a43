use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

static IDENTIFIER: OnceLock<Regex> = OnceLock::new();

/// Splits source text into the set of lowercased identifier-like terms.
/// Very short terms carry almost no signal for code search and are dropped.
pub fn tokenize_text(text: &str) -> HashSet<String> {
    let re = IDENTIFIER
        .get_or_init(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern compiles"));
    re.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|term| term.len() > 2)
        .collect()
}
