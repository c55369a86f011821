//! Discipline normalization.
//!
//! Accreditation certificates list disciplines as free text ("Chemical &
//! Biological", "NDT\nMechanical", ...). This module collapses those variants
//! into a fixed vocabulary of canonical labels so they can be filtered on.

/// How a rule recognises a discipline piece. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// The piece contains the needle anywhere.
    Contains(&'static str),
    /// The piece contains the needle as a whole alphanumeric word.
    Word(&'static str),
}

impl Matcher {
    /// Test a lower-cased piece against this matcher.
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Matcher::Contains(needle) => lowered.contains(needle),
            Matcher::Word(word) => lowered
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == *word),
        }
    }
}

/// A single (predicate, canonical label) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisciplineRule {
    pub matcher: Matcher,
    pub label: &'static str,
}

const fn rule(matcher: Matcher, label: &'static str) -> DisciplineRule {
    DisciplineRule { matcher, label }
}

/// Ordered rule table. The first matching rule wins.
pub const DISCIPLINE_RULES: &[DisciplineRule] = &[
    rule(Matcher::Contains("non-destructive"), "Non-Destructive Testing"),
    rule(Matcher::Contains("non destructive"), "Non-Destructive Testing"),
    rule(Matcher::Word("ndt"), "Non-Destructive Testing"),
    rule(Matcher::Contains("chemical"), "Chemical"),
    rule(Matcher::Contains("biological"), "Biological"),
    rule(Matcher::Contains("mechanical"), "Mechanical"),
    rule(Matcher::Contains("electrical"), "Electrical"),
    rule(Matcher::Contains("electronic"), "Electronics"),
    rule(Matcher::Contains("fluid"), "Fluid Flow"),
    rule(Matcher::Contains("photometr"), "Photometry"),
    rule(Matcher::Contains("radiolog"), "Radiological"),
    rule(Matcher::Contains("thermal"), "Thermal"),
    rule(Matcher::Contains("forensic"), "Forensic"),
    rule(Matcher::Contains("diagnostic"), "Diagnostics"),
    rule(Matcher::Contains("food"), "Food & Agriculture"),
    rule(Matcher::Contains("software"), "Software & IT"),
    rule(Matcher::Word("it"), "Software & IT"),
];

/// Map a single trimmed discipline piece to its canonical label.
///
/// Pieces that match no rule are returned unchanged.
pub fn canonical_label(piece: &str) -> String {
    let lowered = piece.to_lowercase();
    DISCIPLINE_RULES
        .iter()
        .find(|rule| rule.matcher.matches(&lowered))
        .map(|rule| rule.label.to_string())
        .unwrap_or_else(|| piece.to_string())
}

/// Split a raw discipline field into canonical labels.
///
/// Line breaks become spaces, the text is split on `,` and `&`, empty pieces
/// are dropped, and each piece is mapped through [`DISCIPLINE_RULES`]. Order of
/// appearance is preserved and duplicates are kept.
pub fn normalize_disciplines(raw: &str) -> Vec<String> {
    raw.replace(['\r', '\n'], " ")
        .split([',', '&'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(canonical_label)
        .collect()
}

/// Re-normalize a list of labels one by one.
///
/// Applying this to the output of [`normalize_disciplines`] is a no-op.
pub fn normalize_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .map(|label| canonical_label(label.as_ref().trim()))
        .collect()
}
