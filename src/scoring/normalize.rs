/// Normalize text for error-rate comparison.
///
/// Lower-cases the input and keeps only ASCII letters, digits, and Hangul
/// syllable blocks; everything else (whitespace and punctuation included) is
/// dropped. Total and idempotent: normalizing twice equals normalizing once.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| is_scored(*c))
        .collect()
}

fn is_scored(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '\u{AC00}'..='\u{D7A3}')
}
