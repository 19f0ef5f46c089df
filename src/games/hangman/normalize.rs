/// Accent folding used by every letter comparison in the game.
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Decompose `text` (NFD) and drop the combining marks, leaving base letters.
///
/// `"león"` becomes `"leon"`, `"españa"` becomes `"espana"`.
pub fn normalize_text(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Fold a single character to its lowercase, unaccented base letter.
///
/// Returns `None` when nothing but combining marks is left.
pub fn normalize_char(c: char) -> Option<char> {
    c.to_lowercase().nfd().find(|c| !is_combining_mark(*c))
}
