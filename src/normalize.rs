use crate::glyph::{self, QUOTE};

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replaces operator keywords (`and`, `implies`, `true`, ...) with their glyphs.
///
/// Keywords match case-insensitively and only as whole words, so `notequals`
/// stays one keyword and `color` keeps its `or`. Quoted names are copied
/// untouched, as is everything else, so glyphs may also be typed directly.
pub fn normalize(line: &str) -> String {
    let mut normalized = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if c == QUOTE {
            let end = rest[1..]
                .find(QUOTE)
                .map_or(rest.len(), |close| close + 2);
            normalized.push_str(&rest[..end]);
            rest = &rest[end..];
        } else if is_word(c) {
            let end = rest.find(|c| !is_word(c)).unwrap_or(rest.len());
            let word = &rest[..end];
            match glyph::keyword(word) {
                Some(glyph) => normalized.push(glyph),
                None => normalized.push_str(word),
            }
            rest = &rest[end..];
        } else {
            normalized.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_become_glyphs() {
        assert_eq!(normalize("A and B"), "A ∧ B");
        assert_eq!(normalize("not A"), "¬ A");
        assert_eq!(normalize("A imply B"), "A → B");
        assert_eq!(normalize("A implies B or C xor D"), "A → B ∨ C ⊕ D");
        assert_eq!(normalize("true equals false"), "⊤ = ⊥");
    }

    #[test]
    fn case_does_not_matter() {
        assert_eq!(normalize("A AND b Or NOT c"), "A ∧ b ∨ ¬ c");
    }

    #[test]
    fn only_whole_words_are_replaced() {
        assert_eq!(normalize("A notequals B"), "A ≠ B");
        assert_eq!(normalize("color and orange"), "color ∧ orange");
        assert_eq!(normalize("untrue"), "untrue");
    }

    #[test]
    fn glyphs_and_parentheses_pass_through() {
        assert_eq!(normalize("(A∧B)→¬C"), "(A∧B)→¬C");
        assert_eq!(normalize("(A and(B))"), "(A ∧(B))");
    }

    #[test]
    fn quoted_names_are_untouched() {
        assert_eq!(normalize("`salt and pepper` or A"), "`salt and pepper` ∨ A");
        assert_eq!(normalize("`open and"), "`open and");
    }
}
