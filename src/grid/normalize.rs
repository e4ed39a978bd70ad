//! Text canonicalization used to decide near-equality between question
//! titles.
//!
//! Both functions are pure walks over code points with an explicit
//! punctuation table, so the behavior does not depend on any regex dialect.

/// ASCII punctuation removed during normalization. Hyphens are kept, they
/// are significant in titles ("punto 2-b").
const STRIPPED_PUNCTUATION: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '.', '/', ':', ';', '<', '=',
    '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~',
];

/// Canonicalize a title: lower-case, drop one leading ordinal prefix
/// ("1.", "a)"), strip punctuation, collapse whitespace runs, trim.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = strip_ordinal_prefix(&lowered);
    let depunctuated: String = stripped
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    depunctuated.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonicalize a single display token for lookup against the missing/extra
/// word sets. No ordinal stripping at token level: "1." must reduce to "1",
/// not vanish into the set of a following word.
pub fn normalize_token(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect()
}

/// Remove one leading `<alnum><. or )>` ordinal such as "1." or "a)" plus
/// the whitespace around it. Expects already lower-cased input.
fn strip_ordinal_prefix(text: &str) -> &str {
    let trimmed = text.trim_start();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(sep))
            if first.is_ascii_alphanumeric() && (sep == '.' || sep == ')') =>
        {
            trimmed[first.len_utf8() + sep.len_utf8()..].trim_start()
        }
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_ordinal_prefix_and_case() {
        assert_eq!(normalize("1. El perro corre"), "el perro corre");
        assert_eq!(normalize("a) Aprobación de la memoria"), "aprobación de la memoria");
    }

    #[test]
    fn only_single_char_ordinals_are_stripped() {
        // "12." is not a single alnum prefix, only the punctuation goes
        assert_eq!(normalize("12. Tema"), "12 tema");
    }

    #[test]
    fn strips_punctuation_but_keeps_hyphens() {
        assert_eq!(normalize("¿Aprueba, o no?"), "¿aprueba o no");
        assert_eq!(normalize("Punto 2-b (final)."), "punto 2-b final");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("  El \t perro \u{a0} corre  "), "el perro corre");
    }

    #[test]
    fn token_normalization_keeps_ordinals() {
        assert_eq!(normalize_token("1."), "1");
        assert_eq!(normalize_token("Corre,"), "corre");
        assert_eq!(normalize_token("El"), "el");
    }
}
