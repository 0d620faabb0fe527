//! Canonical form for recognized text.
//!
//! Lowercases, decomposes to NFD and drops every combining mark, then
//! recomposes so that scripts whose base characters decompose (e.g. Hangul)
//! come back in their usual form.  `"Één FOTO"` and `"een foto"` normalize to
//! the same string, which is what every intent pattern is written against.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a raw transcript for matching.
///
/// Total on every input and idempotent:
///
/// ```
/// use jarvis_voice::transcript::normalize;
///
/// assert_eq!(normalize("Toon FOTO van crème brûlée"), "toon foto van creme brulee");
/// assert_eq!(normalize(""), "");
/// let once = normalize("Ça Va?");
/// assert_eq!(normalize(&once), once);
/// ```
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_ascii() {
        assert_eq!(normalize("Jarvis WAKE Up"), "jarvis wake up");
    }

    #[test]
    fn strips_dutch_diacritics() {
        assert_eq!(normalize("ideeën"), "ideeen");
        assert_eq!(normalize("één"), "een");
        assert_eq!(normalize("café"), "cafe");
    }

    #[test]
    fn strips_precomposed_and_decomposed_forms_alike() {
        let precomposed = "caf\u{e9}";
        let decomposed = "cafe\u{301}";
        assert_eq!(normalize(precomposed), normalize(decomposed));
    }

    #[test]
    fn empty_string_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn keeps_punctuation_and_whitespace() {
        assert_eq!(normalize("  Zeg: hallo!  "), "  zeg: hallo!  ");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "Jarvis, word WAKKER",
            "Toon een foto van Ærø en Škoda",
            "İstanbul",
            "한국어 텍스트",
            "Ünïcödé ẞ straße",
            "",
            "  \t\n",
            "e\u{301}\u{302}\u{303}",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn hangul_is_recomposed() {
        assert_eq!(normalize("한국"), "한국");
    }
}
