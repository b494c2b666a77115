//! Language resolution for generation requests.

use whatlang::Lang;

use crate::types::Language;

/// How much of the input the detector looks at.
const DETECTION_PREFIX_CHARS: usize = 1000;

/// Resolve `Auto` to a concrete output language.
///
/// Detection runs once, on a bounded prefix of the text, before any
/// model call. Failed detection and unsupported languages fall back to
/// English.
pub fn resolve_language(requested: Language, text: &str) -> Language {
    if requested != Language::Auto {
        return requested;
    }

    let prefix: String = text.chars().take(DETECTION_PREFIX_CHARS).collect();
    if prefix.trim().is_empty() {
        return Language::English;
    }

    match whatlang::detect_lang(&prefix) {
        Some(Lang::Tur) => Language::Turkish,
        Some(Lang::Eng) => Language::English,
        // Detected but unsupported, or undetectable
        _ => Language::English,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_language_passes_through() {
        assert_eq!(
            resolve_language(Language::Turkish, "any text at all"),
            Language::Turkish
        );
    }

    #[test]
    fn test_detects_english() {
        let text = "The quick brown fox jumps over the lazy dog, and the market \
                    opened higher this morning after strong earnings reports.";
        assert_eq!(resolve_language(Language::Auto, text), Language::English);
    }

    #[test]
    fn test_detects_turkish() {
        let text = "Bugün hava çok güzel ve arkadaşlarımla birlikte parkta yürüyüş \
                    yaptık. Daha sonra birlikte kahve içtik ve sohbet ettik.";
        assert_eq!(resolve_language(Language::Auto, text), Language::Turkish);
    }

    #[test]
    fn test_empty_text_falls_back_to_english() {
        assert_eq!(resolve_language(Language::Auto, "   "), Language::English);
    }
}
