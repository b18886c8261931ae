//! Text normalisation applied before transliteration and synthesis

/// Normalise text for speech synthesis.
///
/// Collapses every whitespace run into a single space, folds typographic
/// single quotes and backticks into `'`, folds typographic double quotes into
/// `"` and trims the result.
pub fn clean_text(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut pending_space = false;

    for ch in input.chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space && !cleaned.is_empty() {
            cleaned.push(' ');
        }
        pending_space = false;

        cleaned.push(match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '`' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
            other => other,
        });
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(clean_text("hello   \n\t world"), "hello world");
    }

    #[test]
    fn trims_both_ends() {
        assert_eq!(clean_text("   padded text \n"), "padded text");
    }

    #[test]
    fn folds_curly_quotes() {
        assert_eq!(
            clean_text("\u{201C}It\u{2019}s fine\u{201D}"),
            "\"It's fine\""
        );
    }

    #[test]
    fn folds_backtick() {
        assert_eq!(clean_text("don`t"), "don't");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(clean_text(" \t\n "), "");
    }

    #[test]
    fn keeps_devanagari() {
        assert_eq!(clean_text("  नमस्ते   दुनिया "), "नमस्ते दुनिया");
    }

    proptest! {
        #[test]
        fn cleaning_is_idempotent(s in "\\PC*") {
            let once = clean_text(&s);
            prop_assert_eq!(clean_text(&once), once);
        }

        #[test]
        fn never_contains_double_spaces(s in "[a-z \\t\\n]{0,64}") {
            let cleaned = clean_text(&s);
            prop_assert!(!cleaned.contains("  "));
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        }
    }
}
