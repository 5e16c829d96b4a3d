/// Lowercases, collapses every whitespace run to a single space and trims.
///
/// This is the normal form fed to keyword matching and the role classifier.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Alphabetic word tokens (apostrophes kept inside words) with their
/// original casing.
pub fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphabetic() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Senior\tPython\n\nDeveloper  "), "senior python developer");
    }

    #[test]
    fn test_clean_text_empty() {
        assert_eq!(clean_text(" \n\t "), "");
    }

    #[test]
    fn test_words_strip_punctuation_and_digits() {
        assert_eq!(
            words("Led 5 engineers; didn't miss 'deadlines'."),
            vec!["Led", "engineers", "didn't", "miss", "deadlines"]
        );
    }
}
