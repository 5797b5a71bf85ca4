use unicode_normalization::UnicodeNormalization;

/// Fold text for matching: NFC so composed and decomposed forms of the
/// same letter compare equal, then lowercase.
pub fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::fold;

    #[test]
    fn lowercases() {
        assert_eq!(fold("Katt"), "katt");
        assert_eq!(fold("RÄKNEORD"), "räkneord");
    }

    #[test]
    fn composes_decomposed_letters() {
        // "a" + combining ring above vs precomposed "å"
        assert_eq!(fold("a\u{30a}"), "å");
    }
}
