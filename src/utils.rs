//! Common utility functions shared across the codebase.

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use glossa::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("你好"));
/// assert!(!contains_alphabetic("42"));
/// assert!(!contains_alphabetic("---"));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Replace the trimmed content of `text`, keeping its leading and trailing
/// whitespace.
///
/// ```
/// use glossa::utils::replace_trimmed;
///
/// assert_eq!(replace_trimmed("\n  Hello  ", "Hallo"), "\n  Hallo  ");
/// ```
pub fn replace_trimmed(text: &str, replacement: &str) -> String {
    let start = text.len() - text.trim_start().len();
    let end = text.trim_end().len().max(start);
    format!("{}{}{}", &text[..start], replacement, &text[end..])
}
