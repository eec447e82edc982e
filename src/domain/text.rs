//! Line-break folding for free-text fields.

/// Replace every `\n` and `\r` with a single space.
///
/// Replacement is character-for-character, so runs such as `\r\n` become two
/// spaces and the character count is preserved. An absent value normalizes
/// to the empty string.
#[must_use]
pub fn normalize(text: Option<&str>) -> String {
    text.map_or_else(String::new, |text| {
        text.chars()
            .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
            .collect()
    })
}
