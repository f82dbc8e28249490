//! Uppercasing and string generation.

use super::Capitalization;

/// Uppercase `text` using the Unicode case mapping.
pub fn uppercase(text: &str) -> String {
    text.to_uppercase()
}

/// Apply `capitalization` to `message`, then concatenate `duplication_factor`
/// copies of the result with no separator.
pub fn generate(
    message: &str,
    duplication_factor: usize,
    capitalization: Option<Capitalization>,
) -> String {
    match capitalization {
        Some(case) => case.apply(message).repeat(duplication_factor),
        None => message.repeat(duplication_factor),
    }
}

/// Byte length of what [`generate`] would return, without building it.
///
/// Returns `None` when the length does not fit in `usize`.
pub fn generated_len(
    message: &str,
    duplication_factor: usize,
    capitalization: Option<Capitalization>,
) -> Option<usize> {
    let unit = match capitalization {
        Some(Capitalization::Upper) => message
            .chars()
            .flat_map(char::to_uppercase)
            .map(char::len_utf8)
            .sum(),
        // Final sigma handling swaps two-byte forms only, so per-char mapping
        // gives the same byte count as `str::to_lowercase`.
        Some(Capitalization::Lower) => message
            .chars()
            .flat_map(char::to_lowercase)
            .map(char::len_utf8)
            .sum(),
        None => message.len(),
    };
    unit.checked_mul(duplication_factor)
}
