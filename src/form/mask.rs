//! Identifier input masking.
//!
//! Reformats digit-led input into the grouped national ID display format
//! (`ddd.ddd.ddd-dd`) as digits accumulate. Email-shaped input passes
//! through untouched.

/// Specify maximum digit count for a national ID.
///
const MAX_ID_DIGITS: usize = 11;

/// Apply the national ID display mask to the current field value. If the
/// first character is not a digit the value is treated as email entry and
/// returned unmodified. Re-applying the mask to an already-masked value
/// yields the same string.
///
pub fn mask_identifier_input(value: &str) -> String {
    match value.chars().next() {
        Some(first) if first.is_ascii_digit() => (),
        _ => return value.to_string(),
    }

    let mut masked = String::with_capacity(MAX_ID_DIGITS + 3);
    let digits = value
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_ID_DIGITS);
    for (position, digit) in digits.enumerate() {
        match position {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => (),
        }
        masked.push(digit);
    }
    masked
}
