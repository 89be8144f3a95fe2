//! Shared utility functions used across the codebase.

/// Interpret a flag value as a boolean.
///
/// Recognises `1`, `true`, `yes`, `y`, `on` (case-insensitive) as `true`;
/// everything else maps to `false`.
pub fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// Parse the leading integer of a string (`"30 min"` is 30, `"12.7"` is 12).
///
/// Accepts an optional sign and ignores surrounding whitespace. Returns
/// `None` when no digits lead the string.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    rest[..digits_len].parse::<i64>().ok().map(|n| sign * n)
}
