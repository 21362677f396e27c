//! String helpers

/// Check whether a string is empty or contains only whitespace
pub fn is_blank(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

/// Inverse of [`is_blank`]
pub fn not_blank(s: &str) -> bool {
    !is_blank(s)
}
