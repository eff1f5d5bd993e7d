//! Title to file name conversion.

use crate::fold::fold_to_ascii;

pub const DEFAULT_SUBSTITUTION: char = '_';

/// Stem written in place of a reserved device name.
pub const RESERVED_REPLACEMENT: &str = "_reservedWord_";

const RESERVED_NAMES: &[&str] = &[
    "AUX", "CON", "CLOCK$", "NUL", "PRN", "COM0", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6",
    "COM7", "COM8", "COM9", "LPT0", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7",
    "LPT8", "LPT9",
];

#[cfg(windows)]
pub fn is_invalid_filename_char(ch: char) -> bool {
    matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || (ch as u32) < 0x20
}

#[cfg(not(windows))]
pub fn is_invalid_filename_char(ch: char) -> bool {
    ch == '/' || ch == '\0'
}

pub fn is_reserved_name(stem: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
}

/// Slug used in record file names: folded to ASCII, lowercased, sanitized.
pub fn sanitize_title(title: &str) -> String {
    let folded = fold_to_ascii(title.trim()).to_lowercase();
    sanitize_filename(&folded, DEFAULT_SUBSTITUTION)
}

/// Replaces whitespace and characters the host rejects in file names with
/// `substitution`, collapsing runs, and guards reserved device names.
pub fn sanitize_filename(name: &str, substitution: char) -> String {
    let mut clean = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_whitespace() || is_invalid_filename_char(ch) || ch == substitution {
            if !clean.ends_with(substitution) {
                clean.push(substitution);
            }
        } else {
            clean.push(ch);
        }
    }

    if clean.ends_with('.') {
        clean.truncate(clean.trim_end_matches('.').len());
        if !clean.ends_with(substitution) {
            clean.push(substitution);
        }
    }

    let stem_len = clean.find('.').unwrap_or(clean.len());
    if is_reserved_name(&clean[..stem_len]) {
        clean.replace_range(..stem_len, RESERVED_REPLACEMENT);
    }
    clean
}
