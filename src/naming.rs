//! Symbol names for generated code
//!
//! A name is derived from a path by dropping everything up to the last
//! separator (or the `!` package-root marker) and the trailing extension,
//! then made safe to use as a C identifier.

use crate::error::{InchError, Result};

/// Characters that end the basename scan
const SEPARATORS: [char; 3] = ['/', '\\', STOP_MARKER];

/// Marker for package-root-relative paths, e.g. `!media`
pub const STOP_MARKER: char = '!';

/// Basename of `input` without its extension.
///
/// A dotfile keeps its name without the leading dot, so `.hidden` gives
/// `hidden` and `.tar.gz` gives `tar`.
pub fn file_stem(input: &str) -> &str {
    let tail = match input.rfind(SEPARATORS) {
        Some(idx) => &input[idx + 1..],
        None => input,
    };

    let stem = match tail.rfind('.') {
        Some(0) => tail,
        Some(dot) => &tail[..dot],
        None => tail,
    };

    stem.strip_prefix('.').unwrap_or(stem)
}

/// Derive a C identifier from a path or filename.
///
/// Characters outside `[A-Za-z0-9_]` become `_` and a leading digit gets a
/// `_` prefix. Inputs with no usable basename (`media/`, `.`) are rejected.
pub fn derive_name(input: &str) -> Result<String> {
    let stem = file_stem(input);
    if stem.is_empty() {
        return Err(InchError::InvalidName(input.to_string()));
    }

    let mut name = String::with_capacity(stem.len() + 1);
    if stem.starts_with(|c: char| c.is_ascii_digit()) {
        name.push('_');
    }
    name.extend(stem.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' {
            c
        } else {
            '_'
        }
    }));

    Ok(name)
}
