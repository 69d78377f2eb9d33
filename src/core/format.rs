//! Display formatting helpers for faro.
//!
//! Turns raw entry metadata into the strings shown in the table and tree
//! panes: human-readable sizes, timestamps, the platform permission string
//! and width-clipped cells.

use std::fs::Metadata;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use humansize::{DECIMAL, format_size};
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Timestamp format used in all time columns.
pub const DATE_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable size for the Size column.
pub fn format_entry_size(size: u64) -> String {
    format_size(size, DECIMAL)
}

/// Local-time timestamp, or an empty string for an absent time.
pub fn format_entry_time(time: Option<SystemTime>) -> String {
    match time {
        Some(t) => DateTime::<Local>::from(t).format(DATE_FMT).to_string(),
        None => String::new(),
    }
}

/// Platform-native permission string. Opaque to the rest of faro.
#[cfg(unix)]
pub fn format_permissions(md: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = md.permissions().mode();
    let kind = if md.is_dir() {
        'd'
    } else if md.file_type().is_symlink() {
        'l'
    } else {
        '-'
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(not(unix))]
pub fn format_permissions(md: &Metadata) -> String {
    if md.permissions().readonly() {
        "r--".to_string()
    } else {
        "rw-".to_string()
    }
}

/// Clips a cell to at most `width` display columns, ending in `…` when
/// something was cut.
pub fn clip_to_width(s: &str, width: usize) -> String {
    if UnicodeWidthStr::width(s) <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
