//! Host message-table lookup for platform-native status codes.
//!
//! The status renderer never talks to the OS directly; it goes through
//! the [`MessageTable`] trait so the lookup can be swapped out in tests.
//! The real backend, [`HostMessageTable`], exists only on Windows where
//! native status codes are resolved against the system message table via
//! `FormatMessageW`.

/// Fallback text when the host message table has no entry for a code.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// A message table mapping native status codes to localized text.
///
/// Implementations return the table text as-is. In particular they must
/// not trim trailing whitespace the host facility appends; callers that
/// care about it handle it themselves.
pub trait MessageTable {
    /// Look up the text for `code`, or `None` when the table has no entry.
    fn message(&self, code: u32) -> Option<String>;
}

/// Render `code` through `table`, falling back to [`UNKNOWN_ERROR`] when
/// the table has no entry.
pub fn render(code: u32, table: &dyn MessageTable) -> String {
    table
        .message(code)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// The Windows system message table.
///
/// Lookups are locale-sensitive: the same code renders differently under
/// different UI languages. `FORMAT_MESSAGE_MAX_WIDTH_MASK` collapses the
/// message's line breaks, which leaves a trailing space on most entries;
/// that space is preserved.
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct HostMessageTable;

#[cfg(windows)]
impl MessageTable for HostMessageTable {
    fn message(&self, code: u32) -> Option<String> {
        use winapi::um::winbase::{
            FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
            FORMAT_MESSAGE_MAX_WIDTH_MASK,
        };

        let mut buf = [0u16; 1024];
        // SAFETY: buf is a valid wide-char buffer for the whole call and
        // FormatMessageW writes at most buf.len() characters into it.
        let len = unsafe {
            FormatMessageW(
                FORMAT_MESSAGE_FROM_SYSTEM
                    | FORMAT_MESSAGE_IGNORE_INSERTS
                    | FORMAT_MESSAGE_MAX_WIDTH_MASK,
                std::ptr::null(),
                code,
                0,
                buf.as_mut_ptr(),
                buf.len() as u32,
                std::ptr::null_mut(),
            )
        };
        if len == 0 {
            None
        } else {
            Some(String::from_utf16_lossy(&buf[..len as usize]))
        }
    }
}
