//! The `Status` value type: domain-tagged error codes with lazy rendering.
//!
//! A debugger meets errors from several incompatible numbering spaces at
//! once: errno values from ptrace and syscalls, native status codes from
//! the host OS, result codes from the expression evaluator, and plain
//! text from everything else. [`Status`] folds them into one value with
//! uniform success/failure queries, a lazily computed (and cached)
//! human-readable message, and conversions to and from the composable
//! [`CompositeError`] chain used for error propagation.

use std::fmt;
use std::sync::OnceLock;

use crate::composite::{Category, CompositeError, LeafError};
use crate::expr_result;
#[cfg(windows)]
use crate::native;

/// Identifies which numbering/message space a status code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorDomain {
    /// No domain set. A status in this domain is always a success.
    Invalid,
    /// Opaque textual message; the text is the sole representation and
    /// there is no numeric code.
    Generic,
    /// POSIX errno, rendered via the standard errno string table.
    Errno,
    /// Native Windows status code, rendered via the system message table.
    /// Only meaningful (and only present) on Windows hosts.
    #[cfg(windows)]
    Win32,
    /// Expression evaluator result code.
    Expression,
}

/// Tagged storage. Each variant fixes how its payload is interpreted, so
/// an errno value can never be read as a native code or vice versa.
#[derive(Debug, Clone, Default)]
enum Repr {
    #[default]
    Success,
    Message(String),
    Errno(i32),
    #[cfg(windows)]
    Win32(u32),
    Expression(i32),
}

/// An error-status value unifying the error domains debugger code meets.
///
/// `Status` is a plain value: cheap to create, freely cloned, no resource
/// ownership. The message is not computed until first requested and is
/// then cached inside the instance; rendering is deterministic for a
/// given domain and code, so cloning before or after rendering makes no
/// observable difference. A shared, unmutated instance may be read from
/// several threads.
#[derive(Debug, Clone, Default)]
pub struct Status {
    repr: Repr,
    rendered: OnceLock<String>,
}

impl Status {
    fn from_repr(repr: Repr) -> Status {
        Status {
            repr,
            rendered: OnceLock::new(),
        }
    }

    /// Build a status from a numeric code and an explicit domain.
    ///
    /// The pair is stored verbatim and no message is computed yet.
    /// `Invalid` ignores the code; `Generic` carries no numeric code, so
    /// the result reads as success until a message is assigned.
    pub fn new(code: i64, domain: ErrorDomain) -> Status {
        let repr = match domain {
            ErrorDomain::Invalid => Repr::Success,
            ErrorDomain::Generic => Repr::Message(String::new()),
            ErrorDomain::Errno => Repr::Errno(code as i32),
            #[cfg(windows)]
            ErrorDomain::Win32 => Repr::Win32(code as u32),
            ErrorDomain::Expression => Repr::Expression(code as i32),
        };
        Status::from_repr(repr)
    }

    /// Build a generic status from a pre-formatted message.
    ///
    /// The text is stored verbatim. An empty message is the generic
    /// domain's success sentinel.
    pub fn from_message(message: impl Into<String>) -> Status {
        Status::from_repr(Repr::Message(message.into()))
    }

    /// Build a generic status from format arguments, rendered immediately.
    ///
    /// ```
    /// # use rstatus::Status;
    /// let status = Status::from_fmt(format_args!("bad register {}", "r99"));
    /// assert_eq!(status.message(), Some("bad register r99"));
    /// ```
    pub fn from_fmt(args: fmt::Arguments<'_>) -> Status {
        Status::from_message(fmt::format(args))
    }

    /// Build a status from a POSIX errno value.
    pub fn from_errno_code(code: i32) -> Status {
        Status::from_repr(Repr::Errno(code))
    }

    /// Capture the calling thread's current errno.
    #[cfg(unix)]
    pub fn from_errno() -> Status {
        Status::from_errno_code(nix::errno::Errno::last_raw())
    }

    /// Build a status from a native Windows error code.
    #[cfg(windows)]
    pub fn from_win32_error(code: u32) -> Status {
        Status::from_repr(Repr::Win32(code))
    }

    /// Build a status from an expression evaluator result code.
    pub fn from_expression_result(code: i32) -> Status {
        Status::from_repr(Repr::Expression(code))
    }

    /// Build a status by consuming a composite error chain.
    ///
    /// An empty chain becomes success. A single leaf carrying a POSIX
    /// code keeps full numeric fidelity in the errno domain. Everything
    /// else downgrades to the generic domain: one leaf contributes its
    /// description verbatim, several leaves contribute their descriptions
    /// joined with `\n` in chain order, no trailing separator.
    pub fn from_error(error: CompositeError) -> Status {
        let leaves = error.into_leaves();
        if leaves.is_empty() {
            return Status::default();
        }
        if let [leaf] = leaves.as_slice() {
            if let Some((code, Category::Posix)) = leaf.error_code() {
                return Status::from_errno_code(code);
            }
        }
        let text = leaves
            .iter()
            .map(LeafError::description)
            .collect::<Vec<_>>()
            .join("\n");
        Status::from_message(text)
    }

    /// True when this status represents success.
    ///
    /// A default (invalid-domain) status is success, and so is the zero
    /// code of any numeric domain or an empty generic message; the domain
    /// itself stays inspectable either way.
    pub fn success(&self) -> bool {
        match &self.repr {
            Repr::Success => true,
            Repr::Message(text) => text.is_empty(),
            Repr::Errno(code) => *code == 0,
            #[cfg(windows)]
            Repr::Win32(code) => *code == 0,
            Repr::Expression(code) => *code == 0,
        }
    }

    /// True when this status represents a failure.
    pub fn fail(&self) -> bool {
        !self.success()
    }

    /// The error domain this status belongs to.
    pub fn domain(&self) -> ErrorDomain {
        match &self.repr {
            Repr::Success => ErrorDomain::Invalid,
            Repr::Message(_) => ErrorDomain::Generic,
            Repr::Errno(_) => ErrorDomain::Errno,
            #[cfg(windows)]
            Repr::Win32(_) => ErrorDomain::Win32,
            Repr::Expression(_) => ErrorDomain::Expression,
        }
    }

    /// The numeric code, interpreted relative to [`domain`](Self::domain).
    ///
    /// Returns 0 for the invalid and generic domains, which carry no
    /// numeric code.
    pub fn error_code(&self) -> i64 {
        match &self.repr {
            Repr::Success | Repr::Message(_) => 0,
            Repr::Errno(code) => i64::from(*code),
            #[cfg(windows)]
            Repr::Win32(code) => i64::from(*code),
            Repr::Expression(code) => i64::from(*code),
        }
    }

    /// The human-readable message, or `None` on success.
    ///
    /// Computed on first call and cached; later calls return the same
    /// text without recomputing. For the errno domain this is the
    /// standard errno string; for the native Windows domain it is the
    /// system message table's text as-is (trailing whitespace included),
    /// degrading to `"unknown error"` for codes the table does not know.
    pub fn message(&self) -> Option<&str> {
        match &self.repr {
            Repr::Success => None,
            Repr::Message(text) => {
                if text.is_empty() {
                    None
                } else {
                    Some(text.as_str())
                }
            }
            Repr::Errno(code) => (*code != 0)
                .then(|| self.rendered.get_or_init(|| strerror(*code)).as_str()),
            #[cfg(windows)]
            Repr::Win32(code) => (*code != 0).then(|| {
                self.rendered
                    .get_or_init(|| native::render(*code, &native::HostMessageTable))
                    .as_str()
            }),
            Repr::Expression(code) => (*code != 0).then(|| expr_result::describe(*code)),
        }
    }

    /// Convert into the composable error representation.
    ///
    /// Success converts to an empty chain. An errno failure converts to a
    /// leaf carrying `(code, Category::Posix)`, so the numeric code and
    /// category survive a round trip exactly. Every other failing domain
    /// converts to a leaf carrying only the rendered description; its
    /// numeric code is not recoverable from the result. That asymmetry is
    /// deliberate and must not be papered over.
    pub fn to_error(&self) -> CompositeError {
        if self.success() {
            return CompositeError::success();
        }
        match &self.repr {
            Repr::Errno(code) => CompositeError::from_error_code(*code, Category::Posix),
            _ => CompositeError::from_message(self.message().unwrap_or_default()),
        }
    }
}

/// Formats the rendered message, or nothing on success.
///
/// The status contributes only its message string to the formatter, so
/// width and precision behave exactly as they do for `&str`: width pads,
/// precision truncates (`{:.5}` of `"Hello Error"` is `"Hello"`).
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.message().unwrap_or(""))
    }
}

#[cfg(unix)]
impl From<nix::errno::Errno> for Status {
    fn from(errno: nix::errno::Errno) -> Status {
        Status::from_errno_code(errno as i32)
    }
}

impl From<std::io::Error> for Status {
    fn from(error: std::io::Error) -> Status {
        match error.raw_os_error() {
            #[cfg(unix)]
            Some(code) => Status::from_errno_code(code),
            #[cfg(windows)]
            Some(code) => Status::from_win32_error(code as u32),
            _ => Status::from_message(error.to_string()),
        }
    }
}

/// The standard errno string for `code`.
#[cfg(unix)]
pub(crate) fn strerror(code: i32) -> String {
    nix::errno::Errno::from_raw(code).desc().to_string()
}

/// The standard errno string for `code`.
#[cfg(windows)]
pub(crate) fn strerror(code: i32) -> String {
    use std::ffi::CStr;
    // SAFETY: CRT strerror returns a pointer into a static buffer that
    // stays valid until the next strerror call on this thread; the text
    // is copied out before returning.
    unsafe {
        let ptr = libc::strerror(code);
        if ptr.is_null() {
            return format!("errno {}", code);
        }
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_success() {
        let status = Status::default();
        assert!(status.success());
        assert!(!status.fail());
        assert_eq!(status.domain(), ErrorDomain::Invalid);
        assert_eq!(status.message(), None);
        assert!(status.to_error().is_success());
    }

    #[test]
    fn generic_message_renders_verbatim() {
        let status = Status::from_message("Hello Status");
        assert!(status.fail());
        assert_eq!(status.domain(), ErrorDomain::Generic);
        assert_eq!(status.message(), Some("Hello Status"));
    }

    #[test]
    fn generic_round_trip_keeps_text() {
        let status = Status::from_message("register read failed");
        let back = Status::from_error(status.to_error());
        assert!(back.fail());
        assert_eq!(back.domain(), ErrorDomain::Generic);
        assert_eq!(back.message(), Some("register read failed"));
    }

    #[test]
    fn empty_generic_message_is_success() {
        let status = Status::from_message("");
        assert!(status.success());
        assert_eq!(status.domain(), ErrorDomain::Generic);
        assert_eq!(status.message(), None);
    }

    #[test]
    fn from_fmt_renders_immediately() {
        let status = Status::from_fmt(format_args!("pid {} not traced", 42));
        assert_eq!(status.message(), Some("pid 42 not traced"));
    }

    #[test]
    fn errno_eagain() {
        let status = Status::from_errno_code(libc::EAGAIN);
        assert!(status.fail());
        assert_eq!(status.domain(), ErrorDomain::Errno);
        assert_eq!(status.error_code(), i64::from(libc::EAGAIN));
        assert!(status.message().is_some());
    }

    #[test]
    fn errno_round_trip_keeps_code_and_category() {
        let error = Status::from_errno_code(libc::EAGAIN).to_error();
        assert!(!error.is_success());
        assert_eq!(
            error.leaves()[0].error_code(),
            Some((libc::EAGAIN, Category::Posix))
        );

        let back = Status::from_error(error);
        assert_eq!(back.domain(), ErrorDomain::Errno);
        assert_eq!(back.error_code(), i64::from(libc::EAGAIN));
    }

    #[test]
    fn from_error_on_posix_chain() {
        let error = CompositeError::from_error_code(libc::EAGAIN, Category::Posix);
        let status = Status::from_error(error);
        assert!(status.fail());
        assert_eq!(status.domain(), ErrorDomain::Errno);
        assert_eq!(status.error_code(), i64::from(libc::EAGAIN));
    }

    #[test]
    fn from_error_on_empty_chain_is_success() {
        let status = Status::from_error(CompositeError::success());
        assert!(status.success());
    }

    #[test]
    fn from_error_joins_chain_with_newlines() {
        let error = CompositeError::from_message("foo").join(CompositeError::from_message("bar"));
        let status = Status::from_error(error);
        assert!(status.fail());
        assert_eq!(status.domain(), ErrorDomain::Generic);
        assert_eq!(status.message(), Some("foo\nbar"));
    }

    #[test]
    fn zero_codes_read_as_success_but_keep_domain() {
        let status = Status::from_errno_code(0);
        assert!(status.success());
        assert_eq!(status.domain(), ErrorDomain::Errno);
        assert_eq!(status.message(), None);

        let status = Status::from_expression_result(0);
        assert!(status.success());
        assert_eq!(status.domain(), ErrorDomain::Expression);
        assert_eq!(status.message(), None);
    }

    #[test]
    fn new_stores_code_and_domain_verbatim() {
        let status = Status::new(libc::ENOENT as i64, ErrorDomain::Errno);
        assert_eq!(status.domain(), ErrorDomain::Errno);
        assert_eq!(status.error_code(), i64::from(libc::ENOENT));

        let status = Status::new(7, ErrorDomain::Invalid);
        assert!(status.success());
        assert_eq!(status.error_code(), 0);
    }

    #[test]
    fn expression_result_describes_code() {
        let status = Status::from_expression_result(crate::expr_result::PARSE_ERROR);
        assert!(status.fail());
        assert_eq!(status.domain(), ErrorDomain::Expression);
        assert_eq!(status.message(), Some("expression could not be parsed"));
    }

    #[test]
    fn expression_round_trip_is_textual_only() {
        // Non-POSIX numeric domains keep only their text across the
        // composite representation.
        let status = Status::from_expression_result(crate::expr_result::PARSE_ERROR);
        let back = Status::from_error(status.to_error());
        assert_eq!(back.domain(), ErrorDomain::Generic);
        assert_eq!(back.message(), status.message());
        assert_eq!(back.error_code(), 0);
    }

    #[test]
    fn message_is_idempotent() {
        let status = Status::from_errno_code(libc::EAGAIN);
        let first = status.message().map(str::to_string);
        let second = status.message().map(str::to_string);
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn clone_renders_identically() {
        let status = Status::from_errno_code(libc::ENOENT);
        let cloned = status.clone();
        assert_eq!(status.message(), cloned.message());

        // Cloning after the cache is warm must not change the output.
        let status = Status::from_errno_code(libc::ENOENT);
        let _ = status.message();
        let cloned = status.clone();
        assert_eq!(status.message(), cloned.message());
    }

    #[test]
    fn display_empty_on_success() {
        assert_eq!(format!("{}", Status::default()), "");
    }

    #[test]
    fn display_full_message() {
        assert_eq!(
            format!("{}", Status::from_message("Hello Status")),
            "Hello Status"
        );
    }

    #[test]
    fn display_precision_truncates_like_str() {
        let status = Status::from_message("Hello Error");
        assert_eq!(format!("{:.5}", status), "Hello");
        assert_eq!(format!("{:.5}", "Hello Error"), "Hello");
    }

    #[test]
    fn display_width_pads_like_str() {
        let status = Status::from_message("err");
        assert_eq!(format!("{:5}", status), "err  ");
        assert_eq!(format!("{:>5}", status), "  err");
    }

    #[test]
    fn status_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Status>();
    }

    #[cfg(unix)]
    #[test]
    fn from_nix_errno() {
        let status = Status::from(nix::errno::Errno::EACCES);
        assert!(status.fail());
        assert_eq!(status.domain(), ErrorDomain::Errno);
        assert_eq!(status.error_code(), i64::from(libc::EACCES));
        assert_eq!(status.message(), Some(nix::errno::Errno::EACCES.desc()));
    }

    #[cfg(unix)]
    #[test]
    fn from_io_error_with_raw_code() {
        let status = Status::from(std::io::Error::from_raw_os_error(libc::ENOENT));
        assert_eq!(status.domain(), ErrorDomain::Errno);
        assert_eq!(status.error_code(), i64::from(libc::ENOENT));
    }

    #[test]
    fn from_io_error_without_raw_code() {
        let status = Status::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            "socket closed",
        ));
        assert!(status.fail());
        assert_eq!(status.domain(), ErrorDomain::Generic);
        assert_eq!(status.message(), Some("socket closed"));
    }

    #[cfg(windows)]
    mod win32 {
        use super::*;
        use winapi::shared::winerror::ERROR_ACCESS_DENIED;

        #[test]
        fn zero_code_is_success() {
            let status = Status::from_win32_error(0);
            assert!(status.success());
            assert_eq!(status.domain(), ErrorDomain::Win32);
            assert_eq!(status.message(), None);
            assert!(status.to_error().is_success());
        }

        #[test]
        fn recognized_code_renders_table_text() {
            // Exact text is locale-dependent; presence is not.
            let status = Status::from_win32_error(ERROR_ACCESS_DENIED);
            assert!(status.fail());
            assert!(!status.message().unwrap().is_empty());
        }

        #[test]
        fn unrecognized_code_renders_unknown_error() {
            let status = Status::from_win32_error(16000);
            assert!(status.fail());
            assert_eq!(status.message(), Some(crate::native::UNKNOWN_ERROR));
        }

        #[test]
        fn round_trip_is_textual_only() {
            let status = Status::from_win32_error(ERROR_ACCESS_DENIED);
            let back = Status::from_error(status.to_error());
            assert_eq!(back.domain(), ErrorDomain::Generic);
            assert_eq!(back.message(), status.message());
        }
    }
}
