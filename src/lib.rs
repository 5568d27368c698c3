//! rstatus — A unifying error-status value type for debugger tooling.
//!
//! Debugger code crosses several error numbering spaces in a single call
//! chain: errno values from the tracing syscalls, native status codes
//! from the host OS, expression evaluator result codes, and plain text
//! from everything in between. This crate folds them into one value type,
//! [`Status`], with uniform success/failure queries, lazy cached message
//! rendering, and conversion to and from a composable error chain for
//! functional-style propagation.
//!
//! # Module overview
//!
//! - [`status`] — The [`Status`] value type: domain-tagged error codes
//!   with lazy rendering and the conversions to/from [`CompositeError`].
//! - [`composite`] — Composable error chains: ordered leaf errors that
//!   can be joined and collapsed into a single `Status`.
//! - [`expr_result`] — Expression evaluator result codes and their
//!   description table.
//! - [`native`] — Host message-table lookup for platform-native status
//!   codes. *(Windows host backend; injectable for tests everywhere.)*

pub mod composite;
pub mod expr_result;
pub mod native;
pub mod status;

pub use composite::{Category, CompositeError, LeafError};
pub use status::{ErrorDomain, Status};
