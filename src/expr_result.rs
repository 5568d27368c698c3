//! Expression evaluator result codes and their descriptions.
//!
//! The expression engine reports its outcome as a small numeric code;
//! this module is the lookup table translating those codes into short
//! human-readable descriptions. Code 0 means the expression completed
//! and is the success sentinel for the expression status domain.

/// Expression evaluation completed and produced a value.
pub const COMPLETED: i32 = 0;
/// The expression text could not be tokenized or parsed.
pub const PARSE_ERROR: i32 = 1;
/// A variable named in the expression could not be resolved.
pub const UNKNOWN_VARIABLE: i32 = 2;
/// A member or array access did not match the variable's type.
pub const TYPE_ERROR: i32 = 3;
/// A pointer dereference or memory read failed.
pub const MEMORY_ERROR: i32 = 4;
/// Division by zero during evaluation.
pub const DIVIDE_BY_ZERO: i32 = 5;
/// Evaluation was interrupted before completing.
pub const INTERRUPTED: i32 = 6;

const RESULTS: &[(i32, &str)] = &[
    (COMPLETED, "expression completed"),
    (PARSE_ERROR, "expression could not be parsed"),
    (UNKNOWN_VARIABLE, "unknown variable in expression"),
    (TYPE_ERROR, "expression type mismatch"),
    (MEMORY_ERROR, "memory access failed during evaluation"),
    (DIVIDE_BY_ZERO, "division by zero in expression"),
    (INTERRUPTED, "expression evaluation interrupted"),
];

/// Get the description for an expression result code.
///
/// Every code yields non-empty text; codes outside the table map to a
/// generic fallback rather than failing.
pub fn describe(code: i32) -> &'static str {
    RESULTS
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, desc)| desc)
        .unwrap_or("unknown expression result")
}
