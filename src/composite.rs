//! Composable error chains convertible to and from [`Status`].
//!
//! A [`CompositeError`] is either empty (success) or an ordered chain of
//! one or more [`LeafError`]s, each carrying a textual description and,
//! when built from a system error code, the numeric code and category
//! needed to reconstruct it. Chains are one-shot values: converting one
//! into a [`Status`] consumes it.
//!
//! [`Status`]: crate::status::Status

use std::fmt;

use crate::status::strerror;

/// The error-code category a [`LeafError`] can carry alongside its code.
///
/// Only POSIX-style codes survive a round trip through the composite
/// representation; any future category falls back to textual fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Category {
    /// A POSIX errno value, rendered via the standard errno string table.
    Posix,
}

/// One link in a composite error chain.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{description}")]
pub struct LeafError {
    description: String,
    code: Option<(i32, Category)>,
}

impl LeafError {
    /// The human-readable description of this leaf.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The numeric code and category, when this leaf was built from one.
    pub fn error_code(&self) -> Option<(i32, Category)> {
        self.code
    }
}

/// Zero or more leaf errors joined in order. Empty means success.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct CompositeError {
    leaves: Vec<LeafError>,
}

impl CompositeError {
    /// An empty chain, representing success.
    pub fn success() -> Self {
        Self::default()
    }

    /// A single leaf carrying only a textual description.
    pub fn from_message(description: impl Into<String>) -> Self {
        CompositeError {
            leaves: vec![LeafError {
                description: description.into(),
                code: None,
            }],
        }
    }

    /// A single leaf built from a numeric code and its category.
    ///
    /// The description is rendered from the category's message table at
    /// construction time, so the leaf stays readable even if only its
    /// text is consumed downstream.
    pub fn from_error_code(code: i32, category: Category) -> Self {
        let description = match category {
            Category::Posix => strerror(code),
        };
        CompositeError {
            leaves: vec![LeafError {
                description,
                code: Some((code, category)),
            }],
        }
    }

    /// Append `other`'s leaves after this chain's, preserving order.
    pub fn join(mut self, other: CompositeError) -> CompositeError {
        self.leaves.extend(other.leaves);
        self
    }

    /// True when the chain is empty (no error).
    pub fn is_success(&self) -> bool {
        self.leaves.is_empty()
    }

    /// The leaves in chain order.
    pub fn leaves(&self) -> &[LeafError] {
        &self.leaves
    }

    /// Consume the chain, yielding its leaves in order.
    pub fn into_leaves(self) -> Vec<LeafError> {
        self.leaves
    }
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, leaf) in self.leaves.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&leaf.description)?;
        }
        Ok(())
    }
}

impl std::error::Error for CompositeError {}
