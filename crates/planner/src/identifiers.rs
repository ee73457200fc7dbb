//! Newtype identifiers.
//!
//! Each identity in the planner is a distinct newtype wrapping a primitive, so
//! an [`IssueNumber`] can never be passed where a [`CommentId`] is expected
//! even though both are `u64` under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or whitespace-only. Surrounding whitespace is trimmed.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                let v = v.trim();
                if v.is_empty() { None } else { Some(Self(v.to_string())) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (GitHub-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers — GitHub-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// Number of the GitHub issue or pull request the trigger comment was made on.
    ///
    /// Issues and pull requests share one number space per repository.
    IssueNumber
}

u64_id! {
    /// Identifies a comment created on an issue or pull request.
    CommentId
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single invocation of the planner.
///
/// Generated fresh for every CLI run and attached to the root span so all
/// log lines from one run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers — String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// GitHub login of the user or organisation owning a repository.
    RepositoryOwner
}

string_id! {
    /// Repository name without the owner prefix.
    RepositoryName
}

string_id! {
    /// Resource name of a repository connected to Jules
    /// (e.g. `"sources/github/octo/widgets"`).
    SourceName
}

string_id! {
    /// Identifier of a Jules planning session.
    SessionId
}

string_id! {
    /// A Git branch name (e.g. `"main"`).
    BranchName
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_reject_blank_values() {
        assert!(SessionId::new("").is_none());
        assert!(SessionId::new("   ").is_none());
        assert_eq!(SessionId::new(" 123 ").unwrap().as_str(), "123");
    }

    #[test]
    fn u64_ids_display_their_value() {
        assert_eq!(IssueNumber::new(42).to_string(), "42");
        assert_eq!(CommentId::new(7).as_u64(), 7);
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new_random(), RunId::new_random());
    }
}
