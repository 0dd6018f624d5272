use sprig_dom::DomError;
use strum_macros::Display;
use thiserror::Error;

/// Structural errors. All are terminal: the build is abandoned and no
/// partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An end tag does not match the open element, or a close reached an
    /// element that was already closed.
    #[error("mismatched close at token {token_index}: {}", describe_mismatch(.open, .found.as_deref()))]
    MismatchedClose {
        /// Name of the element under the cursor.
        open: String,
        /// Name of the offending end tag; `None` for a self-close.
        found: Option<String>,
        /// Position in the token stream. Equals the stream length for the
        /// closes applied at end of input.
        token_index: usize,
    },

    /// A close was applied with no open ancestor left to return to.
    #[error("stack underflow at token {token_index}: more closing operations than openings")]
    StackUnderflow {
        /// Position in the token stream.
        token_index: usize,
    },

    /// The root was still open after the forced close at end of input.
    #[error("root node not closed at end of input")]
    UnclosedRoot,

    /// A tree mutation was rejected by the node model.
    #[error(transparent)]
    Dom(#[from] DomError),
}

fn describe_mismatch(open: &str, found: Option<&str>) -> String {
    match found {
        Some(found) if found == open => format!("`<{open}>` is already closed"),
        Some(found) => format!("`</{found}>` does not close `<{open}>`"),
        None => format!("self-close of already closed `<{open}>`"),
    }
}

/// Discriminant of a [`BuildError`], for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BuildErrorKind {
    /// See [`BuildError::MismatchedClose`].
    MismatchedClose,
    /// See [`BuildError::StackUnderflow`].
    StackUnderflow,
    /// See [`BuildError::UnclosedRoot`].
    UnclosedRoot,
    /// See [`BuildError::Dom`].
    Dom,
}

impl BuildError {
    /// The kind of this error.
    #[must_use]
    pub const fn kind(&self) -> BuildErrorKind {
        match self {
            Self::MismatchedClose { .. } => BuildErrorKind::MismatchedClose,
            Self::StackUnderflow { .. } => BuildErrorKind::StackUnderflow,
            Self::UnclosedRoot => BuildErrorKind::UnclosedRoot,
            Self::Dom(_) => BuildErrorKind::Dom,
        }
    }
}

/// Kind of malformed input the builder recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// An end tag for a void element was skipped.
    IgnoredVoidEndTag,
    /// An element was still open at end of input and was closed there.
    ForcedClose,
}

/// A tolerated irregularity in the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildIssue {
    /// What was tolerated.
    pub kind: IssueKind,
    /// Name of the element involved.
    pub tag_name: String,
    /// Index into the token stream where this was encountered.
    pub token_index: usize,
}
