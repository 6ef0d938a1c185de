//! Error taxonomy for S-expression parsing and navigation
//!
//! Every failure surfaces as a [`GcrError`]. The S-expression specific
//! failures live in [`SexpError`]; [`ErrorKind`] names the hierarchy the
//! binding layer exposes (`GcrError` > `GcrSexpError` > leaf kinds).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GcrError>;

/// Root error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GcrError {
    #[error(transparent)]
    Sexp(#[from] SexpError),
}

/// S-expression failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SexpError {
    #[error("Nil expression: {message}")]
    Nil { message: String },

    #[error("Format error at byte {offset}: {message}")]
    Format { message: String, offset: usize },

    #[error("Index {index} out of boundary for expression of length {len}")]
    OutOfBoundary { index: isize, len: usize },

    #[error("Type error: {message}")]
    Type { message: String },
}

impl SexpError {
    pub fn nil(message: impl Into<String>) -> Self {
        Self::Nil {
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>, offset: usize) -> Self {
        Self::Format {
            message: message.into(),
            offset,
        }
    }

    pub fn out_of_boundary(index: isize, len: usize) -> Self {
        Self::OutOfBoundary { index, len }
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::Type {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Nil { .. } => ErrorKind::SexpNil,
            Self::Format { .. } => ErrorKind::SexpFormat,
            Self::OutOfBoundary { .. } => ErrorKind::SexpOutOfBoundary,
            Self::Type { .. } => ErrorKind::SexpType,
        }
    }
}

/// Classification of errors, mirroring the exception hierarchy of the
/// binding layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Gcr,
    Sexp,
    SexpNil,
    SexpFormat,
    SexpOutOfBoundary,
    SexpType,
}

impl ErrorKind {
    /// Class name as seen by consumers of the binding layer
    pub fn name(self) -> &'static str {
        match self {
            Self::Gcr => "GcrError",
            Self::Sexp => "GcrSexpError",
            Self::SexpNil => "GcrSexpNilError",
            Self::SexpFormat => "GcrSexpFormatError",
            Self::SexpOutOfBoundary => "GcrSexpOutOfBoundaryError",
            Self::SexpType => "GcrSexpTypeError",
        }
    }

    pub fn parent(self) -> Option<ErrorKind> {
        match self {
            Self::Gcr => None,
            Self::Sexp => Some(Self::Gcr),
            Self::SexpNil | Self::SexpFormat | Self::SexpOutOfBoundary | Self::SexpType => {
                Some(Self::Sexp)
            }
        }
    }

    /// True if `self` is `ancestor` or derives from it
    pub fn is_a(self, ancestor: ErrorKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl GcrError {
    /// Most specific kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Sexp(e) => e.kind(),
        }
    }

    /// Hierarchy-aware kind check, `err.is(ErrorKind::Sexp)` holds for
    /// every S-expression failure
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind().is_a(kind)
    }

    /// Byte offset into the input, for format errors
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Sexp(SexpError::Format { offset, .. }) => Some(*offset),
            _ => None,
        }
    }

    pub(crate) fn nil(message: impl Into<String>) -> Self {
        SexpError::nil(message).into()
    }

    pub(crate) fn format(message: impl Into<String>, offset: usize) -> Self {
        SexpError::format(message, offset).into()
    }

    pub(crate) fn out_of_boundary(index: isize, len: usize) -> Self {
        SexpError::out_of_boundary(index, len).into()
    }

    pub(crate) fn type_mismatch(message: impl Into<String>) -> Self {
        SexpError::type_mismatch(message).into()
    }
}
