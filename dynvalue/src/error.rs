//! Error type shared by the accessors and the conversion dispatch.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::ValueType;

/// A segment in the path from the root of a value tree to the place where
/// a conversion failed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field of a record, or a key of an object
    Field(String),
    /// A position in an array
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{name}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// The specific kind of a [`VariantError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The recursion budget reached zero before a structural descent.
    RecursionLimitExceeded {
        /// Budget the top-level call started with, when known
        budget: Option<u32>,
    },
    /// An accessor or coercion was used on a tag it does not support.
    TypeMismatch {
        /// What the operation needed
        expected: &'static str,
        /// What the value actually held
        got: ValueType,
    },
    /// Positional access past the end of an array.
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Length of the array
        len: usize,
    },
    /// Keyed access to a key the object does not contain.
    MissingKey {
        /// Requested key
        key: String,
    },
    /// A leaf conversion cannot represent the value.
    ConversionFailure {
        /// Name of the target type
        target: &'static str,
        /// Why the conversion failed
        reason: String,
    },
    /// [`set_default_budget`](crate::set_default_budget) was called more than once.
    DefaultBudgetAlreadySet {
        /// Budget that is currently installed
        current: u32,
    },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::RecursionLimitExceeded { budget: Some(b) } => {
                write!(f, "recursion limit exceeded (budget {b})")
            }
            ErrorKind::RecursionLimitExceeded { budget: None } => {
                write!(f, "recursion limit exceeded")
            }
            ErrorKind::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            ErrorKind::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for array of length {len}")
            }
            ErrorKind::MissingKey { key } => write!(f, "no such key: {key:?}"),
            ErrorKind::ConversionFailure { target, reason } => {
                write!(f, "cannot convert to {target}: {reason}")
            }
            ErrorKind::DefaultBudgetAlreadySet { current } => {
                write!(f, "default recursion budget already set to {current}")
            }
        }
    }
}

/// Error returned by every fallible operation in this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantError {
    /// The specific kind of error
    pub kind: ErrorKind,
    /// Path from the root of the value tree to the failure (root first)
    pub path: Vec<PathSegment>,
}

impl VariantError {
    /// Create an error with an empty path.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    pub(crate) fn recursion_limit() -> Self {
        Self::new(ErrorKind::RecursionLimitExceeded { budget: None })
    }

    pub(crate) fn type_mismatch(expected: &'static str, got: ValueType) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, got })
    }

    pub(crate) fn conversion(target: &'static str, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConversionFailure {
            target,
            reason: reason.into(),
        })
    }

    /// Prepend a path segment (we unwind from the error site towards the root).
    pub fn with_path(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// Record the budget the failing top-level call started with.
    pub(crate) fn with_budget(mut self, start: u32) -> Self {
        if let ErrorKind::RecursionLimitExceeded { budget } = &mut self.kind {
            budget.get_or_insert(start);
        }
        self
    }

    /// Returns `true` if this error was caused by the recursion budget.
    pub fn is_recursion_limit(&self) -> bool {
        matches!(self.kind, ErrorKind::RecursionLimitExceeded { .. })
    }

    /// Format the path as a string, `<root>` when empty.
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            "<root>".into()
        } else {
            use core::fmt::Write;
            let mut s = String::new();
            for seg in &self.path {
                let _ = write!(s, "{seg}");
            }
            s
        }
    }
}

impl fmt::Display for VariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path_string(), self.kind)
        }
    }
}

impl core::error::Error for VariantError {}

#[cfg(feature = "miette")]
impl miette::Diagnostic for VariantError {
    fn code<'a>(&'a self) -> Option<alloc::boxed::Box<dyn fmt::Display + 'a>> {
        let code = match self.kind {
            ErrorKind::RecursionLimitExceeded { .. } => "dynvalue::recursion_limit",
            ErrorKind::TypeMismatch { .. } => "dynvalue::type_mismatch",
            ErrorKind::IndexOutOfRange { .. } | ErrorKind::MissingKey { .. } => {
                "dynvalue::out_of_range"
            }
            ErrorKind::ConversionFailure { .. } => "dynvalue::conversion",
            ErrorKind::DefaultBudgetAlreadySet { .. } => "dynvalue::config",
        };
        Some(alloc::boxed::Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<alloc::boxed::Box<dyn fmt::Display + 'a>> {
        let help = match self.kind {
            ErrorKind::RecursionLimitExceeded { .. } => {
                "the input is nested deeper than the recursion budget allows"
            }
            ErrorKind::DefaultBudgetAlreadySet { .. } => {
                "set the default budget once, at startup"
            }
            _ => return None,
        };
        Some(alloc::boxed::Box::new(help))
    }
}
