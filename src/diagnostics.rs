//! Append-only diagnostics sink shared by every stage of one compilation.
//!
//! Stages never abort on bad input. They describe what went wrong with a typed error
//! implementing [Reportable], hand it to the [ErrorReporter] and keep going.

use crate::location::SourceLocation;
use std::{fmt, io};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// Lexical or grammatical problems
    Syntax,
    /// Type mismatch, redeclaration, control-flow misuse, ..
    Semantic,
    /// Internal invariant violations
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax error"),
            Self::Semantic => write!(f, "semantic error"),
            Self::Unknown => write!(f, "internal error"),
        }
    }
}

/// Error type that knows which [ErrorKind] it belongs to.
pub trait Reportable: std::error::Error {
    fn kind(&self) -> ErrorKind;
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub location: SourceLocation,
    pub kind: ErrorKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.kind, self.message)
    }
}

#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, error: &impl Reportable, location: SourceLocation) {
        let diagnostic = Diagnostic {
            message: error.to_string(),
            location,
            kind: error.kind(),
        };
        tracing::debug!(%location, kind = ?diagnostic.kind, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// Writes one diagnostic per line, message only.
    pub fn print_diagnostics(&self, out: &mut impl io::Write) -> io::Result<()> {
        for diagnostic in &self.diagnostics {
            writeln!(out, "{}", diagnostic.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("something broke")]
    struct Broken;

    impl Reportable for Broken {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Unknown
        }
    }

    #[test]
    fn test_empty_reporter() {
        let reporter = ErrorReporter::new();
        assert!(!reporter.has_errors());
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_print_form() {
        let mut reporter = ErrorReporter::new();
        reporter.report(&Broken, SourceLocation::new(2, 4));
        reporter.report(&Broken, SourceLocation::UNKNOWN);
        assert!(reporter.has_errors());
        assert_eq!(reporter.count(ErrorKind::Unknown), 2);

        let mut out = Vec::new();
        reporter.print_diagnostics(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "something broke\nsomething broke\n");
        assert_eq!(
            reporter.diagnostics()[0].to_string(),
            "3:5: internal error: something broke"
        );
    }
}
