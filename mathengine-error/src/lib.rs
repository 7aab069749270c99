//! Contains the common [`ErrorKind`] trait used by all user-facing errors, and the span-carrying
//! [`Error`] type that wraps them.
//!
//! An [`ErrorKind`] knows two things: a one-line message (shown wherever only plain text fits,
//! such as the `error` field of a failed derivation), and how to build a full [`ariadne`] report
//! that highlights the offending regions of the input.

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug, Display}, ops::Range};

#[cfg(test)]
extern crate self as mathengine_error;

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur while reading or manipulating user input.
pub trait ErrorKind: Debug + Send {
    /// A one-line description of the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Returns the one-line message of the error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the full report for this error against the given source into a string.
    ///
    /// The `ariadne` crate's [`Report`] type does not implement [`Display`], so the report is
    /// written into a buffer instead. The output contains ANSI color codes.
    pub fn report_to_string(&self, src_id: &str, source: &str) -> String {
        let mut buf = Vec::new();
        match self.build_report(src_id).write((src_id, Source::from(source)), &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.message(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use mathengine_attrs::ErrorKind;
    use pretty_assertions::assert_eq;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = "missing operand",
        labels = ["add a number or variable here"],
        help = "every operator needs a value on both sides",
    )]
    struct MissingOperand;

    #[derive(Debug, ErrorKind)]
    #[error(
        message = format!("unknown function `{}`", name),
        labels = [format!("`{}` is not a known function", name), String::new()],
    )]
    struct UnknownName {
        name: String,
    }

    fn strip(report: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(report)).unwrap()
    }

    #[test]
    fn message_of_unit_kind() {
        let err = Error::new(vec![3..4], MissingOperand);
        assert_eq!(err.message(), "missing operand");
        assert_eq!(err.to_string(), "missing operand");
    }

    #[test]
    fn message_uses_fields() {
        let err = Error::new(vec![0..4, 5..6], UnknownName { name: "sine".to_string() });
        assert_eq!(err.message(), "unknown function `sine`");
    }

    #[test]
    fn report_highlights_span() {
        let err = Error::new(vec![4..5], MissingOperand);
        let report = strip(&err.report_to_string("input", "2 + * 3"));

        assert!(report.contains("missing operand"));
        assert!(report.contains("add a number or variable here"));
        assert!(report.contains("every operator needs a value on both sides"));
    }

    #[test]
    fn report_skips_empty_labels() {
        let err = Error::new(vec![0..4, 5..6], UnknownName { name: "sine".to_string() });
        let report = strip(&err.report_to_string("input", "sine(x)"));

        assert!(report.contains("`sine` is not a known function"));
    }
}
