//! # Diagnostics
//!
//! The diagnostics sink counts and prints every error reported during a
//! session. Reporting never stops evaluation: [`Diagnostics::report`] returns
//! NaN so call sites can write `return diag.report(err)` and let the enclosing
//! expression carry on.
//!
//! Messages take the form
//!
//! ```text
//! <progname>: <message> near line <n>
//! ```
//!
//! where `<n>` is the line the scanner has reached, which the scanner advances
//! through [`Diagnostics::next_line`].

use crate::CalcError;
use crate::error::ErrorKind;
use smartstring::alias::String;
use std::fmt;
use std::io::{self, Write};

/// One reported error, as kept in the session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reported {
    /// Line the scanner had reached when the error was reported.
    pub line: usize,
    /// Category of the error.
    pub kind: ErrorKind,
    /// Rendered error message (without program name and line).
    pub message: String,
}

enum Sink {
    Stderr,
    Writer(Box<dyn Write>),
    Silent,
}

/// Error counter, line tracker and message writer for one session.
///
/// # Example
/// ```rust
/// # use hoc_calc::{CalcError, Diagnostics};
/// let mut diag = Diagnostics::with_writer("calc", Vec::new());
/// diag.next_line();
/// let v = diag.report(CalcError::DivideByZero);
/// assert!(v.is_nan());
/// assert_eq!(diag.error_count(), 1);
/// assert_eq!(diag.history()[0].line, 2);
/// assert_eq!(diag.render(&diag.history()[0]), "calc: divide by 0 near line 2");
/// ```
pub struct Diagnostics {
    prog_name: String,
    errors: usize,
    line: usize,
    history: Vec<Reported>,
    sink: Sink,
}

impl Diagnostics {
    /// Diagnostics printed to standard error.
    pub fn new(prog_name: &str) -> Self {
        Self::with_sink(prog_name, Sink::Stderr)
    }

    /// Diagnostics printed to an arbitrary writer.
    pub fn with_writer(prog_name: &str, writer: impl Write + 'static) -> Self {
        Self::with_sink(prog_name, Sink::Writer(Box::new(writer)))
    }

    /// Diagnostics that are counted and recorded but never printed.
    pub fn silent(prog_name: &str) -> Self {
        Self::with_sink(prog_name, Sink::Silent)
    }

    fn with_sink(prog_name: &str, sink: Sink) -> Self {
        Self {
            prog_name: String::from(prog_name),
            errors: 0,
            line: 1,
            history: Vec::new(),
            sink,
        }
    }

    /// Reports `err` at the current line and returns NaN.
    pub fn report(&mut self, err: CalcError) -> f64 {
        let reported = Reported {
            line: self.line,
            kind: err.kind(),
            message: err.to_string().into(),
        };
        log::debug!("{:?} error near line {}: {}", reported.kind, reported.line, err);

        let text = self.render(&reported);
        let written = match &mut self.sink {
            Sink::Stderr => writeln!(io::stderr(), "{text}"),
            Sink::Writer(w) => writeln!(w, "{text}"),
            Sink::Silent => Ok(()),
        };
        if let Err(e) = written {
            log::warn!("unable to write diagnostic: {e}");
        }

        self.errors += 1;
        self.history.push(reported);
        f64::NAN
    }

    /// Formats a reported error the way it is printed.
    pub fn render(&self, reported: &Reported) -> std::string::String {
        format!(
            "{}: {} near line {}",
            self.prog_name, reported.message, reported.line
        )
    }

    /// Number of errors reported so far. Never reset.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    /// Every error reported so far, oldest first.
    pub fn history(&self) -> &[Reported] {
        &self.history
    }

    pub fn prog_name(&self) -> &str {
        &self.prog_name
    }

    /// Current 1-based input line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Advances to the next input line.
    pub fn next_line(&mut self) {
        self.line += 1;
    }

    /// Restarts line numbering for a new input source.
    pub fn reset_line(&mut self) {
        self.line = 1;
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("prog_name", &self.prog_name)
            .field("errors", &self.errors)
            .field("line", &self.line)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::MathError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Writer that shares its buffer with the test.
    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn text(&self) -> std::string::String {
            std::string::String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    #[test]
    fn report_counts_and_returns_nan() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut diag = Diagnostics::silent("calc");
        assert_eq!(diag.error_count(), 0);
        assert!(diag.report(CalcError::DivideByZero).is_nan());
        assert!(diag.report(MathError::Domain.into()).is_nan());
        assert_eq!(diag.error_count(), 2);
        assert_eq!(diag.history()[1].kind, ErrorKind::Math);
        assert_eq!(diag.history()[1].message.as_str(), "argument out of domain");
    }

    #[test]
    fn messages_carry_program_name_and_line() {
        let _ = env_logger::builder().is_test(true).try_init();
        let out = Shared::default();
        let mut diag = Diagnostics::with_writer("hoc", out.clone());
        diag.report(CalcError::BadToken('#'));
        diag.next_line();
        diag.next_line();
        diag.report(CalcError::UndefinedVariable("x".into()));
        assert_eq!(
            out.text(),
            "hoc: bad token '#' near line 1\nhoc: undefined variable 'x' near line 3\n"
        );
    }

    #[test]
    fn reset_line_keeps_error_count() {
        let mut diag = Diagnostics::silent("calc");
        diag.next_line();
        diag.report(CalcError::PrimaryExpected);
        diag.reset_line();
        assert_eq!(diag.line(), 1);
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.prog_name(), "calc");
        assert!(format!("{diag:?}").contains("errors: 1"));
    }
}
