//! # Calculator driver
//!
//! [`Calculator`] runs whole inputs through a [`Parser`] against one
//! [`Session`], printing the value of every expression statement. Inputs are
//! evaluated one after another; variables assigned by one input are visible
//! to the next and the error count keeps accumulating.

use crate::{Parser, Session, Source, Statement};
use std::io::{self, Write};

/// Formats a result the way the calculator prints it.
///
/// ```rust
/// # use hoc_calc::format_value;
/// assert_eq!(format_value(14.0), "14");
/// assert_eq!(format_value(0.5), "0.5");
/// assert_eq!(format_value(f64::NAN), "nan");
/// assert_eq!(format_value(f64::NEG_INFINITY), "-inf");
/// ```
pub fn format_value(v: f64) -> std::string::String {
    if v.is_nan() {
        "nan".into()
    } else if v == f64::INFINITY {
        "inf".into()
    } else if v == f64::NEG_INFINITY {
        "-inf".into()
    } else {
        v.to_string()
    }
}

/// A calculator session fed by any number of inputs.
///
/// # Example
/// ```rust
/// # use hoc_calc::{Calculator, Session, Source};
/// let mut calc = Calculator::with_session(Session::silent("calc"));
/// let mut out = Vec::new();
///
/// calc.run(Source::text("x = 6\nx * 7\n"), &mut out).unwrap();
/// calc.run(Source::text("x / 0; x - 1"), &mut out).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "\t42\n\tnan\n\t5\n");
/// assert_eq!(calc.error_count(), 1);
/// ```
#[derive(Debug)]
pub struct Calculator {
    session: Session,
}

impl Calculator {
    /// A calculator reporting errors to standard error as `prog_name`.
    pub fn new(prog_name: &str) -> Self {
        Self::with_session(Session::new(prog_name))
    }

    pub fn with_session(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Total errors reported across every input so far.
    pub fn error_count(&self) -> usize {
        self.session.error_count()
    }

    /// Evaluates `source` to its end, writing `\t<value>` for each expression
    /// statement to `out`.
    ///
    /// Line numbering restarts at 1 for the new source.
    ///
    /// # Errors
    /// Only failures writing to `out` are returned; evaluation errors go to
    /// the session's diagnostics.
    pub fn run<W: Write>(&mut self, source: Source<'_>, out: &mut W) -> io::Result<()> {
        log::debug!("running {source:?}");
        self.session.diag.reset_line();
        let mut parser = Parser::new(source);
        while let Some(stmt) = parser.statement(&mut self.session) {
            if let Statement::Expression(v) = stmt {
                writeln!(out, "\t{}", format_value(v))?;
                out.flush()?;
            }
        }
        Ok(())
    }

    /// Evaluates `text` and returns its statements without printing them.
    pub fn eval(&mut self, text: &str) -> Vec<Statement> {
        self.session.diag.reset_line();
        let mut parser = Parser::new(Source::text(text));
        let mut stmts = Vec::new();
        while let Some(stmt) = parser.statement(&mut self.session) {
            stmts.push(stmt);
        }
        stmts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn silent() -> Calculator {
        Calculator::with_session(Session::silent("calc"))
    }

    fn output(calc: &mut Calculator, text: &str) -> std::string::String {
        let mut out = Vec::new();
        calc.run(Source::text(text), &mut out).unwrap();
        std::string::String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_expressions_but_not_assignments() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut calc = silent();
        let out = output(&mut calc, "1+2\nx = 3\nx*2\n\n;\n1/0\n");
        assert_eq!(out, "\t3\n\t6\n\tnan\n");
        assert_eq!(calc.error_count(), 1);
    }

    #[test]
    fn bindings_and_errors_persist_across_inputs() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut calc = silent();
        assert_eq!(output(&mut calc, "r = 2\n\nq\n"), "\tnan\n");
        assert_eq!(calc.session().diag.history()[0].line, 3);

        let mut stdin_like = Cursor::new("r ^ 3\nw");
        let mut out = Vec::new();
        calc.run(Source::borrowed(&mut stdin_like), &mut out).unwrap();
        assert_eq!(out, b"\t8\n\tnan\n");

        let history = calc.session().diag.history();
        assert_eq!(calc.error_count(), 2);
        // line numbers restart with each input
        assert_eq!(history[1].line, 2);
        assert_eq!(history[1].message.as_str(), "undefined variable 'w'");
    }

    #[test]
    fn prints_infinities_and_last() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut calc = silent();
        let out = output(&mut calc, "10^308 * 10\n-(10^308 * 10)\n2.5; last * 2\n");
        assert_eq!(out, "\tinf\n\t-inf\n\t2.5\n\t5\n");
        assert_eq!(calc.session().value("last"), Some(5.0));
    }

    #[test]
    fn eval_returns_statements() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut calc = silent();
        assert_eq!(
            calc.eval("a = 4; sqrt(a)"),
            vec![Statement::Assignment(4.0), Statement::Expression(2.0)]
        );
        assert_eq!(calc.eval("a + 1"), vec![Statement::Expression(5.0)]);
        assert!(calc.eval("").is_empty());
        calc.session_mut().symtab.intern("fresh");
        assert_eq!(calc.session().value("fresh"), None);
    }

    #[test]
    fn format_value_matches_printed_forms() {
        assert_eq!(format_value(-2.0), "-2");
        assert_eq!(format_value(1e-7), "0.0000001");
        assert_eq!(format_value(f64::INFINITY), "inf");
    }
}
