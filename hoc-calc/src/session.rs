//! Evaluation context shared by the scanner and the parser.

use crate::{CalcError, Diagnostics, SymTab};

/// Symbol table and diagnostics of one calculator session.
///
/// A session outlives any single input: bindings made while reading one
/// source stay visible to the next, and the error count keeps growing.
#[derive(Debug)]
pub struct Session {
    pub symtab: SymTab,
    pub diag: Diagnostics,
}

impl Session {
    /// A session with the built-in symbols installed, reporting to stderr.
    pub fn new(prog_name: &str) -> Self {
        Self::with_diagnostics(Diagnostics::new(prog_name))
    }

    /// A session that records errors without printing them.
    pub fn silent(prog_name: &str) -> Self {
        Self::with_diagnostics(Diagnostics::silent(prog_name))
    }

    pub fn with_diagnostics(diag: Diagnostics) -> Self {
        Self {
            symtab: SymTab::with_builtins(),
            diag,
        }
    }

    /// Shorthand for [`Diagnostics::report`].
    #[inline]
    pub fn report(&mut self, err: impl Into<CalcError>) -> f64 {
        self.diag.report(err.into())
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.diag.error_count()
    }

    /// Numeric value bound to `name`, if it is a variable or constant.
    ///
    /// ```rust
    /// # use hoc_calc::Session;
    /// let s = Session::silent("calc");
    /// assert_eq!(s.value("last"), Some(0.0));
    /// assert_eq!(s.value("sin"), None);
    /// assert_eq!(s.value("nope"), None);
    /// ```
    pub fn value(&self, name: &str) -> Option<f64> {
        self.symtab.lookup(name).and_then(|s| s.as_number())
    }
}
