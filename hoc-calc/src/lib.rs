//! # hoc-calc
//!
//! An interactive floating-point calculator in the tradition of `hoc`: a
//! hand-written scanner with one token of lookahead feeds a recursive-descent
//! parser that evaluates as it parses. Statements end at a newline or `;`,
//! variables are created by assignment, and a handful of constants and checked
//! math functions are built in.
//!
//! ```text
//! x = 3
//! y = x ^ 2 + 1
//! sqrt(y - 1) * pi
//! 	9.42477796076938
//! ```
//!
//! Errors (bad characters, syntax errors, undefined names, division by zero,
//! domain and range errors of the math functions) are counted and printed as
//! they happen but never stop the session: the failing sub-expression
//! evaluates to NaN and evaluation resumes.
//!
//! ## Overview
//!
//! - [`token`]: [`CalcToken`], [`TokenID`] and [`TokenValue`].
//! - [`input`]: [`Source`], a borrowed or owned line reader.
//! - [`scanner`]: [`Scanner`], the tokenizer.
//! - [`symtab`]: [`SymTab`], names bound to variables, constants and
//!   built-ins.
//! - [`math`]: the checked math functions behind the built-ins.
//! - [`diag`]: [`Diagnostics`], the error counter and message sink.
//! - [`session`]: [`Session`], symbol table plus diagnostics.
//! - [`parser`]: [`Parser`], the recursive-descent evaluator.
//! - [`calc`]: [`Calculator`], which runs whole inputs and prints results.
//!
//! ## Example
//!
//! ```rust
//! use hoc_calc::{Calculator, Session, Source, Statement};
//!
//! let mut calc = Calculator::with_session(Session::silent("calc"));
//! assert_eq!(
//!     calc.eval("x = 3; y = x^2 + 1; y - 1"),
//!     vec![
//!         Statement::Assignment(3.0),
//!         Statement::Assignment(10.0),
//!         Statement::Expression(9.0),
//!     ]
//! );
//!
//! let mut out = Vec::new();
//! calc.run(Source::text("last / 0\nlast * 2\n"), &mut out).unwrap();
//! assert_eq!(out, b"\tnan\n\tnan\n");
//! assert_eq!(calc.error_count(), 1);
//! ```
pub mod calc;
pub mod diag;
pub mod error;
pub mod input;
pub mod math;
pub mod parser;
pub mod scanner;
pub mod session;
pub mod symtab;
pub mod token;

pub use calc::{Calculator, format_value};
pub use diag::{Diagnostics, Reported};
pub use error::{CalcError, ErrorKind};
pub use input::Source;
pub use parser::{Parser, Statement};
pub use scanner::Scanner;
pub use session::Session;
pub use symtab::{Builtin, SymTab, SymTabError, Symbol};
pub use token::{CalcToken, TokenID, TokenValue};
