//! # Calculator Error Type
//!
//! This module defines [`CalcError`], the unified error enum for everything the
//! calculator can report while scanning, parsing and evaluating. It covers:
//!
//! - **Lexical** errors (unrecognized characters, malformed numbers),
//! - **Syntax** errors (a required token is missing),
//! - **Semantic** errors (undefined variables, assignment to constants),
//! - **Math** errors (division by zero, domain/range violations),
//! - **Input** errors (the character source failed).
//!
//! None of these stop a session: each one is handed to
//! [`Diagnostics::report`](crate::Diagnostics::report), counted, and the
//! offending expression evaluates to NaN. Conversions from the underlying
//! error types are derived with `#[from]`.
use crate::SymTabError;
use crate::math::MathError;
use smartstring::alias::String;
use thiserror::Error;

/// Represents all errors the calculator reports.
///
/// The `Display` text is the message printed after the program name, e.g.
/// `calc: divide by 0 near line 3`.
///
/// # Examples
/// ```rust
/// # use hoc_calc::{CalcError, SymTabError};
/// # use hoc_calc::math::MathError;
/// let err: CalcError = MathError::Domain.into();
/// assert_eq!(err.to_string(), "argument out of domain");
///
/// let err = CalcError::BadToken('#');
/// assert_eq!(err.to_string(), "bad token '#'");
/// ```
#[derive(Debug, Error)]
pub enum CalcError {
    /// A character that starts no token.
    #[error("bad token '{0}'")]
    BadToken(char),

    /// Text that looked like a number but does not parse as one.
    #[error("bad number '{0}'")]
    BadNumber(String),

    /// A required token is missing; the payload is the token's spelling.
    #[error("'{0}' expected")]
    Expected(&'static str),

    /// A token that cannot start an operand.
    #[error("primary expected")]
    PrimaryExpected,

    /// Extra tokens after a complete statement.
    #[error("unexpected token '{0}'")]
    UnexpectedToken(&'static str),

    /// A name read before it was ever assigned.
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),

    /// A symbol-table operation failed (e.g. assignment to a constant).
    #[error(transparent)]
    SymTab(#[from] SymTabError),

    /// Right operand of `/` or `%` is zero.
    #[error("divide by 0")]
    DivideByZero,

    /// A checked math built-in failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// The input source failed while reading.
    #[error("input error: {0}")]
    Input(#[from] std::io::Error),
}

impl CalcError {
    /// Broad category of the error, used for logging.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::BadToken(_) | CalcError::BadNumber(_) => ErrorKind::Lexical,
            CalcError::Expected(_) | CalcError::PrimaryExpected | CalcError::UnexpectedToken(_) => {
                ErrorKind::Syntax
            }
            CalcError::UndefinedVariable(_) | CalcError::SymTab(_) => ErrorKind::Semantic,
            CalcError::DivideByZero | CalcError::Math(_) => ErrorKind::Math,
            CalcError::Input(_) => ErrorKind::Input,
        }
    }
}

/// Category of a [`CalcError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
    Math,
    Input,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_error_trait_obj(e: &dyn std::error::Error) -> &dyn std::error::Error {
        e
    }

    #[test]
    fn math_error_maps_to_calc_error() {
        let err: CalcError = MathError::Range.into();
        assert!(matches!(err, CalcError::Math(MathError::Range)));
        let _ = _assert_error_trait_obj(&err);
        assert_eq!(err.to_string(), "result out of range");
        assert_eq!(err.kind(), ErrorKind::Math);
    }

    #[test]
    fn symtab_error_maps_to_calc_error() {
        let underlying = SymTabError::Immutable { name: "pi".into() };
        let err: CalcError = underlying.into();
        assert!(matches!(err, CalcError::SymTab(_)));
        assert_eq!(err.to_string(), "cannot modify constant/built-in 'pi'");
        assert_eq!(err.kind(), ErrorKind::Semantic);
    }

    #[test]
    fn io_error_maps_to_calc_error() {
        let underlying = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8");
        let err: CalcError = underlying.into();
        assert!(err.to_string().starts_with("input error"));
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn messages_quote_their_payload() {
        assert_eq!(CalcError::Expected(")").to_string(), "')' expected");
        assert_eq!(
            CalcError::UndefinedVariable("x".into()).to_string(),
            "undefined variable 'x'"
        );
        assert_eq!(CalcError::BadNumber(".".into()).to_string(), "bad number '.'");
        assert_eq!(CalcError::DivideByZero.to_string(), "divide by 0");
        assert_eq!(CalcError::PrimaryExpected.kind(), ErrorKind::Syntax);
        assert_eq!(CalcError::BadToken('$').kind(), ErrorKind::Lexical);
    }

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn calc_error_is_send_sync_static() {
        _assert_send_sync_static::<CalcError>();
    }
}
