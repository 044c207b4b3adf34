//! # Calculator Parser
//!
//! A recursive-descent parser that evaluates while it parses: every
//! production returns the `f64` value of the text it consumed, there is no
//! syntax tree.
//!
//! ```text
//! statement  := EOS | assign EOS | expression EOS
//! assign     := NAME '=' expression
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/' | '%') unary)*
//! unary      := ('+' | '-') unary | power
//! power      := primary ('^' unary)?
//! primary    := NUMBER | NAME | NAME '=' expression | call | '(' expression ')'
//! call       := BUILTIN0 '(' ')'
//!             | BUILTIN1 '(' expression ')'
//!             | BUILTIN2 '(' expression ',' expression ')'
//! ```
//!
//! `^` is right-associative and binds tighter than a leading sign, so
//! `2^3^2` is `512` and `-2^2` is `-4`. Its exponent is a `unary`, which makes
//! `2^-1` legal.
//!
//! ## Errors
//! Errors never abort a statement. Each one is reported to the session's
//! [`Diagnostics`](crate::Diagnostics) exactly once, the failing
//! sub-expression evaluates to NaN and parsing carries on, so NaN propagates
//! to the statement's value.

use crate::symtab::LAST;
use crate::{CalcError, CalcToken, Scanner, Session, Source, Symbol, TokenID};
use smartstring::alias::String;

/// A completed statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statement {
    /// An expression whose value is printed and stored in `last`.
    Expression(f64),
    /// A top-level assignment; its value is not printed.
    Assignment(f64),
}

impl Statement {
    #[inline]
    pub fn value(&self) -> f64 {
        match *self {
            Statement::Expression(v) | Statement::Assignment(v) => v,
        }
    }
}

/// Parser and evaluator over one input source.
///
/// # Lookahead protocol
///
/// Every production takes a `get` flag. When `get` is `true` the production
/// first consumes a token with [`Scanner::get`]; when `false` the caller
/// guarantees that [`Scanner::current`] already holds the production's first
/// token. Every production returns with `current()` holding the first token
/// *after* the text it recognized, which is how callers find the next
/// operator. [`Scanner::next`] is only used to tell `NAME =` from a plain
/// `NAME`.
///
/// # Example
/// ```rust
/// # use hoc_calc::{Parser, Session, Source, Statement};
/// let mut session = Session::silent("calc");
/// let mut parser = Parser::new(Source::text("r = 2\npi * r^2"));
///
/// assert_eq!(parser.statement(&mut session), Some(Statement::Assignment(2.0)));
/// let area = parser.statement(&mut session).unwrap().value();
/// assert!((area - 12.566_370_614).abs() < 1e-9);
/// assert_eq!(session.value("last"), Some(area));
/// assert_eq!(parser.statement(&mut session), None);
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: Source<'a>) -> Self {
        Self {
            scanner: Scanner::new(source),
        }
    }

    /// Switches to a new input source; see [`Scanner::set_input`].
    pub fn set_input(&mut self, source: Source<'a>, session: &mut Session) {
        self.scanner.set_input(source, session);
    }

    pub fn scanner(&self) -> &Scanner<'a> {
        &self.scanner
    }

    /// Parses and evaluates the next statement.
    ///
    /// Empty statements are skipped. Returns `None` at end of input.
    /// Expression statements also store their value in `last`.
    pub fn statement(&mut self, s: &mut Session) -> Option<Statement> {
        let mut tok = self.scanner.get(s);
        while tok.token_id == TokenID::Eos {
            tok = self.scanner.get(s);
        }
        if tok.token_id == TokenID::End {
            return None;
        }

        let errors = s.error_count();
        let stmt = match self.assignment_target(s) {
            Some(index) => {
                self.scanner.get(s);
                Statement::Assignment(self.assignment(s, index))
            }
            None => Statement::Expression(self.expr(s, false)),
        };
        self.finish_statement(s, errors);

        if let Statement::Expression(value) = stmt {
            let last = s.symtab.intern(LAST);
            if let Err(e) = s.symtab.assign(last, value) {
                s.report(e);
            }
        }
        log::debug!("line {}: {:?}", tok.line_no, stmt);
        Some(stmt)
    }

    /// Symbol index of a `NAME =` at the start of a statement.
    fn assignment_target(&mut self, s: &mut Session) -> Option<usize> {
        let tok = self.scanner.current();
        let is_name = matches!(
            tok.token_id,
            TokenID::Ident | TokenID::Builtin0 | TokenID::Builtin1 | TokenID::Builtin2
        );
        if is_name && self.scanner.next(s).token_id == TokenID::Equals {
            tok.ident()
        } else {
            None
        }
    }

    /// Reports trailing garbage and skips to the end of the statement.
    fn finish_statement(&mut self, s: &mut Session, errors: usize) {
        let tok = self.scanner.current();
        if tok.token_id.ends_statement() {
            return;
        }
        // one error per statement is enough
        if s.error_count() == errors {
            s.report(CalcError::UnexpectedToken(tok.token_id.symbol()));
        }
        while !self.scanner.current().token_id.ends_statement() {
            self.scanner.get(s);
        }
    }

    /// `expression := term (('+' | '-') term)*`
    pub fn expr(&mut self, s: &mut Session, get: bool) -> f64 {
        let mut left = self.term(s, get);
        loop {
            match self.scanner.current().token_id {
                TokenID::Plus => left += self.term(s, true),
                TokenID::Minus => left -= self.term(s, true),
                _ => return left,
            }
        }
    }

    /// `term := unary (('*' | '/' | '%') unary)*`
    pub fn term(&mut self, s: &mut Session, get: bool) -> f64 {
        let mut left = self.unary(s, get);
        loop {
            match self.scanner.current().token_id {
                TokenID::Asterisk => left *= self.unary(s, true),
                TokenID::Slash => {
                    let d = self.unary(s, true);
                    left = if d == 0.0 {
                        s.report(CalcError::DivideByZero)
                    } else {
                        left / d
                    };
                }
                TokenID::Percent => {
                    let d = self.unary(s, true);
                    left = if d == 0.0 {
                        s.report(CalcError::DivideByZero)
                    } else {
                        left % d
                    };
                }
                _ => return left,
            }
        }
    }

    /// `unary := ('+' | '-') unary | power`
    pub fn unary(&mut self, s: &mut Session, get: bool) -> f64 {
        if get {
            self.scanner.get(s);
        }
        match self.scanner.current().token_id {
            TokenID::Minus => -self.unary(s, true),
            TokenID::Plus => self.unary(s, true),
            _ => self.power(s, false),
        }
    }

    /// `power := primary ('^' unary)?`
    pub fn power(&mut self, s: &mut Session, get: bool) -> f64 {
        let base = self.primary(s, get);
        if self.scanner.current().token_id != TokenID::Caret {
            return base;
        }
        let exponent = self.unary(s, true);
        match crate::math::pow(base, exponent) {
            Ok(v) => v,
            Err(e) => s.report(e),
        }
    }

    /// Numbers, names, calls and parenthesized expressions.
    pub fn primary(&mut self, s: &mut Session, get: bool) -> f64 {
        if get {
            self.scanner.get(s);
        }
        let tok = self.scanner.current();
        match tok.token_id {
            TokenID::Number => {
                self.scanner.get(s);
                tok.number().unwrap_or(f64::NAN)
            }
            TokenID::Ident => self.variable(s, tok),
            TokenID::Builtin0 | TokenID::Builtin1 | TokenID::Builtin2 => self.call(s, tok),
            TokenID::LeftParen => {
                let v = self.expr(s, true);
                if self.scanner.current().token_id == TokenID::RightParen {
                    self.scanner.get(s);
                } else {
                    s.report(CalcError::Expected(")"));
                }
                v
            }
            _ => s.report(CalcError::PrimaryExpected),
        }
    }

    /// A name read, or an embedded assignment when `=` follows.
    fn variable(&mut self, s: &mut Session, tok: CalcToken) -> f64 {
        let Some(index) = tok.ident() else {
            return s.report(CalcError::PrimaryExpected);
        };
        if self.scanner.get(s).token_id == TokenID::Equals {
            return self.assignment(s, index);
        }
        match s.symtab.get(index).copied() {
            Ok(Symbol::Variable(v) | Symbol::Constant(v)) => v,
            Ok(Symbol::Undefined) => {
                let name = name_of(s, index);
                s.report(CalcError::UndefinedVariable(name))
            }
            Ok(Symbol::Builtin(_)) => s.report(CalcError::PrimaryExpected),
            Err(e) => s.report(e),
        }
    }

    /// Evaluates the right-hand side and stores it, NaN included; `current()`
    /// holds the `=`.
    fn assignment(&mut self, s: &mut Session, index: usize) -> f64 {
        let value = self.expr(s, true);
        match s.symtab.assign(index, value) {
            Ok(()) => value,
            Err(e) => s.report(e),
        }
    }

    /// Built-in call with exactly the function's arity of arguments.
    fn call(&mut self, s: &mut Session, tok: CalcToken) -> f64 {
        let Some(index) = tok.ident() else {
            return s.report(CalcError::PrimaryExpected);
        };
        if self.scanner.next(s).token_id == TokenID::Equals {
            self.scanner.get(s);
            return self.assignment(s, index);
        }

        let arity = match tok.token_id {
            TokenID::Builtin0 => 0,
            TokenID::Builtin1 => 1,
            _ => 2,
        };
        if self.scanner.get(s).token_id != TokenID::LeftParen {
            return s.report(CalcError::Expected("("));
        }

        let mut args = [0.0; 2];
        if arity == 0 {
            self.scanner.get(s);
        } else {
            args[0] = self.expr(s, true);
            if arity == 2 {
                if self.scanner.current().token_id != TokenID::Comma {
                    return s.report(CalcError::Expected(","));
                }
                args[1] = self.expr(s, true);
            }
        }
        if self.scanner.current().token_id != TokenID::RightParen {
            return s.report(CalcError::Expected(")"));
        }
        self.scanner.get(s);

        match s.symtab.get(index).copied() {
            Ok(symbol) => match symbol.call(&args[..arity]) {
                Some(Ok(v)) => v,
                Some(Err(e)) => s.report(e),
                None => s.report(CalcError::PrimaryExpected),
            },
            Err(e) => s.report(e),
        }
    }
}

fn name_of(s: &Session, index: usize) -> String {
    s.symtab.name(index).map(String::from).unwrap_or_default()
}
