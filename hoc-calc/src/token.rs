//! # Calculator Tokens
//!
//! This module defines the token kind, the token payload and the concrete
//! token type produced by the [`Scanner`](crate::Scanner) and consumed by the
//! [`Parser`](crate::Parser):
//!
//! - [`TokenID`]: the kind tag (operators, literals, identifiers, built-ins,
//!   end-of-statement and end-of-input),
//! - [`TokenValue`]: the payload carried by a token (a symbol-table index or a
//!   numeric literal),
//! - [`CalcToken`]: a kind, a payload and the 1-based source line number.
//!
//! Tokens are small `Copy` values produced on demand; the scanner never holds
//! more than the current token and one token of lookahead.

use std::fmt;

/// The kind of a lexical token.
///
/// Operator kinds map one-to-one onto their source characters (see
/// [`TokenID::symbol`]). Identifier kinds are split by what the symbol table
/// knows about the name when it is scanned: plain names (undefined, variable or
/// constant) are [`TokenID::Ident`], built-in functions are tagged with their
/// arity so the parser can dispatch calls without a second lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenID {
    /// End of input. Terminal: once produced, it is produced forever.
    End,
    /// End of statement (`;` or newline).
    Eos,
    /// Floating-point literal.
    Number,
    /// Undefined, variable or constant identifier.
    Ident,
    /// Built-in function taking no arguments.
    Builtin0,
    /// Built-in function taking one argument.
    Builtin1,
    /// Built-in function taking two arguments.
    Builtin2,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^`
    Caret,
    /// `=`
    Equals,
    /// `,`
    Comma,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
}

impl TokenID {
    /// Maps a single operator or punctuation character onto its kind.
    ///
    /// Returns `None` for characters that do not form a token on their own.
    ///
    /// # Example
    /// ```rust
    /// # use hoc_calc::TokenID;
    /// assert_eq!(TokenID::from_char('^'), Some(TokenID::Caret));
    /// assert_eq!(TokenID::from_char('#'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        let id = match c {
            '+' => TokenID::Plus,
            '-' => TokenID::Minus,
            '*' => TokenID::Asterisk,
            '/' => TokenID::Slash,
            '%' => TokenID::Percent,
            '^' => TokenID::Caret,
            '=' => TokenID::Equals,
            ',' => TokenID::Comma,
            '(' => TokenID::LeftParen,
            ')' => TokenID::RightParen,
            ';' => TokenID::Eos,
            _ => return None,
        };
        Some(id)
    }

    /// Human-readable spelling used in diagnostics and trace logs.
    pub fn symbol(self) -> &'static str {
        match self {
            TokenID::End => "end of input",
            TokenID::Eos => "end of statement",
            TokenID::Number => "number",
            TokenID::Ident => "name",
            TokenID::Builtin0 | TokenID::Builtin1 | TokenID::Builtin2 => "built-in",
            TokenID::Plus => "+",
            TokenID::Minus => "-",
            TokenID::Asterisk => "*",
            TokenID::Slash => "/",
            TokenID::Percent => "%",
            TokenID::Caret => "^",
            TokenID::Equals => "=",
            TokenID::Comma => ",",
            TokenID::LeftParen => "(",
            TokenID::RightParen => ")",
        }
    }

    /// Returns `true` for the kinds that end a statement.
    #[inline]
    pub fn ends_statement(self) -> bool {
        matches!(self, TokenID::Eos | TokenID::End)
    }
}

impl fmt::Display for TokenID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The payload carried by a lexical token.
///
/// # Variants
///
/// - [`TokenValue::None`]: no extra data (operators, punctuation, end markers).
/// - [`TokenValue::Ident(usize)`]: the **symbol table index** of an identifier
///   or built-in name, as returned by [`SymTab::intern`](crate::SymTab::intern).
/// - [`TokenValue::Number(f64)`]: a parsed floating-point literal.
///
/// # Example
/// ```rust
/// # use hoc_calc::TokenValue;
/// let token = TokenValue::Number(42.5);
///
/// let TokenValue::Number(n) = token else {
///     panic!("Expected a numeric token");
/// };
/// assert_eq!(n, 42.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenValue {
    /// No associated data.
    None,

    /// Identifier token with an index into the symbol table.
    Ident(usize),

    /// Floating-point literal.
    Number(f64),
}

/// A concrete lexical token.
///
/// # Fields
///
/// - [`token_id`](#structfield.token_id): the token's kind,
/// - [`value`](#structfield.value): associated payload (symbol index or literal),
/// - [`line_no`](#structfield.line_no): 1-based line the token was read on.
///
/// # Example
/// ```rust
/// # use hoc_calc::{CalcToken, TokenID, TokenValue};
/// let tok = CalcToken::new(TokenID::Number, TokenValue::Number(99.0), 3);
/// assert_eq!(tok.token_id, TokenID::Number);
/// assert_eq!(tok.number(), Some(99.0));
/// assert_eq!(tok.line_no, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalcToken {
    /// The token's kind (identifier, operator, number, ...).
    pub token_id: TokenID,
    /// The associated value for the token, if applicable.
    pub value: TokenValue,
    /// The line number in the input source where the token occurs.
    pub line_no: usize,
}

impl CalcToken {
    #[inline]
    pub fn new(token_id: TokenID, value: TokenValue, line_no: usize) -> Self {
        Self {
            token_id,
            value,
            line_no,
        }
    }

    /// A token without payload.
    #[inline]
    pub fn bare(token_id: TokenID, line_no: usize) -> Self {
        Self::new(token_id, TokenValue::None, line_no)
    }

    /// Symbol-table index of an identifier or built-in token.
    #[inline]
    pub fn ident(&self) -> Option<usize> {
        match self.value {
            TokenValue::Ident(index) => Some(index),
            _ => None,
        }
    }

    /// Value of a numeric literal token.
    #[inline]
    pub fn number(&self) -> Option<f64> {
        match self.value {
            TokenValue::Number(n) => Some(n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_payload_kind() {
        let name = CalcToken::new(TokenID::Ident, TokenValue::Ident(7), 1);
        assert_eq!(name.ident(), Some(7));
        assert_eq!(name.number(), None);

        let num = CalcToken::new(TokenID::Number, TokenValue::Number(-1.5), 2);
        assert_eq!(num.ident(), None);
        assert_eq!(num.number(), Some(-1.5));

        let plus = CalcToken::bare(TokenID::Plus, 4);
        assert_eq!(plus.value, TokenValue::None);
        assert_eq!(plus.line_no, 4);
    }

    #[test]
    fn every_operator_char_round_trips_through_symbol() {
        for c in "+-*/%^=,()".chars() {
            let id = TokenID::from_char(c).unwrap();
            assert_eq!(id.symbol(), c.to_string());
        }
        assert_eq!(TokenID::from_char(';'), Some(TokenID::Eos));
        assert_eq!(TokenID::from_char('a'), None);
        assert_eq!(TokenID::from_char('\n'), None);
    }

    #[test]
    fn statement_terminators() {
        assert!(TokenID::Eos.ends_statement());
        assert!(TokenID::End.ends_statement());
        assert!(!TokenID::RightParen.ends_statement());
    }

    #[test]
    fn calc_token_is_copy_and_debuggable() {
        let t1 = CalcToken::new(TokenID::Number, TokenValue::Number(1.0), 10);
        let t2 = t1;
        assert_eq!(t1, t2);
        assert!(format!("{t1:?}").contains("CalcToken"));
        assert_eq!(TokenID::Caret.to_string(), "^");
    }
}
