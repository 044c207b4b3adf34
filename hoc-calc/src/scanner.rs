//! # Scanner
//!
//! Turns a [`Source`] into [`CalcToken`]s on demand, keeping the most recently
//! consumed token and at most one token of lookahead.
//!
//! Input is read a line at a time, so an interactive session sees each
//! statement as soon as its line is complete. Identifiers are interned into
//! the session's symbol table as they are scanned; malformed input is reported
//! to the session's diagnostics and replaced by an end-of-statement token so
//! the parser can resynchronize.

use crate::{CalcError, CalcToken, Session, Source, TokenID, TokenValue};

/// Tokenizer with one-token lookahead.
///
/// # Example
/// ```rust
/// # use hoc_calc::{Scanner, Session, Source, TokenID};
/// let mut session = Session::silent("calc");
/// let mut scanner = Scanner::new(Source::text("x = 2"));
///
/// assert_eq!(scanner.get(&mut session).token_id, TokenID::Ident);
/// assert_eq!(scanner.next(&mut session).token_id, TokenID::Equals);
/// // peeking does not consume
/// assert_eq!(scanner.current().token_id, TokenID::Ident);
/// assert_eq!(scanner.get(&mut session).token_id, TokenID::Equals);
/// assert_eq!(scanner.get(&mut session).number(), Some(2.0));
/// assert_eq!(scanner.get(&mut session).token_id, TokenID::End);
/// assert_eq!(scanner.get(&mut session).token_id, TokenID::End);
/// ```
#[derive(Debug)]
pub struct Scanner<'a> {
    source: Source<'a>,
    buf: std::string::String,
    pos: usize,
    current: CalcToken,
    lookahead: Option<CalcToken>,
    exhausted: bool,
    // line count advances when the token after a newline is scanned
    newline_pending: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner reading from `source`.
    ///
    /// Until the first [`get`](Self::get), [`current`](Self::current) holds an
    /// end-of-statement token.
    pub fn new(source: Source<'a>) -> Self {
        Self {
            source,
            buf: std::string::String::new(),
            pos: 0,
            current: CalcToken::bare(TokenID::Eos, 1),
            lookahead: None,
            exhausted: false,
            newline_pending: false,
        }
    }

    /// Switches to a new input source.
    ///
    /// The previous source is dropped (releasing it if owned), buffered
    /// tokens and the end-of-input state are discarded, and line numbering
    /// restarts at 1. The session's error count is left alone.
    pub fn set_input(&mut self, source: Source<'a>, session: &mut Session) {
        log::debug!("switching input: {:?} -> {:?}", self.source, source);
        self.source = source;
        self.buf.clear();
        self.pos = 0;
        self.current = CalcToken::bare(TokenID::Eos, 1);
        self.lookahead = None;
        self.exhausted = false;
        self.newline_pending = false;
        session.diag.reset_line();
    }

    /// The most recently consumed token.
    #[inline]
    pub fn current(&self) -> CalcToken {
        self.current
    }

    /// The next token, without consuming it.
    pub fn next(&mut self, session: &mut Session) -> CalcToken {
        match self.lookahead {
            Some(tok) => tok,
            None => {
                let tok = self.scan(session);
                self.lookahead = Some(tok);
                tok
            }
        }
    }

    /// Consumes the next token and returns it; it becomes [`current`](Self::current).
    pub fn get(&mut self, session: &mut Session) -> CalcToken {
        let tok = match self.lookahead.take() {
            Some(tok) => tok,
            None => self.scan(session),
        };
        log::trace!("TOKEN: {:?} line {}", tok.token_id, tok.line_no);
        self.current = tok;
        tok
    }

    fn scan(&mut self, session: &mut Session) -> CalcToken {
        if std::mem::take(&mut self.newline_pending) {
            session.diag.next_line();
        }
        loop {
            let line = session.diag.line();
            let Some(c) = self.peek(session) else {
                return CalcToken::bare(TokenID::End, line);
            };
            match c {
                '\n' => {
                    self.bump();
                    self.newline_pending = true;
                    return CalcToken::bare(TokenID::Eos, line);
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                c if c.is_ascii_digit() || c == '.' => return self.scan_number(session),
                c if c.is_ascii_alphabetic() => return self.scan_name(session),
                c => {
                    self.bump();
                    return match TokenID::from_char(c) {
                        Some(token_id) => CalcToken::bare(token_id, line),
                        None => {
                            session.report(CalcError::BadToken(c));
                            CalcToken::bare(TokenID::Eos, line)
                        }
                    };
                }
            }
        }
    }

    fn scan_number(&mut self, session: &mut Session) -> CalcToken {
        let line = session.diag.line();
        let start = self.pos;
        self.eat_while(|c| c.is_ascii_digit());
        if self.peek_at(0) == Some('.') {
            self.bump();
            self.eat_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek_at(0), Some('e' | 'E')) {
            // the exponent only counts when a digit follows
            let digits_at = if matches!(self.peek_at(1), Some('+' | '-')) {
                2
            } else {
                1
            };
            if self.peek_at(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += digits_at;
                self.eat_while(|c| c.is_ascii_digit());
            }
        }

        let text = &self.buf[start..self.pos];
        match text.parse::<f64>() {
            Ok(n) => CalcToken::new(TokenID::Number, TokenValue::Number(n), line),
            Err(_) => {
                session.report(CalcError::BadNumber(text.into()));
                CalcToken::bare(TokenID::Eos, line)
            }
        }
    }

    fn scan_name(&mut self, session: &mut Session) -> CalcToken {
        let line = session.diag.line();
        let start = self.pos;
        self.eat_while(|c| c.is_ascii_alphanumeric());

        let index = session.symtab.intern(&self.buf[start..self.pos]);
        let token_id = match session.symtab.get(index).ok().and_then(|s| s.arity()) {
            Some(0) => TokenID::Builtin0,
            Some(1) => TokenID::Builtin1,
            Some(_) => TokenID::Builtin2,
            None => TokenID::Ident,
        };
        CalcToken::new(token_id, TokenValue::Ident(index), line)
    }

    /// Next character, reading another line when the buffer is used up.
    fn peek(&mut self, session: &mut Session) -> Option<char> {
        if self.pos >= self.buf.len() {
            if self.exhausted {
                return None;
            }
            self.buf.clear();
            self.pos = 0;
            match self.source.read_line(&mut self.buf) {
                Ok(0) => {
                    self.exhausted = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("read failed, treating as end of input: {e}");
                    session.report(CalcError::Input(e));
                    self.buf.clear();
                    self.exhausted = true;
                    return None;
                }
            }
        }
        self.peek_at(0)
    }

    /// Character `n` positions ahead within the buffered line.
    #[inline]
    fn peek_at(&self, n: usize) -> Option<char> {
        self.buf[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_at(0)?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek_at(0).is_some_and(&pred) {
            self.bump();
        }
    }
}
