//! Cursor over raw input: immutable position + remaining view

use crate::error::LexError;

/// Lexer state. Cheap to copy, every step returns a new cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Unconsumed input
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Step over one char (no-op at end of input)
    pub fn advance(self) -> Self {
        match self.peek() {
            Some(c) => Self {
                pos: self.pos + c.len_utf8(),
                ..self
            },
            None => self,
        }
    }

    /// Consume next char if it satisfies `pred`
    pub fn consume_if(self, pred: impl Fn(char) -> bool) -> (Self, bool) {
        match self.peek() {
            Some(c) if pred(c) => (self.advance(), true),
            _ => (self, false),
        }
    }

    /// Consume chars while `pred` holds, returns the consumed slice
    pub fn consume_while(self, pred: impl Fn(char) -> bool) -> (&'a str, Self) {
        let rest = self.remaining();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        (&rest[..len], Self {
            pos: self.pos + len,
            ..self
        })
    }

    /// Token up to (not including) the first `delim`; cursor ends past `delim`
    pub fn lex_until(self, delim: char) -> Result<(&'a str, Self), LexError> {
        let (token, next) = self.consume_while(|c| c != delim);
        if next.is_eof() {
            return Err(LexError::UnexpectedEnd { expected: delim });
        }
        Ok((token, next.advance()))
    }

    /// Token up to the `close` matching an already consumed `open`.
    ///
    /// Nested `open`/`close` pairs stay inside the token. On end of input the
    /// scanned text is returned alongside the error so callers can degrade.
    pub fn lex_balanced(
        self,
        open: char,
        close: char,
    ) -> Result<(&'a str, Self), (&'a str, LexError)> {
        let rest = self.remaining();
        let mut depth = 0usize;
        for (i, c) in rest.char_indices() {
            if c == open {
                depth += 1;
            } else if c == close {
                if depth == 0 {
                    let next = Self {
                        pos: self.pos + i + c.len_utf8(),
                        ..self
                    };
                    return Ok((&rest[..i], next));
                }
                depth -= 1;
            }
        }
        Err((rest, LexError::UnexpectedEnd { expected: close }))
    }
}
