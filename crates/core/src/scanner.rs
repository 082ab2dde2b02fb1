//! Character-stream scanner.
//!
//! Tokens are produced on demand from any [`BufRead`]; the source is read
//! one line at a time, so parsing can start before the whole input is
//! available. One token can be pushed back, and the next few significant
//! characters can be inspected without consuming anything.

use std::collections::VecDeque;
use std::io::{BufRead, ErrorKind};

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Run of word characters: ASCII letters and digits, `_ / . ~`, and any
    /// non-whitespace code point from U+00A0 up
    Word(String),
    /// Content of a `"…"` or `'…'` literal, without the quotes
    Quoted(String),
    /// Any other single non-whitespace character
    Op(char),
    Eof,
}

impl Token {
    pub fn is_op(&self, c: char) -> bool {
        matches!(self, Token::Op(o) if *o == c)
    }

    pub fn word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            _ => None,
        }
    }

    /// True for a word whose first character is an ASCII digit.
    pub fn is_digit_word(&self) -> bool {
        self.word()
            .and_then(|w| w.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
    }

    fn lexeme(&self) -> String {
        match self {
            Token::Word(w) => w.clone(),
            Token::Quoted(q) => format!("\"{}\"", q),
            Token::Op(c) => c.to_string(),
            Token::Eof => String::new(),
        }
    }
}

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '_' | '/' | '.' | '~')
        || (c >= '\u{a0}' && !c.is_whitespace())
}

fn is_blank(c: char) -> bool {
    c <= ' ' || c.is_whitespace()
}

pub struct Scanner<B> {
    reader: B,
    buf: VecDeque<char>,
    exhausted: bool,
    line: u32,
    pushed: Option<Token>,
}

impl<B: BufRead> Scanner<B> {
    pub fn new(reader: B) -> Self {
        Scanner {
            reader,
            buf: VecDeque::new(),
            exhausted: false,
            line: 1,
            pushed: None,
        }
    }

    /// Line the scanner is currently on, starting at 1.
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        if let Some(tok) = self.pushed.take() {
            return Ok(tok);
        }
        loop {
            let Some(c) = self.peek_raw(0)? else {
                return Ok(Token::Eof);
            };
            if is_blank(c) {
                self.bump();
                continue;
            }
            if c == '#' {
                self.skip_comment()?;
                continue;
            }
            if c == '"' || c == '\'' {
                return self.quoted(c);
            }
            if is_word_char(c) {
                return self.word();
            }
            self.bump();
            return Ok(Token::Op(c));
        }
    }

    /// Make `token` the result of the next [`next_token`](Self::next_token).
    ///
    /// # Panics
    ///
    /// If a token is already pushed back.
    pub fn push_back(&mut self, token: Token) {
        assert!(
            self.pushed.is_none(),
            "push_back called twice without an intervening next_token (holding {:?})",
            self.pushed
        );
        self.pushed = Some(token);
    }

    /// The `n`-th significant character ahead (0-based), skipping blanks and
    /// comments, without consuming anything. A pushed-back token counts with
    /// its own characters. Characters are counted one by one, so a word
    /// contributes as many as it is long.
    pub fn peek_significant(&mut self, n: usize) -> Result<Option<char>, ParseError> {
        let mut remaining = n;
        if let Some(tok) = &self.pushed {
            let lexeme = tok.lexeme();
            if let Some(c) = lexeme.chars().nth(remaining) {
                return Ok(Some(c));
            }
            remaining -= lexeme.chars().count();
        }

        let mut i = 0;
        let mut in_comment = false;
        while let Some(c) = self.peek_raw(i)? {
            i += 1;
            if in_comment {
                in_comment = c != '\n';
                continue;
            }
            if c == '#' {
                in_comment = true;
                continue;
            }
            if is_blank(c) {
                continue;
            }
            if remaining == 0 {
                return Ok(Some(c));
            }
            remaining -= 1;
        }
        Ok(None)
    }

    fn peek_raw(&mut self, i: usize) -> Result<Option<char>, ParseError> {
        while self.buf.len() <= i && !self.exhausted {
            let mut chunk = String::new();
            match self.reader.read_line(&mut chunk) {
                Ok(0) => self.exhausted = true,
                Ok(_) => self.buf.extend(chunk.chars()),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(ParseError::stream(self.line, &e)),
            }
        }
        Ok(self.buf.get(i).copied())
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.buf.pop_front();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn skip_comment(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.peek_raw(0)? {
            if c == '\n' {
                break;
            }
            self.bump();
        }
        Ok(())
    }

    // A quoted literal ends at the matching quote or at the end of the line.
    fn quoted(&mut self, quote: char) -> Result<Token, ParseError> {
        self.bump();
        let mut text = String::new();
        while let Some(c) = self.peek_raw(0)? {
            if c == '\n' {
                break;
            }
            self.bump();
            if c == quote {
                break;
            }
            text.push(c);
        }
        Ok(Token::Quoted(text))
    }

    fn word(&mut self) -> Result<Token, ParseError> {
        let mut text = String::new();
        while let Some(c) = self.peek_raw(0)? {
            if !is_word_char(c) {
                break;
            }
            text.push(c);
            self.bump();
        }
        Ok(Token::Word(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Read};

    fn scan(src: &str) -> Vec<Token> {
        let mut s = Scanner::new(src.as_bytes());
        let mut out = Vec::new();
        loop {
            let tok = s.next_token().unwrap();
            if tok == Token::Eof {
                return out;
            }
            out.push(tok);
        }
    }

    fn w(s: &str) -> Token {
        Token::Word(s.to_owned())
    }

    #[test]
    fn words_and_operators() {
        assert_eq!(
            scan("3/4 x^2 - y1*{1i2}"),
            vec![
                w("3/4"),
                w("x"),
                Token::Op('^'),
                w("2"),
                Token::Op('-'),
                w("y1"),
                Token::Op('*'),
                Token::Op('{'),
                w("1i2"),
                Token::Op('}'),
            ]
        );
    }

    #[test]
    fn tilde_dot_and_high_code_points_are_word_chars() {
        assert_eq!(scan("~3.5 é_1"), vec![w("~3.5"), w("é_1")]);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(scan("x # ignored ( )\ny"), vec![w("x"), w("y")]);
    }

    #[test]
    fn quoted_literals_end_at_quote_or_newline() {
        assert_eq!(
            scan("\"1 + i\" 'abc\nz"),
            vec![
                Token::Quoted("1 + i".into()),
                Token::Quoted("abc".into()),
                w("z")
            ]
        );
    }

    #[test]
    fn push_back_replays_once() {
        let mut s = Scanner::new("a b".as_bytes());
        let a = s.next_token().unwrap();
        s.push_back(a.clone());
        assert_eq!(s.next_token().unwrap(), a);
        assert_eq!(s.next_token().unwrap(), w("b"));
        assert_eq!(s.next_token().unwrap(), Token::Eof);
        assert_eq!(s.next_token().unwrap(), Token::Eof);
    }

    #[test]
    #[should_panic(expected = "push_back called twice")]
    fn second_push_back_panics() {
        let mut s = Scanner::new("a".as_bytes());
        s.push_back(Token::Op('+'));
        s.push_back(Token::Op('-'));
    }

    #[test]
    fn peek_skips_blanks_and_comments() {
        let mut s = Scanner::new("  * # c\n *  5".as_bytes());
        assert_eq!(s.peek_significant(0).unwrap(), Some('*'));
        assert_eq!(s.peek_significant(1).unwrap(), Some('*'));
        assert_eq!(s.peek_significant(2).unwrap(), Some('5'));
        assert_eq!(s.peek_significant(3).unwrap(), None);
        assert_eq!(s.next_token().unwrap(), Token::Op('*'));
    }

    #[test]
    fn peek_sees_pushed_token_first() {
        let mut s = Scanner::new("y".as_bytes());
        s.push_back(w("ab"));
        assert_eq!(s.peek_significant(0).unwrap(), Some('a'));
        assert_eq!(s.peek_significant(1).unwrap(), Some('b'));
        assert_eq!(s.peek_significant(2).unwrap(), Some('y'));
    }

    #[test]
    fn line_numbers_advance() {
        let mut s = Scanner::new("a\n\nb".as_bytes());
        s.next_token().unwrap();
        assert_eq!(s.line(), 1);
        s.next_token().unwrap();
        assert_eq!(s.line(), 3);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn read_errors_become_stream_failures() {
        let mut s = Scanner::new(BufReader::new(Broken));
        let err = s.next_token().unwrap_err();
        assert!(matches!(err, ParseError::StreamFailure { .. }), "{:?}", err);
    }

    #[test]
    fn invalid_utf8_is_a_stream_failure() {
        let bytes: &[u8] = &[b'x', b' ', 0xff, 0xfe, b'\n'];
        let mut s = Scanner::new(bytes);
        assert!(matches!(
            s.next_token(),
            Err(ParseError::StreamFailure { .. })
        ));
    }
}
