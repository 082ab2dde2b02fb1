use std::io::BufRead;

use super::Parser;
use crate::error::ParseError;
use crate::poly::{OrderKind, SplitIndex, TermOrder};
use crate::scanner::Token;

impl<B: BufRead> Parser<B> {
    // -- Variable lists ---------------------------------------------

    /// `(a, b c)` or `{a, b}`. Without an opening bracket the list is
    /// empty and the token is left unread.
    pub fn parse_variable_list(&mut self) -> Result<Vec<String>, ParseError> {
        let tok = self.advance()?;
        let closer = match tok {
            Token::Op('(') => ')',
            Token::Op('{') => '}',
            other => {
                self.push_back(other);
                return Ok(Vec::new());
            }
        };
        let mut vars = Vec::new();
        loop {
            match self.advance()? {
                Token::Eof => break,
                Token::Op(c) if c == closer => break,
                Token::Word(w) | Token::Quoted(w) => vars.push(w),
                Token::Op(_) => {}
            }
        }
        Ok(vars)
    }

    // -- Weights ----------------------------------------------------

    /// `(w1, …, wn)`.
    pub fn parse_weight_list(&mut self) -> Result<Vec<u64>, ParseError> {
        let tok = self.advance()?;
        if !tok.is_op('(') {
            self.push_back(tok);
            return Ok(Vec::new());
        }
        self.weight_row()
    }

    /// `((w11, …), (w21, …))`, or a single row `(w1, …)`.
    pub fn parse_weight_array(&mut self) -> Result<Vec<Vec<u64>>, ParseError> {
        let tok = self.advance()?;
        if !tok.is_op('(') {
            self.push_back(tok);
            return Ok(Vec::new());
        }
        if self.peek_char(0)? != Some('(') {
            return Ok(vec![self.weight_row()?]);
        }
        let mut rows = Vec::new();
        loop {
            match self.advance()? {
                Token::Op('(') => rows.push(self.weight_row()?),
                Token::Op(')') | Token::Eof => break,
                Token::Op(',') => {}
                other => {
                    return Err(self.invalid_ring(format!(
                        "expected a weight row, got {:?}",
                        other
                    )))
                }
            }
        }
        Ok(rows)
    }

    // Integers up to ')', the '(' already read.
    fn weight_row(&mut self) -> Result<Vec<u64>, ParseError> {
        let mut row = Vec::new();
        loop {
            match self.advance()? {
                Token::Op(')') | Token::Eof => break,
                Token::Op(',') => {}
                Token::Word(w) => {
                    let weight = w.parse::<u64>().map_err(|_| {
                        self.invalid_ring(format!("weight '{}' is not a non-negative integer", w))
                    })?;
                    row.push(weight);
                }
                other => {
                    return Err(self.invalid_ring(format!("unexpected {:?} in weight list", other)))
                }
            }
        }
        Ok(row)
    }

    // -- Split index ------------------------------------------------

    /// `|i|` or `[i,j]` (also `[i]`).
    pub fn parse_split_index(&mut self) -> Result<SplitIndex, ParseError> {
        let tok = self.advance()?;
        if tok.is_op('|') {
            let i = self.split_point()?;
            self.skip_op('|')?;
            return Ok(SplitIndex::Single(i));
        }
        if !tok.is_op('[') {
            self.push_back(tok);
            return Ok(SplitIndex::Unspecified);
        }
        let i = self.split_point()?;
        let next = self.advance()?;
        if !next.is_op(',') {
            self.push_back(next);
            self.skip_op(']')?;
            return Ok(SplitIndex::Single(i));
        }
        let j = self.split_point()?;
        self.skip_op(']')?;
        Ok(SplitIndex::Pair(i, j))
    }

    fn split_point(&mut self) -> Result<usize, ParseError> {
        match self.advance()? {
            Token::Word(w) => w
                .parse::<usize>()
                .map_err(|_| self.invalid_ring(format!("split index '{}' is not a number", w))),
            other => Err(self.invalid_ring(format!("expected a split index, got {:?}", other))),
        }
    }

    /// Consume `c` if it is next.
    pub(super) fn skip_op(&mut self, c: char) -> Result<(), ParseError> {
        let tok = self.advance()?;
        if !tok.is_op(c) {
            self.push_back(tok);
        }
        Ok(())
    }

    // -- Term orders ------------------------------------------------

    /// Order keyword with an optional split index, or `W` and a weight
    /// array. Anything else is left unread and gives the default order.
    pub fn parse_term_order(&mut self, nvars: usize) -> Result<TermOrder, ParseError> {
        let tok = self.advance()?;
        let order = match tok.word() {
            Some(w) if w.eq_ignore_ascii_case("W") => {
                TermOrder::weighted(self.parse_weight_array()?)
            }
            Some(w) => match OrderKind::from_keyword(w) {
                Some(kind) => TermOrder::block(kind, self.parse_split_index()?),
                None => {
                    self.push_back(tok);
                    return Ok(TermOrder::default());
                }
            },
            None => {
                self.push_back(tok);
                return Ok(TermOrder::default());
            }
        };
        order
            .validate(nvars)
            .map_err(|msg| self.invalid_ring(msg))?;
        Ok(order)
    }
}
