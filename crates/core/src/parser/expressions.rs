use std::io::BufRead;

use log::debug;

use super::{LiteralScope, ParseContext, Parser};
use crate::arith::{ArithError, CoefficientKind, Ring};
use crate::error::ParseError;
use crate::poly::{Polynomial, PolynomialRing};
use crate::scanner::Token;

/// How an expression ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Terminator {
    /// `,` was consumed
    Comma,
    /// `)` was consumed
    Close,
    /// End of input, or the caller's closer (left unread)
    End,
}

enum Factor<R: Ring> {
    Coefficient(R::Elem),
    Variable(usize),
    Polynomial(Polynomial<R>),
}

/// Rolling sum of finished terms and the term being multiplied together.
struct Accumulator<'r, R: Ring> {
    ring: &'r PolynomialRing<R>,
    sum: Polynomial<R>,
    term: Polynomial<R>,
    pending: bool,
}

impl<'r, R: Ring> Accumulator<'r, R> {
    fn new(ring: &'r PolynomialRing<R>) -> Self {
        Accumulator {
            ring,
            sum: ring.zero(),
            term: ring.one(),
            pending: false,
        }
    }

    fn negate(&mut self) {
        self.term = self.ring.neg(&self.term);
    }

    // Factors multiply the term from the right.
    fn multiply(&mut self, factor: Factor<R>, exp: u64) {
        let ring = self.ring;
        self.term = match factor {
            Factor::Coefficient(c) => ring.scale(&self.term, &ring.coefficients().pow(&c, exp)),
            Factor::Variable(ix) => ring.mul(&self.term, &ring.univariate(ix, exp)),
            Factor::Polynomial(p) => ring.mul(&self.term, &ring.pow(&p, exp)),
        };
        self.pending = true;
    }

    /// Add the term to the sum, unless it is only signs.
    fn flush(&mut self) {
        if self.pending {
            self.sum = self.ring.add(&self.sum, &self.term);
        }
        self.term = self.ring.one();
        self.pending = false;
    }

    fn finish(mut self) -> Polynomial<R> {
        self.flush();
        self.sum
    }
}

fn is_numeral_start(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '/' | '.' | '~')
}

fn is_hypercomplex(kind: CoefficientKind) -> bool {
    matches!(
        kind,
        CoefficientKind::Complex | CoefficientKind::Quaternion | CoefficientKind::Octonion
    )
}

/// `3x` → (`3`, `x`): a numeral with a symbol run on.
fn split_juxtaposed(word: &str) -> Option<(&str, &str)> {
    let idx = word.find(|c: char| c.is_alphabetic() || c == '_')?;
    if idx == 0 {
        return None;
    }
    Some(word.split_at(idx))
}

fn reason(err: ArithError) -> String {
    match err {
        ArithError::InvalidLiteral { reason, .. } => reason,
        other => other.to_string(),
    }
}

impl<B: BufRead> Parser<B> {
    // -- Exponents --------------------------------------------------

    /// `^n` or `**n`. Anything else is left unread and gives 1.
    ///
    /// Only the leading digits of the exponent word are used; a run-on
    /// symbol (`y` in `x^2y`) is pushed back as a word of its own. Signs,
    /// fractions and decimal points are malformed.
    pub fn parse_exponent(&mut self) -> Result<u64, ParseError> {
        let tok = self.advance()?;
        let skip = if tok.is_op('^') {
            0
        } else if tok.is_op('*') && self.peek_char(0)? == Some('*') {
            1
        } else {
            self.push_back(tok);
            return Ok(1);
        };

        match self.peek_char(skip)? {
            Some(c) if c.is_ascii_digit() => {}
            Some('~') => return Err(self.malformed("negative exponent")),
            Some('-') if self.digit_ahead(skip + 1)? => {
                return Err(self.malformed("negative exponent"))
            }
            Some('.' | '/') => return Err(self.malformed("exponent is not an integer")),
            _ => {
                self.push_back(tok);
                return Ok(1);
            }
        }
        if skip == 1 {
            self.advance()?;
        }

        let word = match self.advance()? {
            Token::Word(w) => w,
            other => return Err(self.malformed(format!("expected exponent, got {:?}", other))),
        };
        let end = word
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(word.len());
        let (digits, rest) = word.split_at(end);
        let exp = digits
            .parse::<u64>()
            .map_err(|_| self.malformed(format!("exponent {} is out of range", digits)))?;
        if !rest.is_empty() {
            if !rest.starts_with(|c: char| c.is_alphabetic() || c == '_') {
                return Err(self.malformed(format!("exponent '{}' is not an integer", word)));
            }
            self.push_back(Token::Word(rest.to_owned()));
        }
        Ok(exp)
    }

    // -- Expressions ------------------------------------------------

    /// One polynomial of the context's ring.
    ///
    /// Reads up to and including a `)` or `,` at the outermost level, or
    /// to the end of input. An empty expression is zero.
    pub fn parse_polynomial<R: Ring>(
        &mut self,
        ctx: ParseContext<'_, R>,
    ) -> Result<Polynomial<R>, ParseError> {
        self.expression(ctx, None).map(|(p, _)| p)
    }

    /// Like [`parse_polynomial`](Self::parse_polynomial), and also stops in
    /// front of `closer`.
    pub(super) fn expression<R: Ring>(
        &mut self,
        ctx: ParseContext<'_, R>,
        closer: Option<char>,
    ) -> Result<(Polynomial<R>, Terminator), ParseError> {
        let mut acc = Accumulator::new(ctx.ring());
        loop {
            let mut tok = self.advance()?;
            loop {
                match tok {
                    Token::Op('-') => acc.negate(),
                    Token::Op('+') | Token::Op('*') => {}
                    _ => break,
                }
                tok = self.advance()?;
            }

            let factor = match tok {
                Token::Eof => return Ok((acc.finish(), Terminator::End)),
                Token::Op(')') => return Ok((acc.finish(), Terminator::Close)),
                Token::Op(',') => return Ok((acc.finish(), Terminator::Comma)),
                Token::Op(c) if Some(c) == closer => {
                    self.push_back(tok);
                    return Ok((acc.finish(), Terminator::End));
                }
                Token::Op('}') => return Err(self.malformed("mismatch of braces: '}' without '{'")),
                Token::Op('{') => {
                    let text = self.nested(|p| p.forced_coefficient())?;
                    Factor::Coefficient(self.literal(ctx, &text, 1)?)
                }
                Token::Op('(') => {
                    let (sub, end) = self.nested(|p| p.expression(ctx, None))?;
                    if end != Terminator::Close {
                        return Err(self.malformed("missing ')'"));
                    }
                    Factor::Polynomial(sub)
                }
                Token::Op(c) => {
                    debug!("line {}: skipping stray '{}'", self.line(), c);
                    continue;
                }
                Token::Quoted(text) => Factor::Coefficient(self.literal(ctx, &text, 1)?),
                Token::Word(w) if w.starts_with(is_numeral_start) => self.numeral(ctx, w)?,
                Token::Word(w) => self.symbol(ctx, w)?,
            };
            let exp = self.parse_exponent()?;
            acc.multiply(factor, exp);

            let next = self.advance()?;
            if next.is_op('-') || next.is_op('+') {
                acc.flush();
            }
            self.push_back(next);
        }
    }

    // -- Factors ----------------------------------------------------

    /// Text of a `{ … }` block, the `{` already read. Adjacent words are
    /// separated by a blank unless the first ends in `.`.
    fn forced_coefficient(&mut self) -> Result<String, ParseError> {
        let mut text = String::new();
        let mut level = 0usize;
        let mut after_word = false;
        loop {
            match self.advance()? {
                Token::Eof => return Err(self.malformed("mismatch of braces: unterminated '{'")),
                Token::Op('}') if level == 0 => return Ok(text),
                Token::Op(c) => {
                    if c == '{' {
                        level += 1;
                        self.check_depth(level)?;
                    } else if c == '}' {
                        level -= 1;
                    }
                    text.push(c);
                    after_word = false;
                }
                Token::Word(w) => {
                    if after_word && !text.ends_with('.') {
                        text.push(' ');
                    }
                    text.push_str(&w);
                    after_word = true;
                }
                Token::Quoted(q) => {
                    text.push('"');
                    text.push_str(&q);
                    text.push('"');
                    after_word = false;
                }
            }
        }
    }

    /// Read `text` as a literal of the coefficient ring, `extra` nesting
    /// levels below the current one.
    fn parse_literal<R: Ring>(
        &mut self,
        ctx: ParseContext<'_, R>,
        text: &str,
        extra: usize,
    ) -> Result<R::Elem, ArithError> {
        let mut scope = LiteralScope {
            config: &self.config,
            depth: self.depth + extra,
            advisories: Vec::new(),
        };
        let parsed = ctx.coefficients().parse_in(text, &mut scope);
        self.advisories.extend(scope.advisories);
        parsed
    }

    fn literal<R: Ring>(
        &mut self,
        ctx: ParseContext<'_, R>,
        text: &str,
        extra: usize,
    ) -> Result<R::Elem, ParseError> {
        self.parse_literal(ctx, text, extra)
            .map_err(|e| self.literal_failure(text, e))
    }

    // Structural failures inside a literal keep their kind.
    fn literal_failure(&self, literal: &str, err: ArithError) -> ParseError {
        if let ArithError::Nested(inner) = &err {
            if let ParseError::MalformedExpression { message, .. } = inner.as_ref() {
                return self.malformed(message.clone());
            }
        }
        ParseError::LiteralParseFailure {
            line: self.line(),
            literal: literal.to_owned(),
            reason: reason(err),
        }
    }

    fn numeral<R: Ring>(&mut self, ctx: ParseContext<'_, R>, word: String) -> Result<Factor<R>, ParseError> {
        if !word.contains(|c: char| c.is_ascii_digit()) {
            return Err(ParseError::LiteralParseFailure {
                line: self.line(),
                literal: word,
                reason: "numeral has no digits".into(),
            });
        }
        let mut text = match word.chars().next() {
            Some('/') => format!("1{}", word),
            Some('.') => format!("0{}", word),
            _ => word,
        };

        // `1i-2`: the scanner splits a complex literal at its sign
        if text.ends_with('i') && is_hypercomplex(ctx.kind()) {
            if let Some(sign @ ('-' | '+')) = self.peek_char(0)? {
                if self.digit_ahead(1)? {
                    self.advance()?;
                    match self.advance()? {
                        Token::Word(im) => {
                            text.push(sign);
                            text.push_str(&im);
                        }
                        other => self.push_back(other),
                    }
                }
            }
        }

        match self.parse_literal(ctx, &text, 0) {
            Ok(c) => Ok(Factor::Coefficient(c)),
            Err(err) => {
                let Some((num, rest)) = split_juxtaposed(&text) else {
                    return Err(self.literal_failure(&text, err));
                };
                let c = self.literal(ctx, num, 0)?;
                debug!("line {}: '{}' read as {} * {}", self.line(), text, num, rest);
                self.push_back(Token::Word(rest.to_owned()));
                Ok(Factor::Coefficient(c))
            }
        }
    }

    /// A declared variable, or else a literal of the coefficient ring
    /// (the generator of an extension, a nested polynomial).
    fn symbol<R: Ring>(&mut self, ctx: ParseContext<'_, R>, word: String) -> Result<Factor<R>, ParseError> {
        if let Some(ix) = ctx.ring().var_index(&word) {
            return Ok(Factor::Variable(ix));
        }
        match self.parse_literal(ctx, &word, 0) {
            Ok(c) => {
                debug!("line {}: '{}' is a coefficient literal", self.line(), word);
                Ok(Factor::Coefficient(c))
            }
            Err(err) => Err(ParseError::UnknownLiteral {
                line: self.line(),
                symbol: word,
                reason: reason(err),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::{ComplexRing, RationalRing};
    use crate::config::ParserConfig;
    use crate::poly::{ExpVector, TermOrder};
    use num_complex::Complex;
    use num_rational::BigRational;

    fn ring(vars: &[&str]) -> PolynomialRing<RationalRing> {
        PolynomialRing::new(
            RationalRing,
            vars.iter().map(|v| v.to_string()).collect(),
            TermOrder::default(),
        )
        .unwrap()
    }

    fn parse<R: Ring>(ring: &PolynomialRing<R>, text: &str) -> Result<Polynomial<R>, ParseError> {
        Parser::from_text(text).parse_polynomial(ParseContext::new(ring))
    }

    fn term(ring: &PolynomialRing<RationalRing>, coeff: &str, exps: &[u64]) -> Polynomial<RationalRing> {
        ring.monomial(
            ExpVector::from_vec(exps.to_vec()),
            RationalRing.parse(coeff).unwrap(),
        )
    }

    #[test]
    fn exponent_forms() {
        let mut p = Parser::from_text("^12 **3 *x ^x");
        assert_eq!(p.parse_exponent().unwrap(), 12);
        assert_eq!(p.parse_exponent().unwrap(), 3);
        assert_eq!(p.parse_exponent().unwrap(), 1);
        assert_eq!(p.advance().unwrap(), Token::Op('*'));
        assert_eq!(p.advance().unwrap(), Token::Word("x".into()));
        assert_eq!(p.parse_exponent().unwrap(), 1);
        assert_eq!(p.advance().unwrap(), Token::Op('^'));
    }

    #[test]
    fn exponent_digits_stop_at_letters() {
        let mut p = Parser::from_text("^2y");
        assert_eq!(p.parse_exponent().unwrap(), 2);
        assert_eq!(p.advance().unwrap(), Token::Word("y".into()));
    }

    #[test]
    fn negative_and_huge_exponents_are_malformed() {
        for src in ["^-2", "**-2", "^~2", "^123456789012345678901234567890"] {
            let err = Parser::from_text(src).parse_exponent().unwrap_err();
            assert!(matches!(err, ParseError::MalformedExpression { .. }), "{}: {}", src, err);
        }
    }

    #[test]
    fn fractional_exponents_are_malformed() {
        for src in ["^1.5", "^2.", "^.5", "**.5", "^1/2", "**2.0"] {
            let err = Parser::from_text(src).parse_exponent().unwrap_err();
            assert!(matches!(err, ParseError::MalformedExpression { .. }), "{}: {}", src, err);
        }
        let r = ring(&["x"]);
        let err = parse(&r, "{2}^1.5").unwrap_err();
        assert!(matches!(err, ParseError::MalformedExpression { .. }), "{}", err);
    }

    #[test]
    fn product_of_declared_variables() {
        let r = ring(&["z", "x", "y"]);
        assert_eq!(parse(&r, "3*x*y*z").unwrap(), term(&r, "3", &[1, 1, 1]));
        assert_eq!(parse(&r, "3 x y z").unwrap(), term(&r, "3", &[1, 1, 1]));
    }

    #[test]
    fn signs_fold() {
        let r = ring(&["x", "y"]);
        let expected = r.add(&term(&r, "-1", &[1, 0]), &term(&r, "1", &[0, 1]));
        assert_eq!(parse(&r, "-x - -y").unwrap(), expected);
        assert_eq!(parse(&r, "- x + + y").unwrap(), expected);
    }

    #[test]
    fn empty_input_and_trailing_sign() {
        let r = ring(&["x"]);
        assert!(parse(&r, "").unwrap().is_zero());
        assert!(parse(&r, "  # nothing here").unwrap().is_zero());
        assert_eq!(parse(&r, "x -").unwrap(), r.univariate(0, 1));
    }

    #[test]
    fn juxtaposed_numerals_and_variables() {
        let r = ring(&["x", "y"]);
        assert_eq!(parse(&r, "3x^2 y").unwrap(), term(&r, "3", &[2, 1]));
        assert_eq!(parse(&r, "/2 x").unwrap(), term(&r, "1/2", &[1, 0]));
        assert_eq!(parse(&r, ".5x").unwrap(), term(&r, "1/2", &[1, 0]));
        assert_eq!(parse(&r, "x^2y").unwrap(), term(&r, "1", &[2, 1]));
        assert_eq!(parse(&r, "~3 y").unwrap(), term(&r, "-3", &[0, 1]));
    }

    #[test]
    fn exponent_binds_to_the_nearest_factor() {
        let r = ring(&["x"]);
        assert_eq!(parse(&r, "{2}^3*x^2").unwrap(), term(&r, "8", &[2]));
        assert_eq!(parse(&r, "2x^3").unwrap(), term(&r, "2", &[3]));
        assert_eq!(parse(&r, "(2x)^3").unwrap(), term(&r, "8", &[3]));
    }

    #[test]
    fn forced_and_quoted_coefficients() {
        let r = ring(&["x"]);
        assert_eq!(parse(&r, "{7/2}*x^3").unwrap(), term(&r, "7/2", &[3]));
        assert_eq!(parse(&r, "'7/2' x^3").unwrap(), term(&r, "7/2", &[3]));
        assert_eq!(parse(&r, "{ 1. 5 } x").unwrap(), term(&r, "3/2", &[1]));
    }

    #[test]
    fn brace_errors() {
        let r = ring(&["x"]);
        for src in ["{3*x", "x }", "{ {1} "] {
            let err = parse(&r, src).unwrap_err();
            assert!(matches!(err, ParseError::MalformedExpression { .. }), "{}: {}", src, err);
        }
    }

    #[test]
    fn unknown_symbol() {
        let r = ring(&["x", "y"]);
        match parse(&r, "x + w").unwrap_err() {
            ParseError::UnknownLiteral { symbol, line, .. } => {
                assert_eq!(symbol, "w");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bad_numeral_is_a_literal_failure() {
        let r = ring(&["x"]);
        let err = parse(&r, "1/0").unwrap_err();
        assert!(matches!(err, ParseError::LiteralParseFailure { .. }), "{}", err);
    }

    #[test]
    fn numerals_need_a_digit() {
        let r = ring(&["x"]);
        for src in ["x + .", "/ x", "x - ~", "./"] {
            let err = parse(&r, src).unwrap_err();
            assert!(matches!(err, ParseError::LiteralParseFailure { .. }), "{}: {}", src, err);
        }
    }

    #[test]
    fn parentheses() {
        let r = ring(&["a", "b"]);
        let lhs = parse(&r, "(a+b)^2").unwrap();
        let rhs = parse(&r, "a^2+2*a*b+b^2").unwrap();
        assert_eq!(lhs, rhs);
        assert_eq!(parse(&r, "-(a - b)").unwrap(), parse(&r, "b - a").unwrap());
        assert!(matches!(
            parse(&r, "(a + b").unwrap_err(),
            ParseError::MalformedExpression { .. }
        ));
    }

    #[test]
    fn delimiters_end_the_expression() {
        let r = ring(&["x", "y"]);
        let mut p = Parser::from_text("x + y, 3) x");
        let ctx = ParseContext::new(&r);
        let (first, end) = p.expression(ctx, None).unwrap();
        assert_eq!(end, Terminator::Comma);
        assert_eq!(first, parse(&r, "y + x").unwrap());
        let (second, end) = p.expression(ctx, None).unwrap();
        assert_eq!(end, Terminator::Close);
        assert_eq!(second, term(&r, "3", &[0, 0]));
    }

    #[test]
    fn closer_is_left_unread() {
        let r = ring(&["a"]);
        let mut p = Parser::from_text("a^2 - 7 ] rest");
        let (m, end) = p.expression(ParseContext::new(&r), Some(']')).unwrap();
        assert_eq!(end, Terminator::End);
        assert_eq!(m, parse(&r, "a^2 - 7").unwrap());
        assert_eq!(p.advance().unwrap(), Token::Op(']'));
    }

    #[test]
    fn stray_operators_are_skipped() {
        let r = ring(&["x", "y"]);
        assert_eq!(parse(&r, "x ! y").unwrap(), term(&r, "1", &[1, 1]));
    }

    #[test]
    fn complex_literal_split_at_its_sign() {
        let r = PolynomialRing::new(ComplexRing, vec!["x".into()], TermOrder::default()).unwrap();
        let p = parse(&r, "1i-2 x").unwrap();
        let one = BigRational::from_integer(1.into());
        let minus_two = BigRational::from_integer((-2).into());
        let expected = r.monomial(ExpVector::from_vec(vec![1]), Complex::new(one, minus_two));
        assert_eq!(p, expected);
    }

    #[test]
    fn nesting_depth_is_capped() {
        let r = ring(&["x"]);
        let config = ParserConfig {
            max_depth: 3,
            ..ParserConfig::default()
        };
        let ok = Parser::with_config("((x))".as_bytes(), config.clone())
            .parse_polynomial(ParseContext::new(&r));
        assert_eq!(ok.unwrap(), r.univariate(0, 1));
        let deep = Parser::with_config("((((x))))".as_bytes(), config.clone())
            .parse_polynomial(ParseContext::new(&r));
        assert!(matches!(deep.unwrap_err(), ParseError::MalformedExpression { .. }));
        let braces = Parser::with_config("{{{{1}}}} x".as_bytes(), config)
            .parse_polynomial(ParseContext::new(&r));
        assert!(matches!(braces.unwrap_err(), ParseError::MalformedExpression { .. }));
    }
}
