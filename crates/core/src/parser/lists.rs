use std::io::BufRead;

use log::info;

use super::expressions::Terminator;
use super::{ParseContext, Parser};
use crate::arith::Ring;
use crate::coefficients::{dispatch_ring, CoefficientRing};
use crate::error::ParseError;
use crate::poly::{ModuleList, Polynomial, PolynomialList, PolynomialRing, TermOrder};
use crate::scanner::Token;
use crate::sets::{ModuleSet, PolynomialSet};

impl<B: BufRead> Parser<B> {
    // -- Lists ------------------------------------------------------

    /// `( p1, p2, … )`. Each element may carry its own parentheses. `()`
    /// and a missing `(` give an empty list.
    pub fn parse_polynomial_list<R: Ring>(
        &mut self,
        ctx: ParseContext<'_, R>,
    ) -> Result<Vec<Polynomial<R>>, ParseError> {
        let tok = self.advance()?;
        if !tok.is_op('(') {
            self.push_back(tok);
            return Ok(Vec::new());
        }
        let mut list = Vec::new();
        if self.peek_char(0)? == Some(')') {
            self.advance()?;
            return Ok(list);
        }
        loop {
            let (p, end) = self.expression(ctx, None)?;
            list.push(p);
            if end != Terminator::Comma {
                break;
            }
        }
        Ok(list)
    }

    /// `( ( p11, p12 ), ( p21 ) )`: a list of polynomial lists. Rows are
    /// returned as read, without padding.
    pub fn parse_module_list<R: Ring>(
        &mut self,
        ctx: ParseContext<'_, R>,
    ) -> Result<Vec<Vec<Polynomial<R>>>, ParseError> {
        let tok = self.advance()?;
        if !tok.is_op('(') {
            self.push_back(tok);
            return Ok(Vec::new());
        }
        let mut rows = Vec::new();
        loop {
            match self.advance()? {
                Token::Op(')') | Token::Eof => break,
                Token::Op(',') => {}
                tok @ Token::Op('(') => {
                    self.push_back(tok);
                    rows.push(self.parse_polynomial_list(ctx)?);
                }
                other => {
                    return Err(self.malformed(format!(
                        "module rows must be parenthesised, got {:?}",
                        other
                    )))
                }
            }
        }
        Ok(rows)
    }

    // -- Sets -------------------------------------------------------

    fn ring_header(&mut self) -> Result<(CoefficientRing, Vec<String>, TermOrder), ParseError> {
        let coefficients = self.parse_coefficient_ring()?;
        let vars = self.parse_variable_list()?;
        let order = self.parse_term_order(vars.len())?;
        Ok((coefficients, vars, order))
    }

    fn polynomial_ring<R: Ring>(
        &self,
        coefficients: R,
        vars: &[String],
        order: &TermOrder,
    ) -> Result<PolynomialRing<R>, ParseError> {
        PolynomialRing::new(coefficients, vars.to_vec(), order.clone())
            .map_err(|e| self.invalid_ring(e.to_string()))
    }

    /// Coefficient ring, variables, term order, then a polynomial list.
    pub fn parse_polynomial_set(&mut self) -> Result<PolynomialSet, ParseError> {
        let (coefficients, vars, order) = self.ring_header()?;
        let set = dispatch_ring!(&coefficients, PolynomialSet, r => {
            let ring = self.polynomial_ring(r, &vars, &order)?;
            let list = self.parse_polynomial_list(ParseContext::new(&ring))?;
            PolynomialList::new(ring, list)
        });
        info!("parsed {} polynomials over {}", set.len(), set.ring_header());
        Ok(set)
    }

    /// Coefficient ring, variables, term order, then a module list with
    /// every row padded to the widest.
    pub fn parse_module_set(&mut self) -> Result<ModuleSet, ParseError> {
        let (coefficients, vars, order) = self.ring_header()?;
        let set = dispatch_ring!(&coefficients, ModuleSet, r => {
            let ring = self.polynomial_ring(r, &vars, &order)?;
            let rows = self.parse_module_list(ParseContext::new(&ring))?;
            ModuleList::new(ring, rows)
        });
        info!(
            "parsed {} x {} module over {}",
            set.len(),
            set.cols(),
            set.ring_header()
        );
        Ok(set)
    }
}

/// Parse a whole polynomial set from text.
pub fn parse_polynomial_set(text: &str) -> Result<PolynomialSet, ParseError> {
    Parser::from_text(text).parse_polynomial_set()
}

/// Parse a whole module set from text.
pub fn parse_module_set(text: &str) -> Result<ModuleSet, ParseError> {
    Parser::from_text(text).parse_module_set()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::{CoefficientKind, IntegerRing};

    fn ring() -> PolynomialRing<IntegerRing> {
        PolynomialRing::new(
            IntegerRing,
            vec!["x".into(), "y".into()],
            TermOrder::default(),
        )
        .unwrap()
    }

    fn parse(r: &PolynomialRing<IntegerRing>, text: &str) -> Polynomial<IntegerRing> {
        crate::parser::parse_polynomial_text(r, text).unwrap()
    }

    #[test]
    fn polynomial_lists() {
        let r = ring();
        let ctx = ParseContext::new(&r);
        let list = Parser::from_text("( x + 1, (y), x*y )")
            .parse_polynomial_list(ctx)
            .unwrap();
        assert_eq!(list, vec![parse(&r, "x + 1"), parse(&r, "y"), parse(&r, "x y")]);
        assert!(Parser::from_text("()").parse_polynomial_list(ctx).unwrap().is_empty());
        assert!(Parser::from_text("  ").parse_polynomial_list(ctx).unwrap().is_empty());
    }

    #[test]
    fn list_reader_stops_after_the_closer() {
        let r = ring();
        let mut p = Parser::from_text("( x ) ( y )");
        let ctx = ParseContext::new(&r);
        assert_eq!(p.parse_polynomial_list(ctx).unwrap().len(), 1);
        assert_eq!(p.parse_polynomial_list(ctx).unwrap(), vec![parse(&r, "y")]);
    }

    #[test]
    fn module_lists_keep_row_shape() {
        let r = ring();
        let rows = Parser::from_text("( (x, 1), (y), () )")
            .parse_module_list(ParseContext::new(&r))
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![parse(&r, "x"), parse(&r, "1")]);
        assert_eq!(rows[1].len(), 1);
        assert!(rows[2].is_empty());
    }

    #[test]
    fn module_rows_need_parentheses() {
        let r = ring();
        let err = Parser::from_text("( x, y )")
            .parse_module_list(ParseContext::new(&r))
            .unwrap_err();
        assert!(matches!(err, ParseError::MalformedExpression { .. }), "{}", err);
    }

    #[test]
    fn polynomial_set() {
        let set = parse_polynomial_set("Z(x, y) L ( x^2 - y, 3 )").unwrap();
        assert_eq!(set.kind(), CoefficientKind::Integer);
        assert_eq!(set.vars(), ["x", "y"]);
        assert_eq!(set.len(), 2);
        match set {
            PolynomialSet::Integer(list) => {
                assert_eq!(list.ring().order(), &TermOrder::new(crate::poly::OrderKind::InvLex));
                assert_eq!(list.list()[1], parse(&ring(), "3"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn module_set_pads_rows() {
        let set = parse_module_set("Mod 5 (x) ( (x, 1), (x^2) )").unwrap();
        assert_eq!(set.kind(), CoefficientKind::ModularInteger);
        assert_eq!(set.len(), 2);
        assert_eq!(set.cols(), 2);
        match set {
            ModuleSet::ModLong(m) => assert!(m.rows()[1][1].is_zero()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn duplicate_variables_are_an_invalid_descriptor() {
        let err = parse_polynomial_set("Q(x, x) ( x )").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRingDescriptor { .. }), "{}", err);
    }
}
