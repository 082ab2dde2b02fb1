use std::io::BufRead;

use log::debug;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::expressions::Terminator;
use super::{ParseContext, Parser};
use crate::arith::{Field, ModIntegerRing, ModLongRing, RationalRing};
use crate::coefficients::{AlgebraicRing, CoefficientRing, ModularRing};
use crate::error::ParseError;
use crate::poly::{AlgebraicNumberRing, OrderKind, PolynomialRing, TermOrder};
use crate::scanner::Token;

const HYPERCOMPLEX_ADVISORY: &str =
    "negative components of hypercomplex literals must be written with '~', e.g. 1i~2j3k4";

impl<B: BufRead> Parser<B> {
    /// Coefficient ring keyword. Without a known keyword the token is left
    /// unread and the ring is the rationals.
    pub fn parse_coefficient_ring(&mut self) -> Result<CoefficientRing, ParseError> {
        let tok = self.advance()?;
        let Some(key) = tok.word().map(str::to_ascii_lowercase) else {
            self.push_back(tok);
            return Ok(CoefficientRing::Rational);
        };
        let ring = match key.as_str() {
            "q" | "rat" => CoefficientRing::Rational,
            "d" => CoefficientRing::Decimal,
            "z" | "int" => CoefficientRing::Integer,
            "c" | "complex" => CoefficientRing::Complex,
            "quat" => {
                self.advise(HYPERCOMPLEX_ADVISORY);
                CoefficientRing::Quaternion
            }
            "oct" => {
                self.advise(HYPERCOMPLEX_ADVISORY);
                CoefficientRing::Octonion
            }
            "mod" => CoefficientRing::ModularInteger(self.modular()?),
            "ratfunc" | "modfunc" => {
                let word = tok.word().unwrap_or(key.as_str());
                return Err(self.invalid_ring(format!("{} coefficients are not supported", word)));
            }
            "intfunc" => CoefficientRing::FunctionCoefficient(self.function_coefficients()?),
            "an" => CoefficientRing::AlgebraicExtension(self.algebraic_extension()?),
            _ => {
                self.push_back(tok);
                return Ok(CoefficientRing::Rational);
            }
        };
        debug!("line {}: coefficient ring {}", self.line(), ring);
        Ok(ring)
    }

    // `Mod m` or `Mod [m]`.
    fn modular(&mut self) -> Result<ModularRing, ParseError> {
        let mut tok = self.advance()?;
        let bracketed = tok.is_op('[');
        if bracketed {
            tok = self.advance()?;
        }
        let modulus = self.modulus(&tok)?;
        if bracketed {
            self.skip_op(']')?;
        }

        let limit = BigInt::from(self.config.word_modulus_limit);
        let ring = match modulus.to_u64() {
            Some(m) if modulus < limit => ModLongRing::new(m).map(ModularRing::Word),
            _ => ModIntegerRing::new(modulus).map(ModularRing::Big),
        };
        ring.map_err(|e| self.invalid_ring(e.to_string()))
    }

    fn modulus(&self, tok: &Token) -> Result<BigInt, ParseError> {
        match tok.word() {
            Some(w) if tok.is_digit_word() => w
                .parse::<BigInt>()
                .map_err(|e| self.invalid_ring(format!("modulus '{}': {}", w, e))),
            _ => Err(self.invalid_ring(format!("missing modulus, got {:?}", tok))),
        }
    }

    // `IntFunc (a, b)`.
    fn function_coefficients(&mut self) -> Result<PolynomialRing<RationalRing>, ParseError> {
        let vars = self.parse_variable_list()?;
        if vars.is_empty() {
            return Err(self.invalid_ring("function coefficients need a variable list"));
        }
        PolynomialRing::new(RationalRing, vars, TermOrder::new(OrderKind::InvLex))
            .map_err(|e| self.invalid_ring(e.to_string()))
    }

    // `AN[ m? (a) ( poly ) ]`, after `AN`.
    fn algebraic_extension(&mut self) -> Result<AlgebraicRing, ParseError> {
        let tok = self.advance()?;
        if !tok.is_op('[') {
            return Err(self.invalid_ring(format!("expected '[' after AN, got {:?}", tok)));
        }
        let tok = self.advance()?;
        let modulus = if tok.is_digit_word() {
            Some(self.modulus(&tok)?)
        } else {
            self.push_back(tok);
            None
        };

        let vars = self.parse_variable_list()?;
        if vars.len() != 1 {
            return Err(self.invalid_ring(format!(
                "an algebraic extension needs exactly one variable, got {:?}",
                vars
            )));
        }

        let ring = match modulus {
            None => AlgebraicRing::Rational(self.extension_over(RationalRing, vars)?),
            Some(m) => {
                let base = ModIntegerRing::new(m).map_err(|e| self.invalid_ring(e.to_string()))?;
                AlgebraicRing::Modular(self.extension_over(base, vars)?)
            }
        };
        self.skip_op(']')?;
        Ok(ring)
    }

    /// Read the defining polynomial over `base` in a context of its own.
    fn extension_over<F: Field>(
        &mut self,
        base: F,
        vars: Vec<String>,
    ) -> Result<AlgebraicNumberRing<F>, ParseError> {
        let ring = PolynomialRing::new(base, vars, TermOrder::default())
            .map_err(|e| self.invalid_ring(e.to_string()))?;
        let ctx = ParseContext::new(&ring);

        let tok = self.advance()?;
        let modulus = if tok.is_op('(') {
            let (m, end) = self.nested(|p| p.expression(ctx, None))?;
            if end != Terminator::Close {
                return Err(self.malformed("missing ')' after the defining polynomial"));
            }
            m
        } else {
            self.push_back(tok);
            self.expression(ctx, Some(']'))?.0
        };
        AlgebraicNumberRing::new(ring, modulus).map_err(|e| self.invalid_ring(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arith::{CoefficientKind, Ring};
    use crate::config::ParserConfig;

    fn select(src: &str) -> Result<CoefficientRing, ParseError> {
        Parser::from_text(src).parse_coefficient_ring()
    }

    #[test]
    fn keywords() {
        let kind = |src| select(src).unwrap().kind();
        assert_eq!(kind("Q"), CoefficientKind::Rational);
        assert_eq!(kind("rat"), CoefficientKind::Rational);
        assert_eq!(kind("Z"), CoefficientKind::Integer);
        assert_eq!(kind("INT"), CoefficientKind::Integer);
        assert_eq!(kind("d"), CoefficientKind::Decimal);
        assert_eq!(kind("Complex"), CoefficientKind::Complex);
        assert_eq!(kind("quat"), CoefficientKind::Quaternion);
        assert_eq!(kind("Oct"), CoefficientKind::Octonion);
    }

    #[test]
    fn unknown_keyword_defaults_to_rationals() {
        let mut p = Parser::from_text("(x, y)");
        assert_eq!(p.parse_coefficient_ring().unwrap(), CoefficientRing::Rational);
        assert_eq!(p.advance().unwrap(), Token::Op('('));
    }

    #[test]
    fn hypercomplex_rings_leave_an_advisory() {
        let mut p = Parser::from_text("Quat");
        p.parse_coefficient_ring().unwrap();
        assert_eq!(p.advisories().len(), 1);
        assert!(p.advisories()[0].contains('~'));
    }

    #[test]
    fn modulus_size_picks_representation() {
        match select("Mod 7").unwrap() {
            CoefficientRing::ModularInteger(ModularRing::Word(r)) => assert_eq!(r.modulus(), 7),
            other => panic!("unexpected {:?}", other),
        }
        match select("Mod [2147483647]").unwrap() {
            CoefficientRing::ModularInteger(ModularRing::Big(r)) => {
                assert_eq!(r.modulus(), &BigInt::from(2_147_483_647u64))
            }
            other => panic!("unexpected {:?}", other),
        }
        let config = ParserConfig {
            word_modulus_limit: 5,
            ..ParserConfig::default()
        };
        let ring = Parser::with_config("Mod 7".as_bytes(), config)
            .parse_coefficient_ring()
            .unwrap();
        assert!(matches!(ring, CoefficientRing::ModularInteger(ModularRing::Big(_))));
    }

    #[test]
    fn bracketed_modulus_consumes_the_closer() {
        let mut p = Parser::from_text("Mod[11] (x)");
        p.parse_coefficient_ring().unwrap();
        assert_eq!(p.parse_variable_list().unwrap(), ["x"]);
    }

    #[test]
    fn bad_moduli() {
        for src in ["Mod", "Mod x", "Mod 1", "Mod [0]"] {
            let err = select(src).unwrap_err();
            assert!(matches!(err, ParseError::InvalidRingDescriptor { .. }), "{}: {}", src, err);
        }
    }

    #[test]
    fn rational_functions_are_unsupported() {
        for src in ["RatFunc(a)", "ModFunc 7 (a)"] {
            let err = select(src).unwrap_err();
            assert!(matches!(err, ParseError::InvalidRingDescriptor { .. }), "{}", src);
        }
    }

    #[test]
    fn function_coefficients_use_inverse_lex() {
        match select("IntFunc(a, b)").unwrap() {
            CoefficientRing::FunctionCoefficient(r) => {
                assert_eq!(r.vars(), ["a", "b"]);
                assert_eq!(r.order(), &TermOrder::new(OrderKind::InvLex));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(select("IntFunc x").is_err());
    }

    #[test]
    fn algebraic_extension_over_rationals() {
        let mut p = Parser::from_text("AN[ (a) (a^2 - 7) ] (x)");
        let ring = match p.parse_coefficient_ring().unwrap() {
            CoefficientRing::AlgebraicExtension(AlgebraicRing::Rational(r)) => r,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(ring.degree(), 2);
        assert_eq!(ring.variable(), "a");
        let a = ring.parse("a").unwrap();
        assert_eq!(ring.mul(&a, &a), ring.parse("7").unwrap());
        assert_eq!(p.parse_variable_list().unwrap(), ["x"]);
    }

    #[test]
    fn algebraic_extension_with_modular_base_and_bare_polynomial() {
        let mut p = Parser::from_text("AN[ 7 (b) b^2 + 1 ] (x)");
        let ring = match p.parse_coefficient_ring().unwrap() {
            CoefficientRing::AlgebraicExtension(AlgebraicRing::Modular(r)) => r,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(ring.characteristic(), BigInt::from(7));
        let b = ring.parse("b").unwrap();
        assert_eq!(ring.mul(&b, &b), ring.parse("6").unwrap());
        assert_eq!(p.parse_variable_list().unwrap(), ["x"]);
    }

    #[test]
    fn algebraic_extension_errors() {
        for src in ["AN (a) (a^2-7)", "AN[ (a, b) (a^2-7) ]", "AN[ (a) (5) ]", "AN[ () (2) ]"] {
            let err = select(src).unwrap_err();
            assert!(matches!(err, ParseError::InvalidRingDescriptor { .. }), "{}: {}", src, err);
        }
    }
}
