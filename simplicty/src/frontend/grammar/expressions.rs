//! Expression productions, from loosest to tightest binding:
//! `||`, `&&`, `!`/relational, `+ -`, `* / // %` and finally `^`.

use crate::frontend::parser::Expected;
use crate::frontend::parser::ParseResult;
use crate::frontend::parser::Parser;
use crate::frontend::token::TokenKind;

const REL_KINDS: &[TokenKind] = &[
    TokenKind::RelLt,
    TokenKind::RelGt,
    TokenKind::RelLe,
    TokenKind::RelGe,
    TokenKind::RelEq,
    TokenKind::RelNeq,
];

const ADDMIN_KINDS: &[TokenKind] = &[TokenKind::AddOp, TokenKind::SubOp];

const MULDIV_KINDS: &[TokenKind] = &[
    TokenKind::MulOp,
    TokenKind::DivOp,
    TokenKind::IntDivOp,
    TokenKind::ModOp,
];

const UPDATE_KINDS: &[TokenKind] = &[TokenKind::UnaryInc, TokenKind::UnaryDec];

impl<'a> Parser<'a> {
    fn check_any(&self, kinds: &[TokenKind]) -> bool {
        match self.peek() {
            Some(token) => kinds.contains(&token.kind),
            None => false,
        }
    }
    /// An argument or return value.
    ///
    /// Plain arithmetic is preferred, but when a relational or logical
    /// operator follows, the whole thing is re-read as a boolean expression.
    pub fn exp(&mut self) -> ParseResult {
        let mut node = self.node("EXP");
        let arith = self.attempt(|p: &mut Parser<'a>| {
            let arith = p.arith_exp()?;
            match p.peek() {
                Some(token) if token.kind.is_relational() || token.kind.is_logical() => {
                    Err(p.error(Expected::Production("ARITH_EXP")))
                }
                _ => Ok(arith),
            }
        });
        match arith {
            Ok(arith) => node.attach(arith),
            Err(_) => node.attach(self.bool_exp()?),
        }
        Ok(node)
    }
    pub fn bool_exp(&mut self) -> ParseResult {
        let mut node = self.node("BOOL_EXP");
        node.attach(self.bool_term()?);
        while let Some(or) = self.accept(TokenKind::LogOr) {
            node.attach(or);
            node.attach(self.bool_term()?);
        }
        Ok(node)
    }
    pub fn bool_term(&mut self) -> ParseResult {
        let mut node = self.node("BOOL_TERM");
        node.attach(self.bool_factor()?);
        while let Some(and) = self.accept(TokenKind::LogAnd) {
            node.attach(and);
            node.attach(self.bool_factor()?);
        }
        Ok(node)
    }
    pub fn bool_factor(&mut self) -> ParseResult {
        self.choose(
            "BOOL_FACTOR",
            &[
                |p: &mut Parser<'a>| {
                    let mut node = p.node("BOOL_FACTOR");
                    node.attach(p.expect(TokenKind::LogNot)?);
                    node.attach(p.bool_factor()?);
                    Ok(node)
                },
                |p: &mut Parser<'a>| {
                    let mut node = p.node("BOOL_FACTOR");
                    node.attach(p.rel_exp()?);
                    Ok(node)
                },
                |p: &mut Parser<'a>| {
                    let mut node = p.node("BOOL_FACTOR");
                    node.attach(p.expect(TokenKind::LeftParen)?);
                    node.attach(p.bool_exp()?);
                    node.attach(p.expect(TokenKind::RightParen)?);
                    Ok(node)
                },
                |p: &mut Parser<'a>| {
                    let mut node = p.node("BOOL_FACTOR");
                    node.attach(p.arith_exp()?);
                    Ok(node)
                },
                |p: &mut Parser<'a>| {
                    let mut node = p.node("BOOL_FACTOR");
                    node.attach(p.bool_literal()?);
                    Ok(node)
                },
                |p: &mut Parser<'a>| {
                    let mut node = p.node("BOOL_FACTOR");
                    node.attach(p.expect(TokenKind::Identifier)?);
                    Ok(node)
                },
            ],
        )
    }
    pub fn rel_exp(&mut self) -> ParseResult {
        let mut node = self.node("REL_EXP");
        node.attach(self.arith_exp()?);
        node.attach(self.wrap_one_of("REL_OP", REL_KINDS)?);
        node.attach(self.arith_exp()?);
        Ok(node)
    }
    pub fn bool_literal(&mut self) -> ParseResult {
        self.wrap_one_of("BOOL_LITERAL", &[TokenKind::BoolConst])
    }
    pub fn arith_exp(&mut self) -> ParseResult {
        let mut node = self.node("ARITH_EXP");
        node.attach(self.term()?);
        while self.check_any(ADDMIN_KINDS) {
            node.attach(self.wrap_one_of("ADDMIN_OP", ADDMIN_KINDS)?);
            node.attach(self.term()?);
        }
        Ok(node)
    }
    pub fn term(&mut self) -> ParseResult {
        let mut node = self.node("TERM");
        node.attach(self.factor()?);
        while self.check_any(MULDIV_KINDS) {
            node.attach(self.wrap_one_of("MULDIV_OP", MULDIV_KINDS)?);
            node.attach(self.factor()?);
        }
        Ok(node)
    }
    /// `base ^ factor`, so `2 ^ 3 ^ 2` groups to the right.
    pub fn factor(&mut self) -> ParseResult {
        let mut node = self.node("FACTOR");
        node.attach(self.base()?);
        if let Some(expo) = self.accept(TokenKind::ExpoOp) {
            node.attach(expo);
            node.attach(self.factor()?);
        }
        Ok(node)
    }
    pub fn base(&mut self) -> ParseResult {
        self.choose(
            "BASE",
            &[
                |p: &mut Parser<'a>| {
                    let mut node = p.node("BASE");
                    node.attach(p.expect(TokenKind::LeftParen)?);
                    node.attach(p.arith_exp()?);
                    node.attach(p.expect(TokenKind::RightParen)?);
                    Ok(node)
                },
                |p: &mut Parser<'a>| {
                    let mut node = p.node("BASE");
                    node.attach(p.update()?);
                    Ok(node)
                },
                |p: &mut Parser<'a>| {
                    let mut node = p.node("BASE");
                    node.attach(p.arr_access()?);
                    Ok(node)
                },
                |p: &mut Parser<'a>| {
                    let mut node = p.node("BASE");
                    node.attach(p.expect_one_of(
                        &[
                            TokenKind::Identifier,
                            TokenKind::NumConst,
                            TokenKind::FloatConst,
                        ],
                        "BASE",
                    )?);
                    Ok(node)
                },
            ],
        )
    }
    /// `i++`, `i--`, `++i` or `--i`.
    pub fn update(&mut self) -> ParseResult {
        let mut node = self.node("UPDATE");
        if self.check_any(UPDATE_KINDS) {
            node.attach(self.wrap_one_of("UPDATE_OP", UPDATE_KINDS)?);
            node.attach(self.expect(TokenKind::Identifier)?);
        } else {
            node.attach(self.expect(TokenKind::Identifier)?);
            node.attach(self.wrap_one_of("UPDATE_OP", UPDATE_KINDS)?);
        }
        Ok(node)
    }
}
