use crate::frontend::parser::ParseResult;
use crate::frontend::parser::Parser;
use crate::frontend::token::TokenKind;

impl<'a> Parser<'a> {
    /// Top-level declarations followed by the `main` function.
    pub fn simplicity(&mut self) -> ParseResult {
        let mut root = self.node("SIMPLICITY");
        let leading = self.many(|p| {
            p.choose(
                "SIMPLICITY",
                &[Parser::decl_stmt, Parser::func_stmt, Parser::arr_stmt],
            )
        });
        for node in leading {
            root.attach(node);
        }
        root.attach(self.type_spec()?);
        root.attach(self.expect_labeled(TokenKind::KwMain, "MAIN")?);
        root.attach(self.expect(TokenKind::LeftParen)?);
        if let Some(params) = self.params_or_void() {
            root.attach(params);
        }
        root.attach(self.expect(TokenKind::RightParen)?);
        root.attach(self.block()?);
        Ok(root)
    }
}
