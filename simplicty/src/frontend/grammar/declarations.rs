use crate::frontend::parser::Expected;
use crate::frontend::parser::ParseResult;
use crate::frontend::parser::Parser;
use crate::frontend::parser::SyntaxError;
use crate::frontend::token::TokenKind;
use crate::tree::ParseTreeNode;

const TYPE_KINDS: &[TokenKind] = &[
    TokenKind::TypeBoolean,
    TokenKind::TypeCharacter,
    TokenKind::TypeFloat,
    TokenKind::TypeInteger,
    TokenKind::TypeString,
];

const RETURN_KINDS: &[TokenKind] = &[
    TokenKind::RwVoid,
    TokenKind::TypeBoolean,
    TokenKind::TypeCharacter,
    TokenKind::TypeFloat,
    TokenKind::TypeInteger,
    TokenKind::TypeString,
];

const ASSIGNMENT_KINDS: &[TokenKind] = &[
    TokenKind::AssignOp,
    TokenKind::AddAssign,
    TokenKind::SubAssign,
    TokenKind::MulAssign,
    TokenKind::DivAssign,
    TokenKind::IntDivAssign,
    TokenKind::ModAssign,
];

impl<'a> Parser<'a> {
    /// A type keyword, kept as a leaf.
    pub fn type_spec(&mut self) -> ParseResult {
        self.expect_one_of(TYPE_KINDS, "TYPE_SPEC")
    }
    pub fn decl_stmt(&mut self) -> ParseResult {
        self.choose(
            "DECL_STMT",
            &[Parser::var_decl, Parser::arr_decl, Parser::func_decl],
        )
    }
    /// `[constant] [let] integer a = 1, b;`
    pub fn var_decl(&mut self) -> ParseResult {
        let mut node = self.node("VAR_DECL");
        if let Some(constant) = self.accept(TokenKind::RwConstant) {
            node.attach(constant);
        }
        if let Some(let_) = self.accept(TokenKind::NwLet) {
            node.attach(let_);
        }
        node.attach(self.type_spec()?);
        node.attach(self.id_list()?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    pub fn id_list(&mut self) -> ParseResult {
        let mut node = self.node("ID_LIST");
        node.attach(self.expect(TokenKind::Identifier)?);
        if let Some(init) = self.maybe(Parser::initializer) {
            node.attach(init);
        }
        while let Some(comma) = self.accept(TokenKind::Comma) {
            node.attach(comma);
            node.attach(self.expect(TokenKind::Identifier)?);
            if let Some(init) = self.maybe(Parser::initializer) {
                node.attach(init);
            }
        }
        Ok(node)
    }
    /// Assignment with any assignment operator, such as `+= 1`.
    pub fn assign(&mut self) -> ParseResult {
        self.assign_with(ASSIGNMENT_KINDS)
    }
    /// Assignment in a declaration, which only takes `=`.
    pub fn initializer(&mut self) -> ParseResult {
        self.assign_with(&[TokenKind::AssignOp])
    }
    fn assign_with(&mut self, operators: &[TokenKind]) -> ParseResult {
        let mut node = self.node("ASSIGN");
        node.attach(self.wrap_one_of("ASSIGNMENT", operators)?);
        let value = match self.peek().map(|token| token.kind) {
            Some(
                kind @ (TokenKind::RwNull
                | TokenKind::StrConst
                | TokenKind::StrWithFormat
                | TokenKind::CharConst),
            ) => self.expect(kind)?,
            _ => self.bool_exp()?,
        };
        node.attach(value);
        Ok(node)
    }
    /// One or more `[NUM_CONST]` dimensions.
    fn fixed_dimensions(&mut self, node: &mut ParseTreeNode) -> Result<(), SyntaxError> {
        loop {
            node.attach(self.expect(TokenKind::LeftBracket)?);
            node.attach(self.expect(TokenKind::NumConst)?);
            node.attach(self.expect(TokenKind::RightBracket)?);
            if !self.check(TokenKind::LeftBracket) {
                return Ok(());
            }
        }
    }
    /// `[constant] integer grid[3][3];`
    pub fn arr_decl(&mut self) -> ParseResult {
        let mut node = self.node("ARR_DECL");
        if let Some(constant) = self.accept(TokenKind::RwConstant) {
            node.attach(constant);
        }
        node.attach(self.type_spec()?);
        node.attach(self.expect(TokenKind::Identifier)?);
        self.fixed_dimensions(&mut node)?;
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    /// Return type, name and parameters shared by declarations and definitions.
    fn func_signature(&mut self, node: &mut ParseTreeNode) -> Result<(), SyntaxError> {
        node.attach(self.expect_one_of(RETURN_KINDS, "RETURN_TYPE")?);
        node.attach(self.expect(TokenKind::Identifier)?);
        node.attach(self.expect(TokenKind::LeftParen)?);
        if let Some(params) = self.params_or_void() {
            node.attach(params);
        }
        node.attach(self.expect(TokenKind::RightParen)?);
        Ok(())
    }
    /// `void` or a parameter list, if present.
    pub(crate) fn params_or_void(&mut self) -> Option<ParseTreeNode> {
        match self.accept(TokenKind::RwVoid) {
            Some(void) => Some(void),
            None => self.maybe(Parser::param_list),
        }
    }
    pub fn func_decl(&mut self) -> ParseResult {
        let mut node = self.node("FUNC_DECL");
        self.func_signature(&mut node)?;
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    pub fn func_def(&mut self) -> ParseResult {
        let mut node = self.node("FUNC_DEF");
        self.func_signature(&mut node)?;
        node.attach(self.block()?);
        Ok(node)
    }
    pub fn param_list(&mut self) -> ParseResult {
        let mut node = self.node("PARAM_LIST");
        node.attach(self.param()?);
        while let Some(comma) = self.accept(TokenKind::Comma) {
            node.attach(comma);
            node.attach(self.param()?);
        }
        Ok(node)
    }
    /// `integer values[]` or `integer grid[3][3]`.
    pub fn param(&mut self) -> ParseResult {
        let mut node = self.node("PARAM");
        node.attach(self.type_spec()?);
        node.attach(self.expect(TokenKind::Identifier)?);
        while let Some(bracket) = self.accept(TokenKind::LeftBracket) {
            node.attach(bracket);
            if let Some(size) = self.accept(TokenKind::NumConst) {
                node.attach(size);
            }
            node.attach(self.expect(TokenKind::RightBracket)?);
        }
        Ok(node)
    }
    pub fn func_stmt(&mut self) -> ParseResult {
        self.choose("FUNC_STMT", &[Parser::func_call, Parser::func_def])
    }
    /// `print_all(a, b > 1);`
    pub fn func_call(&mut self) -> ParseResult {
        let mut node = self.node("FUNC_CALL");
        node.attach(self.expect(TokenKind::Identifier)?);
        node.attach(self.expect(TokenKind::LeftParen)?);
        if let Some(args) = self.maybe(Parser::arg_list) {
            node.attach(args);
        }
        node.attach(self.expect(TokenKind::RightParen)?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    pub fn arg_list(&mut self) -> ParseResult {
        let mut node = self.node("ARG_LIST");
        node.attach(self.exp()?);
        while let Some(comma) = self.accept(TokenKind::Comma) {
            node.attach(comma);
            node.attach(self.exp()?);
        }
        Ok(node)
    }
    pub fn arr_stmt(&mut self) -> ParseResult {
        self.choose("ARR_STMT", &[Parser::arr_assign, Parser::arr_init])
    }
    /// `grid[i][j] += 1;`
    pub fn arr_assign(&mut self) -> ParseResult {
        let mut node = self.node("ARR_ASSIGN");
        node.attach(self.arr_access()?);
        node.attach(self.assign()?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    /// `integer values[3] = [1, 2, 3];`
    pub fn arr_init(&mut self) -> ParseResult {
        let mut node = self.node("ARR_INIT");
        node.attach(self.type_spec()?);
        node.attach(self.expect(TokenKind::Identifier)?);
        self.fixed_dimensions(&mut node)?;
        node.attach(self.expect(TokenKind::AssignOp)?);
        node.attach(self.expect(TokenKind::LeftBracket)?);
        node.attach(self.arr_list()?);
        node.attach(self.expect(TokenKind::RightBracket)?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    pub fn arr_list(&mut self) -> ParseResult {
        let mut node = self.node("ARR_LIST");
        node.attach(self.arr_elem()?);
        while let Some(comma) = self.accept(TokenKind::Comma) {
            node.attach(comma);
            node.attach(self.arr_elem()?);
        }
        Ok(node)
    }
    pub fn arr_elem(&mut self) -> ParseResult {
        let mut node = self.node("ARR_ELEM");
        if let Some(access) = self.maybe(Parser::arr_access) {
            node.attach(access);
            return Ok(node);
        }
        if let Some(literal) = self.maybe(Parser::bool_literal) {
            node.attach(literal);
            return Ok(node);
        }
        node.attach(self.expect_one_of(
            &[
                TokenKind::Identifier,
                TokenKind::NumConst,
                TokenKind::CharConst,
                TokenKind::StrConst,
                TokenKind::FloatConst,
            ],
            "ARR_ELEM",
        )?);
        Ok(node)
    }
    /// `grid[i + 1][j]`
    pub fn arr_access(&mut self) -> ParseResult {
        let mut node = self.node("ARR_ACCESS");
        node.attach(self.expect(TokenKind::Identifier)?);
        if !self.check(TokenKind::LeftBracket) {
            return Err(self.error(Expected::Token(TokenKind::LeftBracket)));
        }
        while let Some(bracket) = self.accept(TokenKind::LeftBracket) {
            node.attach(bracket);
            node.attach(self.arith_exp()?);
            node.attach(self.expect(TokenKind::RightBracket)?);
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::frontend::ParserOptions;
    use crate::frontend::Scanner;
    use crate::frontend::Parser;
    use crate::frontend::TokenKind;
    use crate::frontend::Expected;

    #[test]
    fn test_var_decl() {
        let tokens = Scanner::scan("constant let integer a = 1, b, c = d;");
        let mut parser = Parser::new(&tokens, ParserOptions::default());
        let node = parser.var_decl().unwrap();
        assert_eq!(
            node.child_labels(),
            vec!["RW_CONSTANT", "NW_LET", "TYPE_INTEGER", "ID_LIST", "SEMICOLON"]
        );
        let list = node.child(3).unwrap();
        assert_eq!(
            list.child_labels(),
            vec!["IDENTIFIER", "ASSIGN", "COMMA", "IDENTIFIER", "COMMA", "IDENTIFIER", "ASSIGN"]
        );
        assert_eq!(
            list.child(1).unwrap().child_labels(),
            vec!["ASSIGNMENT", "BOOL_EXP"]
        );
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_initializer_only_takes_assign_op() {
        let tokens = Scanner::scan("integer a += 1;");
        let mut parser = Parser::new(&tokens, ParserOptions::default());
        let err = parser.var_decl().unwrap_err();
        assert_eq!(err.expected, Expected::Token(TokenKind::Semicolon));
        assert_eq!(err.found, Some(TokenKind::AddAssign));
    }

    #[test]
    fn test_decl_stmt_alternatives() {
        let cases = [
            ("integer grid[3][4];", "ARR_DECL"),
            ("float f(integer a, character b[]);", "FUNC_DECL"),
            ("void g(void);", "FUNC_DECL"),
            ("string s = \"hi\";", "VAR_DECL"),
        ];
        for (src, label) in cases {
            let tokens = Scanner::scan(src);
            let mut parser = Parser::new(&tokens, ParserOptions::default());
            let node = parser.decl_stmt().unwrap();
            assert_eq!(node.label(), label, "{src}");
            assert!(parser.is_at_end(), "{src}");
        }
    }

    #[test]
    fn test_arr_stmt() {
        let tokens = Scanner::scan("integer v[3] = [1, true, w[0]];");
        let mut parser = Parser::new(&tokens, ParserOptions::default());
        let node = parser.arr_stmt().unwrap();
        assert_eq!(node.label(), "ARR_INIT");
        let list = node.child(7).unwrap();
        assert_eq!(list.label(), "ARR_LIST");
        let elems = list
            .children()
            .iter()
            .filter(|c| c.label() == "ARR_ELEM")
            .map(|c| c.child(0).unwrap().label())
            .collect::<Vec<&str>>();
        assert_eq!(elems, vec!["NUM_CONST", "BOOL_LITERAL", "ARR_ACCESS"]);

        let tokens = Scanner::scan("v[i + 1] -= 2;");
        let mut parser = Parser::new(&tokens, ParserOptions::default());
        let node = parser.arr_stmt().unwrap();
        assert_eq!(node.child_labels(), vec!["ARR_ACCESS", "ASSIGN", "SEMICOLON"]);
    }

    #[test]
    fn test_func_call() {
        let tokens = Scanner::scan("report(a, b > 1, 2 * c);");
        let mut parser = Parser::new(&tokens, ParserOptions::default());
        let node = parser.func_stmt().unwrap();
        assert_eq!(node.label(), "FUNC_CALL");
        let args = node.child(2).unwrap();
        let exps = args
            .children()
            .iter()
            .filter(|c| c.label() == "EXP")
            .map(|c| c.child(0).unwrap().label())
            .collect::<Vec<&str>>();
        assert_eq!(exps, vec!["ARITH_EXP", "BOOL_EXP", "ARITH_EXP"]);

        let tokens = Scanner::scan("ping();");
        let mut parser = Parser::new(&tokens, ParserOptions::default());
        let node = parser.func_call().unwrap();
        assert_eq!(
            node.child_labels(),
            vec!["IDENTIFIER", "LEFT_PAREN", "RIGHT_PAREN", "SEMICOLON"]
        );
    }
}
