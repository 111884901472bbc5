use crate::frontend::parser::Expected;
use crate::frontend::parser::ParseResult;
use crate::frontend::parser::Parser;
use crate::frontend::parser::SyntaxError;
use crate::frontend::token::TokenKind;
use crate::tree::ParseTreeNode;

const FORMAT_KINDS: &[TokenKind] = &[
    TokenKind::FormatInt,
    TokenKind::FormatChar,
    TokenKind::FormatFloat,
    TokenKind::FormatStr,
];

impl<'a> Parser<'a> {
    /// `{ statements [break | continue | return ...] [end] }`
    pub fn block(&mut self) -> ParseResult {
        let mut node = self.node("BLOCK");
        node.attach(self.expect(TokenKind::LeftCurly)?);
        node.attach(self.stmt_list()?);
        let jump = match self.accept(TokenKind::KwBreak) {
            Some(kw) => Some(kw),
            None => self.accept(TokenKind::KwContinue),
        };
        if let Some(jump) = jump {
            node.attach(jump);
            if let Some(semicolon) = self.accept(TokenKind::Semicolon) {
                node.attach(semicolon);
            }
        } else if self.check(TokenKind::KwReturn) {
            node.attach(self.return_stmt()?);
        }
        if let Some(end) = self.accept(TokenKind::NwEnd) {
            node.attach(end);
        }
        node.attach(self.expect(TokenKind::RightCurly)?);
        Ok(node)
    }
    /// One or more statements, or zero when empty blocks are allowed.
    pub fn stmt_list(&mut self) -> ParseResult {
        let mut node = self.node("STMT_LIST");
        if !self.options().allow_empty_blocks {
            node.attach(self.stmt()?);
        }
        for stmt in self.many(Parser::stmt) {
            node.attach(stmt);
        }
        Ok(node)
    }
    pub fn stmt(&mut self) -> ParseResult {
        self.choose(
            "STMT",
            &[
                Parser::decl_stmt,
                Parser::assign_stmt,
                Parser::arr_stmt,
                Parser::cond_stmt,
                Parser::iter_stmt,
                Parser::func_stmt,
                Parser::output_stmt,
                Parser::input_stmt,
            ],
        )
    }
    /// `[let] total += 1;`
    pub fn assign_stmt(&mut self) -> ParseResult {
        let mut node = self.node("ASSIGN_STMT");
        if let Some(let_) = self.accept(TokenKind::NwLet) {
            node.attach(let_);
        }
        node.attach(self.expect(TokenKind::Identifier)?);
        node.attach(self.assign()?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    /// Longest form first, so an `if` is only taken when no `else` follows.
    pub fn cond_stmt(&mut self) -> ParseResult {
        self.choose(
            "COND_STMT",
            &[Parser::elseif_stmt, Parser::ifelse_stmt, Parser::if_stmt],
        )
    }
    /// `( condition ) [then] { ... }` after an `if`.
    fn guarded_block(&mut self, node: &mut ParseTreeNode) -> Result<(), SyntaxError> {
        node.attach(self.expect(TokenKind::LeftParen)?);
        node.attach(self.bool_exp()?);
        node.attach(self.expect(TokenKind::RightParen)?);
        if let Some(then) = self.accept(TokenKind::NwThen) {
            node.attach(then);
        }
        node.attach(self.block()?);
        Ok(())
    }
    pub fn if_stmt(&mut self) -> ParseResult {
        let mut node = self.node("IF_STMT");
        node.attach(self.expect(TokenKind::KwIf)?);
        self.guarded_block(&mut node)?;
        Ok(node)
    }
    pub fn ifelse_stmt(&mut self) -> ParseResult {
        let mut node = self.node("IFELSE_STMT");
        node.attach(self.if_stmt()?);
        node.attach(self.else_stmt()?);
        Ok(node)
    }
    /// An `if` followed by one or more `else if` branches and an optional `else`.
    pub fn elseif_stmt(&mut self) -> ParseResult {
        let mut node = self.node("ELSEIF_STMT");
        node.attach(self.if_stmt()?);
        let mut branches = 0;
        while self.check(TokenKind::KwElse)
            && self.peek_n(1).map(|token| token.kind) == Some(TokenKind::KwIf)
        {
            node.attach(self.expect(TokenKind::KwElse)?);
            node.attach(self.expect(TokenKind::KwIf)?);
            self.guarded_block(&mut node)?;
            branches += 1;
        }
        if branches == 0 {
            return Err(self.error(Expected::Production("KW_ELSE KW_IF")));
        }
        if let Some(otherwise) = self.maybe(Parser::else_stmt) {
            node.attach(otherwise);
        }
        Ok(node)
    }
    pub fn else_stmt(&mut self) -> ParseResult {
        let mut node = self.node("ELSE_STMT");
        node.attach(self.expect(TokenKind::KwElse)?);
        node.attach(self.block()?);
        Ok(node)
    }
    pub fn iter_stmt(&mut self) -> ParseResult {
        self.choose("ITER_STMT", &[Parser::while_stmt, Parser::for_stmt])
    }
    pub fn while_stmt(&mut self) -> ParseResult {
        let mut node = self.node("WHILE_STMT");
        node.attach(self.expect(TokenKind::KwWhile)?);
        node.attach(self.expect(TokenKind::LeftParen)?);
        node.attach(self.bool_exp()?);
        node.attach(self.expect(TokenKind::RightParen)?);
        if let Some(do_) = self.accept(TokenKind::NwDo) {
            node.attach(do_);
        }
        node.attach(self.block()?);
        Ok(node)
    }
    /// `for (integer i = 0; i < n; i++) { ... }`
    pub fn for_stmt(&mut self) -> ParseResult {
        let mut node = self.node("FOR_STMT");
        node.attach(self.expect(TokenKind::KwFor)?);
        node.attach(self.expect(TokenKind::LeftParen)?);
        node.attach(self.choose("FOR_INIT", &[Parser::var_decl, Parser::assign_stmt])?);
        node.attach(self.bool_exp()?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        node.attach(self.update()?);
        node.attach(self.expect(TokenKind::RightParen)?);
        if let Some(do_) = self.accept(TokenKind::NwDo) {
            node.attach(do_);
        }
        node.attach(self.block()?);
        Ok(node)
    }
    pub fn return_stmt(&mut self) -> ParseResult {
        let mut node = self.node("RETURN_STMT");
        node.attach(self.expect(TokenKind::KwReturn)?);
        node.attach(self.exp()?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    pub fn output_stmt(&mut self) -> ParseResult {
        self.choose(
            "OUTPUT_STMT",
            &[
                Parser::std_output,
                Parser::value_output,
                Parser::sequence_output,
            ],
        )
    }
    /// `display("hello");`
    pub fn std_output(&mut self) -> ParseResult {
        let mut node = self.node("STD_OUTPUT");
        node.attach(self.expect(TokenKind::KwDisplay)?);
        node.attach(self.expect(TokenKind::LeftParen)?);
        node.attach(self.expect(TokenKind::StrConst)?);
        node.attach(self.expect(TokenKind::RightParen)?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    /// `display(%d, count);`
    pub fn value_output(&mut self) -> ParseResult {
        let mut node = self.node("VALUE_OUTPUT");
        node.attach(self.expect(TokenKind::KwDisplay)?);
        node.attach(self.expect(TokenKind::LeftParen)?);
        node.attach(self.format_specifier()?);
        node.attach(self.expect(TokenKind::Comma)?);
        node.attach(self.expect(TokenKind::Identifier)?);
        node.attach(self.expect(TokenKind::RightParen)?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    pub fn format_specifier(&mut self) -> ParseResult {
        self.wrap_one_of("FORMAT_SPECIFIER", FORMAT_KINDS)
    }
    /// `display("%d of %d", done, total + 1);`
    pub fn sequence_output(&mut self) -> ParseResult {
        let mut node = self.node("SEQUENCE_OUTPUT");
        node.attach(self.expect(TokenKind::KwDisplay)?);
        node.attach(self.expect(TokenKind::LeftParen)?);
        node.attach(self.expect(TokenKind::StrWithFormat)?);
        while let Some(comma) = self.accept(TokenKind::Comma) {
            node.attach(comma);
            node.attach(self.output_elem()?);
        }
        node.attach(self.expect(TokenKind::RightParen)?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
    pub fn output_elem(&mut self) -> ParseResult {
        let mut node = self.node("OUTPUT_ELEM");
        let elem = match self.accept(TokenKind::StrConst) {
            Some(string) => string,
            None => match self.maybe(Parser::arith_exp) {
                Some(arith) => arith,
                None => self.expect(TokenKind::Identifier)?,
            },
        };
        node.attach(elem);
        Ok(node)
    }
    /// `name = input("Your name: ", string);`
    pub fn input_stmt(&mut self) -> ParseResult {
        let mut node = self.node("INPUT_STMT");
        node.attach(self.expect(TokenKind::Identifier)?);
        node.attach(self.expect(TokenKind::AssignOp)?);
        node.attach(self.expect(TokenKind::KwInput)?);
        node.attach(self.expect(TokenKind::LeftParen)?);
        node.attach(self.expect(TokenKind::StrConst)?);
        node.attach(self.expect(TokenKind::Comma)?);
        node.attach(self.type_spec()?);
        node.attach(self.expect(TokenKind::RightParen)?);
        node.attach(self.expect(TokenKind::Semicolon)?);
        Ok(node)
    }
}
