use crate::frontend::token::Token;
use crate::frontend::token::TokenKind;
use crate::tree::ParseTree;
use crate::tree::ParseTreeNode;
use clap::Args;
use std::fmt::Display;
use std::fmt::Formatter;
use tracing::debug;
use tracing::enabled;
use tracing::trace;
use tracing::Level;

// Grammar switches, flattened into the driver's command line.
#[derive(Args, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Accept blocks without statements, such as an empty `main` body
    #[arg(long)]
    pub allow_empty_blocks: bool,
    /// Reject tokens after the closing brace of `main`
    #[arg(long)]
    pub require_eof: bool,
}

/// What the parser was looking for when it failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    /// One of several tokens, or a whole production, named by its label.
    Production(&'static str),
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::Production(name) => write!(f, "{name}"),
        }
    }
}

/// A mandatory element was not found.
///
/// `position` counts the tokens the parser sees, so comments are not counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub position: usize,
    pub expected: Expected,
    /// Kind of the token at `position`, or `None` at the end of input.
    pub found: Option<TokenKind>,
    pub line: Option<usize>,
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "expected {} at token {}, found ", self.expected, self.position)?;
        match self.found {
            Some(kind) => write!(f, "{kind}")?,
            None => write!(f, "end of input")?,
        }
        if let Some(line) = self.line {
            write!(f, " on line {line}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

pub type ParseResult = Result<ParseTreeNode, SyntaxError>;

/// A grammar production, used as an alternative in [Parser::choose].
pub type Production<'a> = fn(&mut Parser<'a>) -> ParseResult;

/// Recursive-descent parser over a scanned token sequence.
///
/// Productions live in `frontend::grammar` as methods on this type. Every
/// production either returns the node it built or a [SyntaxError]; in the
/// latter case the nodes it built were owned by the production and are
/// dropped with it.
pub struct Parser<'a> {
    tokens: Vec<&'a Token>,
    current: usize,
    next_id: usize,
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], options: ParserOptions) -> Self {
        let tokens = tokens
            .iter()
            .filter(|token| token.kind != TokenKind::Comment)
            .collect();
        Parser {
            tokens,
            current: 0,
            next_id: 0,
            options,
        }
    }
    /// Parse a complete program.
    pub fn parse(tokens: &'a [Token], options: ParserOptions) -> Result<ParseTree, SyntaxError> {
        let mut parser = Parser::new(tokens, options);
        parser.program()
    }
    /// Parse a complete program starting at the current position.
    pub fn program(&mut self) -> Result<ParseTree, SyntaxError> {
        let root = self.simplicity()?;
        if self.options.require_eof && !self.is_at_end() {
            return Err(self.error(Expected::Token(TokenKind::Eof)));
        }
        debug!("Parsed {} nodes", root.node_count());
        Ok(ParseTree::new(root))
    }
    pub fn options(&self) -> ParserOptions {
        self.options
    }
    pub fn position(&self) -> usize {
        self.current
    }
    /// Id that the next created node will get.
    pub fn next_id(&self) -> usize {
        self.next_id
    }
    pub fn previous(&self) -> Option<&'a Token> {
        self.current.checked_sub(1).map(|i| self.tokens[i])
    }
    /// The token at the cursor, or `None` at the end of input.
    pub fn peek(&self) -> Option<&'a Token> {
        self.peek_n(0)
    }
    pub fn peek_n(&self, n: usize) -> Option<&'a Token> {
        self.tokens
            .get(self.current + n)
            .copied()
            .filter(|token| token.kind != TokenKind::Eof)
    }
    pub fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }
    pub fn check(&self, kind: TokenKind) -> bool {
        match self.peek() {
            Some(token) => token.kind == kind,
            None => false,
        }
    }
    fn advance(&mut self) -> &'a Token {
        let token = self.tokens[self.current];
        self.current += 1;
        token
    }
    /// Create a node with the next id.
    pub fn node(&mut self, label: &str) -> ParseTreeNode {
        let id = self.next_id;
        self.next_id += 1;
        ParseTreeNode::new(id, label)
    }
    fn terminal(&mut self, label: &str) -> ParseTreeNode {
        let id = self.next_id;
        self.next_id += 1;
        let token = self.advance();
        self.log_state();
        ParseTreeNode::terminal(id, label, token.clone())
    }
    /// Error for `expected` at the cursor.
    pub fn error(&self, expected: Expected) -> SyntaxError {
        let token = self.peek();
        SyntaxError {
            position: self.current,
            expected,
            found: token.map(|token| token.kind),
            line: token
                .map(|token| token.line)
                .or_else(|| self.tokens.get(self.current).map(|token| token.line)),
        }
    }
    /// Consumed lexemes followed by the kinds of the remaining tokens.
    fn log_state(&self) {
        if !enabled!(Level::TRACE) {
            return;
        }
        let state = self
            .tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                if i < self.current {
                    token.lexeme.clone()
                } else {
                    token.kind.to_string()
                }
            })
            .collect::<Vec<String>>()
            .join(" ");
        trace!("{state}");
    }
    /// Match a single token of `kind`.
    ///
    /// On a mismatch the cursor does not move. The mismatch is an error when
    /// the token is mandatory and `Ok(None)` when it is optional.
    pub fn match_kind(
        &mut self,
        kind: TokenKind,
        optional: bool,
    ) -> Result<Option<ParseTreeNode>, SyntaxError> {
        if self.check(kind) {
            Ok(Some(self.terminal(kind.name())))
        } else if optional {
            Ok(None)
        } else {
            Err(self.error(Expected::Token(kind)))
        }
    }
    pub fn expect(&mut self, kind: TokenKind) -> ParseResult {
        self.expect_labeled(kind, kind.name())
    }
    /// Like [Parser::expect], but label the leaf with `label`.
    pub fn expect_labeled(&mut self, kind: TokenKind, label: &str) -> ParseResult {
        if self.check(kind) {
            Ok(self.terminal(label))
        } else {
            Err(self.error(Expected::Token(kind)))
        }
    }
    pub fn accept(&mut self, kind: TokenKind) -> Option<ParseTreeNode> {
        if self.check(kind) {
            Some(self.terminal(kind.name()))
        } else {
            None
        }
    }
    /// Match any one of `kinds` as a leaf; `name` describes the set in errors.
    pub fn expect_one_of(&mut self, kinds: &[TokenKind], name: &'static str) -> ParseResult {
        match self.peek() {
            Some(token) if kinds.contains(&token.kind) => {
                let kind = token.kind;
                Ok(self.terminal(kind.name()))
            }
            _ => Err(self.error(Expected::Production(name))),
        }
    }
    /// A `label` node holding a single leaf out of `kinds`.
    pub fn wrap_one_of(&mut self, label: &'static str, kinds: &[TokenKind]) -> ParseResult {
        let mut node = self.node(label);
        node.attach(self.expect_one_of(kinds, label)?);
        Ok(node)
    }
    /// Run `production` and restore the cursor when it fails.
    pub fn attempt<F>(&mut self, production: F) -> ParseResult
    where
        F: FnOnce(&mut Parser<'a>) -> ParseResult,
    {
        let saved = self.current;
        let result = production(self);
        if let Err(err) = &result {
            debug!("Backtracking to token {saved} after: {err}");
            self.current = saved;
        }
        result
    }
    /// Optional element: the node if `production` succeeds, nothing otherwise.
    pub fn maybe<F>(&mut self, production: F) -> Option<ParseTreeNode>
    where
        F: FnOnce(&mut Parser<'a>) -> ParseResult,
    {
        self.attempt(production).ok()
    }
    /// Zero or more repetitions of `production`.
    pub fn many<F>(&mut self, production: F) -> Vec<ParseTreeNode>
    where
        F: Fn(&mut Parser<'a>) -> ParseResult,
    {
        let mut nodes = vec![];
        loop {
            let start = self.current;
            match self.attempt(&production) {
                Ok(node) if self.current > start => nodes.push(node),
                _ => break,
            }
        }
        nodes
    }
    /// Try `alternatives` in order and return the first that succeeds.
    ///
    /// When all fail, the error of the alternative that got furthest is
    /// returned. Ties go to the earlier alternative.
    pub fn choose(&mut self, name: &'static str, alternatives: &[Production<'a>]) -> ParseResult {
        debug!("{name} at token {}", self.current);
        let mut furthest: Option<SyntaxError> = None;
        for alternative in alternatives {
            match self.attempt(*alternative) {
                Ok(node) => return Ok(node),
                Err(err) => {
                    let further = match &furthest {
                        Some(best) => err.position > best.position,
                        None => true,
                    };
                    if further {
                        furthest = Some(err);
                    }
                }
            }
        }
        Err(furthest.unwrap_or_else(|| self.error(Expected::Production(name))))
    }
}
