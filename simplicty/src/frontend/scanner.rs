use crate::frontend::token::Token;
use crate::frontend::token::TokenKind;
use std::fmt::Display;
use std::fmt::Formatter;
use tracing::warn;

/// A problem found while scanning.
///
/// Scanning never stops at a lexical error. The offending text becomes an
/// `INVALID` or `UNKNOWN` token (or no token at all for malformed character
/// literals) and the error is collected next to the token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexicalError {
    /// A number containing letters, decoration characters or several dots.
    InvalidNumber { lexeme: String, line: usize },
    /// A word containing decoration characters such as `@` or `.`.
    InvalidIdentifier { lexeme: String, line: usize },
    /// A character literal holding more than one character.
    InvalidCharacter { lexeme: String, line: usize },
    EmptyCharacter { line: usize },
    UnterminatedCharacter { line: usize },
    UnterminatedString { line: usize },
    UnterminatedComment { line: usize },
    UnknownCharacter { lexeme: String, line: usize },
}

impl LexicalError {
    pub fn line(&self) -> usize {
        match self {
            LexicalError::InvalidNumber { line, .. }
            | LexicalError::InvalidIdentifier { line, .. }
            | LexicalError::InvalidCharacter { line, .. }
            | LexicalError::EmptyCharacter { line }
            | LexicalError::UnterminatedCharacter { line }
            | LexicalError::UnterminatedString { line }
            | LexicalError::UnterminatedComment { line }
            | LexicalError::UnknownCharacter { line, .. } => *line,
        }
    }
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LexicalError::InvalidNumber { lexeme, line } => {
                write!(f, "Invalid number '{lexeme}' at line {line}")
            }
            LexicalError::InvalidIdentifier { lexeme, line } => {
                write!(f, "Invalid identifier '{lexeme}' at line {line}")
            }
            LexicalError::InvalidCharacter { lexeme, line } => {
                write!(f, "Character literal {lexeme} holds more than one character at line {line}")
            }
            LexicalError::EmptyCharacter { line } => {
                write!(f, "Empty character literal at line {line}")
            }
            LexicalError::UnterminatedCharacter { line } => {
                write!(f, "Unterminated character literal at line {line}")
            }
            LexicalError::UnterminatedString { line } => {
                write!(f, "Unterminated string starting at line {line}")
            }
            LexicalError::UnterminatedComment { line } => {
                write!(f, "Unterminated multi-line comment starting at line {line}")
            }
            LexicalError::UnknownCharacter { lexeme, line } => {
                write!(f, "Unrecognized character '{lexeme}' at line {line}")
            }
        }
    }
}

pub struct Scanner {
    source: Vec<char>,
    tokens: Vec<Token>,
    errors: Vec<LexicalError>,
    start: usize,
    current: usize,
    /// Line of the character at `current` (1-based).
    line: usize,
    /// Line of the character at `start`.
    start_line: usize,
}

impl Scanner {
    fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
        }
    }
    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }
    fn advance(&mut self) -> char {
        let c = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        c
    }
    fn advance_if(&mut self, expected: char) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.current += 1;
            true
        } else {
            false
        }
    }
    fn peek(&self) -> char {
        self.peek_n(0)
    }
    fn peek_next(&self) -> char {
        self.peek_n(1)
    }
    fn peek_n(&self, n: usize) -> char {
        self.source.get(self.current + n).copied().unwrap_or('\0')
    }
    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }
    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.lexeme();
        self.add_token_with(kind, lexeme);
    }
    fn add_token_with(&mut self, kind: TokenKind, lexeme: String) {
        self.tokens.push(Token::new(kind, lexeme, self.start_line));
    }
    fn report(&mut self, error: LexicalError) {
        warn!("{}", error);
        self.errors.push(error);
    }
    // Punctuation that may glue onto words and numbers but never belongs in one.
    fn is_decoration(c: char) -> bool {
        matches!(c, '@' | '#' | '$' | '?' | '.')
    }
    fn is_word_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }
    fn is_format_letter(c: char) -> bool {
        matches!(c, 'd' | 'c' | 'f' | 's')
    }
    fn line_comment(&mut self) {
        // Skip the second `~`.
        self.advance();
        let text_start = self.current;
        while self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }
        let text = self.source[text_start..self.current].iter().collect();
        self.add_token_with(TokenKind::Comment, text);
    }
    fn block_comment(&mut self) {
        // Skip the `^` of the opening `~^`.
        self.advance();
        let mut text = String::new();
        while !(self.peek() == '^' && self.peek_next() == '~') && !self.is_at_end() {
            let c = self.advance();
            if c == '\n' {
                self.line += 1;
                text.push(' ');
            } else {
                text.push(c);
            }
        }
        if self.is_at_end() {
            self.report(LexicalError::UnterminatedComment {
                line: self.start_line,
            });
        } else {
            self.advance();
            self.advance();
        }
        self.add_token_with(TokenKind::Comment, text);
    }
    fn number(&mut self) {
        while Scanner::is_word_char(self.peek()) || Scanner::is_decoration(self.peek()) {
            self.advance();
        }
        let lexeme = self.lexeme();
        let dots = lexeme.matches('.').count();
        let malformed = lexeme
            .chars()
            .any(|c| !c.is_ascii_digit() && c != '.');
        if malformed || dots > 1 {
            let line = self.start_line;
            self.report(LexicalError::InvalidNumber {
                lexeme: lexeme.clone(),
                line,
            });
            self.add_token_with(TokenKind::Invalid, lexeme);
        } else if dots == 1 {
            self.add_token_with(TokenKind::FloatConst, lexeme);
        } else {
            self.add_token_with(TokenKind::NumConst, lexeme);
        }
    }
    /// Scan identifiers and reserved words.
    fn word(&mut self) {
        while Scanner::is_word_char(self.peek()) || Scanner::is_decoration(self.peek()) {
            self.advance();
        }
        let lexeme = self.lexeme();
        if lexeme.chars().any(Scanner::is_decoration) {
            let line = self.start_line;
            self.report(LexicalError::InvalidIdentifier {
                lexeme: lexeme.clone(),
                line,
            });
            self.add_token_with(TokenKind::Invalid, lexeme);
            return;
        }
        let kind = TokenKind::keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        self.add_token_with(kind, lexeme);
    }
    fn string(&mut self) {
        let mut specifiers = 0;
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '%' && Scanner::is_format_letter(self.peek_next()) {
                specifiers += 1;
                self.advance();
            } else if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }
        if self.is_at_end() {
            self.report(LexicalError::UnterminatedString {
                line: self.start_line,
            });
        } else {
            // self.peek() == '"'
            self.advance();
        }
        if specifiers > 0 {
            self.add_token(TokenKind::StrWithFormat);
        } else {
            self.add_token(TokenKind::StrConst);
        }
    }
    fn character(&mut self) {
        if self.advance_if('\'') {
            self.report(LexicalError::EmptyCharacter {
                line: self.start_line,
            });
            return;
        }
        let mut end = self.current;
        while end < self.source.len() && self.source[end] != '\'' && self.source[end] != '\n' {
            end += 1;
        }
        if end >= self.source.len() || self.source[end] == '\n' {
            self.report(LexicalError::UnterminatedCharacter {
                line: self.start_line,
            });
            return;
        }
        let content = &self.source[self.current..end];
        let single = content.len() == 1 || (content.len() == 2 && content[0] == '\\');
        self.current = end + 1;
        if single {
            self.add_token(TokenKind::CharConst);
        } else {
            let lexeme = self.lexeme();
            let line = self.start_line;
            self.report(LexicalError::InvalidCharacter {
                lexeme: lexeme.clone(),
                line,
            });
            self.add_token_with(TokenKind::Invalid, lexeme);
        }
    }
    fn percent(&mut self) {
        let c = self.peek();
        if Scanner::is_format_letter(c) && !Scanner::is_word_char(self.peek_next()) {
            self.advance();
            let kind = match c {
                'd' => TokenKind::FormatInt,
                'c' => TokenKind::FormatChar,
                'f' => TokenKind::FormatFloat,
                _ => TokenKind::FormatStr,
            };
            self.add_token(kind);
        } else if self.advance_if('=') {
            self.add_token(TokenKind::ModAssign);
        } else {
            self.add_token(TokenKind::ModOp);
        }
    }
    fn slash(&mut self) {
        if self.advance_if('/') {
            if self.advance_if('=') {
                self.add_token(TokenKind::IntDivAssign);
            } else {
                self.add_token(TokenKind::IntDivOp);
            }
        } else if self.advance_if('=') {
            self.add_token(TokenKind::DivAssign);
        } else {
            self.add_token(TokenKind::DivOp);
        }
    }
    /// Add `double` when the next character is `second`, `single` otherwise.
    fn one_or_two(&mut self, second: char, double: TokenKind, single: TokenKind) {
        if self.advance_if(second) {
            self.add_token(double);
        } else {
            self.add_token(single);
        }
    }
    fn unknown(&mut self) {
        let lexeme = self.lexeme();
        let line = self.start_line;
        self.report(LexicalError::UnknownCharacter {
            lexeme: lexeme.clone(),
            line,
        });
        self.add_token_with(TokenKind::Unknown, lexeme);
    }
    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '\n' => self.line += 1,
            c if c.is_whitespace() => (),
            '~' if self.peek() == '~' => self.line_comment(),
            '~' if self.peek() == '^' => self.block_comment(),
            '"' => self.string(),
            '\'' => self.character(),
            '%' => self.percent(),
            '/' => self.slash(),
            '+' => {
                if self.advance_if('+') {
                    self.add_token(TokenKind::UnaryInc);
                } else {
                    self.one_or_two('=', TokenKind::AddAssign, TokenKind::AddOp);
                }
            }
            '-' => {
                if self.advance_if('-') {
                    self.add_token(TokenKind::UnaryDec);
                } else {
                    self.one_or_two('=', TokenKind::SubAssign, TokenKind::SubOp);
                }
            }
            '*' => self.one_or_two('=', TokenKind::MulAssign, TokenKind::MulOp),
            '^' => self.add_token(TokenKind::ExpoOp),
            '=' => self.one_or_two('=', TokenKind::RelEq, TokenKind::AssignOp),
            '<' => self.one_or_two('=', TokenKind::RelLe, TokenKind::RelLt),
            '>' => self.one_or_two('=', TokenKind::RelGe, TokenKind::RelGt),
            '!' => self.one_or_two('=', TokenKind::RelNeq, TokenKind::LogNot),
            '&' if self.peek() == '&' => {
                self.advance();
                self.add_token(TokenKind::LogAnd);
            }
            '|' if self.peek() == '|' => {
                self.advance();
                self.add_token(TokenKind::LogOr);
            }
            ',' => self.add_token(TokenKind::Comma),
            ';' => self.add_token(TokenKind::Semicolon),
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftCurly),
            '}' => self.add_token(TokenKind::RightCurly),
            '[' => self.add_token(TokenKind::LeftBracket),
            ']' => self.add_token(TokenKind::RightBracket),
            c if c.is_ascii_digit() => self.number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.word(),
            _ => self.unknown(),
        }
    }
    fn scan_tokens(&mut self) {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token();
        }
        self.tokens.push(Token::new(TokenKind::Eof, "EOF", self.line));
    }
    /// Scan `src` into tokens. The last token is always `EOF`.
    pub fn scan(src: &str) -> Vec<Token> {
        Scanner::scan_reporting(src).0
    }
    /// Scan `src` and also return the lexical errors that were found.
    pub fn scan_reporting(src: &str) -> (Vec<Token>, Vec<LexicalError>) {
        let mut scanner = Scanner::new(src);
        scanner.scan_tokens();
        (scanner.tokens, scanner.errors)
    }
    /// Render `msg` below line `line` (1-based) of `src`.
    pub fn error(src: &str, line: usize, msg: &str) -> String {
        let lines = src.split('\n').collect::<Vec<&str>>();
        let current = match line.checked_sub(1).and_then(|i| lines.get(i)) {
            Some(current) => current,
            None => return format!("```\n{msg}\n```"),
        };
        let prev_line = if line > 1 {
            let prev_n = line - 1;
            let prev = lines[prev_n - 1];
            format!("\n{prev_n}  | {prev}")
        } else {
            "".to_string()
        };
        let line_num_width = 4 + line.to_string().len();
        let err_indent = " ".repeat(line_num_width);
        format!("```{prev_line}\n{line}  | {current}\n{err_indent}^ {msg}\n```")
    }
}
