use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Identifiers
    /// foo
    Identifier,

    // Keywords
    /// break
    KwBreak,
    /// continue
    KwContinue,
    /// default
    KwDefault,
    /// display
    KwDisplay,
    /// else
    KwElse,
    /// for
    KwFor,
    /// if
    KwIf,
    /// input
    KwInput,
    /// main
    KwMain,
    /// return
    KwReturn,
    /// while
    KwWhile,

    // Reserved words
    /// boolean
    TypeBoolean,
    /// character
    TypeCharacter,
    /// float
    TypeFloat,
    /// integer
    TypeInteger,
    /// string
    TypeString,
    /// constant
    RwConstant,
    /// null
    RwNull,
    /// void
    RwVoid,

    // Noise words
    /// do
    NwDo,
    /// end
    NwEnd,
    /// let
    NwLet,
    /// then
    NwThen,

    // Literals
    /// 42
    NumConst,
    /// 4.2
    FloatConst,
    /// "foo"
    StrConst,
    /// "x is %d"
    StrWithFormat,
    /// 'a'
    CharConst,
    /// true, false
    BoolConst,

    // Format specifiers
    /// %d
    FormatInt,
    /// %c
    FormatChar,
    /// %f
    FormatFloat,
    /// %s
    FormatStr,

    // Arithmetic operators
    /// +
    AddOp,
    /// -
    SubOp,
    /// *
    MulOp,
    /// /
    DivOp,
    /// //
    IntDivOp,
    /// %
    ModOp,
    /// ^
    ExpoOp,

    // Relational operators
    /// <
    RelLt,
    /// >
    RelGt,
    /// <=
    RelLe,
    /// >=
    RelGe,
    /// ==
    RelEq,
    /// !=
    RelNeq,

    // Logical operators
    /// &&
    LogAnd,
    /// ||
    LogOr,
    /// !
    LogNot,

    // Assignment operators
    /// =
    AssignOp,
    /// +=
    AddAssign,
    /// -=
    SubAssign,
    /// *=
    MulAssign,
    /// /=
    DivAssign,
    /// //=
    IntDivAssign,
    /// %=
    ModAssign,

    // Unary operators
    /// ++
    UnaryInc,
    /// --
    UnaryDec,

    // Delimiters
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// {
    LeftCurly,
    /// }
    RightCurly,
    /// [
    LeftBracket,
    /// ]
    RightBracket,

    // Markers
    /// ~~ foo
    Comment,
    /// A lexeme that looked like a number, word or character but was malformed.
    Invalid,
    /// A character that does not start any token.
    Unknown,
    Eof,
}

impl TokenKind {
    pub const ALL: &'static [TokenKind] = &[
        TokenKind::Identifier,
        TokenKind::KwBreak,
        TokenKind::KwContinue,
        TokenKind::KwDefault,
        TokenKind::KwDisplay,
        TokenKind::KwElse,
        TokenKind::KwFor,
        TokenKind::KwIf,
        TokenKind::KwInput,
        TokenKind::KwMain,
        TokenKind::KwReturn,
        TokenKind::KwWhile,
        TokenKind::TypeBoolean,
        TokenKind::TypeCharacter,
        TokenKind::TypeFloat,
        TokenKind::TypeInteger,
        TokenKind::TypeString,
        TokenKind::RwConstant,
        TokenKind::RwNull,
        TokenKind::RwVoid,
        TokenKind::NwDo,
        TokenKind::NwEnd,
        TokenKind::NwLet,
        TokenKind::NwThen,
        TokenKind::NumConst,
        TokenKind::FloatConst,
        TokenKind::StrConst,
        TokenKind::StrWithFormat,
        TokenKind::CharConst,
        TokenKind::BoolConst,
        TokenKind::FormatInt,
        TokenKind::FormatChar,
        TokenKind::FormatFloat,
        TokenKind::FormatStr,
        TokenKind::AddOp,
        TokenKind::SubOp,
        TokenKind::MulOp,
        TokenKind::DivOp,
        TokenKind::IntDivOp,
        TokenKind::ModOp,
        TokenKind::ExpoOp,
        TokenKind::RelLt,
        TokenKind::RelGt,
        TokenKind::RelLe,
        TokenKind::RelGe,
        TokenKind::RelEq,
        TokenKind::RelNeq,
        TokenKind::LogAnd,
        TokenKind::LogOr,
        TokenKind::LogNot,
        TokenKind::AssignOp,
        TokenKind::AddAssign,
        TokenKind::SubAssign,
        TokenKind::MulAssign,
        TokenKind::DivAssign,
        TokenKind::IntDivAssign,
        TokenKind::ModAssign,
        TokenKind::UnaryInc,
        TokenKind::UnaryDec,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftCurly,
        TokenKind::RightCurly,
        TokenKind::LeftBracket,
        TokenKind::RightBracket,
        TokenKind::Comment,
        TokenKind::Invalid,
        TokenKind::Unknown,
        TokenKind::Eof,
    ];

    /// Name of the kind as it appears in the token exchange format and as
    /// the label of terminal nodes in the parse tree.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::KwBreak => "KW_BREAK",
            TokenKind::KwContinue => "KW_CONTINUE",
            TokenKind::KwDefault => "KW_DEFAULT",
            TokenKind::KwDisplay => "KW_DISPLAY",
            TokenKind::KwElse => "KW_ELSE",
            TokenKind::KwFor => "KW_FOR",
            TokenKind::KwIf => "KW_IF",
            TokenKind::KwInput => "KW_INPUT",
            TokenKind::KwMain => "KW_MAIN",
            TokenKind::KwReturn => "KW_RETURN",
            TokenKind::KwWhile => "KW_WHILE",
            TokenKind::TypeBoolean => "TYPE_BOOLEAN",
            TokenKind::TypeCharacter => "TYPE_CHARACTER",
            TokenKind::TypeFloat => "TYPE_FLOAT",
            TokenKind::TypeInteger => "TYPE_INTEGER",
            TokenKind::TypeString => "TYPE_STRING",
            TokenKind::RwConstant => "RW_CONSTANT",
            TokenKind::RwNull => "RW_NULL",
            TokenKind::RwVoid => "RW_VOID",
            TokenKind::NwDo => "NW_DO",
            TokenKind::NwEnd => "NW_END",
            TokenKind::NwLet => "NW_LET",
            TokenKind::NwThen => "NW_THEN",
            TokenKind::NumConst => "NUM_CONST",
            TokenKind::FloatConst => "FLOAT_CONST",
            TokenKind::StrConst => "STR_CONST",
            TokenKind::StrWithFormat => "STR_WITH_FORMAT",
            TokenKind::CharConst => "CHAR_CONST",
            TokenKind::BoolConst => "BOOL_CONST",
            TokenKind::FormatInt => "FORMAT_INT",
            TokenKind::FormatChar => "FORMAT_CHAR",
            TokenKind::FormatFloat => "FORMAT_FLOAT",
            TokenKind::FormatStr => "FORMAT_STR",
            TokenKind::AddOp => "ADD_OP",
            TokenKind::SubOp => "SUB_OP",
            TokenKind::MulOp => "MUL_OP",
            TokenKind::DivOp => "DIV_OP",
            TokenKind::IntDivOp => "INTDIV_OP",
            TokenKind::ModOp => "MOD_OP",
            TokenKind::ExpoOp => "EXPO_OP",
            TokenKind::RelLt => "REL_LT",
            TokenKind::RelGt => "REL_GT",
            TokenKind::RelLe => "REL_LE",
            TokenKind::RelGe => "REL_GE",
            TokenKind::RelEq => "REL_EQ",
            TokenKind::RelNeq => "REL_NEQ",
            TokenKind::LogAnd => "LOG_AND",
            TokenKind::LogOr => "LOG_OR",
            TokenKind::LogNot => "LOG_NOT",
            TokenKind::AssignOp => "ASSIGN_OP",
            TokenKind::AddAssign => "ADD_ASSIGN",
            TokenKind::SubAssign => "SUB_ASSIGN",
            TokenKind::MulAssign => "MUL_ASSIGN",
            TokenKind::DivAssign => "DIV_ASSIGN",
            TokenKind::IntDivAssign => "INTDIV_ASSIGN",
            TokenKind::ModAssign => "MOD_ASSIGN",
            TokenKind::UnaryInc => "UNARY_INC",
            TokenKind::UnaryDec => "UNARY_DEC",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftCurly => "LEFT_CURLY",
            TokenKind::RightCurly => "RIGHT_CURLY",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::Comment => "COMMENT",
            TokenKind::Invalid => "INVALID",
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::Eof => "EOF",
        }
    }
    pub fn from_name(name: &str) -> Option<TokenKind> {
        TokenKind::ALL
            .iter()
            .find(|kind| kind.name() == name)
            .copied()
    }
    /// Look up a reserved word, or `None` if the word is an identifier.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(lexeme, _)| *lexeme == word)
            .map(|(_, kind)| *kind)
    }
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            TokenKind::TypeBoolean
                | TokenKind::TypeCharacter
                | TokenKind::TypeFloat
                | TokenKind::TypeInteger
                | TokenKind::TypeString
        )
    }
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            TokenKind::RelLt
                | TokenKind::RelGt
                | TokenKind::RelLe
                | TokenKind::RelGe
                | TokenKind::RelEq
                | TokenKind::RelNeq
        )
    }
    pub fn is_logical(&self) -> bool {
        matches!(self, TokenKind::LogAnd | TokenKind::LogOr)
    }
}

/// Reserved words of the language. Every other word is an identifier.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("boolean", TokenKind::TypeBoolean),
    ("break", TokenKind::KwBreak),
    ("character", TokenKind::TypeCharacter),
    ("constant", TokenKind::RwConstant),
    ("continue", TokenKind::KwContinue),
    ("default", TokenKind::KwDefault),
    ("display", TokenKind::KwDisplay),
    ("do", TokenKind::NwDo),
    ("else", TokenKind::KwElse),
    ("end", TokenKind::NwEnd),
    ("false", TokenKind::BoolConst),
    ("float", TokenKind::TypeFloat),
    ("for", TokenKind::KwFor),
    ("if", TokenKind::KwIf),
    ("input", TokenKind::KwInput),
    ("integer", TokenKind::TypeInteger),
    ("let", TokenKind::NwLet),
    ("main", TokenKind::KwMain),
    ("null", TokenKind::RwNull),
    ("return", TokenKind::KwReturn),
    ("string", TokenKind::TypeString),
    ("then", TokenKind::NwThen),
    ("true", TokenKind::BoolConst),
    ("void", TokenKind::RwVoid),
    ("while", TokenKind::KwWhile),
];

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TokenKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        TokenKind::from_name(s).ok_or_else(|| anyhow::anyhow!("Unknown token kind: {}", s))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The kind of token, such as `count` (Identifier) or `while` (KwWhile).
    pub kind: TokenKind,
    /// The text of the token as it was written in the source.
    pub lexeme: String,
    /// The 1-based line on which the token starts.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \"{}\" line {}", self.kind, self.lexeme, self.line)
    }
}
