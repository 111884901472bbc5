//! Scanner, tokens and the recursive-descent parser.

mod grammar;
mod parser;
mod scanner;
mod token;

pub use parser::Expected;
pub use parser::ParseResult;
pub use parser::Parser;
pub use parser::ParserOptions;
pub use parser::Production;
pub use parser::SyntaxError;
pub use scanner::LexicalError;
pub use scanner::Scanner;
pub use token::Token;
pub use token::TokenKind;
