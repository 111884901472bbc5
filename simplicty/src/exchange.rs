//! Text form of a token sequence, used to hand tokens from the scanner to a
//! separate parsing pass.
//!
//! Each token is one line:
//!
//! ```text
//! TOKEN: <lexeme> | TYPE: <kind> | LINE: <line>
//! ```
//!
//! Lexemes are escaped so that they never contain `|` or whitespace:
//! `\\` for a backslash, `\p` for `|`, `\s` for a space and `\t`, `\n`, `\r`.

use crate::frontend::Token;
use crate::frontend::TokenKind;
use anyhow::Context;
use anyhow::Result;

pub fn escape(lexeme: &str) -> String {
    let mut out = String::with_capacity(lexeme.len());
    for c in lexeme.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\p"),
            ' ' => out.push_str("\\s"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

pub fn unescape(field: &str) -> Result<String> {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('p') => out.push('|'),
            Some('s') => out.push(' '),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => return Err(anyhow::anyhow!("Unknown escape \\{} in {}", other, field)),
            None => return Err(anyhow::anyhow!("Dangling backslash in {}", field)),
        }
    }
    Ok(out)
}

pub fn format_token(token: &Token) -> String {
    format!(
        "TOKEN: {} | TYPE: {} | LINE: {}",
        escape(&token.lexeme),
        token.kind,
        token.line
    )
}

/// One line per token, including the closing `EOF`.
pub fn write_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format_token(token));
        out.push('\n');
    }
    out
}

/// Read a single line. Lines that do not start with `TOKEN:` are skipped.
pub fn parse_line(line: &str) -> Result<Option<Token>> {
    let line = line.trim();
    let rest = match line.strip_prefix("TOKEN:") {
        Some(rest) => rest,
        None => return Ok(None),
    };
    let mut fields = rest.split('|');
    let lexeme = fields.next().unwrap_or_default().trim();
    let lexeme = unescape(lexeme)?;
    let kind = fields
        .next()
        .and_then(|field| field.trim().strip_prefix("TYPE:"))
        .ok_or_else(|| anyhow::anyhow!("Missing TYPE field"))?
        .trim();
    let kind = kind.parse::<TokenKind>()?;
    let line = fields
        .next()
        .and_then(|field| field.trim().strip_prefix("LINE:"))
        .and_then(|n| n.trim().parse::<usize>().ok())
        .unwrap_or(0);
    Ok(Some(Token::new(kind, lexeme, line)))
}

pub fn read_tokens(text: &str) -> Result<Vec<Token>> {
    let mut tokens = vec![];
    for (i, line) in text.lines().enumerate() {
        let token = parse_line(line).with_context(|| format!("Invalid token on line {}", i + 1))?;
        if let Some(token) = token {
            tokens.push(token);
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::Scanner;
    use indoc::indoc;

    #[test]
    fn test_format_token() {
        let token = Token::new(TokenKind::StrConst, "\"a | b\"", 4);
        assert_eq!(
            format_token(&token),
            "TOKEN: \"a\\s\\p\\sb\" | TYPE: STR_CONST | LINE: 4"
        );
    }

    #[test]
    fn test_awkward_lexemes_survive() {
        let src = "display(\"x || y \\\\ z\"); ~^ a\ncomment ^~ a || b;";
        let tokens = Scanner::scan(src);
        let text = write_tokens(&tokens);
        for line in text.lines() {
            assert_eq!(line.matches('|').count(), 2, "{line}");
        }
        let read = read_tokens(&text).unwrap();
        assert_eq!(read, tokens);
    }

    #[test]
    fn test_read_tokens() {
        let text = indoc! {"
            Tokens generated:
            TOKEN: integer | TYPE: TYPE_INTEGER | LINE: 1
            TOKEN: main | TYPE: KW_MAIN
            TOKEN: ( | TYPE: LEFT_PAREN | LINE: ?

            TOKEN: EOF | TYPE: EOF | LINE: 2
        "};
        let tokens = read_tokens(text).unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0], Token::new(TokenKind::TypeInteger, "integer", 1));
        assert_eq!(tokens[1].kind, TokenKind::KwMain);
        assert_eq!(tokens[1].line, 0);
        assert_eq!(tokens[2].line, 0);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_read_errors() {
        let text = "TOKEN: x | TYPE: IDENTIFIER | LINE: 1\nTOKEN: y | TYPE: NAME | LINE: 1\n";
        let err = read_tokens(text).unwrap_err();
        assert_eq!(err.to_string(), "Invalid token on line 2");
        assert!(format!("{err:#}").contains("Unknown token kind: NAME"));

        assert!(read_tokens("TOKEN: x").is_err());
        assert!(read_tokens("TOKEN: a\\q | TYPE: IDENTIFIER").is_err());
    }
}
