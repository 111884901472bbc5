use crate::exchange::read_tokens;
use crate::frontend::Parser;
use crate::frontend::ParserOptions;
use crate::frontend::Scanner;
use crate::frontend::Token;
use crate::tree::ParseTree;
use anyhow::Result;
use tracing::debug;
use tracing::info;
use tracing::subscriber::SetGlobalDefaultError;
use tracing::Level;
use tracing_subscriber;

/// Install the global `tracing` subscriber.
///
/// Fails when a subscriber was already installed, which happens when tests
/// run in the same process.
pub fn init_subscriber(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_test_writer()
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Parse `tokens` into a tree.
///
/// When `src` is given, a syntax error is reported together with the source
/// line it occurred on. The [SyntaxError](crate::frontend::SyntaxError) can
/// still be recovered with `downcast_ref`.
pub fn parse_tokens(
    tokens: &[Token],
    options: ParserOptions,
    src: Option<&str>,
) -> Result<ParseTree> {
    debug!("Parsing {} tokens with {:?}", tokens.len(), options);
    match Parser::parse(tokens, options) {
        Ok(tree) => {
            info!("Parsing successful");
            Ok(tree)
        }
        Err(err) => {
            let msg = match (src, err.line) {
                (Some(src), Some(line)) => {
                    let excerpt = Scanner::error(src, line, &err.to_string());
                    format!("Parsing failed:\n\n{excerpt}\n")
                }
                _ => format!("Parsing failed: {err}"),
            };
            Err(anyhow::Error::new(err).context(msg))
        }
    }
}

/// Scan and parse source text.
pub fn parse_source(src: &str, options: ParserOptions) -> Result<ParseTree> {
    let (tokens, errors) = Scanner::scan_reporting(src);
    debug!(
        "Scanned {} tokens with {} lexical errors",
        tokens.len(),
        errors.len()
    );
    parse_tokens(&tokens, options, Some(src))
}

/// Parse tokens in the exchange format.
pub fn parse_exchange(text: &str, options: ParserOptions) -> Result<ParseTree> {
    let tokens = read_tokens(text)?;
    parse_tokens(&tokens, options, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::write_tokens;
    use crate::frontend::Expected;
    use crate::frontend::SyntaxError;
    use crate::frontend::TokenKind;
    use indoc::indoc;

    const PROGRAM: &str = indoc! {r#"
        integer main(void) {
            display("hi");
        }
    "#};

    #[test]
    fn test_parse_source() {
        let tree = parse_source(PROGRAM, ParserOptions::default()).unwrap();
        assert_eq!(tree.root().label(), "SIMPLICITY");
    }

    #[test]
    fn test_parse_exchange_matches_source() {
        let text = write_tokens(&Scanner::scan(PROGRAM));
        let from_exchange = parse_exchange(&text, ParserOptions::default()).unwrap();
        let from_source = parse_source(PROGRAM, ParserOptions::default()).unwrap();
        assert_eq!(from_exchange.flat(), from_source.flat());
    }

    #[test]
    fn test_error_excerpt() {
        let src = indoc! {r#"
            integer main(void) {
                display("hi")
            }
        "#};
        let err = parse_source(src, ParserOptions::default()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("2  |     display(\"hi\")\n3  | }"), "{msg}");
        let syntax = err.downcast_ref::<SyntaxError>().unwrap();
        assert_eq!(syntax.expected, Expected::Token(TokenKind::Semicolon));
        assert_eq!(syntax.found, Some(TokenKind::RightCurly));
        assert_eq!(syntax.line, Some(3));
    }
}
