//! Simplicity is a small, C-like teaching language.
//!
//! This crate holds its front end.
//! Source text is scanned into tokens by [frontend::Scanner] and the tokens
//! are parsed by [frontend::Parser] into a [tree::ParseTree].
//! The tree can be written as a flat CSV listing or as a parenthesized
//! expression, which is what the `simplictyc` binary does.
//!
//! Scanning and parsing can also run as two separate passes.
//! In that case the tokens are handed over in the text format from
//! [exchange].
//!
//! ```
//! use simplicty::parse_source;
//! use simplicty::frontend::ParserOptions;
//!
//! let src = "integer main(void) { display(\"hi\"); }";
//! let tree = parse_source(src, ParserOptions::default()).unwrap();
//! assert_eq!(tree.root().label(), "SIMPLICITY");
//! ```

mod compile;
pub mod exchange;
pub mod frontend;
#[cfg(feature = "test-utils")]
pub mod tester;
pub mod tree;

pub use compile::init_subscriber;
pub use compile::parse_exchange;
pub use compile::parse_source;
pub use compile::parse_tokens;
