use crate::frontend::Parser;
use crate::frontend::ParserOptions;
use crate::frontend::Scanner;
use crate::frontend::Token;
use crate::frontend::TokenKind;
use crate::init_subscriber;
use crate::tree::ParseTree;
use crate::tree::ParseTreeNode;
use std::cmp::max;
use std::panic::Location;
use tracing::info;

pub struct Tester;

impl Tester {
    /// Initialize the subscriber for the tests.
    ///
    /// Cannot pass options, since the tests run concurrently.
    pub fn init_tracing() {
        let level = tracing::Level::INFO;
        match init_subscriber(level) {
            Ok(_) => (),
            Err(_e) => (),
        }
    }
    fn point_to_missing_line(expected: &str, index: usize) -> String {
        let mut result = String::new();
        result.push_str("A line is missing from the output:\n");
        result.push_str("```");
        for (i, line) in expected.lines().enumerate() {
            if i == index {
                result.push_str(&format!("\n{line}   <== missing"));
            } else {
                result.push_str(&format!("\n{line}"));
            }
        }
        result.push_str("\n```");
        result
    }
    pub fn check_lines_exact(actual: &str, expected: &str, caller: &Location<'_>) {
        let actual = actual.trim();
        let expected = expected.trim();
        let l = max(actual.lines().count(), expected.lines().count());
        for i in 0..l {
            let actual_line = match actual.lines().nth(i) {
                Some(line) => line,
                None => panic!("Line {i} not found in output: called from {caller}"),
            };
            let expected_line = match expected.lines().nth(i) {
                Some(line) => line,
                None => panic!("Unexpected line {i} in output: called from {caller}"),
            };
            assert_eq!(actual_line, expected_line, "called from {}", caller);
        }
    }
    /// Check whether the expected lines are present in the actual output.
    ///
    /// The actual output may contain additional lines that are not in the
    /// expected output, but the expected lines have to appear in order.
    pub fn check_lines_contain(actual: &str, expected: &str, caller: &Location<'_>) {
        let actual = actual.trim();
        let expected = expected.trim();
        let actual_lines = actual.lines().collect::<Vec<&str>>();
        let mut actual_index = 0;
        'outer: for (i, expected_line) in expected.lines().enumerate() {
            let expected_line = expected_line.trim();
            // An empty line would match anything.
            if expected_line.is_empty() {
                continue;
            }
            for (j, actual_line) in actual_lines.iter().enumerate().skip(actual_index) {
                if actual_line.contains(expected_line) {
                    actual_index = j + 1;
                    continue 'outer;
                }
            }
            let msg = Self::point_to_missing_line(expected, i);
            panic!("{msg}\nwhen called from {caller}");
        }
    }
    fn print_heading(msg: &str, src: &str) {
        info!("{msg}:\n```\n{src}\n```\n");
    }
    /// Scan and parse `src`; returns the tree and its parenthesized form.
    pub fn parse(src: &str, options: ParserOptions) -> (ParseTree, String) {
        let src = src.trim();
        Self::print_heading("Before parse", src);
        let tokens = Scanner::scan(src);
        let tree = match Parser::parse(&tokens, options) {
            Ok(tree) => tree,
            Err(err) => {
                let line = err.line.unwrap_or(0);
                panic!("{}", Scanner::error(src, line, &err.to_string()));
            }
        };
        let actual = tree.to_parenthesized();
        Self::print_heading("After parse", &actual);
        Self::verify(&tree, &tokens);
        (tree, actual)
    }
    fn verify_node(node: &ParseTreeNode) {
        for child in node.children() {
            assert_eq!(
                child.parent_id(),
                Some(node.id()),
                "{} has the wrong parent",
                child.label()
            );
            assert!(child.id() > node.id(), "{} was created before its parent", child.label());
            Self::verify_node(child);
        }
        if node.is_terminal() {
            assert!(node.children().is_empty(), "terminal {} has children", node.label());
        }
    }
    /// Run some extra verification on a tree.
    ///
    /// Every parent link points to the enclosing node and the leaves hold the
    /// consumed tokens in order, without comments.
    pub fn verify(tree: &ParseTree, tokens: &[Token]) {
        assert_eq!(tree.root().parent_id(), None);
        Self::verify_node(tree.root());
        let leaves = tree.terminals();
        let consumed = tokens
            .iter()
            .filter(|token| token.kind != TokenKind::Comment)
            .take(leaves.len())
            .collect::<Vec<&Token>>();
        assert_eq!(leaves, consumed);
    }
}
