extern crate simplicty;

use indoc::indoc;
use std::panic::Location;
use simplicty::frontend::Parser;
use simplicty::frontend::ParserOptions;
use simplicty::frontend::Scanner;
use simplicty::frontend::Token;
use simplicty::frontend::TokenKind;
use simplicty::tester::Tester;

fn hello_tokens() -> Vec<Token> {
    use TokenKind::*;
    let tokens = [
        (TypeInteger, "integer"),
        (KwMain, "main"),
        (LeftParen, "("),
        (RwVoid, "void"),
        (RightParen, ")"),
        (LeftCurly, "{"),
        (KwDisplay, "display"),
        (LeftParen, "("),
        (StrConst, "\"hi\""),
        (RightParen, ")"),
        (Semicolon, ";"),
        (RightCurly, "}"),
    ];
    tokens
        .into_iter()
        .map(|(kind, lexeme)| Token::new(kind, lexeme, 1))
        .collect()
}

#[test]
fn parse_token_sequence() {
    Tester::init_tracing();
    let tokens = hello_tokens();
    let tree = Parser::parse(&tokens, ParserOptions::default()).unwrap();
    let root = tree.root();
    assert_eq!(root.label(), "SIMPLICITY");
    assert_eq!(root.id(), 0);
    assert_eq!(
        root.child_labels(),
        vec!["TYPE_INTEGER", "MAIN", "LEFT_PAREN", "RW_VOID", "RIGHT_PAREN", "BLOCK"]
    );
    let block = root.child(5).unwrap();
    assert_eq!(
        block.child_labels(),
        vec!["LEFT_CURLY", "STMT_LIST", "RIGHT_CURLY"]
    );
    let output = block.child(1).unwrap().child(0).unwrap();
    assert_eq!(output.label(), "STD_OUTPUT");
    assert_eq!(
        output.child_labels(),
        vec!["KW_DISPLAY", "LEFT_PAREN", "STR_CONST", "RIGHT_PAREN", "SEMICOLON"]
    );
    Tester::verify(&tree, &tokens);
}

#[test]
fn truncated_input() {
    let mut tokens = hello_tokens();
    tokens.pop();
    let err = Parser::parse(&tokens, ParserOptions::default()).unwrap_err();
    assert_eq!(err.expected.to_string(), "RIGHT_CURLY");
    assert_eq!(err.position, 11);
    assert_eq!(err.found, None);
}

#[test]
fn trailing_tokens() {
    let src = "integer main(void) { a = 1; } b";
    let tokens = Scanner::scan(src);
    let tree = Parser::parse(&tokens, ParserOptions::default()).unwrap();
    assert_eq!(tree.terminals().len(), 11);

    let options = ParserOptions {
        require_eof: true,
        ..ParserOptions::default()
    };
    let err = Parser::parse(&tokens, options).unwrap_err();
    assert_eq!(err.expected.to_string(), "EOF");
    assert_eq!(err.found, Some(TokenKind::Identifier));
    assert_eq!(err.position, 11);

    let tokens = Scanner::scan("integer main(void) { a = 1; } ~~ done");
    assert!(Parser::parse(&tokens, options).is_ok());
}

#[test]
fn empty_main() {
    let src = "integer main(void) { }";
    let tokens = Scanner::scan(src);
    assert!(Parser::parse(&tokens, ParserOptions::default()).is_err());

    let options = ParserOptions {
        allow_empty_blocks: true,
        ..ParserOptions::default()
    };
    let (tree, _) = Tester::parse(src, options);
    assert_eq!(tree.root().child_labels().last(), Some(&"BLOCK"));
}

#[test]
fn parse_program() {
    Tester::init_tracing();
    let src = indoc! {r#"
    ~~ Sum of squares
    integer square(integer n);
    integer values[3] = [1, 2, 3];

    integer square(integer n) {
        integer result = n * n;
        return result;
    }

    integer main(void) {
        integer total = 0;
        for (integer i = 0; i < 3; i++) {
            total += values[i] * values[i];
        }
        if (total > 10) then {
            display("big");
        } else {
            display(%d, total);
        }
        display("%d squares", total);
        return 0;
    }
    "#};
    let expected = indoc! {"
    (SIMPLICITY
      (FUNC_DECL
      (ARR_INIT
      (FUNC_DEF
          (RETURN_STMT
      (MAIN)
      (BLOCK
        (STMT_LIST
          (VAR_DECL
          (FOR_STMT
            (VAR_DECL
            (REL_EXP
            (UPDATE
            (BLOCK
              (STMT_LIST
                (ASSIGN_STMT
          (IFELSE_STMT
            (IF_STMT
                (STD_OUTPUT
            (ELSE_STMT
                (VALUE_OUTPUT
          (SEQUENCE_OUTPUT
        (RETURN_STMT
    "};
    let caller = Location::caller();
    let (_tree, actual) = Tester::parse(src, ParserOptions::default());
    Tester::check_lines_contain(&actual, expected, caller);
}

#[test]
fn parse_nested_loops() {
    Tester::init_tracing();
    let src = indoc! {r#"
    boolean grid[2][2];

    void fill(boolean cells[2][2]) {
        integer i = 0;
        while (i < 2 && !done) do {
            let i += 1;
            continue;
        }
    }

    integer main(void) {
        name = input("Name: ", string);
        fill(grid);
        if (a) { a = 1; } else if (b) { a = 2; }
        return a == 1 || b;
    }
    "#};
    let caller = Location::caller();
    let (tree, actual) = Tester::parse(src, ParserOptions::default());
    let expected = indoc! {"
    (SIMPLICITY
      (ARR_DECL
      (FUNC_DEF
          (PARAM_LIST
        (BLOCK
            (WHILE_STMT
              (BOOL_EXP
                (BOOL_TERM
              (NW_DO)
              (BLOCK
                (KW_CONTINUE)
      (MAIN)
          (INPUT_STMT
          (FUNC_CALL
          (ELSEIF_STMT
        (RETURN_STMT
          (EXP
            (BOOL_EXP
    "};
    Tester::check_lines_contain(&actual, expected, caller);
    assert!(tree.node_count() > 50);
}

#[test]
fn csv_listing() {
    let src = "integer main(void) { display(\"hi\"); }";
    let (tree, _) = Tester::parse(src, ParserOptions::default());
    let csv = tree.to_csv();
    let lines = csv.lines().collect::<Vec<&str>>();
    assert_eq!(lines[0], "NodeID,ParentID,Value");
    assert_eq!(lines[1], "0,,SIMPLICITY");
    assert_eq!(lines.len(), tree.node_count() + 1);
    let last = tree.nodes().last().unwrap().clone();
    let row = format!("{},{},RIGHT_CURLY", last.id(), last.parent_id().unwrap());
    assert_eq!(lines.last(), Some(&row.as_str()));
}

#[test]
fn parenthesized_output() {
    let src = "integer main(void) { display(\"hi\"); }";
    let (_, actual) = Tester::parse(src, ParserOptions::default());
    let expected = indoc! {"
    (SIMPLICITY
      (TYPE_INTEGER)
      (MAIN)
      (LEFT_PAREN)
      (RW_VOID)
      (RIGHT_PAREN)
      (BLOCK
        (LEFT_CURLY)
        (STMT_LIST
          (STD_OUTPUT
            (KW_DISPLAY)
            (LEFT_PAREN)
            (STR_CONST)
            (RIGHT_PAREN)
            (SEMICOLON)
          )
        )
        (RIGHT_CURLY)
      )
    )
    "};
    Tester::check_lines_exact(&actual, expected, Location::caller());
}

#[test]
fn leaves_follow_the_input() {
    let programs = [
        "integer main(void) { a = 1; }",
        "constant float pi = 3.14; integer main(void) { display(%f, pi); }",
        "integer main(void) { ~^ note ^~ x = a ^ 2 + (b - 1); return x; }",
    ];
    for src in programs {
        let tokens = Scanner::scan(src);
        let tree = Parser::parse(&tokens, ParserOptions::default()).unwrap();
        Tester::verify(&tree, &tokens);
        // EOF is never consumed.
        assert_eq!(tree.terminals().len(), tokens.len() - 1 - comments(&tokens));
    }
}

fn comments(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Comment)
        .count()
}
