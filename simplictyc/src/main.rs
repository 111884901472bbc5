mod driver;

use anyhow::Result;
use clap::Args;
use clap::Command;
use clap::FromArgMatches;
use tracing::Level;

use crate::driver::run;
use crate::driver::SimplictycArgs;

fn cli() -> Command {
    let cli = Command::new("simplictyc");
    let cli = SimplictycArgs::augment_args(cli);
    cli
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    let args = SimplictycArgs::from_arg_matches(&matches)?;
    let level = if args.debug { Level::DEBUG } else { Level::INFO };
    simplicty::init_subscriber(level)?;
    run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::path::PathBuf;

    fn run_app(args: Vec<&str>) -> Result<()> {
        let cli = cli();
        let matches = cli.try_get_matches_from(args)?;
        let args = SimplictycArgs::from_arg_matches(&matches)?;
        run(&args)
    }

    /// Fresh directory for a single test.
    fn workdir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "simplictyc-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    const PROGRAM: &str = indoc! {r#"
    integer main(void) {
        integer count = 3;
        display("%d items", count);
    }
    "#};

    #[test]
    fn test_help() {
        let err = run_app(vec!["simplictyc", "--help"]).unwrap_err();
        let help = err.to_string();
        assert!(help.contains("Scan and parse a SimpliCty program"));
        assert!(help.contains("--allow-empty-blocks"));
        assert!(help.contains("--from-tokens"));
    }

    #[test]
    fn test_invalid_args() {
        assert!(run_app(vec!["simplictyc", "--invalid-flag"]).is_err());
        assert!(run_app(vec!["simplictyc"]).is_err());
    }

    #[test]
    fn test_extension() {
        let dir = workdir("extension");
        let input = dir.join("program.txt");
        std::fs::write(&input, PROGRAM).unwrap();
        let out = dir.join("out");
        let err = run_app(vec![
            "simplictyc",
            input.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .unwrap_err();
        assert!(err.to_string().contains(".cty"));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = workdir("missing");
        let input = dir.join("absent.cty");
        let err = run_app(vec!["simplictyc", input.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_outputs() {
        let dir = workdir("outputs");
        let input = dir.join("program.cty");
        std::fs::write(&input, PROGRAM).unwrap();
        let out = dir.join("out");
        run_app(vec![
            "simplictyc",
            input.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .unwrap();

        let table = std::fs::read_to_string(out.join("symbol_table.txt")).unwrap();
        assert!(table.starts_with("Tokens generated:\n"));
        assert!(table.contains("TOKEN: main | TYPE: KW_MAIN | LINE: 1"));
        let csv = std::fs::read_to_string(out.join("parse_tree.csv")).unwrap();
        assert!(csv.starts_with("NodeID,ParentID,Value\n0,,SIMPLICITY\n"));
        let tree = std::fs::read_to_string(out.join("parse_tree_parenthesized.txt")).unwrap();
        assert!(tree.starts_with("(SIMPLICITY\n  (TYPE_INTEGER)\n  (MAIN)\n"));
        let parsed = std::fs::read_to_string(out.join("parsed.txt")).unwrap();
        assert!(parsed.starts_with("Parsing successful!\n\nParsed Tree:\n0,,SIMPLICITY\n"));

        // The symbol table can be parsed on its own.
        let again = dir.join("again");
        let table_path = out.join("symbol_table.txt");
        run_app(vec![
            "simplictyc",
            table_path.to_str().unwrap(),
            "--from-tokens",
            "--output-dir",
            again.to_str().unwrap(),
        ])
        .unwrap();
        let csv_again = std::fs::read_to_string(again.join("parse_tree.csv")).unwrap();
        assert_eq!(csv, csv_again);
        assert!(!again.join("symbol_table.txt").exists());
    }

    #[test]
    fn test_syntax_error() {
        let dir = workdir("syntax");
        let input = dir.join("broken.cty");
        std::fs::write(&input, "integer main(void) {\n    count = 1\n}\n").unwrap();
        let out = dir.join("out");
        let err = run_app(vec![
            "simplictyc",
            input.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("2  |     count = 1"));
        let parsed = std::fs::read_to_string(out.join("parsed.txt")).unwrap();
        assert_eq!(
            parsed,
            "Parsing failed: expected SEMICOLON at token 9, found RIGHT_CURLY on line 3\n"
        );
        assert!(!out.join("parse_tree.csv").exists());
    }

    #[test]
    fn test_empty_blocks_flag() {
        let dir = workdir("empty");
        let input = dir.join("empty.cty");
        std::fs::write(&input, "integer main(void) { }").unwrap();
        let out = dir.join("out");
        let args = vec![
            "simplictyc",
            input.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ];
        assert!(run_app(args.clone()).is_err());
        let mut args = args;
        args.push("--allow-empty-blocks");
        run_app(args).unwrap();
        assert!(out.join("parse_tree.csv").exists());
    }
}
