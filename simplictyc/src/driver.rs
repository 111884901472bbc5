use anyhow::Context;
use anyhow::Result;
use clap::Args;
use simplicty::exchange::read_tokens;
use simplicty::exchange::write_tokens;
use simplicty::frontend::ParserOptions;
use simplicty::frontend::Scanner;
use simplicty::frontend::SyntaxError;
use simplicty::parse_tokens;
use std::path::Path;
use tracing::error;
use tracing::info;
use tracing::warn;

/// Scan and parse a SimpliCty program and write its parse tree
#[derive(Args, Debug)]
#[command(version, about)]
pub struct SimplictycArgs {
    /// The input file, a `.cty` program or a token file with --from-tokens
    pub input: String,
    /// Directory for the generated files
    #[arg(long, default_value = "output")]
    pub output_dir: String,
    /// Read tokens in the exchange format instead of source code
    #[arg(long)]
    pub from_tokens: bool,
    /// Print debug logs
    #[arg(long)]
    pub debug: bool,
    #[command(flatten)]
    pub options: ParserOptions,
}

fn write(dir: &Path, name: &str, contents: &str) -> Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Run the front end on `args.input` and write the results to
/// `args.output_dir`.
pub fn run(args: &SimplictycArgs) -> Result<()> {
    let input = Path::new(&args.input);
    if !args.from_tokens && input.extension().and_then(|ext| ext.to_str()) != Some("cty") {
        return Err(anyhow::anyhow!(
            "Expected a file with the .cty extension, got {}",
            args.input
        ));
    }
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", args.input))?;
    let out = Path::new(&args.output_dir);
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;

    let (tokens, src) = if args.from_tokens {
        let tokens = read_tokens(&text)?;
        info!("Read {} tokens from {}", tokens.len(), args.input);
        (tokens, None)
    } else {
        let (tokens, errors) = Scanner::scan_reporting(&text);
        info!("Scanned {} tokens from {}", tokens.len(), args.input);
        if !errors.is_empty() {
            warn!("Found {} lexical errors", errors.len());
        }
        let table = format!("Tokens generated:\n{}", write_tokens(&tokens));
        write(out, "symbol_table.txt", &table)?;
        (tokens, Some(text.as_str()))
    };

    match parse_tokens(&tokens, args.options, src) {
        Ok(tree) => {
            write(out, "parse_tree.csv", &tree.to_csv())?;
            write(out, "parse_tree_parenthesized.txt", &tree.to_parenthesized())?;
            let parsed = format!("Parsing successful!\n\nParsed Tree:\n{}", tree.to_listing());
            write(out, "parsed.txt", &parsed)?;
            info!("Wrote {} nodes to {}", tree.node_count(), out.display());
            Ok(())
        }
        Err(err) => {
            let status = match err.downcast_ref::<SyntaxError>() {
                Some(syntax) => format!("Parsing failed: {syntax}\n"),
                None => format!("Parsing failed: {err}\n"),
            };
            write(out, "parsed.txt", &status)?;
            error!("{err}");
            Err(err)
        }
    }
}
