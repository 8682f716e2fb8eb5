//! Choral syntax highlighter for the terminal.
//!
//! Reads a Choral source file (or stdin) and prints it back with ANSI
//! colors when stdout is a terminal. `--tokens` and `--json` expose the
//! raw token stream for tooling.
//!
//! Examples:
//!   choral-hl HelloRoles.ch           - highlight a file
//!   choral-hl - < HelloRoles.ch       - highlight stdin
//!   choral-hl --tokens HelloRoles.ch  - one token per line
//!   choral-hl --json HelloRoles.ch    - token stream as JSON
//!   choral-hl --list                  - registered grammar tags

use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use choral_lexer::{Category, Registry, Token};

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_SUCCESS: i32 = 0;
const EXIT_USAGE_ERROR: i32 = 1;
const EXIT_IO_ERROR: i32 = 2;

// ============================================================================
// CLI arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "choral-hl",
    about = "Syntax highlighter for Choral source files",
    version
)]
struct Cli {
    /// Input file path (or "-" for stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    input: String,

    /// Lex with the grammar registered under this tag instead of
    /// matching the file name
    #[arg(long, value_name = "TAG")]
    tag: Option<String>,

    /// Print one token per line instead of highlighted source
    #[arg(long)]
    tokens: bool,

    /// Print the token stream as JSON
    #[arg(long)]
    json: bool,

    /// List registered grammar tags and exit
    #[arg(long)]
    list: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => process::exit(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let registry = Registry::with_builtin();

    if cli.list {
        let mut tags: Vec<&str> = registry.tags().collect();
        tags.sort_unstable();
        for tag in tags {
            println!("{tag}");
        }
        return Ok(());
    }

    let grammar = match &cli.tag {
        Some(tag) => registry
            .by_tag(tag)
            .ok_or_else(|| CliError::Usage(format!("no grammar registered for tag '{tag}'")))?,
        // Stdin has no file name to match against.
        None if cli.input == "-" => registry
            .by_tag("choral")
            .ok_or_else(|| CliError::Usage("no grammar registered for tag 'choral'".into()))?,
        None => registry.for_path(Path::new(&cli.input)).ok_or_else(|| {
            CliError::Usage(format!("no grammar matches file name '{}'", cli.input))
        })?,
    };

    debug!("Lexing {} with grammar {}", cli.input, grammar.tag());

    let source = read_input(&cli.input)?;
    let tokens: Vec<Token<'_>> = grammar.lex(&source).collect();

    if cli.json {
        print_json(&tokens)?;
    } else if cli.tokens {
        print_tokens(&tokens);
    } else {
        print_highlighted(&source, &tokens);
    }

    Ok(())
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Usage(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => EXIT_IO_ERROR,
            CliError::Usage(_) => EXIT_USAGE_ERROR,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Usage(e) => write!(f, "{e}"),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

// ============================================================================
// I/O helpers
// ============================================================================

fn read_input(input: &str) -> Result<String, io::Error> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input)
    }
}

// ============================================================================
// Token output
// ============================================================================

fn print_tokens(tokens: &[Token<'_>]) {
    for token in tokens {
        println!(
            "{:>5}..{:<5} {:<20} {:?}",
            token.span.start,
            token.span.end,
            token.category.name(),
            token.text
        );
    }
}

fn print_json(tokens: &[Token<'_>]) -> Result<(), CliError> {
    let items: Vec<serde_json::Value> = tokens
        .iter()
        .map(|token| {
            serde_json::json!({
                "category": token.category.name(),
                "start": token.span.start,
                "end": token.span.end,
                "text": token.text,
            })
        })
        .collect();

    let json =
        serde_json::to_string_pretty(&items).map_err(|e| CliError::Io(io::Error::other(e)))?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// Highlighting for terminal output
// ============================================================================

/// ANSI color codes for the token categories
mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const COMMENT: &str = "\x1b[38;5;243m"; // Gray
    pub const KEYWORD: &str = "\x1b[38;5;203m"; // Red
    pub const STRING: &str = "\x1b[38;5;214m"; // Orange
    pub const NUMBER: &str = "\x1b[38;5;141m"; // Purple
    pub const CLASS: &str = "\x1b[38;5;80m"; // Cyan
    pub const NAMESPACE: &str = "\x1b[38;5;75m"; // Blue
    pub const FUNCTION: &str = "\x1b[38;5;149m"; // Green
    pub const DECORATOR: &str = "\x1b[38;5;175m"; // Pink
    pub const OPERATOR: &str = "\x1b[38;5;245m"; // Light gray
}

/// Get the ANSI color code for a category, or "" for plain text.
fn ansi_color_for(category: Category) -> &'static str {
    match category {
        Category::CommentSingle | Category::CommentMultiline => ansi::COMMENT,
        Category::Keyword
        | Category::KeywordDeclaration
        | Category::KeywordConstant
        | Category::KeywordNamespace => ansi::KEYWORD,
        Category::String | Category::StringChar => ansi::STRING,
        Category::NumberInteger
        | Category::NumberFloat
        | Category::NumberBin
        | Category::NumberHex
        | Category::NumberOctal => ansi::NUMBER,
        Category::NameClass | Category::NameConstant => ansi::CLASS,
        Category::NameNamespace => ansi::NAMESPACE,
        Category::NameFunction => ansi::FUNCTION,
        Category::NameDecorator => ansi::DECORATOR,
        Category::Operator => ansi::OPERATOR,
        Category::Text | Category::Name | Category::NameAttribute | Category::NameLabel => "",
    }
}

/// Rebuild the source with ANSI escapes around colored tokens.
///
/// Token texts concatenate back to the input, so pushing them in order
/// reproduces the source exactly.
fn highlight(source: &str, tokens: &[Token<'_>]) -> String {
    let mut result = String::with_capacity(source.len() * 2);

    for token in tokens {
        let color = ansi_color_for(token.category);
        if color.is_empty() {
            result.push_str(token.text);
        } else {
            result.push_str(color);
            result.push_str(token.text);
            result.push_str(ansi::RESET);
        }
    }

    result
}

/// Print the source with highlighting if stdout is a TTY.
fn print_highlighted(source: &str, tokens: &[Token<'_>]) {
    if io::stdout().is_terminal() {
        print!("{}", highlight(source, tokens));
    } else {
        print!("{source}");
    }
}
