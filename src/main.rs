//! rstlex - highlight reStructuredText files in the terminal

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rstlex::error::{LexerError, Result};
use rstlex::terminal::Renderer;
use rstlex::{Document, RestLexer};

/// What the command line asked for
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Help,
    Version,
    Highlight(Options),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    file: PathBuf,
    config: Option<PathBuf>,
    spans: bool,
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if matches!(e, LexerError::Usage(_)) {
            eprintln!("Try 'rstlex --help' for more information.");
        }
        process::exit(1);
    }
}

fn run() -> Result<()> {
    match parse_args(env::args().skip(1))? {
        Action::Help => print_usage(),
        Action::Version => print_version(),
        Action::Highlight(opts) => highlight(&opts)?,
    }
    Ok(())
}

fn highlight(opts: &Options) -> Result<()> {
    let lexer = match &opts.config {
        Some(path) if !path.is_file() => return Err(LexerError::FileNotFound(path.clone())),
        Some(path) => RestLexer::with_properties(path)?,
        None => RestLexer::new()?,
    };
    debug!(properties = ?lexer.properties_file(), "lexer ready");

    let mut doc = Document::from_file(&opts.file)?;
    let region = lexer.style_all(&mut doc)?;
    info!(file = %opts.file.display(), bytes = region.end, lines = doc.line_count(), "styled");

    let mut renderer = Renderer::new(io::stdout().lock(), lexer.registry());
    if opts.spans {
        renderer.render_spans(&doc)
    } else {
        renderer.render(&doc)
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Action> {
    let mut opts = Options::default();
    let mut file = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Action::Help),
            "--version" | "-V" => return Ok(Action::Version),
            "--spans" => opts.spans = true,
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| LexerError::Usage(format!("option '{arg}' requires a path")))?;
                opts.config = Some(PathBuf::from(path));
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--config=") {
                    opts.config = Some(PathBuf::from(path));
                } else if arg.starts_with('-') {
                    return Err(LexerError::Usage(format!("unknown option '{arg}'")));
                } else if file.is_some() {
                    return Err(LexerError::Usage(format!("unexpected argument '{arg}'")));
                } else {
                    file = Some(PathBuf::from(&arg));
                }
            }
        }
    }

    opts.file = file.ok_or_else(|| LexerError::Usage("missing FILE".to_string()))?;
    Ok(Action::Highlight(opts))
}

/// Install the stderr subscriber
///
/// `RSTLEX_LOG` takes priority over `RUST_LOG`. A bare level such as
/// `RSTLEX_LOG=debug` applies to this crate only.
fn init_logging() {
    let filter = match env::var("RSTLEX_LOG") {
        Ok(level) if level.contains(['=', ',', ':']) => EnvFilter::new(level),
        Ok(level) => EnvFilter::new(format!("warn,rstlex={level}")),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn print_usage() {
    println!("rstlex {} - reStructuredText syntax highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: rstlex [OPTIONS] FILE");
    println!();
    println!("Options:");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!("  -c, --config PATH  Read style overrides from PATH");
    println!("      --spans        Print style runs instead of colored text");
    println!();
    println!("Style overrides are read from $XDG_CONFIG_HOME/rstlex/rst.properties");
    println!("when no --config is given. Set RSTLEX_LOG=debug for diagnostics.");
}

fn print_version() {
    println!("rstlex {}", env!("CARGO_PKG_VERSION"));
}
