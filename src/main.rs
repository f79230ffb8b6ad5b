use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use seqdiff::{DiffConfig, Engine, RenderConfig, TokenizeConfig, Tokens};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "seqdiff",
    version,
    about = "Compare two files token by token",
    long_about = "Compare two files token by token.\n\n\
        Tokens end with any of the input delimiter characters, so the same tool \
        diffs lines, words, sentences or single characters.",
    after_help = "Examples:\n  \
        seqdiff -i=\" \" -o=\"\\n\" A B         word-by-word diff with one word per line\n  \
        seqdiff -i=\"*\" A B                  char-by-char diff\n  \
        seqdiff -n -c -i=\" \" -o=\" \" A B     colored word-by-word diff without spaces"
)]
struct Cli {
    /// First (old) file
    file_a: PathBuf,

    /// Second (new) file
    file_b: PathBuf,

    /// Color deletions red and insertions green instead of using markers
    #[arg(short, long)]
    color: bool,

    /// Split input into parts ending with any of CHARS ('*' splits after every character)
    #[arg(short, long, value_name = "CHARS", default_value = "\n", hide_default_value = true)]
    input_delim: String,

    /// Write STRING after every output token
    #[arg(short, long, value_name = "STRING", default_value = "")]
    output_delim: String,

    /// Remove delimiters while splitting
    #[arg(short = 'n', long)]
    ignore_delim: bool,

    /// Convert all input to lowercase before comparing
    #[arg(short = 'g', long)]
    ignore_case: bool,

    /// Diff engine: exact, heuristic or auto
    #[arg(short, long, default_value = "auto")]
    engine: Engine,

    /// Print match/insert/delete counts to stderr
    #[arg(long)]
    stats: bool,

    /// Log engine selection and diff statistics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tokenize = TokenizeConfig::new(decode_delim(&cli.input_delim).context("invalid --input-delim")?)
        .with_ignore_delim(cli.ignore_delim)
        .with_ignore_case(cli.ignore_case);
    let render = RenderConfig::new(cli.color)
        .with_output_delim(decode_delim(&cli.output_delim).context("invalid --output-delim")?);

    let a = read_tokens(&cli.file_a, &tokenize)?;
    let b = read_tokens(&cli.file_b, &tokenize)?;

    let config = DiffConfig::new(cli.engine);
    let script = seqdiff::diff_with_config(a.fingerprints(), b.fingerprints(), &config)
        .with_context(|| format!("{} engine failed", config.resolve(a.len(), b.len())))?;
    let output = seqdiff::render_script(&script, a.texts(), b.texts(), &render)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    if cli.stats {
        let stats = script.stats();
        eprintln!(
            "{} matched, {} inserted, {} deleted",
            stats.matched.to_string().bold(),
            stats.inserted.to_string().green(),
            stats.deleted.to_string().red()
        );
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "seqdiff=debug" } else { "seqdiff=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_tokens(path: &Path, config: &TokenizeConfig) -> Result<Tokens> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Tokens::from_text(&text, config))
}

/// Strip surrounding double quotes and decode `\n`, `\t`, `\r` and `\\`.
fn decode_delim(raw: &str) -> Result<String> {
    let trimmed = raw.trim_matches('"');
    let mut out = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => bail!("unknown escape '\\{other}' in '{raw}'"),
            None => bail!("trailing backslash in '{raw}'"),
        }
    }
    Ok(out)
}
