//! Parse one reading reference and print the outcome as JSON.
//!
//! Usage: cargo run --bin parse_ref [-- --lang en --book Isaiah 3-4:15]
//!
//! Exits with status 1 when the input parses to an error or a suggestion.

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use reading_companion::bible::{CatalogProvider, Language};
use reading_companion::config::Config;
use reading_companion::reading::{resolve_book, ReadingParser};

struct Args {
    language: Option<Language>,
    book: Option<String>,
    input: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut language = None;
    let mut book = None;
    let mut words = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lang" => {
                let code = args.next().context("--lang needs a language code")?;
                language = Some(Language::from_code(&code).with_context(|| format!("Unknown language '{code}'"))?);
            }
            "--book" => book = Some(args.next().context("--book needs a book name")?),
            _ => words.push(arg),
        }
    }

    if words.is_empty() {
        bail!("Usage: parse_ref [--lang de] [--book Genesis] <input...>");
    }

    Ok(Args {
        language,
        book,
        input: words.join(" "),
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = Config::load()?;
    let language = args.language.unwrap_or(config.language);

    let catalogs = config.catalogs()?;
    let catalog = catalogs.books(language);

    let default_book = match &args.book {
        Some(name) => {
            let found = resolve_book(name, catalog);
            match found.book {
                Some(book) if found.confidence.is_resolved() => Some(book),
                _ => bail!("No book matches '{name}'"),
            }
        }
        None => None,
    };

    let result = ReadingParser::new(catalog).parse(&args.input, default_book);
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
