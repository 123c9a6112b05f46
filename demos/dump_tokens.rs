//! Tokenizes a file (or stdin) and prints the token stream
//!
//! ```text
//! cargo run --example dump_tokens -- program.lisp
//! cargo run --example dump_tokens -- --json --config dialect.json program.lisp
//! ```

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};

use anyhow::{bail, Context, Result};
use parenlex::{Scanner, ScannerConfig};

fn main() -> Result<()> {
    let mut json = false;
    let mut config = ScannerConfig::default();
    let mut path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => {
                let file = args.next().context("--config needs a path")?;
                let text = fs::read_to_string(&file)
                    .with_context(|| format!("reading config {file}"))?;
                config = ScannerConfig::from_json(&text)?;
            }
            other if other.starts_with("--") => bail!("unknown option {other}"),
            other => path = Some(other.to_string()),
        }
    }

    let reader: Box<dyn BufRead> = match &path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {path}"))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut scanner = Scanner::with_config(reader, config);
    match scanner.drain() {
        Ok(tokens) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for (i, token) in tokens.iter().enumerate() {
                    println!("  {i}: {token}");
                }
            }
            Ok(())
        }
        Err(err) => {
            for token in &err.tokens {
                eprintln!("  {token}");
            }
            Err(err.error).context("scanning failed")
        }
    }
}
