//! Command implementations

use crate::config::{CliConfig, OutputFormat};
use anyhow::{bail, Context, Result};
use colored::*;
use gcr_sexp::lexer::is_whitespace;
use gcr_sexp::{Element, Navigator, ParseOptions, SymbolicExpression};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

/// Parse a file and print the expression
pub fn parse_command(
    file: &Path,
    format: Option<OutputFormat>,
    show_size: bool,
    config: &CliConfig,
) -> Result<()> {
    let sexp = load_expression(file, config)?;
    let format = format.unwrap_or(config.default_format);

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Canonical => {
            stdout.write_all(&sexp.to_canonical())?;
            writeln!(stdout)?;
        }
        OutputFormat::Pretty => writeln!(stdout, "{}", sexp.to_pretty_string())?,
        OutputFormat::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(&sexp)?)?,
    }

    if show_size {
        let root = sexp.root();
        writeln!(stdout, "\nFootprint: {} bytes", sexp.size())?;
        writeln!(stdout, "Nodes: {}", root.node_count())?;
        writeln!(stdout, "Depth: {}", root.depth())?;
    }

    Ok(())
}

/// Navigate to `path` inside a file's expression and print the result
pub fn get_command(file: &Path, path: &str, config: &CliConfig) -> Result<()> {
    let sexp = load_expression(file, config)?;
    let element = resolve(sexp.view(), path)?;

    let mut stdout = io::stdout().lock();
    match element {
        Element::Bytes(bytes) if bytes.iter().all(u8::is_ascii_graphic) => {
            stdout.write_all(bytes)?;
            writeln!(stdout)?;
        }
        other => writeln!(stdout, "{}", other)?,
    }
    Ok(())
}

/// Validate files, reporting each one
pub fn check_command(files: &[impl AsRef<Path>], config: &CliConfig) -> Result<()> {
    let mut failures = 0;

    for file in files {
        let file = file.as_ref();
        match load_expression(file, config) {
            Ok(sexp) => println!(
                "{} {} ({} bytes)",
                "ok".green().bold(),
                file.display(),
                sexp.size()
            ),
            Err(e) => {
                failures += 1;
                println!("{} {}: {:#}", "error".red().bold(), file.display(), e);
            }
        }
    }

    info!(checked = files.len(), failures, "check finished");
    if failures > 0 {
        bail!("{} of {} files failed", failures, files.len());
    }
    Ok(())
}

/// Follow a `/`-separated path from `root`
///
/// Numeric segments index, `.car` and `.cdr` take the first and second
/// element. A name steps into the field list `(name ...)`, or yields the
/// field's value when it is the last segment, so `rsa/n` reads `n` inside
/// `(rsa (n ..))`.
pub fn resolve<'a>(root: Navigator<'a>, path: &str) -> Result<Element<'a>> {
    let mut current = Element::Expr(root);
    let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();

    while let Some(segment) = segments.next() {
        let nav = match current {
            Element::Expr(nav) => nav,
            Element::Bytes(_) => bail!("cannot navigate into atom at segment '{}'", segment),
        };
        debug!(segment, "resolving path segment");

        current = match segment {
            ".car" => nav.car()?,
            ".cdr" => nav.cdr()?,
            _ => match segment.parse::<isize>() {
                Ok(index) => Element::Expr(nav.get(index)?),
                Err(_) if segments.peek().is_some() => Element::Expr(nav.field(segment)?),
                Err(_) => nav.lookup(segment)?,
            },
        };
    }

    Ok(current)
}

pub fn load_expression(file: &Path, config: &CliConfig) -> Result<SymbolicExpression> {
    let content =
        fs::read(file).with_context(|| format!("Failed to read input file: {}", file.display()))?;
    let input = if config.trim_input {
        trim_whitespace(&content)
    } else {
        &content[..]
    };

    let options = ParseOptions {
        max_depth: config.max_depth,
    };
    SymbolicExpression::parse_with_options(input, options)
        .with_context(|| format!("Failed to parse S-expression: {}", file.display()))
}

fn trim_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| !is_whitespace(b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|&b| !is_whitespace(b)).map_or(start, |i| i + 1);
    &bytes[start..end]
}
