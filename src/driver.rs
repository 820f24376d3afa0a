use std::io::{BufRead, Write};

use miette::{Error, IntoDiagnostic, WrapErr};

use crate::{
    normalize::normalize,
    parse::{DEFAULT_MAX_DEPTH, Parser},
    render::{render, render_value},
    table::{DEFAULT_MAX_VARIABLES, TruthTable, evaluate_closed},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Full truth table over every assignment.
    Table,
    /// One evaluation with no variables defined.
    Eval,
    /// Only print the parsed tree.
    Parse,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub mode: Mode,
    pub max_depth: usize,
    pub max_variables: usize,
    pub color: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            mode: Mode::Table,
            max_depth: DEFAULT_MAX_DEPTH,
            max_variables: DEFAULT_MAX_VARIABLES,
            color: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub failed: usize,
}

/// Processes one raw input line and returns what should be printed for it.
pub fn process_line(line: &str, options: &Options) -> Result<String, Error> {
    let normalized = normalize(line);
    log::debug!("normalized `{line}` to `{normalized}`");

    let formula = Parser::new(None, &normalized)
        .with_max_depth(options.max_depth)
        .parse()?;

    Ok(match options.mode {
        Mode::Parse => format!("{formula}\n"),
        Mode::Eval => {
            let value = evaluate_closed(&formula)?;
            format!("{}\n", render_value(&normalized, value, options.color))
        }
        Mode::Table => {
            let table = TruthTable::build(&formula, options.max_variables)?;
            render(&normalized, &table, options.color)
        }
    })
}

/// Runs every line of `input`, writing results to `out` and reports for
/// failing lines to `err`. A failing line never stops the loop, including one
/// that is not valid UTF-8; only failing I/O does.
pub fn run(
    mut input: impl BufRead,
    mut out: impl Write,
    mut err: impl Write,
    options: &Options,
) -> Result<Summary, Error> {
    let mut summary = Summary::default();
    let mut buf = Vec::new();
    let mut number = 0usize;

    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .into_diagnostic()
            .wrap_err_with(|| format!("reading line {} failed", number + 1))?;
        if read == 0 {
            break;
        }
        number += 1;

        let outcome = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => process_line(line.trim_end_matches(['\n', '\r']), options)
                .wrap_err_with(|| format!("[line {number}] `{}`", line.trim())),
            Err(e) => Err(e)
                .into_diagnostic()
                .wrap_err_with(|| format!("[line {number}] is not valid UTF-8")),
        };

        summary.processed += 1;
        match outcome {
            Ok(output) => {
                out.write_all(output.as_bytes()).into_diagnostic()?;
            }
            Err(e) => {
                summary.failed += 1;
                log::debug!("line {number} failed: {e}");
                writeln!(err, "{e:?}").into_diagnostic()?;
            }
        }
    }

    out.flush().into_diagnostic()?;
    log::info!(
        "processed {} formulas, {} failed",
        summary.processed,
        summary.failed
    );
    Ok(summary)
}
