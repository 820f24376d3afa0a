use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use log::LevelFilter;
use miette::IntoDiagnostic;
use miette::WrapErr;
use simple_logger::SimpleLogger;
use truthtable::driver::{self, Mode, Options};
use truthtable::parse::DEFAULT_MAX_DEPTH;
use truthtable::table::DEFAULT_MAX_VARIABLES;

#[derive(Parser, Debug)]
#[command(about = "Truth tables for propositional formulas, one formula per line")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Deepest formula tree to build; every operand of a chain counts as a level
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Most free variables a truth table may enumerate
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_VARIABLES)]
    max_variables: usize,

    /// Never color `T`/`F`
    #[arg(long, global = true)]
    no_color: bool,

    /// More logging, repeat for more detail
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the truth table of every formula
    Table { filename: Option<PathBuf> },
    /// Evaluate formulas that contain no variables
    Eval { filename: Option<PathBuf> },
    /// Print the parsed tree of every formula
    Parse { filename: Option<PathBuf> },
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .into_diagnostic()
        .wrap_err("installing the logger failed")?;

    let (mode, filename) = match args.command {
        Commands::Table { filename } => (Mode::Table, filename),
        Commands::Eval { filename } => (Mode::Eval, filename),
        Commands::Parse { filename } => (Mode::Parse, filename),
    };

    let options = Options {
        mode,
        max_depth: args.max_depth,
        max_variables: args.max_variables,
        color: !args.no_color,
    };

    let summary = match filename {
        Some(filename) => {
            let file = File::open(&filename)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading `{}` failed", filename.display()))?;
            driver::run(BufReader::new(file), io::stdout(), io::stderr(), &options)?
        }
        None => driver::run(io::stdin().lock(), io::stdout(), io::stderr(), &options)?,
    };

    if summary.failed > 0 {
        std::process::exit(65);
    }
    Ok(())
}
