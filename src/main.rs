use std::{fs, process::ExitCode};

use clap::Parser;
use rpncalc::{Executor, ExecutorConfig, interpreter::registry::DivisionPolicy};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// rpncalc evaluates arithmetic expressions such as `2 * sin(pi / 4) ^ 2`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treats the argument as a file holding one expression per line.
    /// Blank lines and lines starting with `#` are skipped.
    #[arg(short, long)]
    file: bool,

    /// Binds a variable, as `name=value`. May be given several times.
    #[arg(short = 'D', long = "define", value_parser = parse_binding)]
    defines: Vec<(String, f64)>,

    /// Returns an infinite result for division by zero instead of failing.
    #[arg(long)]
    infinite_division: bool,

    contents: String,
}

/// Parses a `name=value` variable binding.
fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s.split_once('=')
                         .ok_or_else(|| format!("expected name=value, found '{s}'"))?;
    let value = value.trim()
                     .parse()
                     .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.trim().to_string(), value))
}

/// Splits the input into expressions. A file holds one per line, skipping
/// blank lines and `#` comments; inline input is always a single expression.
fn expressions(script: &str, from_file: bool) -> Vec<&str> {
    if from_file {
        script.lines()
              .map(str::trim)
              .filter(|line| !line.is_empty() && !line.starts_with('#'))
              .collect()
    } else {
        vec![script]
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr))
                                  .with(EnvFilter::from_default_env())
                                  .init();

    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    let division_by_zero = if args.infinite_division {
        DivisionPolicy::Infinity
    } else {
        DivisionPolicy::Raise
    };
    let mut executor = Executor::with_config(ExecutorConfig { division_by_zero,
                                                              ..ExecutorConfig::default() });
    executor.set_vars(args.defines);

    let mut status = ExitCode::SUCCESS;
    for line in expressions(&script, args.file) {
        match executor.execute(line) {
            Ok(value) => println!("{value}"),
            Err(e) => {
                eprintln!("{line}: {e}");
                status = ExitCode::FAILURE;
            },
        }
    }

    status
}
