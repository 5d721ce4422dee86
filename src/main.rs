use std::fs;
use std::io;
use std::process::ExitCode;

use arbor::{Arbor, DataType};
use clap::Parser;

/// Build and evaluate infix expressions with indexed variables.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate in signed integer mode instead of double mode.
    #[arg(short, long)]
    long: bool,

    /// Print the parsed tree before evaluating.
    #[arg(short, long)]
    tree: bool,

    /// Treat the argument as a file holding one expression per line.
    /// Blank lines and lines starting with '#' are skipped.
    #[arg(short, long)]
    file: bool,

    /// Variable values, in order: the first -v supplies $1, the second $2,
    /// and so on.
    #[arg(short = 'v', long = "var")]
    vars: Vec<String>,

    /// The expression, or the file to read expressions from.
    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let dtype = if args.long {
        DataType::Long
    } else {
        DataType::Double
    };

    let expressions = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(text) => text.lines().map(str::to_owned).collect(),
            Err(e) => {
                eprintln!("failed to read '{}': {e}", args.contents);
                return ExitCode::FAILURE;
            }
        }
    } else {
        vec![args.contents.clone()]
    };

    let mut failed = false;
    for expr in &expressions {
        let trimmed = expr.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if run_one(expr, dtype, &args).is_err() {
            failed = true;
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_one(expr: &str, dtype: DataType, args: &Args) -> Result<(), ()> {
    let mut ast = Arbor::new();
    if ast.build(expr, dtype).is_err() {
        report(&ast);
        return Err(());
    }

    if args.tree {
        if let Some(tree) = ast.render_tree() {
            print!("{tree}");
        }
    }

    match dtype {
        DataType::Long => {
            let values = match parse_values::<i64>(&args.vars) {
                Ok(v) => v,
                Err(bad) => {
                    eprintln!("'{bad}' is not a valid integer value");
                    return Err(());
                }
            };
            match ast.eval_long(&values) {
                Ok(v) => println!("{v}"),
                Err(_) => {
                    report(&ast);
                    return Err(());
                }
            }
        }
        DataType::Double => {
            let values = match parse_values::<f64>(&args.vars) {
                Ok(v) => v,
                Err(bad) => {
                    eprintln!("'{bad}' is not a valid number");
                    return Err(());
                }
            };
            match ast.eval_double(&values) {
                Ok(v) => println!("{v}"),
                Err(_) => {
                    report(&ast);
                    return Err(());
                }
            }
        }
    }
    Ok(())
}

fn parse_values<T: std::str::FromStr>(raw: &[String]) -> Result<Vec<T>, String> {
    raw.iter()
        .map(|s| s.parse::<T>().map_err(|_| s.clone()))
        .collect()
}

fn report(ast: &Arbor) {
    let _ = ast.write_error(io::stderr().lock(), "error:");
}
