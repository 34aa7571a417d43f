//! CLI tool to evaluate, check, and format integer expressions.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use intcalc::{Calculator, Config, Key, calculate, format_expression, validate_complete};

#[derive(Parser, Debug)]
#[command(name = "intcalc", version, about = "Integer calculator")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate expression(s)
    Eval {
        #[arg(value_name = "EXPR", required = true)]
        expressions: Vec<String>,
    },
    /// Check expression(s) for structural errors without evaluating
    Check {
        #[arg(value_name = "EXPR", required = true)]
        expressions: Vec<String>,
    },
    /// Print expression(s) in display form
    Fmt {
        #[arg(value_name = "EXPR", required = true)]
        expressions: Vec<String>,
    },
    /// Replay keystrokes through a calculator session
    ///
    /// `=` evaluates, `C` clears, `<` deletes the last character.
    Keys {
        #[arg(value_name = "KEYS")]
        keys: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let config = Config::from_env();
    log::debug!("using {config:?}");

    let had_error = match args.command {
        Command::Eval { expressions } => eval(&expressions, &config),
        Command::Check { expressions } => check(&expressions),
        Command::Fmt { expressions } => {
            for expr in &expressions {
                println!("{}", format_expression(expr));
            }
            false
        }
        Command::Keys { keys } => replay(&keys, config),
    };

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn eval(expressions: &[String], config: &Config) -> bool {
    let mut had_error = false;
    for expr in expressions {
        let shown = format_expression(expr);
        match calculate(expr, config) {
            Ok(value) => println!("{shown} = {value}"),
            Err(e) => {
                eprintln!("{shown}: {e}");
                had_error = true;
            }
        }
    }
    had_error
}

fn check(expressions: &[String]) -> bool {
    let mut had_error = false;
    for expr in expressions {
        match validate_complete(expr).error {
            None => eprintln!("{expr}: valid"),
            Some(kind) => {
                eprintln!("{expr}: {kind}");
                had_error = true;
            }
        }
    }
    had_error
}

fn replay(keys: &str, config: Config) -> bool {
    let mut calc = Calculator::new(config);
    for ch in keys.chars() {
        calc.press(Key::from_keyboard(ch));
    }

    println!("expression: {}", calc.display());
    if let Some(result) = calc.result() {
        println!("result: {result}");
    }
    for entry in calc.history() {
        println!("history: {} = {}", entry.expression, entry.result);
    }

    calc.error().is_some_and(|e| {
        eprintln!("error: {e}");
        true
    })
}
