//! Command-line interface for parsetoy-calc
//!
//! Evaluates arithmetic expressions given on the command line, read line by
//! line from a file, or typed into an interactive prompt. For each input the
//! lexer tokens, the parser's result stack, and the final value are printed.
//!
//! Exit status: `0` on success, `1` on usage or I/O errors, `2` when the
//! input cannot be lexed, `3` when it cannot be parsed.

use anyhow::Context;
use clap::Parser as ClapParser;
use parsetoy::display_tokens;
use parsetoy_calc::Calculator;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression to evaluate; starts a prompt when neither this nor --file is given
    expr: Option<String>,

    /// Input file with one expression per line
    #[arg(short, long, conflicts_with = "expr")]
    file: Option<PathBuf>,

    /// Print only the value
    #[arg(short, long)]
    quiet: bool,

    /// Log lexer and parser counters at info level
    #[arg(short, long)]
    stats: bool,
}

/// How evaluating one input ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ok,
    LexFailed,
    ParseFailed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Ok => ExitCode::SUCCESS,
            Outcome::LexFailed => ExitCode::from(2),
            Outcome::ParseFailed => ExitCode::from(3),
        }
    }
}

fn evaluate(calc: &Calculator, input: &str, args: &Args) -> Outcome {
    let (tokens, lex_stats) = match calc.lex_with_stats(input) {
        Ok(res) => res,
        Err(e) => {
            eprintln!("Couldn't lex your input: {}", e);
            return Outcome::LexFailed;
        }
    };
    if !args.quiet {
        println!("Lexer results:");
        println!("{}", display_tokens(&tokens));
        println!();
    }

    let (stack, parse_stats) = match calc.parse_with_stats(tokens) {
        Ok(res) => res,
        Err(e) => {
            eprintln!("Parse error. Stack:");
            eprintln!("{}", display_tokens(e.stack()));
            return Outcome::ParseFailed;
        }
    };
    if args.stats {
        log::info!("{:?}", lex_stats);
        log::info!("{:?}", parse_stats);
    }

    if !args.quiet {
        println!("Parser results:");
        println!("{}", display_tokens(&stack));
    }
    if let Some(value) = stack.last().and_then(|token| token.value) {
        if args.quiet {
            println!("{:?}", value);
        } else {
            println!();
            println!("Value:");
            println!("{:?}", value);
        }
    }
    Outcome::Ok
}

fn run_file(calc: &Calculator, path: &Path, args: &Args) -> anyhow::Result<Outcome> {
    let text = std::fs::read_to_string(path).with_context(|| format!("can't open {:?}", path))?;
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let outcome = evaluate(calc, line, args);
        if outcome != Outcome::Ok {
            return Ok(outcome);
        }
    }
    Ok(Outcome::Ok)
}

fn run_repl(calc: &Calculator, args: &Args) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if lines.read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }
        match line.trim() {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            input => {
                evaluate(calc, input, args);
            }
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print()?;
            return Ok(ExitCode::from(code));
        }
    };

    let calc = Calculator::new().context("can't build calculator grammar")?;

    let outcome = match (&args.expr, &args.file) {
        (Some(expr), _) => evaluate(&calc, expr, &args),
        (None, Some(path)) => run_file(&calc, path, &args)?,
        (None, None) => {
            run_repl(&calc, &args)?;
            Outcome::Ok
        }
    };
    Ok(outcome.into())
}
