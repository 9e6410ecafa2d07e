mod cli;
mod cnf;
mod cyk;
mod error_handling;
mod generator;
mod grammar;
mod parser;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rand::thread_rng;

use cli::{Cli, Command};
use cnf::{ConvertError, NormalForm};
use error_handling::*;
use generator::GenerateError;
use grammar::Grammar;

// Exit statuses; usage errors get 2 like clap's own
const FAILURE: u8 = 1;
const USAGE: u8 = 2;

// Prints every error and picks the exit status
fn report<T: ErrorType>(errors: Errors<T>) -> u8 {
    for error in &errors {
        eprintln!("{}", error);
    }
    if errors.iter().any(|e| e.error.is_usage_error()) {
        USAGE
    } else {
        FAILURE
    }
}

fn source_name(file: Option<&Path>) -> PathBuf {
    match file {
        Some(path) if path != Path::new("-") => path.to_path_buf(),
        _ => PathBuf::from(STDIN_NAME)
    }
}

fn convert(grammar: Grammar, name: &Path, trace: bool) -> Result<NormalForm, u8> {
    cnf::to_cnf_traced(grammar, |step| if trace {
        eprintln!("{}", step);
    }).map_err(|error| report(vec![ConvertError::in_file(name, error)]))
}

fn run_cnf(file: Option<&Path>, trace: bool) -> Result<(), u8> {
    let document = parser::read_document(file).map_err(report)?;
    let normal = convert(document.grammar, &source_name(file), trace)?;

    print!("{}", normal);
    Ok(())
}

fn run_cyk(file: Option<&Path>, convert_first: bool, input: Option<&str>, trace: bool) -> Result<(), u8> {
    let name = source_name(file);
    let document = parser::read_document(file).map_err(report)?;
    let word = input.unwrap_or_else(|| document.word()).to_string();

    let normal = if convert_first {
        convert(document.grammar, &name, trace)?
    } else {
        NormalForm::assume(document.grammar).map_err(|errors| report(
            errors.into_iter().map(|error| Error::in_file(&name, error)).collect()
        ))?
    };

    println!("{}", if cyk::cyk(&normal, &word) { "Yes" } else { "No" });
    Ok(())
}

fn run_generate(file: Option<&Path>, amount: u32, max_depth: usize) -> Result<(), u8> {
    let name = source_name(file);
    let document = parser::read_document(file).map_err(report)?;

    let mut rng = thread_rng();
    for _ in 0..amount {
        let word = generator::generate(&document.grammar, max_depth, &mut rng)
            .map_err(|error| report(vec![GenerateError::in_file(&name, error)]))?;
        println!("{}", word);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Cnf { file, trace } => run_cnf(file.as_deref(), trace),
        Command::Cyk { file, convert, input, trace } =>
            run_cyk(file.as_deref(), convert, input.as_deref(), trace),
        Command::Generate { file, amount, max_depth } =>
            run_generate(file.as_deref(), amount.unwrap_or(1), max_depth),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(status) => ExitCode::from(status)
    }
}
