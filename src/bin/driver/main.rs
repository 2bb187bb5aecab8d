mod args;
mod driver_error;

use anyhow::Context;
use args::Args;
use clap::Parser;
use driver_error::DriverError;
use rend::compilation_unit::{CompilationUnit, CompileOptions, Stage};
use rend::lexer::Lexer;
use rend::parser::ParserOptions;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

const SOURCE_EXTENSION: &str = "rd";

fn check_input(input: &Path) -> Result<(), DriverError> {
    if !input.exists() {
        return Err(DriverError::InputFileDoesNotExist(input.to_path_buf()));
    }
    if input.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
        return Err(DriverError::BadExtension(input.to_path_buf()));
    }
    Ok(())
}

fn print_tokens(source: &str) {
    for token in Lexer::new(source) {
        println!("{}\t{:?}\t{:?}", token.location, token.kind, token.lexeme);
    }
}

fn print_unit(unit: &CompilationUnit, args: &Args) {
    match args.stop_after() {
        Stage::Lex => {}
        Stage::Parse | Stage::Validate => println!("{:#?}", unit.program),
        Stage::Hir => {
            if let Some(hir) = unit.hir.as_ref().filter(|_| args.hir) {
                print!("{hir}");
            }
        }
    }
}

fn report(unit: &CompilationUnit) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    for diagnostic in unit.reporter.diagnostics() {
        writeln!(stderr, "{diagnostic}")?;
    }
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str().to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    check_input(&args.input)?;
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    if args.lex {
        print_tokens(&source);
    }

    let options = CompileOptions {
        parser: ParserOptions {
            enable_structs: args.enable_structs,
        },
        stop_after: args.stop_after(),
    };
    let unit = CompilationUnit::compile(&source, &options);
    report(&unit)?;

    if unit.has_errors() {
        let file = args.input.to_string_lossy().to_string();
        let count = unit.reporter.len();
        return Err(DriverError::CompilationFailed { file, count }.into());
    }
    print_unit(&unit, &args);

    Ok(())
}
