use clap::Parser;
use rend::compilation_unit::Stage;
use std::path::PathBuf;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser)]
#[command(name = "rendc", version, about = "Rend compiler front end", long_about = None)]
pub struct Args {
    /// Stop after lexing and print the tokens
    #[arg(long)]
    pub lex: bool,

    /// Stop after parsing and print the syntax tree
    #[arg(long)]
    pub parse: bool,

    /// Stop after semantic analysis and print the annotated tree
    #[arg(long)]
    pub validate: bool,

    /// Print the lowered HIR
    #[arg(long)]
    pub hir: bool,

    /// Accept `struct` definitions
    #[arg(long)]
    pub enable_structs: bool,

    /// More logging on stderr, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Source file, must end in `.rd`
    pub input: PathBuf,
}

impl Args {
    pub fn stop_after(&self) -> Stage {
        if self.lex {
            Stage::Lex
        } else if self.parse {
            Stage::Parse
        } else if self.validate {
            Stage::Validate
        } else {
            Stage::Hir
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
