#![deny(unused_must_use)]
#![warn(clippy::pedantic)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::must_use_candidate)]

pub mod ast;
#[cfg(feature = "hir")]
pub mod compilation_unit;
pub mod diagnostics;
#[cfg(feature = "hir")]
pub mod hir;
#[cfg(feature = "lexer")]
pub mod lexer;
pub mod location;
#[cfg(feature = "parser")]
pub mod parser;
#[cfg(feature = "semantic_analysis")]
pub mod semantic_analysis;
pub mod types;

pub use diagnostics::{Diagnostic, ErrorKind, ErrorReporter};
pub use location::SourceLocation;
pub use types::{TypeId, TypeRegistry};
