//! Runs every stage over one source buffer with one reporter and one type registry.

use crate::ast::Program;
use crate::diagnostics::ErrorReporter;
use crate::hir::{self, HirProgram};
use crate::lexer;
use crate::parser::{self, ParserOptions};
use crate::semantic_analysis;
use crate::types::TypeRegistry;

/// Last stage to run. Stages are ordered, so `stop_after >= Stage::Parse` means the
/// parser runs.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub enum Stage {
    Lex,
    Parse,
    Validate,
    #[default]
    Hir,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct CompileOptions {
    pub parser: ParserOptions,
    pub stop_after: Stage,
}

#[derive(Debug)]
pub struct CompilationUnit {
    pub token_count: usize,
    /// Type-annotated once [Stage::Validate] has run
    pub program: Program,
    pub hir: Option<HirProgram>,
    pub reporter: ErrorReporter,
    pub registry: TypeRegistry,
}

impl CompilationUnit {
    /// Never fails: bad input ends up in [CompilationUnit::reporter] and the later stages
    /// still run over the recovered tree.
    pub fn compile(source: &str, options: &CompileOptions) -> Self {
        let mut reporter = ErrorReporter::new();
        let mut registry = TypeRegistry::new();

        let tokens = lexer::tokenize(source, &mut reporter);
        let token_count = tokens.len();
        tracing::debug!(tokens = token_count, "lexed source");

        let mut program = Program::default();
        if options.stop_after >= Stage::Parse {
            program = parser::parse(&tokens, &mut reporter, &mut registry, options.parser);
        }
        if options.stop_after >= Stage::Validate {
            program = semantic_analysis::analyze(program, &mut reporter, &mut registry);
        }
        let hir =
            (options.stop_after >= Stage::Hir).then(|| hir::lower(program.clone(), &registry));

        tracing::info!(
            stage = ?options.stop_after,
            diagnostics = reporter.len(),
            "compilation finished"
        );
        Self {
            token_count,
            program,
            hir,
            reporter,
            registry,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.reporter.has_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorKind;

    #[test]
    fn test_full_pipeline() {
        let unit = CompilationUnit::compile("int x = 1; return x;", &CompileOptions::default());
        assert!(!unit.has_errors());
        assert_eq!(unit.program.statements.len(), 2);
        let hir = unit.hir.expect("hir stage ran");
        assert_eq!(hir.instructions.last(), Some(&hir::HirInstruction::Label(hir.exit_label)));
    }

    #[test]
    fn test_stop_after_parse() {
        let options = CompileOptions {
            stop_after: Stage::Parse,
            ..CompileOptions::default()
        };
        let unit = CompilationUnit::compile("int x = true;", &options);
        assert!(!unit.has_errors());
        assert!(unit.hir.is_none());
        assert_eq!(unit.token_count, 6);
    }

    #[test]
    fn test_stop_after_lex() {
        let options = CompileOptions {
            stop_after: Stage::Lex,
            ..CompileOptions::default()
        };
        let unit = CompilationUnit::compile("int @ x", &options);
        assert!(unit.program.statements.is_empty());
        assert_eq!(unit.reporter.count(ErrorKind::Syntax), 1);
    }

    #[test]
    fn test_struct_option_reaches_parser() {
        let options = CompileOptions {
            parser: ParserOptions {
                enable_structs: true,
            },
            ..CompileOptions::default()
        };
        let unit = CompilationUnit::compile("struct P { int a; } P p;", &options);
        assert!(!unit.has_errors(), "{:?}", unit.reporter.diagnostics());
        assert!(unit.registry.find_type("P").is_defined());
    }
}
