use super::*;
use crate::diagnostics::ErrorKind;
use crate::lexer;
use crate::parser::{self, ParserOptions};

fn analyze_with(source: &str, options: ParserOptions) -> (Program, ErrorReporter, TypeRegistry) {
    let mut reporter = ErrorReporter::new();
    let mut registry = TypeRegistry::new();
    let tokens = lexer::tokenize(source, &mut reporter);
    let program = parser::parse(&tokens, &mut reporter, &mut registry, options);
    let program = analyze(program, &mut reporter, &mut registry);
    (program, reporter, registry)
}

fn analyze_source(source: &str) -> (Program, ErrorReporter) {
    let (program, reporter, _) = analyze_with(source, ParserOptions::default());
    (program, reporter)
}

fn messages(reporter: &ErrorReporter) -> Vec<&str> {
    reporter
        .diagnostics()
        .iter()
        .map(|d| d.message.as_str())
        .collect()
}

fn declared_type(statement: &Statement) -> TypeId {
    match statement {
        Statement::Declare(declaration) | Statement::DeclareAssign { declaration, .. } => {
            declaration.ty
        }
        other => panic!("expected declaration, got {other:?}"),
    }
}

#[test]
fn test_well_typed_program() {
    let (program, reporter) = analyze_source("int x = 1; int y = 2; return x + y;");
    assert!(!reporter.has_errors(), "{:?}", reporter.diagnostics());
    assert_eq!(declared_type(&program.statements[0]), TypeId::INT);
    assert_eq!(declared_type(&program.statements[1]), TypeId::INT);

    let Statement::Return { value, .. } = &program.statements[2] else {
        panic!("expected return");
    };
    assert_eq!(value.ty, TypeId::INT);
    let ExpressionKind::Binary { lhs, rhs, .. } = &value.kind else {
        panic!("expected binary expression");
    };
    assert_eq!(lhs.ty, TypeId::INT);
    assert_eq!(rhs.ty, TypeId::INT);
}

#[test]
fn test_break_inside_loop() {
    let (_, reporter) = analyze_source("bool b; while (b) { break; }");
    assert!(!reporter.has_errors(), "{:?}", reporter.diagnostics());
}

#[test]
fn test_break_outside_of_loop() {
    let (_, reporter) = analyze_source("int x; break;");
    assert_eq!(messages(&reporter), ["break not within loop"]);
    assert_eq!(reporter.count(ErrorKind::Semantic), 1);
}

#[test]
fn test_continue_outside_of_loop() {
    let (_, reporter) = analyze_source("if (true) { continue; }");
    assert_eq!(messages(&reporter), ["continue not within loop"]);
}

#[test]
fn test_loop_depth_is_restored() {
    let source = "while (true) { while (false) { continue; } break; } break;";
    let (_, reporter) = analyze_source(source);
    assert_eq!(messages(&reporter), ["break not within loop"]);
}

#[test]
fn test_declaration_mismatch() {
    let (program, reporter) = analyze_source("int x = true;");
    assert_eq!(reporter.len(), 1);
    assert_eq!(
        messages(&reporter),
        ["type mismatch in declaration of `x`: expected `int`, found `bool`"]
    );
    assert_eq!(declared_type(&program.statements[0]), TypeId::INT);
}

#[test]
fn test_redeclaration() {
    let (program, reporter) = analyze_source("int x; bool x; x = 1;");
    assert_eq!(messages(&reporter), ["variable `x` has already been defined"]);
    assert_eq!(declared_type(&program.statements[0]), TypeId::INT);
    assert_eq!(declared_type(&program.statements[1]), TypeId::UNDEFINED);
}

#[test]
fn test_nested_redeclaration() {
    let (_, reporter) = analyze_source("int x; { int x; }");
    assert_eq!(reporter.len(), 1);
}

#[test]
fn test_undefined_operator() {
    let (program, reporter) = analyze_source("bool a; bool b; bool c = a + b;");
    assert_eq!(
        messages(&reporter),
        ["operator `+` is not defined for `bool` and `bool`"]
    );
    let Statement::DeclareAssign { value, .. } = &program.statements[2] else {
        panic!("expected declare assign");
    };
    assert_eq!(value.ty, TypeId::UNDEFINED);
}

#[test]
fn test_undefined_operand_reported_once() {
    let (_, reporter) = analyze_source("int x = (y + 1) * 2;");
    assert_eq!(messages(&reporter), ["unknown variable: y"]);
}

#[test]
fn test_unknown_variable_assignment() {
    let (_, reporter) = analyze_source("z = 3;");
    assert_eq!(messages(&reporter), ["unknown variable: z"]);
}

#[test]
fn test_assignment_mismatch() {
    let (_, reporter) = analyze_source("bool b; b = 1 + 2;");
    assert_eq!(
        messages(&reporter),
        ["type mismatch in assignment to `b`: expected `bool`, found `int`"]
    );
}

#[test]
fn test_unknown_type() {
    let (program, reporter) = analyze_source("Foo f; f = 1;");
    assert_eq!(messages(&reporter), ["undefined type `Foo` in declaration"]);
    assert_eq!(declared_type(&program.statements[0]), TypeId::UNDEFINED);
}

#[test]
fn test_condition_not_bool() {
    let (_, reporter) = analyze_source("int x; if (x) { x = 1; } else (x + 1) { } while (3) { }");
    assert_eq!(
        messages(&reporter),
        [
            "if condition must be of type `bool`, found `int`",
            "else if condition must be of type `bool`, found `int`",
            "while condition must be of type `bool`, found `int`",
        ]
    );
}

#[test]
fn test_return_not_int() {
    let (_, reporter) = analyze_source("return 1 < 2;");
    assert_eq!(
        messages(&reporter),
        ["return type mismatch, expected `int`, found `bool`"]
    );
}

#[test]
fn test_logical_not() {
    let (program, reporter) = analyze_source("bool a; bool b = !a && true; int i; bool c = !i;");
    assert_eq!(messages(&reporter), ["operator `!` is not defined for `int`"]);
    let Statement::DeclareAssign { value, .. } = &program.statements[1] else {
        panic!("expected declare assign");
    };
    assert_eq!(value.ty, TypeId::BOOL);
}

#[test]
fn test_bool_equality() {
    let (_, reporter) = analyze_source("bool a; bool b = a == false; bool c = a != true;");
    assert!(!reporter.has_errors(), "{:?}", reporter.diagnostics());
}

#[test]
fn test_error_nodes_are_reported() {
    let (_, reporter) = analyze_source("int x = 1 + ;");
    assert!(messages(&reporter).contains(&"failed parsing expression"));
    assert_eq!(reporter.count(ErrorKind::Semantic), 0);
}

#[test]
fn test_type_of_is_pure() {
    let mut reporter = ErrorReporter::new();
    let mut registry = TypeRegistry::new();
    let builder = AstBuilder::new();
    let at = SourceLocation::new(0, 0);
    let exp = builder.binary(
        Operator::LessThan,
        builder.integer(at, 1),
        builder.integer(at, 2),
    );

    let analyzer = SemanticAnalyzer::new(&mut reporter, &mut registry);
    assert_eq!(analyzer.type_of(&exp), TypeId::BOOL);
    assert_eq!(exp.ty, TypeId::UNDEFINED);
}

#[test]
fn test_operator_matrix() {
    let matrix = OperatorMatrix::new();
    assert_eq!(matrix.len(), 22);
    assert_eq!(
        matrix.lookup(TypeId::INT, Operator::ShiftLeft, TypeId::INT),
        TypeId::INT
    );
    assert_eq!(
        matrix.lookup(TypeId::INT, Operator::GreaterOrEqual, TypeId::INT),
        TypeId::BOOL
    );
    assert_eq!(
        matrix.lookup(TypeId::BOOL, Operator::BitwiseXor, TypeId::BOOL),
        TypeId::BOOL
    );
    assert_eq!(
        matrix.lookup(TypeId::INT, Operator::LogicalAnd, TypeId::INT),
        TypeId::UNDEFINED
    );
    assert_eq!(
        matrix.lookup(TypeId::INT, Operator::Add, TypeId::BOOL),
        TypeId::UNDEFINED
    );
    assert_eq!(matrix.lookup_unary(Operator::Not, TypeId::BOOL), TypeId::BOOL);
    assert_eq!(
        matrix.lookup_unary(Operator::Not, TypeId::INT),
        TypeId::UNDEFINED
    );
}

#[test]
fn test_struct_definition() {
    let options = ParserOptions {
        enable_structs: true,
    };
    let (program, reporter, registry) =
        analyze_with("struct Pair { int a; bool b; } Pair p;", options);
    assert!(!reporter.has_errors(), "{:?}", reporter.diagnostics());

    let pair = registry.find_type("Pair");
    assert!(pair.is_defined());
    assert_eq!(registry.size_of(pair), 16);
    assert_eq!(declared_type(&program.statements[1]), pair);
}

#[test]
fn test_struct_member_errors() {
    let options = ParserOptions {
        enable_structs: true,
    };
    let (_, reporter, registry) =
        analyze_with("struct S { int a; Nope b; bool a; }", options);
    assert_eq!(
        messages(&reporter),
        [
            "undefined type `Nope` for member `b`",
            "duplicate member `a` in `S`",
        ]
    );
    let layout = registry
        .get(registry.find_type("S"))
        .and_then(|info| info.as_record())
        .expect("S is a record");
    assert_eq!(layout.members.len(), 1);
}

#[test]
fn test_struct_self_member() {
    let options = ParserOptions {
        enable_structs: true,
    };
    let (_, reporter, _) = analyze_with("struct Node { Node next; }", options);
    assert_eq!(
        messages(&reporter),
        ["member `next` of `Node` has incomplete type `Node`"]
    );
}
