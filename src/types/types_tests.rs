use super::*;

#[test]
fn test_builtins() {
    let registry = TypeRegistry::new();
    assert_eq!(registry.find_type("int"), TypeId::INT);
    assert_eq!(registry.find_type("bool"), TypeId::BOOL);
    assert_eq!(registry.find_type("void"), TypeId::VOID);
    assert_eq!(registry.find_type("undefined"), TypeId::UNDEFINED);
    assert_eq!(registry.size_of(TypeId::INT), 4);
    assert_eq!(registry.size_of(TypeId::BOOL), 8);
    assert_eq!(registry.size_of(TypeId::VOID), 0);
    assert!(registry.is_builtin(TypeId::BOOL));
}

#[test]
fn test_unknown_name_is_undefined() {
    let registry = TypeRegistry::new();
    assert_eq!(registry.find_type("Point"), TypeId::UNDEFINED);
}

#[test]
fn test_declare_then_define() {
    let mut registry = TypeRegistry::new();
    let id = registry.declare_type("Pair").unwrap();
    assert_eq!(registry.find_type("Pair"), id);
    assert!(!registry.get(id).unwrap().is_complete());

    let members = vec![("a".to_owned(), TypeId::INT), ("b".to_owned(), TypeId::BOOL)];
    let defined = registry.define_type("Pair", members).unwrap();
    assert_eq!(defined, id);

    let info = registry.get(id).unwrap();
    let layout = info.as_record().unwrap();
    assert_eq!(layout.offset_of("a"), Some(0));
    assert_eq!(layout.offset_of("b"), Some(8));
    assert_eq!(layout.alignment, 8);
    assert_eq!(info.size, 16);
    assert_eq!(layout.member_types["b"], TypeId::BOOL);
}

#[test]
fn test_identical_records_are_distinct() {
    let mut registry = TypeRegistry::new();
    let a = registry.declare_type("A").unwrap();
    let b = registry.declare_type("B").unwrap();
    registry
        .define_type("A", vec![("x".to_owned(), TypeId::INT)])
        .unwrap();
    registry
        .define_type("B", vec![("x".to_owned(), TypeId::INT)])
        .unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_nested_record_alignment() {
    let mut registry = TypeRegistry::new();
    registry.declare_type("Inner").unwrap();
    registry
        .define_type("Inner", vec![("flag".to_owned(), TypeId::BOOL)])
        .unwrap();
    let inner = registry.find_type("Inner");
    registry.declare_type("Outer").unwrap();
    registry
        .define_type(
            "Outer",
            vec![("n".to_owned(), TypeId::INT), ("inner".to_owned(), inner)],
        )
        .unwrap();
    let outer = registry.get(registry.find_type("Outer")).unwrap();
    assert_eq!(outer.as_record().unwrap().offset_of("inner"), Some(8));
    assert_eq!(outer.size, 16);
}

#[test]
fn test_incomplete_member_rejected() {
    let mut registry = TypeRegistry::new();
    registry.declare_type("Node").unwrap();
    let node = registry.find_type("Node");
    let result = registry.define_type("Node", vec![("next".to_owned(), node)]);
    assert_eq!(
        result,
        Err(TypeError::IncompleteMember {
            record: "Node".to_owned(),
            member: "next".to_owned(),
            ty: "Node".to_owned(),
        })
    );

    let result = registry.define_type("Node", vec![("v".to_owned(), TypeId::VOID)]);
    assert!(matches!(result, Err(TypeError::IncompleteMember { .. })));
}

#[test]
fn test_redeclare_and_redefine() {
    let mut registry = TypeRegistry::new();
    assert_eq!(
        registry.declare_type("int"),
        Err(TypeError::AlreadyDeclared("int".to_owned()))
    );
    assert_eq!(
        registry.define_type("int", Vec::new()),
        Err(TypeError::AlreadyDefined("int".to_owned()))
    );
    assert_eq!(
        registry.define_type("Ghost", Vec::new()),
        Err(TypeError::NotDeclared("Ghost".to_owned()))
    );
    registry.declare_type("Empty").unwrap();
    registry.define_type("Empty", Vec::new()).unwrap();
    assert_eq!(
        registry.define_type("Empty", Vec::new()),
        Err(TypeError::AlreadyDefined("Empty".to_owned()))
    );
}

#[test]
fn test_unregister() {
    let mut registry = TypeRegistry::new();
    registry.declare_type("Tmp").unwrap();
    assert!(registry.unregister_type("Tmp"));
    assert!(!registry.unregister_type("Tmp"));
    assert_eq!(registry.find_type("Tmp"), TypeId::UNDEFINED);
}
