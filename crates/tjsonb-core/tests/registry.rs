use tjsonb_core::{
    parse, CallError, Datum, DatumKind, DocumentCodec, FunctionDef, FunctionRegistry, ParseError,
};

fn codec() -> DocumentCodec {
    DocumentCodec::default()
}

fn document(text: &str) -> Datum {
    Datum::Document(parse(text).unwrap())
}

#[test]
fn registration_is_explicit_and_idempotent() {
    let mut registry = FunctionRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.register_builtins(), 5);
    assert_eq!(registry.register_builtins(), 0);
    assert_eq!(registry.len(), 5);

    let names: Vec<&str> = registry.functions().map(|def| def.name).collect();
    assert_eq!(
        names,
        [
            "tjsonb_aggregate_speed",
            "tjsonb_in",
            "tjsonb_out",
            "tjsonb_overlaps",
            "tjsonb_range"
        ]
    );
}

#[test]
fn duplicate_names_keep_the_first_definition() {
    fn always_true(_: &DocumentCodec, _: Vec<Datum>) -> Result<Datum, CallError> {
        Ok(Datum::Bool(true))
    }

    let mut registry = FunctionRegistry::with_builtins();
    let replacement = FunctionDef {
        name: "tjsonb_overlaps",
        args: &[],
        returns: DatumKind::Bool,
        body: always_true,
    };
    assert!(!registry.register(replacement));
    assert_eq!(registry.get("tjsonb_overlaps").unwrap().args.len(), 2);
}

#[test]
fn signatures() {
    let registry = FunctionRegistry::with_builtins();
    assert_eq!(
        registry.get("tjsonb_overlaps").unwrap().signature(),
        "tjsonb_overlaps(tjsonb, tjsonb) -> boolean"
    );
    assert_eq!(
        registry.get("tjsonb_aggregate_speed").unwrap().signature(),
        "tjsonb_aggregate_speed(tjsonb[]) -> float8"
    );
}

#[test]
fn input_and_output_functions() {
    let registry = FunctionRegistry::with_builtins();
    let parsed = registry
        .call(
            "tjsonb_in",
            &codec(),
            vec![Datum::Text(r#"2024-01-01T00:00:00Z|{"a": 1}"#.into())],
        )
        .unwrap();
    assert_eq!(parsed.kind(), DatumKind::Document);

    let text = registry.call("tjsonb_out", &codec(), vec![parsed]).unwrap();
    assert_eq!(text, Datum::Text(r#"2024-01-01 00:00:00+00|{"a":1}"#.into()));
}

#[test]
fn predicate_functions() {
    let registry = FunctionRegistry::with_builtins();
    let a = document(r#"2024-01-01|{"x": 1}"#);
    let b = document(r#"2024-01-02|{"x": 1}"#);

    assert_eq!(
        registry
            .call("tjsonb_overlaps", &codec(), vec![a.clone(), a.clone()])
            .unwrap(),
        Datum::Bool(true)
    );
    assert_eq!(
        registry
            .call("tjsonb_overlaps", &codec(), vec![a.clone(), b.clone()])
            .unwrap(),
        Datum::Bool(false)
    );
    assert_eq!(
        registry.call("tjsonb_range", &codec(), vec![a, b]).unwrap(),
        Datum::Text("Overlap found within range".into())
    );
}

#[test]
fn aggregate_function() {
    let registry = FunctionRegistry::with_builtins();
    let docs = vec![
        parse("2024-01-01|3").unwrap(),
        parse("2024-01-02|\"x\"").unwrap(),
        parse("2024-01-03|5").unwrap(),
    ];
    assert_eq!(
        registry
            .call("tjsonb_aggregate_speed", &codec(), vec![Datum::Documents(docs)])
            .unwrap(),
        Datum::Float(4.0)
    );
    assert_eq!(
        registry
            .call("tjsonb_aggregate_speed", &codec(), vec![Datum::Documents(vec![])])
            .unwrap(),
        Datum::Null
    );
}

#[test]
fn null_arguments_short_circuit() {
    let registry = FunctionRegistry::with_builtins();
    let result = registry
        .call(
            "tjsonb_overlaps",
            &codec(),
            vec![Datum::Null, document("2024-01-01|1")],
        )
        .unwrap();
    assert_eq!(result, Datum::Null);
}

#[test]
fn call_errors() {
    let registry = FunctionRegistry::with_builtins();
    assert!(matches!(
        registry.call("tjsonb_missing", &codec(), vec![]),
        Err(CallError::UnknownFunction(name)) if name == "tjsonb_missing"
    ));
    assert!(matches!(
        registry.call("tjsonb_out", &codec(), vec![]),
        Err(CallError::Arity { expected: 1, actual: 0, .. })
    ));
    assert!(matches!(
        registry.call(
            "tjsonb_overlaps",
            &codec(),
            vec![document("2024-01-01|1"), Datum::Text("x".into())]
        ),
        Err(CallError::ArgumentType {
            position: 2,
            expected: DatumKind::Document,
            actual: DatumKind::Text,
            ..
        })
    ));
    assert!(matches!(
        registry.call("tjsonb_in", &codec(), vec![Datum::Text("no-delimiter".into())]),
        Err(CallError::Parse(ParseError::MissingDelimiter))
    ));
}

#[test]
fn empty_registry_knows_nothing() {
    let registry = FunctionRegistry::new();
    assert!(registry.get("tjsonb_in").is_none());
    assert!(matches!(
        registry.call("tjsonb_in", &codec(), vec![Datum::Text("2024-01-01|1".into())]),
        Err(CallError::UnknownFunction(_))
    ));
}

#[test]
fn rendering() {
    let codec = codec();
    assert_eq!(Datum::Null.render(&codec), "null");
    assert_eq!(Datum::Float(2.5).render(&codec), "2.5");
    assert_eq!(document("2024-01-01|[1]").render(&codec), "2024-01-01 00:00:00+00|[1]");
}

#[test]
fn bodies_called_directly_check_their_arguments() {
    let registry = FunctionRegistry::with_builtins();
    let body = |name: &str| registry.get(name).unwrap().body;

    assert!(matches!(
        body("tjsonb_in")(&codec(), vec![]),
        Err(CallError::Arity { expected: 1, actual: 0, .. })
    ));
    assert!(matches!(
        body("tjsonb_out")(&codec(), vec![Datum::Bool(true)]),
        Err(CallError::ArgumentType {
            position: 1,
            expected: DatumKind::Document,
            actual: DatumKind::Bool,
            ..
        })
    ));
    assert!(matches!(
        body("tjsonb_range")(&codec(), vec![document("2024-01-01|1")]),
        Err(CallError::Arity { expected: 2, actual: 1, .. })
    ));
    assert!(matches!(
        body("tjsonb_overlaps")(&codec(), vec![Datum::Text("x".into()), document("2024-01-01|1")]),
        Err(CallError::ArgumentType { position: 1, .. })
    ));
    assert!(matches!(
        body("tjsonb_aggregate_speed")(&codec(), vec![Datum::Float(1.0)]),
        Err(CallError::ArgumentType {
            expected: DatumKind::Documents,
            ..
        })
    ));
    assert_eq!(
        body("tjsonb_overlaps")(&codec(), vec![document("2024-01-01|1"), document("2024-01-01|1")])
            .unwrap(),
        Datum::Bool(true)
    );
}
