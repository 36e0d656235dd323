// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! End-to-end tests for wrapping, invoking, and querying tracked callables.

use calltrack::{
    signature, CallArgs, CallRegistry, Callable, CallableId, Function, MemorySink, Opaque, Output,
    PlainRenderer, Signature, TrackerError, Value,
};

fn capturing_registry() -> (CallRegistry, MemorySink) {
    let sink = MemorySink::new();
    let registry = CallRegistry::with_output(Output::new(PlainRenderer::new(), sink.clone()));
    (registry, sink)
}

fn greet_fn() -> Function<impl Fn(&CallArgs) -> String + Send + Sync> {
    Function::new("greet", signature![name, greeting = "Hi"], |args: &CallArgs| {
        let name = args.get(0).and_then(Value::as_str).unwrap_or_default();
        let greeting = args
            .keyword("greeting")
            .and_then(Value::as_str)
            .unwrap_or("Hi");
        format!("{}, {}!", greeting, name)
    })
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_greet_end_to_end() {
    let (registry, sink) = capturing_registry();
    let greet = registry.wrap(greet_fn()).unwrap();

    assert_eq!(greet.call(&CallArgs::new().arg("Ann")), "Hi, Ann!");
    assert_eq!(registry.count(greet.id()).unwrap(), 1);
    let line = sink.last().unwrap();
    assert!(line.contains("greet(): call #1"));
    assert!(line.contains("name = Ann, greeting = Hi"));

    assert_eq!(
        greet.call(&CallArgs::new().arg("Bo").kwarg("greeting", "Yo")),
        "Yo, Bo!"
    );
    assert_eq!(registry.count(greet.id()).unwrap(), 2);
    let line = sink.last().unwrap();
    assert!(line.contains("greet(): call #2"));
    assert!(line.contains("name = Bo, greeting = Yo"));
}

#[test]
fn test_one_line_per_invocation() {
    let (registry, sink) = capturing_registry();
    let greet = registry.wrap(greet_fn()).unwrap();

    for name in ["a", "b", "c"] {
        greet.call(&CallArgs::new().arg(name));
    }

    assert_eq!(
        sink.lines(),
        vec![
            "greet(): call #1 ( name = a, greeting = Hi )",
            "greet(): call #2 ( name = b, greeting = Hi )",
            "greet(): call #3 ( name = c, greeting = Hi )",
        ]
    );
}

// ============================================================================
// Counting
// ============================================================================

#[test]
fn test_count_matches_number_of_calls() {
    let registry = CallRegistry::with_output(Output::disabled());
    let f = registry
        .wrap(Function::new("f", signature![x], |args: &CallArgs| args.len()))
        .unwrap();

    for n in 1..=25u64 {
        f.call(&CallArgs::new().arg(n));
        assert_eq!(registry.count(f.id()).unwrap(), n);
    }
}

#[test]
fn test_reset_then_single_call_counts_one() {
    let registry = CallRegistry::with_output(Output::disabled());
    let f = registry.wrap(greet_fn()).unwrap();

    for _ in 0..4 {
        f.call(&CallArgs::new().arg("x"));
    }
    registry.reset_count(f.id()).unwrap();
    f.call(&CallArgs::new().arg("x"));

    assert_eq!(registry.count(f.id()).unwrap(), 1);
}

#[test]
fn test_all_counts_reflects_current_state() {
    let registry = CallRegistry::with_output(Output::disabled());
    let greet = registry.wrap(greet_fn()).unwrap();
    let square = registry
        .wrap(Function::new("square", signature![n], |args: &CallArgs| {
            let n = args.get(0).and_then(Value::as_i64).unwrap_or(0);
            n * n
        }))
        .unwrap();

    greet.call(&CallArgs::new().arg("Ann"));
    square.call(&CallArgs::new().arg(3));
    square.call(&CallArgs::new().arg(4));

    let counts = registry.all_counts();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts["greet"], 1);
    assert_eq!(counts["square"], 2);

    registry.reset_all_counts();
    let counts = registry.all_counts();
    assert_eq!(counts["greet"], 0);
    assert_eq!(counts["square"], 0);

    let tracked = registry.all_tracked();
    assert_eq!(tracked.len(), 2);
    assert_eq!(tracked[0].name, "greet");
    assert_eq!(tracked[1].name, "square");
}

#[test]
fn test_count_of_never_wrapped_callable() {
    let registry = CallRegistry::with_output(Output::disabled());
    let f = greet_fn();
    assert!(matches!(
        registry.count(f.id()),
        Err(TrackerError::NotFound(_))
    ));
}

// ============================================================================
// Transparency
// ============================================================================

#[test]
fn test_return_value_is_unchanged() {
    let registry = CallRegistry::with_output(Output::disabled());
    let raw = greet_fn();
    let wrapped = registry.wrap(raw.clone()).unwrap();

    let inputs = [
        CallArgs::new().arg("Ann"),
        CallArgs::new().arg("Bo").kwarg("greeting", "Yo"),
        CallArgs::new(),
        CallArgs::new().arg(42),
    ];
    for args in &inputs {
        assert_eq!(wrapped.call(args), raw.call(args));
    }
}

#[test]
fn test_error_propagates_and_is_counted() {
    #[derive(Debug, PartialEq)]
    struct DivideByZero;

    let registry = CallRegistry::with_output(Output::disabled());
    let divide = registry
        .wrap(Function::new("divide", signature![a, b], |args: &CallArgs| {
            let a = args.get(0).and_then(Value::as_i64).unwrap_or(0);
            let b = args.get(1).and_then(Value::as_i64).unwrap_or(0);
            if b == 0 {
                Err(DivideByZero)
            } else {
                Ok(a / b)
            }
        }))
        .unwrap();

    assert_eq!(divide.call(&CallArgs::positional([10, 2])), Ok(5));
    assert_eq!(divide.call(&CallArgs::positional([1, 0])), Err(DivideByZero));
    assert_eq!(registry.count(divide.id()).unwrap(), 2);
}

// ============================================================================
// Introspection
// ============================================================================

#[test]
fn test_wrapping_opaque_callable_fails() {
    let registry = CallRegistry::with_output(Output::disabled());
    let native = Opaque::new("native_hash", |args: &CallArgs| args.len() as u64);

    match registry.wrap(native) {
        Err(TrackerError::Introspection { name, .. }) => assert_eq!(name, "native_hash"),
        other => panic!("Expected Introspection error, got {:?}", other.map(|t| t.count())),
    }
}

/// Hand-written callable that reports whatever parameter list it is given.
struct Declared {
    id: CallableId,
    signature: Signature,
}

impl Callable for Declared {
    type Output = ();

    fn id(&self) -> CallableId {
        self.id
    }

    fn name(&self) -> &str {
        "custom"
    }

    fn signature(&self) -> Result<Signature, TrackerError> {
        Ok(self.signature.clone())
    }

    fn call(&self, _args: &CallArgs) {}
}

#[test]
fn test_custom_callable_with_malformed_signature_is_rejected() {
    let (registry, sink) = capturing_registry();
    let custom = Declared {
        id: CallableId::new(),
        signature: Signature::new().optional("a", 1).required("b").required("b"),
    };
    let id = custom.id();

    match registry.wrap(custom) {
        Err(TrackerError::Introspection { name, reason }) => {
            assert_eq!(name, "custom");
            assert!(reason.contains("`b`"), "unexpected reason: {}", reason);
        }
        other => panic!("Expected Introspection error, got {:?}", other.map(|t| t.count())),
    }
    assert!(!registry.contains(id));
    assert!(sink.is_empty());
}

#[test]
fn test_custom_callable_with_duplicate_names_is_rejected() {
    let registry = CallRegistry::with_output(Output::disabled());
    let custom = Declared {
        id: CallableId::new(),
        signature: Signature::new().required("x").required("x"),
    };

    let err = registry.wrap(custom).unwrap_err();
    assert_eq!(
        err,
        TrackerError::introspection("custom", "duplicate parameter name `x`")
    );
}

#[test]
fn test_custom_callable_with_valid_signature_is_tracked() {
    let (registry, sink) = capturing_registry();
    let custom = Declared {
        id: CallableId::new(),
        signature: signature![a, b = 2],
    };
    let tracked = registry.wrap(custom).unwrap();

    tracked.call(&CallArgs::positional([10]));
    assert_eq!(sink.last().unwrap(), "custom(): call #1 ( a = 10, b = 2 )");
    assert_eq!(registry.count(tracked.id()).unwrap(), 1);
}

#[test]
fn test_unknown_defaults_treat_all_as_required() {
    let (registry, sink) = capturing_registry();
    let sig = Signature::from_parts(["a", "b"], None).unwrap();
    let f = registry
        .wrap(Function::new("legacy", sig, |_: &CallArgs| ()))
        .unwrap();

    f.call(&CallArgs::positional([1, 2]));
    assert_eq!(sink.last().unwrap(), "legacy(): call #1 ( a = 1, b = 2 )");
}

#[test]
fn test_positional_only_call_lists_params_in_order() {
    let (registry, sink) = capturing_registry();
    let f = registry
        .wrap(Function::new("point", signature![x, y, z], |_: &CallArgs| ()))
        .unwrap();

    f.call(&CallArgs::positional([Value::from(1.5), Value::from("up"), Value::Null]));
    assert_eq!(
        sink.last().unwrap(),
        "point(): call #1 ( x = 1.5, y = up, z = null )"
    );
}

#[test]
fn test_default_and_keyword_rendering() {
    let (registry, sink) = capturing_registry();
    let f = registry
        .wrap(Function::new("f", signature![a, b = 2], |_: &CallArgs| ()))
        .unwrap();

    f.call(&CallArgs::new().arg(1));
    assert!(sink.last().unwrap().contains("a = 1, b = 2"));

    f.call(&CallArgs::new().arg(1).kwarg("b", 5));
    assert!(sink.last().unwrap().contains("a = 1, b = 5"));
}
