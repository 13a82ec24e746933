use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::FileFailurePersistence;
use ui_assertions::{Expect, Recorder, Value, deep_equal};

const DEEP_EQUAL_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/deep_equal_property_test.txt";
const DEFAULT_DEEP_EQUAL_PROPTEST_CASES: u32 = 256;

fn deep_equal_proptest_cases() -> u32 {
    std::env::var("UI_ASSERTIONS_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_DEEP_EQUAL_PROPTEST_CASES)
}

/// Plain data used to build two independent `Value` trees with the same shape.
#[derive(Clone, Debug)]
enum Shape {
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Date(i64),
    List(Vec<Shape>),
    Map(Vec<(String, Shape)>),
}

impl Shape {
    fn build(&self) -> Value {
        match self {
            Self::Undefined => Value::Undefined,
            Self::Null => Value::Null,
            Self::Bool(v) => Value::from(*v),
            Self::Int(v) => Value::from(*v),
            Self::Text(v) => Value::from(v.as_str()),
            Self::Date(v) => Value::date(*v),
            Self::List(items) => Value::array(items.iter().map(Shape::build)),
            Self::Map(entries) => Value::object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.build())),
            ),
        }
    }

    fn build_reversed(&self) -> Value {
        match self {
            Self::List(items) => Value::array(items.iter().map(Shape::build_reversed)),
            Self::Map(entries) => Value::object(
                entries
                    .iter()
                    .rev()
                    .map(|(key, value)| (key.clone(), value.build_reversed())),
            ),
            _ => self.build(),
        }
    }
}

fn key_strategy() -> BoxedStrategy<String> {
    prop_oneof![Just("a"), Just("b"), Just("c"), Just("id"), Just("label")]
        .prop_map(str::to_string)
        .boxed()
}

fn leaf_strategy() -> BoxedStrategy<Shape> {
    prop_oneof![
        Just(Shape::Undefined),
        Just(Shape::Null),
        any::<bool>().prop_map(Shape::Bool),
        (-5i64..5).prop_map(Shape::Int),
        "[a-c]{0,3}".prop_map(Shape::Text),
        (0i64..3).prop_map(Shape::Date),
    ]
    .boxed()
}

fn dedup_keys(entries: Vec<(String, Shape)>) -> Vec<(String, Shape)> {
    let mut out: Vec<(String, Shape)> = Vec::new();
    for (key, value) in entries {
        if !out.iter().any(|(existing, _)| *existing == key) {
            out.push((key, value));
        }
    }
    out
}

fn shape_strategy() -> BoxedStrategy<Shape> {
    leaf_strategy()
        .prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(Shape::List),
                vec((key_strategy(), inner), 0..4).prop_map(|e| Shape::Map(dedup_keys(e))),
            ]
        })
        .boxed()
}

fn is_leaf(value: &Value) -> bool {
    !value.is_composite() && !matches!(value, Value::Date(_))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: deep_equal_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(DEEP_EQUAL_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn independently_built_copies_are_deep_equal(shape in shape_strategy()) {
        let left = shape.build();
        let right = shape.build_reversed();
        prop_assert!(deep_equal(&left, &right), "left={left:?} right={right:?}");
        prop_assert!(deep_equal(&right, &left));
    }

    #[test]
    fn deep_equal_is_strict_equal_for_leaves(a in leaf_strategy(), b in leaf_strategy()) {
        let (a, b) = (a.build(), b.build());
        prop_assume!(is_leaf(&a) && is_leaf(&b));
        prop_assert_eq!(deep_equal(&a, &b), a.strict_equal(&b));
    }

    #[test]
    fn dates_equal_iff_same_instant(x in -1_000i64..1_000, y in -1_000i64..1_000) {
        prop_assert_eq!(deep_equal(&Value::date(x), &Value::date(y)), x == y);
    }

    #[test]
    fn changing_one_entry_breaks_equality(
        entries in vec((key_strategy(), -5i64..5), 1..5),
        bump in 1i64..10,
    ) {
        let entries = entries
            .into_iter()
            .fold(Vec::<(String, i64)>::new(), |mut out, (key, value)| {
                if !out.iter().any(|(existing, _)| *existing == key) {
                    out.push((key, value));
                }
                out
            });
        let original = Value::object(entries.iter().map(|(k, v)| (k.clone(), Value::from(*v))));
        let changed = Value::object(entries.iter().enumerate().map(|(idx, (k, v))| {
            let v = if idx == 0 { *v + bump } else { *v };
            (k.clone(), Value::from(v))
        }));
        prop_assert!(!deep_equal(&original, &changed));
    }

    #[test]
    fn extra_key_breaks_equality(entries in vec((key_strategy(), -5i64..5), 0..4)) {
        let base = Value::object(entries.iter().map(|(k, v)| (k.clone(), Value::from(*v))));
        let extended = Value::object(entries.iter().map(|(k, v)| (k.clone(), Value::from(*v))));
        extended.set("extra", Value::Null);
        prop_assert!(!deep_equal(&base, &extended));
    }

    #[test]
    fn equal_with_itself_always_passes(shape in shape_strategy()) {
        let recorder = Recorder::shared();
        let expect = Expect::new(recorder.clone());
        let value = shape.build();
        prop_assert!(expect.equal(&value, &value, "identity"));
        prop_assert!(!expect.not_equal(&value, &value, "identity"));
        prop_assert_eq!(recorder.borrow().records().len(), 2);
    }
}
