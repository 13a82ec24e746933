use super::*;

const RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 4 * 1024 * 1024;

/// Structural equality of two values.
///
/// Identical references and `===`-equal primitives are equal. Dates compare
/// by instant. Composites compare by owned key set and recursively equal
/// values, ignoring key order. Mismatched shapes are simply unequal.
///
/// A pair of composites that is already being compared further up the
/// recursion is assumed equal, so self-referential values terminate.
pub fn deep_equal(actual: &Value, expected: &Value) -> bool {
    DeepEqual::default().compare(actual, expected)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompositeKind {
    Array,
    Arguments,
    Object,
}

#[derive(Clone, Copy)]
struct Composite<'a> {
    kind: CompositeKind,
    ptr: *const (),
    value: &'a Value,
}

/// Every value falls into exactly one of these before comparison.
enum Shape<'a> {
    Null,
    Primitive(&'a Value),
    Date(i64),
    Composite(Composite<'a>),
}

impl<'a> Shape<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Undefined | Value::Null => Self::Null,
            Value::Date(ms) => Self::Date(*ms.borrow()),
            Value::Array(array) => Self::Composite(Composite {
                kind: CompositeKind::Array,
                ptr: Rc::as_ptr(array) as *const (),
                value,
            }),
            Value::Arguments(array) => Self::Composite(Composite {
                kind: CompositeKind::Arguments,
                ptr: Rc::as_ptr(array) as *const (),
                value,
            }),
            Value::Object(object) => Self::Composite(Composite {
                kind: CompositeKind::Object,
                ptr: Rc::as_ptr(object) as *const (),
                value,
            }),
            Value::Bool(_)
            | Value::Number(_)
            | Value::Float(_)
            | Value::BigInt(_)
            | Value::String(_)
            | Value::RegExp(_) => Self::Primitive(value),
        }
    }
}

#[derive(Default)]
struct DeepEqual {
    in_progress: HashSet<(*const (), *const ())>,
}

impl DeepEqual {
    fn compare(&mut self, actual: &Value, expected: &Value) -> bool {
        if actual.strict_equal(expected) {
            return true;
        }
        match (Shape::of(actual), Shape::of(expected)) {
            (Shape::Date(left), Shape::Date(right)) => left == right,
            (Shape::Composite(left), Shape::Composite(right)) => {
                self.compare_composites(left, right)
            }
            (Shape::Primitive(left), Shape::Primitive(right)) => primitive_equal(left, right),
            // null/undefined already matched themselves above
            _ => false,
        }
    }

    fn compare_composites(&mut self, left: Composite<'_>, right: Composite<'_>) -> bool {
        // Argument lists only ever equal other argument lists.
        let left_is_arguments = left.kind == CompositeKind::Arguments;
        let right_is_arguments = right.kind == CompositeKind::Arguments;
        if left_is_arguments != right_is_arguments {
            return false;
        }

        let pair = (left.ptr, right.ptr);
        if !self.in_progress.insert(pair) {
            return true;
        }
        let equal = stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || {
            self.compare_entries(left.value, right.value)
        });
        self.in_progress.remove(&pair);
        equal
    }

    fn compare_entries(&mut self, actual: &Value, expected: &Value) -> bool {
        let left = owned_entries(actual);
        let right = owned_entries(expected);
        if left.len() != right.len() {
            return false;
        }
        let right_by_key = right
            .iter()
            .map(|(key, value)| (key.as_str(), value))
            .collect::<HashMap<_, _>>();
        for (key, value) in &left {
            let Some(other) = right_by_key.get(key.as_str()) else {
                return false;
            };
            if !self.compare(value, other) {
                return false;
            }
        }
        true
    }
}

fn primitive_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::RegExp(l), Value::RegExp(r)) => l.same_pattern(r),
        _ => false,
    }
}

/// Owned keys of a composite: element indices first, then named properties.
fn owned_entries(value: &Value) -> Vec<(String, Value)> {
    match value {
        Value::Array(array) | Value::Arguments(array) => {
            let array = array.borrow();
            let mut out = Vec::with_capacity(array.len() + array.properties.len());
            for (idx, element) in array.iter().enumerate() {
                out.push((idx.to_string(), element.clone()));
            }
            for (key, entry) in array.properties.iter() {
                out.push((key.clone(), entry.clone()));
            }
            out
        }
        Value::Object(object) => object.borrow().to_vec(),
        _ => Vec::new(),
    }
}
