use super::*;

/// A dynamic value as seen by test code.
///
/// Composite kinds (`Array`, `Arguments`, `Object`), dates and regular
/// expressions are reference values: cloning a `Value` shares the same
/// allocation, and [`Value::strict_equal`] compares them by identity.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(i64),
    Float(f64),
    BigInt(JsBigInt),
    String(String),
    Date(Rc<RefCell<i64>>),
    RegExp(Rc<Pattern>),
    Array(Rc<RefCell<ArrayValue>>),
    /// The argument list of a call, an ordered sequence distinct from arrays.
    Arguments(Rc<RefCell<ArrayValue>>),
    Object(Rc<RefCell<ObjectValue>>),
}

#[derive(Debug, Clone, Default)]
pub struct ObjectValue {
    entries: Vec<(String, Value)>,
    index_by_key: HashMap<String, usize>,
}

impl ObjectValue {
    pub fn new(entries: Vec<(String, Value)>) -> Self {
        let mut value = Self::default();
        for (key, entry_value) in entries {
            value.set_entry(key, entry_value);
        }
        value
    }

    pub fn set_entry(&mut self, key: String, value: Value) {
        if let Some(index) = self.index_by_key.get(&key).copied() {
            if let Some((_, existing)) = self.entries.get_mut(index) {
                *existing = value;
                return;
            }
        }
        let index = self.entries.len();
        self.entries.push((key.clone(), value));
        self.index_by_key.insert(key, index);
    }

    pub fn get_entry(&self, key: &str) -> Option<Value> {
        self.index_by_key
            .get(key)
            .and_then(|index| self.entries.get(*index))
            .map(|(_, value)| value.clone())
    }

    pub fn remove_entry(&mut self, key: &str) -> Option<Value> {
        let index = self.index_by_key.remove(key)?;
        let (_, removed) = self.entries.remove(index);
        for slot in self.index_by_key.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index_by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl From<Vec<(String, Value)>> for ObjectValue {
    fn from(entries: Vec<(String, Value)>) -> Self {
        Self::new(entries)
    }
}

impl std::ops::Deref for ObjectValue {
    type Target = [(String, Value)];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

/// Elements plus any named properties attached to the sequence.
#[derive(Debug, Default)]
pub struct ArrayValue {
    pub elements: Vec<Value>,
    pub properties: ObjectValue,
}

impl ArrayValue {
    pub fn new(elements: Vec<Value>) -> Self {
        Self {
            elements,
            properties: ObjectValue::default(),
        }
    }
}

impl std::ops::Deref for ArrayValue {
    type Target = Vec<Value>;

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl std::ops::DerefMut for ArrayValue {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.elements
    }
}

impl Value {
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect::<Vec<_>>();
        Self::Object(Rc::new(RefCell::new(ObjectValue::new(entries))))
    }

    pub fn array(elements: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(Rc::new(RefCell::new(ArrayValue::new(
            elements.into_iter().collect(),
        ))))
    }

    pub fn arguments(elements: impl IntoIterator<Item = Value>) -> Self {
        Self::Arguments(Rc::new(RefCell::new(ArrayValue::new(
            elements.into_iter().collect(),
        ))))
    }

    /// A date at `timestamp_ms` milliseconds since the Unix epoch.
    pub fn date(timestamp_ms: i64) -> Self {
        Self::Date(Rc::new(RefCell::new(timestamp_ms)))
    }

    pub fn regexp(pattern: Pattern) -> Self {
        Self::RegExp(Rc::new(pattern))
    }

    /// Sets `key` on an object, or a named property on an array.
    ///
    /// Returns `false` when the value cannot hold properties.
    pub fn set(&self, key: &str, value: Value) -> bool {
        match self {
            Self::Object(object) => {
                object.borrow_mut().set_entry(key.to_string(), value);
                true
            }
            Self::Array(array) | Self::Arguments(array) => {
                let mut array = array.borrow_mut();
                match array_index(key) {
                    Some(index) if index < array.len() => array.elements[index] = value,
                    Some(index) if index == array.len() => array.elements.push(value),
                    _ => array.properties.set_entry(key.to_string(), value),
                }
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Self::Object(object) => object.borrow().get_entry(key),
            Self::Array(array) | Self::Arguments(array) => {
                let array = array.borrow();
                match array_index(key) {
                    Some(index) => array.get(index).cloned(),
                    None => array.properties.get_entry(key),
                }
            }
            _ => None,
        }
    }

    /// Appends to an array or argument list. Returns `false` for other kinds.
    pub fn push(&self, value: Value) -> bool {
        match self {
            Self::Array(array) | Self::Arguments(array) => {
                array.borrow_mut().push(value);
                true
            }
            _ => false,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Arguments(_) | Self::Object(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) | Self::Float(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::RegExp(_) => "regexp",
            Self::Array(_) => "array",
            Self::Arguments(_) => "arguments",
            Self::Object(_) => "object",
        }
    }

    pub fn truthy(&self) -> bool {
        match self {
            Self::Bool(v) => *v,
            Self::String(v) => !v.is_empty(),
            Self::Number(v) => *v != 0,
            Self::Float(v) => *v != 0.0 && !v.is_nan(),
            Self::BigInt(v) => !v.is_zero(),
            Self::Date(_) => true,
            Self::RegExp(_) => true,
            Self::Array(_) => true,
            Self::Arguments(_) => true,
            Self::Object(_) => true,
            Self::Null => false,
            Self::Undefined => false,
        }
    }

    /// JS `===`: primitives by value, reference kinds by identity.
    pub fn strict_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::Float(l), Value::Float(r)) => l == r,
            (Value::Number(l), Value::Float(r)) => (*l as f64) == *r,
            (Value::Float(l), Value::Number(r)) => *l == (*r as f64),
            (Value::BigInt(l), Value::BigInt(r)) => l == r,
            (Value::String(l), Value::String(r)) => l == r,
            (Value::Date(l), Value::Date(r)) => Rc::ptr_eq(l, r),
            (Value::RegExp(l), Value::RegExp(r)) => Rc::ptr_eq(l, r),
            (Value::Array(l), Value::Array(r)) => Rc::ptr_eq(l, r),
            (Value::Arguments(l), Value::Arguments(r)) => Rc::ptr_eq(l, r),
            (Value::Object(l), Value::Object(r)) => Rc::ptr_eq(l, r),
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            _ => false,
        }
    }

    /// The value as a string, or `None` for non-string kinds.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Milliseconds since the epoch for dates.
    pub fn timestamp_ms(&self) -> Option<i64> {
        match self {
            Self::Date(value) => Some(*value.borrow()),
            _ => None,
        }
    }
}

/// Index named by `key`, only for its canonical decimal spelling ("1", not "01" or "+1").
fn array_index(key: &str) -> Option<usize> {
    key.parse::<usize>().ok().filter(|index| index.to_string() == key)
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<JsBigInt> for Value {
    fn from(value: JsBigInt) -> Self {
        Self::BigInt(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Pattern> for Value {
    fn from(value: Pattern) -> Self {
        Self::regexp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::array(values.into_iter().map(Into::into))
    }
}
