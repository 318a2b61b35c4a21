use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// Event handler carried as a prop. Receives the event payload.
pub type Callback = Arc<dyn Fn(&serde_json::Value) + Send + Sync>;

/// Insertion-ordered prop bag.
pub type Props = IndexMap<String, PropValue>;

pub const CLASS_NAME: &str = "className";

#[derive(Clone)]
pub enum PropValue {
    Callback(Callback),
    ClassName(String),
    Value(serde_json::Value),
}

impl PropValue {
    #[must_use]
    pub fn callback(f: impl Fn(&serde_json::Value) + Send + Sync + 'static) -> Self {
        Self::Callback(Arc::new(f))
    }

    #[must_use]
    pub fn class_name(names: impl Into<String>) -> Self {
        Self::ClassName(names.into())
    }

    #[must_use]
    pub fn value(value: impl Into<serde_json::Value>) -> Self {
        Self::Value(value.into())
    }

    /// Identity comparison: callbacks by pointer, everything else by value.
    #[must_use]
    pub fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Callback(a), Self::Callback(b)) => Arc::ptr_eq(a, b),
            (Self::ClassName(a), Self::ClassName(b)) => a == b,
            (Self::Value(a), Self::Value(b)) => a == b,
            _ => false,
        }
    }

    /// Whitespace-separated class names held by this prop, if any.
    pub(crate) fn class_tokens(&self) -> Vec<&str> {
        match self {
            Self::ClassName(names) => names.split_whitespace().collect(),
            Self::Value(serde_json::Value::String(names)) => names.split_whitespace().collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("Callback(..)"),
            Self::ClassName(names) => f.debug_tuple("ClassName").field(names).finish(),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// A renderable node: a component name, its declared props and children.
#[derive(Debug, Clone)]
pub struct Element {
    pub kind: String,
    pub props: Props,
    pub children: Vec<Element>,
}

impl Element {
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: PropValue) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.get(key)
    }

    /// Calls the callback stored under `key`. Returns `false` when there is none.
    pub fn invoke(&self, key: &str, event: &serde_json::Value) -> bool {
        match self.props.get(key) {
            Some(PropValue::Callback(callback)) => {
                callback(event);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn class_name(&self) -> Option<String> {
        self.props
            .get(CLASS_NAME)
            .map(|value| value.class_tokens().join(" "))
    }

    /// Same kind, shallow-equal props and shallow-equal children.
    #[must_use]
    pub fn shallow_eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && props_shallow_eq(&self.props, &other.props)
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.shallow_eq(b))
    }
}

#[must_use]
pub fn props_shallow_eq(a: &Props, b: &Props) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|((ka, va), (kb, vb))| ka == kb && va.shallow_eq(vb))
}
