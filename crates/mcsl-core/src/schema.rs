//! Variable declarations and the validated [`VariableSchema`].

use indexmap::IndexMap;

use crate::error::SchemaError;
use crate::value::{Value, ValueKind};

/// Names that belong to the context's own accessors and can never be
/// declared as variables or used for auxiliary values.
pub const RESERVED_NAMES: [&str; 3] = ["past", "getstate", "setstate"];

/// Declaration of one simulation variable.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDef {
    /// Unique variable name.
    pub name: String,
    /// Declared kind. Every write is checked against it.
    pub kind: ValueKind,
    /// Value the variable holds before the begin callback runs.
    pub default: Value,
}

impl VariableDef {
    /// Declare a variable with an explicit kind.
    ///
    /// The default is not checked here; [`VariableSchema::new`] rejects
    /// a default whose kind differs from `kind`.
    pub fn new(name: impl Into<String>, kind: ValueKind, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            default: default.into(),
        }
    }

    /// Declare an integer variable.
    pub fn integer(name: impl Into<String>, default: i64) -> Self {
        Self::new(name, ValueKind::Integer, default)
    }

    /// Declare a real variable.
    pub fn real(name: impl Into<String>, default: f64) -> Self {
        Self::new(name, ValueKind::Real, default)
    }

    /// Declare a boolean variable.
    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, ValueKind::Boolean, default)
    }

    /// Declare a text variable.
    pub fn text(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Text, Value::Text(default.into()))
    }
}

/// Whether `name` is one of the [`RESERVED_NAMES`].
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// An ordered, validated set of variable declarations.
///
/// Immutable once built. Variables keep their declaration order, and
/// each has a stable position index used by per-trajectory storage.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableSchema {
    vars: IndexMap<String, VariableDef>,
}

impl VariableSchema {
    /// Validate `defs` and build a schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] if a name is empty, duplicated or
    /// reserved, or a default does not match its kind. An empty list is
    /// valid: a simulation may keep all of its state auxiliary.
    pub fn new(defs: Vec<VariableDef>) -> Result<Self, SchemaError> {
        let mut vars = IndexMap::with_capacity(defs.len());
        for (index, def) in defs.into_iter().enumerate() {
            if def.name.is_empty() {
                return Err(SchemaError::EmptyName { index });
            }
            if is_reserved(&def.name) {
                return Err(SchemaError::ReservedName { name: def.name });
            }
            if def.default.kind() != def.kind {
                return Err(SchemaError::DefaultKindMismatch {
                    found: def.default.kind(),
                    declared: def.kind,
                    name: def.name,
                });
            }
            if vars.contains_key(&def.name) {
                return Err(SchemaError::DuplicateName { name: def.name });
            }
            vars.insert(def.name.clone(), def);
        }
        Ok(Self { vars })
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables are declared.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Declaration position of `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.vars.get_index_of(name)
    }

    /// Declaration for `name`.
    pub fn get(&self, name: &str) -> Option<&VariableDef> {
        self.vars.get(name)
    }

    /// Declaration at position `index`.
    pub fn get_index(&self, index: usize) -> Option<&VariableDef> {
        self.vars.get_index(index).map(|(_, def)| def)
    }

    /// Declared kind of `name`.
    pub fn kind_of(&self, name: &str) -> Option<ValueKind> {
        self.vars.get(name).map(|def| def.kind)
    }

    /// Variable names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = &VariableDef> {
        self.vars.values()
    }

    /// Default values in declaration order.
    pub fn defaults(&self) -> Vec<Value> {
        self.vars.values().map(|def| def.default.clone()).collect()
    }
}
