use crate::forest::TypeNode;
use serde::{Deserialize, Serialize};

/// The builder's marker for a wildcard/unbounded generic argument.
pub const WILDCARD: &str = "?";

/// Synthetic base name used for array/indexed types.
pub const ARRAY_BASE: &str = "Array";

/// A resolved (possibly generic) type reference.
///
/// `base` is never empty; `args` preserves the source order of the generic
/// arguments. Wildcard arguments are omitted entirely rather than being kept
/// as placeholders. A `TypeRef` is immutable once built and owned by the
/// field, parameter, or endpoint record that captured it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// The base type name (e.g., "User", "List", "long")
    pub base: String,
    /// Resolved generic arguments, in source order
    #[serde(default)]
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    /// Create a TypeRef for a non-generic type
    pub fn simple(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            args: Vec::new(),
        }
    }

    /// Create a TypeRef for a generic type with the given arguments
    pub fn generic(base: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            base: base.into(),
            args,
        }
    }
}

/// Resolves a builder type node into a [`TypeRef`].
///
/// Pure and recursive: a non-generic node becomes `{base, args: []}`; a
/// generic node resolves each actual argument in order, dropping wildcard
/// arguments; an array node becomes a synthetic `Array` wrapping the resolved
/// element type.
pub fn resolve(node: &TypeNode) -> TypeRef {
    if node.is_array {
        let element = TypeNode {
            is_array: false,
            ..node.clone()
        };
        return TypeRef::generic(ARRAY_BASE, vec![resolve(&element)]);
    }

    let args = node
        .args
        .iter()
        .filter(|arg| arg.name != WILDCARD)
        .map(resolve)
        .collect();

    TypeRef {
        base: node.name.clone(),
        args,
    }
}
