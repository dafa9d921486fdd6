use crate::error::{Error, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Loader for declaration forests produced by an external syntax-tree builder.
///
/// This crate never parses program text itself. An external builder walks the
/// annotated sources and emits one JSON file per source unit, each containing
/// a `{"declarations": [...]}` object. The `ForestLoader` deserializes those
/// files into the node types defined in this module, which is the only place
/// where the builder's wire format is known; everything downstream works on
/// [`Declaration`] values.
///
/// # Forest format
///
/// ```json
/// {
///   "declarations": [
///     {
///       "name": "UserController",
///       "namespace": "com.shop.api",
///       "kind": "class",
///       "tags": [{"name": "RestController"}],
///       "methods": [
///         {
///           "name": "getUser",
///           "returnType": {"name": "User"},
///           "tags": [{"name": "GetMapping", "attributes": {"value": "/{id}"}}],
///           "parameters": [
///             {"name": "id", "type": {"name": "long"},
///              "tags": [{"name": "PathVariable"}]}
///           ]
///         }
///       ]
///     }
///   ]
/// }
/// ```
pub struct ForestLoader;

/// A successfully loaded declaration forest with its source path.
#[derive(Debug)]
pub struct LoadedForest {
    /// Path to the forest file
    pub path: PathBuf,
    /// Top-level declarations in source order
    pub declarations: Vec<Declaration>,
}

/// Wire shape of a forest file.
#[derive(Debug, Deserialize)]
struct ForestFile {
    declarations: Vec<Declaration>,
}

/// A named construct exported by the external builder: a class, interface,
/// enumeration, or record, with its attached metadata tags, documentation
/// text, and members.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    /// Simple declaration name
    pub name: String,
    /// Enclosing namespace, empty when the declaration is top-level
    #[serde(default)]
    pub namespace: String,
    /// The kind of declaration
    pub kind: DeclarationKind,
    /// Whether the declaration is abstract
    #[serde(default)]
    pub is_abstract: bool,
    /// Metadata tags attached to the declaration itself
    #[serde(default)]
    pub tags: Vec<TagNode>,
    /// Free-text documentation attached to the declaration
    #[serde(default)]
    pub doc: Option<String>,
    /// Qualified names of extended types
    #[serde(default)]
    pub extends: Vec<String>,
    /// Qualified names of implemented interfaces
    #[serde(default)]
    pub implements: Vec<String>,
    /// Declared fields (record components included)
    #[serde(default)]
    pub fields: Vec<FieldNode>,
    /// Declared constructors
    #[serde(default)]
    pub constructors: Vec<ConstructorNode>,
    /// Declared methods
    #[serde(default)]
    pub methods: Vec<MethodNode>,
    /// Enumeration constants, present only for enum declarations
    #[serde(default)]
    pub constants: Vec<ConstantNode>,
}

/// Declaration kinds distinguished by the external builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Record,
}

/// A metadata tag: a structured marker with optional key/value attributes.
///
/// Attribute values are the raw source-expression text the builder saw, so
/// string literals may still carry their surrounding quotes; consumers strip
/// them where a plain string is expected.
#[derive(Debug, Clone, Deserialize)]
pub struct TagNode {
    /// Tag name, without any sigil
    pub name: String,
    /// Key/value attributes, empty for bare marker tags
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// A declared field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldNode {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub tags: Vec<TagNode>,
    #[serde(default)]
    pub doc: Option<String>,
}

/// A declared constructor.
#[derive(Debug, Clone, Deserialize)]
pub struct ConstructorNode {
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    #[serde(default)]
    pub tags: Vec<TagNode>,
}

/// A declared method.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodNode {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    /// The produced type; absent for void-like methods
    #[serde(default)]
    pub return_type: Option<TypeNode>,
    #[serde(default)]
    pub tags: Vec<TagNode>,
    #[serde(default)]
    pub doc: Option<String>,
}

/// A method or constructor parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterNode {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeNode,
    #[serde(default)]
    pub tags: Vec<TagNode>,
    #[serde(default)]
    pub doc: Option<String>,
}

/// An enumeration constant.
#[derive(Debug, Clone, Deserialize)]
pub struct ConstantNode {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
}

/// A (possibly generic) type reference as reported by the external builder.
///
/// This is the abstract capability the type-reference model resolves over:
/// a base name, ordered child type nodes, and an array marker. Wildcard
/// arguments appear with the name `"?"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeNode {
    pub name: String,
    #[serde(default)]
    pub args: Vec<TypeNode>,
    #[serde(default)]
    pub is_array: bool,
}

impl Declaration {
    /// The fully-qualified name: `namespace.name`, or just the name when
    /// the namespace is empty.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Whether a tag with the given name is attached.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// The first attached tag with the given name, if any.
    pub fn tag(&self, name: &str) -> Option<&TagNode> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Trimmed documentation text, `None` when absent or blank.
    pub fn doc_text(&self) -> Option<&str> {
        trimmed(&self.doc)
    }
}

impl TagNode {
    /// The value of the given attribute, if present.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

impl FieldNode {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    pub fn doc_text(&self) -> Option<&str> {
        trimmed(&self.doc)
    }
}

impl MethodNode {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    pub fn tag(&self, name: &str) -> Option<&TagNode> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn doc_text(&self) -> Option<&str> {
        trimmed(&self.doc)
    }
}

impl ParameterNode {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    pub fn tag(&self, name: &str) -> Option<&TagNode> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn doc_text(&self) -> Option<&str> {
        trimmed(&self.doc)
    }
}

impl ConstantNode {
    pub fn doc_text(&self) -> Option<&str> {
        trimmed(&self.doc)
    }
}

fn trimmed(doc: &Option<String>) -> Option<&str> {
    doc.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ForestLoader {
    /// Loads a single forest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not deserialize
    /// as a declaration forest. Both are fatal input errors: the run aborts
    /// rather than producing a partial document.
    pub fn load_file(path: &Path) -> Result<LoadedForest> {
        debug!("Loading declaration forest: {}", path.display());

        let content = fs::read_to_string(path)?;

        let forest: ForestFile = serde_json::from_str(&content).map_err(|e| Error::Forest {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(
            "Loaded {} declarations from {}",
            forest.declarations.len(),
            path.display()
        );

        Ok(LoadedForest {
            path: path.to_path_buf(),
            declarations: forest.declarations,
        })
    }

    /// Loads multiple forest files, failing on the first invalid one.
    pub fn load_files(paths: &[PathBuf]) -> Result<Vec<LoadedForest>> {
        debug!("Loading {} forest files", paths.len());

        let mut forests = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::load_file(path) {
                Ok(forest) => forests.push(forest),
                Err(e) => {
                    warn!("Failed to load {}: {}", path.display(), e);
                    return Err(e);
                }
            }
        }

        Ok(forests)
    }
}
