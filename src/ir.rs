//! Intermediate representation of an extracted project.
//!
//! These records are the system's own model of a web service's endpoints and
//! data models, independent of the final document format. Every record is
//! created during a single traversal of the declaration forest and never
//! mutated afterward; re-running extraction produces a fresh
//! [`ParsedProject`].

use crate::type_ref::TypeRef;
use serde::Serialize;
use serde_json::{Map, Value};

/// A single data-model field (or enumeration constant).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldData {
    /// Field name
    pub name: String,
    /// Resolved field type; absent for enumeration constants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<TypeRef>,
    /// Whether the field is required
    pub required: bool,
    /// Field description from documentation or tag attributes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Validation rules keyed by rule name (minLength, pattern, ...)
    pub validation_rules: Map<String, Value>,
    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Whether the field is deprecated
    pub deprecated: bool,
    /// Deprecation notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_notes: Option<String>,
}

impl FieldData {
    /// Create a new FieldData with the given name and no metadata
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: None,
            required: false,
            description: None,
            validation_rules: Map::new(),
            example: None,
            deprecated: false,
            deprecation_notes: None,
        }
    }
}

/// An extracted data model: a class, record, enumeration, or mined interface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelData {
    /// Model name
    pub name: String,
    /// Model description from documentation or tag attributes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared fields in source order
    pub fields: Vec<FieldData>,
    /// Whether the model was mined from an interface
    pub is_interface: bool,
    /// Whether the model is an enumeration
    pub is_enum: bool,
    /// Qualified names of extended types
    pub extends_list: Vec<String>,
    /// Qualified names of implemented interfaces
    pub implements_list: Vec<String>,
    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Whether the model is deprecated
    pub deprecated: bool,
    /// Deprecation notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_notes: Option<String>,
    /// Version the model was deprecated in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Free-form extensions set by tag handlers (isEntity, tableName, ...)
    pub extensions: Map<String, Value>,
}

impl ModelData {
    /// Create a new ModelData with the given name and no metadata
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
            is_interface: false,
            is_enum: false,
            extends_list: Vec::new(),
            implements_list: Vec::new(),
            example: None,
            deprecated: false,
            deprecation_notes: None,
            since: None,
            extensions: Map::new(),
        }
    }

    /// Append a field, preserving source order
    pub fn add_field(&mut self, field: FieldData) {
        self.fields.push(field);
    }
}

/// The location an endpoint parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
}

impl ParameterLocation {
    /// The OpenAPI `in` value
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
        }
    }
}

/// A single endpoint parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterData {
    /// Parameter name
    pub name: String,
    /// Parameter location
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter is required
    pub required: bool,
    /// Parameter description from documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolved parameter type
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// How a collaborator is injected into its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectionType {
    Field,
    Constructor,
}

/// An injected collaborator of a controller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyData {
    /// Field or parameter name at the injection site
    pub name: String,
    /// The injected type
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether the injection happens through a field or a constructor
    pub injection_type: InjectionType,
}

/// HTTP methods recognized on mapped controller methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// The uppercase method name
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// The lowercase method name used as a paths-map key
    pub fn lowercase(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        }
    }

    /// Parse an uppercase method name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            _ => None,
        }
    }
}

/// A single mapped controller method.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointData {
    /// The combined base + relative path
    pub path: String,
    /// The HTTP method
    pub method: HttpMethod,
    /// Operation summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Operation description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Grouping tags
    pub tags: Vec<String>,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterData>,
    /// Request body type, when a body-carrying parameter exists
    pub request_body_type: Option<TypeRef>,
    /// The method's produced type; `None` for void-like methods
    pub response_type: Option<TypeRef>,
    /// Simple name of the owning controller
    pub controller_name: String,
    /// Namespace of the owning controller
    pub controller_package: String,
    /// Injected collaborators of the owning controller
    pub dependencies: Vec<DependencyData>,
    /// Whether the endpoint is deprecated
    pub deprecated: bool,
}

/// Kinds of transient relationship edges between declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelationType {
    Injects,
    Extends,
    Implements,
}

/// A transient graph edge between two declarations.
///
/// Edges are consumed once, to populate endpoint dependency lists, and then
/// discarded; they are not part of the serialized IR.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Fully-qualified name of the declaring class
    pub source_class: String,
    /// Name of the related type
    pub target_class: String,
    /// The relationship kind
    pub rel_type: RelationType,
    /// Injection-site name, set for INJECTS edges
    pub name: Option<String>,
    /// Injection mechanism, set for INJECTS edges
    pub injection_type: Option<InjectionType>,
    /// Originating method, when the edge was recorded from one
    pub source_method: Option<String>,
    /// Target method, when the edge points at one
    pub target_method: Option<String>,
}

impl Relationship {
    /// Create an INJECTS edge
    pub fn injects(
        source_class: impl Into<String>,
        target_class: impl Into<String>,
        name: impl Into<String>,
        injection_type: InjectionType,
    ) -> Self {
        Self {
            source_class: source_class.into(),
            target_class: target_class.into(),
            rel_type: RelationType::Injects,
            name: Some(name.into()),
            injection_type: Some(injection_type),
            source_method: None,
            target_method: None,
        }
    }

    /// Create an EXTENDS or IMPLEMENTS edge
    pub fn inheritance(
        source_class: impl Into<String>,
        target_class: impl Into<String>,
        rel_type: RelationType,
    ) -> Self {
        Self {
            source_class: source_class.into(),
            target_class: target_class.into(),
            rel_type,
            name: None,
            injection_type: None,
            source_method: None,
            target_method: None,
        }
    }
}

/// The extracted intermediate representation of a project.
///
/// Append-only while extraction runs; read-only afterward. Insertion order
/// of endpoints and models is preserved end-to-end and determines the key
/// order of the synthesized document's `paths` and `schemas` maps.
#[derive(Debug, Default, Serialize)]
pub struct ParsedProject {
    endpoints: Vec<EndpointData>,
    models: Vec<ModelData>,
    components: Vec<String>,
}

impl ParsedProject {
    /// Create an empty project
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an endpoint
    pub fn add_endpoint(&mut self, endpoint: EndpointData) {
        self.endpoints.push(endpoint);
    }

    /// Append a model
    pub fn add_model(&mut self, model: ModelData) {
        self.models.push(model);
    }

    /// Append a component name
    pub fn add_component(&mut self, component: impl Into<String>) {
        self.components.push(component.into());
    }

    /// Extracted endpoints in insertion order
    pub fn endpoints(&self) -> &[EndpointData] {
        &self.endpoints
    }

    /// Extracted models in insertion order
    pub fn models(&self) -> &[ModelData] {
        &self.models
    }

    /// Component names in insertion order
    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub(crate) fn endpoints_mut(&mut self) -> &mut [EndpointData] {
        &mut self.endpoints
    }
}
