use crate::ir::ModelData;
use log::debug;
use serde_json::{json, Map, Value};

/// Schema synthesizer converting extracted models into named component
/// schemas.
///
/// The mapping is intentionally shallow: every field is typed by mapping its
/// base type name through the primitive table, and anything else (object
/// references and collection wrappers included) becomes `string`. Recursive
/// `$ref` resolution happens only for request/response bodies, in the
/// path/operation synthesizer.
pub struct SchemaBuilder {
    /// Named schemas in model insertion order
    components: Map<String, Value>,
}

impl SchemaBuilder {
    /// Create an empty schema builder
    pub fn new() -> Self {
        Self {
            components: Map::new(),
        }
    }

    /// Builds one `object` schema per model, keyed by model name.
    pub fn build_schemas(&mut self, models: &[ModelData]) {
        for model in models {
            debug!("Building schema for model {}", model.name);

            let mut properties = Map::new();
            for field in &model.fields {
                let base = field
                    .type_ref
                    .as_ref()
                    .map(|t| t.base.as_str())
                    .unwrap_or_default();
                properties.insert(
                    field.name.clone(),
                    json!({"type": map_primitive(base)}),
                );
            }

            self.components.insert(
                model.name.clone(),
                json!({
                    "type": "object",
                    "properties": properties,
                }),
            );
        }
    }

    /// The accumulated component schemas
    pub fn components(&self) -> &Map<String, Value> {
        &self.components
    }

    /// Consumes the builder, returning the component schemas
    pub fn into_components(self) -> Map<String, Value> {
        self.components
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a source primitive type name to a JSON-schema primitive.
fn map_primitive(type_name: &str) -> &'static str {
    match type_name {
        "int" | "Integer" | "long" | "Long" => "integer",
        "double" | "Double" | "float" | "Float" => "number",
        "boolean" | "Boolean" => "boolean",
        _ => "string",
    }
}
