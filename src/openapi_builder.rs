use crate::ir::{EndpointData, HttpMethod, ParsedProject};
use crate::schema_builder::SchemaBuilder;
use crate::type_ref::TypeRef;
use log::debug;
use serde_json::{json, Map, Value};

/// Generic base names treated as collections when resolving response schemas.
const COLLECTION_BASES: [&str; 2] = ["List", "Set"];

/// OpenAPI document builder.
///
/// Converts extracted endpoints into a `paths` map and assembles the final
/// document around them. Response schema resolution recurses exactly one
/// level into generic wrappers (outer level plus one inner level); deeper
/// nesting degrades to a `$ref` or object fallback at the innermost
/// unresolved level. This bounded depth is a deliberate property of the
/// output, not a resolver to be completed.
pub struct OpenApiBuilder {
    title: String,
    version: String,
}

impl OpenApiBuilder {
    /// Create a builder with the default document info
    pub fn new() -> Self {
        Self {
            title: "Generated API Documentation".to_string(),
            version: "1.0.0".to_string(),
        }
    }

    /// Set custom info for the document
    pub fn with_info(mut self, title: impl Into<String>, version: impl Into<String>) -> Self {
        self.title = title.into();
        self.version = version.into();
        self
    }

    /// Builds the complete document from the project IR.
    pub fn build(&self, project: &ParsedProject, schema_builder: &mut SchemaBuilder) -> Value {
        debug!("Building OpenAPI document");

        schema_builder.build_schemas(project.models());

        json!({
            "openapi": "3.0.0",
            "info": {
                "title": self.title,
                "version": self.version,
            },
            "servers": [
                {"url": "https://api.example.com/v1", "description": "Production server"}
            ],
            "paths": self.build_paths(project.endpoints()),
            "components": {"schemas": schema_builder.components()},
        })
    }

    /// Builds the `paths` map, one operation per endpoint, preserving
    /// endpoint insertion order.
    pub fn build_paths(&self, endpoints: &[EndpointData]) -> Value {
        let mut paths = Map::new();

        for endpoint in endpoints {
            debug!("Adding operation: {} {}", endpoint.method.as_str(), endpoint.path);

            let operation = Self::build_operation(endpoint);

            let entry = paths
                .entry(endpoint.path.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(methods) = entry {
                methods.insert(endpoint.method.lowercase().to_string(), operation);
            }
        }

        Value::Object(paths)
    }

    fn build_operation(endpoint: &EndpointData) -> Value {
        let mut operation = Map::new();

        if !endpoint.tags.is_empty() {
            operation.insert("tags".to_string(), json!(endpoint.tags));
        }
        if let Some(summary) = &endpoint.summary {
            operation.insert("summary".to_string(), Value::from(summary.as_str()));
        }
        if let Some(description) = &endpoint.description {
            operation.insert("description".to_string(), Value::from(description.as_str()));
        }

        operation.insert(
            "parameters".to_string(),
            Self::build_parameters(endpoint),
        );

        if let Some(request_body) = Self::build_request_body(endpoint) {
            operation.insert("requestBody".to_string(), request_body);
        }

        operation.insert(
            "responses".to_string(),
            Self::build_responses(endpoint.response_type.as_ref()),
        );

        if endpoint.deprecated {
            operation.insert("deprecated".to_string(), Value::Bool(true));
        }

        Value::Object(operation)
    }

    /// Parameters always carry a string schema, whatever the source type.
    fn build_parameters(endpoint: &EndpointData) -> Value {
        let parameters: Vec<Value> = endpoint
            .parameters
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "in": p.location.as_str(),
                    "required": p.required,
                    "schema": {"type": "string"},
                })
            })
            .collect();

        Value::Array(parameters)
    }

    /// A request body is emitted only when one exists and the method is not
    /// GET.
    fn build_request_body(endpoint: &EndpointData) -> Option<Value> {
        if endpoint.request_body_type.is_none() || endpoint.method == HttpMethod::Get {
            return None;
        }

        Some(json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": {"type": "object"}
                }
            }
        }))
    }

    fn build_responses(response_type: Option<&TypeRef>) -> Value {
        json!({
            "200": {
                "description": "Successful Response",
                "content": {
                    "application/json": {
                        "schema": Self::resolve_response_schema(response_type)
                    }
                }
            }
        })
    }

    /// Outer level of the bounded response-schema recursion.
    fn resolve_response_schema(response_type: Option<&TypeRef>) -> Value {
        let Some(type_ref) = response_type else {
            return json!({"type": "object"});
        };

        if type_ref.base.is_empty() {
            return json!({"type": "object"});
        }

        if type_ref.args.is_empty() {
            return Self::schema_ref(&type_ref.base);
        }

        if is_collection(&type_ref.base) && type_ref.args.len() == 1 {
            return json!({
                "type": "array",
                "items": Self::schema_ref(&type_ref.args[0].base),
            });
        }

        if type_ref.args.len() == 1 {
            // Wrapper: compose the base schema with a synthetic data property
            return json!({
                "allOf": [
                    Self::schema_ref(&type_ref.base),
                    {"properties": {"data": Self::resolve_wrapped_schema(&type_ref.args[0])}},
                ]
            });
        }

        // Composition is defined for single-argument wrappers only
        Self::schema_ref(&type_ref.base)
    }

    /// Inner level of the recursion, applied to a wrapper's argument.
    fn resolve_wrapped_schema(arg: &TypeRef) -> Value {
        if arg.base.is_empty() || arg.base == "?" {
            return json!({"type": "object"});
        }

        if is_collection(&arg.base) && arg.args.len() == 1 {
            return json!({
                "type": "array",
                "items": Self::schema_ref(&arg.args[0].base),
            });
        }

        Self::schema_ref(&arg.base)
    }

    fn schema_ref(name: &str) -> Value {
        json!({"$ref": format!("#/components/schemas/{}", name)})
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_collection(base: &str) -> bool {
    COLLECTION_BASES.contains(&base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ModelData, ParameterData, ParameterLocation};

    fn endpoint(path: &str, method: HttpMethod) -> EndpointData {
        EndpointData {
            path: path.to_string(),
            method,
            summary: None,
            description: None,
            tags: vec![],
            parameters: vec![],
            request_body_type: None,
            response_type: None,
            controller_name: "TestController".to_string(),
            controller_package: "com.shop.api".to_string(),
            dependencies: vec![],
            deprecated: false,
        }
    }

    fn operation<'a>(paths: &'a Value, path: &str, method: &str) -> &'a Value {
        &paths[path][method]
    }

    #[test]
    fn test_simple_ref_response() {
        let mut ep = endpoint("/api/users/{id}", HttpMethod::Get);
        ep.response_type = Some(TypeRef::simple("User"));

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let schema =
            &operation(&paths, "/api/users/{id}", "get")["responses"]["200"]["content"]["application/json"]["schema"];

        assert_eq!(schema["$ref"], "#/components/schemas/User");
    }

    #[test]
    fn test_collection_response_becomes_array() {
        let mut ep = endpoint("/api/users", HttpMethod::Get);
        ep.response_type = Some(TypeRef::generic("List", vec![TypeRef::simple("User")]));

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let schema =
            &operation(&paths, "/api/users", "get")["responses"]["200"]["content"]["application/json"]["schema"];

        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["$ref"], "#/components/schemas/User");
    }

    #[test]
    fn test_set_is_also_a_collection() {
        let mut ep = endpoint("/api/roles", HttpMethod::Get);
        ep.response_type = Some(TypeRef::generic("Set", vec![TypeRef::simple("Role")]));

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let schema =
            &operation(&paths, "/api/roles", "get")["responses"]["200"]["content"]["application/json"]["schema"];

        assert_eq!(schema["type"], "array");
    }

    #[test]
    fn test_wrapper_response_composes_all_of() {
        let mut ep = endpoint("/api/users/{id}", HttpMethod::Get);
        ep.response_type = Some(TypeRef::generic(
            "ApiResponse",
            vec![TypeRef::simple("User")],
        ));

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let schema =
            &operation(&paths, "/api/users/{id}", "get")["responses"]["200"]["content"]["application/json"]["schema"];

        let all_of = schema["allOf"].as_array().unwrap();
        assert_eq!(all_of.len(), 2);
        assert_eq!(all_of[0]["$ref"], "#/components/schemas/ApiResponse");
        assert_eq!(
            all_of[1]["properties"]["data"]["$ref"],
            "#/components/schemas/User"
        );
    }

    #[test]
    fn test_wrapper_of_collection() {
        let mut ep = endpoint("/api/users", HttpMethod::Get);
        ep.response_type = Some(TypeRef::generic(
            "ApiResponse",
            vec![TypeRef::generic("List", vec![TypeRef::simple("User")])],
        ));

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let schema =
            &operation(&paths, "/api/users", "get")["responses"]["200"]["content"]["application/json"]["schema"];

        let data = &schema["allOf"][1]["properties"]["data"];
        assert_eq!(data["type"], "array");
        assert_eq!(data["items"]["$ref"], "#/components/schemas/User");
    }

    #[test]
    fn test_wrapper_of_wrapper_stops_recursing() {
        // Page<User> inside ApiResponse: the inner generic collapses to a
        // bare ref of its base
        let mut ep = endpoint("/api/users", HttpMethod::Get);
        ep.response_type = Some(TypeRef::generic(
            "ApiResponse",
            vec![TypeRef::generic("Page", vec![TypeRef::simple("User")])],
        ));

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let schema =
            &operation(&paths, "/api/users", "get")["responses"]["200"]["content"]["application/json"]["schema"];

        let data = &schema["allOf"][1]["properties"]["data"];
        assert_eq!(data["$ref"], "#/components/schemas/Page");
        assert!(data.get("allOf").is_none());
    }

    #[test]
    fn test_absent_response_is_object() {
        let ep = endpoint("/api/ping", HttpMethod::Get);

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let schema =
            &operation(&paths, "/api/ping", "get")["responses"]["200"]["content"]["application/json"]["schema"];

        assert_eq!(schema["type"], "object");
    }

    #[test]
    fn test_multi_argument_generic_falls_back_to_ref() {
        let mut ep = endpoint("/api/lookup", HttpMethod::Get);
        ep.response_type = Some(TypeRef::generic(
            "Map",
            vec![TypeRef::simple("String"), TypeRef::simple("User")],
        ));

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let schema =
            &operation(&paths, "/api/lookup", "get")["responses"]["200"]["content"]["application/json"]["schema"];

        assert_eq!(schema["$ref"], "#/components/schemas/Map");
    }

    #[test]
    fn test_no_request_body_for_get() {
        let mut ep = endpoint("/api/search", HttpMethod::Get);
        ep.request_body_type = Some(TypeRef::simple("Filter"));

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let op = operation(&paths, "/api/search", "get");

        assert!(op.get("requestBody").is_none());
    }

    #[test]
    fn test_request_body_for_post() {
        let mut ep = endpoint("/api/users", HttpMethod::Post);
        ep.request_body_type = Some(TypeRef::simple("CreateUserRequest"));

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let body = &operation(&paths, "/api/users", "post")["requestBody"];

        assert_eq!(body["required"], true);
        assert_eq!(
            body["content"]["application/json"]["schema"]["type"],
            "object"
        );
    }

    #[test]
    fn test_no_request_body_without_body_type() {
        let ep = endpoint("/api/users", HttpMethod::Post);

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        assert!(operation(&paths, "/api/users", "post").get("requestBody").is_none());
    }

    #[test]
    fn test_parameters_always_string_typed() {
        let mut ep = endpoint("/api/users/{id}", HttpMethod::Get);
        ep.parameters.push(ParameterData {
            name: "id".to_string(),
            location: ParameterLocation::Path,
            required: true,
            description: None,
            ty: TypeRef::simple("long"),
        });
        ep.parameters.push(ParameterData {
            name: "verbose".to_string(),
            location: ParameterLocation::Query,
            required: false,
            description: None,
            ty: TypeRef::simple("boolean"),
        });

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let params = operation(&paths, "/api/users/{id}", "get")["parameters"]
            .as_array()
            .unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params[0]["name"], "id");
        assert_eq!(params[0]["in"], "path");
        assert_eq!(params[0]["required"], true);
        assert_eq!(params[0]["schema"]["type"], "string");
        assert_eq!(params[1]["in"], "query");
        assert_eq!(params[1]["required"], false);
        // Even the boolean query parameter is string-typed
        assert_eq!(params[1]["schema"]["type"], "string");
    }

    #[test]
    fn test_operation_metadata_emitted() {
        let mut ep = endpoint("/api/users", HttpMethod::Get);
        ep.tags = vec!["Users".to_string()];
        ep.summary = Some("List users".to_string());
        ep.description = Some("Returns every user.".to_string());
        ep.deprecated = true;

        let paths = OpenApiBuilder::new().build_paths(&[ep]);
        let op = operation(&paths, "/api/users", "get");

        assert_eq!(op["tags"][0], "Users");
        assert_eq!(op["summary"], "List users");
        assert_eq!(op["description"], "Returns every user.");
        assert_eq!(op["deprecated"], true);
    }

    #[test]
    fn test_operations_share_a_path_entry() {
        let mut get = endpoint("/api/users", HttpMethod::Get);
        get.response_type = Some(TypeRef::simple("User"));
        let post = endpoint("/api/users", HttpMethod::Post);

        let paths = OpenApiBuilder::new().build_paths(&[get, post]);
        let entry = paths["/api/users"].as_object().unwrap();

        assert!(entry.contains_key("get"));
        assert!(entry.contains_key("post"));
    }

    #[test]
    fn test_paths_preserve_endpoint_order() {
        let paths = OpenApiBuilder::new().build_paths(&[
            endpoint("/api/zebras", HttpMethod::Get),
            endpoint("/api/aardvarks", HttpMethod::Get),
        ]);

        let keys: Vec<_> = paths.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["/api/zebras", "/api/aardvarks"]);
    }

    #[test]
    fn test_document_envelope() {
        let mut project = ParsedProject::new();
        project.add_model(ModelData::new("User"));
        project.add_endpoint(endpoint("/api/users", HttpMethod::Get));

        let mut schema_builder = SchemaBuilder::new();
        let document = OpenApiBuilder::new().build(&project, &mut schema_builder);

        assert_eq!(document["openapi"], "3.0.0");
        assert_eq!(document["info"]["title"], "Generated API Documentation");
        assert_eq!(document["info"]["version"], "1.0.0");
        assert_eq!(document["servers"][0]["url"], "https://api.example.com/v1");
        assert!(document["paths"]["/api/users"]["get"].is_object());
        assert!(document["components"]["schemas"]["User"].is_object());
    }

    #[test]
    fn test_document_custom_info() {
        let project = ParsedProject::new();
        let mut schema_builder = SchemaBuilder::new();

        let document = OpenApiBuilder::new()
            .with_info("Shop API", "2.3.0")
            .build(&project, &mut schema_builder);

        assert_eq!(document["info"]["title"], "Shop API");
        assert_eq!(document["info"]["version"], "2.3.0");
    }
}
